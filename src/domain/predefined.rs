// ==========================================
// 服装制造资源计划系统 - 预置主数据配置
// ==========================================
// 用途: Predefined-Master Seeder 的固定配置清单
// 约束: id 为既定业务标识（buyer_master 等），不得改动 —
//       动态集合名与历史数据迁移都基于这些 id
// ==========================================

use crate::domain::master_config::{FieldDefinition, MasterConfiguration};
use crate::domain::types::FieldType;

/// 预置主数据配置 id 全集（顺序即状态报表顺序）
pub const PREDEFINED_MASTER_IDS: [&str; 7] = [
    "buyer_master",
    "supplier_master",
    "fabric_master",
    "color_master",
    "size_master",
    "article_master",
    "raw_material_master",
];

/// 构建全部预置配置
pub fn predefined_masters() -> Vec<MasterConfiguration> {
    vec![
        buyer_master(),
        supplier_master(),
        fabric_master(),
        color_master(),
        size_master(),
        article_master(),
        raw_material_master(),
    ]
}

fn base_config(id: &str, name: &str, description: &str, icon: &str, category: &str) -> MasterConfiguration {
    MasterConfiguration {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        icon: Some(icon.to_string()),
        category: category.to_string(),
        fields: Vec::new(),
        enable_excel_upload: true,
        enable_image_upload: false,
        created_at: None,
        created_by: None,
        updated_at: None,
        updated_by: None,
    }
}

fn text(id: &str, name: &str, label: &str, order: i32) -> FieldDefinition {
    FieldDefinition::new(id, name, label, FieldType::Text).order(order)
}

fn buyer_master() -> MasterConfiguration {
    let mut config = base_config(
        "buyer_master",
        "Buyer/Customer Master",
        "Manage all buyers and customers",
        "👥",
        "other",
    );
    config.fields = vec![
        text("1", "name", "Buyer Name", 0).required(true),
        text("2", "contact_person", "Contact Person", 1),
        text("3", "email", "Email", 2),
        text("4", "phone", "Phone", 3),
        FieldDefinition::new("5", "address", "Address", FieldType::Textarea).order(4),
        text("6", "country", "Country", 5),
    ];
    config
}

fn supplier_master() -> MasterConfiguration {
    let mut config = base_config(
        "supplier_master",
        "Supplier/Vendor Master",
        "Manage all suppliers and vendors",
        "🏢",
        "other",
    );
    config.fields = vec![
        text("1", "name", "Supplier Name", 0).required(true),
        text("2", "contact_person", "Contact Person", 1),
        text("3", "email", "Email", 2),
        text("4", "phone", "Phone", 3),
        FieldDefinition::new("5", "address", "Address", FieldType::Textarea).order(4),
        text("6", "material_type", "Material Type", 5),
    ];
    config
}

fn fabric_master() -> MasterConfiguration {
    let mut config = base_config(
        "fabric_master",
        "Fabric Master",
        "Manage fabric materials with all specifications",
        "🧵",
        "material",
    );
    config.enable_image_upload = true;
    config.fields = vec![
        FieldDefinition::new("1", "sr_no", "Serial No", FieldType::Number).order(0),
        text("2", "fabric_name", "Fabric Name", 1).required(true),
        text("3", "fabric_type", "Fabric Type", 2),
        text("4", "composition", "Composition", 3),
        text("5", "gsm", "GSM", 4),
        text("6", "width", "Width", 5),
        text("7", "color", "Color", 6),
        text("8", "supplier", "Supplier", 7),
        FieldDefinition::new("9", "cost_per_unit", "Cost per Unit", FieldType::Decimal).order(8),
        FieldDefinition::new("10", "unit", "Unit", FieldType::Dropdown)
            .options(&["meter", "kg", "yard"])
            .order(9),
        text("11", "final_item", "Final Item", 10),
    ];
    config
}

fn color_master() -> MasterConfiguration {
    let mut config = base_config(
        "color_master",
        "Color Master",
        "Manage color codes and specifications",
        "🎨",
        "other",
    );
    config.fields = vec![
        text("1", "name", "Color Name", 0).required(true),
        text("2", "code", "Color Code", 1),
        text("3", "hex_value", "Hex Value", 2),
        text("4", "pantone", "Pantone Code", 3),
    ];
    config
}

fn size_master() -> MasterConfiguration {
    let mut config = base_config(
        "size_master",
        "Size Master",
        "Manage size specifications",
        "📏",
        "other",
    );
    config.fields = vec![
        text("1", "name", "Size Name", 0).required(true),
        FieldDefinition::new("2", "category", "Category", FieldType::Dropdown)
            .options(&["Clothing", "Shoes", "Accessories"])
            .order(1),
        text("3", "measurements", "Measurements", 2),
    ];
    config
}

fn article_master() -> MasterConfiguration {
    let mut config = base_config(
        "article_master",
        "Article/Style Master",
        "Manage article and style specifications",
        "👕",
        "production",
    );
    config.enable_image_upload = true;
    config.fields = vec![
        text("1", "code", "Article Code", 0).required(true),
        text("2", "name", "Article Name", 1).required(true),
        FieldDefinition::new("3", "description", "Description", FieldType::Textarea).order(2),
        text("4", "category", "Category", 3),
        FieldDefinition::new("5", "season", "Season", FieldType::Dropdown)
            .options(&["Spring", "Summer", "Fall", "Winter"])
            .order(4),
    ];
    config
}

fn raw_material_master() -> MasterConfiguration {
    let mut config = base_config(
        "raw_material_master",
        "Raw Material Master",
        "Manage raw materials and components",
        "📦",
        "material",
    );
    config.fields = vec![
        text("1", "name", "Material Name", 0).required(true),
        FieldDefinition::new("2", "type", "Material Type", FieldType::Dropdown)
            .options(&["Fabric", "Trim", "Accessory", "Chemical"])
            .order(1),
        text("3", "supplier", "Supplier", 2),
        FieldDefinition::new("4", "unit_price", "Unit Price", FieldType::Decimal).order(3),
        text("5", "unit", "Unit", 4),
    ];
    config
}
