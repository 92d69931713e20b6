// ==========================================
// 服装制造资源计划系统 - 集合命名
// ==========================================
// 红线: 动态集合名只在此处拼接，禁止散落 format! 调用
// ==========================================

/// 主数据配置集合
pub const MASTER_CONFIGURATIONS: &str = "master_configurations";

/// 固定 schema BOM 集合
pub const BOMS: &str = "boms";

/// 自由结构 BOM 集合
pub const COMPREHENSIVE_BOMS: &str = "comprehensive_boms";

/// MRP 集合
pub const MRPS: &str = "mrps";

/// BOM 表单配置集合（单例文档，见 BOM_FORM_CONFIG_ID）
pub const BOM_FORM_CONFIGS: &str = "bom_form_configs";

/// BOM 表单配置的单例 id（染整 BOM 表单）
pub const BOM_FORM_CONFIG_ID: &str = "dyeing_bom";

// ===== 历史固定主数据集合（Seeder 迁移来源）=====
pub const BUYERS: &str = "buyers";
pub const SUPPLIERS: &str = "suppliers";
pub const RAW_MATERIALS: &str = "raw_materials";
pub const COLORS: &str = "colors";
pub const SIZES: &str = "sizes";
pub const ARTICLES: &str = "articles";
pub const FABRICS: &str = "fabrics";

/// 动态集合名前缀
pub const DYNAMIC_PREFIX: &str = "dynamic_";

/// 由配置 id 推导动态集合名（确定性）
pub fn dynamic_collection_name(config_id: &str) -> String {
    format!("{}{}", DYNAMIC_PREFIX, config_id)
}

/// 预置配置 id -> 历史固定集合名
pub fn legacy_collection_for(config_id: &str) -> Option<&'static str> {
    match config_id {
        "buyer_master" => Some(BUYERS),
        "supplier_master" => Some(SUPPLIERS),
        "fabric_master" => Some(FABRICS),
        "color_master" => Some(COLORS),
        "size_master" => Some(SIZES),
        "article_master" => Some(ARTICLES),
        "raw_material_master" => Some(RAW_MATERIALS),
        _ => None,
    }
}
