// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的文档存储初始化、测试数据生成等功能
// ==========================================

use std::sync::Arc;

use garment_mrp::api::{BomApi, DynamicDataApi, MasterConfigApi, MasterDataApi, MrpApi};
use garment_mrp::domain::bom::BomLineItem;
use garment_mrp::domain::master_config::{FieldDefinition, MasterConfiguration};
use garment_mrp::domain::masters::{Article, Color, RawMaterial};
use garment_mrp::domain::types::FieldType;
use garment_mrp::domain::Actor;
use garment_mrp::repository::collections::{ARTICLES, COLORS, RAW_MATERIALS};
use garment_mrp::repository::DocumentStore;

/// 集成测试环境: 内存文档存储 + 全部 API 门面
pub struct TestEnv {
    pub store: Arc<DocumentStore>,
    pub config_api: MasterConfigApi,
    pub dynamic_api: DynamicDataApi,
    pub master_api: MasterDataApi,
    pub bom_api: BomApi,
    pub mrp_api: MrpApi,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = Arc::new(DocumentStore::in_memory().expect("无法创建内存存储"));
        Self {
            config_api: MasterConfigApi::new(Arc::clone(&store)),
            dynamic_api: DynamicDataApi::new(Arc::clone(&store)),
            master_api: MasterDataApi::new(Arc::clone(&store)),
            bom_api: BomApi::new(Arc::clone(&store)),
            mrp_api: MrpApi::new(Arc::clone(&store)),
            store,
        }
    }

    /// 写入固定主数据: 一个款号、一个颜色、若干原材料
    pub fn seed_fixed_masters(&self, materials: &[(&str, &str, &str, f64)]) {
        let article = Article::new("Polo Shirt", "ART-001", "Classic polo");
        self.master_api
            .create(ARTICLES, &article)
            .expect("写入款号失败");

        let color = Color::new("Navy", "NVY");
        self.master_api
            .create(COLORS, &color)
            .expect("写入颜色失败");

        for (name, code, unit, cost) in materials {
            let mut material = RawMaterial::new(name, code, "fabric", unit, *cost);
            // material_id 与 code 对齐，测试中便于断言
            material.id = (*code).to_string();
            self.master_api
                .create(RAW_MATERIALS, &material)
                .expect("写入原材料失败");
        }
    }

    /// 第一个款号 / 颜色的 id（seed_fixed_masters 之后可用）
    pub fn first_article_id(&self) -> String {
        let articles: Vec<Article> = self.master_api.list(ARTICLES).expect("查询款号失败");
        articles[0].id.clone()
    }

    pub fn first_color_id(&self) -> String {
        let colors: Vec<Color> = self.master_api.list(COLORS).expect("查询颜色失败");
        colors[0].id.clone()
    }
}

/// 测试操作者
pub fn test_actor() -> Actor {
    Actor::new("user-1", "tester", "admin")
}

/// 构建测试用主数据配置（Machine Master 风格）
pub fn machine_master_config(id: &str) -> MasterConfiguration {
    MasterConfiguration {
        id: id.to_string(),
        name: "Machine Master".to_string(),
        description: Some("Sewing machines".to_string()),
        icon: None,
        category: "production".to_string(),
        fields: vec![
            FieldDefinition::new("f1", "name", "Machine Name", FieldType::Text)
                .required(true)
                .order(1),
            FieldDefinition::new("f2", "machine_type", "Type", FieldType::Dropdown)
                .options(&["Sewing", "Cutting", "Pressing"])
                .order(2),
            FieldDefinition::new("f3", "capacity", "Capacity", FieldType::Number).order(3),
        ],
        enable_excel_upload: true,
        enable_image_upload: false,
        created_at: None,
        created_by: None,
        updated_at: None,
        updated_by: None,
    }
}

/// 构建 BOM 行项目
pub fn line_item(material_id: &str, total_consumption: f64, cost_per_unit: f64) -> BomLineItem {
    BomLineItem {
        material_id: material_id.to_string(),
        material_name: format!("Material {}", material_id),
        avg_consumption: total_consumption,
        wastage_percent: 0.0,
        total_consumption,
        cost_per_unit,
        total_cost: total_consumption * cost_per_unit,
    }
}
