// ==========================================
// 服装制造资源计划系统 - 固定主数据模型
// ==========================================
// 用途: 历史固定 schema 集合（Seeder 迁移来源 / BOM 流程读取）
// 时间戳: 存储层统一 RFC3339 字符串（chrono serde 默认行为）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Buyer - 买家主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// Supplier - 供应商主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub material_type: String, // fabric / trims / accessories
    pub created_at: DateTime<Utc>,
}

// ==========================================
// RawMaterial - 原材料主数据
// ==========================================
// MRP 合并时按 id 反查 code / unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMaterial {
    pub id: String,
    pub name: String,
    pub code: String,          // 自然键（导入去重）
    pub material_type: String, // fabric / trims / accessories
    pub unit: String,          // meters / pieces / kg
    pub cost_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RawMaterial {
    pub fn new(name: &str, code: &str, material_type: &str, unit: &str, cost_per_unit: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.to_string(),
            material_type: material_type.to_string(),
            unit: unit.to_string(),
            cost_per_unit,
            supplier_id: None,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// Color - 颜色主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Color {
    pub id: String,
    pub name: String,
    pub code: String, // 自然键（导入去重）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_value: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Color {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.to_string(),
            hex_value: None,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// Size - 尺码主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Size {
    pub id: String,
    pub name: String,
    pub code: String, // 自然键（导入去重）
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Size {
    pub fn new(name: &str, code: &str, sort_order: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.to_string(),
            sort_order,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// Article - 款号主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub name: String,
    pub code: String, // 自然键（导入去重）
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn new(name: &str, code: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            buyer_id: None,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// Fabric - 面料主数据
// ==========================================
// 注意: 面料表无自然键，重复导入会产生重复行（历史行为，保持不变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fabric {
    pub id: String,
    pub item_type: String, // DYED / GREIGE / ZIP
    pub count_const: String,
    pub fabric_name: String,
    pub composition: String,
    pub add_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gsm: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub final_item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_roll_size: Option<String>,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
