// ==========================================
// 服装制造资源计划系统 - BOM 领域模型
// ==========================================
// 固定 schema BOM: 供 MRP 合并引擎消费
// comprehensive BOM: 自由结构，不参与合并
// ==========================================

use crate::domain::types::BomStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// BomLineItem - BOM 行项目
// ==========================================
// total_cost 期望等于 total_consumption * cost_per_unit，
// 由调用方计算提供，引擎不强制校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLineItem {
    pub material_id: String,
    pub material_name: String,
    pub avg_consumption: f64,
    pub wastage_percent: f64,
    pub total_consumption: f64,
    pub cost_per_unit: f64,
    pub total_cost: f64,
}

// ==========================================
// Bom - 固定 schema BOM
// ==========================================
// status 转换: unassigned -> assigned（被 MRP 消费）
//              assigned -> unassigned（MRP 删除回退）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bom {
    pub id: String,
    pub article_id: String,
    pub article_name: String,
    pub color_id: String,
    pub color_name: String,
    pub items: Vec<BomLineItem>,
    pub total_cost: f64,
    pub status: BomStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Bom {
    /// 构建新 BOM（总成本 = 行项目 total_cost 之和）
    pub fn new(
        article_id: &str,
        article_name: &str,
        color_id: &str,
        color_name: &str,
        items: Vec<BomLineItem>,
    ) -> Self {
        let total_cost = items.iter().map(|item| item.total_cost).sum();
        Self {
            id: Uuid::new_v4().to_string(),
            article_id: article_id.to_string(),
            article_name: article_name.to_string(),
            color_id: color_id.to_string(),
            color_name: color_name.to_string(),
            items,
            total_cost,
            status: BomStatus::Unassigned,
            mrp_id: None,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// ComprehensiveBom - 自由结构 BOM
// ==========================================
// header / fabric_tables / trims_tables / operations 均为自由文档，
// 创建即 assigned，永不参与 MRP 合并
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveBom {
    pub id: String,
    pub header: serde_json::Value,
    #[serde(rename = "fabricTables")]
    pub fabric_tables: Vec<serde_json::Value>,
    #[serde(rename = "trimsTables")]
    pub trims_tables: Vec<serde_json::Value>,
    pub operations: Vec<serde_json::Value>,
    pub status: BomStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(material_id: &str, total_consumption: f64, cost_per_unit: f64) -> BomLineItem {
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

    #[test]
    fn test_bom_total_cost_is_item_sum() {
        let bom = Bom::new(
            "A1",
            "Polo Shirt",
            "C1",
            "Navy",
            vec![line("M1", 2.0, 5.0), line("M2", 1.0, 3.0)],
        );
        assert_eq!(bom.total_cost, 13.0);
        assert_eq!(bom.status, BomStatus::Unassigned);
        assert!(bom.mrp_id.is_none());
    }
}
