// ==========================================
// 服装制造资源计划系统 - MRP 领域模型
// ==========================================
// MRP = 多个 BOM 的物料需求合并结果（采购依据）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// MRP 编号宽度（MRP-00001）
pub const MRP_NUMBER_WIDTH: usize = 5;

/// 由当前 MRP 总数生成顺序编号
///
/// 注意: 非幂等、非防空洞的计数器（已知限制，见 DESIGN.md）
pub fn format_mrp_number(existing_count: u64) -> String {
    format!("MRP-{:0width$}", existing_count + 1, width = MRP_NUMBER_WIDTH)
}

// ==========================================
// MrpMaterialRequirement - 合并后的物料需求
// ==========================================
// 每个 material_id 对应一条；cost_per_unit 取首次遇到的行项目值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpMaterialRequirement {
    pub material_id: String,
    pub material_name: String,
    pub material_code: String, // 原材料主数据反查，缺失时为空串
    pub unit: String,          // 同上
    pub total_quantity: f64,
    pub cost_per_unit: f64,
    pub total_cost: f64,
}

// ==========================================
// Mrp - 物料需求计划
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mrp {
    pub id: String,
    pub mrp_number: String,
    pub bom_ids: Vec<String>,
    pub material_requirements: Vec<MrpMaterialRequirement>,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Mrp {
    pub fn new(
        mrp_number: String,
        bom_ids: Vec<String>,
        material_requirements: Vec<MrpMaterialRequirement>,
        created_by: &str,
    ) -> Self {
        let total_cost = material_requirements.iter().map(|req| req.total_cost).sum();
        Self {
            id: Uuid::new_v4().to_string(),
            mrp_number,
            bom_ids,
            material_requirements,
            total_cost,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
        }
    }
}
