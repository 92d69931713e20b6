// ==========================================
// 服装制造资源计划系统 - MRP API
// ==========================================
// 职责: 物料需求计划的生成与生命周期
// 红线: BOM 消费必须是条件批量更新 + 更新计数校验，
//       计数不符即回滚（回退已翻转的 BOM，删除已落库的 MRP）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::bom::Bom;
use crate::domain::identity::Actor;
use crate::domain::masters::RawMaterial;
use crate::domain::mrp::{format_mrp_number, Mrp};
use crate::domain::types::BomStatus;
use crate::repository::collections::{BOMS, MRPS, RAW_MATERIALS};
use crate::repository::DocumentStore;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// MRP API
pub struct MrpApi {
    store: Arc<DocumentStore>,
}

impl MrpApi {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 生成 MRP: 合并选中 BOM 的物料需求并翻转其状态为 assigned
    ///
    /// 前置条件: 所有选中 BOM 当前为 unassigned，任一不满足则整体拒绝
    pub fn create_mrp(&self, bom_ids: &[String], actor: &Actor) -> ApiResult<Mrp> {
        if bom_ids.is_empty() {
            return Err(ApiError::ValidationError("未选择任何 BOM".to_string()));
        }

        // 只取 id 集合内仍为 unassigned 的 BOM
        let docs = self.store.find_in_ids_eq(
            BOMS,
            bom_ids,
            "status",
            BomStatus::Unassigned.as_str(),
        )?;
        if docs.len() != bom_ids.len() {
            return Err(ApiError::ValidationError(format!(
                "选中 {} 个 BOM，仅 {} 个可消费（不存在或已被其他 MRP 占用）",
                bom_ids.len(),
                docs.len()
            )));
        }

        let boms: Vec<Bom> = docs
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        // 原材料主数据一次性预取，避免逐行查询
        let material_lookup = self.raw_material_lookup()?;
        let requirements = crate::engine::consolidate_material_requirements(&boms, |id| {
            material_lookup
                .get(id)
                .map(|(code, unit)| (code.clone(), unit.clone()))
        });

        let mrp_number = format_mrp_number(self.store.count(MRPS)?);
        let mrp = Mrp::new(
            mrp_number,
            bom_ids.to_vec(),
            requirements,
            &actor.username,
        );
        let doc = serde_json::to_value(&mrp)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        self.store.insert(MRPS, &doc)?;

        // 条件翻转: 仅 unassigned 的 BOM 被打上 assigned + mrp_id
        let changed = self.store.update_in_ids_guarded(
            BOMS,
            bom_ids,
            Some(("status", BomStatus::Unassigned.as_str())),
            &[
                ("status", BomStatus::Assigned.as_str()),
                ("mrp_id", mrp.id.as_str()),
            ],
            &[],
        )?;

        if changed != bom_ids.len() {
            // 有 BOM 在检查与翻转之间被并发占用，整体回滚
            warn!(
                mrp_number = %mrp.mrp_number,
                expected = bom_ids.len(),
                changed,
                "BOM 状态翻转计数不符，回滚本次 MRP 生成"
            );
            self.revert_boms_of(&mrp.id, bom_ids)?;
            self.store.delete_by_id(MRPS, &mrp.id)?;
            return Err(ApiError::ValidationError(
                "部分 BOM 已被其他 MRP 占用，本次生成已回滚".to_string(),
            ));
        }

        info!(
            mrp_number = %mrp.mrp_number,
            bom_count = bom_ids.len(),
            material_count = mrp.material_requirements.len(),
            total_cost = mrp.total_cost,
            "MRP 已生成"
        );
        Ok(mrp)
    }

    /// 查询 MRP 列表
    pub fn list(&self) -> ApiResult<Vec<Value>> {
        Ok(self.store.find_all(MRPS)?)
    }

    /// 按 id 查询 MRP
    pub fn get(&self, mrp_id: &str) -> ApiResult<Mrp> {
        let doc = self
            .store
            .find_by_id(MRPS, mrp_id)?
            .ok_or_else(|| ApiError::NotFound(format!("MRP(id={})不存在", mrp_id)))?;
        serde_json::from_value(doc).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 删除 MRP: 先回退成员 BOM（unassigned + 移除 mrp_id），再删除 MRP 文档
    pub fn delete_mrp(&self, mrp_id: &str) -> ApiResult<()> {
        let mrp = self.get(mrp_id)?;

        let reverted = self.revert_boms_of(&mrp.id, &mrp.bom_ids)?;
        if reverted != mrp.bom_ids.len() {
            // BOM 可能已被单独删除，回退数不足不阻断 MRP 删除
            warn!(
                mrp_number = %mrp.mrp_number,
                expected = mrp.bom_ids.len(),
                reverted,
                "部分成员 BOM 未能回退（可能已被删除）"
            );
        }

        if !self.store.delete_by_id(MRPS, mrp_id)? {
            error!(mrp_id, "MRP 文档在回退后消失");
            return Err(ApiError::NotFound(format!("MRP(id={})不存在", mrp_id)));
        }

        info!(mrp_number = %mrp.mrp_number, "MRP 已删除，成员 BOM 已释放");
        Ok(())
    }

    /// 回退指定 MRP 名下的 BOM: status -> unassigned，移除 mrp_id
    ///
    /// 以 mrp_id 为守卫，不会误伤已被其他 MRP 占用的 BOM
    fn revert_boms_of(&self, mrp_id: &str, bom_ids: &[String]) -> ApiResult<usize> {
        let reverted = self.store.update_in_ids_guarded(
            BOMS,
            bom_ids,
            Some(("mrp_id", mrp_id)),
            &[("status", BomStatus::Unassigned.as_str())],
            &["mrp_id"],
        )?;
        Ok(reverted)
    }

    /// material_id -> (code, unit) 预取表
    fn raw_material_lookup(&self) -> ApiResult<HashMap<String, (String, String)>> {
        let mut lookup = HashMap::new();
        for doc in self.store.find_all(RAW_MATERIALS)? {
            let material: RawMaterial = serde_json::from_value(doc)
                .map_err(|e| ApiError::InternalError(e.to_string()))?;
            lookup.insert(material.id.clone(), (material.code, material.unit));
        }
        Ok(lookup)
    }
}
