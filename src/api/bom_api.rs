// ==========================================
// 服装制造资源计划系统 - BOM API
// ==========================================
// 职责: 固定 schema BOM 与自由结构 BOM 的生命周期
// 说明: 列表/查询/更新/删除横跨两个集合；合并引擎只消费固定 schema BOM
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::bom::{Bom, BomLineItem, ComprehensiveBom};
use crate::domain::identity::Actor;
use crate::domain::masters::{Article, Color};
use crate::domain::types::BomStatus;
use crate::repository::collections::{
    ARTICLES, BOMS, BOM_FORM_CONFIGS, BOM_FORM_CONFIG_ID, COLORS, COMPREHENSIVE_BOMS,
};
use crate::repository::DocumentStore;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// BOM API
pub struct BomApi {
    store: Arc<DocumentStore>,
}

impl BomApi {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 创建固定 schema BOM
    ///
    /// 款号/颜色名称由主数据解析，总成本 = 行项目之和（服务端计算）
    pub fn create_bom(
        &self,
        article_id: &str,
        color_id: &str,
        items: Vec<BomLineItem>,
    ) -> ApiResult<Bom> {
        let article: Article = self
            .store
            .find_by_id(ARTICLES, article_id)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ApiError::InternalError(e.to_string()))?
            .ok_or_else(|| ApiError::NotFound(format!("款号(id={})不存在", article_id)))?;

        let color: Color = self
            .store
            .find_by_id(COLORS, color_id)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ApiError::InternalError(e.to_string()))?
            .ok_or_else(|| ApiError::NotFound(format!("颜色(id={})不存在", color_id)))?;

        let bom = Bom::new(article_id, &article.name, color_id, &color.name, items);
        let doc = serde_json::to_value(&bom)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        self.store.insert(BOMS, &doc)?;

        info!(bom_id = %bom.id, article = %article.name, "BOM 已创建");
        Ok(bom)
    }

    /// 创建自由结构 BOM（header + 三个 tab 的自由文档）
    ///
    /// 历史行为: 创建即 assigned，不进入 MRP 合并候选
    pub fn create_comprehensive_bom(
        &self,
        header: Value,
        fabric_tables: Vec<Value>,
        trims_tables: Vec<Value>,
        operations: Vec<Value>,
        actor: &Actor,
    ) -> ApiResult<String> {
        let bom = ComprehensiveBom {
            id: Uuid::new_v4().to_string(),
            header,
            fabric_tables,
            trims_tables,
            operations,
            status: BomStatus::Assigned,
            created_at: Utc::now(),
            created_by: actor.username.clone(),
        };

        let doc = serde_json::to_value(&bom)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        self.store.insert(COMPREHENSIVE_BOMS, &doc)?;
        Ok(bom.id)
    }

    /// 查询 BOM 列表（两个集合合并，附 bom_type 标记；可按状态过滤）
    pub fn list(&self, status: Option<BomStatus>) -> ApiResult<Vec<Value>> {
        let (regular, comprehensive) = match status {
            Some(status) => (
                self.store.find_eq(BOMS, "status", status.as_str())?,
                self.store
                    .find_eq(COMPREHENSIVE_BOMS, "status", status.as_str())?,
            ),
            None => (
                self.store.find_all(BOMS)?,
                self.store.find_all(COMPREHENSIVE_BOMS)?,
            ),
        };

        let mut all = Vec::with_capacity(regular.len() + comprehensive.len());
        for mut doc in regular {
            if let Some(obj) = doc.as_object_mut() {
                obj.insert("bom_type".to_string(), json!("regular"));
            }
            all.push(doc);
        }
        for mut doc in comprehensive {
            if let Some(obj) = doc.as_object_mut() {
                obj.insert("bom_type".to_string(), json!("comprehensive"));
            }
            all.push(doc);
        }
        Ok(all)
    }

    /// 按 id 查询（先固定 schema 集合，后自由结构集合）
    pub fn get(&self, bom_id: &str) -> ApiResult<Value> {
        if let Some(doc) = self.store.find_by_id(BOMS, bom_id)? {
            return Ok(doc);
        }
        if let Some(doc) = self.store.find_by_id(COMPREHENSIVE_BOMS, bom_id)? {
            return Ok(doc);
        }
        Err(ApiError::NotFound(format!("BOM(id={})不存在", bom_id)))
    }

    /// 合并更新（命中任一集合；盖章 updated_at / updated_by）
    pub fn update(
        &self,
        bom_id: &str,
        mut fields: Map<String, Value>,
        actor: &Actor,
    ) -> ApiResult<()> {
        fields.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        fields.insert(
            "updated_by".to_string(),
            Value::String(actor.username.clone()),
        );

        if self.store.merge_update(BOMS, bom_id, &fields)? {
            return Ok(());
        }
        if self.store.merge_update(COMPREHENSIVE_BOMS, bom_id, &fields)? {
            return Ok(());
        }
        Err(ApiError::NotFound(format!("BOM(id={})不存在", bom_id)))
    }

    // ==========================================
    // BOM 表单配置（单例文档）
    // ==========================================

    /// 读取 BOM 表单配置（未保存过时为空对象）
    pub fn form_config(&self) -> ApiResult<Value> {
        Ok(self
            .store
            .find_by_id(BOM_FORM_CONFIGS, BOM_FORM_CONFIG_ID)?
            .unwrap_or_else(|| json!({})))
    }

    /// 保存 BOM 表单配置（merge-upsert: 已有文档合并，未有则创建）
    pub fn save_form_config(&self, mut fields: Map<String, Value>) -> ApiResult<()> {
        fields.insert(
            "type".to_string(),
            Value::String(BOM_FORM_CONFIG_ID.to_string()),
        );
        fields.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        if self
            .store
            .merge_update(BOM_FORM_CONFIGS, BOM_FORM_CONFIG_ID, &fields)?
        {
            return Ok(());
        }
        fields.insert(
            "id".to_string(),
            Value::String(BOM_FORM_CONFIG_ID.to_string()),
        );
        self.store.insert(BOM_FORM_CONFIGS, &Value::Object(fields))?;
        Ok(())
    }

    /// 删除（两个集合都尝试，均未命中才 NotFound）
    pub fn delete(&self, bom_id: &str) -> ApiResult<()> {
        let deleted_regular = self.store.delete_by_id(BOMS, bom_id)?;
        let deleted_comprehensive = self.store.delete_by_id(COMPREHENSIVE_BOMS, bom_id)?;

        if !deleted_regular && !deleted_comprehensive {
            return Err(ApiError::NotFound(format!("BOM(id={})不存在", bom_id)));
        }
        debug!(bom_id, "BOM 已删除");
        Ok(())
    }
}
