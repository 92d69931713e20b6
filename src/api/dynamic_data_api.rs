// ==========================================
// 服装制造资源计划系统 - 动态主数据 API (Dynamic Record Store)
// ==========================================
// 职责: 按配置 id 寻址的记录集合 CRUD
// 约束: 所有操作先确认配置存在（NotFound）
// 刻意行为: 本层不做字段类型约束校验 —— 支持 schema 快速迭代，
//           类型/必填校验只发生在 UI 与导入边界
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::identity::Actor;
use crate::repository::collections::{dynamic_collection_name, MASTER_CONFIGURATIONS};
use crate::repository::DocumentStore;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 动态主数据 API
pub struct DynamicDataApi {
    store: Arc<DocumentStore>,
}

impl DynamicDataApi {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 配置存在性门闩（所有操作共用）
    fn ensure_config_exists(&self, config_id: &str) -> ApiResult<()> {
        let exists = self
            .store
            .find_by_id(MASTER_CONFIGURATIONS, config_id)?
            .is_some();
        if !exists {
            return Err(ApiError::NotFound(format!(
                "主数据配置(id={})不存在",
                config_id
            )));
        }
        Ok(())
    }

    /// 创建记录（字段映射原样存储）
    ///
    /// # 返回
    /// - Ok(String): 新记录 id
    pub fn create(
        &self,
        config_id: &str,
        mut fields: Map<String, Value>,
        actor: &Actor,
    ) -> ApiResult<String> {
        self.ensure_config_exists(config_id)?;

        let record_id = Uuid::new_v4().to_string();
        fields.insert("id".to_string(), Value::String(record_id.clone()));
        fields.insert(
            "created_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        fields.insert(
            "created_by".to_string(),
            Value::String(actor.username.clone()),
        );

        self.store
            .insert(&dynamic_collection_name(config_id), &Value::Object(fields))?;
        debug!(config_id, record_id = %record_id, "动态记录已创建");
        Ok(record_id)
    }

    /// 查询配置下全部记录（插入顺序）
    pub fn list(&self, config_id: &str) -> ApiResult<Vec<Value>> {
        self.ensure_config_exists(config_id)?;
        Ok(self.store.find_all(&dynamic_collection_name(config_id))?)
    }

    /// 按 id 查询单条记录
    pub fn get(&self, config_id: &str, record_id: &str) -> ApiResult<Value> {
        self.ensure_config_exists(config_id)?;
        self.store
            .find_by_id(&dynamic_collection_name(config_id), record_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("记录(id={})不存在", record_id))
            })
    }

    /// 合并更新（非破坏性部分更新）：未提供的字段保持不变
    pub fn update(
        &self,
        config_id: &str,
        record_id: &str,
        mut fields: Map<String, Value>,
        actor: &Actor,
    ) -> ApiResult<()> {
        self.ensure_config_exists(config_id)?;

        fields.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        fields.insert(
            "updated_by".to_string(),
            Value::String(actor.username.clone()),
        );

        let matched = self.store.merge_update(
            &dynamic_collection_name(config_id),
            record_id,
            &fields,
        )?;
        if !matched {
            return Err(ApiError::NotFound(format!(
                "记录(id={})不存在",
                record_id
            )));
        }
        Ok(())
    }

    /// 删除单条记录
    pub fn delete(&self, config_id: &str, record_id: &str) -> ApiResult<()> {
        self.ensure_config_exists(config_id)?;

        let deleted = self
            .store
            .delete_by_id(&dynamic_collection_name(config_id), record_id)?;
        if !deleted {
            return Err(ApiError::NotFound(format!(
                "记录(id={})不存在",
                record_id
            )));
        }
        Ok(())
    }
}
