// ==========================================
// 服装制造资源计划系统 - 主数据配置 API (Schema Registry)
// ==========================================
// 职责: MasterConfiguration 的注册/查询/全量替换/删除
// 红线: 删除配置级联删除动态集合，不可恢复，无软删除 ——
//       调用方须在外部完成用户确认
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::identity::Actor;
use crate::domain::master_config::MasterConfiguration;
use crate::repository::collections::{dynamic_collection_name, MASTER_CONFIGURATIONS};
use crate::repository::DocumentStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 主数据配置 API
///
/// 职责：
/// 1. 配置注册与全量替换（字段名唯一性校验）
/// 2. 配置查询（可按 category 过滤）
/// 3. 配置删除 + 动态集合级联删除
pub struct MasterConfigApi {
    store: Arc<DocumentStore>,
}

impl MasterConfigApi {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 注册新配置
    ///
    /// # 参数
    /// - config: 完整配置（预置配置自带 id，否则生成）
    ///
    /// # 返回
    /// - Ok(MasterConfiguration): 已盖章的持久化配置
    /// - Err(ApiError::ValidationError): 字段名重复
    pub fn register(
        &self,
        mut config: MasterConfiguration,
        actor: &Actor,
    ) -> ApiResult<MasterConfiguration> {
        if let Some(name) = config.duplicate_field_name() {
            return Err(ApiError::ValidationError(format!(
                "字段名重复: {}",
                name
            )));
        }

        if config.id.is_empty() {
            config.id = Uuid::new_v4().to_string();
        }
        config.created_at = Some(Utc::now());
        config.created_by = Some(actor.username.clone());

        let doc = serde_json::to_value(&config)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        self.store.insert(MASTER_CONFIGURATIONS, &doc)?;

        info!(config_id = %config.id, name = %config.name, "主数据配置已注册");
        Ok(config)
    }

    /// 按 id 查询配置
    pub fn get(&self, config_id: &str) -> ApiResult<MasterConfiguration> {
        let doc = self
            .store
            .find_by_id(MASTER_CONFIGURATIONS, config_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("主数据配置(id={})不存在", config_id))
            })?;
        serde_json::from_value(doc).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 查询全部配置（可按 category 过滤）
    pub fn list(&self, category: Option<&str>) -> ApiResult<Vec<MasterConfiguration>> {
        let docs = match category {
            Some(category) => self
                .store
                .find_eq(MASTER_CONFIGURATIONS, "category", category)?,
            None => self.store.find_all(MASTER_CONFIGURATIONS)?,
        };

        let mut configs = Vec::with_capacity(docs.len());
        for doc in docs {
            configs.push(
                serde_json::from_value(doc)
                    .map_err(|e| ApiError::InternalError(e.to_string()))?,
            );
        }
        Ok(configs)
    }

    /// 全量替换配置（非部分字段 patch）
    ///
    /// 说明: 字段被移除/改类型时不迁移既有记录 ——
    /// 孤儿键静默保留（schema-on-read，刻意行为）
    pub fn replace(
        &self,
        config_id: &str,
        mut config: MasterConfiguration,
        actor: &Actor,
    ) -> ApiResult<MasterConfiguration> {
        if let Some(name) = config.duplicate_field_name() {
            return Err(ApiError::ValidationError(format!(
                "字段名重复: {}",
                name
            )));
        }

        let existing = self.get(config_id)?;

        config.id = config_id.to_string();
        config.created_at = existing.created_at;
        config.created_by = existing.created_by;
        config.updated_at = Some(Utc::now());
        config.updated_by = Some(actor.username.clone());

        let doc = serde_json::to_value(&config)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        // 配置可能在读取与写入之间被删除，命中数为 0 时不得报成功
        let matched = self.store.replace(MASTER_CONFIGURATIONS, config_id, &doc)?;
        if !matched {
            return Err(ApiError::NotFound(format!(
                "主数据配置(id={})不存在",
                config_id
            )));
        }

        debug!(config_id, "主数据配置已替换");
        Ok(config)
    }

    /// 删除配置并级联删除其动态集合（不可恢复）
    pub fn delete(&self, config_id: &str) -> ApiResult<()> {
        let deleted = self.store.delete_by_id(MASTER_CONFIGURATIONS, config_id)?;
        if !deleted {
            return Err(ApiError::NotFound(format!(
                "主数据配置(id={})不存在",
                config_id
            )));
        }

        self.store
            .drop_collection(&dynamic_collection_name(config_id))?;
        info!(config_id, "主数据配置及其动态集合已删除");
        Ok(())
    }
}
