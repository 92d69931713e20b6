// ==========================================
// 服装制造资源计划系统 - 预置主数据 Seeder
// ==========================================
// 职责: 一次性注册预置配置，并把历史固定集合迁移进动态集合
// 幂等性: 以“配置是否存在”为门闩 —— 已存在的配置整体跳过，
//         不单独跟踪已迁移行（已知设计张力，见 DESIGN.md）
// ==========================================

use crate::domain::identity::Actor;
use crate::domain::predefined::predefined_masters;
use crate::repository::collections::{
    dynamic_collection_name, legacy_collection_for, MASTER_CONFIGURATIONS,
};
use crate::repository::{DocumentStore, StoreResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 迁移盖章身份
pub const MIGRATION_ACTOR: &str = "system_migration";

// ==========================================
// SeedOutcome - 初始化结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub created: usize,  // 新建的配置数
    pub skipped: usize,  // 已存在而跳过的配置数
    pub migrated: usize, // 迁移的历史数据行数
}

// ==========================================
// MasterInitStatus - 单配置初始化状态（只读报表）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterInitStatus {
    pub id: String,
    pub name: String,
    pub initialized: bool,
    pub old_data_count: u64, // 历史固定集合行数
    pub new_data_count: u64, // 动态集合行数（未初始化时为 0）
}

// ==========================================
// PredefinedMasterSeeder
// ==========================================
pub struct PredefinedMasterSeeder {
    store: Arc<DocumentStore>,
}

impl PredefinedMasterSeeder {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 初始化全部预置配置（可安全重跑）
    ///
    /// 对每个预置配置：
    /// 1. 按 id 检查存在性，已存在则计入 skipped
    /// 2. 不存在则注册配置，并把对应历史集合整体拷贝进动态集合
    ///    （盖章 created_by = "system_migration"，缺失 id 时补生成）
    pub fn initialize(&self, actor: &Actor) -> StoreResult<SeedOutcome> {
        let mut outcome = SeedOutcome {
            created: 0,
            skipped: 0,
            migrated: 0,
        };

        for mut config in predefined_masters() {
            let existing = self.store.find_by_id(MASTER_CONFIGURATIONS, &config.id)?;
            if existing.is_some() {
                outcome.skipped += 1;
                continue;
            }

            config.created_at = Some(Utc::now());
            config.created_by = Some(actor.username.clone());
            let doc = serde_json::to_value(&config)?;
            self.store.insert(MASTER_CONFIGURATIONS, &doc)?;
            outcome.created += 1;
            info!(config_id = %config.id, "预置配置已注册");

            // 历史数据迁移（仅在首次注册时发生）
            let Some(legacy) = legacy_collection_for(&config.id) else {
                continue;
            };
            let dynamic = dynamic_collection_name(&config.id);
            for mut item in self.store.find_all(legacy)? {
                if let Some(obj) = item.as_object_mut() {
                    obj.insert(
                        "created_at".to_string(),
                        serde_json::json!(Utc::now().to_rfc3339()),
                    );
                    obj.insert("created_by".to_string(), serde_json::json!(MIGRATION_ACTOR));
                    if !obj.contains_key("id") {
                        obj.insert(
                            "id".to_string(),
                            serde_json::json!(Uuid::new_v4().to_string()),
                        );
                    }
                }
                self.store.insert(&dynamic, &item)?;
                outcome.migrated += 1;
            }
        }

        info!(
            created = outcome.created,
            skipped = outcome.skipped,
            migrated = outcome.migrated,
            "预置主数据初始化完成"
        );
        Ok(outcome)
    }

    /// 初始化状态报表（只读，不做任何变更）
    pub fn status(&self) -> StoreResult<Vec<MasterInitStatus>> {
        let mut report = Vec::new();
        for config in predefined_masters() {
            let initialized = self
                .store
                .find_by_id(MASTER_CONFIGURATIONS, &config.id)?
                .is_some();

            let old_data_count = match legacy_collection_for(&config.id) {
                Some(legacy) => self.store.count(legacy)?,
                None => 0,
            };
            let new_data_count = if initialized {
                self.store.count(&dynamic_collection_name(&config.id))?
            } else {
                0
            };

            report.push(MasterInitStatus {
                id: config.id,
                name: config.name,
                initialized,
                old_data_count,
                new_data_count,
            });
        }
        Ok(report)
    }
}
