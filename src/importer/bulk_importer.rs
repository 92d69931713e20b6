// ==========================================
// 服装制造资源计划系统 - 动态主数据批量导入器
// ==========================================
// 契约: best-effort 部分成功 —— 单行失败只进 errors 列表，
//       绝不因一行坏数据使整批失败
// 校验: 字段定义只在导入边界消费（必填非空 / 下拉取值域），
//       存储层保持无类型约束
// 类型: 单元格按表格源的原始类型入库（数值列存数值而非字符串）
// ==========================================

use crate::domain::identity::Actor;
use crate::domain::master_config::MasterConfiguration;
use crate::importer::error::{ImportError, ImportOpResult};
use crate::importer::sheet_reader::Sheet;
use crate::repository::collections::{dynamic_collection_name, MASTER_CONFIGURATIONS};
use crate::repository::DocumentStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

// ==========================================
// 导入结果
// ==========================================

/// 行级失败记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowError {
    /// 工作表内 1 基行号（首个数据行为 2）
    pub row: usize,
    pub reason: String,
}

/// 批量导入结果（部分成功语义）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportOutcome {
    pub added_count: usize,
    pub errors: Vec<RowError>,
}

// ==========================================
// BulkImporter
// ==========================================
pub struct BulkImporter {
    store: Arc<DocumentStore>,
}

impl BulkImporter {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 对指定配置批量导入一个工作表
    ///
    /// 算法:
    /// 1. 配置必须存在（否则整批失败 ConfigNotFound）
    /// 2. 表头名 -> 列位置，空表头列跳过
    /// 3. 逐行 zip 成字段映射，缺失单元格按空串
    /// 4. 行级校验（必填 / 下拉取值域）+ 独立插入，失败记入 errors
    pub fn import(
        &self,
        config_id: &str,
        sheet: &Sheet,
        actor: &Actor,
    ) -> ImportOpResult<BulkImportOutcome> {
        let config_doc = self
            .store
            .find_by_id(MASTER_CONFIGURATIONS, config_id)?
            .ok_or_else(|| ImportError::ConfigNotFound(config_id.to_string()))?;
        let config: MasterConfiguration = serde_json::from_value(config_doc)
            .map_err(|e| ImportError::InternalError(format!("配置文档损坏: {}", e)))?;

        if sheet.rows.is_empty() {
            return Err(ImportError::EmptySheet(sheet.name.clone()));
        }

        let headers = sheet.headers();
        let collection = dynamic_collection_name(config_id);
        let mut outcome = BulkImportOutcome {
            added_count: 0,
            errors: Vec::new(),
        };

        for (idx, row) in sheet.data_rows().iter().enumerate() {
            // 工作表 1 基行号: 表头为 1，首个数据行为 2
            let row_no = idx + 2;
            match self.import_row(&config, &collection, &headers, row, actor) {
                Ok(()) => outcome.added_count += 1,
                Err(reason) => {
                    warn!(row = row_no, %reason, "导入行失败");
                    outcome.errors.push(RowError {
                        row: row_no,
                        reason,
                    });
                }
            }
        }

        debug!(
            config_id,
            added = outcome.added_count,
            failed = outcome.errors.len(),
            "批量导入完成"
        );
        Ok(outcome)
    }

    /// 单行导入（失败原因以字符串返回，由调用方收集）
    fn import_row(
        &self,
        config: &MasterConfiguration,
        collection: &str,
        headers: &[String],
        row: &[Value],
        actor: &Actor,
    ) -> Result<(), String> {
        let mut doc = Map::new();
        for (col, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue; // 空表头列跳过
            }
            // 单元格值原样保留类型，缺失单元格按空串
            let value = row
                .get(col)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            doc.insert(header.clone(), value);
        }

        self.validate_row(config, &doc)?;

        doc.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        doc.insert(
            "created_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        doc.insert(
            "created_by".to_string(),
            Value::String(actor.username.clone()),
        );

        self.store
            .insert(collection, &Value::Object(doc))
            .map_err(|e| e.to_string())
    }

    /// 导入边界校验：必填字段非空；下拉字段取值必须在选项内
    ///
    /// 空判定: 缺失 / Null / 空字符串；数值与布尔单元格恒为非空
    fn validate_row(
        &self,
        config: &MasterConfiguration,
        doc: &Map<String, Value>,
    ) -> Result<(), String> {
        for field in &config.fields {
            let cell = doc.get(&field.name).unwrap_or(&Value::Null);
            let blank = matches!(cell, Value::Null)
                || cell.as_str().map(str::is_empty).unwrap_or(false);

            if field.required && blank {
                return Err(format!("必填字段 {} 为空", field.name));
            }

            if let Some(options) = &field.options {
                if let Some(text) = cell.as_str() {
                    if !text.is_empty() && !options.iter().any(|o| o == text) {
                        return Err(format!(
                            "字段 {} 取值 {} 不在选项内",
                            field.name, text
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
