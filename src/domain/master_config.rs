// ==========================================
// 服装制造资源计划系统 - 动态主数据配置模型
// ==========================================
// 用途: Schema Registry 持久化对象
// 约束: 字段 name 在配置内唯一; order 决定展示/导入列顺序（允许不连续）
// 存储键名与文档格式对齐（historical camelCase 混合 snake_case）
// ==========================================

use crate::domain::types::FieldType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// FieldDefinition - 字段定义
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,                // 字段唯一标识
    pub name: String,              // 字段名（配置内唯一，导入列名）
    pub label: String,             // 展示标签
    #[serde(rename = "type")]
    pub field_type: FieldType,     // 字段类型
    #[serde(default)]
    pub required: bool,            // 是否必填
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>, // 下拉选项（仅 dropdown）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<serde_json::Map<String, serde_json::Value>>, // min/max/regex 等
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(
        rename = "helpText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub help_text: Option<String>,
    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,
    #[serde(default)]
    pub order: i32,                // 列顺序（允许不连续）
}

impl FieldDefinition {
    /// 构造一个最小字段定义（预置主数据与测试用）
    pub fn new(id: &str, name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            options: None,
            validation: None,
            placeholder: None,
            help_text: None,
            default_value: None,
            order: 0,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

// ==========================================
// MasterConfiguration - 主数据配置
// ==========================================
// 生命周期: register 创建 / replace 全量覆盖 / delete 级联删除动态集合
// 红线: 删除不可恢复，无软删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterConfiguration {
    pub id: String,                // 预置配置由调用方指定，否则生成
    pub name: String,              // 例: Machine Master, Process Master
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub category: String,          // production / material / quality / other ...
    pub fields: Vec<FieldDefinition>,
    #[serde(rename = "enableExcelUpload", default = "default_true")]
    pub enable_excel_upload: bool,
    #[serde(rename = "enableImageUpload", default)]
    pub enable_image_upload: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

fn default_true() -> bool {
    true
}

impl MasterConfiguration {
    /// 查找重复的字段名（配置内唯一性校验）
    ///
    /// # 返回
    /// - Some(name): 第一个重复的字段名
    /// - None: 无重复
    pub fn duplicate_field_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Some(field.name.as_str());
            }
        }
        None
    }

    /// 配置声明的必填字段名列表
    pub fn required_field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_fields(names: &[&str]) -> MasterConfiguration {
        MasterConfiguration {
            id: "test_master".to_string(),
            name: "Test Master".to_string(),
            description: None,
            icon: None,
            category: "other".to_string(),
            fields: names
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    FieldDefinition::new(&format!("{}", i + 1), n, n, FieldType::Text)
                        .order(i as i32)
                })
                .collect(),
            enable_excel_upload: true,
            enable_image_upload: false,
            created_at: None,
            created_by: None,
            updated_at: None,
            updated_by: None,
        }
    }

    #[test]
    fn test_duplicate_field_name_detected() {
        let config = config_with_fields(&["name", "code", "name"]);
        assert_eq!(config.duplicate_field_name(), Some("name"));
    }

    #[test]
    fn test_unique_field_names_pass() {
        let config = config_with_fields(&["name", "code", "unit"]);
        assert_eq!(config.duplicate_field_name(), None);
    }

    #[test]
    fn test_wire_format_keys() {
        // 存储键名必须与历史文档兼容（enableExcelUpload / type / helpText）
        let config = config_with_fields(&["name"]);
        let doc = serde_json::to_value(&config).unwrap();
        assert!(doc.get("enableExcelUpload").is_some());
        assert_eq!(doc["fields"][0]["type"], "text");
    }

    #[test]
    fn test_required_field_names() {
        let mut config = config_with_fields(&["name", "code"]);
        config.fields[0].required = true;
        assert_eq!(config.required_field_names(), vec!["name"]);
    }
}
