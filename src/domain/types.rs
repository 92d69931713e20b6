// ==========================================
// 服装制造资源计划系统 - 领域类型定义
// ==========================================
// 序列化格式与存储文档一致（小写）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 字段类型 (Field Type)
// ==========================================
// 动态主数据字段的受控类型集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,     // 单行文本
    Number,   // 整数
    Decimal,  // 小数
    Dropdown, // 下拉选项（需要 options）
    Date,     // 日期
    File,     // 文件引用
    Textarea, // 多行文本
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Number => write!(f, "number"),
            FieldType::Decimal => write!(f, "decimal"),
            FieldType::Dropdown => write!(f, "dropdown"),
            FieldType::Date => write!(f, "date"),
            FieldType::File => write!(f, "file"),
            FieldType::Textarea => write!(f, "textarea"),
        }
    }
}

// ==========================================
// BOM 状态 (BOM Status)
// ==========================================
// unassigned -> assigned: 被 MRP 合并消费
// assigned -> unassigned: 所属 MRP 被删除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BomStatus {
    Unassigned, // 未分配（可被 MRP 消费）
    Assigned,   // 已分配（被某个 MRP 占用）
}

impl BomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BomStatus::Unassigned => "unassigned",
            BomStatus::Assigned => "assigned",
        }
    }
}

impl fmt::Display for BomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_serde_lowercase() {
        let json = serde_json::to_string(&FieldType::Dropdown).unwrap();
        assert_eq!(json, "\"dropdown\"");
        let back: FieldType = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(back, FieldType::Textarea);
    }

    #[test]
    fn test_bom_status_roundtrip() {
        let json = serde_json::to_string(&BomStatus::Unassigned).unwrap();
        assert_eq!(json, "\"unassigned\"");
        assert_eq!(BomStatus::Assigned.as_str(), "assigned");
    }
}
