// ==========================================
// 服装制造资源计划系统 - 历史 Excel 导入器
// ==========================================
// 职责: 按约定工作表名导入固定主数据集合
// 工作表: "Color ID" / "Art No." / "Units Master" / "Components" /
//         "FABRIC MASTER DATA"
// 契约: 行级失败隔离 + 自然键幂等去重（重复导入不产生重复行）
// 注意: 面料表无自然键，不去重（历史行为）
// ==========================================

use crate::domain::masters::{Article, Color, Fabric, RawMaterial, Size};
use crate::importer::error::ImportOpResult;
use crate::importer::sheet_reader::{cell_text, Sheet, SheetSet};
use crate::repository::collections::{ARTICLES, COLORS, FABRICS, RAW_MATERIALS, SIZES};
use crate::repository::DocumentStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// ===== 约定工作表名 =====
pub const SHEET_COLOR_ID: &str = "Color ID";
pub const SHEET_ART_NO: &str = "Art No.";
pub const SHEET_UNITS_MASTER: &str = "Units Master";
pub const SHEET_COMPONENTS: &str = "Components";
pub const SHEET_FABRIC_MASTER: &str = "FABRIC MASTER DATA";

// ==========================================
// LegacyImportOutcome - 导入结果（按集合计数）
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyImportOutcome {
    pub colors_added: usize,
    pub articles_added: usize,
    pub sizes_added: usize,
    pub raw_materials_added: usize,
    pub fabrics_added: usize,
    pub errors: Vec<String>, // 例: "Color sheet row 3: ..."
}

// ==========================================
// LegacyExcelImporter
// ==========================================
pub struct LegacyExcelImporter {
    store: Arc<DocumentStore>,
}

impl LegacyExcelImporter {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// 导入整个工作簿（只处理存在的约定工作表）
    pub fn import(&self, sheets: &SheetSet) -> ImportOpResult<LegacyImportOutcome> {
        let mut outcome = LegacyImportOutcome::default();

        if let Some(sheet) = sheets.sheet(SHEET_COLOR_ID) {
            self.import_colors(sheet, &mut outcome);
        }
        if let Some(sheet) = sheets.sheet(SHEET_ART_NO) {
            self.import_articles(sheet, &mut outcome);
        }
        if let Some(sheet) = sheets.sheet(SHEET_UNITS_MASTER) {
            self.import_sizes(sheet, &mut outcome);
        }
        if let Some(sheet) = sheets.sheet(SHEET_COMPONENTS) {
            self.import_raw_materials(sheet, &mut outcome);
        }
        if let Some(sheet) = sheets.sheet(SHEET_FABRIC_MASTER) {
            self.import_fabrics(sheet, &mut outcome);
        }

        info!(
            colors = outcome.colors_added,
            articles = outcome.articles_added,
            sizes = outcome.sizes_added,
            raw_materials = outcome.raw_materials_added,
            fabrics = outcome.fabrics_added,
            failed = outcome.errors.len(),
            "历史 Excel 导入完成"
        );
        Ok(outcome)
    }

    /// "Color ID": 第 2 列格式 "CODE/Name"，自然键 = code
    fn import_colors(&self, sheet: &Sheet, outcome: &mut LegacyImportOutcome) {
        for (idx, row) in sheet.data_rows().iter().enumerate() {
            let row_no = idx + 2;
            let result = (|| -> Result<bool, String> {
                if cell(row, 0).is_empty() || cell(row, 1).is_empty() {
                    return Ok(false);
                }
                let raw = cell(row, 1);
                let parts: Vec<&str> = raw.split('/').collect();
                if parts.len() < 2 {
                    return Ok(false);
                }
                let code = parts[0].trim();
                let name = parts[1].trim();

                if self.exists_by_code(COLORS, code)? {
                    return Ok(false); // 自然键命中，静默跳过
                }
                self.insert_doc(COLORS, &Color::new(name, code))?;
                Ok(true)
            })();
            collect(result, &mut outcome.colors_added, &mut outcome.errors, "Color", row_no);
        }
    }

    /// "Art No.": 第 1 列为款号，自然键 = code
    fn import_articles(&self, sheet: &Sheet, outcome: &mut LegacyImportOutcome) {
        for (idx, row) in sheet.data_rows().iter().enumerate() {
            let row_no = idx + 2;
            let result = (|| -> Result<bool, String> {
                let code = cell(row, 0);
                if code.is_empty() {
                    return Ok(false);
                }
                if self.exists_by_code(ARTICLES, &code)? {
                    return Ok(false);
                }
                let article = Article::new(&code, &code, &format!("Article {}", code));
                self.insert_doc(ARTICLES, &article)?;
                Ok(true)
            })();
            collect(result, &mut outcome.articles_added, &mut outcome.errors, "Article", row_no);
        }
    }

    /// "Units Master": 第 1 列为尺码名，自然键 = code；
    /// sort_order 只对实际新增的行递增
    fn import_sizes(&self, sheet: &Sheet, outcome: &mut LegacyImportOutcome) {
        let mut sort_order = 1;
        for (idx, row) in sheet.data_rows().iter().enumerate() {
            let row_no = idx + 2;
            let result = (|| -> Result<bool, String> {
                let unit_name = cell(row, 0);
                if unit_name.is_empty() {
                    return Ok(false);
                }
                if self.exists_by_code(SIZES, &unit_name)? {
                    return Ok(false);
                }
                self.insert_doc(SIZES, &Size::new(&unit_name, &unit_name, sort_order))?;
                Ok(true)
            })();
            if matches!(result, Ok(true)) {
                sort_order += 1;
            }
            collect(result, &mut outcome.sizes_added, &mut outcome.errors, "Units", row_no);
        }
    }

    /// "Components": 第 1 列为部件名；code = 前 20 字符大写、空格转下划线
    fn import_raw_materials(&self, sheet: &Sheet, outcome: &mut LegacyImportOutcome) {
        for (idx, row) in sheet.data_rows().iter().enumerate() {
            let row_no = idx + 2;
            let result = (|| -> Result<bool, String> {
                let name = cell(row, 0);
                if name.is_empty() {
                    return Ok(false);
                }
                let code = component_code(&name);

                if self.exists_by_code(RAW_MATERIALS, &code)? {
                    return Ok(false);
                }
                let material = RawMaterial::new(&name, &code, "accessories", "pieces", 0.0);
                self.insert_doc(RAW_MATERIALS, &material)?;
                Ok(true)
            })();
            collect(
                result,
                &mut outcome.raw_materials_added,
                &mut outcome.errors,
                "Components",
                row_no,
            );
        }
    }

    /// "FABRIC MASTER DATA": 11 列定长布局，无自然键（不去重）
    fn import_fabrics(&self, sheet: &Sheet, outcome: &mut LegacyImportOutcome) {
        for (idx, row) in sheet.data_rows().iter().enumerate() {
            let row_no = idx + 2;
            let result = (|| -> Result<bool, String> {
                if clean_value(&cell(row, 0)).is_empty() {
                    return Ok(false);
                }

                // GSM 数值解析失败按缺失处理
                let gsm_raw = clean_value(&cell(row, 5));
                let gsm = if gsm_raw.is_empty() {
                    None
                } else {
                    gsm_raw.parse::<f64>().ok().map(|v| v as i64)
                };

                let unit = clean_value(&cell(row, 10));
                let fabric = Fabric {
                    id: Uuid::new_v4().to_string(),
                    item_type: clean_value(&cell(row, 0)),
                    count_const: clean_value(&cell(row, 1)),
                    fabric_name: clean_value(&cell(row, 2)),
                    composition: clean_value(&cell(row, 3)),
                    add_description: clean_value(&cell(row, 4)),
                    gsm,
                    width: non_empty(clean_value(&cell(row, 6))),
                    color: non_empty(clean_value(&cell(row, 7))),
                    final_item: clean_value(&cell(row, 8)),
                    avg_roll_size: non_empty(clean_value(&cell(row, 9))),
                    unit: if unit.is_empty() { "Pcs".to_string() } else { unit },
                    image_url: None,
                    created_at: Utc::now(),
                };
                self.insert_doc(FABRICS, &fabric)?;
                Ok(true)
            })();
            collect(result, &mut outcome.fabrics_added, &mut outcome.errors, "Fabric", row_no);
        }
    }

    fn exists_by_code(&self, collection: &str, code: &str) -> Result<bool, String> {
        self.store
            .find_one_eq(collection, "code", code)
            .map(|hit| hit.is_some())
            .map_err(|e| e.to_string())
    }

    fn insert_doc<T: serde::Serialize>(&self, collection: &str, doc: &T) -> Result<(), String> {
        let value = serde_json::to_value(doc).map_err(|e| e.to_string())?;
        self.store.insert(collection, &value).map_err(|e| e.to_string())
    }
}

// ==========================================
// 行级辅助函数
// ==========================================

/// 单元格的文本读取（缺失按空串；历史工作表全部按文本消费）
fn cell(row: &[serde_json::Value], idx: usize) -> String {
    row.get(idx).map(cell_text).unwrap_or_default()
}

/// 值清洗: 去空白，"NONE" 字符串视作空
fn clean_value(val: &str) -> String {
    let trimmed = val.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        String::new()
    } else {
        trimmed.to_string()
    }
}

fn non_empty(val: String) -> Option<String> {
    if val.is_empty() {
        None
    } else {
        Some(val)
    }
}

/// 部件编码: 前 20 字符、大写、空格转下划线
fn component_code(name: &str) -> String {
    name.chars()
        .take(20)
        .collect::<String>()
        .to_uppercase()
        .replace(' ', "_")
}

/// 行结果归集: Ok(true) 计数，Err 记入错误列表
fn collect(
    result: Result<bool, String>,
    counter: &mut usize,
    errors: &mut Vec<String>,
    sheet_label: &str,
    row_no: usize,
) {
    match result {
        Ok(true) => *counter += 1,
        Ok(false) => {}
        Err(reason) => errors.push(format!("{} sheet row {}: {}", sheet_label, row_no, reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_code_truncates_and_normalizes() {
        assert_eq!(component_code("Metal Button Large"), "METAL_BUTTON_LARGE");
        assert_eq!(
            component_code("A very long component name here"),
            "A_VERY_LONG_COMPONEN"
        );
    }

    #[test]
    fn test_clean_value_strips_none_marker() {
        assert_eq!(clean_value(" NONE "), "");
        assert_eq!(clean_value("None"), "");
        assert_eq!(clean_value(" 180 "), "180");
    }
}
