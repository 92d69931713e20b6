// ==========================================
// 服装制造资源计划系统 - 表格读取器
// ==========================================
// 职责: 把 Excel (.xlsx) / CSV 归一化为 SheetSet
// 约定: 第一行为表头；Excel 单元格保留原始类型
//       (字符串/数值/布尔)，CSV 为无类型文本源，单元格一律字符串；
//       空单元格归一为空串
// ==========================================

use crate::importer::error::{ImportError, ImportOpResult};
use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use serde_json::Value;
use std::io::Cursor;
use std::path::Path;

/// CSV 归一化后的默认工作表名
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// 单元格的文本视图（历史固定工作表按文本消费）
///
/// 整数值不带小数点渲染，空值/Null 为空串
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Excel 单元格 -> JSON 值（保留类型）
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::String(String::new()),
        Data::String(s) => Value::String(s.trim().to_string()),
        Data::Int(i) => Value::from(*i),
        // 整数值的浮点单元格归一为整数，与表格软件的显示一致
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9007199254740992.0 => {
            Value::from(*f as i64)
        }
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string().trim().to_string()),
    }
}

// ==========================================
// Sheet - 单个工作表
// ==========================================
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    /// rows[0] 为表头行；单元格缺失按空串处理
    pub rows: Vec<Vec<Value>>,
}

impl Sheet {
    pub fn new(name: &str, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }

    /// 由纯文本行构建（CSV 路径与测试用）
    pub fn from_text_rows(name: &str, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Value::String).collect())
            .collect();
        Self::new(name, rows)
    }

    /// 表头行的文本视图（无数据时为空）
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(cell_text).collect())
            .unwrap_or_default()
    }

    /// 数据行（表头之后的所有行）
    pub fn data_rows(&self) -> &[Vec<Value>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }
}

// ==========================================
// SheetSet - 工作簿归一化结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SheetSet {
    sheets: Vec<Sheet>,
}

impl SheetSet {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    // ==========================================
    // Excel 解析
    // ==========================================

    /// 从内存中的 xlsx 字节流解析
    pub fn from_xlsx_bytes(bytes: Vec<u8>) -> ImportOpResult<Self> {
        let mut workbook: Xlsx<Cursor<Vec<u8>>> = Xlsx::new(Cursor::new(bytes))?;
        Self::from_xlsx_workbook(&mut workbook)
    }

    /// 从 xlsx 文件路径解析
    pub fn from_xlsx_path<P: AsRef<Path>>(path: P) -> ImportOpResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_xlsx_bytes(bytes)
    }

    fn from_xlsx_workbook(workbook: &mut Xlsx<Cursor<Vec<u8>>>) -> ImportOpResult<Self> {
        let sheet_names = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

            let rows: Vec<Vec<Value>> = range
                .rows()
                .map(|row| row.iter().map(cell_value).collect())
                .collect();

            sheets.push(Sheet::new(&sheet_name, rows));
        }

        Ok(Self { sheets })
    }

    // ==========================================
    // CSV 解析（单工作表）
    // ==========================================

    /// 从 CSV 字节流解析（表头行保留为 rows[0]）
    pub fn from_csv_bytes(bytes: &[u8]) -> ImportOpResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(Self {
            sheets: vec![Sheet::from_text_rows(CSV_SHEET_NAME, rows)],
        })
    }

    /// 从 CSV 文件路径解析
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> ImportOpResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_csv_bytes(&bytes)
    }

    /// 按扩展名自动选择解析器
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportOpResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Self::from_csv_path(path),
            "xlsx" | "xls" => Self::from_xlsx_path(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_bytes_keeps_header_row() {
        let csv = b"name,code\nNavy,NVY\nBlack,BLK\n";
        let set = SheetSet::from_csv_bytes(csv).unwrap();

        let sheet = set.sheet(CSV_SHEET_NAME).unwrap();
        assert_eq!(sheet.headers(), vec!["name", "code"]);
        assert_eq!(sheet.data_rows().len(), 2);
        assert_eq!(sheet.data_rows()[0][1], "NVY");
    }

    #[test]
    fn test_csv_flexible_row_lengths() {
        let csv = b"name,code,hex\nNavy,NVY\n";
        let set = SheetSet::from_csv_bytes(csv).unwrap();
        let sheet = set.sheet(CSV_SHEET_NAME).unwrap();
        // 短行保持原长度，缺失单元格由消费方按空串处理
        assert_eq!(sheet.data_rows()[0].len(), 2);
    }

    #[test]
    fn test_csv_path_trims_cells() {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(temp_file, "name,code").unwrap();
        writeln!(temp_file, " Navy , NVY ").unwrap();

        let set = SheetSet::from_path(temp_file.path()).unwrap();
        let sheet = set.sheet(CSV_SHEET_NAME).unwrap();
        assert_eq!(sheet.data_rows()[0][0], "Navy");
        assert_eq!(sheet.data_rows()[0][1], "NVY");
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = SheetSet::from_xlsx_path("does_not_exist.xlsx");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = SheetSet::from_path("data.parquet");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cell_text_renders_numbers_without_decimal_noise() {
        assert_eq!(cell_text(&json!(180)), "180");
        assert_eq!(cell_text(&json!(2.5)), "2.5");
        assert_eq!(cell_text(&json!(" padded ")), "padded");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_excel_cell_types_preserved() {
        assert_eq!(cell_value(&Data::Float(120.0)), json!(120));
        assert_eq!(cell_value(&Data::Float(2.5)), json!(2.5));
        assert_eq!(cell_value(&Data::Int(7)), json!(7));
        assert_eq!(cell_value(&Data::Bool(true)), json!(true));
        assert_eq!(cell_value(&Data::Empty), json!(""));
        assert_eq!(
            cell_value(&Data::String(" Navy ".to_string())),
            json!("Navy")
        );
    }
}
