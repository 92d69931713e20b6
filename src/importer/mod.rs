// ==========================================
// 服装制造资源计划系统 - 导入层
// ==========================================
// 职责: 外部表格数据导入（动态主数据批量 / 历史固定工作表）
// 支持: Excel (.xlsx), CSV
// ==========================================

pub mod bulk_importer;
pub mod error;
pub mod legacy_excel;
pub mod sheet_reader;

pub use bulk_importer::{BulkImportOutcome, BulkImporter, RowError};
pub use error::{ImportError, ImportOpResult};
pub use legacy_excel::{LegacyExcelImporter, LegacyImportOutcome};
pub use sheet_reader::{Sheet, SheetSet, CSV_SHEET_NAME};
