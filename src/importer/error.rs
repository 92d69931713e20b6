// ==========================================
// 服装制造资源计划系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::StoreError;
use thiserror::Error;

/// 导入模块错误类型
///
/// 注意: 单行失败不走此类型 —— 行级错误被收集进导入结果的
/// errors 列表（部分成功语义），此处只表达整批失败
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作表无数据行: {0}")]
    EmptySheet(String),

    // ===== 目标配置错误 =====
    #[error("主数据配置不存在: {0}")]
    ConfigNotFound(String),

    // ===== 存储错误 =====
    #[error("存储操作失败: {0}")]
    StorageFailure(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<StoreError>
impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        ImportError::StorageFailure(err.to_string())
    }
}

/// Result 类型别名
pub type ImportOpResult<T> = Result<T, ImportError>;
