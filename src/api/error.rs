// ==========================================
// 服装制造资源计划系统 - API 层错误类型
// ==========================================
// 职责: 定义面向调用方的错误分类，转换存储/导入层错误
// 分类: NotFound / ValidationError / Unauthenticated / StorageFailure
// ==========================================

use crate::importer::ImportError;
use crate::repository::StoreError;
use thiserror::Error;

/// API 层错误类型
///
/// 所有错误必须携带显式原因字符串（可解释性）
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("身份无效: {0}")]
    Unauthenticated(String),

    // ==========================================
    // 协作方错误
    // ==========================================
    #[error("存储操作失败: {0}")]
    StorageFailure(String),

    #[error("文件导入失败: {0}")]
    ImportFailure(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 StoreError 转换
// ==========================================
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCollectionName(name) => {
                ApiError::ValidationError(format!("非法集合名: {}", name))
            }
            StoreError::InvalidFieldPath(path) => {
                ApiError::ValidationError(format!("非法字段路径: {}", path))
            }
            StoreError::MissingDocumentId => {
                ApiError::ValidationError("文档缺少 id 字段".to_string())
            }
            StoreError::UniqueConstraintViolation(msg) => {
                ApiError::ValidationError(format!("唯一约束违反: {}", msg))
            }
            StoreError::SerializationError(msg) => ApiError::InternalError(msg),
            StoreError::DatabaseConnectionError(msg)
            | StoreError::LockError(msg)
            | StoreError::DatabaseQueryError(msg) => ApiError::StorageFailure(msg),
            StoreError::InternalError(msg) => ApiError::InternalError(msg),
            StoreError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::ConfigNotFound(id) => {
                ApiError::NotFound(format!("主数据配置(id={})不存在", id))
            }
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::EmptySheet(_) => ApiError::ValidationError(err.to_string()),
            ImportError::StorageFailure(msg) => ApiError::StorageFailure(msg),
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportFailure(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let api_err: ApiError = StoreError::DatabaseQueryError("disk io".to_string()).into();
        assert!(matches!(api_err, ApiError::StorageFailure(_)));

        let api_err: ApiError = StoreError::MissingDocumentId.into();
        assert!(matches!(api_err, ApiError::ValidationError(_)));
    }

    #[test]
    fn test_import_error_mapping() {
        let api_err: ApiError = ImportError::ConfigNotFound("x_master".to_string()).into();
        match api_err {
            ApiError::NotFound(msg) => assert!(msg.contains("x_master")),
            _ => panic!("Expected NotFound"),
        }
    }
}
