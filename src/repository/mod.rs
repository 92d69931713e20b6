// ==========================================
// 服装制造资源计划系统 - 存储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod collections;
pub mod document_store;
pub mod error;

pub use document_store::DocumentStore;
pub use error::{StoreError, StoreResult};
