// ==========================================
// 服装制造资源计划系统 - API 层
// ==========================================
// 职责: 面向调用方的业务门面，组合仓储与引擎
// ==========================================

pub mod bom_api;
pub mod dynamic_data_api;
pub mod error;
pub mod master_config_api;
pub mod master_data_api;
pub mod mrp_api;

pub use bom_api::BomApi;
pub use dynamic_data_api::DynamicDataApi;
pub use error::{ApiError, ApiResult};
pub use master_config_api::MasterConfigApi;
pub use master_data_api::MasterDataApi;
pub use mrp_api::MrpApi;
