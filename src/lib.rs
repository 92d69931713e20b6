// ==========================================
// 服装制造资源计划系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (JSON1 文档存储)
// 系统定位: 主数据配置 + BOM/MRP 资源计划后端
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 文档存储
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 应用配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BomStatus, FieldType};

// 领域实体
pub use domain::{
    Actor, Bom, BomLineItem, ComprehensiveBom, FieldDefinition, MasterConfiguration, Mrp,
    MrpMaterialRequirement,
};

// 仓储
pub use repository::{DocumentStore, StoreError, StoreResult};

// 引擎
pub use engine::{MasterInitStatus, PredefinedMasterSeeder, SeedOutcome};

// API
pub use api::{ApiError, ApiResult, BomApi, DynamicDataApi, MasterConfigApi, MasterDataApi, MrpApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "服装制造资源计划系统";
