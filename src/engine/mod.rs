// ==========================================
// 服装制造资源计划系统 - 引擎层
// ==========================================
// 职责: 业务规则（合并归并 / 预置初始化），不直接面向调用方
// ==========================================

pub mod consolidation;
pub mod seeder;

pub use consolidation::{consolidate_material_requirements, grand_total};
pub use seeder::{MasterInitStatus, PredefinedMasterSeeder, SeedOutcome, MIGRATION_ACTOR};
