// ==========================================
// 服装制造资源计划系统 - 领域层
// ==========================================
// 职责: 实体与类型定义，不含数据访问逻辑
// ==========================================

pub mod bom;
pub mod identity;
pub mod master_config;
pub mod masters;
pub mod mrp;
pub mod predefined;
pub mod types;

pub use bom::{Bom, BomLineItem, ComprehensiveBom};
pub use identity::Actor;
pub use master_config::{FieldDefinition, MasterConfiguration};
pub use masters::{Article, Buyer, Color, Fabric, RawMaterial, Size, Supplier};
pub use mrp::{format_mrp_number, Mrp, MrpMaterialRequirement};
pub use types::{BomStatus, FieldType};
