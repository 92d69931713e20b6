// ==========================================
// 服装制造资源计划系统 - 操作者身份
// ==========================================
// 身份签发（token 校验）属于外部协作方；核心只消费其产物，
// 用于 created_by / updated_by 审计盖章。
// 红线: role 仅随身份携带，核心不做基于角色的授权判断
// ==========================================

use serde::{Deserialize, Serialize};

/// 当前操作者（外部身份能力的产物）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub username: String,
    pub role: String, // admin / production_manager / user
}

impl Actor {
    pub fn new(id: &str, username: &str, role: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
        }
    }

    /// 系统迁移身份（Seeder 数据迁移盖章用）
    pub fn system_migration() -> Self {
        Self::new("system", "system_migration", "system")
    }
}
