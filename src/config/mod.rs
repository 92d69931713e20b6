// ==========================================
// 服装制造资源计划系统 - 应用配置
// ==========================================
// 职责: 数据库路径解析（环境变量覆写 / 平台默认目录）
// ==========================================

use std::env;
use std::io;
use std::path::PathBuf;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "GARMENT_MRP_DB";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "garment_mrp.db";

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

impl AppConfig {
    /// 加载配置
    ///
    /// 解析顺序:
    /// 1. GARMENT_MRP_DB 环境变量
    /// 2. 平台数据目录 (如 ~/.local/share/garment-mrp/garment_mrp.db)
    /// 3. 当前目录兜底
    pub fn load() -> io::Result<Self> {
        let db_path = match env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => Self::default_db_path(),
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { db_path })
    }

    fn default_db_path() -> PathBuf {
        match dirs::data_dir() {
            Some(data_dir) => data_dir.join("garment-mrp").join(DEFAULT_DB_FILE),
            None => PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.db");
        env::set_var(DB_PATH_ENV, &path);

        let config = AppConfig::load().unwrap();
        assert_eq!(config.db_path, path);

        env::remove_var(DB_PATH_ENV);
    }
}
