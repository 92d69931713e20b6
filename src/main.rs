// ==========================================
// 服装制造资源计划系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite (JSON1 文档存储)
// 启动流程: 日志 -> 配置 -> 存储 -> 预置主数据初始化
// ==========================================

use std::sync::Arc;

use garment_mrp::config::AppConfig;
use garment_mrp::domain::Actor;
use garment_mrp::engine::PredefinedMasterSeeder;
use garment_mrp::repository::DocumentStore;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    garment_mrp::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", garment_mrp::APP_NAME);
    tracing::info!("系统版本: {}", garment_mrp::VERSION);
    tracing::info!("==================================================");

    // 加载配置并打开文档存储
    let config = AppConfig::load()?;
    tracing::info!("使用数据库: {}", config.db_path.display());

    let store = Arc::new(DocumentStore::new(
        config.db_path.to_str().ok_or_else(|| {
            anyhow::anyhow!("数据库路径包含非 UTF-8 字符: {}", config.db_path.display())
        })?,
    )?);

    // 预置主数据初始化（幂等，重复启动安全）
    let seeder = PredefinedMasterSeeder::new(Arc::clone(&store));
    let outcome = seeder.initialize(&Actor::system_migration())?;

    tracing::info!(
        created = outcome.created,
        skipped = outcome.skipped,
        migrated = outcome.migrated,
        "预置主数据初始化完成"
    );
    for status in seeder.status()? {
        tracing::info!(
            id = %status.id,
            initialized = status.initialized,
            old_data_count = status.old_data_count,
            new_data_count = status.new_data_count,
            "主数据状态: {}",
            status.name
        );
    }

    Ok(())
}
