//! # Facegate 主程序
//!
//! 门禁后台服务：初始化日志、配置、数据库，随后启动 HTTP 服务器

use std::sync::Arc;

use facegate::api::ApiServer;
use facegate::app::AppContext;
use facegate::{AppError, Result, config, database, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init_logging(None);

    let context = build_context().await.map_err(|e| {
        tracing::error!("启动初始化失败: {e:?}");
        AppError::Internal(format!("startup failed: {e}"))
    })?;

    tracing::info!("服务启动");
    ApiServer::new(context).serve().await
}

/// 配置加载、数据库迁移与上下文装配
async fn build_context() -> anyhow::Result<Arc<AppContext>> {
    let config = config::load_config().map_err(|e| anyhow::anyhow!("配置加载失败: {e}"))?;

    let db = database::init_database(&config.database.url, config.database.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("数据库连接失败: {e}"))?;

    database::run_migrations(&db)
        .await
        .map_err(|e| anyhow::anyhow!("数据库迁移失败: {e}"))?;

    Ok(Arc::new(AppContext::new(Arc::new(config), Arc::new(db))))
}
