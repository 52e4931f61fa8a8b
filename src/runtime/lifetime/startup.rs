use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 启动时检查基础数据，缺失时只告警不阻止启动
async fn report_reference_data(storage: &Arc<dyn Storage>) {
    match storage.list_departments().await {
        Ok(departments) if departments.is_empty() => {
            warn!("No departments found; rankings will be empty until reference data is loaded");
        }
        Ok(departments) => {
            debug!("Found {} department(s)", departments.len());
        }
        Err(e) => {
            warn!("Failed to inspect reference data: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化与数据库迁移
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();
    debug!("Connecting to database: {}", config.database.url);

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    report_reference_data(&storage).await;

    StartupContext { storage }
}
