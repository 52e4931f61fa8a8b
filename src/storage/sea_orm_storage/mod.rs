//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod criteria;
mod employees;
mod evaluations;
mod periods;
mod recompute;
mod scores;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::engine::{PeriodLocks, StageHook};
use crate::errors::{DssError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    /// 按周期串行化重算
    period_locks: Arc<PeriodLocks>,
    /// 重算阶段钩子（测试中用于注入故障）
    stage_hook: Option<StageHook>,
}

impl SeaOrmStorage {
    /// 使用全局配置创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 使用指定数据库配置创建存储实例并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| DssError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self {
            db,
            period_locks: Arc::new(PeriodLocks::new()),
            stage_hook: None,
        })
    }

    /// 设置重算阶段钩子
    pub fn with_stage_hook(mut self, hook: StageHook) -> Self {
        self.stage_hook = Some(hook);
        self
    }

    /// 底层数据库连接
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DssError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库每个连接都是独立数据库，只能使用单连接且不能被回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| DssError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DssError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DssError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    departments::entities::Department,
    employees::entities::Employee,
    evaluations::{entities::EvaluationDetail, requests::SubmitEvaluationRequest},
    periods::entities::EvaluationPeriod,
    scores::{
        entities::{RankedSnapshot, ScoreSnapshot},
        requests::SnapshotListQuery,
        responses::RecalculationSummary,
    },
    users::entities::Evaluator,
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 重算模块
    async fn submit_evaluation(
        &self,
        req: SubmitEvaluationRequest,
    ) -> Result<Option<ScoreSnapshot>> {
        self.submit_evaluation_impl(req).await
    }

    async fn recalculate_period(&self, period_id: i64) -> Result<RecalculationSummary> {
        self.recalculate_period_impl(period_id).await
    }

    // 快照模块
    async fn get_snapshot(
        &self,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Option<ScoreSnapshot>> {
        self.get_snapshot_impl(employee_id, period_id).await
    }

    async fn list_snapshots(
        &self,
        period_id: i64,
        query: SnapshotListQuery,
    ) -> Result<Vec<RankedSnapshot>> {
        self.list_snapshots_impl(period_id, query).await
    }

    // 员工与部门模块
    async fn get_employee_by_id(&self, employee_id: i64) -> Result<Option<Employee>> {
        self.get_employee_by_id_impl(employee_id).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        self.list_departments_impl().await
    }

    async fn count_active_employees_by_department(&self) -> Result<BTreeMap<i64, i64>> {
        self.count_active_employees_by_department_impl().await
    }

    // 周期模块
    async fn get_period_by_id(&self, period_id: i64) -> Result<Option<EvaluationPeriod>> {
        self.get_period_by_id_impl(period_id).await
    }

    // 评估人模块
    async fn get_evaluator_by_id(&self, evaluator_id: i64) -> Result<Option<Evaluator>> {
        self.get_evaluator_by_id_impl(evaluator_id).await
    }

    // 评估模块
    async fn list_employee_evaluations(
        &self,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Vec<EvaluationDetail>> {
        self.list_employee_evaluations_impl(employee_id, period_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("employee_dss.db").unwrap(),
            "sqlite://employee_dss.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/dss").unwrap(),
            "postgres://u:p@localhost/dss"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
