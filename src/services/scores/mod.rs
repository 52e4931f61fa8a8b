pub mod departments;
pub mod get;
pub mod list;
pub mod recalculate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{DssError, Result};
use crate::models::scores::requests::SnapshotListQuery;
use crate::storage::Storage;

pub struct ScoreService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScoreService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 重算整个周期
    pub async fn recalculate_period(
        &self,
        request: &HttpRequest,
        period_id: i64,
    ) -> ActixResult<HttpResponse> {
        recalculate::recalculate_period(self, request, period_id).await
    }

    // 周期排行榜
    pub async fn list_snapshots(
        &self,
        request: &HttpRequest,
        period_id: i64,
        query: SnapshotListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_snapshots(self, request, period_id, query).await
    }

    // 单个员工快照
    pub async fn get_snapshot(
        &self,
        request: &HttpRequest,
        period_id: i64,
        employee_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_snapshot(self, request, period_id, employee_id).await
    }

    // 部门对比
    pub async fn department_summary(
        &self,
        request: &HttpRequest,
        period_id: i64,
    ) -> ActixResult<HttpResponse> {
        departments::department_summary(self, request, period_id).await
    }
}

/// 周期不存在时返回 PeriodNotFound
pub(crate) async fn ensure_period(storage: &dyn Storage, period_id: i64) -> Result<()> {
    match storage.get_period_by_id(period_id).await? {
        Some(_) => Ok(()),
        None => Err(DssError::period_not_found(format!(
            "评估周期不存在: {period_id}"
        ))),
    }
}
