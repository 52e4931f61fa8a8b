use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScoreService, ensure_period};
use crate::engine::summary::summarize_departments;
use crate::errors::Result;
use crate::models::{
    ApiResponse, departments::responses::DepartmentSummaryResponse,
    scores::requests::SnapshotListQuery,
};
use crate::storage::Storage;

pub async fn department_summary(
    service: &ScoreService,
    request: &HttpRequest,
    period_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match build_summary(storage.as_ref(), period_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Department summary retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

async fn build_summary(storage: &dyn Storage, period_id: i64) -> Result<DepartmentSummaryResponse> {
    ensure_period(storage, period_id).await?;

    let departments = storage.list_departments().await?;
    let headcount = storage.count_active_employees_by_department().await?;
    let snapshots = storage
        .list_snapshots(period_id, SnapshotListQuery::default())
        .await?;

    Ok(DepartmentSummaryResponse {
        period_id,
        items: summarize_departments(&departments, &headcount, &snapshots),
    })
}
