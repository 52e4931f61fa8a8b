use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoreService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_snapshot(
    service: &ScoreService,
    request: &HttpRequest,
    period_id: i64,
    employee_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_snapshot(employee_id, period_id).await {
        Ok(Some(snapshot)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            snapshot,
            "Score retrieved successfully",
        ))),
        // 没有有效打分的员工不存在快照
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SnapshotNotFound,
            "No score for this employee in this period",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
