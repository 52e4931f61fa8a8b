use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScoreService, ensure_period};
use crate::models::{
    ApiResponse,
    scores::{requests::SnapshotListQuery, responses::SnapshotListResponse},
};

pub async fn list_snapshots(
    service: &ScoreService,
    request: &HttpRequest,
    period_id: i64,
    query: SnapshotListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(e) = ensure_period(storage.as_ref(), period_id).await {
        return Ok(ApiResponse::from_error(&e));
    }

    match storage.list_snapshots(period_id, query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SnapshotListResponse { period_id, items },
            "Scores retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
