use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScoreService;
use crate::models::ApiResponse;

pub async fn recalculate_period(
    service: &ScoreService,
    request: &HttpRequest,
    period_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.recalculate_period(period_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Period recalculated successfully",
        ))),
        Err(e) => {
            if !e.is_not_found() {
                error!("Recalculation of period {} failed: {}", period_id, e);
            }
            Ok(ApiResponse::from_error(&e))
        }
    }
}
