use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::errors::DssError;
use crate::models::ApiResponse;

pub async fn list_employee_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    employee_id: i64,
    period_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_employee_by_id(employee_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(ApiResponse::from_error(&DssError::employee_not_found(
                format!("员工不存在: {employee_id}"),
            )));
        }
        Err(e) => return Ok(ApiResponse::from_error(&e)),
    }

    match storage
        .list_employee_evaluations(employee_id, period_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Evaluations retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}
