use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EvaluationService;
use super::authorize::authorize_evaluator;
use crate::errors::{DssError, Result};
use crate::models::{
    ApiResponse,
    evaluations::requests::SubmitEvaluationRequest,
    scores::{entities::ScoreSnapshot, responses::SubmitEvaluationResponse},
};
use crate::storage::Storage;

pub async fn submit_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    body: SubmitEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match submit_checked(storage.as_ref(), body).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmitEvaluationResponse { snapshot },
            "Evaluation submitted successfully",
        ))),
        Err(e) => {
            if matches!(e, DssError::DatabaseOperation(_) | DssError::Transaction(_)) {
                error!("Evaluation submission failed: {}", e);
            }
            Ok(ApiResponse::from_error(&e))
        }
    }
}

/// 校验评估人身份与权限后提交
pub async fn submit_checked(
    storage: &dyn Storage,
    body: SubmitEvaluationRequest,
) -> Result<Option<ScoreSnapshot>> {
    let evaluator = storage
        .get_evaluator_by_id(body.evaluator_id)
        .await?
        .ok_or_else(|| {
            DssError::authorization(format!("未知的评估人: {}", body.evaluator_id))
        })?;

    let employee = storage
        .get_employee_by_id(body.employee_id)
        .await?
        .ok_or_else(|| DssError::employee_not_found(format!("员工不存在: {}", body.employee_id)))?;

    authorize_evaluator(&evaluator, &employee)?;

    let key = body.key();
    let snapshot = storage.submit_evaluation(body).await?;
    info!(
        "Evaluator {} submitted scores for employee {} in period {}",
        key.evaluator_id, key.employee_id, key.period_id
    );

    Ok(snapshot)
}
