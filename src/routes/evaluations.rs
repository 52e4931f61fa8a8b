use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::middlewares::RateLimit;
use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::services::EvaluationService;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn submit_evaluation(
    req: HttpRequest,
    body: web::Json<SubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_evaluation(&req, body.into_inner())
        .await
}

pub async fn list_employee_evaluations(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (employee_id, period_id) = path.into_inner();
    EVALUATION_SERVICE
        .list_employee_evaluations(&req, employee_id, period_id)
        .await
}

// 配置路由
pub fn configure_evaluations_routes(cfg: &mut web::ServiceConfig) {
    let limits = &AppConfig::get().rate_limit;

    cfg.service(
        web::scope("/api/v1/evaluations")
            .service(
                web::resource("")
                    .wrap(RateLimit::submit(limits.submit_per_minute))
                    .route(web::post().to(submit_evaluation)),
            )
            .route(
                "/employee/{employee_id}/period/{period_id}",
                web::get().to(list_employee_evaluations),
            ),
    );
}
