use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::middlewares::RateLimit;
use crate::models::scores::requests::SnapshotListQuery;
use crate::services::ScoreService;

// 懒加载的全局 ScoreService 实例
static SCORE_SERVICE: Lazy<ScoreService> = Lazy::new(ScoreService::new_lazy);

// HTTP处理程序
pub async fn recalculate_period(
    req: HttpRequest,
    period_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .recalculate_period(&req, period_id.into_inner())
        .await
}

pub async fn list_scores(
    req: HttpRequest,
    period_id: web::Path<i64>,
    query: web::Query<SnapshotListQuery>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .list_snapshots(&req, period_id.into_inner(), query.into_inner())
        .await
}

pub async fn get_score(req: HttpRequest, path: web::Path<(i64, i64)>) -> ActixResult<HttpResponse> {
    let (period_id, employee_id) = path.into_inner();
    SCORE_SERVICE.get_snapshot(&req, period_id, employee_id).await
}

pub async fn department_summary(
    req: HttpRequest,
    period_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .department_summary(&req, period_id.into_inner())
        .await
}

// 配置路由
pub fn configure_periods_routes(cfg: &mut web::ServiceConfig) {
    let limits = &AppConfig::get().rate_limit;

    cfg.service(
        web::scope("/api/v1/periods/{period_id}")
            .service(
                web::resource("/recalculate")
                    .wrap(RateLimit::recalculate(limits.recalculate_per_minute))
                    .route(web::post().to(recalculate_period)),
            )
            .route("/scores", web::get().to(list_scores))
            .route("/scores/{employee_id}", web::get().to(get_score))
            .route("/departments", web::get().to(department_summary)),
    );
}
