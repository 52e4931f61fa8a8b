pub mod authorize;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
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

    // 提交（替换）评估，返回该员工最新快照
    pub async fn submit_evaluation(
        &self,
        request: &HttpRequest,
        body: SubmitEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_evaluation(self, request, body).await
    }

    // 员工在某周期收到的全部评估明细
    pub async fn list_employee_evaluations(
        &self,
        request: &HttpRequest,
        employee_id: i64,
        period_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_employee_evaluations(self, request, employee_id, period_id).await
    }
}
