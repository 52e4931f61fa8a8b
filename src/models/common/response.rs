use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::DssError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 将领域错误映射为 HTTP 响应
    ///
    /// 校验 400，越权 403，资源不存在 404，重算事务失败 409，其余 500。
    pub fn from_error(err: &DssError) -> HttpResponse {
        let message = err.message().to_string();
        match err {
            DssError::Validation(_) => HttpResponse::BadRequest()
                .json(Self::error_empty(ErrorCode::ValidationFailed, message)),
            DssError::Authorization(_) => {
                HttpResponse::Forbidden().json(Self::error_empty(ErrorCode::Forbidden, message))
            }
            DssError::EmployeeNotFound(_) => HttpResponse::NotFound()
                .json(Self::error_empty(ErrorCode::EmployeeNotFound, message)),
            DssError::PeriodNotFound(_) => HttpResponse::NotFound()
                .json(Self::error_empty(ErrorCode::PeriodNotFound, message)),
            DssError::NotFound(_) => {
                HttpResponse::NotFound().json(Self::error_empty(ErrorCode::NotFound, message))
            }
            DssError::Transaction(_) => HttpResponse::Conflict()
                .json(Self::error_empty(ErrorCode::RecomputeFailed, message)),
            _ => HttpResponse::InternalServerError().json(Self::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (DssError::validation("bad score"), StatusCode::BAD_REQUEST),
            (DssError::authorization("denied"), StatusCode::FORBIDDEN),
            (DssError::employee_not_found("e"), StatusCode::NOT_FOUND),
            (DssError::period_not_found("p"), StatusCode::NOT_FOUND),
            (DssError::transaction("rolled back"), StatusCode::CONFLICT),
            (
                DssError::database_operation("disk full"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiResponse::from_error(&err).status(), status, "{err}");
        }
    }
}
