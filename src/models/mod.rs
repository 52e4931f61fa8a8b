//! 业务数据模型
//!
//! 与 entity 模块中的数据库实体分离，面向服务层与 HTTP 接口。

pub mod common;
pub mod criteria;
pub mod departments;
pub mod employees;
pub mod evaluations;
pub mod periods;
pub mod scores;
pub mod users;

pub use common::response::ApiResponse;

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误代码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000+
    BadRequest = 1000,
    ValidationFailed = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,

    // 评估相关 2000+
    EmployeeNotFound = 2001,
    PeriodNotFound = 2002,
    SnapshotNotFound = 2004,

    // 重算相关 3000+
    RecomputeFailed = 3001,

    InternalServerError = 5000,
}
