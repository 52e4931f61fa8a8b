//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_dss_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DssError {
            $($variant(String),)*
        }

        impl DssError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DssError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DssError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DssError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DssError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DssError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_dss_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Transaction("E004", "Transaction Failure"),
    Validation("E005", "Validation Error"),
    EmployeeNotFound("E006", "Employee Not Found"),
    PeriodNotFound("E007", "Evaluation Period Not Found"),
    NotFound("E008", "Resource Not Found"),
    Authorization("E009", "Authorization Error"),
    Serialization("E010", "Serialization Error"),
}

impl DssError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于“资源不存在”类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DssError::EmployeeNotFound(_) | DssError::PeriodNotFound(_) | DssError::NotFound(_)
        )
    }

    /// 将重算过程中出现的错误统一归为事务失败
    ///
    /// 已经是事务失败的错误保持原样，避免重复包装。
    pub fn into_transaction_failure(self, stage: &str) -> Self {
        match self {
            DssError::Transaction(_) => self,
            other => DssError::Transaction(format!("{stage}: {}", other.message())),
        }
    }
}

impl fmt::Display for DssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DssError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DssError {
    fn from(err: sea_orm::DbErr) -> Self {
        DssError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DssError {
    fn from(err: serde_json::Error) -> Self {
        DssError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DssError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DssError::database_config("test").code(), "E001");
        assert_eq!(DssError::transaction("test").code(), "E004");
        assert_eq!(DssError::validation("test").code(), "E005");
        assert_eq!(DssError::period_not_found("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DssError::transaction("test").error_type(),
            "Transaction Failure"
        );
        assert_eq!(
            DssError::employee_not_found("test").error_type(),
            "Employee Not Found"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DssError::validation("score out of range");
        assert_eq!(err.message(), "score out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = DssError::validation("empty criterion list");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("empty criterion list"));
    }

    #[test]
    fn test_transaction_failure_wrapping() {
        let err = DssError::database_operation("deadlock detected")
            .into_transaction_failure("rerank");
        assert_eq!(err.code(), "E004");
        assert_eq!(err.message(), "rerank: deadlock detected");

        // 已经是事务错误时不再嵌套
        let again = err.clone().into_transaction_failure("commit");
        assert_eq!(again.message(), err.message());
    }

    #[test]
    fn test_not_found_family() {
        assert!(DssError::employee_not_found("x").is_not_found());
        assert!(DssError::period_not_found("x").is_not_found());
        assert!(!DssError::validation("x").is_not_found());
    }
}
