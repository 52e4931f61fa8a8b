use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评估人角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum EvaluatorRole {
    Admin,      // 管理员
    Supervisor, // 主管，可评估所有部门
    Manager,    // 部门经理，仅可评估本部门
    Employee,   // 普通员工，无评估权限
}

impl EvaluatorRole {
    pub const ADMIN: &'static str = "admin";
    pub const SUPERVISOR: &'static str = "supervisor";
    pub const MANAGER: &'static str = "manager";
    pub const EMPLOYEE: &'static str = "employee";

    /// 不受部门限制的角色
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Admin | Self::Supervisor)
    }
}

impl<'de> Deserialize<'de> for EvaluatorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<EvaluatorRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评估人角色: '{s}'. 支持的角色: admin, supervisor, manager, employee"
            ))
        })
    }
}

impl std::fmt::Display for EvaluatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluatorRole::Admin => write!(f, "{}", EvaluatorRole::ADMIN),
            EvaluatorRole::Supervisor => write!(f, "{}", EvaluatorRole::SUPERVISOR),
            EvaluatorRole::Manager => write!(f, "{}", EvaluatorRole::MANAGER),
            EvaluatorRole::Employee => write!(f, "{}", EvaluatorRole::EMPLOYEE),
        }
    }
}

impl std::str::FromStr for EvaluatorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(EvaluatorRole::Admin),
            "supervisor" => Ok(EvaluatorRole::Supervisor),
            "manager" => Ok(EvaluatorRole::Manager),
            "employee" => Ok(EvaluatorRole::Employee),
            _ => Err(format!("Invalid evaluator role: {s}")),
        }
    }
}

/// 评估人（系统用户）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Evaluator {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: EvaluatorRole,
    pub department_id: Option<i64>,
}
