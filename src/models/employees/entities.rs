use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct Employee {
    pub id: i64,
    // 工号
    pub employee_code: String,
    pub full_name: String,
    pub position: Option<String>,
    // 当前所属部门（排名时实时读取）
    pub department_id: i64,
    pub is_active: bool,
    pub hire_date: Option<chrono::DateTime<chrono::Utc>>,
}
