use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 部门对比统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentSummary {
    pub department_id: i64,
    pub department_name: String,
    // 部门在职员工数
    pub employee_count: i64,
    // 本周期有得分快照的员工数
    pub scored_count: i64,
    pub avg_score: Option<f64>,
    pub best_score: Option<f64>,
    pub lowest_score: Option<f64>,
    // 部门最佳（并列时全部列出）
    pub best_employees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentSummaryResponse {
    pub period_id: i64,
    pub items: Vec<DepartmentSummary>,
}
