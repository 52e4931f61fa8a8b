use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 原始评估记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct RawEvaluation {
    pub id: i64,
    pub employee_id: i64,
    pub evaluator_id: i64,
    pub period_id: i64,
    pub criterion_id: i64,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 带指标与评估人信息的评估明细
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub evaluation: RawEvaluation,
    pub criterion_name: String,
    pub weight: f64,
    pub evaluator_name: String,
}

/// 替换范围：同一评估人对同一员工在同一周期的全部打分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluationKey {
    pub evaluator_id: i64,
    pub employee_id: i64,
    pub period_id: i64,
}
