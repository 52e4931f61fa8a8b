use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::EvaluationKey;

/// 单个指标的打分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CriterionScoreInput {
    pub criterion_id: i64,
    pub score: i32,
    pub comment: Option<String>,
}

/// 提交（或替换）评估请求
///
/// 同一评估人对同一员工同一周期的再次提交会整体替换之前的全部打分。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitEvaluationRequest {
    pub employee_id: i64,
    pub evaluator_id: i64,
    pub period_id: i64,
    pub scores: Vec<CriterionScoreInput>,
}

impl SubmitEvaluationRequest {
    pub fn key(&self) -> EvaluationKey {
        EvaluationKey {
            evaluator_id: self.evaluator_id,
            employee_id: self.employee_id,
            period_id: self.period_id,
        }
    }
}
