use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{RankedSnapshot, ScoreSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct SnapshotListResponse {
    pub period_id: i64,
    pub items: Vec<RankedSnapshot>,
}

/// 整周期重算结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct RecalculationSummary {
    pub period_id: i64,
    pub employees_scored: i64,
    pub snapshots_removed: i64,
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

/// 提交评估结果：该员工提交后的最新快照
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct SubmitEvaluationResponse {
    pub snapshot: Option<ScoreSnapshot>,
}
