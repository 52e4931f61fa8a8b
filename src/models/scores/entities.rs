use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 员工得分快照
///
/// 每个 (员工, 周期) 唯一，每次重算整体覆盖，不做增量累加。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ScoreSnapshot {
    pub employee_id: i64,
    pub period_id: i64,
    // 未加权原始分之和，仅供参考，不参与排名
    pub total_score: f64,
    // 加权平均分（1..5 量纲）
    pub weighted_score: f64,
    pub rank_overall: i32,
    pub rank_in_department: i32,
    pub is_best_overall: bool,
    pub is_best_in_department: bool,
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

/// 带员工信息的快照（列表/排行榜使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct RankedSnapshot {
    #[serde(flatten)]
    #[ts(flatten)]
    pub snapshot: ScoreSnapshot,
    pub employee_code: String,
    pub full_name: String,
    pub department_id: i64,
    pub department_name: String,
    // 员工当前是否在职
    pub is_active: bool,
}
