use serde::Deserialize;
use ts_rs::TS;

/// 快照列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct SnapshotListQuery {
    // 按当前部门过滤
    pub department_id: Option<i64>,
    // 仅返回前 N 名（排行榜）
    pub limit: Option<u64>,
}
