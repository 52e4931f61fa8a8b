//! 重算阶段
//!
//! 每次重算依次经过以下阶段，每个阶段结束后调用一次阶段钩子。
//! 钩子返回错误时整个重算按正常失败路径回滚。

use std::fmt;
use std::sync::Arc;

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeStage {
    /// 评估人的旧打分已删除、新打分已写入
    EvaluationsReplaced,
    /// 得分快照已写入（尚未更新排名）
    SnapshotsUpserted,
    /// 全周期排名已更新（尚未提交）
    Ranked,
}

impl fmt::Display for RecomputeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecomputeStage::EvaluationsReplaced => write!(f, "evaluations_replaced"),
            RecomputeStage::SnapshotsUpserted => write!(f, "snapshots_upserted"),
            RecomputeStage::Ranked => write!(f, "ranked"),
        }
    }
}

/// 阶段钩子
pub type StageHook = Arc<dyn Fn(RecomputeStage) -> Result<()> + Send + Sync>;
