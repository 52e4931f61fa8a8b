//! 评分与排名引擎
//!
//! - `aggregator`: 加权平均（SAW）聚合
//! - `ranking`: 全局与部门排名、最佳标记
//! - `locks`: 按周期串行化重算
//! - `stage`: 重算阶段与阶段钩子
//! - `summary`: 部门对比统计
//!
//! 本模块只包含纯计算与并发原语，持久化与事务边界由 storage 层负责。

pub mod aggregator;
pub mod locks;
pub mod ranking;
pub mod stage;
pub mod summary;

pub use aggregator::{AggregatedScore, CriterionScore, aggregate};
pub use locks::{PeriodGuard, PeriodLocks};
pub use ranking::{RankingEntry, RankingOutcome, resolve_rankings};
pub use stage::{RecomputeStage, StageHook};

/// 评分下限
pub const MIN_SCORE: i32 = 1;
/// 评分上限
pub const MAX_SCORE: i32 = 5;
