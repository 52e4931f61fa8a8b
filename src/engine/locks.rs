//! 按周期串行化的重算锁
//!
//! 同一周期的重算（单人提交或整周期重算）必须一个完整结束后下一个才能开始，
//! 不同周期互不影响。数据库事务负责跨进程的一致性，这里负责进程内排队。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct PeriodLocks {
    /// 周期 ID -> 该周期的互斥锁
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

/// 周期锁守卫，释放时顺带清理无人等待的锁
pub struct PeriodGuard<'a> {
    period_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a PeriodLocks,
}

impl Drop for PeriodGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // 只剩表内一份引用时说明没有持有者和等待者
        self.locks
            .locks
            .remove_if(&self.period_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl PeriodLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// 获取周期锁，持有期间同周期的其他重算会等待
    pub async fn acquire(&self, period_id: i64) -> PeriodGuard<'_> {
        let lock = self
            .locks
            .entry(period_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        // 先释放 DashMap 分片引用再等待
        let guard = lock.lock_owned().await;

        PeriodGuard {
            period_id,
            guard: Some(guard),
            locks: self,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}
