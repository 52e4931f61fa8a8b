//! 原子重算
//!
//! 提交评估与整周期重算都遵循同一流程：先取周期锁，再在一个事务内完成
//! 打分替换、快照写入和全周期重排，任一步失败则整体回滚，
//! 外部只会看到重算前或重算后的完整状态。

use std::time::Instant;

use super::SeaOrmStorage;
use crate::engine::{RecomputeStage, aggregate};
use crate::errors::{DssError, Result};
use crate::models::{
    evaluations::requests::SubmitEvaluationRequest,
    scores::{entities::ScoreSnapshot, responses::RecalculationSummary},
};
use crate::utils::validate_submission_simple;
use chrono::{DateTime, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use tracing::{debug, info, warn};

/// 一次重算的进度与写入统计
#[derive(Debug, Default)]
struct RunProgress {
    /// 最后一个完成的阶段
    stage: Option<RecomputeStage>,
    rows_written: usize,
}

impl RunProgress {
    fn stage_name(&self) -> String {
        self.stage
            .map(|s| s.to_string())
            .unwrap_or_else(|| "started".to_string())
    }
}

impl SeaOrmStorage {
    /// 开启重算事务
    ///
    /// SQLite 的写事务本身即串行化，其余后端显式要求 SERIALIZABLE。
    async fn begin_recompute(&self) -> Result<DatabaseTransaction> {
        let isolation = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => None,
            _ => Some(IsolationLevel::Serializable),
        };

        self.db
            .begin_with_config(isolation, None)
            .await
            .map_err(|e| DssError::transaction(format!("开启事务失败: {e}")))
    }

    fn enter_stage(&self, progress: &mut RunProgress, stage: RecomputeStage) -> Result<()> {
        if let Some(hook) = &self.stage_hook {
            hook(stage)?;
        }
        progress.stage = Some(stage);
        Ok(())
    }

    /// 成功则提交，否则回滚并归为事务失败
    async fn finish_recompute<T>(
        txn: DatabaseTransaction,
        outcome: Result<T>,
        progress: &RunProgress,
        period_id: i64,
        trigger: &str,
        started: Instant,
    ) -> Result<T> {
        match outcome {
            Ok(value) => {
                txn.commit().await.map_err(|e| {
                    DssError::transaction(format!("{trigger}: 提交事务失败: {e}"))
                })?;
                info!(
                    "重算已提交: period={}, trigger={}, rows_written={}, elapsed_ms={}",
                    period_id,
                    trigger,
                    progress.rows_written,
                    started.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("{}: 回滚事务失败: {}", trigger, rollback_err);
                }
                warn!(
                    "重算已回滚: period={}, trigger={}, stage={}, error={}",
                    period_id,
                    trigger,
                    progress.stage_name(),
                    err
                );
                Err(err.into_transaction_failure(trigger))
            }
        }
    }

    /// 提交（替换）评估并重算
    pub async fn submit_evaluation_impl(
        &self,
        req: SubmitEvaluationRequest,
    ) -> Result<Option<ScoreSnapshot>> {
        validate_submission_simple(&req).map_err(DssError::validation)?;

        if self.get_employee_by_id_impl(req.employee_id).await?.is_none() {
            return Err(DssError::employee_not_found(format!(
                "员工不存在: {}",
                req.employee_id
            )));
        }
        if self.get_period_by_id_impl(req.period_id).await?.is_none() {
            return Err(DssError::period_not_found(format!(
                "评估周期不存在: {}",
                req.period_id
            )));
        }
        self.ensure_criteria_active(&req).await?;

        let _guard = self.period_locks.acquire(req.period_id).await;
        let started = Instant::now();
        debug!(
            "重算开始: period={}, trigger=submit, employee={}, evaluator={}",
            req.period_id, req.employee_id, req.evaluator_id
        );

        let txn = self.begin_recompute().await?;
        let now = Utc::now().timestamp();
        let mut progress = RunProgress::default();

        let outcome = self
            .submit_in_transaction(&txn, &req, now, &mut progress)
            .await;
        Self::finish_recompute(txn, outcome, &progress, req.period_id, "submit", started).await
    }

    async fn ensure_criteria_active(&self, req: &SubmitEvaluationRequest) -> Result<()> {
        let ids: Vec<i64> = req.scores.iter().map(|s| s.criterion_id).collect();
        let criteria = self.find_criteria_by_ids_impl(&ids).await?;

        for id in ids {
            match criteria.get(&id) {
                None => {
                    return Err(DssError::validation(format!("评估指标不存在: {id}")));
                }
                Some(criterion) if !criterion.is_active => {
                    return Err(DssError::validation(format!("评估指标已停用: {id}")));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    async fn submit_in_transaction<C: ConnectionTrait>(
        &self,
        txn: &C,
        req: &SubmitEvaluationRequest,
        now: i64,
        progress: &mut RunProgress,
    ) -> Result<Option<ScoreSnapshot>> {
        let (removed, inserted) = Self::replace_evaluations(txn, req).await?;
        debug!("替换评估: 删除 {} 行, 写入 {} 行", removed, inserted);
        progress.rows_written += (removed + inserted) as usize;
        self.enter_stage(progress, RecomputeStage::EvaluationsReplaced)?;

        let scores = Self::fetch_criterion_scores(txn, req.employee_id, req.period_id).await?;
        match aggregate(&scores) {
            Some(score) => {
                if Self::upsert_snapshot(txn, req.employee_id, req.period_id, &score, now).await? {
                    progress.rows_written += 1;
                }
            }
            None => {
                // 只剩停用指标上的打分时，旧快照不能继续参与排名
                progress.rows_written +=
                    Self::delete_snapshot(txn, req.employee_id, req.period_id).await? as usize;
            }
        }
        self.enter_stage(progress, RecomputeStage::SnapshotsUpserted)?;

        progress.rows_written += Self::rerank_period(txn, req.period_id, now).await?;
        self.enter_stage(progress, RecomputeStage::Ranked)?;

        let snapshot = Self::find_snapshot_model(txn, req.employee_id, req.period_id).await?;
        Ok(snapshot.map(|m| m.into_snapshot()))
    }

    /// 重算整个周期
    pub async fn recalculate_period_impl(&self, period_id: i64) -> Result<RecalculationSummary> {
        if self.get_period_by_id_impl(period_id).await?.is_none() {
            return Err(DssError::period_not_found(format!(
                "评估周期不存在: {period_id}"
            )));
        }

        let _guard = self.period_locks.acquire(period_id).await;
        let started = Instant::now();
        debug!("重算开始: period={}, trigger=recalculate", period_id);

        let txn = self.begin_recompute().await?;
        let now = Utc::now().timestamp();
        let mut progress = RunProgress::default();

        let outcome = self
            .recalculate_in_transaction(&txn, period_id, now, &mut progress)
            .await;
        let (employees_scored, snapshots_removed) = Self::finish_recompute(
            txn,
            outcome,
            &progress,
            period_id,
            "recalculate",
            started,
        )
        .await?;

        Ok(RecalculationSummary {
            period_id,
            employees_scored,
            snapshots_removed,
            computed_at: DateTime::<Utc>::from_timestamp(now, 0).unwrap_or_default(),
        })
    }

    async fn recalculate_in_transaction<C: ConnectionTrait>(
        &self,
        txn: &C,
        period_id: i64,
        now: i64,
        progress: &mut RunProgress,
    ) -> Result<(i64, i64)> {
        let employee_ids = Self::evaluated_employee_ids(txn, period_id).await?;

        let mut scored = Vec::with_capacity(employee_ids.len());
        for employee_id in employee_ids {
            let scores = Self::fetch_criterion_scores(txn, employee_id, period_id).await?;
            // 没有有效打分的员工不写快照，旧快照由下面的清理删除
            if let Some(score) = aggregate(&scores) {
                if Self::upsert_snapshot(txn, employee_id, period_id, &score, now).await? {
                    progress.rows_written += 1;
                }
                scored.push(employee_id);
            }
        }

        let removed = Self::prune_snapshots(txn, period_id, &scored).await?;
        progress.rows_written += removed as usize;
        self.enter_stage(progress, RecomputeStage::SnapshotsUpserted)?;

        progress.rows_written += Self::rerank_period(txn, period_id, now).await?;
        self.enter_stage(progress, RecomputeStage::Ranked)?;

        Ok((scored.len() as i64, removed as i64))
    }
}
