//! 得分快照存储操作
//!
//! 快照只在内容变化时写入，未变化的行连 computed_at 也保持不动，
//! 因此对同一份数据重复重算得到逐字节相同的结果。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::engine::{AggregatedScore, RankingEntry, resolve_rankings};
use crate::entity::departments::Entity as Departments;
use crate::entity::employee_scores::{ActiveModel, Column, Entity as EmployeeScores, Model};
use crate::entity::employees::{Column as EmployeeColumn, Entity as Employees};
use crate::errors::{DssError, Result};
use crate::models::scores::{
    entities::{RankedSnapshot, ScoreSnapshot},
    requests::SnapshotListQuery,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// 排行榜单次返回上限
const MAX_LIST_LIMIT: u64 = 1000;

impl SeaOrmStorage {
    pub(crate) async fn find_snapshot_model<C: ConnectionTrait>(
        conn: &C,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Option<Model>> {
        EmployeeScores::find()
            .filter(
                Condition::all()
                    .add(Column::EmployeeId.eq(employee_id))
                    .add(Column::PeriodId.eq(period_id)),
            )
            .one(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("查询得分快照失败: {e}")))
    }

    /// 写入聚合结果，返回是否发生了实际写入
    ///
    /// 新行的名次字段先置 0，随后由 `rerank_period` 统一填写。
    pub(crate) async fn upsert_snapshot<C: ConnectionTrait>(
        conn: &C,
        employee_id: i64,
        period_id: i64,
        score: &AggregatedScore,
        computed_at: i64,
    ) -> Result<bool> {
        match Self::find_snapshot_model(conn, employee_id, period_id).await? {
            Some(existing)
                if existing.total_score == score.total_score
                    && existing.weighted_score == score.weighted_score =>
            {
                Ok(false)
            }
            Some(existing) => {
                let mut model: ActiveModel = existing.into();
                model.total_score = Set(score.total_score);
                model.weighted_score = Set(score.weighted_score);
                model.computed_at = Set(computed_at);
                model
                    .update(conn)
                    .await
                    .map_err(|e| DssError::database_operation(format!("更新得分快照失败: {e}")))?;
                Ok(true)
            }
            None => {
                let model = ActiveModel {
                    employee_id: Set(employee_id),
                    period_id: Set(period_id),
                    total_score: Set(score.total_score),
                    weighted_score: Set(score.weighted_score),
                    rank_overall: Set(0),
                    rank_in_department: Set(0),
                    is_best_overall: Set(false),
                    is_best_in_department: Set(false),
                    computed_at: Set(computed_at),
                    ..Default::default()
                };
                model
                    .insert(conn)
                    .await
                    .map_err(|e| DssError::database_operation(format!("写入得分快照失败: {e}")))?;
                Ok(true)
            }
        }
    }

    /// 删除单个快照（员工已没有任何有效打分）
    pub(crate) async fn delete_snapshot<C: ConnectionTrait>(
        conn: &C,
        employee_id: i64,
        period_id: i64,
    ) -> Result<u64> {
        let result = EmployeeScores::delete_many()
            .filter(
                Condition::all()
                    .add(Column::EmployeeId.eq(employee_id))
                    .add(Column::PeriodId.eq(period_id)),
            )
            .exec(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("删除得分快照失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 删除周期内不在 `keep` 中的快照
    pub(crate) async fn prune_snapshots<C: ConnectionTrait>(
        conn: &C,
        period_id: i64,
        keep: &[i64],
    ) -> Result<u64> {
        let mut condition = Condition::all().add(Column::PeriodId.eq(period_id));
        if !keep.is_empty() {
            condition = condition.add(Column::EmployeeId.is_not_in(keep.iter().copied()));
        }

        let result = EmployeeScores::delete_many()
            .filter(condition)
            .exec(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("清理过期快照失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 按当前快照与员工当前部门重排整个周期，返回实际更新的行数
    pub(crate) async fn rerank_period<C: ConnectionTrait>(
        conn: &C,
        period_id: i64,
        computed_at: i64,
    ) -> Result<usize> {
        let rows = EmployeeScores::find()
            .filter(Column::PeriodId.eq(period_id))
            .find_also_related(Employees)
            .all(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("查询周期快照失败: {e}")))?;

        let entries: Vec<RankingEntry> = rows
            .iter()
            .map(|(snapshot, employee)| {
                let department_id = employee
                    .as_ref()
                    .map(|e| e.department_id)
                    .ok_or_else(|| {
                        DssError::database_operation(format!(
                            "快照引用的员工不存在: {}",
                            snapshot.employee_id
                        ))
                    })?;
                Ok(RankingEntry {
                    employee_id: snapshot.employee_id,
                    department_id,
                    weighted_score: snapshot.weighted_score,
                })
            })
            .collect::<Result<_>>()?;

        let mut snapshots: HashMap<i64, Model> = rows
            .into_iter()
            .map(|(snapshot, _)| (snapshot.employee_id, snapshot))
            .collect();

        let mut updated = 0;
        for outcome in resolve_rankings(&entries) {
            let Some(existing) = snapshots.remove(&outcome.employee_id) else {
                continue;
            };
            if existing.rank_overall == outcome.rank_overall
                && existing.rank_in_department == outcome.rank_in_department
                && existing.is_best_overall == outcome.is_best_overall
                && existing.is_best_in_department == outcome.is_best_in_department
            {
                continue;
            }

            let mut model: ActiveModel = existing.into();
            model.rank_overall = Set(outcome.rank_overall);
            model.rank_in_department = Set(outcome.rank_in_department);
            model.is_best_overall = Set(outcome.is_best_overall);
            model.is_best_in_department = Set(outcome.is_best_in_department);
            model.computed_at = Set(computed_at);
            model
                .update(conn)
                .await
                .map_err(|e| DssError::database_operation(format!("更新排名失败: {e}")))?;
            updated += 1;
        }

        Ok(updated)
    }

    /// 获取单个快照
    pub async fn get_snapshot_impl(
        &self,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Option<ScoreSnapshot>> {
        let result = Self::find_snapshot_model(&self.db, employee_id, period_id).await?;
        Ok(result.map(|m| m.into_snapshot()))
    }

    /// 按加权分降序列出周期快照，可按当前部门过滤、截取前 N 名
    pub async fn list_snapshots_impl(
        &self,
        period_id: i64,
        query: SnapshotListQuery,
    ) -> Result<Vec<RankedSnapshot>> {
        let mut select = EmployeeScores::find()
            .filter(Column::PeriodId.eq(period_id))
            .find_also_related(Employees);

        if let Some(department_id) = query.department_id {
            select = select.filter(EmployeeColumn::DepartmentId.eq(department_id));
        }

        select = select
            .order_by_desc(Column::WeightedScore)
            .order_by_asc(EmployeeColumn::FullName)
            .order_by_asc(Column::EmployeeId);

        if let Some(limit) = query.limit {
            select = select.limit(limit.clamp(1, MAX_LIST_LIMIT));
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询快照列表失败: {e}")))?;

        let department_names: HashMap<i64, String> = Departments::find()
            .all(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询部门失败: {e}")))?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(snapshot, employee)| {
                let employee = employee?;
                Some(RankedSnapshot {
                    snapshot: snapshot.into_snapshot(),
                    employee_code: employee.employee_code,
                    full_name: employee.full_name,
                    department_id: employee.department_id,
                    department_name: department_names
                        .get(&employee.department_id)
                        .cloned()
                        .unwrap_or_default(),
                    is_active: employee.is_active,
                })
            })
            .collect())
    }
}
