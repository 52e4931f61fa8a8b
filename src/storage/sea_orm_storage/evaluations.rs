//! 原始评估存储操作
//!
//! 写操作接受任意连接，重算时在同一个事务内调用。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::engine::CriterionScore;
use crate::entity::criteria::{Column as CriteriaColumn, Entity as Criteria};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{DssError, Result};
use crate::models::evaluations::{entities::EvaluationDetail, requests::SubmitEvaluationRequest};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 替换某评估人对某员工在某周期的全部打分
    ///
    /// 返回 (删除行数, 写入行数)。
    pub(crate) async fn replace_evaluations<C: ConnectionTrait>(
        conn: &C,
        req: &SubmitEvaluationRequest,
    ) -> Result<(u64, u64)> {
        let key = req.key();

        let deleted = Evaluations::delete_many()
            .filter(
                Condition::all()
                    .add(Column::EmployeeId.eq(key.employee_id))
                    .add(Column::PeriodId.eq(key.period_id))
                    .add(Column::EvaluatorId.eq(key.evaluator_id)),
            )
            .exec(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("删除旧评估失败: {e}")))?;

        if req.scores.is_empty() {
            return Ok((deleted.rows_affected, 0));
        }

        let now = chrono::Utc::now().timestamp();
        let models: Vec<ActiveModel> = req
            .scores
            .iter()
            .map(|item| ActiveModel {
                employee_id: Set(key.employee_id),
                evaluator_id: Set(key.evaluator_id),
                period_id: Set(key.period_id),
                criterion_id: Set(item.criterion_id),
                score: Set(item.score),
                comment: Set(item.comment.clone()),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();
        let inserted = models.len() as u64;

        Evaluations::insert_many(models)
            .exec(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("写入评估失败: {e}")))?;

        Ok((deleted.rows_affected, inserted))
    }

    /// 读取某员工在某周期的全部打分及指标当前权重
    ///
    /// 停用指标不参与聚合；按评估 ID 排序保证浮点求和顺序稳定。
    pub(crate) async fn fetch_criterion_scores<C: ConnectionTrait>(
        conn: &C,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Vec<CriterionScore>> {
        let rows: Vec<(i64, i32, f64)> = Evaluations::find()
            .select_only()
            .column(Column::CriterionId)
            .column(Column::Score)
            .column(CriteriaColumn::Weight)
            .inner_join(Criteria)
            .filter(Column::EmployeeId.eq(employee_id))
            .filter(Column::PeriodId.eq(period_id))
            .filter(CriteriaColumn::IsActive.eq(true))
            .order_by_asc(Column::Id)
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("查询员工打分失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(criterion_id, score, weight)| CriterionScore {
                criterion_id,
                score,
                weight,
            })
            .collect())
    }

    /// 某周期内收到过评估的员工（去重）
    pub(crate) async fn evaluated_employee_ids<C: ConnectionTrait>(
        conn: &C,
        period_id: i64,
    ) -> Result<Vec<i64>> {
        Evaluations::find()
            .select_only()
            .column(Column::EmployeeId)
            .distinct()
            .filter(Column::PeriodId.eq(period_id))
            .order_by_asc(Column::EmployeeId)
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| DssError::database_operation(format!("查询已评估员工失败: {e}")))
    }

    /// 列出员工在某周期收到的全部原始评估
    pub async fn list_employee_evaluations_impl(
        &self,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Vec<EvaluationDetail>> {
        let rows = Evaluations::find()
            .filter(Column::EmployeeId.eq(employee_id))
            .filter(Column::PeriodId.eq(period_id))
            .order_by_asc(Column::EvaluatorId)
            .order_by_asc(Column::CriterionId)
            .find_also_related(Criteria)
            .all(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询评估明细失败: {e}")))?;

        let mut evaluator_ids: Vec<i64> = rows.iter().map(|(e, _)| e.evaluator_id).collect();
        evaluator_ids.sort_unstable();
        evaluator_ids.dedup();

        let evaluator_names: HashMap<i64, String> = if evaluator_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(evaluator_ids))
                .all(&self.db)
                .await
                .map_err(|e| DssError::database_operation(format!("查询评估人失败: {e}")))?
                .into_iter()
                .map(|u| (u.id, u.full_name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(evaluation, criterion)| {
                let (criterion_name, weight) = criterion
                    .map(|c| (c.name, c.weight))
                    .unwrap_or_default();
                let evaluator_name = evaluator_names
                    .get(&evaluation.evaluator_id)
                    .cloned()
                    .unwrap_or_default();
                EvaluationDetail {
                    evaluation: evaluation.into_raw_evaluation(),
                    criterion_name,
                    weight,
                    evaluator_name,
                }
            })
            .collect())
    }
}
