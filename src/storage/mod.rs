use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{
    departments::entities::Department,
    employees::entities::Employee,
    evaluations::{entities::EvaluationDetail, requests::SubmitEvaluationRequest},
    periods::entities::EvaluationPeriod,
    scores::{
        entities::{RankedSnapshot, ScoreSnapshot},
        requests::SnapshotListQuery,
        responses::RecalculationSummary,
    },
    users::entities::Evaluator,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 评分与排名（原子重算）
    // 提交或替换某评估人对某员工的打分，并重算该员工得分与全周期排名
    async fn submit_evaluation(
        &self,
        req: SubmitEvaluationRequest,
    ) -> Result<Option<ScoreSnapshot>>;
    // 重算整个周期的得分与排名
    async fn recalculate_period(&self, period_id: i64) -> Result<RecalculationSummary>;

    /// 快照查询
    // 获取单个员工在某周期的快照
    async fn get_snapshot(&self, employee_id: i64, period_id: i64)
    -> Result<Option<ScoreSnapshot>>;
    // 按加权分降序列出某周期快照
    async fn list_snapshots(
        &self,
        period_id: i64,
        query: SnapshotListQuery,
    ) -> Result<Vec<RankedSnapshot>>;

    /// 只读上下文
    // 通过ID获取员工
    async fn get_employee_by_id(&self, employee_id: i64) -> Result<Option<Employee>>;
    // 通过ID获取评估周期
    async fn get_period_by_id(&self, period_id: i64) -> Result<Option<EvaluationPeriod>>;
    // 通过ID获取评估人
    async fn get_evaluator_by_id(&self, evaluator_id: i64) -> Result<Option<Evaluator>>;
    // 列出全部部门
    async fn list_departments(&self) -> Result<Vec<Department>>;
    // 各部门在职员工数
    async fn count_active_employees_by_department(&self) -> Result<BTreeMap<i64, i64>>;
    // 列出员工在某周期收到的全部原始评估
    async fn list_employee_evaluations(
        &self,
        employee_id: i64,
        period_id: i64,
    ) -> Result<Vec<EvaluationDetail>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
