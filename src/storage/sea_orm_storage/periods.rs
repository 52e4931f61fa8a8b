//! 评估周期存储操作

use super::SeaOrmStorage;
use crate::entity::evaluation_periods::Entity as EvaluationPeriods;
use crate::errors::{DssError, Result};
use crate::models::periods::entities::EvaluationPeriod;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取评估周期
    pub async fn get_period_by_id_impl(&self, period_id: i64) -> Result<Option<EvaluationPeriod>> {
        let result = EvaluationPeriods::find_by_id(period_id)
            .one(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询评估周期失败: {e}")))?;

        Ok(result.map(|m| m.into_period()))
    }
}
