//! 评估指标存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::criteria::{Column, Entity as Criteria};
use crate::errors::{DssError, Result};
use crate::models::criteria::entities::Criterion;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 按 ID 批量读取指标（含停用指标，由调用方判断）
    pub async fn find_criteria_by_ids_impl(
        &self,
        criterion_ids: &[i64],
    ) -> Result<HashMap<i64, Criterion>> {
        if criterion_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let criteria = Criteria::find()
            .filter(Column::Id.is_in(criterion_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询评估指标失败: {e}")))?;

        Ok(criteria
            .into_iter()
            .map(|m| (m.id, m.into_criterion()))
            .collect())
    }
}
