//! 评估人存储操作

use super::SeaOrmStorage;
use crate::entity::users::Entity as Users;
use crate::errors::{DssError, Result};
use crate::models::users::entities::Evaluator;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    /// 通过 ID 获取评估人
    pub async fn get_evaluator_by_id_impl(&self, evaluator_id: i64) -> Result<Option<Evaluator>> {
        let result = Users::find_by_id(evaluator_id)
            .one(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询评估人失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluator()))
    }
}
