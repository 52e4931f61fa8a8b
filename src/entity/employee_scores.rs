//! 员工得分快照实体
//!
//! 每个 (employee_id, period_id) 唯一一行，每次重算整体覆盖。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employee_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    pub period_id: i64,
    pub total_score: f64,
    pub weighted_score: f64,
    pub rank_overall: i32,
    pub rank_in_department: i32,
    pub is_best_overall: bool,
    pub is_best_in_department: bool,
    pub computed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::evaluation_periods::Entity",
        from = "Column::PeriodId",
        to = "super::evaluation_periods::Column::Id"
    )]
    Period,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::evaluation_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Period.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_snapshot(self) -> crate::models::scores::entities::ScoreSnapshot {
        use crate::models::scores::entities::ScoreSnapshot;
        use chrono::{DateTime, Utc};

        ScoreSnapshot {
            employee_id: self.employee_id,
            period_id: self.period_id,
            total_score: self.total_score,
            weighted_score: self.weighted_score,
            rank_overall: self.rank_overall,
            rank_in_department: self.rank_in_department,
            is_best_overall: self.is_best_overall,
            is_best_in_department: self.is_best_in_department,
            computed_at: DateTime::<Utc>::from_timestamp(self.computed_at, 0).unwrap_or_default(),
        }
    }
}
