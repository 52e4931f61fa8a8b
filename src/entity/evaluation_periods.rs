//! 评估周期实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub period_type: String,
    pub start_date: i64,
    pub end_date: i64,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::employee_scores::Entity")]
    EmployeeScores,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::employee_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_period(self) -> crate::models::periods::entities::EvaluationPeriod {
        use crate::models::periods::entities::{EvaluationPeriod, PeriodType};
        use chrono::{DateTime, Utc};

        EvaluationPeriod {
            id: self.id,
            name: self.name,
            period_type: self
                .period_type
                .parse::<PeriodType>()
                .unwrap_or(PeriodType::Quarterly),
            start_date: DateTime::<Utc>::from_timestamp(self.start_date, 0).unwrap_or_default(),
            end_date: DateTime::<Utc>::from_timestamp(self.end_date, 0).unwrap_or_default(),
            is_active: self.is_active,
        }
    }
}
