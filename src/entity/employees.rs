//! 员工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub full_name: String,
    pub position: Option<String>,
    pub department_id: i64,
    pub is_active: bool,
    pub hire_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::employee_scores::Entity")]
    EmployeeScores,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
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
    pub fn into_employee(self) -> crate::models::employees::entities::Employee {
        use crate::models::employees::entities::Employee;
        use chrono::{DateTime, Utc};

        Employee {
            id: self.id,
            employee_code: self.employee_code,
            full_name: self.full_name,
            position: self.position,
            department_id: self.department_id,
            is_active: self.is_active,
            hire_date: self
                .hire_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
