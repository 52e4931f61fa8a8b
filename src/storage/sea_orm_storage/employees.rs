//! 员工与部门存储操作

use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::departments::{Column as DepartmentColumn, Entity as Departments};
use crate::entity::employees::{Column, Entity as Employees};
use crate::errors::{DssError, Result};
use crate::models::{departments::entities::Department, employees::entities::Employee};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 通过 ID 获取员工
    pub async fn get_employee_by_id_impl(&self, employee_id: i64) -> Result<Option<Employee>> {
        let result = Employees::find_by_id(employee_id)
            .one(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_employee()))
    }

    /// 列出全部部门
    pub async fn list_departments_impl(&self) -> Result<Vec<Department>> {
        let departments = Departments::find()
            .order_by_asc(DepartmentColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("查询部门列表失败: {e}")))?;

        Ok(departments
            .into_iter()
            .map(|m| m.into_department())
            .collect())
    }

    /// 各部门在职员工数
    pub async fn count_active_employees_by_department_impl(&self) -> Result<BTreeMap<i64, i64>> {
        let rows: Vec<(i64, i64)> = Employees::find()
            .select_only()
            .column(Column::DepartmentId)
            .column_as(Column::Id.count(), "headcount")
            .filter(Column::IsActive.eq(true))
            .group_by(Column::DepartmentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DssError::database_operation(format!("统计部门人数失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}
