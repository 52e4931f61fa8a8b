//! 评估权限
//!
//! 管理员与主管可以评估任何员工；部门经理只能评估本部门员工；
//! 普通员工没有评估权限。

use crate::errors::{DssError, Result};
use crate::models::{
    employees::entities::Employee,
    users::entities::{Evaluator, EvaluatorRole},
};

pub fn authorize_evaluator(evaluator: &Evaluator, employee: &Employee) -> Result<()> {
    if evaluator.role.is_unrestricted() {
        return Ok(());
    }

    match evaluator.role {
        EvaluatorRole::Manager if evaluator.department_id == Some(employee.department_id) => Ok(()),
        EvaluatorRole::Manager => Err(DssError::authorization(format!(
            "评估人 {} 只能评估本部门员工",
            evaluator.username
        ))),
        _ => Err(DssError::authorization(format!(
            "评估人 {} 没有评估权限",
            evaluator.username
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(role: EvaluatorRole, department_id: Option<i64>) -> Evaluator {
        Evaluator {
            id: 1,
            username: "reviewer".to_string(),
            full_name: "Reviewer".to_string(),
            role,
            department_id,
        }
    }

    fn employee(department_id: i64) -> Employee {
        Employee {
            id: 7,
            employee_code: "EMP007".to_string(),
            full_name: "Dana".to_string(),
            position: None,
            department_id,
            is_active: true,
            hire_date: None,
        }
    }

    #[test]
    fn test_unrestricted_roles() {
        assert!(authorize_evaluator(&evaluator(EvaluatorRole::Admin, None), &employee(3)).is_ok());
        assert!(
            authorize_evaluator(&evaluator(EvaluatorRole::Supervisor, Some(1)), &employee(3))
                .is_ok()
        );
    }

    #[test]
    fn test_manager_limited_to_own_department() {
        let manager = evaluator(EvaluatorRole::Manager, Some(3));
        assert!(authorize_evaluator(&manager, &employee(3)).is_ok());

        let err = authorize_evaluator(&manager, &employee(4)).unwrap_err();
        assert!(matches!(err, DssError::Authorization(_)));
    }

    #[test]
    fn test_manager_without_department_is_rejected() {
        let manager = evaluator(EvaluatorRole::Manager, None);
        assert!(authorize_evaluator(&manager, &employee(3)).is_err());
    }

    #[test]
    fn test_employee_cannot_evaluate() {
        let err =
            authorize_evaluator(&evaluator(EvaluatorRole::Employee, Some(3)), &employee(3))
                .unwrap_err();
        assert!(matches!(err, DssError::Authorization(_)));
    }
}
