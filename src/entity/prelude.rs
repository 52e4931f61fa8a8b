//! 预导入模块，方便使用

pub use super::criteria::{
    ActiveModel as CriterionActiveModel, Entity as Criteria, Model as CriterionModel,
};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::employee_scores::{
    ActiveModel as EmployeeScoreActiveModel, Entity as EmployeeScores, Model as EmployeeScoreModel,
};
pub use super::employees::{
    ActiveModel as EmployeeActiveModel, Entity as Employees, Model as EmployeeModel,
};
pub use super::evaluation_periods::{
    ActiveModel as EvaluationPeriodActiveModel, Entity as EvaluationPeriods,
    Model as EvaluationPeriodModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
