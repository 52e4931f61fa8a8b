//! 集成测试公共夹具：内存 SQLite + 固定的基础数据
#![allow(dead_code)]

use employee_dss::config::DatabaseConfig;
use employee_dss::entity::prelude::*;
use employee_dss::models::evaluations::requests::{CriterionScoreInput, SubmitEvaluationRequest};
use employee_dss::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

pub const ENGINEERING: i64 = 1;
pub const SALES: i64 = 2;
pub const OPERATIONS: i64 = 3;

pub const ADMIN: i64 = 1;
pub const ENGINEERING_MANAGER: i64 = 2;
pub const SUPERVISOR: i64 = 3;
pub const STAFF: i64 = 4;

pub const ALICE: i64 = 1; // 研发
pub const BOB: i64 = 2; // 研发
pub const CAROL: i64 = 3; // 销售
pub const DAVE: i64 = 4; // 销售，默认无评估

pub const QUALITY: i64 = 1; // 40
pub const DELIVERY: i64 = 2; // 30
pub const TEAMWORK: i64 = 3; // 30
pub const RETIRED: i64 = 4; // 停用

pub const Q1: i64 = 1;
pub const Q2: i64 = 2;

pub async fn setup() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage should start");
    seed(storage.connection()).await;
    storage
}

async fn seed(db: &DatabaseConnection) {
    let now = chrono::Utc::now().timestamp();

    for (id, name) in [
        (ENGINEERING, "Engineering"),
        (SALES, "Sales"),
        (OPERATIONS, "Operations"),
    ] {
        DepartmentActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            description: Set(None),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .expect("seed department");
    }

    for (id, username, role, department_id) in [
        (ADMIN, "admin", "admin", None),
        (ENGINEERING_MANAGER, "eng.manager", "manager", Some(ENGINEERING)),
        (SUPERVISOR, "supervisor", "supervisor", None),
        (STAFF, "staff", "employee", Some(ENGINEERING)),
    ] {
        UserActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            full_name: Set(username.to_uppercase()),
            role: Set(role.to_string()),
            department_id: Set(department_id),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .expect("seed user");
    }

    for (id, code, name, department_id) in [
        (ALICE, "EMP001", "Alice", ENGINEERING),
        (BOB, "EMP002", "Bob", ENGINEERING),
        (CAROL, "EMP003", "Carol", SALES),
        (DAVE, "EMP004", "Dave", SALES),
    ] {
        EmployeeActiveModel {
            id: Set(id),
            employee_code: Set(code.to_string()),
            full_name: Set(name.to_string()),
            position: Set(None),
            department_id: Set(department_id),
            is_active: Set(true),
            hire_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("seed employee");
    }

    for (id, name, weight, is_active) in [
        (QUALITY, "Quality", 40.0, true),
        (DELIVERY, "Delivery", 30.0, true),
        (TEAMWORK, "Teamwork", 30.0, true),
        (RETIRED, "Retired", 10.0, false),
    ] {
        CriterionActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            description: Set(None),
            category: Set("Other".to_string()),
            weight: Set(weight),
            is_active: Set(is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("seed criterion");
    }

    for (id, name) in [(Q1, "2026 Q1"), (Q2, "2026 Q2")] {
        EvaluationPeriodActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            period_type: Set("quarterly".to_string()),
            start_date: Set(now),
            end_date: Set(now + 90 * 86_400),
            is_active: Set(true),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .expect("seed period");
    }
}

/// 构造提交请求，scores 为 (指标, 分数)
pub fn submission(
    evaluator_id: i64,
    employee_id: i64,
    period_id: i64,
    scores: &[(i64, i32)],
) -> SubmitEvaluationRequest {
    SubmitEvaluationRequest {
        employee_id,
        evaluator_id,
        period_id,
        scores: scores
            .iter()
            .map(|&(criterion_id, score)| CriterionScoreInput {
                criterion_id,
                score,
                comment: None,
            })
            .collect(),
    }
}

/// 三个启用指标打同一分数，加权分即为该分数
pub fn uniform(evaluator_id: i64, employee_id: i64, period_id: i64, score: i32) -> SubmitEvaluationRequest {
    submission(
        evaluator_id,
        employee_id,
        period_id,
        &[(QUALITY, score), (DELIVERY, score), (TEAMWORK, score)],
    )
}

/// 修改指标权重
pub async fn set_weight(db: &DatabaseConnection, criterion_id: i64, weight: f64) {
    let model = Criteria::find_by_id(criterion_id)
        .one(db)
        .await
        .expect("query criterion")
        .expect("criterion exists");
    let mut active: CriterionActiveModel = model.into();
    active.weight = Set(weight);
    active.update(db).await.expect("update weight");
}

/// 修改指标启用状态
pub async fn set_criterion_active(db: &DatabaseConnection, criterion_id: i64, is_active: bool) {
    let model = Criteria::find_by_id(criterion_id)
        .one(db)
        .await
        .expect("query criterion")
        .expect("criterion exists");
    let mut active: CriterionActiveModel = model.into();
    active.is_active = Set(is_active);
    active.update(db).await.expect("update criterion");
}

/// 调整员工部门
pub async fn move_employee(db: &DatabaseConnection, employee_id: i64, department_id: i64) {
    let model = Employees::find_by_id(employee_id)
        .one(db)
        .await
        .expect("query employee")
        .expect("employee exists");
    let mut active: EmployeeActiveModel = model.into();
    active.department_id = Set(department_id);
    active.update(db).await.expect("move employee");
}

/// 设置员工在职状态
pub async fn set_employee_active(db: &DatabaseConnection, employee_id: i64, is_active: bool) {
    let model = Employees::find_by_id(employee_id)
        .one(db)
        .await
        .expect("query employee")
        .expect("employee exists");
    let mut active: EmployeeActiveModel = model.into();
    active.is_active = Set(is_active);
    active.update(db).await.expect("update employee");
}

/// 周期内全部快照行（按员工 ID 排序）
pub async fn snapshot_rows(db: &DatabaseConnection, period_id: i64) -> Vec<EmployeeScoreModel> {
    use employee_dss::entity::employee_scores::Column;
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

    EmployeeScores::find()
        .filter(Column::PeriodId.eq(period_id))
        .order_by_asc(Column::EmployeeId)
        .all(db)
        .await
        .expect("query snapshots")
}
