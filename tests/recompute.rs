mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::*;
use employee_dss::engine::RecomputeStage;
use employee_dss::errors::DssError;
use employee_dss::storage::Storage;

#[tokio::test]
async fn test_weighted_mean_snapshot() {
    let storage = setup().await;

    let snapshot = storage
        .submit_evaluation(submission(
            ADMIN,
            ALICE,
            Q1,
            &[(QUALITY, 5), (DELIVERY, 3), (TEAMWORK, 4)],
        ))
        .await
        .expect("submit")
        .expect("snapshot written");

    assert_eq!(snapshot.weighted_score, 4.1);
    assert_eq!(snapshot.total_score, 12.0);
    assert_eq!(snapshot.rank_overall, 1);
    assert_eq!(snapshot.rank_in_department, 1);
    assert!(snapshot.is_best_overall);
    assert!(snapshot.is_best_in_department);
}

#[tokio::test]
async fn test_partial_criteria_use_covered_weights() {
    let storage = setup().await;

    let snapshot = storage
        .submit_evaluation(submission(ADMIN, ALICE, Q1, &[(QUALITY, 5), (DELIVERY, 3)]))
        .await
        .expect("submit")
        .expect("snapshot written");

    // (5×40 + 3×30) / 70
    assert_eq!(snapshot.weighted_score, 4.1429);
}

#[tokio::test]
async fn test_employees_without_evaluations_have_no_snapshot() {
    let storage = setup().await;
    storage
        .submit_evaluation(uniform(ADMIN, CAROL, Q1, 4))
        .await
        .expect("submit");

    let summary = storage.recalculate_period(Q1).await.expect("recalculate");
    assert_eq!(summary.employees_scored, 1);

    assert!(storage.get_snapshot(DAVE, Q1).await.unwrap().is_none());
    let rows = snapshot_rows(storage.connection(), Q1).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_id, CAROL);
}

#[tokio::test]
async fn test_ties_share_rank_and_skip() {
    let storage = setup().await;
    for (employee_id, score) in [(ALICE, 5), (CAROL, 5), (BOB, 4)] {
        storage
            .submit_evaluation(uniform(ADMIN, employee_id, Q1, score))
            .await
            .expect("submit");
    }

    let alice = storage.get_snapshot(ALICE, Q1).await.unwrap().unwrap();
    let carol = storage.get_snapshot(CAROL, Q1).await.unwrap().unwrap();
    let bob = storage.get_snapshot(BOB, Q1).await.unwrap().unwrap();

    assert_eq!(alice.rank_overall, 1);
    assert_eq!(carol.rank_overall, 1);
    assert_eq!(bob.rank_overall, 3);

    // 多个最佳同时成立
    assert!(alice.is_best_overall && carol.is_best_overall);
    assert!(!bob.is_best_overall);

    // 部门内：Alice 与 Bob 同在研发，Carol 独占销售
    assert_eq!(bob.rank_in_department, 2);
    assert!(carol.is_best_in_department);
}

#[tokio::test]
async fn test_single_submission_reranks_whole_period() {
    let storage = setup().await;
    storage
        .submit_evaluation(uniform(ADMIN, ALICE, Q1, 4))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(ADMIN, CAROL, Q1, 5))
        .await
        .unwrap();

    // Carol 的提交让 Alice 降到第 2，无需整周期重算
    let alice = storage.get_snapshot(ALICE, Q1).await.unwrap().unwrap();
    assert_eq!(alice.rank_overall, 2);
    assert!(!alice.is_best_overall);
    assert!(alice.is_best_in_department);
}

#[tokio::test]
async fn test_recalculation_is_idempotent() {
    let storage = setup().await;
    for (employee_id, score) in [(ALICE, 5), (BOB, 3), (CAROL, 4)] {
        storage
            .submit_evaluation(uniform(ADMIN, employee_id, Q1, score))
            .await
            .unwrap();
    }

    storage.recalculate_period(Q1).await.unwrap();
    let first = snapshot_rows(storage.connection(), Q1).await;

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    storage.recalculate_period(Q1).await.unwrap();
    let second = snapshot_rows(storage.connection(), Q1).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_weight_change_applies_on_recalculation() {
    let storage = setup().await;
    storage
        .submit_evaluation(submission(
            ADMIN,
            ALICE,
            Q1,
            &[(QUALITY, 5), (DELIVERY, 3), (TEAMWORK, 4)],
        ))
        .await
        .unwrap();

    set_weight(storage.connection(), QUALITY, 10.0).await;

    // 权重只在重算时生效
    let before = storage.get_snapshot(ALICE, Q1).await.unwrap().unwrap();
    assert_eq!(before.weighted_score, 4.1);

    storage.recalculate_period(Q1).await.unwrap();
    let after = storage.get_snapshot(ALICE, Q1).await.unwrap().unwrap();
    // (5×10 + 3×30 + 4×30) / 70
    assert_eq!(after.weighted_score, 3.7143);
}

#[tokio::test]
async fn test_resubmission_replaces_only_own_scores() {
    let storage = setup().await;
    storage
        .submit_evaluation(uniform(ADMIN, ALICE, Q1, 5))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(SUPERVISOR, ALICE, Q1, 3))
        .await
        .unwrap();

    // 管理员重新提交，主管的打分保持不变
    let snapshot = storage
        .submit_evaluation(submission(ADMIN, ALICE, Q1, &[(QUALITY, 1)]))
        .await
        .unwrap()
        .unwrap();

    let details = storage.list_employee_evaluations(ALICE, Q1).await.unwrap();
    let admin_rows = details
        .iter()
        .filter(|d| d.evaluation.evaluator_id == ADMIN)
        .count();
    let supervisor_rows = details
        .iter()
        .filter(|d| d.evaluation.evaluator_id == SUPERVISOR)
        .count();
    assert_eq!(admin_rows, 1);
    assert_eq!(supervisor_rows, 3);

    // (1×40 + 3×40 + 3×30 + 3×30) / 140
    assert_eq!(snapshot.weighted_score, 2.4286);
    assert_eq!(snapshot.total_score, 10.0);
}

#[tokio::test]
async fn test_department_rank_follows_current_membership() {
    let storage = setup().await;
    storage
        .submit_evaluation(uniform(ADMIN, ALICE, Q1, 5))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(ADMIN, CAROL, Q1, 4))
        .await
        .unwrap();

    let carol = storage.get_snapshot(CAROL, Q1).await.unwrap().unwrap();
    assert!(carol.is_best_in_department);

    move_employee(storage.connection(), CAROL, ENGINEERING).await;
    storage.recalculate_period(Q1).await.unwrap();

    let carol = storage.get_snapshot(CAROL, Q1).await.unwrap().unwrap();
    assert_eq!(carol.rank_in_department, 2);
    assert!(!carol.is_best_in_department);
    assert_eq!(carol.rank_overall, 2);
}

#[tokio::test]
async fn test_periods_are_ranked_independently() {
    let storage = setup().await;
    storage
        .submit_evaluation(uniform(ADMIN, ALICE, Q1, 5))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(ADMIN, BOB, Q2, 2))
        .await
        .unwrap();

    let bob = storage.get_snapshot(BOB, Q2).await.unwrap().unwrap();
    assert_eq!(bob.rank_overall, 1);
    assert!(storage.get_snapshot(BOB, Q1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deactivated_criteria_drop_stale_snapshot() {
    let storage = setup().await;
    storage
        .submit_evaluation(submission(ADMIN, BOB, Q1, &[(QUALITY, 4)]))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(ADMIN, ALICE, Q1, 3))
        .await
        .unwrap();

    set_criterion_active(storage.connection(), QUALITY, false).await;
    let summary = storage.recalculate_period(Q1).await.unwrap();

    // Bob 只剩停用指标上的打分，视为没有数据
    assert_eq!(summary.employees_scored, 1);
    assert_eq!(summary.snapshots_removed, 1);
    assert!(storage.get_snapshot(BOB, Q1).await.unwrap().is_none());

    let alice = storage.get_snapshot(ALICE, Q1).await.unwrap().unwrap();
    assert_eq!(alice.weighted_score, 3.0);
    assert_eq!(alice.rank_overall, 1);
}

#[tokio::test]
async fn test_failed_stage_rolls_back_submission() {
    let storage = setup().await;
    storage
        .submit_evaluation(uniform(ADMIN, ALICE, Q1, 5))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(ADMIN, BOB, Q1, 4))
        .await
        .unwrap();
    let before = snapshot_rows(storage.connection(), Q1).await;

    let failing = storage.clone().with_stage_hook(Arc::new(|stage: RecomputeStage| {
        if stage == RecomputeStage::SnapshotsUpserted {
            Err(DssError::database_operation("injected failure"))
        } else {
            Ok(())
        }
    }));

    let err = failing
        .submit_evaluation(uniform(ADMIN, BOB, Q1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DssError::Transaction(_)));

    // 快照与原始打分都保持提交前的状态
    assert_eq!(snapshot_rows(storage.connection(), Q1).await, before);
    let details = storage.list_employee_evaluations(BOB, Q1).await.unwrap();
    assert!(details.iter().all(|d| d.evaluation.score == 4));
}

#[tokio::test]
async fn test_failed_stage_rolls_back_recalculation() {
    let storage = setup().await;
    storage
        .submit_evaluation(submission(
            ADMIN,
            ALICE,
            Q1,
            &[(QUALITY, 5), (DELIVERY, 3), (TEAMWORK, 4)],
        ))
        .await
        .unwrap();
    storage
        .submit_evaluation(uniform(ADMIN, BOB, Q1, 4))
        .await
        .unwrap();
    let before = snapshot_rows(storage.connection(), Q1).await;

    set_weight(storage.connection(), QUALITY, 90.0).await;

    let reached_ranked = Arc::new(AtomicBool::new(false));
    let flag = reached_ranked.clone();
    let failing = storage.clone().with_stage_hook(Arc::new(move |stage: RecomputeStage| {
        if stage == RecomputeStage::Ranked {
            flag.store(true, Ordering::SeqCst);
            Err(DssError::database_operation("injected failure"))
        } else {
            Ok(())
        }
    }));

    let err = failing.recalculate_period(Q1).await.unwrap_err();
    assert!(matches!(err, DssError::Transaction(_)));
    assert!(reached_ranked.load(Ordering::SeqCst));
    assert_eq!(snapshot_rows(storage.connection(), Q1).await, before);

    // 故障消失后重算照常完成
    storage.recalculate_period(Q1).await.unwrap();
    let alice = storage.get_snapshot(ALICE, Q1).await.unwrap().unwrap();
    // (5×90 + 3×30 + 4×30) / 150
    assert_eq!(alice.weighted_score, 4.4);
}

#[tokio::test]
async fn test_concurrent_submissions_leave_consistent_ranks() {
    let storage = Arc::new(setup().await);

    let mut handles = Vec::new();
    for (employee_id, score) in [(ALICE, 3), (BOB, 5), (CAROL, 4), (DAVE, 5)] {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .submit_evaluation(uniform(SUPERVISOR, employee_id, Q1, score))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("submit");
    }

    let rows = snapshot_rows(storage.connection(), Q1).await;
    assert_eq!(rows.len(), 4);
    for row in &rows {
        let higher = rows
            .iter()
            .filter(|other| other.weighted_score > row.weighted_score)
            .count() as i32;
        assert_eq!(row.rank_overall, higher + 1);
    }
}

#[tokio::test]
async fn test_missing_references_are_reported() {
    let storage = setup().await;

    let err = storage
        .submit_evaluation(uniform(ADMIN, 999, Q1, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, DssError::EmployeeNotFound(_)));

    let err = storage
        .submit_evaluation(uniform(ADMIN, ALICE, 999, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, DssError::PeriodNotFound(_)));

    let err = storage.recalculate_period(999).await.unwrap_err();
    assert!(matches!(err, DssError::PeriodNotFound(_)));
}

#[tokio::test]
async fn test_invalid_submissions_write_nothing() {
    let storage = setup().await;

    for req in [
        submission(ADMIN, ALICE, Q1, &[(QUALITY, 6)]),
        submission(ADMIN, ALICE, Q1, &[(QUALITY, 0)]),
        submission(ADMIN, ALICE, Q1, &[]),
        submission(ADMIN, ALICE, Q1, &[(QUALITY, 4), (QUALITY, 5)]),
        submission(ADMIN, ALICE, Q1, &[(RETIRED, 4)]),
        submission(ADMIN, ALICE, Q1, &[(999, 4)]),
    ] {
        let err = storage.submit_evaluation(req).await.unwrap_err();
        assert!(matches!(err, DssError::Validation(_)), "{err}");
    }

    assert!(snapshot_rows(storage.connection(), Q1).await.is_empty());
    assert!(
        storage
            .list_employee_evaluations(ALICE, Q1)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_empty_period_recalculates_to_nothing() {
    let storage = setup().await;
    let summary = storage.recalculate_period(Q2).await.unwrap();
    assert_eq!(summary.employees_scored, 0);
    assert_eq!(summary.snapshots_removed, 0);
}
