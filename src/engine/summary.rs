//! 部门对比统计
//!
//! 输入为部门、部门在职员工数与本周期带排名的快照，输出每个部门的
//! 平均分/最高分/最低分以及部门最佳员工。只统计在职员工。

use std::collections::BTreeMap;

use crate::models::departments::entities::Department;
use crate::models::departments::responses::DepartmentSummary;
use crate::models::scores::entities::RankedSnapshot;

/// 汇总部门统计
///
/// 没有在职员工的部门不出现在结果中；结果按平均分降序，未评分部门排在最后。
pub fn summarize_departments(
    departments: &[Department],
    active_headcount: &BTreeMap<i64, i64>,
    snapshots: &[RankedSnapshot],
) -> Vec<DepartmentSummary> {
    let mut by_department: BTreeMap<i64, Vec<&RankedSnapshot>> = BTreeMap::new();
    for item in snapshots.iter().filter(|s| s.is_active) {
        by_department
            .entry(item.department_id)
            .or_default()
            .push(item);
    }

    let mut summaries: Vec<DepartmentSummary> = departments
        .iter()
        .filter_map(|department| {
            let employee_count = active_headcount.get(&department.id).copied().unwrap_or(0);
            if employee_count == 0 {
                return None;
            }

            let scored = by_department
                .get(&department.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let scores: Vec<f64> = scored.iter().map(|s| s.snapshot.weighted_score).collect();

            let (avg_score, best_score, lowest_score) = if scores.is_empty() {
                (None, None, None)
            } else {
                let sum: f64 = scores.iter().sum();
                (
                    Some(sum / scores.len() as f64),
                    scores.iter().copied().reduce(f64::max),
                    scores.iter().copied().reduce(f64::min),
                )
            };

            // 离职员工可能占着部门第一，这里按在职员工的最高分重新认定
            let best_employees = scored
                .iter()
                .filter(|s| Some(s.snapshot.weighted_score) == best_score)
                .map(|s| s.full_name.clone())
                .collect();

            Some(DepartmentSummary {
                department_id: department.id,
                department_name: department.name.clone(),
                employee_count,
                scored_count: scores.len() as i64,
                avg_score,
                best_score,
                lowest_score,
                best_employees,
            })
        })
        .collect();

    summaries.sort_by(|a, b| match (a.avg_score, b.avg_score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.department_id.cmp(&b.department_id),
    });

    summaries
}
