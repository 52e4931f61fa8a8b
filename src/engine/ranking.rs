//! 排名计算
//!
//! 规则：rank(e) = 1 + 严格高于 e 的人数。同分同名次，名次之后按并列人数跳号
//! （两人并列第 1，下一个分数为第 3 名）。部门内排名使用同一规则，
//! 范围限定为当前同部门员工。名次为 1 即为“最佳”，并列时可有多人。
//!
//! 实现上先按分数降序排序，再对每个并列组取组首位置 + 1，
//! 与逐个统计“更高分人数”的写法等价。

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 参与排名的一项：员工当前所属部门与加权分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingEntry {
    pub employee_id: i64,
    pub department_id: i64,
    pub weighted_score: f64,
}

/// 排名结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOutcome {
    pub employee_id: i64,
    pub rank_overall: i32,
    pub rank_in_department: i32,
    pub is_best_overall: bool,
    pub is_best_in_department: bool,
}

fn by_score_desc(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.weighted_score
        .partial_cmp(&a.weighted_score)
        .unwrap_or(Ordering::Equal)
        .then(a.employee_id.cmp(&b.employee_id))
}

/// 为已按分数降序排好的下标序列分配名次
fn assign_ranks(entries: &[RankingEntry], ordered: &[usize], ranks: &mut [i32]) {
    let mut group_rank = 1;
    for (position, &index) in ordered.iter().enumerate() {
        if position > 0 {
            let previous = ordered[position - 1];
            if entries[previous].weighted_score > entries[index].weighted_score {
                group_rank = position as i32 + 1;
            }
        }
        ranks[index] = group_rank;
    }
}

/// 对一个周期的全部快照计算全局与部门排名
///
/// 结果按全局名次升序返回，同名次内按员工 ID 排列（仅用于输出稳定，不影响名次）。
pub fn resolve_rankings(entries: &[RankingEntry]) -> Vec<RankingOutcome> {
    let mut ordered: Vec<usize> = (0..entries.len()).collect();
    ordered.sort_by(|&a, &b| by_score_desc(&entries[a], &entries[b]));

    let mut overall = vec![0; entries.len()];
    assign_ranks(entries, &ordered, &mut overall);

    // 按部门分组，组内沿用全局顺序
    let mut departments: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for &index in &ordered {
        departments
            .entry(entries[index].department_id)
            .or_default()
            .push(index);
    }

    let mut in_department = vec![0; entries.len()];
    for members in departments.values() {
        assign_ranks(entries, members, &mut in_department);
    }

    ordered
        .into_iter()
        .map(|index| RankingOutcome {
            employee_id: entries[index].employee_id,
            rank_overall: overall[index],
            rank_in_department: in_department[index],
            is_best_overall: overall[index] == 1,
            is_best_in_department: in_department[index] == 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(employee_id: i64, department_id: i64, weighted_score: f64) -> RankingEntry {
        RankingEntry {
            employee_id,
            department_id,
            weighted_score,
        }
    }

    fn find(outcomes: &[RankingOutcome], employee_id: i64) -> RankingOutcome {
        *outcomes
            .iter()
            .find(|o| o.employee_id == employee_id)
            .expect("employee ranked")
    }

    /// 与“1 + 严格更高分人数”的定义逐一对照
    fn naive_rank(entries: &[RankingEntry], target: &RankingEntry, same_department: bool) -> i32 {
        1 + entries
            .iter()
            .filter(|e| !same_department || e.department_id == target.department_id)
            .filter(|e| e.weighted_score > target.weighted_score)
            .count() as i32
    }

    #[test]
    fn test_tie_then_skip() {
        let outcomes = resolve_rankings(&[entry(1, 10, 4.5), entry(2, 10, 4.5), entry(3, 10, 4.0)]);
        assert_eq!(find(&outcomes, 1).rank_overall, 1);
        assert_eq!(find(&outcomes, 2).rank_overall, 1);
        assert_eq!(find(&outcomes, 3).rank_overall, 3);
    }

    #[test]
    fn test_multiple_best() {
        let outcomes = resolve_rankings(&[entry(1, 10, 4.8), entry(2, 20, 4.8), entry(3, 20, 3.2)]);
        assert!(find(&outcomes, 1).is_best_overall);
        assert!(find(&outcomes, 2).is_best_overall);
        assert!(!find(&outcomes, 3).is_best_overall);
    }

    #[test]
    fn test_department_scope() {
        let outcomes = resolve_rankings(&[
            entry(1, 10, 4.9),
            entry(2, 20, 4.1),
            entry(3, 20, 3.7),
            entry(4, 10, 2.5),
        ]);

        let second = find(&outcomes, 2);
        assert_eq!(second.rank_overall, 2);
        assert_eq!(second.rank_in_department, 1);
        assert!(second.is_best_in_department);
        assert!(!second.is_best_overall);

        let last = find(&outcomes, 4);
        assert_eq!(last.rank_overall, 4);
        assert_eq!(last.rank_in_department, 2);
    }

    #[test]
    fn test_department_ties_share_best() {
        let outcomes = resolve_rankings(&[entry(1, 30, 3.0), entry(2, 30, 3.0), entry(3, 30, 1.0)]);
        assert!(find(&outcomes, 1).is_best_in_department);
        assert!(find(&outcomes, 2).is_best_in_department);
        assert_eq!(find(&outcomes, 3).rank_in_department, 3);
    }

    #[test]
    fn test_matches_count_definition() {
        let entries = [
            entry(1, 1, 3.25),
            entry(2, 2, 4.0),
            entry(3, 1, 4.0),
            entry(4, 2, 1.5),
            entry(5, 1, 3.25),
            entry(6, 3, 4.0),
            entry(7, 2, 2.75),
            entry(8, 3, 3.25),
        ];
        let outcomes = resolve_rankings(&entries);
        assert_eq!(outcomes.len(), entries.len());

        for target in &entries {
            let outcome = find(&outcomes, target.employee_id);
            assert_eq!(outcome.rank_overall, naive_rank(&entries, target, false));
            assert_eq!(outcome.rank_in_department, naive_rank(&entries, target, true));
        }
    }

    #[test]
    fn test_output_ordered_by_rank() {
        let outcomes = resolve_rankings(&[entry(5, 1, 2.0), entry(3, 1, 4.0), entry(4, 1, 4.0)]);
        let ids: Vec<i64> = outcomes.iter().map(|o| o.employee_id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve_rankings(&[]).is_empty());
    }
}
