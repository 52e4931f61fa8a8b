//! 加权平均聚合（Simple Additive Weighting）
//!
//! weighted = Σ(score × weight) / Σweight，分母使用实际出现的指标权重之和，
//! 因此只评了部分指标、或启用指标权重和不为 100 时结果依然可比。

/// 参与聚合的一条打分，权重取计算时刻的当前值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionScore {
    pub criterion_id: i64,
    pub score: i32,
    pub weight: f64,
}

/// 聚合结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedScore {
    /// 原始分简单求和（不随覆盖指标数归一化，仅作参考）
    pub total_score: f64,
    /// 加权平均分，与单项打分同为 1..5 量纲
    pub weighted_score: f64,
    pub evaluation_count: usize,
}

/// 持久化前保留的小数位数
const SCORE_DECIMALS: i32 = 4;

/// 对分数做定点舍入，排名比较的是持久化后的值
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}

/// 聚合一个 (员工, 周期) 的全部打分
///
/// 没有任何打分时返回 `None`：调用方应跳过快照，而不是写入 0 分。
pub fn aggregate(scores: &[CriterionScore]) -> Option<AggregatedScore> {
    if scores.is_empty() {
        return None;
    }

    let mut total_score = 0.0;
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for item in scores {
        let score = f64::from(item.score);
        total_score += score;
        weighted_sum += score * item.weight;
        weight_sum += item.weight;
    }

    let weighted_score = if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    };

    Some(AggregatedScore {
        total_score,
        weighted_score: round_score(weighted_score),
        evaluation_count: scores.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(criterion_id: i64, score: i32, weight: f64) -> CriterionScore {
        CriterionScore {
            criterion_id,
            score,
            weight,
        }
    }

    #[test]
    fn test_weighted_mean() {
        let result = aggregate(&[score(1, 5, 40.0), score(2, 3, 30.0), score(3, 4, 30.0)])
            .expect("scores present");
        assert_eq!(result.weighted_score, 4.1);
        assert_eq!(result.total_score, 12.0);
        assert_eq!(result.evaluation_count, 3);
    }

    #[test]
    fn test_partial_criteria_uses_present_weights() {
        // 只评了 40 与 30 两项：(5*40 + 3*30) / 70
        let result = aggregate(&[score(1, 5, 40.0), score(2, 3, 30.0)]).expect("scores present");
        assert_eq!(result.weighted_score, round_score(290.0 / 70.0));
        assert_eq!(result.weighted_score, 4.1429);
    }

    #[test]
    fn test_weights_not_summing_to_hundred() {
        let result = aggregate(&[score(1, 4, 1.0), score(2, 2, 1.0)]).expect("scores present");
        assert_eq!(result.weighted_score, 3.0);
    }

    #[test]
    fn test_no_data_is_none() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_zero_weight_sum_yields_zero() {
        let result = aggregate(&[score(1, 5, 0.0)]).expect("scores present");
        assert_eq!(result.weighted_score, 0.0);
        assert_eq!(result.total_score, 5.0);
    }

    #[test]
    fn test_multiple_evaluators_same_criterion() {
        // 两位评估人对同一指标各打一次分，均计入
        let result = aggregate(&[score(1, 5, 50.0), score(1, 3, 50.0), score(2, 4, 50.0)])
            .expect("scores present");
        assert_eq!(result.weighted_score, 4.0);
        assert_eq!(result.total_score, 12.0);
    }

    #[test]
    fn test_rounding_merges_close_scores_into_one_tie() {
        use crate::engine::ranking::{RankingEntry, resolve_rankings};

        // 13/3 与 4.3333 在第 4 位小数之后才不同
        let first = aggregate(&[score(1, 5, 1.0), score(2, 4, 2.0)]).expect("scores present");
        let second =
            aggregate(&[score(1, 5, 3333.0), score(2, 4, 6667.0)]).expect("scores present");
        assert_ne!(13.0 / 3.0, 4.3333);
        assert_eq!(first.weighted_score, 4.3333);
        assert_eq!(second.weighted_score, 4.3333);

        let outcomes = resolve_rankings(&[
            RankingEntry {
                employee_id: 1,
                department_id: 1,
                weighted_score: first.weighted_score,
            },
            RankingEntry {
                employee_id: 2,
                department_id: 1,
                weighted_score: second.weighted_score,
            },
        ]);
        assert!(outcomes.iter().all(|o| o.rank_overall == 1 && o.is_best_overall));
    }
}
