use std::collections::HashSet;

use crate::engine::{MAX_SCORE, MIN_SCORE};
use crate::models::evaluations::requests::SubmitEvaluationRequest;

/// 单条评语最大字符数
pub const MAX_COMMENT_CHARS: usize = 2000;

pub fn validate_score(score: i32) -> Result<(), &'static str> {
    // 打分范围校验：1 <= x <= 5
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err("Score must be between 1 and 5");
    }
    Ok(())
}

pub fn validate_comment(comment: Option<&str>) -> Result<(), &'static str> {
    if let Some(text) = comment
        && text.chars().count() > MAX_COMMENT_CHARS
    {
        return Err("Comment must not exceed 2000 characters");
    }
    Ok(())
}

/// 评估提交校验结果
#[derive(Debug, Clone)]
pub struct SubmissionValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl SubmissionValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 校验评估提交的结构合法性（不访问数据库）
///
/// 规则：
/// - 至少包含一个指标打分
/// - 每个打分在 1..=5 之间
/// - 同一次提交中指标不可重复
/// - 评语长度不超过上限
pub fn validate_submission(req: &SubmitEvaluationRequest) -> SubmissionValidationResult {
    let mut errors = Vec::new();

    // 1. 指标列表不能为空
    if req.scores.is_empty() {
        errors.push("At least one criterion score is required".to_string());
    }

    let mut seen = HashSet::new();
    for item in &req.scores {
        // 2. 打分范围
        if let Err(msg) = validate_score(item.score) {
            errors.push(format!("criterion {}: {msg}", item.criterion_id));
        }

        // 3. 指标重复
        if !seen.insert(item.criterion_id) {
            errors.push(format!(
                "criterion {}: duplicated in one submission",
                item.criterion_id
            ));
        }

        // 4. 评语长度
        if let Err(msg) = validate_comment(item.comment.as_deref()) {
            errors.push(format!("criterion {}: {msg}", item.criterion_id));
        }
    }

    SubmissionValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的提交校验（返回 Result）
pub fn validate_submission_simple(req: &SubmitEvaluationRequest) -> Result<(), String> {
    let result = validate_submission(req);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}
