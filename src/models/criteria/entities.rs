use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 评估指标
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct Criterion {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    // 权重（百分点），启用指标的权重之和通常为 100，但引擎不依赖这一点
    pub weight: f64,
    pub is_active: bool,
}
