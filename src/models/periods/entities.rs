use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 周期类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub enum PeriodType {
    Quarterly,
    Annual,
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodType::Quarterly => write!(f, "quarterly"),
            PeriodType::Annual => write!(f, "annual"),
        }
    }
}

impl std::str::FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarterly" => Ok(PeriodType::Quarterly),
            "annual" => Ok(PeriodType::Annual),
            _ => Err(format!("Invalid period type: {s}")),
        }
    }
}

/// 评估周期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct EvaluationPeriod {
    pub id: i64,
    pub name: String,
    pub period_type: PeriodType,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub is_active: bool,
}
