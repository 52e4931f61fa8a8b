pub mod evaluations;
pub mod health;
pub mod scores;

pub use evaluations::EvaluationService;
pub use health::HealthService;
pub use scores::ScoreService;
