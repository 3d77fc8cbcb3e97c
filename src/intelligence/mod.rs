//! Risk scoring and alert evaluation.
//!
//! `RiskScorer` turns a reading into a probability and tier, `evaluate`
//! turns a scored reading into at most one alert decision. Both are pure:
//! persistence belongs to the monitoring service.

pub mod backend;
pub mod evaluator;
pub mod messages;
pub mod scorer;
pub mod thresholds;
pub mod types;

pub use evaluator::evaluate;
pub use scorer::{fallback_score, stratify, RiskScorer};
pub use types::{
    AlertDecision, BackendStatus, RiskAssessment, ScoreSource, ScoringBackend, ScoringError,
};
