use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AlertSeverity, AlertType, RiskLevel};

// ---------------------------------------------------------------------------
// RiskAssessment
// ---------------------------------------------------------------------------

/// Which path produced a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Learned probability model.
    Model,
    /// Deterministic threshold score.
    Fallback,
}

/// Output of the risk scorer for one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub source: ScoreSource,
}

// ---------------------------------------------------------------------------
// AlertDecision
// ---------------------------------------------------------------------------

/// The evaluator's verdict for one reading. Persisting it is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    /// Human-readable message quoting the offending value(s).
    pub message: String,
}

// ---------------------------------------------------------------------------
// Backend status
// ---------------------------------------------------------------------------

/// Outcome of backend initialization, decided once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackendStatus {
    Model { name: String },
    Fallback { reason: String },
}

impl BackendStatus {
    pub fn is_fallback(&self) -> bool {
        matches!(self, BackendStatus::Fallback { .. })
    }
}

// ---------------------------------------------------------------------------
// ScoringError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model load failed ({0}): {1}")]
    ModelLoad(String, String),

    #[error("Model parse failed ({0}): {1}")]
    ModelParse(String, String),

    #[error("Feature count mismatch: expected {expected}, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("Inference failed: {0}")]
    Inference(String),
}

// ---------------------------------------------------------------------------
// ScoringBackend trait
// ---------------------------------------------------------------------------

/// A loaded probability model. Implementations are immutable after loading
/// and shared across request threads.
pub trait ScoringBackend: Send + Sync {
    /// Short identifier reported in health output.
    fn name(&self) -> &str;

    /// Scale a raw feature vector into the model's input space.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScoringError>;

    /// Probability of deterioration for already-scaled features.
    fn predict_probability(&self, scaled: &[f64]) -> Result<f64, ScoringError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_status_serializes_with_mode_tag() {
        let status = BackendStatus::Fallback {
            reason: "no model".into(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["mode"], "fallback");
        assert_eq!(json["reason"], "no model");
        assert!(status.is_fallback());
    }
}
