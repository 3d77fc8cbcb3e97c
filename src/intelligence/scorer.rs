use std::path::Path;

use crate::models::{RiskLevel, VitalField, VitalReading};

use super::backend::{LogisticBackend, FEATURE_COUNT};
use super::thresholds::{critical_findings, elevated_findings};
use super::types::{BackendStatus, RiskAssessment, ScoreSource, ScoringBackend, ScoringError};

/// Probability at or above which a reading is High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Probability at or above which a reading is Moderate risk.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.4;

/// Coarse fallback scores.
pub const FALLBACK_BASELINE_SCORE: f64 = 0.2;
pub const FALLBACK_MODERATE_SCORE: f64 = 0.5;
pub const FALLBACK_HIGH_SCORE: f64 = 0.8;

const LOW_RISK_RECOMMENDATIONS: &[&str] = &[
    "Your readings are within a healthy range. Keep up your current routine.",
    "Continue regular monitoring as scheduled.",
    "Maintain a balanced diet, regular activity and good sleep.",
];

const MODERATE_RISK_RECOMMENDATIONS: &[&str] = &[
    "Some readings need attention. Re-measure within the next few hours.",
    "Limit salt, caffeine and strenuous activity until readings settle.",
    "Take medication exactly as prescribed.",
    "Contact your care team if symptoms appear or readings rise further.",
];

const HIGH_RISK_RECOMMENDATIONS: &[&str] = &[
    "Your readings indicate elevated risk. Contact your care team today.",
    "Rest and avoid exertion until you have been reviewed.",
    "Seek emergency care if you have chest pain, breathlessness or confusion.",
    "Keep monitoring and record any new symptoms.",
];

/// Map a probability to its risk tier. Boundaries belong to the upper tier.
/// NaN compares false everywhere and lands in Low.
pub fn stratify(probability: f64) -> RiskLevel {
    if probability >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if probability >= MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Static advisory text for a tier.
pub fn recommendations_for(level: RiskLevel) -> Vec<String> {
    let lines = match level {
        RiskLevel::Low => LOW_RISK_RECOMMENDATIONS,
        RiskLevel::Moderate => MODERATE_RISK_RECOMMENDATIONS,
        RiskLevel::High => HIGH_RISK_RECOMMENDATIONS,
    };
    lines.iter().map(|s| s.to_string()).collect()
}

/// Raw feature vector in model order, absent fields replaced by baselines.
pub fn feature_vector(reading: &VitalReading) -> [f64; FEATURE_COUNT] {
    VitalField::ALL.map(|field| reading.value_or_default(field))
}

/// Deterministic threshold score used when no model is available.
///
/// Uses the evaluator's thresholds: any critical finding or two elevated
/// findings score high, a single elevated finding scores moderate.
pub fn fallback_score(reading: &VitalReading) -> f64 {
    if !critical_findings(reading).is_empty() {
        return FALLBACK_HIGH_SCORE;
    }
    match elevated_findings(reading).len() {
        0 => FALLBACK_BASELINE_SCORE,
        1 => FALLBACK_MODERATE_SCORE,
        _ => FALLBACK_HIGH_SCORE,
    }
}

/// Risk scorer with its backend chosen once at construction.
pub struct RiskScorer {
    backend: Option<Box<dyn ScoringBackend>>,
    status: BackendStatus,
}

impl RiskScorer {
    pub fn with_backend(backend: Box<dyn ScoringBackend>) -> Self {
        let status = BackendStatus::Model {
            name: backend.name().to_string(),
        };
        Self {
            backend: Some(backend),
            status,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            backend: None,
            status: BackendStatus::Fallback {
                reason: reason.into(),
            },
        }
    }

    /// Load the best available backend from `model_dir`.
    ///
    /// Never fails: when no model can be loaded the scorer is built in
    /// fallback mode and the reason is logged and kept in `backend_status`.
    pub fn initialize(model_dir: &Path) -> Self {
        match load_backend(model_dir) {
            Ok(backend) => {
                tracing::info!(backend = backend.name(), "Risk model ready");
                Self::with_backend(backend)
            }
            Err(e) => {
                tracing::warn!(
                    model_dir = %model_dir.display(),
                    error = %e,
                    "Risk model unavailable, using threshold fallback scorer"
                );
                Self::fallback(e.to_string())
            }
        }
    }

    pub fn backend_status(&self) -> &BackendStatus {
        &self.status
    }

    /// Score one reading. Total: backend errors degrade to the fallback score.
    pub fn score(&self, reading: &VitalReading) -> RiskAssessment {
        let (probability, source) = match &self.backend {
            Some(backend) => match predict(backend.as_ref(), reading) {
                Ok(p) => (p, ScoreSource::Model),
                Err(e) => {
                    tracing::warn!(
                        backend = backend.name(),
                        error = %e,
                        "Risk model prediction failed, using fallback score"
                    );
                    (fallback_score(reading), ScoreSource::Fallback)
                }
            },
            None => (fallback_score(reading), ScoreSource::Fallback),
        };

        let risk_score = round4(probability);
        let risk_level = stratify(risk_score);

        tracing::debug!(
            risk_score,
            risk_level = risk_level.as_str(),
            source = ?source,
            "Reading scored"
        );

        RiskAssessment {
            risk_score,
            risk_level,
            recommendations: recommendations_for(risk_level),
            source,
        }
    }
}

#[cfg(feature = "onnx-model")]
fn load_backend(model_dir: &Path) -> Result<Box<dyn ScoringBackend>, ScoringError> {
    match super::backend::OnnxBackend::load(model_dir) {
        Ok(backend) => Ok(Box::new(backend)),
        Err(e) => {
            tracing::info!(error = %e, "ONNX risk model not loaded, trying JSON model");
            Ok(Box::new(LogisticBackend::load(model_dir)?))
        }
    }
}

#[cfg(not(feature = "onnx-model"))]
fn load_backend(model_dir: &Path) -> Result<Box<dyn ScoringBackend>, ScoringError> {
    Ok(Box::new(LogisticBackend::load(model_dir)?))
}

fn predict(backend: &dyn ScoringBackend, reading: &VitalReading) -> Result<f64, ScoringError> {
    let scaled = backend.transform(&feature_vector(reading))?;
    let probability = backend.predict_probability(&scaled)?;
    if !probability.is_finite() {
        return Err(ScoringError::Inference(format!(
            "non-finite probability {probability}"
        )));
    }
    Ok(probability.clamp(0.0, 1.0))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::backend::tests::baseline_model_file;
    use crate::intelligence::backend::LOGISTIC_MODEL_FILE;
    use proptest::prelude::*;

    /// Backend returning a fixed probability, or an error.
    struct FixedBackend(Result<f64, ()>);

    impl ScoringBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScoringError> {
            Ok(features.to_vec())
        }

        fn predict_probability(&self, _scaled: &[f64]) -> Result<f64, ScoringError> {
            self.0
                .map_err(|_| ScoringError::Inference("backend offline".into()))
        }
    }

    fn elevated_bp_reading() -> VitalReading {
        VitalReading {
            blood_pressure_systolic: Some(165.0),
            blood_pressure_diastolic: Some(95.0),
            ..Default::default()
        }
    }

    #[test]
    fn stratify_boundaries_belong_to_upper_tier() {
        assert_eq!(stratify(0.0), RiskLevel::Low);
        assert_eq!(stratify(0.3999), RiskLevel::Low);
        assert_eq!(stratify(0.4), RiskLevel::Moderate);
        assert_eq!(stratify(0.6999), RiskLevel::Moderate);
        assert_eq!(stratify(0.7), RiskLevel::High);
        assert_eq!(stratify(1.0), RiskLevel::High);
        assert_eq!(stratify(f64::NAN), RiskLevel::Low);
    }

    proptest! {
        #[test]
        fn stratify_matches_thresholds(p in 0.0f64..=1.0) {
            let level = stratify(p);
            prop_assert_eq!(level == RiskLevel::High, p >= 0.7);
            prop_assert_eq!(level == RiskLevel::Moderate, (0.4..0.7).contains(&p));
            prop_assert_eq!(level == RiskLevel::Low, p < 0.4);
        }

        #[test]
        fn stratify_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(stratify(lo) <= stratify(hi));
        }

        #[test]
        fn fallback_is_deterministic(
            systolic in 80.0f64..220.0,
            spo2 in 80.0f64..100.0,
            heart_rate in 40.0f64..180.0,
        ) {
            let scorer = RiskScorer::fallback("test");
            let reading = VitalReading {
                blood_pressure_systolic: Some(systolic),
                oxygen_saturation: Some(spo2),
                heart_rate: Some(heart_rate),
                ..Default::default()
            };
            let first = scorer.score(&reading);
            let second = scorer.score(&reading);
            prop_assert_eq!(&first, &second);
            prop_assert!([0.2, 0.5, 0.8].contains(&first.risk_score));
        }
    }

    #[test]
    fn fallback_score_levels() {
        assert_eq!(fallback_score(&VitalReading::default()), 0.2);
        assert_eq!(fallback_score(&elevated_bp_reading()), 0.5);

        let two_elevated = VitalReading {
            heart_rate: Some(125.0),
            ..elevated_bp_reading()
        };
        assert_eq!(fallback_score(&two_elevated), 0.8);

        let crisis_diastolic_only = VitalReading {
            blood_pressure_diastolic: Some(122.0),
            ..Default::default()
        };
        assert_eq!(fallback_score(&crisis_diastolic_only), 0.8);
    }

    #[test]
    fn fallback_tiers_follow_stratification() {
        let scorer = RiskScorer::fallback("no model");
        assert_eq!(scorer.score(&VitalReading::default()).risk_level, RiskLevel::Low);
        assert_eq!(scorer.score(&elevated_bp_reading()).risk_level, RiskLevel::Moderate);
        let hypoxic = VitalReading {
            oxygen_saturation: Some(88.0),
            ..Default::default()
        };
        let assessment = scorer.score(&hypoxic);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.source, ScoreSource::Fallback);
    }

    #[test]
    fn model_probability_is_rounded_and_stratified() {
        let scorer = RiskScorer::with_backend(Box::new(FixedBackend(Ok(0.712_345))));
        let assessment = scorer.score(&VitalReading::default());
        assert_eq!(assessment.risk_score, 0.7123);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.source, ScoreSource::Model);
        assert_eq!(assessment.recommendations, recommendations_for(RiskLevel::High));
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        let scorer = RiskScorer::with_backend(Box::new(FixedBackend(Ok(1.7))));
        assert_eq!(scorer.score(&VitalReading::default()).risk_score, 1.0);
    }

    #[test]
    fn failing_backend_degrades_to_fallback() {
        let scorer = RiskScorer::with_backend(Box::new(FixedBackend(Err(()))));
        let assessment = scorer.score(&elevated_bp_reading());
        assert_eq!(assessment.risk_score, 0.5);
        assert_eq!(assessment.source, ScoreSource::Fallback);
        // The loaded backend is still reported; only this call degraded.
        assert!(!scorer.backend_status().is_fallback());
    }

    #[test]
    fn nan_probability_degrades_to_fallback() {
        let scorer = RiskScorer::with_backend(Box::new(FixedBackend(Ok(f64::NAN))));
        let assessment = scorer.score(&VitalReading::default());
        assert_eq!(assessment.risk_score, 0.2);
        assert_eq!(assessment.source, ScoreSource::Fallback);
    }

    #[test]
    fn initialize_without_model_selects_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let scorer = RiskScorer::initialize(dir.path());
        assert!(scorer.backend_status().is_fallback());
        assert_eq!(scorer.score(&VitalReading::default()).risk_score, 0.2);
    }

    #[test]
    fn initialize_loads_json_model() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::to_string(&baseline_model_file()).unwrap();
        std::fs::write(dir.path().join(LOGISTIC_MODEL_FILE), json).unwrap();

        let scorer = RiskScorer::initialize(dir.path());
        assert_eq!(
            scorer.backend_status(),
            &BackendStatus::Model {
                name: "logistic".into()
            }
        );

        let baseline = scorer.score(&VitalReading::default());
        assert_eq!(baseline.source, ScoreSource::Model);
        assert_eq!(baseline.risk_level, RiskLevel::Low);

        let unwell = VitalReading {
            heart_rate: Some(130.0),
            blood_pressure_systolic: Some(175.0),
            temperature: Some(39.5),
            oxygen_saturation: Some(91.0),
            ..Default::default()
        };
        assert!(scorer.score(&unwell).risk_score > baseline.risk_score);
    }

    #[test]
    fn feature_vector_fills_baselines() {
        let reading = VitalReading {
            heart_rate: Some(90.0),
            glucose: Some(150.0),
            ..Default::default()
        };
        let features = feature_vector(&reading);
        assert_eq!(features[0], 90.0);
        assert_eq!(features[1], 120.0);
        assert_eq!(features[5], 150.0);
    }

    #[test]
    fn every_tier_has_recommendations() {
        for level in RiskLevel::ALL {
            assert!(!recommendations_for(level).is_empty());
        }
    }
}
