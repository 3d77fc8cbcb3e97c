use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::VitalField;

use super::types::{ScoringBackend, ScoringError};

/// File name of the JSON logistic model inside the model directory.
pub const LOGISTIC_MODEL_FILE: &str = "risk_model.json";

/// Number of features every backend receives, in `VitalField::ALL` order.
pub const FEATURE_COUNT: usize = VitalField::ALL.len();

// ═══════════════════════════════════════════════════════════
// Standard scaler
// ═══════════════════════════════════════════════════════════

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn apply(&self, features: &[f64]) -> Result<Vec<f64>, ScoringError> {
        if features.len() != self.mean.len() || features.len() != self.scale.len() {
            return Err(ScoringError::FeatureMismatch {
                expected: self.mean.len(),
                got: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // A constant training column has zero variance; leave it centered only.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }

    fn validate(&self, expected: usize) -> Result<(), ScoringError> {
        for len in [self.mean.len(), self.scale.len()] {
            if len != expected {
                return Err(ScoringError::FeatureMismatch { expected, got: len });
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Logistic regression backend (JSON export)
// ═══════════════════════════════════════════════════════════

/// On-disk layout of `risk_model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModelFile {
    pub feature_names: Vec<String>,
    pub scaler: StandardScaler,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Logistic regression exported as plain coefficients.
pub struct LogisticBackend {
    scaler: StandardScaler,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticBackend {
    /// Load `risk_model.json` from the model directory.
    pub fn load(model_dir: &Path) -> Result<Self, ScoringError> {
        let path = model_dir.join(LOGISTIC_MODEL_FILE);
        if !path.exists() {
            return Err(ScoringError::ModelNotFound(path));
        }

        let json = std::fs::read_to_string(&path).map_err(|e| {
            ScoringError::ModelLoad(path.display().to_string(), e.to_string())
        })?;
        let file: LogisticModelFile = serde_json::from_str(&json).map_err(|e| {
            ScoringError::ModelParse(LOGISTIC_MODEL_FILE.into(), e.to_string())
        })?;

        let backend = Self::from_model_file(file)?;
        tracing::info!("Logistic risk model loaded from {}", path.display());
        Ok(backend)
    }

    /// Build from an already-parsed model file, checking that its feature
    /// layout matches the one this crate assembles.
    pub fn from_model_file(file: LogisticModelFile) -> Result<Self, ScoringError> {
        let expected: Vec<&str> = VitalField::ALL.iter().map(|f| f.as_str()).collect();
        if file.feature_names.len() != FEATURE_COUNT {
            return Err(ScoringError::FeatureMismatch {
                expected: FEATURE_COUNT,
                got: file.feature_names.len(),
            });
        }
        if file.feature_names.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(ScoringError::ModelParse(
                LOGISTIC_MODEL_FILE.into(),
                format!(
                    "feature order {:?} does not match {:?}",
                    file.feature_names, expected
                ),
            ));
        }
        file.scaler.validate(FEATURE_COUNT)?;
        if file.coefficients.len() != FEATURE_COUNT {
            return Err(ScoringError::FeatureMismatch {
                expected: FEATURE_COUNT,
                got: file.coefficients.len(),
            });
        }

        Ok(Self {
            scaler: file.scaler,
            coefficients: file.coefficients,
            intercept: file.intercept,
        })
    }
}

impl ScoringBackend for LogisticBackend {
    fn name(&self) -> &str {
        "logistic"
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScoringError> {
        self.scaler.apply(features)
    }

    fn predict_probability(&self, scaled: &[f64]) -> Result<f64, ScoringError> {
        if scaled.len() != self.coefficients.len() {
            return Err(ScoringError::FeatureMismatch {
                expected: self.coefficients.len(),
                got: scaled.len(),
            });
        }
        let logit: f64 = self
            .coefficients
            .iter()
            .zip(scaled)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}

/// Index of the probability tensor in a converted scikit-learn classifier
/// (output 0 is the predicted label).
const PROBABILITY_OUTPUT: usize = 1;

/// Position of the probability tensor, or an inference error when the
/// graph has too few outputs (regressors, stripped exports).
#[cfg_attr(not(feature = "onnx-model"), allow(dead_code))]
fn probability_output_index(output_count: usize) -> Result<usize, ScoringError> {
    if output_count <= PROBABILITY_OUTPUT {
        return Err(ScoringError::Inference(format!(
            "model has {output_count} output(s), expected a probability tensor at index {PROBABILITY_OUTPUT}"
        )));
    }
    Ok(PROBABILITY_OUTPUT)
}

// ═══════════════════════════════════════════════════════════
// ONNX backend (`onnx-model` feature)
// ═══════════════════════════════════════════════════════════

#[cfg(feature = "onnx-model")]
mod onnx {
    use super::{
        probability_output_index, ScoringBackend, ScoringError, StandardScaler, FEATURE_COUNT,
    };
    use ort::session::Session;
    use std::path::Path;
    use std::sync::Mutex;

    pub const ONNX_MODEL_FILE: &str = "risk_model.onnx";
    pub const SCALER_FILE: &str = "scaler.json";

    /// Classifier exported to ONNX, with its scaler stored alongside as JSON.
    ///
    /// `Session::run` takes `&mut self`; the mutex serializes inference behind `&self`.
    pub struct OnnxBackend {
        session: Mutex<Session>,
        scaler: StandardScaler,
    }

    impl OnnxBackend {
        /// Load the ONNX classifier from a directory.
        ///
        /// `model_dir` must contain `risk_model.onnx` and `scaler.json`.
        pub fn load(model_dir: &Path) -> Result<Self, ScoringError> {
            let model_path = model_dir.join(ONNX_MODEL_FILE);
            let scaler_path = model_dir.join(SCALER_FILE);

            if !model_path.exists() {
                return Err(ScoringError::ModelNotFound(model_path));
            }
            if !scaler_path.exists() {
                return Err(ScoringError::ModelNotFound(scaler_path));
            }

            let scaler_json = std::fs::read_to_string(&scaler_path).map_err(|e| {
                ScoringError::ModelLoad(scaler_path.display().to_string(), e.to_string())
            })?;
            let scaler: StandardScaler = serde_json::from_str(&scaler_json)
                .map_err(|e| ScoringError::ModelParse(SCALER_FILE.into(), e.to_string()))?;
            scaler.validate(FEATURE_COUNT)?;

            let session = Session::builder()
                .map_err(|e: ort::Error| ScoringError::ModelLoad(ONNX_MODEL_FILE.into(), e.to_string()))?
                .with_intra_threads(1)
                .map_err(|e: ort::Error| ScoringError::ModelLoad(ONNX_MODEL_FILE.into(), e.to_string()))?
                .commit_from_file(&model_path)
                .map_err(|e: ort::Error| {
                    ScoringError::ModelLoad(ONNX_MODEL_FILE.into(), format!("ONNX load failed: {e}"))
                })?;

            tracing::info!("ONNX risk model loaded from {}", model_dir.display());

            Ok(Self {
                session: Mutex::new(session),
                scaler,
            })
        }
    }

    impl ScoringBackend for OnnxBackend {
        fn name(&self) -> &str {
            "onnx"
        }

        fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScoringError> {
            self.scaler.apply(features)
        }

        fn predict_probability(&self, scaled: &[f64]) -> Result<f64, ScoringError> {
            use ort::value::TensorRef;

            let input: Vec<f32> = scaled.iter().map(|&v| v as f32).collect();
            let array = ndarray::Array2::from_shape_vec((1, input.len()), input)
                .map_err(|e| ScoringError::Inference(e.to_string()))?;
            let tensor = TensorRef::from_array_view(&array)
                .map_err(|e| ScoringError::Inference(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| ScoringError::Inference("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| ScoringError::Inference(format!("ONNX inference failed: {e}")))?;

            let index = probability_output_index(outputs.len())?;

            // Shape [1, 2]: [P(negative), P(positive)]
            let (_shape, probabilities) = outputs[index]
                .try_extract_tensor::<f32>()
                .map_err(|e| ScoringError::Inference(format!("Output extraction: {e}")))?;

            probabilities
                .get(1)
                .or_else(|| probabilities.first())
                .map(|&p| f64::from(p))
                .ok_or_else(|| ScoringError::Inference("Empty probability output".to_string()))
        }
    }
}

#[cfg(feature = "onnx-model")]
pub use onnx::OnnxBackend;
