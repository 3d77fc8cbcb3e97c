use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "VitalWatch";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of readings returned by the history endpoint.
pub const HISTORY_LIMIT: usize = 30;
/// Default number of alerts returned by the cross-patient alert feed.
pub const RECENT_ALERTS_LIMIT: usize = 50;
/// Readings fed to the trend analyzer.
pub const ANALYTICS_WINDOW: usize = 90;

pub const BIND_ENV: &str = "VITALWATCH_BIND";
pub const MODEL_DIR_ENV: &str = "VITALWATCH_MODEL_DIR";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "vitalwatch=info,tower_http=info"
}

/// Get the application data directory
/// ~/VitalWatch/ on all platforms, or ./VitalWatch when no home is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the models directory (risk_model.json / risk_model.onnx + scaler.json)
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var} value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub model_dir: PathBuf,
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: BIND_ENV,
                value: bind.clone(),
                reason: e.to_string(),
            })?;

        let model_dir = lookup(MODEL_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(models_dir);

        Ok(Self {
            bind_addr,
            model_dir,
        })
    }
}
