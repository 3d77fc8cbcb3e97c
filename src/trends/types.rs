use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{RiskLevel, TrendDirection};

/// Order in which a batch of readings is handed to the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingOrder {
    /// As returned by the store: most recent first.
    NewestFirst,
    /// Chronological.
    OldestFirst,
}

/// Count of readings per risk tier. Every tier is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Moderate => self.moderate += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.moderate + self.high
    }
}

/// Longitudinal summary of a patient's recent readings.
///
/// Recomputed on every request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub patient_id: String,
    pub total_readings: usize,
    pub risk_distribution: RiskDistribution,
    /// Mean per vital field plus `risk_score`, rounded to 2 places.
    /// `None` when no reading carried the value.
    pub averages: BTreeMap<String, Option<f64>>,
    /// Last three scored readings strictly increasing in risk.
    pub deteriorating: bool,
    /// Direction of the risk score between the earlier and later half.
    pub trend_direction: TrendDirection,
    /// Direction per vital field, with that field's polarity applied.
    pub field_trends: BTreeMap<String, TrendDirection>,
    pub latest_risk_level: Option<RiskLevel>,
}
