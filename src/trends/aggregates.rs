use std::collections::BTreeMap;

use crate::models::{ScoredReading, VitalField};

use super::types::RiskDistribution;

/// Key under which the mean risk score is reported next to the vital fields.
pub const RISK_SCORE_KEY: &str = "risk_score";

/// Number of trailing readings inspected by the deterioration flag.
pub const DETERIORATION_WINDOW: usize = 3;

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Present values of one field, in the order given.
pub(crate) fn field_values(readings: &[&ScoredReading], field: VitalField) -> Vec<f64> {
    readings.iter().filter_map(|r| r.vitals.get(field)).collect()
}

pub(crate) fn risk_scores(readings: &[&ScoredReading]) -> Vec<f64> {
    readings.iter().filter_map(|r| r.risk_score).collect()
}

/// Per-field means over present values only.
pub fn averages(readings: &[&ScoredReading]) -> BTreeMap<String, Option<f64>> {
    let mut out: BTreeMap<String, Option<f64>> = VitalField::ALL
        .iter()
        .map(|&field| {
            let avg = mean(&field_values(readings, field)).map(round2);
            (field.as_str().to_string(), avg)
        })
        .collect();
    out.insert(
        RISK_SCORE_KEY.to_string(),
        mean(&risk_scores(readings)).map(round2),
    );
    out
}

/// Tier counts. Unscored readings are not counted.
pub fn risk_distribution(readings: &[&ScoredReading]) -> RiskDistribution {
    let mut dist = RiskDistribution::default();
    for level in readings.iter().filter_map(|r| r.risk_level) {
        dist.record(level);
    }
    dist
}

/// True when the last three chronological readings are all scored and
/// their scores strictly increase.
pub fn is_deteriorating(chronological: &[&ScoredReading]) -> bool {
    if chronological.len() < DETERIORATION_WINDOW {
        return false;
    }
    let tail = &chronological[chronological.len() - DETERIORATION_WINDOW..];
    let scores: Option<Vec<f64>> = tail.iter().map(|r| r.risk_score).collect();
    match scores {
        Some(scores) => scores.windows(2).all(|w| w[0] < w[1]),
        None => false,
    }
}
