//! Longitudinal trend analysis over a patient's scored readings.
//!
//! Pure functions over an in-memory batch; the caller fetches the batch.

pub mod aggregates;
pub mod direction;
pub mod types;

use std::collections::BTreeMap;

use crate::models::{ScoredReading, VitalField};

pub use types::{ReadingOrder, RiskDistribution, TrendReport};

/// Summarize a batch of readings for one patient.
///
/// Newest-first input is reversed before any computation so every
/// window and half split runs in chronological order.
pub fn analyze(patient_id: &str, readings: &[ScoredReading], order: ReadingOrder) -> TrendReport {
    let mut chronological: Vec<&ScoredReading> = readings.iter().collect();
    if order == ReadingOrder::NewestFirst {
        chronological.reverse();
    }

    let field_trends: BTreeMap<String, _> = VitalField::ALL
        .iter()
        .map(|&field| {
            (
                field.as_str().to_string(),
                direction::field_trend(field, &chronological),
            )
        })
        .collect();

    let report = TrendReport {
        patient_id: patient_id.to_string(),
        total_readings: chronological.len(),
        risk_distribution: aggregates::risk_distribution(&chronological),
        averages: aggregates::averages(&chronological),
        deteriorating: aggregates::is_deteriorating(&chronological),
        trend_direction: direction::risk_trend(&chronological),
        field_trends,
        latest_risk_level: chronological.last().and_then(|r| r.risk_level),
    };

    tracing::debug!(
        patient_id,
        total_readings = report.total_readings,
        deteriorating = report.deteriorating,
        trend = report.trend_direction.as_str(),
        "Trend analysis computed"
    );

    report
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::intelligence::stratify;
    use crate::models::{RiskLevel, TrendDirection, VitalReading};

    /// Chronological readings with the given risk scores, one hour apart.
    fn scored_series(scores: &[f64]) -> Vec<ScoredReading> {
        let start = Utc::now() - Duration::hours(scores.len() as i64);
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoredReading {
                id: Uuid::new_v4(),
                patient_id: "patient-1".into(),
                vitals: VitalReading {
                    heart_rate: Some(70.0 + i as f64),
                    ..Default::default()
                },
                risk_score: Some(score),
                risk_level: Some(stratify(score)),
                recorded_at: start + Duration::hours(i as i64),
            })
            .collect()
    }

    fn newest_first(mut readings: Vec<ScoredReading>) -> Vec<ScoredReading> {
        readings.reverse();
        readings
    }

    #[test]
    fn empty_history_yields_empty_report() {
        let report = analyze("patient-1", &[], ReadingOrder::NewestFirst);
        assert_eq!(report.total_readings, 0);
        assert_eq!(report.risk_distribution, RiskDistribution::default());
        assert!(report.averages.values().all(|v| v.is_none()));
        assert_eq!(report.averages.len(), VitalField::ALL.len() + 1);
        assert!(!report.deteriorating);
        assert_eq!(report.trend_direction, TrendDirection::InsufficientData);
        assert!(report
            .field_trends
            .values()
            .all(|t| *t == TrendDirection::InsufficientData));
        assert_eq!(report.latest_risk_level, None);
    }

    #[test]
    fn increasing_tail_is_deteriorating() {
        let rising = scored_series(&[0.2, 0.5, 0.8]);
        assert!(analyze("p", &rising, ReadingOrder::OldestFirst).deteriorating);

        let falling = scored_series(&[0.8, 0.5, 0.2]);
        assert!(!analyze("p", &falling, ReadingOrder::OldestFirst).deteriorating);
    }

    #[test]
    fn newest_first_input_is_reversed() {
        let rising = newest_first(scored_series(&[0.2, 0.5, 0.8]));
        let report = analyze("p", &rising, ReadingOrder::NewestFirst);
        assert!(report.deteriorating);
        assert_eq!(report.latest_risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn plateau_is_not_deteriorating() {
        let flat = scored_series(&[0.3, 0.5, 0.5]);
        assert!(!analyze("p", &flat, ReadingOrder::OldestFirst).deteriorating);
    }

    #[test]
    fn unscored_reading_in_tail_blocks_deterioration() {
        let mut readings = scored_series(&[0.2, 0.5, 0.8]);
        readings[1].risk_score = None;
        readings[1].risk_level = None;
        let report = analyze("p", &readings, ReadingOrder::OldestFirst);
        assert!(!report.deteriorating);
        assert_eq!(report.risk_distribution.total(), 2);
    }

    #[test]
    fn jump_in_risk_is_worsening() {
        let readings = newest_first(scored_series(&[0.1, 0.1, 0.9, 0.9]));
        let report = analyze("p", &readings, ReadingOrder::NewestFirst);
        assert_eq!(report.trend_direction, TrendDirection::Worsening);
        assert_eq!(report.risk_distribution.low, 2);
        assert_eq!(report.risk_distribution.moderate, 0);
        assert_eq!(report.risk_distribution.high, 2);
        assert_eq!(report.averages[aggregates::RISK_SCORE_KEY], Some(0.5));
    }

    #[test]
    fn sparse_field_averages_present_values_only() {
        let mut readings = scored_series(&[0.2, 0.2, 0.2, 0.2, 0.2]);
        readings[1].vitals.glucose = Some(10.0);
        readings[3].vitals.glucose = Some(20.0);
        let report = analyze("p", &readings, ReadingOrder::OldestFirst);
        assert_eq!(report.averages["glucose"], Some(15.0));
        assert_eq!(report.averages["cholesterol"], None);
        // Halves are [10, -] and [-, 20, -]: each keeps one glucose value.
        assert_eq!(report.field_trends["glucose"], TrendDirection::Worsening);
    }

    #[test]
    fn unscored_readings_keep_their_place_in_the_halves() {
        let mut readings = scored_series(&[0.1, 0.5, 0.9, 0.9]);
        readings[1].risk_score = None;
        readings[1].risk_level = None;
        let report = analyze("p", &readings, ReadingOrder::OldestFirst);
        assert_eq!(report.total_readings, 4);
        assert_eq!(report.trend_direction, TrendDirection::Worsening);

        readings[0].risk_score = None;
        let report = analyze("p", &readings, ReadingOrder::OldestFirst);
        assert_eq!(report.trend_direction, TrendDirection::InsufficientData);
    }

    #[test]
    fn averages_round_to_two_places() {
        let mut readings = scored_series(&[0.1, 0.2, 0.2]);
        readings[0].vitals.temperature = Some(36.6);
        readings[1].vitals.temperature = Some(36.7);
        readings[2].vitals.temperature = Some(36.75);
        let report = analyze("p", &readings, ReadingOrder::OldestFirst);
        assert_eq!(report.averages["temperature"], Some(36.68));
        assert_eq!(report.averages[aggregates::RISK_SCORE_KEY], Some(0.17));
    }

    #[test]
    fn field_trends_follow_polarity() {
        let mut readings = scored_series(&[0.3, 0.3, 0.3, 0.3]);
        for (reading, spo2) in readings.iter_mut().zip([98.0, 98.0, 92.0, 91.0]) {
            reading.vitals.oxygen_saturation = Some(spo2);
        }
        let report = analyze("p", &readings, ReadingOrder::OldestFirst);
        assert_eq!(report.trend_direction, TrendDirection::Stable);
        assert_eq!(
            report.field_trends["oxygen_saturation"],
            TrendDirection::Worsening
        );
        // heart_rate 70, 71, 72, 73: +2 bpm exceeds 2% of 70.5
        assert_eq!(report.field_trends["heart_rate"], TrendDirection::Worsening);
        assert_eq!(report.field_trends["glucose"], TrendDirection::InsufficientData);
    }

    #[test]
    fn report_serializes_with_boundary_casing() {
        let report = analyze("p", &scored_series(&[0.1]), ReadingOrder::OldestFirst);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["trend_direction"], "Insufficient data");
        assert_eq!(json["latest_risk_level"], "low");
        assert_eq!(json["risk_distribution"]["moderate"], 0);
        assert!(json["averages"]["glucose"].is_null());
    }
}
