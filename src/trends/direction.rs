use crate::models::{ScoredReading, TrendDirection, VitalField};

/// Minimum number of readings before a direction is reported.
pub const MIN_TREND_READINGS: usize = 4;
/// Absolute change in mean risk score that counts as movement.
pub const RISK_TREND_THRESHOLD: f64 = 0.05;
/// Change in a vital field's mean, relative to the earlier half, that counts as movement.
pub const FIELD_TREND_RELATIVE_THRESHOLD: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Rising,
    Falling,
    Flat,
}

fn half_mean(
    half: &[&ScoredReading],
    value: &impl Fn(&ScoredReading) -> Option<f64>,
) -> Option<f64> {
    let present: Vec<f64> = half.iter().filter_map(|&r| value(r)).collect();
    super::aggregates::mean(&present)
}

/// Compare the mean of the earlier half of the readings against the later half.
///
/// The readings are split at `len / 2` before absent values are dropped, so
/// the later half gets the odd reading. `None` when there are fewer than
/// `MIN_TREND_READINGS` readings or either half has no value.
fn half_movement(
    readings: &[&ScoredReading],
    value: impl Fn(&ScoredReading) -> Option<f64>,
    threshold: impl Fn(f64) -> f64,
) -> Option<Movement> {
    if readings.len() < MIN_TREND_READINGS {
        return None;
    }
    let (earlier, later) = readings.split_at(readings.len() / 2);
    let earlier_mean = half_mean(earlier, &value)?;
    let later_mean = half_mean(later, &value)?;

    let delta = later_mean - earlier_mean;
    let limit = threshold(earlier_mean);
    Some(if delta > limit {
        Movement::Rising
    } else if delta < -limit {
        Movement::Falling
    } else {
        Movement::Flat
    })
}

fn classify(movement: Option<Movement>, higher_is_worse: bool) -> TrendDirection {
    match (movement, higher_is_worse) {
        (None, _) => TrendDirection::InsufficientData,
        (Some(Movement::Flat), _) => TrendDirection::Stable,
        (Some(Movement::Rising), true) | (Some(Movement::Falling), false) => {
            TrendDirection::Worsening
        }
        (Some(Movement::Rising), false) | (Some(Movement::Falling), true) => {
            TrendDirection::Improving
        }
    }
}

/// Direction of the risk score over chronological readings. A rising score is worsening.
pub fn risk_trend(chronological: &[&ScoredReading]) -> TrendDirection {
    let movement = half_movement(chronological, |r| r.risk_score, |_| RISK_TREND_THRESHOLD);
    classify(movement, true)
}

/// Direction of one vital field over chronological readings, with its polarity.
pub fn field_trend(field: VitalField, chronological: &[&ScoredReading]) -> TrendDirection {
    let movement = half_movement(
        chronological,
        |r| r.vitals.get(field),
        |earlier| earlier.abs() * FIELD_TREND_RELATIVE_THRESHOLD,
    );
    classify(movement, field.higher_is_worse())
}
