use crate::models::{AlertSeverity, AlertType, RiskLevel, VitalReading};

use super::messages::MessageTemplates;
use super::thresholds::{critical_findings, elevated_findings, ThresholdFinding};
use super::types::AlertDecision;

/// Decide whether a scored reading must raise an alert.
///
/// Rules are checked in a fixed priority order and the first match wins:
/// 1. hard critical thresholds (Critical), regardless of the model tier
/// 2. model tier `High` (High)
/// 3. elevated thresholds (Medium)
///
/// Returns `None` when nothing matches. At most one decision per reading.
pub fn evaluate(
    risk_level: RiskLevel,
    risk_score: f64,
    reading: &VitalReading,
) -> Option<AlertDecision> {
    if let Some(finding) = critical_findings(reading).into_iter().next() {
        return Some(decision(finding, AlertSeverity::Critical));
    }

    if risk_level == RiskLevel::High {
        return Some(AlertDecision {
            alert_type: AlertType::HighRisk,
            severity: AlertSeverity::High,
            message: MessageTemplates::high_risk(risk_score),
        });
    }

    elevated_findings(reading)
        .into_iter()
        .next()
        .map(|finding| decision(finding, AlertSeverity::Medium))
}

fn decision(finding: ThresholdFinding, severity: AlertSeverity) -> AlertDecision {
    AlertDecision {
        alert_type: finding.alert_type,
        severity,
        message: finding.message,
    }
}
