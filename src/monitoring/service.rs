use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::intelligence::{evaluate, RiskScorer, ScoreSource};
use crate::models::{Alert, ScoredReading, VitalReading};
use crate::trends::{analyze, ReadingOrder, TrendReport};

use super::store::{StoreError, VitalsStore};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Alert not found: {0}")]
    AlertNotFound(Uuid),

    #[error("Invalid patient id: {0:?}")]
    InvalidPatientId(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of submitting one reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    #[serde(flatten)]
    pub reading: ScoredReading,
    pub recommendations: Vec<String>,
    pub score_source: ScoreSource,
    pub alert_triggered: bool,
    pub alert: Option<Alert>,
    /// False only when an alert was raised but could not be stored.
    pub alert_persisted: bool,
}

/// Scores, stores and alerts on readings; serves history and analytics.
pub struct MonitoringService {
    scorer: Arc<RiskScorer>,
    store: Arc<dyn VitalsStore>,
}

impl MonitoringService {
    pub fn new(scorer: Arc<RiskScorer>, store: Arc<dyn VitalsStore>) -> Self {
        Self { scorer, store }
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn submit_vitals(
        &self,
        patient_id: &str,
        vitals: VitalReading,
    ) -> Result<SubmissionOutcome, ServiceError> {
        self.submit_vitals_at(patient_id, vitals, Utc::now())
    }

    /// Score a reading, persist it, and raise at most one alert.
    ///
    /// A failed reading write is an error. A failed alert write is not:
    /// the alert is logged and returned in memory with `alert_persisted`
    /// set to false.
    pub fn submit_vitals_at(
        &self,
        patient_id: &str,
        vitals: VitalReading,
        recorded_at: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, ServiceError> {
        let patient_id = validate_patient_id(patient_id)?;
        let assessment = self.scorer.score(&vitals);

        let reading = ScoredReading {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            vitals,
            risk_score: Some(assessment.risk_score),
            risk_level: Some(assessment.risk_level),
            recorded_at,
        };
        self.store.insert_reading(&reading)?;

        tracing::info!(
            patient_id,
            vital_id = %reading.id,
            risk_score = assessment.risk_score,
            risk_level = assessment.risk_level.as_str(),
            "Vitals recorded"
        );

        let decision = evaluate(assessment.risk_level, assessment.risk_score, &reading.vitals);
        let mut alert_persisted = true;
        let alert = decision.map(|decision| {
            let alert = Alert {
                id: Uuid::new_v4(),
                patient_id: patient_id.to_string(),
                vital_id: Some(reading.id),
                alert_type: decision.alert_type,
                severity: decision.severity,
                message: decision.message,
                acknowledged: false,
                acknowledged_at: None,
                created_at: recorded_at,
            };

            tracing::warn!(
                patient_id,
                alert_id = %alert.id,
                alert_type = alert.alert_type.as_str(),
                severity = alert.severity.as_str(),
                "Alert raised"
            );

            if let Err(e) = self.store.insert_alert(&alert) {
                tracing::error!(
                    patient_id,
                    alert_id = %alert.id,
                    error = %e,
                    "Failed to persist alert, returning unsaved record"
                );
                alert_persisted = false;
            }
            alert
        });

        Ok(SubmissionOutcome {
            reading,
            recommendations: assessment.recommendations,
            score_source: assessment.source,
            alert_triggered: alert.is_some(),
            alert,
            alert_persisted,
        })
    }

    /// Most recent readings, newest first.
    pub fn vital_history(
        &self,
        patient_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredReading>, ServiceError> {
        let patient_id = validate_patient_id(patient_id)?;
        let limit = limit.unwrap_or(config::HISTORY_LIMIT);
        Ok(self.store.readings_for_patient(patient_id, limit)?)
    }

    pub fn patient_alerts(
        &self,
        patient_id: &str,
        unacknowledged_only: bool,
    ) -> Result<Vec<Alert>, ServiceError> {
        let patient_id = validate_patient_id(patient_id)?;
        Ok(self.store.alerts_for_patient(patient_id, unacknowledged_only)?)
    }

    pub fn recent_alerts(&self, limit: Option<usize>) -> Result<Vec<Alert>, ServiceError> {
        let limit = limit.unwrap_or(config::RECENT_ALERTS_LIMIT);
        Ok(self.store.recent_alerts(limit)?)
    }

    pub fn acknowledge_alert(&self, alert_id: &Uuid) -> Result<Alert, ServiceError> {
        match self.store.acknowledge_alert(alert_id, Utc::now()) {
            Ok(alert) => {
                tracing::info!(
                    alert_id = %alert.id,
                    patient_id = %alert.patient_id,
                    "Alert acknowledged"
                );
                Ok(alert)
            }
            Err(StoreError::NotFound { .. }) => Err(ServiceError::AlertNotFound(*alert_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Trend report over the last `ANALYTICS_WINDOW` readings.
    pub fn analytics(&self, patient_id: &str) -> Result<TrendReport, ServiceError> {
        let patient_id = validate_patient_id(patient_id)?;
        let readings = self
            .store
            .readings_for_patient(patient_id, config::ANALYTICS_WINDOW)?;
        Ok(analyze(patient_id, &readings, ReadingOrder::NewestFirst))
    }
}

fn validate_patient_id(patient_id: &str) -> Result<&str, ServiceError> {
    let trimmed = patient_id.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidPatientId(patient_id.to_string()));
    }
    Ok(trimmed)
}
