use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Alert, ScoredReading};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Lock acquisition failed")]
    LockFailed,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for scored readings and alerts.
///
/// Listing methods return records newest first. Implementations must be
/// safe to share across request threads.
pub trait VitalsStore: Send + Sync {
    fn insert_reading(&self, reading: &ScoredReading) -> Result<(), StoreError>;

    /// Up to `limit` most recent readings for one patient.
    fn readings_for_patient(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredReading>, StoreError>;

    fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    fn alerts_for_patient(
        &self,
        patient_id: &str,
        unacknowledged_only: bool,
    ) -> Result<Vec<Alert>, StoreError>;

    /// Up to `limit` most recent alerts across all patients.
    fn recent_alerts(&self, limit: usize) -> Result<Vec<Alert>, StoreError>;

    /// Acknowledge an alert and return it. Acknowledging twice keeps the
    /// first timestamp. Unknown ids yield `StoreError::NotFound`.
    fn acknowledge_alert(&self, alert_id: &Uuid, at: DateTime<Utc>) -> Result<Alert, StoreError>;
}

/// In-process store backed by RwLock.
pub struct MemoryStore {
    readings: RwLock<Vec<ScoredReading>>,
    alerts: RwLock<Vec<Alert>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            readings: RwLock::new(Vec::new()),
            alerts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest first by timestamp; equal timestamps keep the latest insert first.
fn newest_first<T>(
    items: impl DoubleEndedIterator<Item = T>,
    at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = items.rev().collect();
    out.sort_by(|a, b| at(b).cmp(&at(a)));
    out
}

impl VitalsStore for MemoryStore {
    fn insert_reading(&self, reading: &ScoredReading) -> Result<(), StoreError> {
        let mut readings = self.readings.write().map_err(|_| StoreError::LockFailed)?;
        readings.push(reading.clone());
        Ok(())
    }

    fn readings_for_patient(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ScoredReading>, StoreError> {
        let readings = self.readings.read().map_err(|_| StoreError::LockFailed)?;
        let mut matching = newest_first(
            readings.iter().filter(|r| r.patient_id == patient_id).cloned(),
            |r| r.recorded_at,
        );
        matching.truncate(limit);
        Ok(matching)
    }

    fn insert_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        let mut alerts = self.alerts.write().map_err(|_| StoreError::LockFailed)?;
        alerts.push(alert.clone());
        Ok(())
    }

    fn alerts_for_patient(
        &self,
        patient_id: &str,
        unacknowledged_only: bool,
    ) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().map_err(|_| StoreError::LockFailed)?;
        Ok(newest_first(
            alerts
                .iter()
                .filter(|a| a.patient_id == patient_id)
                .filter(|a| !unacknowledged_only || !a.acknowledged)
                .cloned(),
            |a| a.created_at,
        ))
    }

    fn recent_alerts(&self, limit: usize) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().map_err(|_| StoreError::LockFailed)?;
        let mut all = newest_first(alerts.iter().cloned(), |a| a.created_at);
        all.truncate(limit);
        Ok(all)
    }

    fn acknowledge_alert(&self, alert_id: &Uuid, at: DateTime<Utc>) -> Result<Alert, StoreError> {
        let mut alerts = self.alerts.write().map_err(|_| StoreError::LockFailed)?;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *alert_id)
            .ok_or_else(|| StoreError::NotFound {
                entity_type: "Alert".into(),
                id: alert_id.to_string(),
            })?;
        alert.acknowledge(at);
        Ok(alert.clone())
    }
}
