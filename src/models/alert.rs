use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AlertSeverity, AlertType};

/// A persisted notification raised by a scored reading.
///
/// Lifecycle: created once by the pipeline, acknowledged once by a clinician,
/// never resolved or deleted automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub patient_id: String,
    pub vital_id: Option<Uuid>,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub acknowledged: bool,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Mark the alert acknowledged. Returns false if it already was;
    /// the first acknowledgement timestamp is kept.
    pub fn acknowledge(&mut self, at: DateTime<Utc>) -> bool {
        if self.acknowledged {
            return false;
        }
        self.acknowledged = true;
        self.acknowledged_at = Some(at);
        true
    }
}
