use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RiskLevel, VitalField};

impl VitalField {
    /// Every supported field, in model feature order.
    pub const ALL: [VitalField; 7] = [
        VitalField::HeartRate,
        VitalField::BloodPressureSystolic,
        VitalField::BloodPressureDiastolic,
        VitalField::Temperature,
        VitalField::OxygenSaturation,
        VitalField::Glucose,
        VitalField::Cholesterol,
    ];

    /// Resting baseline used when a field is absent from a reading.
    /// Every baseline sits inside the normal range, so an absent field
    /// can never trip an alert rule.
    pub fn default_value(self) -> f64 {
        match self {
            VitalField::HeartRate => 72.0,
            VitalField::BloodPressureSystolic => 120.0,
            VitalField::BloodPressureDiastolic => 80.0,
            VitalField::Temperature => 37.0,
            VitalField::OxygenSaturation => 98.0,
            VitalField::Glucose => 100.0,
            VitalField::Cholesterol => 180.0,
        }
    }

    /// Whether a rising value means the patient is getting worse.
    pub fn higher_is_worse(self) -> bool {
        !matches!(self, VitalField::OxygenSaturation)
    }
}

/// One submitted set of measurements. Every field is optional: deployments
/// collect different subsets (bedside vitals vs. cardiometabolic panels).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalReading {
    pub heart_rate: Option<f64>,
    pub blood_pressure_systolic: Option<f64>,
    pub blood_pressure_diastolic: Option<f64>,
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub glucose: Option<f64>,
    pub cholesterol: Option<f64>,
}

impl VitalReading {
    pub fn get(&self, field: VitalField) -> Option<f64> {
        match field {
            VitalField::HeartRate => self.heart_rate,
            VitalField::BloodPressureSystolic => self.blood_pressure_systolic,
            VitalField::BloodPressureDiastolic => self.blood_pressure_diastolic,
            VitalField::Temperature => self.temperature,
            VitalField::OxygenSaturation => self.oxygen_saturation,
            VitalField::Glucose => self.glucose,
            VitalField::Cholesterol => self.cholesterol,
        }
    }

    /// Field value, or its resting baseline when absent.
    pub fn value_or_default(&self, field: VitalField) -> f64 {
        self.get(field).unwrap_or_else(|| field.default_value())
    }
}

/// A reading after scoring, as persisted by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredReading {
    pub id: Uuid,
    pub patient_id: String,
    #[serde(flatten)]
    pub vitals: VitalReading,
    pub risk_score: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub recorded_at: DateTime<Utc>,
}
