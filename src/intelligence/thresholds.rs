use crate::models::{AlertType, VitalField, VitalReading};

use super::messages::MessageTemplates;

// Hard physiological danger zones.
pub const CRISIS_SYSTOLIC_MMHG: f64 = 180.0;
pub const CRISIS_DIASTOLIC_MMHG: f64 = 120.0;
pub const HYPOXIA_SPO2_PCT: f64 = 90.0;
pub const HYPERTHERMIA_TEMP_C: f64 = 40.0;
pub const HYPERGLYCEMIA_GLUCOSE_MG_DL: f64 = 300.0;

// Elevated (warning-level) thresholds. The fallback scorer counts these too.
pub const ELEVATED_SYSTOLIC_MMHG: f64 = 160.0;
pub const LOW_SPO2_PCT: f64 = 94.0;
pub const ELEVATED_HEART_RATE_BPM: f64 = 120.0;
pub const ELEVATED_GLUCOSE_MG_DL: f64 = 200.0;
pub const ELEVATED_CHOLESTEROL_MG_DL: f64 = 240.0;

/// A threshold that a reading crossed.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdFinding {
    pub alert_type: AlertType,
    pub message: String,
}

/// Critical findings in rule priority order.
pub fn critical_findings(reading: &VitalReading) -> Vec<ThresholdFinding> {
    let systolic = reading.value_or_default(VitalField::BloodPressureSystolic);
    let diastolic = reading.value_or_default(VitalField::BloodPressureDiastolic);
    let spo2 = reading.value_or_default(VitalField::OxygenSaturation);
    let temperature = reading.value_or_default(VitalField::Temperature);
    let glucose = reading.value_or_default(VitalField::Glucose);

    let mut findings = Vec::new();

    if systolic >= CRISIS_SYSTOLIC_MMHG || diastolic >= CRISIS_DIASTOLIC_MMHG {
        findings.push(ThresholdFinding {
            alert_type: AlertType::HypertensiveCrisis,
            message: MessageTemplates::hypertensive_crisis(systolic, diastolic),
        });
    }
    if spo2 <= HYPOXIA_SPO2_PCT {
        findings.push(ThresholdFinding {
            alert_type: AlertType::LowOxygen,
            message: MessageTemplates::critical_oxygen(spo2),
        });
    }
    if temperature >= HYPERTHERMIA_TEMP_C {
        findings.push(ThresholdFinding {
            alert_type: AlertType::HighFever,
            message: MessageTemplates::high_fever(temperature),
        });
    }
    if glucose >= HYPERGLYCEMIA_GLUCOSE_MG_DL {
        findings.push(ThresholdFinding {
            alert_type: AlertType::HyperglycemicCrisis,
            message: MessageTemplates::hyperglycemic_crisis(glucose),
        });
    }

    findings
}

/// Elevated (non-critical) findings in rule priority order.
///
/// A value in the critical zone also satisfies its elevated threshold,
/// so a crisis reading shows up here as well.
pub fn elevated_findings(reading: &VitalReading) -> Vec<ThresholdFinding> {
    let systolic = reading.value_or_default(VitalField::BloodPressureSystolic);
    let diastolic = reading.value_or_default(VitalField::BloodPressureDiastolic);
    let spo2 = reading.value_or_default(VitalField::OxygenSaturation);
    let heart_rate = reading.value_or_default(VitalField::HeartRate);
    let glucose = reading.value_or_default(VitalField::Glucose);
    let cholesterol = reading.value_or_default(VitalField::Cholesterol);

    let mut findings = Vec::new();

    if systolic >= ELEVATED_SYSTOLIC_MMHG {
        findings.push(ThresholdFinding {
            alert_type: AlertType::ElevatedBp,
            message: MessageTemplates::elevated_bp(systolic, diastolic),
        });
    }
    if spo2 <= LOW_SPO2_PCT {
        findings.push(ThresholdFinding {
            alert_type: AlertType::LowOxygen,
            message: MessageTemplates::low_oxygen(spo2),
        });
    }
    if heart_rate >= ELEVATED_HEART_RATE_BPM {
        findings.push(ThresholdFinding {
            alert_type: AlertType::ElevatedHeartRate,
            message: MessageTemplates::elevated_heart_rate(heart_rate),
        });
    }
    if glucose >= ELEVATED_GLUCOSE_MG_DL {
        findings.push(ThresholdFinding {
            alert_type: AlertType::ElevatedGlucose,
            message: MessageTemplates::elevated_glucose(glucose),
        });
    }
    if cholesterol >= ELEVATED_CHOLESTEROL_MG_DL {
        findings.push(ThresholdFinding {
            alert_type: AlertType::ElevatedCholesterol,
            message: MessageTemplates::elevated_cholesterol(cholesterol),
        });
    }

    findings
}
