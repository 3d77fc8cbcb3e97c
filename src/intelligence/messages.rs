/// Message template builder for alert text.
/// Every message quotes the measured value(s) that tripped the rule so the
/// stored alert is auditable on its own.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Hypertensive crisis, quoting both pressures.
    pub fn hypertensive_crisis(systolic: f64, diastolic: f64) -> String {
        format!(
            "Hypertensive crisis detected: BP {}/{} mmHg. \
             Immediate medical attention required.",
            systolic, diastolic,
        )
    }

    /// Critically low SpO2.
    pub fn critical_oxygen(saturation: f64) -> String {
        format!(
            "Critically low oxygen saturation: {}%. Seek emergency care immediately.",
            saturation,
        )
    }

    /// Fever at or above the critical temperature.
    pub fn high_fever(temperature: f64) -> String {
        format!(
            "High fever: {} °C. Seek medical attention immediately.",
            temperature,
        )
    }

    /// Glucose at or above the critical level.
    pub fn hyperglycemic_crisis(glucose: f64) -> String {
        format!(
            "Very high blood glucose: {} mg/dL. Seek urgent medical care.",
            glucose,
        )
    }

    /// Model-driven high risk. Score is shown as a whole percentage.
    pub fn high_risk(risk_score: f64) -> String {
        format!(
            "High deterioration risk detected (score: {}%). \
             Clinical review recommended within 24 hours.",
            (risk_score * 100.0).round(),
        )
    }

    pub fn elevated_bp(systolic: f64, diastolic: f64) -> String {
        format!(
            "Elevated blood pressure: {}/{} mmHg. Please contact your care team.",
            systolic, diastolic,
        )
    }

    pub fn low_oxygen(saturation: f64) -> String {
        format!(
            "Low oxygen saturation: {}%. Monitor closely and rest.",
            saturation,
        )
    }

    pub fn elevated_heart_rate(heart_rate: f64) -> String {
        format!(
            "Elevated heart rate: {} bpm. Rest and re-measure; contact your care team if it persists.",
            heart_rate,
        )
    }

    pub fn elevated_glucose(glucose: f64) -> String {
        format!(
            "Elevated blood glucose: {} mg/dL. Review your diet and medication with your care team.",
            glucose,
        )
    }

    pub fn elevated_cholesterol(cholesterol: f64) -> String {
        format!(
            "Elevated cholesterol: {} mg/dL. Discuss lipid management at your next appointment.",
            cholesterol,
        )
    }
}
