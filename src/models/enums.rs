use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string literal is the single canonical external representation,
/// used by both serde and the store boundary.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Variant order is significant: derived `Ord` follows declaration order.
str_enum!(RiskLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
});

str_enum!(AlertSeverity {
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(AlertType {
    HypertensiveCrisis => "hypertensive_crisis",
    LowOxygen => "low_oxygen",
    HighFever => "high_fever",
    HyperglycemicCrisis => "hyperglycemic_crisis",
    HighRisk => "high_risk",
    ElevatedBp => "elevated_bp",
    ElevatedHeartRate => "elevated_heart_rate",
    ElevatedGlucose => "elevated_glucose",
    ElevatedCholesterol => "elevated_cholesterol",
});

str_enum!(VitalField {
    HeartRate => "heart_rate",
    BloodPressureSystolic => "blood_pressure_systolic",
    BloodPressureDiastolic => "blood_pressure_diastolic",
    Temperature => "temperature",
    OxygenSaturation => "oxygen_saturation",
    Glucose => "glucose",
    Cholesterol => "cholesterol",
});

str_enum!(TrendDirection {
    Improving => "Improving",
    Stable => "Stable",
    Worsening => "Worsening",
    InsufficientData => "Insufficient data",
});

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn risk_level_round_trip() {
        for (variant, s) in [
            (RiskLevel::Low, "low"),
            (RiskLevel::Moderate, "moderate"),
            (RiskLevel::High, "high"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RiskLevel::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn alert_type_round_trip() {
        for (variant, s) in [
            (AlertType::HypertensiveCrisis, "hypertensive_crisis"),
            (AlertType::LowOxygen, "low_oxygen"),
            (AlertType::HighFever, "high_fever"),
            (AlertType::HyperglycemicCrisis, "hyperglycemic_crisis"),
            (AlertType::HighRisk, "high_risk"),
            (AlertType::ElevatedBp, "elevated_bp"),
            (AlertType::ElevatedHeartRate, "elevated_heart_rate"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AlertType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn severity_ordering_is_fixed() {
        assert!(AlertSeverity::Medium < AlertSeverity::High);
        assert!(AlertSeverity::High < AlertSeverity::Critical);
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&RiskLevel::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
        let json = serde_json::to_string(&TrendDirection::InsufficientData).unwrap();
        assert_eq!(json, "\"Insufficient data\"");
        let parsed: AlertSeverity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(parsed, AlertSeverity::Critical);
    }

    #[test]
    fn mixed_case_tier_is_rejected() {
        // Casing variants are mapped at the boundary, never accepted here.
        assert!(RiskLevel::from_str("High").is_err());
        assert!(AlertSeverity::from_str("warning").is_err());
        assert!(VitalField::from_str("").is_err());
    }
}
