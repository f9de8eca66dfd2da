//! Threshold rule model and wire DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::indicator::{Comparator, Indicator, Severity};

/// One compliance threshold rule.
///
/// The comparator expresses the compliant condition; evaluation breaches
/// when the measured value fails it. `load_band = None` applies at all
/// loads, otherwise the rule only applies when the measurement's IT-load
/// percentage resolves to that band.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ThresholdRule {
    pub indicator: Indicator,
    pub comparator: Comparator,
    pub value: f64,
    pub severity: Severity,
    pub load_band: Option<i32>,
}

/// Saved rule set for a (site, framework) pair.
#[derive(Debug, Serialize)]
pub struct ThresholdsResponse {
    pub site_id: Uuid,
    pub framework_code: String,
    pub rules: Vec<ThresholdRule>,
}

/// Full-replace write of a rule set.
#[derive(Debug, Deserialize)]
pub struct SaveThresholdsRequest {
    pub site_id: Uuid,
    pub framework_code: String,
    pub rules: Vec<ThresholdRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_wire_shape() {
        let rule = ThresholdRule {
            indicator: Indicator::Pue,
            comparator: Comparator::Le,
            value: 1.33,
            severity: Severity::Warn,
            load_band: Some(50),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["indicator"], "PUE");
        assert_eq!(json["comparator"], "<=");
        assert_eq!(json["value"], 1.33);
        assert_eq!(json["severity"], "WARN");
        assert_eq!(json["load_band"], 50);
    }

    #[test]
    fn rule_null_band_round_trip() {
        let json = r#"{"indicator":"WUE","comparator":"<=","value":2.0,"severity":"CRIT","load_band":null}"#;
        let rule: ThresholdRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.indicator, Indicator::Wue);
        assert_eq!(rule.load_band, None);
        assert_eq!(rule.severity, Severity::Crit);
    }
}
