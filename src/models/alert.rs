//! Alert model: one OPEN→CLEARED lifecycle instance per breach episode.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::indicator::{AlertStatus, Comparator, Indicator, Severity};

/// A raised compliance alert.
///
/// At most one OPEN alert exists per (site, framework, indicator) key;
/// the partial unique index `alerts_one_open_per_key` enforces this in
/// storage. History (cleared rows) is retained indefinitely.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Alert {
    pub alert_id: Uuid,
    pub site_id: Uuid,
    pub framework_code: String,
    pub indicator: Indicator,
    pub severity: Severity,
    pub comparator: Comparator,
    pub threshold_value: f64,
    pub observed_value: f64,
    pub status: AlertStatus,
    pub raised_at: DateTime<Utc>,
    pub cleared_at: Option<DateTime<Utc>>,
}

/// Alert listing response.
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_wire_shape() {
        let alert = Alert {
            alert_id: Uuid::nil(),
            site_id: Uuid::nil(),
            framework_code: "GMDC_SG_2024".to_string(),
            indicator: Indicator::Pue,
            severity: Severity::Warn,
            comparator: Comparator::Le,
            threshold_value: 1.33,
            observed_value: 1.38,
            status: AlertStatus::Open,
            raised_at: "2025-11-10T10:00:00Z".parse().unwrap(),
            cleared_at: None,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["indicator"], "PUE");
        assert_eq!(json["severity"], "WARN");
        assert_eq!(json["comparator"], "<=");
        assert_eq!(json["status"], "OPEN");
        assert!(json["cleared_at"].is_null());
    }
}
