//! Derived compliance report shapes. Computed on demand, never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::indicator::Indicator;

/// Per-indicator compliance statistics over a reporting window.
///
/// Percentages and min/avg/max are `None` (JSON `null`) when the window
/// holds no samples for the indicator; callers must handle the empty case
/// explicitly rather than receiving zeros or NaN.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndicatorSummary {
    pub samples: i64,
    pub ok: i64,
    pub warn: i64,
    pub crit: i64,
    pub ok_pct: Option<f64>,
    pub warn_pct: Option<f64>,
    pub crit_pct: Option<f64>,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl IndicatorSummary {
    /// Summary for an indicator with no samples in the window.
    pub fn empty() -> Self {
        Self {
            samples: 0,
            ok: 0,
            warn: 0,
            crit: 0,
            ok_pct: None,
            warn_pct: None,
            crit_pct: None,
            avg: None,
            min: None,
            max: None,
        }
    }
}

/// Reporting window, inclusive on both ends.
#[derive(Debug, Clone, Serialize)]
pub struct Period {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Full compliance summary for one site and framework over a window.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub site_id: Uuid,
    pub framework_code: String,
    pub period: Period,
    pub indicators: BTreeMap<Indicator, IndicatorSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_serializes_nulls() {
        let s = IndicatorSummary::empty();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["samples"], 0);
        assert!(json["ok_pct"].is_null());
        assert!(json["avg"].is_null());
        assert!(json["min"].is_null());
        assert!(json["max"].is_null());
    }

    #[test]
    fn indicator_map_keys_serialize_as_codes() {
        let mut indicators = BTreeMap::new();
        for ind in Indicator::ALL {
            indicators.insert(ind, IndicatorSummary::empty());
        }
        let summary = ReportSummary {
            site_id: Uuid::nil(),
            framework_code: "GMDC_SG_2024".to_string(),
            period: Period {
                from: "2025-11-01T00:00:00Z".parse().unwrap(),
                to: "2025-11-08T00:00:00Z".parse().unwrap(),
            },
            indicators,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["indicators"]["PUE"].is_object());
        assert!(json["indicators"]["WUE"].is_object());
        assert!(json["indicators"]["CUE"].is_object());
    }
}
