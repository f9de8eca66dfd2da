//! Closed enums shared across the whole engine.
//!
//! Every wire value (indicator, severity, comparator, PUE mode, alert
//! status) is a tagged variant validated at deserialization; there are no
//! stringly-typed rule objects anywhere past the API boundary.

use serde::{Deserialize, Serialize};

/// Sustainability indicator. Fixed set, immutable.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "indicator", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Indicator {
    Pue,
    Wue,
    Cue,
}

impl Indicator {
    /// All indicators in canonical order (PUE, WUE, CUE).
    pub const ALL: [Indicator; 3] = [Indicator::Pue, Indicator::Wue, Indicator::Cue];
}

/// Evaluation severity, ordered: OK < WARN < CRIT.
///
/// Persisted alert rows only ever carry WARN or CRIT; OK exists as an
/// evaluation outcome.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord,
)]
#[sqlx(type_name = "severity", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warn,
    Crit,
}

impl Severity {
    /// Whether this severity represents a threshold breach.
    pub fn is_breach(&self) -> bool {
        matches!(self, Severity::Warn | Severity::Crit)
    }
}

/// Comparator expressing the *compliant* condition of a rule.
///
/// A rule `PUE <= 1.35` means the site is compliant while the measured
/// value satisfies the comparator; a breach is the negation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "comparator")]
pub enum Comparator {
    #[sqlx(rename = "<=")]
    #[serde(rename = "<=")]
    Le,
    #[sqlx(rename = "<")]
    #[serde(rename = "<")]
    Lt,
    #[sqlx(rename = ">=")]
    #[serde(rename = ">=")]
    Ge,
    #[sqlx(rename = ">")]
    #[serde(rename = ">")]
    Gt,
}

impl Comparator {
    /// True while the measured value satisfies the compliant condition.
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparator::Le => value <= threshold,
            Comparator::Lt => value < threshold,
            Comparator::Ge => value >= threshold,
            Comparator::Gt => value > threshold,
        }
    }

    /// Direction of the compliant side: true when compliance means
    /// staying *below* the threshold.
    pub fn upper_bound(&self) -> bool {
        matches!(self, Comparator::Le | Comparator::Lt)
    }
}

/// How PUE preset thresholds are materialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "pue_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PueMode {
    Static,
    LoadAware,
}

/// Alert lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "alert_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    Open,
    Cleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_serialization() {
        assert_eq!(serde_json::to_string(&Indicator::Pue).unwrap(), "\"PUE\"");
        let i: Indicator = serde_json::from_str("\"CUE\"").unwrap();
        assert_eq!(i, Indicator::Cue);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Ok < Severity::Warn);
        assert!(Severity::Warn < Severity::Crit);
        assert_eq!(
            Severity::Warn.max(Severity::Crit),
            Severity::Crit
        );
    }

    #[test]
    fn severity_breach_classification() {
        assert!(!Severity::Ok.is_breach());
        assert!(Severity::Warn.is_breach());
        assert!(Severity::Crit.is_breach());
    }

    #[test]
    fn comparator_serialization() {
        assert_eq!(serde_json::to_string(&Comparator::Le).unwrap(), "\"<=\"");
        let c: Comparator = serde_json::from_str("\">\"").unwrap();
        assert_eq!(c, Comparator::Gt);
    }

    #[test]
    fn comparator_holds_at_boundary() {
        assert!(Comparator::Le.holds(1.35, 1.35));
        assert!(!Comparator::Lt.holds(1.35, 1.35));
        assert!(Comparator::Ge.holds(1.35, 1.35));
        assert!(!Comparator::Gt.holds(1.35, 1.35));
    }

    #[test]
    fn comparator_direction() {
        assert!(Comparator::Le.upper_bound());
        assert!(Comparator::Lt.upper_bound());
        assert!(!Comparator::Ge.upper_bound());
        assert!(!Comparator::Gt.upper_bound());
    }

    #[test]
    fn pue_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&PueMode::LoadAware).unwrap(),
            "\"LOAD_AWARE\""
        );
        let m: PueMode = serde_json::from_str("\"STATIC\"").unwrap();
        assert_eq!(m, PueMode::Static);
    }

    #[test]
    fn alert_status_serialization() {
        assert_eq!(serde_json::to_string(&AlertStatus::Open).unwrap(), "\"OPEN\"");
        let s: AlertStatus = serde_json::from_str("\"CLEARED\"").unwrap();
        assert_eq!(s, AlertStatus::Cleared);
    }
}
