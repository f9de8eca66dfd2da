//! Measurement evaluation against a resolved rule set.
//!
//! Pure and deterministic: no I/O, no hidden state. Safe to run
//! concurrently across frameworks and sites for the same measurement.

use crate::models::indicator::{Indicator, Severity};
use crate::models::threshold::ThresholdRule;

/// Outcome of evaluating one measurement against one framework's rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub severity: Severity,
    pub matched_rule: Option<ThresholdRule>,
}

impl Evaluation {
    fn ok() -> Self {
        Self {
            severity: Severity::Ok,
            matched_rule: None,
        }
    }
}

/// Select the load band a measurement is judged against: the smallest
/// defined band ≥ the reported IT load, or the highest band when the load
/// exceeds all of them.
pub fn select_band(bands: &[i32], it_load_pct: i32) -> Option<i32> {
    bands
        .iter()
        .copied()
        .filter(|b| *b >= it_load_pct)
        .min()
        .or_else(|| bands.iter().copied().max())
}

/// Evaluate one indicator reading against a framework's rule set.
///
/// An empty rule list (or no applicable rules) is OK by definition:
/// nothing to breach. Among breached rules the highest severity wins.
pub fn evaluate(
    indicator: Indicator,
    value: f64,
    it_load_pct: Option<i32>,
    rules: &[ThresholdRule],
) -> Evaluation {
    let indicator_rules: Vec<&ThresholdRule> =
        rules.iter().filter(|r| r.indicator == indicator).collect();
    if indicator_rules.is_empty() {
        return Evaluation::ok();
    }

    let applicable: Vec<&ThresholdRule> = match it_load_pct {
        None => indicator_rules
            .into_iter()
            .filter(|r| r.load_band.is_none())
            .collect(),
        Some(load) => {
            let bands: Vec<i32> =
                indicator_rules.iter().filter_map(|r| r.load_band).collect();
            match select_band(&bands, load) {
                // Banded rules exist for this indicator: only the
                // selected band's rules are judged.
                Some(band) => indicator_rules
                    .into_iter()
                    .filter(|r| r.load_band == Some(band))
                    .collect(),
                // No banded rules; "all loads" rules apply.
                None => indicator_rules
                    .into_iter()
                    .filter(|r| r.load_band.is_none())
                    .collect(),
            }
        }
    };

    let mut result = Evaluation::ok();
    for rule in applicable {
        let breached = !rule.comparator.holds(value, rule.value);
        if breached && rule.severity > result.severity {
            result = Evaluation {
                severity: rule.severity,
                matched_rule: Some(rule.clone()),
            };
        }
    }
    result
}
