//! Framework threshold presets (RuleSet Builder).
//!
//! Pure functions that materialize a rule set from a framework code and a
//! PUE evaluation mode. Unknown codes yield an empty list, meaning "no
//! preset available, configure rules manually" — never an error.

use crate::models::indicator::{Comparator, Indicator, PueMode, Severity};
use crate::models::threshold::ThresholdRule;

/// Singapore grid emission factor (kgCO2/kWh) used to derive CUE
/// thresholds from PUE thresholds.
pub const GRID_EF_SG: f64 = 0.4057;

/// Canonical IT-load bands for load-aware PUE presets, in percent.
pub const LOAD_BANDS: [i32; 4] = [25, 50, 75, 100];

/// GMDC Green Mark PUE thresholds per band: (band, warn, crit).
const GMDC_PUE_BANDS: [(i32, f64, f64); 4] = [
    (25, 1.39, 1.46),
    (50, 1.33, 1.39),
    (75, 1.29, 1.36),
    (100, 1.28, 1.35),
];

/// Whether a framework's preset defines load-banded PUE thresholds.
pub fn supports_load_aware(framework_code: &str) -> bool {
    framework_code == "GMDC_SG_2024"
}

/// Default PUE mode a framework's preset is materialized in.
pub fn default_pue_mode(framework_code: &str) -> PueMode {
    if supports_load_aware(framework_code) {
        PueMode::LoadAware
    } else {
        PueMode::Static
    }
}

/// Coerce a requested mode to what the framework actually supports.
pub fn effective_pue_mode(framework_code: &str, requested: PueMode) -> PueMode {
    match requested {
        PueMode::LoadAware if !supports_load_aware(framework_code) => PueMode::Static,
        mode => mode,
    }
}

/// Materialize the preset rule set for a framework.
///
/// Output is stable for UI diffing: grouped by indicator (PUE, WUE, CUE),
/// then ascending load band, WARN before CRIT.
pub fn build_preset_rules(framework_code: &str, pue_mode: PueMode) -> Vec<ThresholdRule> {
    match framework_code {
        "GMDC_SG_2024" => build_gmdc_rules(pue_mode),
        "GDCR_SG_2034" => build_gdcr_rules(),
        "CORP_DEFAULT" => build_corp_default_rules(),
        "SLA_STRICT" => build_sla_strict_rules(),
        _ => Vec::new(),
    }
}

/// Round to 3 decimal places; CUE derivations must reproduce this exactly
/// for numeric parity with stored rule sets.
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn rule(
    indicator: Indicator,
    severity: Severity,
    value: f64,
    load_band: Option<i32>,
) -> ThresholdRule {
    ThresholdRule {
        indicator,
        comparator: Comparator::Le,
        value,
        severity,
        load_band,
    }
}

/// Static PUE/WUE/CUE pair list shared by the non-banded presets.
fn static_rules(
    pue_warn: f64,
    pue_crit: f64,
    wue_warn: f64,
    wue_crit: f64,
) -> Vec<ThresholdRule> {
    vec![
        rule(Indicator::Pue, Severity::Warn, pue_warn, None),
        rule(Indicator::Pue, Severity::Crit, pue_crit, None),
        rule(Indicator::Wue, Severity::Warn, wue_warn, None),
        rule(Indicator::Wue, Severity::Crit, wue_crit, None),
        rule(Indicator::Cue, Severity::Warn, round3(pue_warn * GRID_EF_SG), None),
        rule(Indicator::Cue, Severity::Crit, round3(pue_crit * GRID_EF_SG), None),
    ]
}

/// BCA-IMDA Green Mark DC bands. Platinum ≈ WARN, GoldPLUS ≈ CRIT.
fn build_gmdc_rules(pue_mode: PueMode) -> Vec<ThresholdRule> {
    let mut rules = Vec::new();

    match pue_mode {
        PueMode::LoadAware => {
            for (band, warn, crit) in GMDC_PUE_BANDS {
                rules.push(rule(Indicator::Pue, Severity::Warn, warn, Some(band)));
                rules.push(rule(Indicator::Pue, Severity::Crit, crit, Some(band)));
            }
        }
        PueMode::Static => {
            // Static mode keeps only the 100%-band thresholds, applied at
            // all loads.
            let (_, warn, crit) = GMDC_PUE_BANDS[3];
            rules.push(rule(Indicator::Pue, Severity::Warn, warn, None));
            rules.push(rule(Indicator::Pue, Severity::Crit, crit, None));
        }
    }

    // WUE is not IT-load-sensitive; always static.
    rules.push(rule(Indicator::Wue, Severity::Warn, 2.0, None));
    rules.push(rule(Indicator::Wue, Severity::Crit, 2.2, None));

    match pue_mode {
        PueMode::LoadAware => {
            for (band, warn, crit) in GMDC_PUE_BANDS {
                rules.push(rule(
                    Indicator::Cue,
                    Severity::Warn,
                    round3(warn * GRID_EF_SG),
                    Some(band),
                ));
                rules.push(rule(
                    Indicator::Cue,
                    Severity::Crit,
                    round3(crit * GRID_EF_SG),
                    Some(band),
                ));
            }
        }
        PueMode::Static => {
            let (_, warn, crit) = GMDC_PUE_BANDS[3];
            rules.push(rule(Indicator::Cue, Severity::Warn, round3(warn * GRID_EF_SG), None));
            rules.push(rule(Indicator::Cue, Severity::Crit, round3(crit * GRID_EF_SG), None));
        }
    }

    rules
}

/// SG Green Data Centre Roadmap 2034 targets. Aspirational, WARN only.
fn build_gdcr_rules() -> Vec<ThresholdRule> {
    vec![
        rule(Indicator::Pue, Severity::Warn, 1.3, None),
        rule(Indicator::Wue, Severity::Warn, 2.0, None),
        rule(Indicator::Cue, Severity::Warn, round3(1.3 * GRID_EF_SG), None),
    ]
}

/// Corporate baseline, slightly tighter than GMDC at full load.
fn build_corp_default_rules() -> Vec<ThresholdRule> {
    static_rules(1.35, 1.4, 1.9, 2.1)
}

/// Strict thresholds for premium / customer-SLA sites.
fn build_sla_strict_rules() -> Vec<ThresholdRule> {
    static_rules(1.3, 1.35, 1.8, 2.0)
}
