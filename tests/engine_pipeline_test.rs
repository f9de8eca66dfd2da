//! End-to-end engine scenario: preset rules through the evaluator into
//! the alert state machine, without touching the transport or database
//! layers. Exercises the full breach → recovery → clear cycle for a
//! load-aware framework.

use uuid::Uuid;

use ecometer::models::indicator::{Comparator, Indicator, PueMode, Severity};
use ecometer::services::alert_lifecycle::{
    plan_transition, AlertPolicy, OpenAlertState, Transition,
};
use ecometer::services::{evaluator, presets};

fn gmdc_rules() -> Vec<ecometer::models::threshold::ThresholdRule> {
    presets::build_preset_rules("GMDC_SG_2024", PueMode::LoadAware)
}

#[test]
fn breach_raises_crit_alert_for_load_band() {
    let rules = gmdc_rules();
    let policy = AlertPolicy::default();

    // 1.40 at 50% IT load breaches the band-50 CRIT threshold (1.39).
    let eval = evaluator::evaluate(Indicator::Pue, 1.40, Some(50), &rules);
    assert_eq!(eval.severity, Severity::Crit);

    let transition = plan_transition(None, &eval, 1.40, &policy);
    match transition {
        Transition::Raise {
            severity,
            comparator,
            threshold_value,
            observed_value,
        } => {
            assert_eq!(severity, Severity::Crit);
            assert_eq!(comparator, Comparator::Le);
            assert_eq!(threshold_value, 1.39);
            assert_eq!(observed_value, 1.40);
        }
        other => panic!("expected Raise, got {other:?}"),
    }
}

#[test]
fn recovery_requires_consecutive_samples_outside_hysteresis() {
    let rules = gmdc_rules();
    let policy = AlertPolicy::default();

    // Open WARN alert against the band-50 WARN threshold (1.33).
    let mut state = OpenAlertState {
        alert_id: Uuid::new_v4(),
        severity: Severity::Warn,
        comparator: Comparator::Le,
        threshold_value: 1.33,
        clear_streak: 0,
    };

    // 1.32 is OK but still inside the 2% band below 1.33: streak resets.
    let eval = evaluator::evaluate(Indicator::Pue, 1.32, Some(50), &rules);
    assert_eq!(eval.severity, Severity::Ok);
    assert_eq!(
        plan_transition(Some(&state), &eval, 1.32, &policy),
        Transition::TrackRecovery {
            alert_id: state.alert_id,
            clear_streak: 0,
        }
    );

    // 1.28 sits clear of the band; two samples build the streak, the
    // third clears.
    let eval = evaluator::evaluate(Indicator::Pue, 1.28, Some(50), &rules);
    assert_eq!(eval.severity, Severity::Ok);
    for expected_streak in 1..=2 {
        let transition = plan_transition(Some(&state), &eval, 1.28, &policy);
        assert_eq!(
            transition,
            Transition::TrackRecovery {
                alert_id: state.alert_id,
                clear_streak: expected_streak,
            }
        );
        state.clear_streak = expected_streak;
    }
    assert_eq!(
        plan_transition(Some(&state), &eval, 1.28, &policy),
        Transition::Clear {
            alert_id: state.alert_id,
        }
    );
}

#[test]
fn breach_mid_recovery_reasserts_and_resets_streak() {
    let rules = gmdc_rules();
    let policy = AlertPolicy::default();

    let state = OpenAlertState {
        alert_id: Uuid::new_v4(),
        severity: Severity::Crit,
        comparator: Comparator::Le,
        threshold_value: 1.39,
        clear_streak: 2,
    };

    // A WARN breach while CRIT is open de-escalates in place.
    let eval = evaluator::evaluate(Indicator::Pue, 1.35, Some(50), &rules);
    assert_eq!(eval.severity, Severity::Warn);
    match plan_transition(Some(&state), &eval, 1.35, &policy) {
        Transition::Reassert {
            alert_id,
            severity,
            threshold_value,
            ..
        } => {
            assert_eq!(alert_id, state.alert_id);
            assert_eq!(severity, Severity::Warn);
            assert_eq!(threshold_value, 1.33);
        }
        other => panic!("expected Reassert, got {other:?}"),
    }
}

#[test]
fn static_mode_frameworks_ignore_load_bands() {
    let rules = presets::build_preset_rules("CORP_DEFAULT", PueMode::Static);
    assert!(rules.iter().all(|r| r.load_band.is_none()));

    // Same verdict with or without a reported IT load.
    let with_load = evaluator::evaluate(Indicator::Pue, 1.42, Some(30), &rules);
    let without_load = evaluator::evaluate(Indicator::Pue, 1.42, None, &rules);
    assert_eq!(with_load.severity, Severity::Crit);
    assert_eq!(without_load.severity, Severity::Crit);
}

#[test]
fn advisory_framework_never_escalates_past_warn() {
    let rules = presets::build_preset_rules("GDCR_SG_2034", PueMode::Static);
    assert!(rules.iter().all(|r| r.severity == Severity::Warn));

    let eval = evaluator::evaluate(Indicator::Pue, 2.0, None, &rules);
    assert_eq!(eval.severity, Severity::Warn);
}
