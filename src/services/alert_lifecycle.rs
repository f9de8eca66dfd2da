//! Alert lifecycle state machine with hysteresis-gated clearing.
//!
//! Transitions are planned by a pure function and applied inside a
//! transaction that locks the open alert row for its (site, framework,
//! indicator) key. The partial unique index on OPEN alerts turns any
//! insert race into a retryable conflict instead of a duplicate alert.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::alert::Alert;
use crate::models::indicator::{AlertStatus, Comparator, Indicator, Severity};
use crate::services::evaluator::Evaluation;

/// Anti-flapping policy for clearing alerts.
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    /// Consecutive qualifying OK samples required before an alert clears.
    pub clear_samples: i32,
    /// Relative margin the OK value must sit beyond the breached
    /// threshold, on the compliant side, to count toward clearing.
    pub hysteresis_pct: f64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            clear_samples: 3,
            hysteresis_pct: 0.02,
        }
    }
}

/// The currently-open alert for a key, as loaded under row lock.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OpenAlertState {
    pub alert_id: Uuid,
    pub severity: Severity,
    pub comparator: Comparator,
    pub threshold_value: f64,
    pub clear_streak: i32,
}

/// Planned state transition for one evaluator result.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Nothing to do (OK with no open alert).
    Hold,
    /// Open a fresh alert for the key.
    Raise {
        severity: Severity,
        comparator: Comparator,
        threshold_value: f64,
        observed_value: f64,
    },
    /// Breach while already open: escalate, de-escalate, or refresh the
    /// observed value in place. Resets the recovery streak.
    Reassert {
        alert_id: Uuid,
        severity: Severity,
        comparator: Comparator,
        threshold_value: f64,
        observed_value: f64,
    },
    /// OK sample while open, not yet clearable; carries the new streak.
    TrackRecovery { alert_id: Uuid, clear_streak: i32 },
    /// Hysteresis satisfied; close the alert.
    Clear { alert_id: Uuid },
}

/// True when an OK value sits clear of the hysteresis band around the
/// breached threshold, on the compliant side.
pub fn outside_hysteresis_band(
    value: f64,
    comparator: Comparator,
    threshold: f64,
    hysteresis_pct: f64,
) -> bool {
    if comparator.upper_bound() {
        value < threshold * (1.0 - hysteresis_pct)
    } else {
        value > threshold * (1.0 + hysteresis_pct)
    }
}

/// Decide the transition for one evaluator result against the current
/// alert state. Pure; all I/O happens in the applier.
pub fn plan_transition(
    current: Option<&OpenAlertState>,
    eval: &Evaluation,
    observed_value: f64,
    policy: &AlertPolicy,
) -> Transition {
    match (current, &eval.matched_rule) {
        // Breach with no open alert: raise.
        (None, Some(rule)) => Transition::Raise {
            severity: eval.severity,
            comparator: rule.comparator,
            threshold_value: rule.value,
            observed_value,
        },
        // Breach while open: reassert at the evaluator's severity,
        // whether that escalates, de-escalates, or merely refreshes.
        (Some(open), Some(rule)) => Transition::Reassert {
            alert_id: open.alert_id,
            severity: eval.severity,
            comparator: rule.comparator,
            threshold_value: rule.value,
            observed_value,
        },
        // OK while open: hysteresis tracking. The sample only counts
        // toward clearing when it sits outside the band around the
        // threshold that was breached; otherwise the streak resets.
        (Some(open), None) => {
            let qualifying = outside_hysteresis_band(
                observed_value,
                open.comparator,
                open.threshold_value,
                policy.hysteresis_pct,
            );
            if !qualifying {
                return Transition::TrackRecovery {
                    alert_id: open.alert_id,
                    clear_streak: 0,
                };
            }
            let streak = open.clear_streak + 1;
            if streak >= policy.clear_samples {
                Transition::Clear {
                    alert_id: open.alert_id,
                }
            } else {
                Transition::TrackRecovery {
                    alert_id: open.alert_id,
                    clear_streak: streak,
                }
            }
        }
        // OK with nothing open: no-op.
        (None, None) => Transition::Hold,
    }
}

/// Load the open alert for a key, locking the row for the duration of
/// the transaction. Single-writer per key.
async fn lock_open_alert(
    tx: &mut Transaction<'_, Postgres>,
    site_id: Uuid,
    framework_code: &str,
    indicator: Indicator,
) -> Result<Option<OpenAlertState>, AppError> {
    let row = sqlx::query_as::<_, OpenAlertState>(
        r#"
        SELECT alert_id, severity, comparator, threshold_value, clear_streak
        FROM alerts
        WHERE site_id = $1 AND framework_code = $2 AND indicator = $3
          AND status = 'OPEN'
        FOR UPDATE
        "#,
    )
    .bind(site_id)
    .bind(framework_code)
    .bind(indicator)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row)
}

fn map_open_conflict(e: sqlx::Error) -> AppError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        AppError::Conflict("an OPEN alert already exists for this key".to_string())
    } else {
        AppError::Database(e)
    }
}

/// Apply one evaluator result to the alert state for a key.
///
/// Returns the transition that was applied. Concurrent writers targeting
/// the same key fail with a retryable `Conflict` rather than producing a
/// second OPEN alert.
pub async fn process_evaluation(
    pool: &PgPool,
    site_id: Uuid,
    framework_code: &str,
    indicator: Indicator,
    eval: &Evaluation,
    observed_value: f64,
    measured_at: DateTime<Utc>,
    policy: &AlertPolicy,
) -> Result<Transition, AppError> {
    let mut tx = pool.begin().await?;

    let current = lock_open_alert(&mut tx, site_id, framework_code, indicator).await?;
    let transition = plan_transition(current.as_ref(), eval, observed_value, policy);

    match &transition {
        Transition::Hold => {}
        Transition::Raise {
            severity,
            comparator,
            threshold_value,
            observed_value,
        } => {
            sqlx::query(
                r#"
                INSERT INTO alerts (
                    site_id, framework_code, indicator, severity, comparator,
                    threshold_value, observed_value, status, clear_streak, raised_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'OPEN', 0, $8)
                "#,
            )
            .bind(site_id)
            .bind(framework_code)
            .bind(indicator)
            .bind(severity)
            .bind(comparator)
            .bind(threshold_value)
            .bind(observed_value)
            .bind(measured_at)
            .execute(&mut *tx)
            .await
            .map_err(map_open_conflict)?;

            tracing::info!(
                %site_id,
                framework_code,
                ?indicator,
                ?severity,
                observed = observed_value,
                "alert raised"
            );
        }
        Transition::Reassert {
            alert_id,
            severity,
            comparator,
            threshold_value,
            observed_value,
        } => {
            let result = sqlx::query(
                r#"
                UPDATE alerts
                SET severity = $1, comparator = $2, threshold_value = $3,
                    observed_value = $4, clear_streak = 0
                WHERE alert_id = $5 AND status = 'OPEN'
                "#,
            )
            .bind(severity)
            .bind(comparator)
            .bind(threshold_value)
            .bind(observed_value)
            .bind(alert_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::Conflict(
                    "open alert changed underneath this transition".to_string(),
                ));
            }
        }
        Transition::TrackRecovery {
            alert_id,
            clear_streak,
        } => {
            let result = sqlx::query(
                "UPDATE alerts SET clear_streak = $1 WHERE alert_id = $2 AND status = 'OPEN'",
            )
            .bind(clear_streak)
            .bind(alert_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::Conflict(
                    "open alert changed underneath this transition".to_string(),
                ));
            }
        }
        Transition::Clear { alert_id } => {
            let result = sqlx::query(
                r#"
                UPDATE alerts
                SET status = 'CLEARED', cleared_at = $1, clear_streak = 0
                WHERE alert_id = $2 AND status = 'OPEN'
                "#,
            )
            .bind(measured_at)
            .bind(alert_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::Conflict(
                    "open alert changed underneath this transition".to_string(),
                ));
            }

            tracing::info!(%site_id, framework_code, ?indicator, "alert cleared");
        }
    }

    tx.commit().await?;
    Ok(transition)
}

/// List alerts for a site and framework, optionally filtered by status,
/// newest first. History is never deleted.
pub async fn list(
    pool: &PgPool,
    site_id: Uuid,
    framework_code: &str,
    status: Option<AlertStatus>,
) -> Result<Vec<Alert>, AppError> {
    let alerts = sqlx::query_as::<_, Alert>(
        r#"
        SELECT alert_id, site_id, framework_code, indicator, severity,
               comparator, threshold_value, observed_value, status,
               raised_at, cleared_at
        FROM alerts
        WHERE site_id = $1 AND framework_code = $2
          AND ($3::alert_status IS NULL OR status = $3)
        ORDER BY raised_at DESC
        "#,
    )
    .bind(site_id)
    .bind(framework_code)
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(alerts)
}
