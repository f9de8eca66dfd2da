//! Compliance report aggregation over a measurement window.
//!
//! Historical samples are re-evaluated against the rule set current at
//! summary time; rule sets are not effective-dated. Reports therefore
//! reflect today's thresholds applied to yesterday's data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::indicator::{Indicator, Severity};
use crate::models::report::{IndicatorSummary, Period, ReportSummary};
use crate::models::threshold::ThresholdRule;
use crate::services::{evaluator, thresholds};

/// One historical sample as read for aggregation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Sample {
    pub indicator: Indicator,
    pub value: f64,
    pub it_load_pct: Option<i32>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Classify a window of samples against a rule set and compute
/// per-indicator statistics. Pure.
///
/// Every indicator appears in the output; indicators with no samples get
/// zero counts and `None` statistics, never NaN or divisions by zero.
pub fn classify_window(
    samples: &[Sample],
    rules: &[ThresholdRule],
) -> BTreeMap<Indicator, IndicatorSummary> {
    struct Acc {
        samples: i64,
        ok: i64,
        warn: i64,
        crit: i64,
        sum: f64,
        min: f64,
        max: f64,
    }

    let mut accs: BTreeMap<Indicator, Acc> = BTreeMap::new();

    for sample in samples {
        let eval = evaluator::evaluate(sample.indicator, sample.value, sample.it_load_pct, rules);
        let acc = accs.entry(sample.indicator).or_insert(Acc {
            samples: 0,
            ok: 0,
            warn: 0,
            crit: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        });
        acc.samples += 1;
        match eval.severity {
            Severity::Ok => acc.ok += 1,
            Severity::Warn => acc.warn += 1,
            Severity::Crit => acc.crit += 1,
        }
        acc.sum += sample.value;
        acc.min = acc.min.min(sample.value);
        acc.max = acc.max.max(sample.value);
    }

    let mut out = BTreeMap::new();
    for indicator in Indicator::ALL {
        let summary = match accs.get(&indicator) {
            None => IndicatorSummary::empty(),
            Some(acc) => {
                let n = acc.samples as f64;
                IndicatorSummary {
                    samples: acc.samples,
                    ok: acc.ok,
                    warn: acc.warn,
                    crit: acc.crit,
                    ok_pct: Some(round2(acc.ok as f64 / n * 100.0)),
                    warn_pct: Some(round2(acc.warn as f64 / n * 100.0)),
                    crit_pct: Some(round2(acc.crit as f64 / n * 100.0)),
                    avg: Some(acc.sum / n),
                    min: Some(acc.min),
                    max: Some(acc.max),
                }
            }
        };
        out.insert(indicator, summary);
    }
    out
}

/// Build the compliance summary for a site and framework over an
/// inclusive window.
pub async fn summarize(
    pool: &PgPool,
    site_id: Uuid,
    framework_code: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<ReportSummary, AppError> {
    let rules = thresholds::resolve(pool, site_id, framework_code).await?;

    let samples = sqlx::query_as::<_, Sample>(
        r#"
        SELECT indicator, value, it_load_pct
        FROM measurements
        WHERE site_id = $1 AND measured_at >= $2 AND measured_at <= $3
        ORDER BY measured_at ASC
        "#,
    )
    .bind(site_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(ReportSummary {
        site_id,
        framework_code: framework_code.to_string(),
        period: Period { from, to },
        indicators: classify_window(&samples, &rules),
    })
}
