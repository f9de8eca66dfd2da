//! Measurement ingestion pipeline.
//!
//! Validates an inbound batch, appends measurements, then fans out one
//! evaluation + lifecycle transition per (active framework, indicator).
//! Evaluation itself is pure; only the lifecycle step touches alert
//! state, serialized per key by the lifecycle manager.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::measurement::{IngestResponse, MetricsIngestRequest};
use crate::services::{alert_lifecycle, assignments, evaluator, sites, thresholds};

/// Ingest one measurement batch for a company's site.
pub async fn ingest(
    pool: &PgPool,
    policy: &alert_lifecycle::AlertPolicy,
    company_id: Uuid,
    request: &MetricsIngestRequest,
) -> Result<IngestResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    for reading in &request.measurements {
        if !reading.value.is_finite() {
            return Err(AppError::Validation(
                "measurement value must be a finite number".to_string(),
            ));
        }
    }

    let site = sites::get_owned(pool, company_id, request.site_id).await?;
    let measured_at = request.measured_at.unwrap_or_else(Utc::now);

    // Append-only measurement log.
    for reading in &request.measurements {
        sqlx::query(
            r#"
            INSERT INTO measurements (site_id, indicator, value, it_load_pct, measured_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(site.site_id)
        .bind(reading.indicator)
        .bind(reading.value)
        .bind(request.it_load_pct)
        .bind(measured_at)
        .execute(pool)
        .await?;
    }

    // Evaluate against every active framework independently.
    let active = assignments::resolve_active(pool, site.site_id).await?;
    for assignment in &active {
        let rules = thresholds::resolve(pool, site.site_id, &assignment.framework_code).await?;

        for reading in &request.measurements {
            let eval = evaluator::evaluate(
                reading.indicator,
                reading.value,
                request.it_load_pct,
                &rules,
            );

            let mut attempt = alert_lifecycle::process_evaluation(
                pool,
                site.site_id,
                &assignment.framework_code,
                reading.indicator,
                &eval,
                reading.value,
                measured_at,
                policy,
            )
            .await;

            // A lost race on the alert key is retryable by contract.
            if attempt.as_ref().is_err_and(|e| e.is_retryable()) {
                tracing::warn!(
                    site_id = %site.site_id,
                    framework_code = %assignment.framework_code,
                    indicator = ?reading.indicator,
                    "alert transition conflict, retrying"
                );
                attempt = alert_lifecycle::process_evaluation(
                    pool,
                    site.site_id,
                    &assignment.framework_code,
                    reading.indicator,
                    &eval,
                    reading.value,
                    measured_at,
                    policy,
                )
                .await;
            }
            attempt?;
        }
    }

    tracing::info!(
        site_id = %site.site_id,
        ingested = request.measurements.len(),
        frameworks = active.len(),
        "measurement batch ingested"
    );

    Ok(IngestResponse {
        site_id: site.site_id,
        ingested: request.measurements.len(),
    })
}
