//! Threshold rule-set persistence: full-replace writes, preset fallback
//! reads.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::threshold::ThresholdRule;
use crate::services::presets;

/// Boundary validation for a rule set about to be persisted.
///
/// The closed enums already reject unknown indicators, comparators, and
/// severities at deserialization; what remains is what types cannot
/// express.
pub fn validate_rules(rules: &[ThresholdRule]) -> Result<(), AppError> {
    if rules.is_empty() {
        return Err(AppError::Validation("rules[] required".to_string()));
    }
    for rule in rules {
        if !rule.severity.is_breach() {
            return Err(AppError::Validation(
                "rule severity must be WARN or CRIT".to_string(),
            ));
        }
        if !rule.value.is_finite() {
            return Err(AppError::Validation(
                "rule value must be a finite number".to_string(),
            ));
        }
        if let Some(band) = rule.load_band {
            if !(1..=100).contains(&band) {
                return Err(AppError::Validation(
                    "load_band must be 1-100".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Saved rule set for a (site, framework), in saved order.
pub async fn get_saved(
    pool: &PgPool,
    site_id: Uuid,
    framework_code: &str,
) -> Result<Vec<ThresholdRule>, AppError> {
    let rules = sqlx::query_as::<_, ThresholdRule>(
        r#"
        SELECT indicator, comparator, value, severity, load_band
        FROM threshold_rules
        WHERE site_id = $1 AND framework_code = $2
        ORDER BY position ASC
        "#,
    )
    .bind(site_id)
    .bind(framework_code)
    .fetch_all(pool)
    .await?;
    Ok(rules)
}

/// Resolve the rule set the engine evaluates against: the saved set, or
/// the framework's preset at its default PUE mode when nothing has been
/// saved yet.
pub async fn resolve(
    pool: &PgPool,
    site_id: Uuid,
    framework_code: &str,
) -> Result<Vec<ThresholdRule>, AppError> {
    let saved = get_saved(pool, site_id, framework_code).await?;
    if !saved.is_empty() {
        return Ok(saved);
    }
    Ok(presets::build_preset_rules(
        framework_code,
        presets::default_pue_mode(framework_code),
    ))
}

/// Atomically replace the rule set for a (site, framework).
pub async fn save(
    pool: &PgPool,
    site_id: Uuid,
    framework_code: &str,
    rules: &[ThresholdRule],
) -> Result<(), AppError> {
    validate_rules(rules)?;

    let known = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM frameworks WHERE framework_code = $1)",
    )
    .bind(framework_code)
    .fetch_one(pool)
    .await?;
    if !known {
        return Err(AppError::Validation(format!(
            "unknown framework_code '{framework_code}'"
        )));
    }

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM threshold_rules WHERE site_id = $1 AND framework_code = $2")
        .bind(site_id)
        .bind(framework_code)
        .execute(&mut *tx)
        .await?;

    for (position, rule) in rules.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO threshold_rules (
                site_id, framework_code, indicator, comparator, value,
                severity, load_band, position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(site_id)
        .bind(framework_code)
        .bind(rule.indicator)
        .bind(rule.comparator)
        .bind(rule.value)
        .bind(rule.severity)
        .bind(rule.load_band)
        .bind(position as i32)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        %site_id,
        framework_code,
        rules = rules.len(),
        "threshold rule set replaced"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::indicator::{Comparator, Indicator, Severity};

    fn rule(severity: Severity, value: f64, load_band: Option<i32>) -> ThresholdRule {
        ThresholdRule {
            indicator: Indicator::Pue,
            comparator: Comparator::Le,
            value,
            severity,
            load_band,
        }
    }

    #[test]
    fn valid_rules_pass() {
        let rules = vec![
            rule(Severity::Warn, 1.33, Some(50)),
            rule(Severity::Crit, 1.39, None),
        ];
        assert!(validate_rules(&rules).is_ok());
    }

    #[test]
    fn empty_rule_set_rejected() {
        assert!(validate_rules(&[]).is_err());
    }

    #[test]
    fn ok_severity_rejected() {
        let rules = vec![rule(Severity::Ok, 1.33, None)];
        assert!(validate_rules(&rules).is_err());
    }

    #[test]
    fn non_finite_value_rejected() {
        assert!(validate_rules(&[rule(Severity::Warn, f64::NAN, None)]).is_err());
        assert!(validate_rules(&[rule(Severity::Warn, f64::INFINITY, None)]).is_err());
    }

    #[test]
    fn out_of_range_band_rejected() {
        assert!(validate_rules(&[rule(Severity::Warn, 1.3, Some(0))]).is_err());
        assert!(validate_rules(&[rule(Severity::Warn, 1.3, Some(101))]).is_err());
        assert!(validate_rules(&[rule(Severity::Warn, 1.3, Some(100))]).is_ok());
    }
}
