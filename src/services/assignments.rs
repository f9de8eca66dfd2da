//! Framework assignment registry: which frameworks are active per site
//! and in what precedence order.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::framework::{AssignmentEntry, Framework, SiteFrameworkAssignment};

/// Validate a full-replace assignment list.
///
/// Rejects duplicate framework codes and duplicate precedence among
/// active entries; the registry must always produce a well-defined
/// "highest-precedence active framework".
pub fn validate_entries(entries: &[AssignmentEntry]) -> Result<(), AppError> {
    let mut codes: Vec<&str> = entries.iter().map(|e| e.framework_code.as_str()).collect();
    codes.sort_unstable();
    if codes.windows(2).any(|w| w[0] == w[1]) {
        return Err(AppError::Validation(
            "duplicate framework_code in assignments".to_string(),
        ));
    }

    let mut active_precedence: Vec<i32> = entries
        .iter()
        .filter(|e| e.is_active)
        .map(|e| e.precedence)
        .collect();
    active_precedence.sort_unstable();
    if active_precedence.windows(2).any(|w| w[0] == w[1]) {
        return Err(AppError::Validation(
            "active assignments must have distinct precedence values".to_string(),
        ));
    }

    Ok(())
}

/// Order assignments the way every consumer sees them: ascending
/// precedence, with `framework_code` as the deterministic tiebreak.
pub fn sort_assignments(assignments: &mut [SiteFrameworkAssignment]) {
    assignments.sort_by(|a, b| {
        a.precedence
            .cmp(&b.precedence)
            .then_with(|| a.framework_code.cmp(&b.framework_code))
    });
}

/// Active frameworks for a site, highest priority first.
pub async fn resolve_active(
    pool: &PgPool,
    site_id: Uuid,
) -> Result<Vec<SiteFrameworkAssignment>, AppError> {
    let assignments = sqlx::query_as::<_, SiteFrameworkAssignment>(
        r#"
        SELECT sf.framework_code, f.name AS framework_name, sf.is_active, sf.precedence
        FROM site_frameworks sf
        JOIN frameworks f ON f.framework_code = sf.framework_code
        WHERE sf.site_id = $1 AND sf.is_active = true
        ORDER BY sf.precedence ASC, sf.framework_code ASC
        "#,
    )
    .bind(site_id)
    .fetch_all(pool)
    .await?;
    Ok(assignments)
}

/// All assignments for a site (active and inactive), ordered.
pub async fn list(
    pool: &PgPool,
    site_id: Uuid,
) -> Result<Vec<SiteFrameworkAssignment>, AppError> {
    let assignments = sqlx::query_as::<_, SiteFrameworkAssignment>(
        r#"
        SELECT sf.framework_code, f.name AS framework_name, sf.is_active, sf.precedence
        FROM site_frameworks sf
        JOIN frameworks f ON f.framework_code = sf.framework_code
        WHERE sf.site_id = $1
        ORDER BY sf.precedence ASC, sf.framework_code ASC
        "#,
    )
    .bind(site_id)
    .fetch_all(pool)
    .await?;
    Ok(assignments)
}

/// Atomically replace a site's assignments.
///
/// Entries absent from the new list become implicitly inactive for future
/// evaluation. Their historical alerts and saved thresholds are left
/// untouched.
pub async fn set_assignments(
    pool: &PgPool,
    site_id: Uuid,
    entries: &[AssignmentEntry],
) -> Result<(), AppError> {
    validate_entries(entries)?;

    // Every referenced framework must exist in the catalog.
    for entry in entries {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM frameworks WHERE framework_code = $1)",
        )
        .bind(&entry.framework_code)
        .fetch_one(pool)
        .await?;
        if !exists {
            return Err(AppError::Validation(format!(
                "unknown framework_code '{}'",
                entry.framework_code
            )));
        }
    }

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM site_frameworks WHERE site_id = $1")
        .bind(site_id)
        .execute(&mut *tx)
        .await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO site_frameworks (site_id, framework_code, is_active, precedence)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(site_id)
        .bind(&entry.framework_code)
        .bind(entry.is_active)
        .bind(entry.precedence)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(%site_id, count = entries.len(), "site framework assignments replaced");
    Ok(())
}

/// Framework catalog listing.
pub async fn list_frameworks(pool: &PgPool) -> Result<Vec<Framework>, AppError> {
    let frameworks = sqlx::query_as::<_, Framework>(
        r#"
        SELECT framework_code, name, version, jurisdiction, notes,
               supports_load_aware, default_pue_mode
        FROM frameworks
        ORDER BY framework_code ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(frameworks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, is_active: bool, precedence: i32) -> AssignmentEntry {
        AssignmentEntry {
            framework_code: code.to_string(),
            is_active,
            precedence,
        }
    }

    fn assignment(code: &str, precedence: i32) -> SiteFrameworkAssignment {
        SiteFrameworkAssignment {
            framework_code: code.to_string(),
            framework_name: code.to_string(),
            is_active: true,
            precedence,
        }
    }

    #[test]
    fn valid_entries_pass() {
        let entries = vec![
            entry("GMDC_SG_2024", true, 10),
            entry("CORP_DEFAULT", true, 20),
            entry("SLA_STRICT", false, 30),
        ];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn duplicate_code_rejected() {
        let entries = vec![
            entry("GMDC_SG_2024", true, 10),
            entry("GMDC_SG_2024", false, 20),
        ];
        assert!(validate_entries(&entries).is_err());
    }

    #[test]
    fn duplicate_precedence_among_active_rejected() {
        let entries = vec![
            entry("GMDC_SG_2024", true, 10),
            entry("CORP_DEFAULT", true, 10),
        ];
        assert!(validate_entries(&entries).is_err());
    }

    #[test]
    fn duplicate_precedence_allowed_when_inactive() {
        // Inactive entries never participate in precedence resolution.
        let entries = vec![
            entry("GMDC_SG_2024", true, 10),
            entry("CORP_DEFAULT", false, 10),
        ];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn ordering_is_precedence_then_code() {
        let mut assignments = vec![
            assignment("SLA_STRICT", 20),
            assignment("CORP_DEFAULT", 10),
            assignment("GMDC_SG_2024", 10),
        ];
        // Data predating precedence validation may still tie; ordering
        // stays deterministic via the code tiebreak.
        sort_assignments(&mut assignments);
        let codes: Vec<&str> = assignments
            .iter()
            .map(|a| a.framework_code.as_str())
            .collect();
        assert_eq!(codes, vec!["CORP_DEFAULT", "GMDC_SG_2024", "SLA_STRICT"]);
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(validate_entries(&[]).is_ok());
    }
}
