//! Tenant-scoped site access.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::site::Site;

/// List a company's sites, newest first, optionally filtered by country.
pub async fn list(
    pool: &PgPool,
    company_id: Uuid,
    country: Option<&str>,
) -> Result<Vec<Site>, AppError> {
    let sites = sqlx::query_as::<_, Site>(
        r#"
        SELECT site_id, name, country, timezone, created_at
        FROM sites
        WHERE company_id = $1
          AND ($2::text IS NULL OR country = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(company_id)
    .bind(country)
    .fetch_all(pool)
    .await?;
    Ok(sites)
}

/// Fetch a site, verifying it belongs to the requesting company.
///
/// Every site-scoped operation goes through this check; a foreign
/// company's site is indistinguishable from a missing one.
pub async fn get_owned(
    pool: &PgPool,
    company_id: Uuid,
    site_id: Uuid,
) -> Result<Site, AppError> {
    let site = sqlx::query_as::<_, Site>(
        r#"
        SELECT site_id, name, country, timezone, created_at
        FROM sites
        WHERE site_id = $1 AND company_id = $2
        "#,
    )
    .bind(site_id)
    .bind(company_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Site not found".to_string()))?;
    Ok(site)
}
