//! Site listing routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::site::Site;
use crate::services::sites;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SitesQuery {
    pub country: Option<String>,
}

/// GET /api/v1/sites — list the tenant's sites, newest first.
pub async fn list(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Query(query): Query<SitesQuery>,
) -> Result<Json<ApiResponse<Vec<Site>>>, AppError> {
    let sites = sites::list(&state.db, company_id, query.country.as_deref()).await?;
    Ok(ApiResponse::success(sites))
}
