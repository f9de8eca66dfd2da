//! Per-site framework assignment routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::framework::{SetAssignmentsRequest, SiteFrameworksResponse};
use crate::services::{assignments, sites};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SiteFrameworksQuery {
    pub site_id: Uuid,
}

/// GET /api/v1/site_frameworks — assignments for a site, ordered by precedence.
pub async fn get(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Query(query): Query<SiteFrameworksQuery>,
) -> Result<Json<ApiResponse<SiteFrameworksResponse>>, AppError> {
    let site = sites::get_owned(&state.db, company_id, query.site_id).await?;
    let frameworks = assignments::list(&state.db, site.site_id).await?;
    Ok(ApiResponse::success(SiteFrameworksResponse {
        site_id: site.site_id,
        frameworks,
    }))
}

/// POST /api/v1/site_frameworks — atomically replace a site's assignments.
pub async fn set(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Json(request): Json<SetAssignmentsRequest>,
) -> Result<Json<ApiResponse<SiteFrameworksResponse>>, AppError> {
    let site = sites::get_owned(&state.db, company_id, request.site_id).await?;
    assignments::set_assignments(&state.db, site.site_id, &request.assignments).await?;
    let frameworks = assignments::list(&state.db, site.site_id).await?;
    Ok(ApiResponse::success(SiteFrameworksResponse {
        site_id: site.site_id,
        frameworks,
    }))
}
