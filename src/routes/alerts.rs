//! Alert listing routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::alert::AlertsResponse;
use crate::models::indicator::AlertStatus;
use crate::services::{alert_lifecycle, sites};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub site_id: Uuid,
    pub framework_code: String,
    pub status: Option<AlertStatus>,
}

/// GET /api/v1/alerts — alert history for a (site, framework), newest first,
/// optionally filtered to OPEN or CLEARED.
pub async fn list(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<ApiResponse<AlertsResponse>>, AppError> {
    let site = sites::get_owned(&state.db, company_id, query.site_id).await?;
    let alerts =
        alert_lifecycle::list(&state.db, site.site_id, &query.framework_code, query.status)
            .await?;
    Ok(ApiResponse::success(AlertsResponse { alerts }))
}
