//! Compliance reporting routes.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::report::ReportSummary;
use crate::services::{reports, sites};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub site_id: Uuid,
    pub framework_code: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// GET /api/v1/reports/summary — per-indicator compliance summary over an
/// inclusive window. Defaults to the trailing 7 days.
pub async fn summary(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<ReportSummary>>, AppError> {
    let site = sites::get_owned(&state.db, company_id, query.site_id).await?;

    let to = query.to.unwrap_or_else(Utc::now);
    let from = query.from.unwrap_or(to - Duration::days(7));
    if from > to {
        return Err(AppError::Validation(
            "'from' must not be later than 'to'".to_string(),
        ));
    }

    let summary =
        reports::summarize(&state.db, site.site_id, &query.framework_code, from, to).await?;
    Ok(ApiResponse::success(summary))
}
