//! Measurement ingestion route.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::measurement::{IngestResponse, MetricsIngestRequest};
use crate::services::ingestion;
use crate::AppState;

/// POST /api/v1/metrics — ingest a measurement batch and drive alert
/// transitions for every active framework on the site.
pub async fn ingest(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Json(request): Json<MetricsIngestRequest>,
) -> Result<Json<ApiResponse<IngestResponse>>, AppError> {
    let response =
        ingestion::ingest(&state.db, &state.alert_policy, company_id, &request).await?;
    Ok(ApiResponse::success(response))
}
