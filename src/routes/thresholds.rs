//! Threshold rule set routes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::indicator::PueMode;
use crate::models::threshold::{SaveThresholdsRequest, ThresholdsResponse};
use crate::services::{presets, sites, thresholds};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ThresholdsQuery {
    pub site_id: Uuid,
    pub framework_code: String,
    /// Preset mode to preview when no rule set has been saved yet.
    /// Coerced to STATIC for frameworks without load-aware support.
    pub pue_mode: Option<PueMode>,
}

/// GET /api/v1/thresholds — the effective rule set for a (site, framework):
/// the saved set if one exists, otherwise the framework preset.
pub async fn get(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Query(query): Query<ThresholdsQuery>,
) -> Result<Json<ApiResponse<ThresholdsResponse>>, AppError> {
    let site = sites::get_owned(&state.db, company_id, query.site_id).await?;

    let mut rules = thresholds::get_saved(&state.db, site.site_id, &query.framework_code).await?;
    if rules.is_empty() {
        let mode = query
            .pue_mode
            .map(|requested| presets::effective_pue_mode(&query.framework_code, requested))
            .unwrap_or_else(|| presets::default_pue_mode(&query.framework_code));
        rules = presets::build_preset_rules(&query.framework_code, mode);
    }

    Ok(ApiResponse::success(ThresholdsResponse {
        site_id: site.site_id,
        framework_code: query.framework_code,
        rules,
    }))
}

/// POST /api/v1/thresholds — full replace of the saved rule set.
pub async fn save(
    State(state): State<AppState>,
    CompanyId(company_id): CompanyId,
    Json(request): Json<SaveThresholdsRequest>,
) -> Result<Json<ApiResponse<ThresholdsResponse>>, AppError> {
    let site = sites::get_owned(&state.db, company_id, request.site_id).await?;
    thresholds::save(&state.db, site.site_id, &request.framework_code, &request.rules).await?;
    let rules = thresholds::get_saved(&state.db, site.site_id, &request.framework_code).await?;
    Ok(ApiResponse::success(ThresholdsResponse {
        site_id: site.site_id,
        framework_code: request.framework_code,
        rules,
    }))
}
