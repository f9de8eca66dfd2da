//! Framework catalog routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::CompanyId;
use crate::models::framework::FrameworksResponse;
use crate::services::assignments;
use crate::AppState;

/// GET /api/v1/frameworks — list the compliance framework catalog.
pub async fn list(
    State(state): State<AppState>,
    _company: CompanyId,
) -> Result<Json<ApiResponse<FrameworksResponse>>, AppError> {
    let frameworks = assignments::list_frameworks(&state.db).await?;
    Ok(ApiResponse::success(FrameworksResponse { frameworks }))
}
