//! Tenant (company) scoping extractor.
//!
//! Authentication is handled upstream; by the time a request reaches
//! this service the gateway has resolved the caller to an opaque company
//! identifier carried in the `x-company-id` header. Every entity in the
//! system is scoped by it.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::AppState;

/// Requesting tenant, extracted from the `x-company-id` header.
///
/// Use as an Axum extractor in handlers that touch tenant-scoped data:
/// ```ignore
/// async fn handler(CompanyId(company_id): CompanyId) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompanyId(pub Uuid);

impl FromRequestParts<AppState> for CompanyId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-company-id")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let company_id: Uuid = header.parse().map_err(|_| AppError::Unauthorized)?;

        Ok(CompanyId(company_id))
    }
}
