//! Route definitions for the EcoMeter API.

pub mod alerts;
pub mod frameworks;
pub mod health;
pub mod metrics;
pub mod reports;
pub mod site_frameworks;
pub mod sites;
pub mod thresholds;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/sites", get(sites::list))
        .route("/frameworks", get(frameworks::list))
        .route(
            "/site_frameworks",
            get(site_frameworks::get).post(site_frameworks::set),
        )
        .route("/thresholds", get(thresholds::get).post(thresholds::save))
        .route("/alerts", get(alerts::list))
        .route("/metrics", post(metrics::ingest))
        .route("/reports/summary", get(reports::summary));

    Router::new()
        .route("/health/live", get(health::live))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
