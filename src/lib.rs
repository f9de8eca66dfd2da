pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::services::alert_lifecycle::AlertPolicy;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub alert_policy: AlertPolicy,
}
