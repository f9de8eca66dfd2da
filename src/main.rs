use std::net::SocketAddr;

use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ecometer::config::AppConfig;
use ecometer::services::alert_lifecycle::AlertPolicy;
use ecometer::{db, routes, AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecometer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let alert_policy = AlertPolicy {
        clear_samples: config.alert_clear_samples,
        hysteresis_pct: config.alert_hysteresis_pct,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(host = %addr, "Starting EcoMeter API server");

    let app = routes::router(AppState {
        db: pool,
        config,
        alert_policy,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
