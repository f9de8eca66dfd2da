use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub alert_clear_samples: i32,
    pub alert_hysteresis_pct: f64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("ECOMETER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("ECOMETER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            alert_clear_samples: env::var("ALERT_CLEAR_SAMPLES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            alert_hysteresis_pct: env::var("ALERT_HYSTERESIS_PCT")
                .unwrap_or_else(|_| "0.02".to_string())
                .parse()
                .unwrap_or(0.02),
        })
    }
}
