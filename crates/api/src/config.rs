use hotdesk_core::retention::{SHARE_RETENTION_DAYS, SWEEP_INTERVAL_SECS};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Background expiry sweep settings.
    pub retention: RetentionConfig,
}

/// Settings for the background sweep of expired tokens, codes, invites,
/// and stale shares.
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    /// Seconds between sweep passes (default: hourly).
    pub sweep_interval_secs: u64,
    /// Days a share outlives its latest booking date (default: 30).
    pub share_retention_days: i64,
}

impl RetentionConfig {
    fn from_env() -> Self {
        let sweep_interval_secs: u64 = std::env::var("REAPER_INTERVAL_SECS")
            .unwrap_or_else(|_| SWEEP_INTERVAL_SECS.to_string())
            .parse()
            .expect("REAPER_INTERVAL_SECS must be a valid u64");

        let share_retention_days: i64 = std::env::var("SHARE_RETENTION_DAYS")
            .unwrap_or_else(|_| SHARE_RETENTION_DAYS.to_string())
            .parse()
            .expect("SHARE_RETENTION_DAYS must be a valid i64");

        Self {
            sweep_interval_secs,
            share_retention_days,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REAPER_INTERVAL_SECS` | `3600`                     |
    /// | `SHARE_RETENTION_DAYS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            retention: RetentionConfig::from_env(),
        }
    }
}
