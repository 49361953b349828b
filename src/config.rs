use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

mod database;
mod http;
mod server;
mod shortener;
mod storage;

pub use database::DatabaseConfig;
pub use http::HttpConfig;
pub use server::ServerConfig;
pub use shortener::ShortenerConfig;
pub use storage::StorageServiceConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageServiceConfig,
    pub shortener: ShortenerConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map so they never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| AppError::MissingEnvVar(key.to_string()));

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_or(&lookup, "SERVER_PORT", 3000)?;

        let database_url = required("DATABASE_URL")?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        let db_min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?;
        let db_acquire_timeout = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECONDS", 30)?;

        let storage_url = required("SUPABASE_URL")?;
        let storage_key = required("SUPABASE_KEY")?;

        let short_code_length = parse_or(&lookup, "SHORT_CODE_LENGTH", 8)?;
        let short_code_max_attempts = parse_or(&lookup, "SHORT_CODE_MAX_ATTEMPTS", 5)?;

        let allowed_origins_str = lookup("ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string());
        let allowed_origins: Vec<String> = if allowed_origins_str.trim() == "*" {
            vec!["*".to_string()]
        } else {
            allowed_origins_str
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };
        let max_body_bytes = parse_or(&lookup, "MAX_BODY_BYTES", 64 * 1024)?;

        let config = Config {
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: db_max_connections,
                min_connections: db_min_connections,
                acquire_timeout_seconds: db_acquire_timeout,
            },
            storage: StorageServiceConfig {
                url: storage_url,
                access_key: storage_key,
            },
            shortener: ShortenerConfig {
                short_code_length,
                short_code_max_attempts,
            },
            http: HttpConfig {
                allowed_origins,
                max_body_bytes,
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate every configuration section
    pub fn validate(&self) -> AppResult<()> {
        self.database
            .validate()
            .and_then(|_| self.storage.validate())
            .and_then(|_| self.shortener.validate())
            .and_then(|_| self.http.validate())
            .map_err(AppError::Configuration)
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
