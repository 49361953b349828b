use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::Mapping;
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::str::FromStr;
use std::time::Duration;

/// Storage capability the shortener depends on.
///
/// Every read and write of mappings goes through this trait so one
/// implementation owns the connection pool.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Insert a new mapping.
    ///
    /// Returns `Ok(None)` when `short` is already taken, so the caller can
    /// pick another code. Any other failure is an error.
    async fn insert_mapping(&self, url: &str, short: &str) -> AppResult<Option<Mapping>>;

    /// Look up the mapping for a short code
    async fn find_by_code(&self, short: &str) -> AppResult<Option<Mapping>>;

    /// Number of stored mappings
    async fn count_mappings(&self) -> AppResult<i64>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Database repository
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
}

impl Repository {
    /// Create a new repository with a connection pool
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| AppError::Configuration(format!("Invalid database URL: {}", e)))?
            .disable_statement_logging();

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MappingStore for Repository {
    async fn insert_mapping(&self, url: &str, short: &str) -> AppResult<Option<Mapping>> {
        let result = sqlx::query_as::<_, Mapping>(
            r#"
            INSERT INTO requests (url, short)
            VALUES ($1, $2)
            ON CONFLICT (short) DO NOTHING
            RETURNING url, short, created_at
            "#,
        )
        .bind(url)
        .bind(short)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_by_code(&self, short: &str) -> AppResult<Option<Mapping>> {
        let result = sqlx::query_as::<_, Mapping>(
            r#"
            SELECT url, short, created_at FROM requests
            WHERE short = $1
            "#,
        )
        .bind(short)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn count_mappings(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM requests")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
