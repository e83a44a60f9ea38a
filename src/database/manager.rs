use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Schema setup failed: {0}")]
    SchemaError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_POSTS: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id      SERIAL PRIMARY KEY,
        title   TEXT NOT NULL,
        body    TEXT NOT NULL,
        user_id TEXT NOT NULL
    )
"#;

const CREATE_COMMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS comments (
        id      SERIAL PRIMARY KEY,
        name    TEXT NOT NULL,
        email   TEXT NOT NULL,
        body    TEXT NOT NULL,
        post_id INTEGER NOT NULL
    )
"#;

/// Store connectivity as seen by `GET /health`
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
impl StoreHealth for PgPool {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(self).await
    }
}

/// Connection pool setup and store-level housekeeping
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool for the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        if config.url.is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }
        let url = url::Url::parse(&config.url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url.as_str())
            .await?;

        info!(
            "Created database pool for: {}{}",
            url.host_str().unwrap_or("localhost"),
            url.path()
        );
        Ok(pool)
    }

    /// Create the posts and comments tables when absent
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        for ddl in [CREATE_POSTS, CREATE_COMMENTS] {
            sqlx::query(ddl)
                .execute(pool)
                .await
                .map_err(|e| DatabaseError::SchemaError(e.to_string()))?;
        }

        info!("Database schema ready");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
