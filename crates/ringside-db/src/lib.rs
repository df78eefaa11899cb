//! Ringside Database Layer
//!
//! Persistence for the Ringside service using SQLite through SQLx.
//!
//! # Layout
//!
//! A single `boxers` table keyed by a case-insensitive unique name, carrying
//! the physical attributes and the cumulative win/loss record. Ring
//! membership is not persisted.
//!
//! # Repository Pattern
//!
//! [`BoxerRepo`] is the boxer registry: registration, lookup, the atomic
//! win/loss commit and the full reset.

pub mod config;
pub mod error;
pub mod repos;
pub mod models;

use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

pub use config::DatabaseConfig;
pub use error::{DbError, DbResult};
pub use repos::*;
pub use models::*;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite, creating the database file if needed
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!(url = %config.url, "Connecting to SQLite");

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

        if config.is_in_memory() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?;

        info!("Connected to SQLite");

        Ok(Self { pool })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> DbResult<Self> {
        let db = Self::connect(&DatabaseConfig::in_memory()).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> DbResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        info!("Migrations complete");
        Ok(())
    }

    /// Health check: the store answers a trivial query and the boxers table exists
    pub async fn health_check(&self) -> DbResult<HealthStatus> {
        let started = Instant::now();

        let reachable = sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok();

        let schema_ready = reachable
            && sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'boxers'")
                .fetch_optional(&self.pool)
                .await
                .map(|row| row.is_some())
                .unwrap_or(false);

        Ok(HealthStatus {
            sqlite: reachable,
            schema_ready,
            healthy: reachable && schema_ready,
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create repository instances
    pub fn boxer_repo(&self) -> BoxerRepo {
        BoxerRepo::new(self.pool.clone())
    }
}

/// Health status of the database connection
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub sqlite: bool,
    pub schema_ready: bool,
    pub healthy: bool,
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_health() {
        let db = Database::in_memory().await.unwrap();
        let health = db.health_check().await.unwrap();
        assert!(health.sqlite);
        assert!(health.schema_ready);
        assert!(health.healthy);
    }

    #[tokio::test]
    async fn test_unmigrated_database_is_not_ready() {
        let db = Database::connect(&DatabaseConfig::in_memory()).await.unwrap();
        let health = db.health_check().await.unwrap();
        assert!(health.sqlite);
        assert!(!health.healthy);
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::in_memory().await.unwrap();
        db.close().await;
        let health = db.health_check().await.unwrap();
        assert!(!health.healthy);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let a = Database::in_memory().await.unwrap();
        let b = Database::in_memory().await.unwrap();
        a.boxer_repo()
            .register(&ringside_types::NewBoxer::new("Ali", 180, 70, 72.5, 28))
            .await
            .unwrap();
        assert_eq!(b.boxer_repo().count().await.unwrap(), 0);
    }
}
