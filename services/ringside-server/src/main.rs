//! Ringside Server
//!
//! HTTP server for the boxer registry, the ring and the leaderboard.
//!
//! # Features
//!
//! - SQLite persistence with embedded migrations
//! - Seedable fight resolution
//! - OpenAPI documentation with Swagger UI
//! - Prometheus metrics export
//! - Graceful shutdown handling
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! ringside-server
//!
//! # Start with custom config
//! ringside-server --config /path/to/config.toml
//!
//! # Reproducible fights
//! ringside-server --fight-seed 42
//!
//! # Start with environment overrides
//! RINGSIDE__SERVER__PORT=8080 ringside-server
//! ```

mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio::sync::Notify;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ringside_api::{create_router, AppState};
use ringside_arena::{Arena, SkillModelKind};
use ringside_db::Database;

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Ringside Server - boxer registry, ring and leaderboard over HTTP
#[derive(Parser, Debug)]
#[command(name = "ringside-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "RINGSIDE_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "RINGSIDE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "RINGSIDE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RINGSIDE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "RINGSIDE_LOG_FORMAT")]
    log_format: Option<String>,

    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Seed for the fight random source
    #[arg(long, env = "RINGSIDE_FIGHT_SEED")]
    fight_seed: Option<u64>,

    /// Skill model (linear, classic)
    #[arg(long, env = "RINGSIDE_SKILL_MODEL")]
    skill_model: Option<SkillModelKind>,

    /// Development mode: in-memory database, seeded fights, debug logs
    #[arg(long, env = "RINGSIDE_DEV_MODE")]
    dev_mode: bool,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(seed) = self.fight_seed {
            config.arena.seed = Some(seed);
        }
        if let Some(model) = self.skill_model {
            config.arena.skill_model = model;
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut server_config = if args.dev_mode {
        ServerConfig::development()
    } else {
        ServerConfig::load(args.config.as_deref())?
    };
    args.apply(&mut server_config);

    // Initialize logging
    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Ringside Server"
    );

    // Initialize database
    let db = init_database(&server_config.database).await?;

    // Create the arena that owns the ring
    let arena = Arc::new(Arena::from_config(db.boxer_repo(), &server_config.arena));

    // Create application state
    let state = Arc::new(AppState::new(db.clone(), arena));

    // Create router
    let app = create_router(state, server_config.api.to_api_config());

    // Start metrics server if enabled
    if server_config.metrics.enabled {
        start_metrics_server(&server_config.metrics)?;
    }

    // Get bind address
    let addr = server_config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    serve(listener, app, server_config.server.shutdown_timeout()).await?;

    db.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?,
    }

    Ok(())
}

/// Initialize database connection
async fn init_database(config: &config::DatabaseConfig) -> anyhow::Result<Arc<Database>> {
    tracing::info!("Connecting to database...");

    let db = Database::connect(&config.to_db_config()).await?;

    if config.run_migrations {
        db.migrate().await?;
    }

    // Run health check
    let health = db.health_check().await?;
    if !health.healthy {
        anyhow::bail!(
            "Database health check failed (reachable: {}, schema ready: {})",
            health.sqlite,
            health.schema_ready
        );
    }

    tracing::info!(
        latency_ms = health.latency_ms,
        "Database health check passed"
    );

    Ok(Arc::new(db))
}

/// Start Prometheus metrics server
fn start_metrics_server(config: &config::MetricsConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    metrics::describe_counter!(
        "ringside_boxers_registered_total",
        "Boxers added to the registry"
    );
    metrics::describe_counter!(
        "ringside_fights_resolved_total",
        "Fights resolved and committed"
    );
    metrics::describe_counter!(
        "ringside_ring_rejections_total",
        "Ring admissions refused, by reason"
    );

    tracing::info!(port = config.port, "Metrics server started");

    Ok(())
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Serve until a shutdown signal, then drain for at most `timeout`
async fn serve(
    listener: tokio::net::TcpListener,
    app: axum::Router,
    timeout: Duration,
) -> anyhow::Result<()> {
    let shutdown = Arc::new(Notify::new());

    let mut server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await
        }
    });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    shutdown.notify_one();

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "Waiting for in-flight requests to complete..."
    );

    match tokio::time::timeout(timeout, server).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!("Shutdown timeout elapsed with requests still in flight"),
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from([
            "ringside-server",
            "--port",
            "8080",
            "--fight-seed",
            "7",
            "--skill-model",
            "classic",
        ]);
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.fight_seed, Some(7));
        assert_eq!(args.skill_model, Some(SkillModelKind::Classic));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = ServerConfig::default();
        Args::parse_from([
            "ringside-server",
            "--host",
            "127.0.0.1",
            "--database-url",
            "sqlite::memory:",
            "--log-format",
            "json",
            "--fight-seed",
            "99",
        ])
        .apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.arena.seed, Some(99));
    }

    #[tokio::test]
    async fn test_init_database_runs_migrations() {
        let config = ServerConfig::development();
        let db = init_database(&config.database).await.unwrap();
        assert_eq!(db.boxer_repo().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_init_database_without_migrations_fails_health_check() {
        let mut config = ServerConfig::development();
        config.database.run_migrations = false;
        assert!(init_database(&config.database).await.is_err());
    }
}
