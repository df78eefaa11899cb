//! Server Configuration
//!
//! Configuration management for the Ringside server.
//! Supports environment variables, config files, and CLI arguments.

use ringside_api::ApiConfig;
use ringside_arena::ArenaConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Skill model, factors and fight seed
    #[serde(default)]
    pub arena: ArenaConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Time allowed for in-flight requests after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl ServerSettings {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Get the shutdown timeout duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    pub fn to_db_config(&self) -> ringside_db::DatabaseConfig {
        ringside_db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            acquire_timeout_secs: self.connect_timeout_secs,
        }
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable response compression
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: default_cors_origins(),
            enable_compression: true,
            enable_tracing: true,
            max_body_size: default_max_body_size(),
        }
    }
}

impl ApiSettings {
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            enable_cors: self.enable_cors,
            cors_origins: self.cors_origins.clone(),
            enable_compression: self.enable_compression,
            enable_tracing: self.enable_tracing,
            max_body_size: self.max_body_size,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable the Prometheus exporter
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics port (separate from main server)
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_metrics_port(),
        }
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_shutdown_timeout() -> u64 {
    10
}

fn default_database_url() -> String {
    ringside_db::config::DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_body_size() -> usize {
    64 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        // Add config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        // Add default config locations
        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Add environment variables with RINGSIDE__ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("RINGSIDE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Create a configuration for development/testing
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                url: ringside_db::config::MEMORY_DATABASE_URL.to_string(),
                ..Default::default()
            },
            arena: ArenaConfig {
                seed: Some(0),
                ..Default::default()
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
            metrics: MetricsConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringside_arena::SkillModelKind;

    fn from_toml(source: &str) -> ServerConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite://ringside.db");
        assert!(config.database.run_migrations);
        assert_eq!(config.arena.skill_model, SkillModelKind::Linear);
        assert_eq!(config.arena.seed, None);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 8080

            [database]
            url = "sqlite://boxers.db"

            [arena]
            skill_model = "classic"
            seed = 42

            [logging]
            format = "json"
            "#,
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://boxers.db");
        assert_eq!(config.arena.skill_model, SkillModelKind::Classic);
        assert_eq!(config.arena.seed, Some(42));
        assert_eq!(config.arena.weight_factor, ringside_arena::DEFAULT_WEIGHT_FACTOR);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_socket_addr() {
        let mut settings = ServerSettings::default();
        assert_eq!(settings.socket_addr().unwrap().port(), 5000);
        settings.host = "not a host".to_string();
        assert!(settings.socket_addr().is_err());
    }

    #[test]
    fn test_development_config() {
        let config = ServerConfig::development();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.arena.seed, Some(0));
        assert!(!config.metrics.enabled);
    }
}
