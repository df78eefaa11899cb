//! Database configuration

use serde::{Deserialize, Serialize};

/// URL used when neither the config nor `DATABASE_URL` names a database
pub const DEFAULT_DATABASE_URL: &str = "sqlite://ringside.db";

/// In-memory SQLite, one private database per pool
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,
    /// Maximum pool connections
    pub max_connections: u32,
    /// Minimum pool connections
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: std::env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_connections),
            acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
            ..defaults
        }
    }

    /// Config for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self {
            url: MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
        }
    }

    /// Whether the URL points at an in-memory database.
    ///
    /// Each SQLite connection to `:memory:` opens its own empty database, so
    /// such pools must be pinned to a single long-lived connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        let file = DatabaseConfig {
            url: "sqlite:///app/db/boxing.db".to_string(),
            ..DatabaseConfig::in_memory()
        };
        assert!(!file.is_in_memory());
    }

    #[test]
    fn test_in_memory_is_single_connection() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.min_connections, 1);
    }
}
