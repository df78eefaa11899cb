//! Application state shared across handlers
//!
//! Holds the database handle for health probes and the arena that owns the
//! ring.

use std::sync::Arc;

use ringside_arena::{Arena, ArenaConfig};
use ringside_db::{Database, DbResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connections
    pub db: Arc<Database>,
    /// Registry, ring and fight engine
    pub arena: Arc<Arena>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: Arc<Database>, arena: Arc<Arena>) -> Self {
        Self { db, arena }
    }

    /// State backed by a fresh in-memory database
    pub async fn in_memory(config: &ArenaConfig) -> DbResult<Self> {
        let db = Database::in_memory().await?;
        let arena = Arena::from_config(db.boxer_repo(), config);
        Ok(Self::new(Arc::new(db), Arc::new(arena)))
    }
}
