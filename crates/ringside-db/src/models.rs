//! Database models - mapped from SQLite tables

use chrono::{DateTime, Utc};
use ringside_types::Boxer;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Boxer Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBoxer {
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub wins: i64,
    pub losses: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DbBoxer> for Boxer {
    fn from(row: DbBoxer) -> Self {
        Self {
            id: row.id,
            name: row.name,
            weight: row.weight,
            height: row.height,
            reach: row.reach,
            age: row.age,
            wins: row.wins,
            losses: row.losses,
            created_at: row.created_at,
        }
    }
}
