//! Leaderboard DTOs

use ringside_arena::Standing;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Leaderboard query parameters
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// `win_pct` (default) or `wins`
    pub sort_by: Option<String>,
    /// Maximum number of rows
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    pub limit: Option<usize>,
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub weight_class: String,
    pub wins: i64,
    pub losses: i64,
    pub fights: i64,
    /// `null` for boxers who have never fought
    pub win_pct: Option<f64>,
}

impl From<&Standing> for LeaderboardEntry {
    fn from(s: &Standing) -> Self {
        Self {
            rank: s.rank,
            id: s.id,
            name: s.name.clone(),
            weight: s.weight,
            height: s.height,
            reach: s.reach,
            age: s.age,
            weight_class: s.weight_class.to_string(),
            wins: s.wins,
            losses: s.losses,
            fights: s.fights,
            win_pct: s.win_pct,
        }
    }
}

/// Ranked standings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub status: String,
    /// Ordering that was applied
    pub sort_by: String,
    pub boxers: Vec<LeaderboardEntry>,
}
