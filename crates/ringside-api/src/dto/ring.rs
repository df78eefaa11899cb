//! Ring and fight DTOs

use ringside_arena::{FightReport, RingStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{common::success, BoxerInfo};

/// Admit a boxer to the ring
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnterRingRequest {
    /// Registered boxer name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Ring contents
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RingInfo {
    /// `empty`, `one_occupied` or `full`
    pub state: String,
    /// Boxer names in entry order
    pub occupants: Vec<String>,
}

impl From<RingStatus> for RingInfo {
    fn from(status: RingStatus) -> Self {
        let state = match status.state {
            ringside_arena::RingState::Empty => "empty",
            ringside_arena::RingState::OneOccupied => "one_occupied",
            ringside_arena::RingState::Full => "full",
        };
        Self {
            state: state.to_string(),
            occupants: status.occupants,
        }
    }
}

/// Response to a ring admission or clear
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RingResponse {
    pub status: String,
    pub message: String,
    pub ring: RingInfo,
}

impl RingResponse {
    pub fn new(message: impl Into<String>, ring: RingStatus) -> Self {
        Self {
            status: success(),
            message: message.into(),
            ring: ring.into(),
        }
    }
}

/// Boxers currently in the ring
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RingBoxersResponse {
    pub status: String,
    pub boxers: Vec<BoxerInfo>,
}

/// Result of a fight
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FightResponse {
    pub status: String,
    /// Winner's name
    pub winner: String,
    /// Loser's name
    pub loser: String,
    /// Both fighters in ring entry order
    pub boxers: Vec<String>,
    /// Win probability of the first boxer
    pub probability: f64,
    /// The random draw in [0, 1) that decided the fight
    pub draw: f64,
    /// Winner's record after the fight
    pub winner_record: BoxerInfo,
    /// Loser's record after the fight
    pub loser_record: BoxerInfo,
}

impl From<FightReport> for FightResponse {
    fn from(report: FightReport) -> Self {
        let outcome = report.outcome;
        Self {
            status: success(),
            boxers: vec![outcome.boxer_a, outcome.boxer_b],
            winner: outcome.winner,
            loser: outcome.loser,
            probability: outcome.probability_a,
            draw: outcome.draw,
            winner_record: report.winner.into(),
            loser_record: report.loser.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringside_arena::RingState;

    #[test]
    fn test_ring_info_state_names() {
        let info = RingInfo::from(RingStatus {
            state: RingState::OneOccupied,
            occupants: vec!["Ali".to_string()],
        });
        assert_eq!(info.state, "one_occupied");
        assert_eq!(info.occupants, ["Ali"]);
    }

    #[test]
    fn test_enter_ring_requires_name() {
        let req = EnterRingRequest { name: String::new() };
        assert!(req.validate().is_err());
    }
}
