//! # Ring
//!
//! The capacity-2 admission set. The ring only remembers boxer names, in
//! the order they entered; it never copies boxer data, so a snapshot read
//! back from the registry is always current.
//!
//! ```text
//!   Empty ──enter──▶ OneOccupied ──enter──▶ Full
//!     ▲                   │                   │
//!     └──────clear────────┴───────clear───────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ringside_types::{same_name, Result, RingsideError};

/// Number of boxers a ring holds
pub const RING_CAPACITY: usize = 2;

/// Occupancy state of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingState {
    Empty,
    OneOccupied,
    Full,
}

impl RingState {
    fn from_len(len: usize) -> Self {
        match len {
            0 => Self::Empty,
            1 => Self::OneOccupied,
            _ => Self::Full,
        }
    }
}

/// A boxing ring holding up to two boxer names
#[derive(Debug, Clone, Default)]
pub struct Ring {
    occupants: Vec<String>,
}

impl Ring {
    pub fn new() -> Self {
        Self {
            occupants: Vec::with_capacity(RING_CAPACITY),
        }
    }

    /// Admit a boxer by name.
    ///
    /// The caller is responsible for checking the boxer is registered.
    pub fn enter(&mut self, name: &str) -> Result<RingState> {
        if self.contains(name) {
            warn!(boxer = %name, "Boxer is already in the ring");
            return Err(RingsideError::AlreadyInRing {
                name: name.to_string(),
            });
        }
        if self.is_full() {
            warn!(boxer = %name, "Ring is full, cannot add more boxers");
            return Err(RingsideError::RingFull);
        }

        info!(boxer = %name, "Adding boxer to the ring");
        self.occupants.push(name.to_string());
        Ok(self.state())
    }

    /// Return to `Empty`. Idempotent.
    pub fn clear(&mut self) {
        if self.occupants.is_empty() {
            return;
        }
        info!(occupants = ?self.occupants, "Clearing the ring");
        self.occupants.clear();
    }

    /// Current names in entry order
    pub fn occupants(&self) -> &[String] {
        &self.occupants
    }

    /// The two fighters, in entry order, if the ring is full
    pub fn pair(&self) -> Result<(&str, &str)> {
        match self.occupants.as_slice() {
            [a, b] => Ok((a.as_str(), b.as_str())),
            other => Err(RingsideError::InsufficientOccupants {
                present: other.len(),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.occupants.iter().any(|o| same_name(o, name))
    }

    pub fn state(&self) -> RingState {
        RingState::from_len(self.occupants.len())
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= RING_CAPACITY
    }
}
