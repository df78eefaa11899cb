//! Ringside Arena - Ring, fight resolution and standings
//!
//! This crate owns the in-memory side of the service: the capacity-2
//! [`Ring`], the [`FightEngine`] that resolves a fight with one random draw,
//! and the [`Leaderboard`] derived from the registry.
//!
//! # The Arena service
//!
//! [`Arena`] ties those pieces to the boxer registry. It owns exactly one
//! ring and one random source behind an async mutex, so:
//!
//! - two concurrent admissions cannot both observe a single free slot
//! - a fight holds the lock from reading the occupants through the draw,
//!   the win/loss commit and the ring clear
//! - a failed commit changes no records and leaves the ring as it was
//!
//! # Example
//!
//! ```ignore
//! use ringside_arena::{Arena, ArenaConfig};
//!
//! let arena = Arena::from_config(db.boxer_repo(), &ArenaConfig::default());
//!
//! arena.register(NewBoxer::new("Ali", 180, 70, 72.5, 28)).await?;
//! arena.register(NewBoxer::new("Tyson", 220, 71, 71.0, 30)).await?;
//! arena.enter_ring("Ali").await?;
//! arena.enter_ring("Tyson").await?;
//!
//! let report = arena.fight().await?;
//! println!("{} beat {}", report.winner.name, report.loser.name);
//! ```

pub mod fight;
pub mod leaderboard;
pub mod ring;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use ringside_db::{BoxerRepo, DbError};
use ringside_types::{Boxer, NewBoxer, Result, RingsideError};

pub use fight::{
    win_probability, ClassicSkill, FightEngine, FightOutcome, LinearSkill, SkillModel,
    SkillModelKind, DEFAULT_AGE_FACTOR, DEFAULT_REACH_FACTOR, DEFAULT_WEIGHT_FACTOR,
};
pub use leaderboard::{Leaderboard, LeaderboardSort, Rankings, Standing};
pub use ring::{Ring, RingState, RING_CAPACITY};

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Skill model used to score boxers
    #[serde(default)]
    pub skill_model: SkillModelKind,
    /// Factors for the linear skill model
    #[serde(default = "default_weight_factor")]
    pub weight_factor: f64,
    #[serde(default = "default_reach_factor")]
    pub reach_factor: f64,
    #[serde(default = "default_age_factor")]
    pub age_factor: f64,
    /// Fixed seed for reproducible fights; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_weight_factor() -> f64 {
    DEFAULT_WEIGHT_FACTOR
}

fn default_reach_factor() -> f64 {
    DEFAULT_REACH_FACTOR
}

fn default_age_factor() -> f64 {
    DEFAULT_AGE_FACTOR
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            skill_model: SkillModelKind::default(),
            weight_factor: DEFAULT_WEIGHT_FACTOR,
            reach_factor: DEFAULT_REACH_FACTOR,
            age_factor: DEFAULT_AGE_FACTOR,
            seed: None,
        }
    }
}

impl ArenaConfig {
    pub fn engine(&self) -> FightEngine {
        FightEngine::from_kind(
            self.skill_model,
            LinearSkill {
                weight_factor: self.weight_factor,
                reach_factor: self.reach_factor,
                age_factor: self.age_factor,
            },
        )
    }

    pub fn rng(&self) -> Box<dyn RngCore + Send> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        }
    }
}

/// Current ring contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingStatus {
    pub state: RingState,
    pub occupants: Vec<String>,
}

impl RingStatus {
    fn of(ring: &Ring) -> Self {
        Self {
            state: ring.state(),
            occupants: ring.occupants().to_vec(),
        }
    }
}

/// A committed fight: the outcome plus both updated records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightReport {
    pub outcome: FightOutcome,
    pub winner: Boxer,
    pub loser: Boxer,
}

struct RingSession {
    ring: Ring,
    rng: Box<dyn RngCore + Send>,
}

/// The boxing service: registry access plus one ring and one random source
pub struct Arena {
    registry: BoxerRepo,
    engine: FightEngine,
    session: Mutex<RingSession>,
}

impl Arena {
    pub fn new(registry: BoxerRepo, engine: FightEngine, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            registry,
            engine,
            session: Mutex::new(RingSession {
                ring: Ring::new(),
                rng,
            }),
        }
    }

    pub fn from_config(registry: BoxerRepo, config: &ArenaConfig) -> Self {
        info!(
            skill_model = ?config.skill_model,
            seeded = config.seed.is_some(),
            "Creating arena"
        );
        Self::new(registry, config.engine(), config.rng())
    }

    pub fn engine(&self) -> &FightEngine {
        &self.engine
    }

    // ========================================================================
    // Registry
    // ========================================================================

    pub async fn register(&self, input: NewBoxer) -> Result<Boxer> {
        let boxer = self.registry.register(&input).await.map_err(store_error)?;
        metrics::counter!("ringside_boxers_registered_total").increment(1);
        Ok(boxer.into())
    }

    pub async fn get(&self, name: &str) -> Result<Boxer> {
        Ok(self.registry.get(name).await.map_err(store_error)?.into())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Boxer> {
        Ok(self.registry.get_by_id(id).await.map_err(store_error)?.into())
    }

    pub async fn list(&self) -> Result<Vec<Boxer>> {
        let rows = self.registry.list().await.map_err(store_error)?;
        Ok(rows.into_iter().map(Boxer::from).collect())
    }

    /// Delete every boxer and empty the ring
    pub async fn reset(&self) -> Result<u64> {
        let mut session = self.session.lock().await;
        let removed = self.registry.clear_all().await.map_err(store_error)?;
        session.ring.clear();
        info!(removed, "Arena reset");
        Ok(removed)
    }

    // ========================================================================
    // Ring
    // ========================================================================

    /// Admit a registered boxer to the ring
    pub async fn enter_ring(&self, name: &str) -> Result<RingStatus> {
        let mut session = self.session.lock().await;

        let boxer = match self.registry.find_by_name(name).await.map_err(store_error)? {
            Some(boxer) => boxer,
            None => {
                warn!(boxer = %name.trim(), "Cannot enter ring, boxer not found");
                record_rejection("not_found");
                return Err(RingsideError::boxer_not_found(name.trim()));
            }
        };

        self.drop_stale_occupants(&mut session.ring).await?;

        if let Err(err) = session.ring.enter(&boxer.name) {
            record_rejection(match err {
                RingsideError::RingFull => "ring_full",
                _ => "already_in_ring",
            });
            return Err(err);
        }

        Ok(RingStatus::of(&session.ring))
    }

    /// Snapshots of the boxers currently in the ring, in entry order
    pub async fn ring_boxers(&self) -> Result<Vec<Boxer>> {
        let mut session = self.session.lock().await;
        self.drop_stale_occupants(&mut session.ring).await?;

        let mut boxers = Vec::with_capacity(session.ring.len());
        for name in session.ring.occupants() {
            boxers.push(self.registry.get(name).await.map_err(store_error)?.into());
        }
        Ok(boxers)
    }

    pub async fn ring_status(&self) -> RingStatus {
        RingStatus::of(&self.session.lock().await.ring)
    }

    pub async fn clear_ring(&self) -> RingStatus {
        let mut session = self.session.lock().await;
        session.ring.clear();
        RingStatus::of(&session.ring)
    }

    /// Resolve a fight between the two occupants and commit the result.
    ///
    /// On success the ring is cleared. If the commit fails no record
    /// changes and the ring keeps its occupants.
    pub async fn fight(&self) -> Result<FightReport> {
        let mut guard = self.session.lock().await;
        let session = &mut *guard;

        let (name_a, name_b) = {
            let (a, b) = session.ring.pair()?;
            (a.to_string(), b.to_string())
        };

        let a = self.registry.find_by_name(&name_a).await.map_err(store_error)?;
        let b = self.registry.find_by_name(&name_b).await.map_err(store_error)?;
        let (a, b): (Boxer, Boxer) = match (a, b) {
            (Some(a), Some(b)) => (a.into(), b.into()),
            (a, b) => {
                let present = usize::from(a.is_some()) + usize::from(b.is_some());
                warn!(boxer_a = %name_a, boxer_b = %name_b, "Ring held a boxer that no longer exists");
                session.ring.clear();
                return Err(RingsideError::InsufficientOccupants { present });
            }
        };

        let outcome = self.engine.resolve(&a, &b, session.rng.as_mut())?;

        let (winner, loser) = self
            .registry
            .record_result(&outcome.winner, &outcome.loser)
            .await
            .map_err(store_error)?;

        session.ring.clear();
        metrics::counter!("ringside_fights_resolved_total").increment(1);
        info!(
            winner = %outcome.winner,
            loser = %outcome.loser,
            probability_a = outcome.probability_a,
            "Fight resolved"
        );

        Ok(FightReport {
            outcome,
            winner: winner.into(),
            loser: loser.into(),
        })
    }

    // ========================================================================
    // Standings
    // ========================================================================

    pub async fn leaderboard(&self, sort: LeaderboardSort, limit: Option<usize>) -> Result<Leaderboard> {
        let boxers = self.list().await?;
        Ok(Leaderboard::from_boxers(boxers, sort).truncate(limit))
    }

    /// Empty the ring if any occupant has left the registry
    async fn drop_stale_occupants(&self, ring: &mut Ring) -> Result<()> {
        let occupants = ring.occupants().to_vec();
        for name in &occupants {
            if self.registry.find_by_name(name).await.map_err(store_error)?.is_none() {
                warn!(boxer = %name, "Ring occupant no longer registered, clearing ring");
                ring.clear();
                break;
            }
        }
        Ok(())
    }
}

fn record_rejection(reason: &'static str) {
    metrics::counter!("ringside_ring_rejections_total", "reason" => reason).increment(1);
}

fn store_error(err: DbError) -> RingsideError {
    if err.is_storage() {
        error!(error = %err, "Boxer store failure");
    }
    err.into()
}
