//! # Fight Engine
//!
//! Resolves a fight between two boxer snapshots with a single random draw.
//!
//! 1. Each boxer gets a skill score from a pluggable [`SkillModel`].
//! 2. The scores become a win probability for the first boxer:
//!    `p(A) = skill(A) / (skill(A) + skill(B))`, see [`win_probability`].
//! 3. One uniform draw `r` in `[0, 1)` decides: A wins iff `r < p(A)`.
//!
//! The random source is passed in by the caller, so a seeded generator
//! reproduces the same outcomes.

use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ringside_types::{Boxer, Result, RingsideError};

/// Pounds of body weight per skill point
pub const DEFAULT_WEIGHT_FACTOR: f64 = 1.0;
/// Skill per inch of reach
pub const DEFAULT_REACH_FACTOR: f64 = 0.5;
/// Skill lost per year of age
pub const DEFAULT_AGE_FACTOR: f64 = 1.5;

// ============================================================================
// Skill Models
// ============================================================================

/// Maps a boxer's attributes to a scalar skill score
pub trait SkillModel: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and config
    fn name(&self) -> &'static str;

    fn skill(&self, boxer: &Boxer) -> f64;
}

/// `weight_factor * weight + reach_factor * reach - age_factor * age`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSkill {
    pub weight_factor: f64,
    pub reach_factor: f64,
    pub age_factor: f64,
}

impl Default for LinearSkill {
    fn default() -> Self {
        Self {
            weight_factor: DEFAULT_WEIGHT_FACTOR,
            reach_factor: DEFAULT_REACH_FACTOR,
            age_factor: DEFAULT_AGE_FACTOR,
        }
    }
}

impl SkillModel for LinearSkill {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn skill(&self, boxer: &Boxer) -> f64 {
        self.weight_factor * boxer.weight as f64 + self.reach_factor * boxer.reach
            - self.age_factor * boxer.age as f64
    }
}

/// `weight * len(name) + reach / 10 + age_modifier`, where the modifier is
/// -1 under 25, -2 over 35 and 0 otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicSkill;

impl SkillModel for ClassicSkill {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn skill(&self, boxer: &Boxer) -> f64 {
        let age_modifier = match boxer.age {
            a if a < 25 => -1.0,
            a if a > 35 => -2.0,
            _ => 0.0,
        };
        (boxer.weight as f64 * boxer.name.chars().count() as f64) + (boxer.reach / 10.0) + age_modifier
    }
}

/// Selectable skill models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillModelKind {
    #[default]
    Linear,
    Classic,
}

impl std::str::FromStr for SkillModelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "classic" => Ok(Self::Classic),
            other => Err(format!("unknown skill model: {}", other)),
        }
    }
}

// ============================================================================
// Probability
// ============================================================================

/// Probability that the boxer with `skill_a` beats the one with `skill_b`.
///
/// Returns 0.5 when the raw scores are equal, both non-positive, sum to
/// zero, or either is not finite. Otherwise the scores have a positive
/// total; a negative score on one side is floored at zero so it cannot
/// push the ratio outside `[0, 1]`.
pub fn win_probability(skill_a: f64, skill_b: f64) -> f64 {
    if !skill_a.is_finite() || !skill_b.is_finite() || skill_a == skill_b {
        return 0.5;
    }
    if (skill_a <= 0.0 && skill_b <= 0.0) || skill_a + skill_b == 0.0 {
        return 0.5;
    }

    let a = skill_a.max(0.0);
    let b = skill_b.max(0.0);
    (a / (a + b)).clamp(0.0, 1.0)
}

// ============================================================================
// Fight Outcome
// ============================================================================

/// Result of a resolved fight. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightOutcome {
    /// First boxer, in ring entry order
    pub boxer_a: String,
    /// Second boxer, in ring entry order
    pub boxer_b: String,
    pub winner: String,
    pub loser: String,
    pub skill_a: f64,
    pub skill_b: f64,
    /// Win probability of `boxer_a`
    pub probability_a: f64,
    /// The uniform draw that decided the fight
    pub draw: f64,
}

impl FightOutcome {
    pub fn a_won(&self) -> bool {
        self.winner == self.boxer_a
    }
}

// ============================================================================
// Fight Engine
// ============================================================================

/// Stateless fight resolver parameterised by a skill model
#[derive(Debug, Clone)]
pub struct FightEngine {
    model: Arc<dyn SkillModel>,
}

impl Default for FightEngine {
    fn default() -> Self {
        Self::new(LinearSkill::default())
    }
}

impl FightEngine {
    pub fn new(model: impl SkillModel + 'static) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Engine for a configured model kind; `linear` uses the given factors
    pub fn from_kind(kind: SkillModelKind, linear: LinearSkill) -> Self {
        match kind {
            SkillModelKind::Linear => Self::new(linear),
            SkillModelKind::Classic => Self::new(ClassicSkill),
        }
    }

    pub fn model(&self) -> &dyn SkillModel {
        self.model.as_ref()
    }

    /// Win probability of `a` against `b` under this engine's model
    pub fn probability(&self, a: &Boxer, b: &Boxer) -> f64 {
        win_probability(self.model.skill(a), self.model.skill(b))
    }

    /// Resolve a fight between two distinct boxers.
    pub fn resolve<R: RngCore + ?Sized>(&self, a: &Boxer, b: &Boxer, rng: &mut R) -> Result<FightOutcome> {
        if a.is_named(&b.name) {
            return Err(RingsideError::InsufficientOccupants { present: 1 });
        }

        let skill_a = self.model.skill(a);
        let skill_b = self.model.skill(b);
        let probability_a = win_probability(skill_a, skill_b);
        let draw: f64 = rng.gen();

        debug!(
            model = self.model.name(),
            boxer_a = %a.name,
            skill_a,
            boxer_b = %b.name,
            skill_b,
            probability_a,
            draw,
            "Resolving fight"
        );

        let (winner, loser) = if draw < probability_a { (a, b) } else { (b, a) };

        Ok(FightOutcome {
            boxer_a: a.name.clone(),
            boxer_b: b.name.clone(),
            winner: winner.name.clone(),
            loser: loser.name.clone(),
            skill_a,
            skill_b,
            probability_a,
            draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn boxer(name: &str, weight: i64, reach: f64, age: i64) -> Boxer {
        Boxer {
            id: 0,
            name: name.to_string(),
            weight,
            height: 70,
            reach,
            age,
            wins: 0,
            losses: 0,
            created_at: Utc::now(),
        }
    }

    /// Yields draws of exactly 0.0
    fn lowest_draw() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Yields the largest f64 below 1.0
    fn highest_draw() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// Always scores the same, so every fight is a coin flip
    #[derive(Debug)]
    struct FlatSkill(f64);

    impl SkillModel for FlatSkill {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn skill(&self, _boxer: &Boxer) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_linear_skill_formula() {
        let model = LinearSkill::default();
        let b = boxer("SmokeyOne", 180, 72.5, 28);
        assert_eq!(model.skill(&b), 180.0 + 36.25 - 42.0);

        let custom = LinearSkill {
            weight_factor: 0.0,
            reach_factor: 2.0,
            age_factor: 0.0,
        };
        assert_eq!(custom.skill(&b), 145.0);
    }

    #[test]
    fn test_classic_skill_formula() {
        let model = ClassicSkill;
        assert_eq!(model.skill(&boxer("Ali", 180, 70.0, 28)), 540.0 + 7.0);
        assert_eq!(model.skill(&boxer("Ali", 180, 70.0, 20)), 540.0 + 7.0 - 1.0);
        assert_eq!(model.skill(&boxer("Ali", 180, 70.0, 38)), 540.0 + 7.0 - 2.0);
    }

    #[test]
    fn test_probability_edge_cases() {
        assert_eq!(win_probability(3.0, 1.0), 0.75);
        assert_eq!(win_probability(10.0, 10.0), 0.5);
        assert_eq!(win_probability(0.0, 0.0), 0.5);
        assert_eq!(win_probability(-4.0, -9.0), 0.5);
        assert_eq!(win_probability(5.0, -3.0), 1.0);
        assert_eq!(win_probability(5.0, -5.0), 0.5);
        assert_eq!(win_probability(-5.0, 5.0), 0.5);
        assert_eq!(win_probability(-3.0, 5.0), 0.0);
        assert_eq!(win_probability(f64::NAN, 5.0), 0.5);
        assert_eq!(win_probability(f64::INFINITY, 5.0), 0.5);
    }

    #[test]
    fn test_draw_below_probability_favours_first_boxer() {
        let engine = FightEngine::new(FlatSkill(1.0));
        let a = boxer("Ali", 180, 70.0, 28);
        let b = boxer("Tyson", 220, 71.0, 30);

        let outcome = engine.resolve(&a, &b, &mut lowest_draw()).unwrap();
        assert_eq!(outcome.probability_a, 0.5);
        assert_eq!(outcome.winner, "Ali");
        assert_eq!(outcome.loser, "Tyson");
        assert!(outcome.a_won());

        let outcome = engine.resolve(&a, &b, &mut highest_draw()).unwrap();
        assert_eq!(outcome.winner, "Tyson");
        assert_eq!(outcome.loser, "Ali");
    }

    #[test]
    fn test_certain_win_ignores_draw() {
        let engine = FightEngine::default();
        let strong = boxer("Strong", 200, 80.0, 25);
        // age penalty drives this one's linear skill below zero
        let frail = boxer("Frail", 10, 1.0, 90);

        assert_eq!(engine.probability(&strong, &frail), 1.0);
        let outcome = engine.resolve(&strong, &frail, &mut highest_draw()).unwrap();
        assert_eq!(outcome.winner, "Strong");
        let outcome = engine.resolve(&frail, &strong, &mut lowest_draw()).unwrap();
        assert_eq!(outcome.winner, "Strong");
    }

    #[test]
    fn test_same_boxer_twice_is_rejected() {
        let engine = FightEngine::default();
        let a = boxer("Ali", 180, 70.0, 28);
        let twin = boxer("ALI", 180, 70.0, 28);
        assert_eq!(
            engine.resolve(&a, &twin, &mut lowest_draw()).unwrap_err(),
            RingsideError::InsufficientOccupants { present: 1 }
        );
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let engine = FightEngine::default();
        let a = boxer("SmokeyOne", 180, 72.5, 28);
        let b = boxer("SmokeyTwo", 190, 74.0, 30);

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| engine.resolve(&a, &b, &mut rng).unwrap().winner)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_observed_frequency_tracks_probability() {
        let engine = FightEngine::new(LinearSkill {
            weight_factor: 1.0,
            reach_factor: 0.0,
            age_factor: 0.0,
        });
        let a = boxer("Heavy", 300, 70.0, 28);
        let b = boxer("Light", 100, 70.0, 28);
        assert_eq!(engine.probability(&a, &b), 0.75);

        let mut rng = StdRng::seed_from_u64(7);
        let wins = (0..10_000)
            .filter(|_| engine.resolve(&a, &b, &mut rng).unwrap().a_won())
            .count();
        assert!((7_200..7_800).contains(&wins), "wins = {wins}");
    }

    #[test]
    fn test_engine_from_kind() {
        let linear = FightEngine::from_kind(SkillModelKind::Linear, LinearSkill::default());
        assert_eq!(linear.model().name(), "linear");
        let classic = FightEngine::from_kind(SkillModelKind::Classic, LinearSkill::default());
        assert_eq!(classic.model().name(), "classic");
        assert_eq!("Classic".parse::<SkillModelKind>().unwrap(), SkillModelKind::Classic);
        assert!("elo".parse::<SkillModelKind>().is_err());
    }

    proptest! {
        #[test]
        fn prop_probability_is_bounded(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
            let p = win_probability(a, b);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_probability_is_symmetric(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
            let sum = win_probability(a, b) + win_probability(b, a);
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_winner_is_one_of_the_pair(seed in any::<u64>()) {
            let engine = FightEngine::default();
            let a = boxer("Ali", 180, 72.5, 28);
            let b = boxer("Tyson", 220, 71.0, 30);
            let outcome = engine.resolve(&a, &b, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_ne!(&outcome.winner, &outcome.loser);
            prop_assert!(outcome.winner == "Ali" || outcome.winner == "Tyson");
            prop_assert!(outcome.loser == "Ali" || outcome.loser == "Tyson");
        }
    }
}
