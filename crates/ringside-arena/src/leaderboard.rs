//! # Leaderboard
//!
//! Read-only standings derived from boxer snapshots.
//!
//! ## Orderings
//!
//! - [`LeaderboardSort::WinPct`] (default): win percentage desc, then wins
//!   desc, then name asc. Boxers without fights sort last.
//! - [`LeaderboardSort::Wins`]: wins desc, then win percentage desc, then
//!   name asc.
//!
//! ## Example
//!
//! ```ignore
//! use ringside_arena::leaderboard::{Leaderboard, LeaderboardSort};
//!
//! let board = Leaderboard::from_boxers(boxers, LeaderboardSort::WinPct);
//! for standing in board.rankings().take(10) {
//!     println!("{} {}", standing.rank, standing.name);
//! }
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ringside_types::{Boxer, RingsideError, WeightClass};

/// Sort key used for ordering only; never reported
const NO_FIGHTS_PCT: f64 = -1.0;

// ============================================================================
// Sort Selection
// ============================================================================

/// Available leaderboard orderings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    WinPct,
    Wins,
}

impl LeaderboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WinPct => "win_pct",
            Self::Wins => "wins",
        }
    }

    fn compare(&self, a: &Standing, b: &Standing) -> Ordering {
        let by_pct = || b.pct_key().total_cmp(&a.pct_key());
        let by_wins = || b.wins.cmp(&a.wins);
        let by_name = || a.name.cmp(&b.name);

        match self {
            Self::WinPct => by_pct().then_with(by_wins).then_with(by_name),
            Self::Wins => by_wins().then_with(by_pct).then_with(by_name),
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = RingsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win_pct" => Ok(Self::WinPct),
            "wins" => Ok(Self::Wins),
            other => Err(RingsideError::invalid_attribute(
                "sort_by",
                format!("'{}' is not one of win_pct, wins", other),
            )),
        }
    }
}

// ============================================================================
// Standings
// ============================================================================

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position
    pub rank: usize,
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub weight_class: WeightClass,
    pub wins: i64,
    pub losses: i64,
    pub fights: i64,
    /// `None` for boxers who have never fought
    pub win_pct: Option<f64>,
}

impl Standing {
    fn from_boxer(boxer: Boxer) -> Self {
        Self {
            rank: 0,
            weight_class: boxer.weight_class(),
            fights: boxer.fights(),
            win_pct: boxer.win_pct(),
            id: boxer.id,
            name: boxer.name,
            weight: boxer.weight,
            height: boxer.height,
            reach: boxer.reach,
            age: boxer.age,
            wins: boxer.wins,
            losses: boxer.losses,
        }
    }

    fn pct_key(&self) -> f64 {
        self.win_pct.unwrap_or(NO_FIGHTS_PCT)
    }
}

// ============================================================================
// Leaderboard
// ============================================================================

/// Ranked standings for a set of boxers
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    sort: LeaderboardSort,
    standings: Vec<Standing>,
}

impl Leaderboard {
    pub fn from_boxers(boxers: impl IntoIterator<Item = Boxer>, sort: LeaderboardSort) -> Self {
        let mut standings: Vec<Standing> = boxers.into_iter().map(Standing::from_boxer).collect();
        standings.sort_by(|a, b| sort.compare(a, b));
        for (idx, standing) in standings.iter_mut().enumerate() {
            standing.rank = idx + 1;
        }
        Self { sort, standings }
    }

    pub fn sort(&self) -> LeaderboardSort {
        self.sort
    }

    /// Iterate standings in rank order. Each call starts from the top.
    pub fn rankings(&self) -> Rankings<'_> {
        Rankings {
            inner: self.standings.iter(),
        }
    }

    /// Keep only the first `limit` standings
    pub fn truncate(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.standings.truncate(limit);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}

/// Iterator over leaderboard standings in rank order
#[derive(Debug, Clone)]
pub struct Rankings<'a> {
    inner: std::slice::Iter<'a, Standing>,
}

impl<'a> Iterator for Rankings<'a> {
    type Item = &'a Standing;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rankings<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn boxer(name: &str, wins: i64, losses: i64) -> Boxer {
        Boxer {
            id: 0,
            name: name.to_string(),
            weight: 180,
            height: 70,
            reach: 72.5,
            age: 28,
            wins,
            losses,
            created_at: Utc::now(),
        }
    }

    fn names(board: &Leaderboard) -> Vec<&str> {
        board.rankings().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("win_pct".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::WinPct);
        assert_eq!("WINS".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::Wins);
        assert!(matches!(
            "elo".parse::<LeaderboardSort>(),
            Err(RingsideError::InvalidAttributes { .. })
        ));
        assert_eq!(LeaderboardSort::default().to_string(), "win_pct");
    }

    #[test]
    fn test_win_pct_ordering() {
        let board = Leaderboard::from_boxers(
            vec![
                boxer("Rookie", 0, 0),
                boxer("Tyson", 3, 1),
                boxer("Ali", 1, 0),
                boxer("Frazier", 6, 2),
                boxer("Rocky", 0, 2),
            ],
            LeaderboardSort::WinPct,
        );

        assert_eq!(names(&board), ["Ali", "Frazier", "Tyson", "Rocky", "Rookie"]);

        let rookie = board.rankings().last().unwrap();
        assert_eq!((rookie.name.as_str(), rookie.rank), ("Rookie", 5));
        assert_eq!(rookie.win_pct, None);
        let rocky = board.rankings().find(|s| s.name == "Rocky").unwrap();
        assert_eq!(rocky.win_pct, Some(0.0));
    }

    #[test]
    fn test_wins_ordering() {
        let board = Leaderboard::from_boxers(
            vec![boxer("Ali", 1, 0), boxer("Tyson", 3, 1), boxer("Frazier", 3, 3)],
            LeaderboardSort::Wins,
        );
        assert_eq!(names(&board), ["Tyson", "Frazier", "Ali"]);
    }

    #[test]
    fn test_ties_break_on_name() {
        let board = Leaderboard::from_boxers(
            vec![boxer("Zora", 2, 2), boxer("Abe", 2, 2)],
            LeaderboardSort::WinPct,
        );
        assert_eq!(names(&board), ["Abe", "Zora"]);
    }

    #[test]
    fn test_rankings_restart_and_limit() {
        let board = Leaderboard::from_boxers(
            vec![boxer("Ali", 2, 0), boxer("Tyson", 1, 1), boxer("Rocky", 0, 1)],
            LeaderboardSort::WinPct,
        );

        let first: Vec<_> = board.rankings().collect();
        let second: Vec<_> = board.rankings().collect();
        assert_eq!(first, second);
        assert_eq!(board.rankings().len(), 3);

        let top = board.truncate(Some(2));
        assert_eq!(names(&top), ["Ali", "Tyson"]);
        assert_eq!(top.truncate(None).len(), 2);
    }

    #[test]
    fn test_empty_leaderboard() {
        let board = Leaderboard::from_boxers(Vec::new(), LeaderboardSort::Wins);
        assert!(board.is_empty());
        assert_eq!(board.rankings().next(), None);
    }

    proptest! {
        #[test]
        fn prop_win_pct_order_is_non_increasing(
            records in prop::collection::vec((0i64..20, 0i64..20), 0..30)
        ) {
            let boxers = records
                .iter()
                .enumerate()
                .map(|(i, (w, l))| boxer(&format!("B{i:02}"), *w, *l));
            let board = Leaderboard::from_boxers(boxers, LeaderboardSort::WinPct);

            let standings: Vec<_> = board.rankings().collect();
            prop_assert_eq!(standings.len(), records.len());
            for pair in standings.windows(2) {
                prop_assert!(pair[0].pct_key() >= pair[1].pct_key());
                if pair[0].pct_key() == pair[1].pct_key() {
                    prop_assert!(pair[0].wins >= pair[1].wins);
                }
            }
            for (idx, standing) in standings.iter().enumerate() {
                prop_assert_eq!(standing.rank, idx + 1);
                prop_assert_eq!(standing.fights, standing.wins + standing.losses);
            }
        }
    }
}
