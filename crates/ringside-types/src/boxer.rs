//! Boxer profile types
//!
//! A boxer is identified by its name, compared case-insensitively. Physical
//! attributes are fixed at registration; only the win/loss record changes
//! afterwards, and only through a fight commit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RingsideError};

/// A registered boxer snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boxer {
    /// Store-assigned identifier
    pub id: i64,
    /// Unique name (case-insensitive)
    pub name: String,
    /// Weight in pounds
    pub weight: i64,
    /// Height in inches
    pub height: i64,
    /// Reach in inches
    pub reach: f64,
    /// Age in years
    pub age: i64,
    /// Fights won
    pub wins: i64,
    /// Fights lost
    pub losses: i64,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl Boxer {
    /// Total fights on record
    pub fn fights(&self) -> i64 {
        self.wins + self.losses
    }

    /// Fraction of fights won, `None` if the boxer has never fought
    pub fn win_pct(&self) -> Option<f64> {
        match self.fights() {
            0 => None,
            total => Some(self.wins as f64 / total as f64),
        }
    }

    /// Weight class derived from the current weight
    pub fn weight_class(&self) -> WeightClass {
        WeightClass::from_weight(self.weight)
    }

    /// Case-insensitive identity comparison
    pub fn is_named(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }
}

/// Canonical identity of a boxer name: trimmed and Unicode-lowercased.
///
/// The registry stores this alongside the display name and enforces
/// uniqueness on it, so the store and the ring agree on who is who.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Compare two boxer names the way the registry does
pub fn same_name(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Registration request for a new boxer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoxer {
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
}

impl NewBoxer {
    pub fn new(name: impl Into<String>, weight: i64, height: i64, reach: f64, age: i64) -> Self {
        Self {
            name: name.into(),
            weight,
            height,
            reach,
            age,
        }
    }

    /// Check every attribute against its domain.
    ///
    /// Returns the first violation as [`RingsideError::InvalidAttributes`].
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RingsideError::invalid_attribute("name", "must not be blank"));
        }
        if self.weight <= 0 {
            return Err(RingsideError::invalid_attribute(
                "weight",
                format!("{} must be greater than 0", self.weight),
            ));
        }
        if self.height <= 0 {
            return Err(RingsideError::invalid_attribute(
                "height",
                format!("{} must be greater than 0", self.height),
            ));
        }
        if !self.reach.is_finite() || self.reach <= 0.0 {
            return Err(RingsideError::invalid_attribute(
                "reach",
                format!("{} must be greater than 0", self.reach),
            ));
        }
        if self.age <= 0 {
            return Err(RingsideError::invalid_attribute(
                "age",
                format!("{} must be greater than 0", self.age),
            ));
        }
        Ok(())
    }

    /// Name with surrounding whitespace removed, as stored
    pub fn normalized_name(&self) -> &str {
        self.name.trim()
    }
}

/// Weight classes, heaviest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightClass {
    Heavyweight,
    Middleweight,
    Lightweight,
    Featherweight,
    /// Below the featherweight floor of 125 lb
    Unclassified,
}

impl WeightClass {
    pub fn from_weight(weight: i64) -> Self {
        match weight {
            w if w >= 203 => Self::Heavyweight,
            w if w >= 166 => Self::Middleweight,
            w if w >= 133 => Self::Lightweight,
            w if w >= 125 => Self::Featherweight,
            _ => Self::Unclassified,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Heavyweight => "HEAVYWEIGHT",
            Self::Middleweight => "MIDDLEWEIGHT",
            Self::Lightweight => "LIGHTWEIGHT",
            Self::Featherweight => "FEATHERWEIGHT",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
