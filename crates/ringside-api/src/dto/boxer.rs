//! Boxer DTOs

use chrono::{DateTime, Utc};
use ringside_types::{Boxer, NewBoxer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Register a boxer
///
/// Only the request shape is validated here. Attribute domains (non-blank
/// name, positive weight, height, reach and age) are enforced by
/// [`NewBoxer::validate`] and reported as invalid attributes.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddBoxerRequest {
    /// Unique name, compared case-insensitively
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    /// Weight in pounds, greater than 0
    pub weight: i64,
    /// Height in inches, greater than 0
    pub height: i64,
    /// Reach in inches, greater than 0
    pub reach: f64,
    /// Age in years, greater than 0
    pub age: i64,
}

impl From<AddBoxerRequest> for NewBoxer {
    fn from(req: AddBoxerRequest) -> Self {
        NewBoxer::new(req.name, req.weight, req.height, req.reach, req.age)
    }
}

/// Boxer profile with derived record fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoxerInfo {
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    /// Derived from weight, e.g. `MIDDLEWEIGHT`
    pub weight_class: String,
    pub wins: i64,
    pub losses: i64,
    pub fights: i64,
    /// `null` for boxers who have never fought
    pub win_pct: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Boxer> for BoxerInfo {
    fn from(boxer: Boxer) -> Self {
        Self {
            weight_class: boxer.weight_class().to_string(),
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
            created_at: boxer.created_at,
        }
    }
}

/// Response to a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddBoxerResponse {
    pub status: String,
    pub message: String,
    pub boxer: BoxerInfo,
}

/// Single boxer lookup
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoxerResponse {
    pub status: String,
    pub boxer: BoxerInfo,
}

/// Response to a full reset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    pub status: String,
    pub message: String,
    /// Number of boxers removed
    pub removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, weight: i64, age: i64) -> AddBoxerRequest {
        AddBoxerRequest {
            name: name.to_string(),
            weight,
            height: 70,
            reach: 72.5,
            age,
        }
    }

    #[test]
    fn test_add_boxer_validation_checks_shape_only() {
        assert!(request("Ali", 180, 28).validate().is_ok());
        assert!(request(&"x".repeat(101), 180, 28).validate().is_err());

        // attribute domains are left to the registry
        assert!(request("Ali", 0, 28).validate().is_ok());
        assert!(NewBoxer::from(request("Ali", 0, 28)).validate().is_err());
        assert!(NewBoxer::from(request("", 180, -3)).validate().is_err());
    }

    #[test]
    fn test_boxer_info_derives_record() {
        let boxer = Boxer {
            id: 7,
            name: "Ali".to_string(),
            weight: 210,
            height: 75,
            reach: 78.0,
            age: 30,
            wins: 3,
            losses: 1,
            created_at: Utc::now(),
        };
        let info = BoxerInfo::from(boxer);
        assert_eq!(info.fights, 4);
        assert_eq!(info.win_pct, Some(0.75));
        assert_eq!(info.weight_class, "HEAVYWEIGHT");
    }
}
