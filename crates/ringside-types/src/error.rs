//! Error types for Ringside
//!
//! Every message carries a stable substring ("already exists", "Ring is full",
//! "not found", ...) that external callers match on.

use thiserror::Error;

/// Result type for Ringside operations
pub type Result<T> = std::result::Result<T, RingsideError>;

/// Ringside error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingsideError {
    // ========================================================================
    // Registry Errors
    // ========================================================================

    /// A boxer with the same name (case-insensitive) is already registered
    #[error("Boxer with name '{name}' already exists")]
    DuplicateEntity { name: String },

    /// A registration attribute is outside its domain
    #[error("Invalid {field}: {reason}")]
    InvalidAttributes { field: String, reason: String },

    /// The referenced boxer does not exist
    #[error("{what} not found")]
    NotFound { what: String },

    // ========================================================================
    // Ring Errors
    // ========================================================================

    /// The boxer already occupies the ring
    #[error("Boxer '{name}' is already in the ring")]
    AlreadyInRing { name: String },

    /// The ring already holds two boxers
    #[error("Ring is full, cannot add more boxers")]
    RingFull,

    /// A fight needs exactly two boxers in the ring
    #[error("There must be two boxers to start a fight ({present} in the ring)")]
    InsufficientOccupants { present: usize },

    // ========================================================================
    // Storage Errors
    // ========================================================================

    /// The boxer store cannot be reached or failed mid-operation
    #[error("Storage unavailable: {reason}")]
    StorageUnavailable { reason: String },
}

impl RingsideError {
    /// Create an invalid attribute error
    pub fn invalid_attribute(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttributes {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Boxer lookup by name failed
    pub fn boxer_not_found(name: &str) -> Self {
        Self::NotFound {
            what: format!("Boxer '{}'", name),
        }
    }

    /// Create a storage error
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            reason: reason.into(),
        }
    }
}
