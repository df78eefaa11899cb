//! Ringside Types - Canonical domain types for the boxing ring service
//!
//! This crate has zero dependencies on other ringside crates. It defines:
//!
//! - Boxer snapshots and registration requests
//! - Weight classes derived from a boxer's weight
//! - The error taxonomy shared by the registry, the ring and the API
//!
//! # Invariants
//!
//! 1. Boxer names are unique, compared case-insensitively
//! 2. Wins and losses only ever increase, one unit at a time, in pairs
//! 3. Every failure carries a stable, matchable message

pub mod boxer;
pub mod error;

pub use boxer::*;
pub use error::*;

/// Version of the Ringside types schema
pub const TYPES_VERSION: &str = "0.1.0";
