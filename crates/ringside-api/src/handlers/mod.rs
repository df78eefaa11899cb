//! API Handlers
//!
//! Request handlers for all API endpoints.
//! Each module handles a specific domain.

pub mod boxer;
pub mod health;
pub mod leaderboard;
pub mod ring;

pub use health::*;
