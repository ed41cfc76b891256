//! # Shared Types Crate
//!
//! This crate contains the match entities and the scoring event vocabulary
//! shared by every scoring subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Explicit Context**: Role sets live on the `Match` entity itself; no
//!   subsystem keeps ambient role state.
//! - **Immutable Inputs**: A `ScoringEvent` is never mutated after creation.

pub mod entities;
pub mod errors;
pub mod match_code;
pub mod notifications;
pub mod scoring_event;

pub use entities::*;
pub use errors::*;
pub use match_code::MatchCode;
pub use notifications::*;
pub use scoring_event::*;

/// Balls in one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Longest innings a match may be created with.
pub const MAX_OVERS: u32 = 100;

/// Upper bound on wickets in an innings with a full eleven-player roster.
pub const MAX_WICKETS: u32 = 10;
