//! # Error Types
//!
//! Errors raised while constructing shared entities.

use thiserror::Error;

/// Errors from building or validating a `Match`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Overs per innings must be between one and the limit.
    #[error("Invalid overs per innings: {0}")]
    InvalidOvers(u32),

    /// A team needs at least two players to bat.
    #[error("Team '{team}' has {size} players, need at least 2")]
    RosterTooSmall { team: String, size: usize },

    /// Player names identify players and must be unique within a roster.
    #[error("Duplicate player '{player}' in team '{team}'")]
    DuplicatePlayer { team: String, player: String },

    /// Both teams share a name.
    #[error("Both teams are named '{0}'")]
    DuplicateTeamName(String),

    /// Match code is not six uppercase alphanumerics.
    #[error("Invalid match code: {0}")]
    InvalidMatchCode(String),
}
