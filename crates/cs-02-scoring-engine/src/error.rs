//! Error types for the scoring engine

use cs_01_role_gate::AccessError;
use shared_types::{EventKind, Phase, PlayerId};
use thiserror::Error;

/// Typed rejection of a scoring event.
///
/// A rejected event leaves the input state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The actor lacks the capability for the event's action class.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The event kind is not accepted in the current phase.
    #[error("{event} is not valid in phase {phase}")]
    IllegalTransition { event: EventKind, phase: Phase },

    /// A delivery was submitted while one end of the crease is vacant.
    #[error("a replacement batsman must be selected before the next delivery")]
    AwaitingBatsman,

    /// The bowler bowled the immediately preceding over.
    #[error("bowler {0} cannot bowl consecutive overs")]
    IllegalBowler(PlayerId),

    /// Malformed runs or identifiers.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// The match has reached its terminal phase.
    #[error("match is complete")]
    MatchComplete,
}

impl ScoringError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ScoringError::InvalidEvent(reason.into())
    }
}

pub type ScoringResult<T> = Result<T, ScoringError>;
