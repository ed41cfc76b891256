//! Error types for the match store
//!
//! Every lower-level failure is recovered here as a typed `Rejection`. None
//! is fatal to the process and none leaves a partial commit behind.

use cs_01_role_gate::AccessError;
use cs_02_scoring_engine::ScoringError;
use cs_03_ball_ledger::LedgerError;
use shared_types::PlayerId;
use thiserror::Error;

/// Failure of the document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Codec error: {0}")]
    Codec(String),
}

/// Why a request was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Role insufficient for the action
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Unknown match or match code
    #[error("Not found: {0}")]
    NotFound(String),

    /// Event kind invalid for the current state
    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    /// Bowler bowled the previous over
    #[error("Illegal bowler: {0} bowled the previous over")]
    IllegalBowler(PlayerId),

    /// Malformed runs or ids, or an invalid role change
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Mutation attempted after the match ended
    #[error("Match is complete")]
    MatchComplete,

    /// The per-match write right was not acquired in time
    #[error("Match is busy; gave up after {waited_ms}ms")]
    Busy { waited_ms: u64 },

    /// The caller's view of the match is out of date
    #[error("Stale version: expected {expected}, current {actual}")]
    StaleVersion { expected: u64, actual: u64 },

    /// Persistence failed before the commit was acknowledged
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Rejection {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Unauthorized(_) => "unauthorized",
            Rejection::NotFound(_) => "not_found",
            Rejection::IllegalTransition(_) => "illegal_transition",
            Rejection::IllegalBowler(_) => "illegal_bowler",
            Rejection::InvalidEvent(_) => "invalid_event",
            Rejection::MatchComplete => "match_complete",
            Rejection::Busy { .. } => "busy",
            Rejection::StaleVersion { .. } => "stale_version",
            Rejection::Storage(_) => "storage",
        }
    }
}

impl From<AccessError> for Rejection {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized { .. } => Rejection::Unauthorized(err.to_string()),
            AccessError::NotFound(what) => Rejection::NotFound(what),
            AccessError::CreatorImmutable
            | AccessError::AlreadyMember { .. }
            | AccessError::NotMember { .. } => Rejection::InvalidEvent(err.to_string()),
        }
    }
}

impl From<ScoringError> for Rejection {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Access(access) => access.into(),
            ScoringError::IllegalTransition { .. } | ScoringError::AwaitingBatsman => {
                Rejection::IllegalTransition(err.to_string())
            }
            ScoringError::IllegalBowler(bowler) => Rejection::IllegalBowler(bowler),
            ScoringError::InvalidEvent(reason) => Rejection::InvalidEvent(reason),
            ScoringError::MatchComplete => Rejection::MatchComplete,
        }
    }
}

impl From<LedgerError> for Rejection {
    fn from(err: LedgerError) -> Self {
        Rejection::Storage(err.to_string())
    }
}

impl From<RepositoryError> for Rejection {
    fn from(err: RepositoryError) -> Self {
        Rejection::Storage(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, Rejection>;

#[cfg(test)]
mod tests {
    use super::*;
    use cs_01_role_gate::Action;
    use shared_types::{EventKind, Phase, UserId};

    #[test]
    fn test_scoring_errors_map_to_taxonomy() {
        let illegal: Rejection = ScoringError::IllegalTransition {
            event: EventKind::Wicket,
            phase: Phase::TossDone,
        }
        .into();
        assert_eq!(illegal.code(), "illegal_transition");

        let waiting: Rejection = ScoringError::AwaitingBatsman.into();
        assert_eq!(waiting.code(), "illegal_transition");

        let denied: Rejection = ScoringError::Access(AccessError::Unauthorized {
            user: UserId::new("fan"),
            action: Action::Score,
        })
        .into();
        assert_eq!(denied.code(), "unauthorized");
    }

    #[test]
    fn test_role_errors_are_invalid_events() {
        let rejection: Rejection = AccessError::CreatorImmutable.into();
        assert_eq!(rejection.code(), "invalid_event");
    }
}
