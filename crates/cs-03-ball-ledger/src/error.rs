//! Error types for the ball ledger

use cs_02_scoring_engine::ScoringError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Appends must carry the next sequence number.
    #[error("out-of-order append: expected seq {expected}, got {got}")]
    OutOfOrder { expected: u64, got: u64 },

    /// A recorded event no longer applies during replay.
    #[error("replay failed at seq {seq}: {source}")]
    Replay {
        seq: u64,
        #[source]
        source: ScoringError,
    },

    /// An undo entry with nothing left to compensate.
    #[error("undo at seq {0} has no event to compensate")]
    DanglingUndo(u64),

    #[error("ledger storage error: {0}")]
    Storage(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
