//! Persisted match document

use cs_02_scoring_engine::MatchState;
use serde::{Deserialize, Serialize};

/// What the document store holds per match: the latest state and the last
/// ledger sequence number folded into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDocument {
    pub state: MatchState,
    pub ledger_seq: u64,
}

impl MatchDocument {
    pub fn new(state: MatchState, ledger_seq: u64) -> Self {
        Self { state, ledger_seq }
    }
}
