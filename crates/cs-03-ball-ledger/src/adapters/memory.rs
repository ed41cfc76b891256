use crate::domain::entry::BallLedgerEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::ports::BallLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::MatchId;
use std::collections::HashMap;

/// In-memory ledger for tests and single-process runs.
#[derive(Default)]
pub struct InMemoryBallLedger {
    entries: RwLock<HashMap<MatchId, Vec<BallLedgerEntry>>>,
}

impl InMemoryBallLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, match_id: &MatchId) -> usize {
        self.entries.read().get(match_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl BallLedger for InMemoryBallLedger {
    async fn append(&self, match_id: MatchId, entry: BallLedgerEntry) -> LedgerResult<()> {
        let mut entries = self.entries.write();
        let log = entries.entry(match_id).or_default();
        let expected = log.last().map_or(1, |last| last.seq + 1);
        if entry.seq != expected {
            return Err(LedgerError::OutOfOrder {
                expected,
                got: entry.seq,
            });
        }
        log.push(entry);
        Ok(())
    }

    async fn entries(&self, match_id: MatchId) -> LedgerResult<Vec<BallLedgerEntry>> {
        Ok(self
            .entries
            .read()
            .get(&match_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn last_seq(&self, match_id: MatchId) -> LedgerResult<u64> {
        Ok(self
            .entries
            .read()
            .get(&match_id)
            .and_then(|log| log.last())
            .map_or(0, |entry| entry.seq))
    }
}
