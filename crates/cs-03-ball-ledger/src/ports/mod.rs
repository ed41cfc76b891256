//! Ports for the ball ledger

use crate::domain::entry::BallLedgerEntry;
use crate::error::LedgerResult;
use async_trait::async_trait;
use shared_types::MatchId;

/// Append-only per-match ledger storage.
///
/// Production: `JsonLinesLedger` (scoring-node)
/// Testing: `InMemoryBallLedger`
#[async_trait]
pub trait BallLedger: Send + Sync {
    /// Append `entry`. Its `seq` must be exactly one past the last entry.
    async fn append(&self, match_id: MatchId, entry: BallLedgerEntry) -> LedgerResult<()>;

    /// Every entry for the match in sequence order.
    async fn entries(&self, match_id: MatchId) -> LedgerResult<Vec<BallLedgerEntry>>;

    /// Sequence number of the last entry, 0 when empty.
    async fn last_seq(&self, match_id: MatchId) -> LedgerResult<u64> {
        Ok(self
            .entries(match_id)
            .await?
            .last()
            .map_or(0, |entry| entry.seq))
    }
}
