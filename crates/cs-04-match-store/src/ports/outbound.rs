//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the store requires the host to provide.

use crate::domain::document::MatchDocument;
use crate::error::RepositoryError;
use async_trait::async_trait;
use shared_bus::MatchEvent;
use shared_types::MatchId;

/// Document store keyed by match id.
///
/// Production: `JsonFileRepository` (scoring-node)
/// Testing: `InMemoryMatchRepository`
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn get(&self, match_id: MatchId) -> Result<Option<MatchDocument>, RepositoryError>;

    /// Replace the document. Must be atomic per key.
    async fn put(&self, match_id: MatchId, document: &MatchDocument)
        -> Result<(), RepositoryError>;

    /// Every stored match id.
    async fn list(&self) -> Result<Vec<MatchId>, RepositoryError>;
}

/// Receiver of committed state changes.
///
/// Called exactly once per commit, in commit order, while the commit still
/// holds the match's write right. Delivery failures are the sink's concern.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: MatchEvent);
}

/// Wall clock, injectable for tests.
pub trait TimeSource: Send + Sync {
    /// Unix milliseconds.
    fn now_millis(&self) -> u64;
}
