//! Test doubles for the outbound ports

use super::outbound::{MatchRepository, NotificationSink, TimeSource};
use crate::adapters::InMemoryMatchRepository;
use crate::domain::document::MatchDocument;
use crate::error::RepositoryError;
use async_trait::async_trait;
use cs_03_ball_ledger::{BallLedger, BallLedgerEntry, InMemoryBallLedger, LedgerResult};
use parking_lot::Mutex;
use shared_bus::MatchEvent;
use shared_types::MatchId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Collects every notification in arrival order.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<MatchEvent>>,
}

impl RecordingSink {
    pub fn versions(&self) -> Vec<u64> {
        self.events
            .lock()
            .iter()
            .filter_map(MatchEvent::version)
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, event: MatchEvent) {
        self.events.lock().push(event);
    }
}

pub struct FixedClock(pub u64);

impl TimeSource for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// In-memory repository whose writes can be switched off.
#[derive(Default)]
pub struct FlakyRepository {
    pub inner: InMemoryMatchRepository,
    pub failing: AtomicBool,
}

#[async_trait]
impl MatchRepository for FlakyRepository {
    async fn get(&self, match_id: MatchId) -> Result<Option<MatchDocument>, RepositoryError> {
        self.inner.get(match_id).await
    }

    async fn put(
        &self,
        match_id: MatchId,
        document: &MatchDocument,
    ) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io("disk unavailable".into()));
        }
        self.inner.put(match_id, document).await
    }

    async fn list(&self) -> Result<Vec<MatchId>, RepositoryError> {
        self.inner.list().await
    }
}

/// In-memory repository that takes a while to write.
pub struct SlowRepository {
    pub inner: InMemoryMatchRepository,
    pub delay: Duration,
}

impl SlowRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryMatchRepository::new(),
            delay,
        }
    }
}

#[async_trait]
impl MatchRepository for SlowRepository {
    async fn get(&self, match_id: MatchId) -> Result<Option<MatchDocument>, RepositoryError> {
        self.inner.get(match_id).await
    }

    async fn put(
        &self,
        match_id: MatchId,
        document: &MatchDocument,
    ) -> Result<(), RepositoryError> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(match_id, document).await
    }

    async fn list(&self) -> Result<Vec<MatchId>, RepositoryError> {
        self.inner.list().await
    }
}

/// In-memory ledger with a delay on every append, to hold the write right.
pub struct SlowLedger {
    pub inner: InMemoryBallLedger,
    pub delay: Duration,
}

impl SlowLedger {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryBallLedger::new(),
            delay,
        }
    }
}

#[async_trait]
impl BallLedger for SlowLedger {
    async fn append(&self, match_id: MatchId, entry: BallLedgerEntry) -> LedgerResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.append(match_id, entry).await
    }

    async fn entries(&self, match_id: MatchId) -> LedgerResult<Vec<BallLedgerEntry>> {
        self.inner.entries(match_id).await
    }
}
