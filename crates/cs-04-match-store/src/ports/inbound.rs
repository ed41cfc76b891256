//! # Inbound Ports (Driving Ports)
//!
//! The API the store exposes to request handlers.

use crate::error::StoreResult;
use async_trait::async_trait;
use cs_01_role_gate::RoleChange;
use cs_02_scoring_engine::MatchState;
use cs_03_ball_ledger::BallLedgerEntry;
use shared_types::{Match, MatchCode, MatchId, ScoringEvent, UserId};
use std::sync::Arc;

#[async_trait]
pub trait MatchStoreApi: Send + Sync {
    /// Take ownership of a newly created match.
    async fn register(&self, m: Match) -> StoreResult<Arc<MatchState>>;

    /// Apply a scoring event on behalf of `actor`.
    async fn submit(
        &self,
        match_id: MatchId,
        actor: UserId,
        event: ScoringEvent,
    ) -> StoreResult<Arc<MatchState>>;

    /// Like `submit`, but only if the match is still at `expected_version`.
    async fn submit_at(
        &self,
        match_id: MatchId,
        actor: UserId,
        event: ScoringEvent,
        expected_version: u64,
    ) -> StoreResult<Arc<MatchState>>;

    /// Compensate the most recent effective scoring event.
    async fn undo(&self, match_id: MatchId, actor: UserId) -> StoreResult<Arc<MatchState>>;

    /// Current published state, for any viewer of the match.
    async fn read(&self, match_id: MatchId, user: UserId) -> StoreResult<Arc<MatchState>>;

    /// Ledger entries for audit and export, for any viewer of the match.
    async fn ledger(&self, match_id: MatchId, user: UserId) -> StoreResult<Vec<BallLedgerEntry>>;

    /// Grant or revoke a role.
    async fn administer(
        &self,
        match_id: MatchId,
        actor: UserId,
        change: RoleChange,
    ) -> StoreResult<Arc<MatchState>>;

    /// Join a match as a viewer using its code.
    async fn join_by_code(&self, code: MatchCode, actor: UserId) -> StoreResult<Arc<MatchState>>;

    /// Leave every role list of a match.
    async fn leave(&self, match_id: MatchId, actor: UserId) -> StoreResult<Arc<MatchState>>;
}
