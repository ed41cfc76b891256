//! Match State Store - single writer per match, atomic publish
//!
//! Every mutation of a match runs as one commit while holding that match's
//! write right:
//!
//! 1. validate (version check, role gate, transition)
//! 2. append to the ball ledger
//! 3. write the match document
//! 4. swap the published state
//! 5. notify
//!
//! The commit runs on its own task so a caller that gives up mid-flight
//! never leaves half a commit behind.

use crate::adapters::SystemClock;
use crate::config::StoreConfig;
use crate::domain::document::MatchDocument;
use crate::domain::registry::{Registry, Slot};
use crate::error::{Rejection, StoreResult};
use crate::ports::{MatchRepository, MatchStoreApi, NotificationSink, TimeSource};
use async_trait::async_trait;
use cs_01_role_gate::{
    apply_role_change, authorize, Action, RoleChange, RoleGateApi, RoleGateService,
};
use cs_02_scoring_engine::{apply, replay_events, MatchState, RoleContext, Transition};
use cs_03_ball_ledger::{effective_entries, replay, BallLedger, BallLedgerEntry};
use shared_bus::MatchEvent;
use shared_types::{Match, MatchCode, MatchId, MatchStatus, Notification, ScoringEvent, UserId};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A mutation waiting for the write right.
enum Command {
    Score {
        actor: UserId,
        event: ScoringEvent,
        expected: Option<u64>,
    },
    Roles {
        actor: UserId,
        change: RoleChange,
    },
    Recover {
        document: MatchDocument,
    },
}

/// Outbound ports shared with commit tasks.
struct Pipeline<R, L, N> {
    repository: Arc<R>,
    ledger: Arc<L>,
    sink: Arc<N>,
    clock: Arc<dyn TimeSource>,
}

/// The match state store.
pub struct MatchStateStore<R, L, N> {
    config: StoreConfig,
    registry: Arc<Registry>,
    gate: RoleGateService<Registry>,
    pipeline: Arc<Pipeline<R, L, N>>,
}

impl<R, L, N> MatchStateStore<R, L, N>
where
    R: MatchRepository + 'static,
    L: BallLedger + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(config: StoreConfig, repository: Arc<R>, ledger: Arc<L>, sink: Arc<N>) -> Self {
        Self::with_clock(config, repository, ledger, sink, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: StoreConfig,
        repository: Arc<R>,
        ledger: Arc<L>,
        sink: Arc<N>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        let registry = Arc::new(Registry::default());
        Self {
            config,
            gate: RoleGateService::new(Arc::clone(&registry)),
            registry,
            pipeline: Arc::new(Pipeline {
                repository,
                ledger,
                sink,
                clock,
            }),
        }
    }

    /// Published state without an authorization check, for in-process
    /// collaborators.
    pub fn load(&self, match_id: MatchId) -> StoreResult<Arc<MatchState>> {
        self.registry
            .get(&match_id)
            .map(|slot| slot.load())
            .ok_or_else(|| Rejection::NotFound(format!("match {match_id}")))
    }

    /// Rebuild one match from its document and its ledger.
    ///
    /// The ledger is authoritative. A document that trails the ledger is
    /// brought forward; one that claims more entries than the ledger holds
    /// is refused.
    pub async fn recover(&self, match_id: MatchId) -> StoreResult<Arc<MatchState>> {
        let document = self
            .pipeline
            .repository
            .get(match_id)
            .await?
            .ok_or_else(|| Rejection::NotFound(format!("match {match_id}")))?;
        let slot = self
            .registry
            .insert(document.state.clone(), document.ledger_seq);
        self.run_on(slot, Command::Recover { document }).await
    }

    /// Recover every stored match. Matches that fail to recover are logged
    /// and skipped.
    pub async fn recover_all(&self) -> StoreResult<Vec<MatchId>> {
        let ids = self.pipeline.repository.list().await?;
        let mut recovered = Vec::with_capacity(ids.len());
        for match_id in ids {
            match self.recover(match_id).await {
                Ok(_) => recovered.push(match_id),
                Err(err) => warn!(%match_id, error = %err, "Match not recovered"),
            }
        }
        info!(recovered = recovered.len(), "Recovery finished");
        Ok(recovered)
    }

    async fn run_exclusive(
        &self,
        match_id: MatchId,
        command: Command,
    ) -> StoreResult<Arc<MatchState>> {
        let slot = self
            .registry
            .get(&match_id)
            .ok_or_else(|| Rejection::NotFound(format!("match {match_id}")))?;
        self.run_on(slot, command).await
    }

    async fn run_on(&self, slot: Arc<Slot>, command: Command) -> StoreResult<Arc<MatchState>> {
        let started = Instant::now();
        let guard = tokio::time::timeout(
            self.config.submit_timeout,
            Arc::clone(&slot.writer).lock_owned(),
        )
        .await
        .map_err(|_| {
            let waited_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            debug!(match_id = %slot.load().id(), waited_ms, "Write right not acquired");
            Rejection::Busy { waited_ms }
        })?;

        let pipeline = Arc::clone(&self.pipeline);
        tokio::spawn(async move {
            let _guard = guard;
            pipeline.execute(&slot, command).await
        })
        .await
        .map_err(|err| Rejection::Storage(format!("commit task failed: {err}")))?
    }
}

impl<R, L, N> Pipeline<R, L, N>
where
    R: MatchRepository,
    L: BallLedger,
    N: NotificationSink,
{
    async fn execute(&self, slot: &Slot, command: Command) -> StoreResult<Arc<MatchState>> {
        match command {
            Command::Score {
                actor,
                event,
                expected,
            } => self.score(slot, actor, event, expected).await,
            Command::Roles { actor, change } => self.change_roles(slot, actor, change).await,
            Command::Recover { document } => self.recover(slot, document).await,
        }
    }

    async fn score(
        &self,
        slot: &Slot,
        actor: UserId,
        event: ScoringEvent,
        expected: Option<u64>,
    ) -> StoreResult<Arc<MatchState>> {
        let current = slot.load();
        let match_id = current.id();
        if let Some(expected) = expected {
            if expected != current.version {
                return Err(Rejection::StaleVersion {
                    expected,
                    actual: current.version,
                });
            }
        }

        let (transition, undoes) = match event {
            ScoringEvent::Undo => self.undo(&current, &actor).await?,
            _ => (apply(&current, &event, &RoleContext::new(actor.clone()))?, None),
        };
        let Transition {
            mut state,
            notifications,
        } = transition;
        state.version = current.version + 1;

        let seq = slot.ledger_seq() + 1;
        let entry = self.entry(seq, &state, actor.clone(), event, undoes);
        let kind = entry.kind();
        self.ledger.append(match_id, entry).await?;
        slot.set_ledger_seq(seq);

        // The ledger already holds the commit; a stale document is brought
        // forward on the next write or on recovery.
        if let Err(err) = self
            .repository
            .put(match_id, &MatchDocument::new(state.clone(), seq))
            .await
        {
            warn!(%match_id, seq, error = %err, "Match document not written");
        }

        let published = Arc::new(state);
        slot.publish(Arc::clone(&published));
        info!(
            %match_id,
            version = published.version,
            seq,
            event = %kind,
            phase = %published.phase,
            "Scoring event committed"
        );

        self.sink
            .notify(MatchEvent::StateCommitted {
                match_id,
                version: published.version,
                actor,
                summary: published.summary(),
                notifications,
            })
            .await;
        Ok(published)
    }

    /// Recompute the state without the most recent effective entry.
    async fn undo(
        &self,
        current: &MatchState,
        actor: &UserId,
    ) -> StoreResult<(Transition, Option<u64>)> {
        authorize(&current.match_info, actor, Action::Score)?;
        if current.is_complete() {
            return Err(Rejection::MatchComplete);
        }

        let entries = self.ledger.entries(current.id()).await?;
        let mut effective = effective_entries(&entries);
        let undone = effective
            .pop()
            .ok_or_else(|| Rejection::InvalidEvent("nothing to undo".into()))?;

        let mut seed = current.match_info.clone();
        seed.status = MatchStatus::Upcoming;
        let state = replay_events(
            MatchState::new(seed),
            effective.iter().map(|entry| &entry.event),
        )?;
        debug!(match_id = %current.id(), undone = undone.seq, "Undo recomputed state");

        Ok((
            Transition {
                state,
                notifications: vec![Notification::EventUndone { seq: undone.seq }],
            },
            Some(undone.seq),
        ))
    }

    fn entry(
        &self,
        seq: u64,
        state: &MatchState,
        actor: UserId,
        event: ScoringEvent,
        undoes: Option<u64>,
    ) -> BallLedgerEntry {
        let innings = state.current_innings();
        BallLedgerEntry {
            seq,
            innings: innings.map_or(0, |i| i.number),
            over: innings.map_or(0, |i| i.over.number),
            ball: innings.map_or(0, |i| u32::try_from(i.over.balls.len()).unwrap_or(u32::MAX)),
            actor,
            event,
            score: state.snapshot(),
            undoes,
            recorded_at: self.clock.now_millis(),
        }
    }

    /// Role changes are not ledgered, so the document write must succeed.
    async fn change_roles(
        &self,
        slot: &Slot,
        actor: UserId,
        change: RoleChange,
    ) -> StoreResult<Arc<MatchState>> {
        let current = slot.load();
        let match_id = current.id();

        let mut next = (*current).clone();
        apply_role_change(&mut next.match_info, &actor, &change)?;
        next.version = current.version + 1;

        self.repository
            .put(match_id, &MatchDocument::new(next.clone(), slot.ledger_seq()))
            .await?;

        let published = Arc::new(next);
        slot.publish(Arc::clone(&published));
        info!(%match_id, version = published.version, %actor, ?change, "Roles changed");

        self.sink
            .notify(MatchEvent::RolesChanged {
                match_id,
                version: published.version,
                actor,
            })
            .await;
        Ok(published)
    }

    async fn recover(&self, slot: &Slot, document: MatchDocument) -> StoreResult<Arc<MatchState>> {
        let match_id = document.state.id();
        let entries = self.ledger.entries(match_id).await?;
        let last_seq = entries.last().map_or(0, |entry| entry.seq);
        if last_seq < document.ledger_seq {
            return Err(Rejection::Storage(format!(
                "document for {match_id} references ledger seq {}, ledger ends at {last_seq}",
                document.ledger_seq
            )));
        }

        let mut state = replay(document.state.match_info.clone(), &entries)?;
        let ahead = last_seq - document.ledger_seq;
        state.version = document.state.version + ahead;
        if ahead > 0 {
            warn!(%match_id, ahead, "Match document trailed the ledger");
        } else if state != document.state {
            warn!(%match_id, "Match document disagreed with ledger replay");
        }

        let document = MatchDocument::new(state, last_seq);
        self.repository.put(match_id, &document).await?;
        slot.set_ledger_seq(last_seq);

        let published = Arc::new(document.state);
        slot.publish(Arc::clone(&published));
        info!(
            %match_id,
            version = published.version,
            seq = last_seq,
            phase = %published.phase,
            "Match recovered"
        );

        self.sink
            .notify(MatchEvent::MatchRecovered {
                match_id,
                version: published.version,
            })
            .await;
        Ok(published)
    }
}

#[async_trait]
impl<R, L, N> MatchStoreApi for MatchStateStore<R, L, N>
where
    R: MatchRepository + 'static,
    L: BallLedger + 'static,
    N: NotificationSink + 'static,
{
    async fn register(&self, m: Match) -> StoreResult<Arc<MatchState>> {
        let match_id = m.id;
        let code = m.code.clone();
        let reservation = self.registry.try_reserve(match_id, &code)?;

        let state = MatchState::new(m);
        self.pipeline
            .repository
            .put(match_id, &MatchDocument::new(state.clone(), 0))
            .await?;
        let slot = reservation.commit(state);
        info!(%match_id, %code, "Match registered");

        self.pipeline
            .sink
            .notify(MatchEvent::MatchRegistered { match_id, code })
            .await;
        Ok(slot.load())
    }

    async fn submit(
        &self,
        match_id: MatchId,
        actor: UserId,
        event: ScoringEvent,
    ) -> StoreResult<Arc<MatchState>> {
        self.run_exclusive(
            match_id,
            Command::Score {
                actor,
                event,
                expected: None,
            },
        )
        .await
    }

    async fn submit_at(
        &self,
        match_id: MatchId,
        actor: UserId,
        event: ScoringEvent,
        expected_version: u64,
    ) -> StoreResult<Arc<MatchState>> {
        self.run_exclusive(
            match_id,
            Command::Score {
                actor,
                event,
                expected: Some(expected_version),
            },
        )
        .await
    }

    async fn undo(&self, match_id: MatchId, actor: UserId) -> StoreResult<Arc<MatchState>> {
        self.submit(match_id, actor, ScoringEvent::Undo).await
    }

    async fn read(&self, match_id: MatchId, user: UserId) -> StoreResult<Arc<MatchState>> {
        self.gate.authorize(&match_id, &user, Action::Read)?;
        self.load(match_id)
    }

    async fn ledger(&self, match_id: MatchId, user: UserId) -> StoreResult<Vec<BallLedgerEntry>> {
        self.gate.authorize(&match_id, &user, Action::Read)?;
        Ok(self.pipeline.ledger.entries(match_id).await?)
    }

    async fn administer(
        &self,
        match_id: MatchId,
        actor: UserId,
        change: RoleChange,
    ) -> StoreResult<Arc<MatchState>> {
        self.run_exclusive(match_id, Command::Roles { actor, change })
            .await
    }

    async fn join_by_code(&self, code: MatchCode, actor: UserId) -> StoreResult<Arc<MatchState>> {
        let match_id = self
            .registry
            .resolve_code(&code)
            .ok_or_else(|| Rejection::NotFound(format!("match code {code}")))?;
        self.administer(match_id, actor, RoleChange::Join { code })
            .await
    }

    async fn leave(&self, match_id: MatchId, actor: UserId) -> StoreResult<Arc<MatchState>> {
        self.administer(match_id, actor, RoleChange::Leave).await
    }
}
