//! Shared builders for integration flows.

use async_trait::async_trait;
use cs_03_ball_ledger::InMemoryBallLedger;
use cs_04_match_store::{
    InMemoryMatchRepository, MatchStateStore, NotificationSink, StoreConfig,
};
use parking_lot::Mutex;
use shared_bus::MatchEvent;
use shared_types::{Match, MatchCode, Player, ScoringEvent, Team, TeamSide, TossDecision, UserId};
use std::sync::Arc;

pub type MemoryStore = MatchStateStore<InMemoryMatchRepository, InMemoryBallLedger, EventLog>;

/// Sink that keeps every event for later inspection.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<MatchEvent>>,
}

impl EventLog {
    pub fn snapshot(&self) -> Vec<MatchEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl NotificationSink for EventLog {
    async fn notify(&self, event: MatchEvent) {
        self.events.lock().push(event);
    }
}

pub struct World {
    pub store: Arc<MemoryStore>,
    pub repository: Arc<InMemoryMatchRepository>,
    pub ledger: Arc<InMemoryBallLedger>,
    pub log: Arc<EventLog>,
}

impl World {
    pub fn new() -> Self {
        Self::over(
            Arc::new(InMemoryMatchRepository::new()),
            Arc::new(InMemoryBallLedger::new()),
        )
    }

    /// A store over existing storage, as after a restart.
    pub fn over(repository: Arc<InMemoryMatchRepository>, ledger: Arc<InMemoryBallLedger>) -> Self {
        let log = Arc::new(EventLog::default());
        let store = Arc::new(MatchStateStore::new(
            StoreConfig::default(),
            Arc::clone(&repository),
            Arc::clone(&ledger),
            Arc::clone(&log),
        ));
        Self {
            store,
            repository,
            ledger,
            log,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

pub fn creator() -> UserId {
    UserId::new("creator")
}

pub fn fixture_match(code: &str, overs: u32) -> Match {
    let roster = |p: &str| -> Vec<Player> {
        (1..=11).map(|i| Player::new(format!("{p}{i}"))).collect()
    };
    Match::new(
        MatchCode::parse(code).expect("valid fixture code"),
        creator(),
        "Eden Gardens",
        overs,
        [Team::new("Alpha", roster("a")), Team::new("Beta", roster("b"))],
    )
    .expect("valid fixture match")
}

pub fn toss_bat_first() -> ScoringEvent {
    ScoringEvent::Toss {
        winner: TeamSide::One,
        decision: TossDecision::Bat,
    }
}

pub fn opening() -> Vec<ScoringEvent> {
    vec![
        toss_bat_first(),
        ScoringEvent::start_innings("a1", "a2", "b1"),
    ]
}
