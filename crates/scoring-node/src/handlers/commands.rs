use cs_01_role_gate::{Role, RoleChange};
use cs_02_scoring_engine::MatchState;
use cs_03_ball_ledger::{BallLedger, BallLedgerEntry};
use cs_04_match_store::{
    MatchRepository, MatchStateStore, MatchStoreApi, NotificationSink, Rejection, StoreResult,
};
use serde::{Deserialize, Serialize};
use shared_types::{Match, MatchCode, MatchId, MatchSummary, ScoringEvent, Team, UserId, Visibility};
use std::sync::Arc;
use tracing::{debug, warn};

/// Generated codes retried on collision before giving up.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Fields for registering a new match.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMatch {
    pub actor: UserId,
    pub venue: String,
    pub overs: u32,
    pub teams: [Team; 2],
    #[serde(default)]
    pub visibility: Visibility,
    /// Unix seconds.
    #[serde(default)]
    pub scheduled_start: u64,
    /// Generated when absent.
    #[serde(default)]
    pub code: Option<MatchCode>,
}

/// One command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    Register(RegisterMatch),
    Submit {
        match_id: MatchId,
        actor: UserId,
        event: ScoringEvent,
        #[serde(default)]
        expected_version: Option<u64>,
    },
    Undo {
        match_id: MatchId,
        actor: UserId,
    },
    Read {
        match_id: MatchId,
        actor: UserId,
    },
    Ledger {
        match_id: MatchId,
        actor: UserId,
    },
    Join {
        code: MatchCode,
        actor: UserId,
    },
    Leave {
        match_id: MatchId,
        actor: UserId,
    },
    Grant {
        match_id: MatchId,
        actor: UserId,
        user: UserId,
        role: Role,
    },
    Revoke {
        match_id: MatchId,
        actor: UserId,
        user: UserId,
        role: Role,
    },
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Registered {
        match_id: MatchId,
        code: MatchCode,
    },
    Committed {
        summary: MatchSummary,
    },
    State {
        state: MatchState,
    },
    Ledger {
        entries: Vec<BallLedgerEntry>,
    },
    Rejected {
        reason: &'static str,
        message: String,
    },
    BadRequest {
        message: String,
    },
}

impl Response {
    fn rejected(rejection: &Rejection) -> Self {
        Response::Rejected {
            reason: rejection.code(),
            message: rejection.to_string(),
        }
    }

    fn committed(state: &MatchState) -> Self {
        Response::Committed {
            summary: state.summary(),
        }
    }
}

pub struct CommandHandler<R, L, N> {
    store: Arc<MatchStateStore<R, L, N>>,
}

impl<R, L, N> CommandHandler<R, L, N>
where
    R: MatchRepository + 'static,
    L: BallLedger + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(store: Arc<MatchStateStore<R, L, N>>) -> Self {
        Self { store }
    }

    pub async fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                debug!(error = %err, "Malformed command");
                Response::BadRequest {
                    message: err.to_string(),
                }
            }
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::Register(request) => return self.register(request).await,
            Request::Submit {
                match_id,
                actor,
                event,
                expected_version: Some(expected),
            } => self
                .store
                .submit_at(match_id, actor, event, expected)
                .await
                .map(|s| Response::committed(&s)),
            Request::Submit {
                match_id,
                actor,
                event,
                expected_version: None,
            } => self
                .store
                .submit(match_id, actor, event)
                .await
                .map(|s| Response::committed(&s)),
            Request::Undo { match_id, actor } => self
                .store
                .undo(match_id, actor)
                .await
                .map(|s| Response::committed(&s)),
            Request::Read { match_id, actor } => self
                .store
                .read(match_id, actor)
                .await
                .map(|s| Response::State {
                    state: (*s).clone(),
                }),
            Request::Ledger { match_id, actor } => self
                .store
                .ledger(match_id, actor)
                .await
                .map(|entries| Response::Ledger { entries }),
            Request::Join { code, actor } => self
                .store
                .join_by_code(code, actor)
                .await
                .map(|s| Response::committed(&s)),
            Request::Leave { match_id, actor } => self
                .store
                .leave(match_id, actor)
                .await
                .map(|s| Response::committed(&s)),
            Request::Grant {
                match_id,
                actor,
                user,
                role,
            } => self
                .administer(match_id, actor, RoleChange::Grant { user, role })
                .await,
            Request::Revoke {
                match_id,
                actor,
                user,
                role,
            } => self
                .administer(match_id, actor, RoleChange::Revoke { user, role })
                .await,
        };

        result.unwrap_or_else(|rejection| {
            warn!(reason = rejection.code(), %rejection, "Command rejected");
            Response::rejected(&rejection)
        })
    }

    async fn administer(
        &self,
        match_id: MatchId,
        actor: UserId,
        change: RoleChange,
    ) -> StoreResult<Response> {
        self.store
            .administer(match_id, actor, change)
            .await
            .map(|s| Response::committed(&s))
    }

    async fn register(&self, request: RegisterMatch) -> Response {
        let mut attempts = 0;
        loop {
            let code = match &request.code {
                Some(code) => code.clone(),
                None => MatchCode::generate(&mut rand::thread_rng()),
            };
            let m = match Match::new(
                code,
                request.actor.clone(),
                request.venue.clone(),
                request.overs,
                request.teams.clone(),
            ) {
                Ok(m) => m
                    .with_visibility(request.visibility)
                    .with_start(request.scheduled_start),
                Err(err) => {
                    return Response::BadRequest {
                        message: err.to_string(),
                    }
                }
            };

            match self.store.register(m).await {
                Ok(state) => {
                    return Response::Registered {
                        match_id: state.id(),
                        code: state.match_info.code.clone(),
                    }
                }
                Err(Rejection::InvalidEvent(reason))
                    if request.code.is_none() && attempts < MAX_CODE_ATTEMPTS =>
                {
                    debug!(%reason, attempts, "Generated match code collided");
                    attempts += 1;
                }
                Err(rejection) => {
                    warn!(reason = rejection.code(), %rejection, "Registration rejected");
                    return Response::rejected(&rejection);
                }
            }
        }
    }
}
