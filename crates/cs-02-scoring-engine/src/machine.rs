//! The scoring state machine
//!
//! `apply` authorizes the actor and then runs `transition`, a pure function
//! from (state, event) to the next state and the notifications it emits.
//! Transitions work on a copy of the input state, so a rejection never
//! leaves a partial mutation behind.

use crate::domain::innings::{FallOfWicket, Innings, OverState};
use crate::domain::state::{all_out_threshold, MatchState, TossOutcome};
use crate::error::{ScoringError, ScoringResult};
use cs_01_role_gate::{authorize, Action};
use shared_types::{
    BallSymbol, Dismissal, EventKind, Margin, MatchResult, MatchStatus, Notification, Phase,
    PlayerId, ScoringEvent, Team, TeamSide, TossDecision, UserId,
};
use tracing::debug;

/// Largest run count accepted for a single delivery.
pub const MAX_RUNS_PER_BALL: u8 = 6;

/// Charged for every wide and no-ball.
pub const PENALTY_RUNS: u32 = 1;

/// Who is submitting the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleContext {
    pub actor: UserId,
}

impl RoleContext {
    pub fn new(actor: UserId) -> Self {
        Self { actor }
    }
}

/// Result of an accepted event.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: MatchState,
    pub notifications: Vec<Notification>,
}

/// Authorize and apply `event` to `state`.
pub fn apply(
    state: &MatchState,
    event: &ScoringEvent,
    ctx: &RoleContext,
) -> ScoringResult<Transition> {
    authorize(&state.match_info, &ctx.actor, Action::for_event(event))?;
    transition(state, event)
}

/// Apply `event` to `state` without an authorization check.
pub fn transition(state: &MatchState, event: &ScoringEvent) -> ScoringResult<Transition> {
    if state.is_complete() {
        return Err(ScoringError::MatchComplete);
    }

    let mut next = state.clone();
    let mut out = Vec::new();
    match event {
        ScoringEvent::Toss { winner, decision } => toss(&mut next, *winner, *decision, &mut out)?,
        ScoringEvent::StartInnings {
            striker,
            non_striker,
            bowler,
        } => start_innings(&mut next, striker, non_striker, bowler, &mut out)?,
        ScoringEvent::SelectBowler { bowler } => select_bowler(&mut next, bowler, &mut out)?,
        ScoringEvent::SelectBatsman { batsman } => select_batsman(&mut next, batsman, &mut out)?,
        ScoringEvent::Undo => {
            return Err(ScoringError::invalid(
                "undo is resolved against the ball ledger",
            ))
        }
        delivery => deliver(&mut next, delivery, &mut out)?,
    }

    Ok(Transition {
        state: next,
        notifications: out,
    })
}

/// Fold `events` over `seed` without authorization checks.
///
/// Used to rebuild state from ledger entries, which were authorized when
/// they were appended.
pub fn replay_events<'a, I>(seed: MatchState, events: I) -> ScoringResult<MatchState>
where
    I: IntoIterator<Item = &'a ScoringEvent>,
{
    events
        .into_iter()
        .try_fold(seed, |state, event| transition(&state, event).map(|t| t.state))
}

fn illegal(event: EventKind, phase: Phase) -> ScoringError {
    ScoringError::IllegalTransition { event, phase }
}

fn require_id(id: &PlayerId, role: &str) -> ScoringResult<()> {
    if id.is_blank() {
        return Err(ScoringError::invalid(format!("{role} id is empty")));
    }
    Ok(())
}

fn check_runs(runs: u8) -> ScoringResult<u32> {
    if runs > MAX_RUNS_PER_BALL {
        return Err(ScoringError::invalid(format!(
            "runs must be between 0 and {MAX_RUNS_PER_BALL}, got {runs}"
        )));
    }
    Ok(u32::from(runs))
}

fn check_incoming(team: &Team, innings: &Innings, batsman: &PlayerId) -> ScoringResult<()> {
    require_id(batsman, "batsman")?;
    if !team.has_player(batsman) {
        return Err(ScoringError::invalid(format!(
            "{batsman} is not in the {} roster",
            team.name
        )));
    }
    if innings.batsmen.is_dismissed(batsman) {
        return Err(ScoringError::invalid(format!("{batsman} is already out")));
    }
    if innings.batsmen.at_crease(batsman) {
        return Err(ScoringError::invalid(format!(
            "{batsman} is already at the crease"
        )));
    }
    Ok(())
}

// =============================================================================
// TOSS AND INNINGS
// =============================================================================

fn toss(
    state: &mut MatchState,
    winner: TeamSide,
    decision: TossDecision,
    out: &mut Vec<Notification>,
) -> ScoringResult<()> {
    if state.phase != Phase::PreToss {
        return Err(illegal(EventKind::Toss, state.phase));
    }

    let outcome = TossOutcome { winner, decision };
    state.toss = Some(outcome);
    state.phase = Phase::TossDone;
    state.match_info.status = MatchStatus::Live;
    out.push(Notification::TossDecided {
        winner,
        decision,
        batting: outcome.batting_first(),
    });
    Ok(())
}

fn start_innings(
    state: &mut MatchState,
    striker: &PlayerId,
    non_striker: &PlayerId,
    bowler: &PlayerId,
    out: &mut Vec<Notification>,
) -> ScoringResult<()> {
    let (number, batting, target) = match state.phase {
        Phase::TossDone => {
            let toss = state
                .toss
                .ok_or_else(|| illegal(EventKind::StartInnings, state.phase))?;
            (1, toss.batting_first(), None)
        }
        Phase::InningsBreak => {
            let first = state
                .current_innings()
                .ok_or_else(|| illegal(EventKind::StartInnings, state.phase))?;
            (first.number + 1, first.bowling, Some(first.runs + 1))
        }
        phase => return Err(illegal(EventKind::StartInnings, phase)),
    };

    require_id(striker, "striker")?;
    require_id(non_striker, "non-striker")?;
    require_id(bowler, "bowler")?;
    if striker == non_striker {
        return Err(ScoringError::invalid(
            "striker and non-striker must be different players",
        ));
    }
    let batting_team = state.match_info.team(batting);
    for opener in [striker, non_striker] {
        if !batting_team.has_player(opener) {
            return Err(ScoringError::invalid(format!(
                "{opener} is not in the {} roster",
                batting_team.name
            )));
        }
    }
    let bowling_team = state.match_info.team(batting.opposite());
    if !bowling_team.has_player(bowler) {
        return Err(ScoringError::invalid(format!(
            "{bowler} is not in the {} roster",
            bowling_team.name
        )));
    }

    state.innings.push(Innings::new(
        number,
        batting,
        target,
        striker.clone(),
        non_striker.clone(),
        bowler.clone(),
    ));
    state.current = Some(state.innings.len() - 1);
    state.phase = Phase::Scoring;
    out.push(Notification::InningsStarted {
        innings: number,
        batting,
        target,
    });
    Ok(())
}

// =============================================================================
// DELIVERIES
// =============================================================================

fn deliver(
    state: &mut MatchState,
    event: &ScoringEvent,
    out: &mut Vec<Notification>,
) -> ScoringResult<()> {
    let kind = event.kind();
    if state.phase != Phase::Scoring {
        return Err(illegal(kind, state.phase));
    }
    let index = state.current.ok_or_else(|| illegal(kind, state.phase))?;
    let max_balls = state.match_info.max_legal_balls();
    let innings = state
        .innings
        .get_mut(index)
        .ok_or(ScoringError::IllegalTransition {
            event: kind,
            phase: Phase::Scoring,
        })?;
    let batting_team = state.match_info.team(innings.batting);
    let all_out_at = all_out_threshold(batting_team);

    if innings.batsmen.is_vacant() {
        return Err(ScoringError::AwaitingBatsman);
    }
    let striker = innings
        .batsmen
        .striker
        .clone()
        .ok_or(ScoringError::AwaitingBatsman)?;

    let symbol = match event {
        ScoringEvent::LegalDelivery { runs } => {
            let r = check_runs(*runs)?;
            innings.runs += r;
            let batter = innings.batter(&striker);
            batter.score(*runs);
            batter.balls_faced += 1;
            let bowler = innings.bowler_figures();
            bowler.legal_balls += 1;
            bowler.runs_conceded += r;
            if r % 2 == 1 {
                innings.batsmen.rotate();
            }
            BallSymbol::Runs(*runs)
        }
        ScoringEvent::Wide { runs } => {
            let r = PENALTY_RUNS + check_runs(*runs)?;
            innings.runs += r;
            innings.extras.wides += r;
            let bowler = innings.bowler_figures();
            bowler.wides += 1;
            bowler.runs_conceded += r;
            BallSymbol::Wide
        }
        ScoringEvent::NoBall { runs } => {
            let off_bat = check_runs(*runs)?;
            let r = PENALTY_RUNS + off_bat;
            innings.runs += r;
            innings.extras.no_balls += PENALTY_RUNS;
            innings.batter(&striker).score(*runs);
            let bowler = innings.bowler_figures();
            bowler.no_balls += 1;
            bowler.runs_conceded += r;
            BallSymbol::NoBall
        }
        ScoringEvent::Bye { runs } | ScoringEvent::LegBye { runs } => {
            let r = check_runs(*runs)?;
            innings.runs += r;
            innings.batter(&striker).balls_faced += 1;
            innings.bowler_figures().legal_balls += 1;
            if r % 2 == 1 {
                innings.batsmen.rotate();
            }
            if kind == EventKind::Bye {
                innings.extras.byes += r;
                BallSymbol::Bye
            } else {
                innings.extras.leg_byes += r;
                BallSymbol::LegBye
            }
        }
        ScoringEvent::Wicket { dismissal } => {
            wicket(innings, batting_team, &striker, dismissal, all_out_at, out)?;
            BallSymbol::Wicket
        }
        other => return Err(illegal(other.kind(), Phase::Scoring)),
    };

    innings.over.record(symbol);
    if symbol.is_legal() {
        innings.legal_balls += 1;
    }
    out.push(Notification::BallRecorded {
        innings: innings.number,
        over: innings.over.number,
        symbol,
        score: innings.snapshot(),
    });

    let innings_over = innings.target_reached()
        || innings.wickets >= all_out_at
        || innings.legal_balls >= max_balls;
    if innings_over {
        let number = innings.number;
        out.push(Notification::InningsCompleted {
            innings: number,
            score: innings.snapshot(),
        });
        debug!(innings = number, runs = innings.runs, wickets = innings.wickets, "Innings closed");
        if number == 1 {
            state.phase = Phase::InningsBreak;
        } else {
            complete(state, out);
        }
    } else if innings.over.is_complete() {
        out.push(Notification::OverCompleted {
            innings: innings.number,
            over: innings.over.number,
            bowler: innings.over.bowler.clone(),
        });
        state.phase = Phase::OverBreak;
    }
    Ok(())
}

fn wicket(
    innings: &mut Innings,
    batting_team: &Team,
    striker: &PlayerId,
    dismissal: &Dismissal,
    all_out_at: u32,
    out: &mut Vec<Notification>,
) -> ScoringResult<()> {
    let r = check_runs(dismissal.runs)?;
    let batsman_out = dismissal
        .batsman_out
        .clone()
        .unwrap_or_else(|| striker.clone());
    if !innings.batsmen.at_crease(&batsman_out) {
        return Err(ScoringError::invalid(format!(
            "{batsman_out} is not at the crease"
        )));
    }
    if let Some(fielder) = &dismissal.fielder {
        require_id(fielder, "fielder")?;
    }
    if let Some(incoming) = &dismissal.replacement {
        check_incoming(batting_team, innings, incoming)?;
    }

    innings.runs += r;
    let batter = innings.batter(striker);
    batter.score(dismissal.runs);
    batter.balls_faced += 1;
    let bowler = innings.bowler_figures();
    bowler.legal_balls += 1;
    bowler.runs_conceded += r;
    if dismissal.kind.credits_bowler() {
        bowler.wickets += 1;
    }
    // Completed runs before a run out mean the batsmen crossed.
    if r % 2 == 1 {
        innings.batsmen.rotate();
    }

    innings.wickets += 1;
    innings.batsmen.dismiss(&batsman_out);
    innings.batter(&batsman_out).dismissal = Some(dismissal.kind);
    innings.fall_of_wickets.push(FallOfWicket {
        wicket: innings.wickets,
        batsman: batsman_out.clone(),
        runs: innings.runs,
        legal_balls: innings.legal_balls + 1,
    });
    out.push(Notification::WicketFell {
        innings: innings.number,
        batsman: batsman_out,
        kind: dismissal.kind,
        wickets: innings.wickets,
    });

    if innings.wickets < all_out_at {
        if let Some(incoming) = &dismissal.replacement {
            innings.batsmen.fill(incoming.clone());
            innings.batter(incoming);
            out.push(Notification::BatsmanIn {
                innings: innings.number,
                batsman: incoming.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// BETWEEN DELIVERIES
// =============================================================================

fn select_bowler(
    state: &mut MatchState,
    bowler: &PlayerId,
    out: &mut Vec<Notification>,
) -> ScoringResult<()> {
    if state.phase != Phase::OverBreak {
        return Err(illegal(EventKind::SelectBowler, state.phase));
    }
    require_id(bowler, "bowler")?;
    let index = state
        .current
        .ok_or_else(|| illegal(EventKind::SelectBowler, state.phase))?;
    let innings = state
        .innings
        .get_mut(index)
        .ok_or(ScoringError::IllegalTransition {
            event: EventKind::SelectBowler,
            phase: Phase::OverBreak,
        })?;

    let bowling_team = state.match_info.team(innings.bowling);
    if !bowling_team.has_player(bowler) {
        return Err(ScoringError::invalid(format!(
            "{bowler} is not in the {} roster",
            bowling_team.name
        )));
    }
    if bowler == &innings.over.bowler {
        return Err(ScoringError::IllegalBowler(bowler.clone()));
    }

    let next_over = innings.over.number + 1;
    let finished = std::mem::replace(&mut innings.over, OverState::new(next_over, bowler.clone()));
    innings.previous_bowler = Some(finished.bowler);
    innings.bowling_figures.entry(bowler.clone()).or_default();
    // End-of-over swap.
    innings.batsmen.rotate();
    out.push(Notification::BowlerChanged {
        innings: innings.number,
        over: next_over,
        bowler: bowler.clone(),
    });
    state.phase = Phase::Scoring;
    Ok(())
}

fn select_batsman(
    state: &mut MatchState,
    batsman: &PlayerId,
    out: &mut Vec<Notification>,
) -> ScoringResult<()> {
    let phase = state.phase;
    if !matches!(phase, Phase::Scoring | Phase::OverBreak) {
        return Err(illegal(EventKind::SelectBatsman, phase));
    }
    let index = state
        .current
        .ok_or_else(|| illegal(EventKind::SelectBatsman, phase))?;
    let innings = state
        .innings
        .get_mut(index)
        .ok_or_else(|| illegal(EventKind::SelectBatsman, phase))?;
    if !innings.batsmen.is_vacant() {
        return Err(illegal(EventKind::SelectBatsman, phase));
    }
    check_incoming(state.match_info.team(innings.batting), innings, batsman)?;

    innings.batsmen.fill(batsman.clone());
    innings.batter(batsman);
    out.push(Notification::BatsmanIn {
        innings: innings.number,
        batsman: batsman.clone(),
    });
    Ok(())
}

// =============================================================================
// COMPLETION
// =============================================================================

fn complete(state: &mut MatchState, out: &mut Vec<Notification>) {
    let Some(result) = decide(state) else {
        return;
    };
    state.result = Some(result);
    state.phase = Phase::Complete;
    state.match_info.status = MatchStatus::Completed;
    out.push(Notification::MatchCompleted { result });
    debug!(match_id = %state.id(), ?result, "Match complete");
}

fn decide(state: &MatchState) -> Option<MatchResult> {
    let chase = state.innings.get(1)?;
    let target = chase.target?;
    let result = if chase.runs >= target {
        let all_out_at = all_out_threshold(state.match_info.team(chase.batting));
        MatchResult::Won {
            winner: chase.batting,
            margin: Margin::Wickets(all_out_at.saturating_sub(chase.wickets)),
        }
    } else if chase.runs + 1 == target {
        MatchResult::Tie
    } else {
        MatchResult::Won {
            winner: chase.bowling,
            margin: Margin::Runs(target - 1 - chase.runs),
        }
    };
    Some(result)
}
