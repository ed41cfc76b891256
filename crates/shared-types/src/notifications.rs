//! # Notification Payloads
//!
//! Types that leave the scoring core: the state-change notifications emitted
//! by the state machine and the summary delivered to the notification
//! collaborator after each committed transition.

use crate::entities::{MatchId, MatchStatus, PlayerId, TeamSide};
use crate::scoring_event::{DismissalKind, TossDecision};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring phase of a match.
///
/// ```text
/// PRE_TOSS ──toss──→ TOSS_DONE ──start_innings──→ SCORING ⇄ OVER_BREAK
///                                                    │
///                                     (terminal)     ↓
///                  SCORING (innings 2) ←──start── INNINGS_BREAK
///                          │
///                          └──(terminal / target)──→ COMPLETE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    PreToss,
    TossDone,
    Scoring,
    OverBreak,
    InningsBreak,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PreToss => "PRE_TOSS",
            Phase::TossDone => "TOSS_DONE",
            Phase::Scoring => "SCORING",
            Phase::OverBreak => "OVER_BREAK",
            Phase::InningsBreak => "INNINGS_BREAK",
            Phase::Complete => "COMPLETE",
        };
        f.write_str(name)
    }
}

/// Outcome symbol of one delivery within an over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BallSymbol {
    Runs(u8),
    Wicket,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl BallSymbol {
    pub fn is_legal(self) -> bool {
        !matches!(self, BallSymbol::Wide | BallSymbol::NoBall)
    }
}

impl fmt::Display for BallSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallSymbol::Runs(r) => write!(f, "{r}"),
            BallSymbol::Wicket => f.write_str("W"),
            BallSymbol::Wide => f.write_str("wd"),
            BallSymbol::NoBall => f.write_str("nb"),
            BallSymbol::Bye => f.write_str("b"),
            BallSymbol::LegBye => f.write_str("lb"),
        }
    }
}

impl From<BallSymbol> for String {
    fn from(symbol: BallSymbol) -> Self {
        symbol.to_string()
    }
}

impl TryFrom<String> for BallSymbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "W" => Ok(BallSymbol::Wicket),
            "wd" => Ok(BallSymbol::Wide),
            "nb" => Ok(BallSymbol::NoBall),
            "b" => Ok(BallSymbol::Bye),
            "lb" => Ok(BallSymbol::LegBye),
            other => match other.parse::<u8>() {
                Ok(r) if r <= 6 => Ok(BallSymbol::Runs(r)),
                _ => Err(format!("unknown ball symbol: {other}")),
            },
        }
    }
}

/// Cumulative score of one innings at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoreSnapshot {
    pub innings: u8,
    pub runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    pub extras: u32,
}

impl ScoreSnapshot {
    /// Overs in the conventional `overs.balls` notation.
    pub fn overs_display(&self) -> String {
        format!(
            "{}.{}",
            self.legal_balls / crate::BALLS_PER_OVER,
            self.legal_balls % crate::BALLS_PER_OVER
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Margin {
    Runs(u32),
    Wickets(u32),
}

/// Final result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchResult {
    Won { winner: TeamSide, margin: Margin },
    Tie,
}

/// State-change notification emitted by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    TossDecided {
        winner: TeamSide,
        decision: TossDecision,
        batting: TeamSide,
    },
    InningsStarted {
        innings: u8,
        batting: TeamSide,
        target: Option<u32>,
    },
    BallRecorded {
        innings: u8,
        over: u32,
        symbol: BallSymbol,
        score: ScoreSnapshot,
    },
    WicketFell {
        innings: u8,
        batsman: PlayerId,
        kind: DismissalKind,
        wickets: u32,
    },
    BatsmanIn {
        innings: u8,
        batsman: PlayerId,
    },
    OverCompleted {
        innings: u8,
        over: u32,
        bowler: PlayerId,
    },
    BowlerChanged {
        innings: u8,
        over: u32,
        bowler: PlayerId,
    },
    InningsCompleted {
        innings: u8,
        score: ScoreSnapshot,
    },
    MatchCompleted {
        result: MatchResult,
    },
    /// The ledger entry `seq` was compensated.
    EventUndone {
        seq: u64,
    },
}

/// Compact view of a match's live state for notification delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub version: u64,
    pub phase: Phase,
    pub status: MatchStatus,
    pub score: Option<ScoreSnapshot>,
    pub target: Option<u32>,
    pub striker: Option<PlayerId>,
    pub non_striker: Option<PlayerId>,
    pub bowler: Option<PlayerId>,
    pub result: Option<MatchResult>,
}
