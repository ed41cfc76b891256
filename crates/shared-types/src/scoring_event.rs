//! # Scoring Events
//!
//! The atomic input vocabulary of the scoring core. An event is created by an
//! authorized actor per request, consumed exactly once by the state machine
//! and never mutated afterwards (it becomes an immutable ledger entry).

use crate::entities::{PlayerId, TeamSide};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    Other,
}

impl DismissalKind {
    /// Whether the bowler is credited with the wicket.
    pub fn credits_bowler(self) -> bool {
        !matches!(self, DismissalKind::RunOut | DismissalKind::Other)
    }
}

/// Dismissal metadata attached to a wicket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dismissal {
    pub kind: DismissalKind,
    #[serde(default)]
    pub fielder: Option<PlayerId>,
    /// Batsman dismissed; the striker when absent.
    #[serde(default)]
    pub batsman_out: Option<PlayerId>,
    /// Runs completed before the dismissal (run outs).
    #[serde(default)]
    pub runs: u8,
    /// Incoming batsman, if already known.
    #[serde(default)]
    pub replacement: Option<PlayerId>,
}

impl Dismissal {
    pub fn new(kind: DismissalKind) -> Self {
        Self {
            kind,
            fielder: None,
            batsman_out: None,
            runs: 0,
            replacement: None,
        }
    }

    pub fn with_fielder(mut self, fielder: impl Into<String>) -> Self {
        self.fielder = Some(PlayerId::new(fielder));
        self
    }

    pub fn with_batsman_out(mut self, batsman: impl Into<String>) -> Self {
        self.batsman_out = Some(PlayerId::new(batsman));
        self
    }

    pub fn with_runs(mut self, runs: u8) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_replacement(mut self, batsman: impl Into<String>) -> Self {
        self.replacement = Some(PlayerId::new(batsman));
        self
    }
}

/// A scoring event submitted against a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringEvent {
    Toss {
        winner: TeamSide,
        decision: TossDecision,
    },
    StartInnings {
        striker: PlayerId,
        non_striker: PlayerId,
        bowler: PlayerId,
    },
    LegalDelivery {
        runs: u8,
    },
    /// `runs` are taken by the batsmen on top of the one-run penalty.
    Wide {
        #[serde(default)]
        runs: u8,
    },
    /// `runs` are off the bat and go to the striker; the penalty is extra.
    NoBall {
        #[serde(default)]
        runs: u8,
    },
    Bye {
        runs: u8,
    },
    LegBye {
        runs: u8,
    },
    Wicket {
        dismissal: Dismissal,
    },
    SelectBowler {
        bowler: PlayerId,
    },
    /// Fills the vacant crease after a wicket.
    SelectBatsman {
        batsman: PlayerId,
    },
    /// Compensates the most recent effective event.
    Undo,
}

/// Discriminant of a `ScoringEvent`, used in logs and rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Toss,
    StartInnings,
    LegalDelivery,
    Wide,
    NoBall,
    Bye,
    LegBye,
    Wicket,
    SelectBowler,
    SelectBatsman,
    Undo,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Toss => "toss",
            EventKind::StartInnings => "start_innings",
            EventKind::LegalDelivery => "legal_delivery",
            EventKind::Wide => "wide",
            EventKind::NoBall => "no_ball",
            EventKind::Bye => "bye",
            EventKind::LegBye => "leg_bye",
            EventKind::Wicket => "wicket",
            EventKind::SelectBowler => "select_bowler",
            EventKind::SelectBatsman => "select_batsman",
            EventKind::Undo => "undo",
        };
        f.write_str(name)
    }
}

impl ScoringEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ScoringEvent::Toss { .. } => EventKind::Toss,
            ScoringEvent::StartInnings { .. } => EventKind::StartInnings,
            ScoringEvent::LegalDelivery { .. } => EventKind::LegalDelivery,
            ScoringEvent::Wide { .. } => EventKind::Wide,
            ScoringEvent::NoBall { .. } => EventKind::NoBall,
            ScoringEvent::Bye { .. } => EventKind::Bye,
            ScoringEvent::LegBye { .. } => EventKind::LegBye,
            ScoringEvent::Wicket { .. } => EventKind::Wicket,
            ScoringEvent::SelectBowler { .. } => EventKind::SelectBowler,
            ScoringEvent::SelectBatsman { .. } => EventKind::SelectBatsman,
            ScoringEvent::Undo => EventKind::Undo,
        }
    }

    /// Whether the event is a delivery (something bowled).
    pub fn is_delivery(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::LegalDelivery
                | EventKind::Wide
                | EventKind::NoBall
                | EventKind::Bye
                | EventKind::LegBye
                | EventKind::Wicket
        )
    }

    /// Whether the delivery counts toward the six-ball over.
    pub fn counts_as_legal_ball(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::LegalDelivery | EventKind::Bye | EventKind::LegBye | EventKind::Wicket
        )
    }

    pub fn legal(runs: u8) -> Self {
        ScoringEvent::LegalDelivery { runs }
    }

    pub fn wide(runs: u8) -> Self {
        ScoringEvent::Wide { runs }
    }

    pub fn no_ball(runs: u8) -> Self {
        ScoringEvent::NoBall { runs }
    }

    pub fn bye(runs: u8) -> Self {
        ScoringEvent::Bye { runs }
    }

    pub fn leg_bye(runs: u8) -> Self {
        ScoringEvent::LegBye { runs }
    }

    pub fn wicket(dismissal: Dismissal) -> Self {
        ScoringEvent::Wicket { dismissal }
    }

    pub fn select_bowler(bowler: impl Into<String>) -> Self {
        ScoringEvent::SelectBowler {
            bowler: PlayerId::new(bowler),
        }
    }

    pub fn select_batsman(batsman: impl Into<String>) -> Self {
        ScoringEvent::SelectBatsman {
            batsman: PlayerId::new(batsman),
        }
    }

    pub fn start_innings(
        striker: impl Into<String>,
        non_striker: impl Into<String>,
        bowler: impl Into<String>,
    ) -> Self {
        ScoringEvent::StartInnings {
            striker: PlayerId::new(striker),
            non_striker: PlayerId::new(non_striker),
            bowler: PlayerId::new(bowler),
        }
    }
}
