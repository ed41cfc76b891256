//! Live match state

use super::innings::Innings;
use serde::{Deserialize, Serialize};
use shared_types::{
    Match, MatchId, MatchResult, MatchSummary, Phase, ScoreSnapshot, Team, TeamSide, TossDecision,
    MAX_WICKETS,
};

/// Wickets at which a team with this roster is all out: one fewer than the
/// roster, at most ten.
pub fn all_out_threshold(team: &Team) -> u32 {
    let roster = u32::try_from(team.len()).unwrap_or(u32::MAX);
    roster.saturating_sub(1).min(MAX_WICKETS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossOutcome {
    pub winner: TeamSide,
    pub decision: TossDecision,
}

impl TossOutcome {
    /// Side that bats first.
    pub fn batting_first(&self) -> TeamSide {
        match self.decision {
            TossDecision::Bat => self.winner,
            TossDecision::Bowl => self.winner.opposite(),
        }
    }
}

/// The authoritative state of one match.
///
/// Innings live in an arena ordered by innings number; `current` indexes the
/// innings in progress (or the last one played).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    #[serde(rename = "match")]
    pub match_info: Match,
    pub phase: Phase,
    pub toss: Option<TossOutcome>,
    pub innings: Vec<Innings>,
    pub current: Option<usize>,
    pub result: Option<MatchResult>,
    /// Committed mutations so far, including role changes.
    pub version: u64,
}

impl MatchState {
    /// Initial state of a freshly created match.
    pub fn new(match_info: Match) -> Self {
        Self {
            match_info,
            phase: Phase::PreToss,
            toss: None,
            innings: Vec::new(),
            current: None,
            result: None,
            version: 0,
        }
    }

    pub fn id(&self) -> MatchId {
        self.match_info.id
    }

    pub fn current_innings(&self) -> Option<&Innings> {
        self.current.and_then(|i| self.innings.get(i))
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn all_out_at(&self, side: TeamSide) -> u32 {
        all_out_threshold(self.match_info.team(side))
    }

    pub fn snapshot(&self) -> Option<ScoreSnapshot> {
        self.current_innings().map(Innings::snapshot)
    }

    pub fn summary(&self) -> MatchSummary {
        let innings = self.current_innings();
        MatchSummary {
            match_id: self.id(),
            version: self.version,
            phase: self.phase,
            status: self.match_info.status,
            score: self.snapshot(),
            target: innings.and_then(|i| i.target),
            striker: innings.and_then(|i| i.batsmen.striker.clone()),
            non_striker: innings.and_then(|i| i.batsmen.non_striker.clone()),
            bowler: innings.map(|i| i.over.bowler.clone()),
            result: self.result,
        }
    }
}
