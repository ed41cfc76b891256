//! Innings, over and crease state
//!
//! The over and the batsman pair are owned by their innings. The match holds
//! innings in an arena and refers to the current one by index.

use super::figures::{BattingFigures, BowlingFigures};
use serde::{Deserialize, Serialize};
use shared_types::{BallSymbol, PlayerId, ScoreSnapshot, TeamSide, BALLS_PER_OVER};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes
    }
}

/// The over in progress.
///
/// INVARIANT: `legal_balls < 6` while scoring; it reaches 6 only in the
/// over break, until the next bowler is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverState {
    /// Zero-based over index within the innings.
    pub number: u32,
    pub bowler: PlayerId,
    pub balls: Vec<BallSymbol>,
    pub legal_balls: u32,
}

impl OverState {
    pub fn new(number: u32, bowler: PlayerId) -> Self {
        Self {
            number,
            bowler,
            balls: Vec::new(),
            legal_balls: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.legal_balls >= BALLS_PER_OVER
    }

    pub(crate) fn record(&mut self, symbol: BallSymbol) {
        if symbol.is_legal() {
            self.legal_balls += 1;
        }
        self.balls.push(symbol);
    }
}

/// The two batsmen at the crease.
///
/// A `None` end is vacant after a wicket until a replacement walks in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatsmanPair {
    pub striker: Option<PlayerId>,
    pub non_striker: Option<PlayerId>,
    /// Dismissed batsmen in order of dismissal.
    pub dismissed: Vec<PlayerId>,
}

impl BatsmanPair {
    pub fn new(striker: PlayerId, non_striker: PlayerId) -> Self {
        Self {
            striker: Some(striker),
            non_striker: Some(non_striker),
            dismissed: Vec::new(),
        }
    }

    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub fn is_vacant(&self) -> bool {
        self.striker.is_none() || self.non_striker.is_none()
    }

    pub fn at_crease(&self, player: &PlayerId) -> bool {
        self.striker.as_ref() == Some(player) || self.non_striker.as_ref() == Some(player)
    }

    pub fn is_dismissed(&self, player: &PlayerId) -> bool {
        self.dismissed.contains(player)
    }

    /// Remove `player` from the crease and record the dismissal.
    pub(crate) fn dismiss(&mut self, player: &PlayerId) {
        if self.striker.as_ref() == Some(player) {
            self.striker = None;
        } else if self.non_striker.as_ref() == Some(player) {
            self.non_striker = None;
        }
        self.dismissed.push(player.clone());
    }

    /// Fill the vacant end with `player`. Returns false when no end is vacant.
    pub(crate) fn fill(&mut self, player: PlayerId) -> bool {
        if self.striker.is_none() {
            self.striker = Some(player);
        } else if self.non_striker.is_none() {
            self.non_striker = Some(player);
        } else {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub wicket: u32,
    pub batsman: PlayerId,
    pub runs: u32,
    pub legal_balls: u32,
}

/// One team's batting turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    /// 1 or 2.
    pub number: u8,
    pub batting: TeamSide,
    pub bowling: TeamSide,
    pub runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    pub extras: Extras,
    /// First-innings runs + 1; second innings only.
    pub target: Option<u32>,
    pub over: OverState,
    pub batsmen: BatsmanPair,
    /// Bowler of the last completed over.
    pub previous_bowler: Option<PlayerId>,
    pub batting_figures: BTreeMap<PlayerId, BattingFigures>,
    pub bowling_figures: BTreeMap<PlayerId, BowlingFigures>,
    pub fall_of_wickets: Vec<FallOfWicket>,
}

impl Innings {
    pub fn new(
        number: u8,
        batting: TeamSide,
        target: Option<u32>,
        striker: PlayerId,
        non_striker: PlayerId,
        bowler: PlayerId,
    ) -> Self {
        let mut batting_figures = BTreeMap::new();
        batting_figures.insert(striker.clone(), BattingFigures::default());
        batting_figures.insert(non_striker.clone(), BattingFigures::default());
        let mut bowling_figures = BTreeMap::new();
        bowling_figures.insert(bowler.clone(), BowlingFigures::default());

        Self {
            number,
            batting,
            bowling: batting.opposite(),
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            extras: Extras::default(),
            target,
            over: OverState::new(0, bowler),
            batsmen: BatsmanPair::new(striker, non_striker),
            previous_bowler: None,
            batting_figures,
            bowling_figures,
            fall_of_wickets: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            innings: self.number,
            runs: self.runs,
            wickets: self.wickets,
            legal_balls: self.legal_balls,
            extras: self.extras.total(),
        }
    }

    /// Runs still needed to reach the target.
    pub fn runs_required(&self) -> Option<u32> {
        self.target.map(|t| t.saturating_sub(self.runs))
    }

    pub fn target_reached(&self) -> bool {
        self.target.is_some_and(|t| self.runs >= t)
    }

    pub(crate) fn batter(&mut self, player: &PlayerId) -> &mut BattingFigures {
        self.batting_figures.entry(player.clone()).or_default()
    }

    pub(crate) fn bowler_figures(&mut self) -> &mut BowlingFigures {
        self.bowling_figures
            .entry(self.over.bowler.clone())
            .or_default()
    }
}
