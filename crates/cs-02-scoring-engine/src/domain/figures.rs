//! Per-player live figures

use serde::{Deserialize, Serialize};
use shared_types::DismissalKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingFigures {
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    /// How the batsman was dismissed; `None` while not out.
    pub dismissal: Option<DismissalKind>,
}

impl BattingFigures {
    pub(crate) fn score(&mut self, runs: u8) {
        self.runs += u32::from(runs);
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }

    pub fn is_out(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Runs per hundred balls faced.
    pub fn strike_rate(&self) -> f64 {
        if self.balls_faced == 0 {
            return 0.0;
        }
        f64::from(self.runs) * 100.0 / f64::from(self.balls_faced)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingFigures {
    pub legal_balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
}

impl BowlingFigures {
    /// Runs conceded per six legal balls.
    pub fn economy(&self) -> f64 {
        if self.legal_balls == 0 {
            return 0.0;
        }
        f64::from(self.runs_conceded) * f64::from(shared_types::BALLS_PER_OVER)
            / f64::from(self.legal_balls)
    }
}
