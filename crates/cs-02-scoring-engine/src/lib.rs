//! # cs-02-scoring-engine
//!
//! The live match state and the pure transition function that advances it.
//!
//! ## Phases
//!
//! | Phase | Accepts | Next |
//! |-------|---------|------|
//! | `PRE_TOSS` | `toss` | `TOSS_DONE` |
//! | `TOSS_DONE` | `start_innings` | `SCORING` |
//! | `SCORING` | deliveries, `select_batsman` | `SCORING`, `OVER_BREAK`, `INNINGS_BREAK`, `COMPLETE` |
//! | `OVER_BREAK` | `select_bowler`, `select_batsman` | `SCORING` |
//! | `INNINGS_BREAK` | `start_innings` | `SCORING` (second innings) |
//! | `COMPLETE` | nothing | - |
//!
//! ## Scoring Rules
//!
//! - Odd runs off a legal delivery, bye or leg-bye rotate strike.
//! - Wides and no-balls cost one penalty run plus the runs taken, never
//!   count toward the over and never rotate strike. Runs off a no-ball are
//!   the striker's; only the penalty is a no-ball extra.
//! - The sixth legal ball of an over opens the over break. Selecting the next
//!   bowler swaps ends; the previous over's bowler is refused.
//! - A wicket is a legal ball. The vacant end must be filled before the next
//!   delivery.
//! - An innings closes when all out, when its balls are used, or (second
//!   innings) the moment the target is reached.

pub mod domain;
pub mod error;
pub mod machine;

pub use domain::figures::{BattingFigures, BowlingFigures};
pub use domain::innings::{BatsmanPair, Extras, FallOfWicket, Innings, OverState};
pub use domain::state::{all_out_threshold, MatchState, TossOutcome};
pub use error::{ScoringError, ScoringResult};
pub use machine::{
    apply, replay_events, transition, RoleContext, Transition, MAX_RUNS_PER_BALL, PENALTY_RUNS,
};
