//! # cs-03-ball-ledger
//!
//! Append-only, per-match record of every applied scoring event, and the
//! replay that rebuilds match state from it after a restart.
//!
//! ## Guarantees
//!
//! - Sequence numbers start at 1 and increase by one per append.
//! - Entries are never reordered or rewritten. An undo is a new entry.
//! - `replay` folds the scoring transition over the effective entries and
//!   reproduces the state that was live when the last entry was written.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::InMemoryBallLedger;
pub use domain::entry::{effective_entries, BallLedgerEntry};
pub use domain::replay::{replay, verify_sequence};
pub use error::{LedgerError, LedgerResult};
pub use ports::BallLedger;
