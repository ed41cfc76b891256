//! Domain layer for the ball ledger

pub mod entry;
pub mod replay;
