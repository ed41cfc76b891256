//! Ledger adapters

pub mod memory;

pub use memory::InMemoryBallLedger;
