//! # Cricket Scoring Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-crate flows through the match store
//! │   ├── match_flows.rs
//! │   ├── ledger_flows.rs
//! │   └── bus_flows.rs
//! └── benches/           # Transition and replay throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cs-tests
//! cargo test -p cs-tests integration::ledger_flows
//! cargo bench -p cs-tests
//! ```

#[cfg(test)]
pub mod fixtures;
pub mod integration;
