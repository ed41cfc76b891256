//! # Integration Flows
//!
//! Role gate, scoring engine, ball ledger and match store exercised
//! together through the store's public API.

pub mod bus_flows;
pub mod ledger_flows;
pub mod match_flows;
