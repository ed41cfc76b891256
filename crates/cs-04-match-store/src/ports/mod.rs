//! Ports for the match store

pub mod inbound;
pub mod outbound;

pub use inbound::MatchStoreApi;
pub use outbound::{MatchRepository, NotificationSink, TimeSource};

#[cfg(test)]
pub mod mocks;
