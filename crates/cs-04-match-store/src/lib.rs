//! # cs-04-match-store
//!
//! Owns the live state of every active match. All mutations of one match
//! are serialized through a single write right; readers always see a
//! complete committed state.
//!
//! ## Commit Order
//!
//! | Step | Failure means |
//! |------|---------------|
//! | Version check, role gate, transition | typed rejection, nothing written |
//! | Ball ledger append | `Storage` rejection, nothing published |
//! | Match document write | logged; the ledger already holds the commit |
//! | Publish | - |
//! | Notify | delivered in commit order while the write right is held |
//!
//! Role changes have no ledger entry, so for them a failed document write is
//! a `Storage` rejection.
//!
//! ## Recovery
//!
//! On startup each stored document is re-folded from the ledger. The ledger
//! wins any disagreement.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{BusNotificationSink, InMemoryMatchRepository, SystemClock};
pub use config::StoreConfig;
pub use domain::document::MatchDocument;
pub use error::{Rejection, RepositoryError, StoreResult};
pub use ports::{MatchRepository, MatchStoreApi, NotificationSink, TimeSource};
pub use service::MatchStateStore;
