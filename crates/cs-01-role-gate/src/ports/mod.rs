//! Ports for the role gate
//!
//! Inbound: `RoleGateApi`. Outbound: `MatchDirectory`, the read-only lookup
//! of a match's current role data.

use crate::domain::capability::{Action, Capability, CapabilitySet};
use crate::error::AccessResult;
use shared_types::{Match, MatchId, UserId};

/// Primary role gate API
pub trait RoleGateApi: Send + Sync {
    /// Authorize `action` for `user` on match `match_id`.
    fn authorize(&self, match_id: &MatchId, user: &UserId, action: Action)
        -> AccessResult<Capability>;

    /// Resolve every capability `user` holds on match `match_id`.
    fn capabilities(&self, match_id: &MatchId, user: &UserId) -> AccessResult<CapabilitySet>;
}

/// Read-only match lookup used by the gate.
pub trait MatchDirectory: Send + Sync {
    /// Current match record, or `None` for unknown ids.
    fn lookup(&self, match_id: &MatchId) -> Option<Match>;
}
