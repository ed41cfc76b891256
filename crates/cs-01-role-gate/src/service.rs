//! Role gate service
//!
//! Resolves the match through the `MatchDirectory` port, then evaluates
//! capabilities against its role sets.

use crate::domain::capability::{self, Action, Capability, CapabilitySet};
use crate::error::{AccessError, AccessResult};
use crate::ports::{MatchDirectory, RoleGateApi};
use shared_types::{MatchId, UserId};
use std::sync::Arc;
use tracing::debug;

pub struct RoleGateService<D: MatchDirectory> {
    directory: Arc<D>,
}

impl<D: MatchDirectory> RoleGateService<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D: MatchDirectory> RoleGateApi for RoleGateService<D> {
    fn authorize(
        &self,
        match_id: &MatchId,
        user: &UserId,
        action: Action,
    ) -> AccessResult<Capability> {
        let m = self
            .directory
            .lookup(match_id)
            .ok_or_else(|| AccessError::match_not_found(match_id))?;

        let result = capability::authorize(&m, user, action);
        if result.is_err() {
            debug!(%match_id, %user, %action, "Access denied");
        }
        result
    }

    fn capabilities(&self, match_id: &MatchId, user: &UserId) -> AccessResult<CapabilitySet> {
        let m = self
            .directory
            .lookup(match_id)
            .ok_or_else(|| AccessError::match_not_found(match_id))?;
        Ok(capability::capabilities(&m, user))
    }
}
