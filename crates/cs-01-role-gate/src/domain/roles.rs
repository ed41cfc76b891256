//! Role-set administration
//!
//! Role lists are attributes of the `Match`. They change only through these
//! authorized operations.

use super::capability::{authorize, Action};
use crate::error::{AccessError, AccessResult};
use serde::{Deserialize, Serialize};
use shared_types::{Match, MatchCode, UserId};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Scorer,
    Viewer,
}

/// A requested change to a match's role sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RoleChange {
    /// Admin adds `user` to `role`.
    Grant { user: UserId, role: Role },
    /// Admin removes `user` from `role`.
    Revoke { user: UserId, role: Role },
    /// Actor joins as a viewer using the match code.
    Join { code: MatchCode },
    /// Actor leaves every role list.
    Leave,
}

fn role_set(m: &mut Match, role: Role) -> &mut BTreeSet<UserId> {
    match role {
        Role::Admin => &mut m.roles.admins,
        Role::Scorer => &mut m.roles.scorers,
        Role::Viewer => &mut m.roles.viewers,
    }
}

/// Apply `change` on behalf of `actor`.
///
/// Nothing is modified when an error is returned.
pub fn apply_role_change(m: &mut Match, actor: &UserId, change: &RoleChange) -> AccessResult<()> {
    match change {
        RoleChange::Grant { user, role } => {
            authorize(m, actor, Action::Administer)?;
            if !role_set(m, *role).insert(user.clone()) {
                return Err(AccessError::AlreadyMember { user: user.clone() });
            }
        }
        RoleChange::Revoke { user, role } => {
            authorize(m, actor, Action::Administer)?;
            if *role == Role::Admin && user == &m.creator {
                return Err(AccessError::CreatorImmutable);
            }
            if !role_set(m, *role).remove(user) {
                return Err(AccessError::NotMember { user: user.clone() });
            }
        }
        RoleChange::Join { code } => {
            if code != &m.code {
                return Err(AccessError::NotFound(code.to_string()));
            }
            if actor == &m.creator || m.roles.is_listed(actor) {
                return Err(AccessError::AlreadyMember {
                    user: actor.clone(),
                });
            }
            m.roles.viewers.insert(actor.clone());
        }
        RoleChange::Leave => {
            if actor == &m.creator {
                return Err(AccessError::CreatorImmutable);
            }
            if !m.roles.is_listed(actor) {
                return Err(AccessError::NotMember {
                    user: actor.clone(),
                });
            }
            m.roles.admins.remove(actor);
            m.roles.scorers.remove(actor);
            m.roles.viewers.remove(actor);
        }
    }
    Ok(())
}
