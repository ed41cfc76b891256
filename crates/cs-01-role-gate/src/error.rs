//! Error types for the role gate

use crate::domain::capability::Action;
use shared_types::{MatchId, UserId};
use thiserror::Error;

/// Role gate errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Capability for the action is absent
    #[error("User {user} is not authorized to {action} this match")]
    Unauthorized { user: UserId, action: Action },

    /// Unknown match id or code
    #[error("Match not found: {0}")]
    NotFound(String),

    /// The creator's admin role and membership are fixed
    #[error("The match creator cannot be removed")]
    CreatorImmutable,

    /// User already holds the role
    #[error("User {user} is already a member")]
    AlreadyMember { user: UserId },

    /// User does not hold the role
    #[error("User {user} is not a member")]
    NotMember { user: UserId },
}

impl AccessError {
    pub fn match_not_found(id: &MatchId) -> Self {
        AccessError::NotFound(id.to_string())
    }
}

/// Result type for role gate operations
pub type AccessResult<T> = Result<T, AccessError>;
