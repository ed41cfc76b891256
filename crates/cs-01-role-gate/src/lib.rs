//! # cs-01-role-gate
//!
//! Resolves a user's capabilities for a match and authorizes action classes.
//!
//! ## Capability Model
//!
//! | Capability | Membership |
//! |------------|------------|
//! | Viewer | match is public, or user ∈ admins ∪ scorers ∪ viewers |
//! | Scorer | user ∈ admins ∪ scorers |
//! | Admin | user ∈ admins |
//! | Creator | user is the match creator (always an admin) |
//!
//! | Action | Requires |
//! |--------|----------|
//! | Read | Viewer |
//! | Score | Scorer |
//! | Administer | Admin |
//!
//! Every lookup takes the `Match` as explicit input. The gate holds no role
//! state of its own.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::capability::{authorize, capabilities, Action, Capability, CapabilitySet};
pub use domain::roles::{apply_role_change, Role, RoleChange};
pub use error::{AccessError, AccessResult};
pub use ports::{MatchDirectory, RoleGateApi};
pub use service::RoleGateService;
