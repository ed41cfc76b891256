//! Domain module for the role gate
//!
//! Capability resolution and role-set administration.

pub mod capability;
pub mod roles;
