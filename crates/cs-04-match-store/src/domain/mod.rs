//! Domain layer for the match store

pub mod document;
pub mod registry;
