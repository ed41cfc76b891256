//! # Command Handlers
//!
//! Translate newline-delimited JSON requests into store calls.

pub mod commands;

pub use commands::{CommandHandler, RegisterMatch, Request, Response};
