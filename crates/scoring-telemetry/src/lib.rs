//! # Scoring Telemetry
//!
//! Structured logging for the cricket scoring node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scoring_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Records from every crate now flow through one subscriber.
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CS_SERVICE_NAME` | `cricket-scoring` | Service name in the startup record |
//! | `CS_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` is the fallback) |
//! | `CS_JSON_LOGS` | `false` | JSON records, one per line |
//! | `CS_LOG_SOURCE` | `false` | File and line in each record |
//!
//! Records are written to stderr so stdout stays free for responses.

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Initialize logging for the process.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TracingGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)
}
