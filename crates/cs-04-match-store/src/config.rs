//! Store configuration

use std::time::Duration;

/// Configuration for the match state store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Longest a submit waits for the per-match write right before `Busy`.
    pub submit_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_millis(2_000),
        }
    }
}

impl StoreConfig {
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}
