//! # Node Configuration
//!
//! Runtime parameters for the scoring node. Every value has a default and
//! an environment override.

use cs_04_match_store::StoreConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Root for match documents and ledgers.
    pub data_dir: PathBuf,
    /// Longest a command waits for a match's write right.
    pub submit_timeout: Duration,
    /// Buffered notifications per bus subscriber.
    pub bus_capacity: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            submit_timeout: StoreConfig::default().submit_timeout,
            bus_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be an unsigned integer, got '{value}'")]
    NotANumber { name: &'static str, value: String },

    #[error("Submit timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Bus capacity must be greater than zero")]
    ZeroCapacity,
}

impl NodeConfig {
    /// Read overrides from the environment.
    ///
    /// - `CS_DATA_DIR` (default: ./data)
    /// - `CS_SUBMIT_TIMEOUT_MS` (default: 2000)
    /// - `CS_BUS_CAPACITY` (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup("CS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = parse_number(&lookup, "CS_SUBMIT_TIMEOUT_MS")? {
            config.submit_timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse_number(&lookup, "CS_BUS_CAPACITY")? {
            config.bus_capacity = usize::try_from(capacity).unwrap_or(usize::MAX);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submit_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Submit timeout in whole milliseconds, saturating.
    pub fn submit_timeout_ms(&self) -> u64 {
        u64::try_from(self.submit_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_submit_timeout(self.submit_timeout)
    }

    pub fn matches_dir(&self) -> PathBuf {
        self.data_dir.join("matches")
    }

    pub fn ledger_dir(&self) -> PathBuf {
        self.data_dir.join("ledger")
    }
}

fn parse_number<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::NotANumber { name, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = NodeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.submit_timeout, Duration::from_millis(2_000));
        assert_eq!(config.bus_capacity, 1_000);
        assert_eq!(config.ledger_dir(), PathBuf::from("./data/ledger"));
    }

    #[test]
    fn test_overrides() {
        let config = NodeConfig::from_lookup(lookup(&[
            ("CS_DATA_DIR", "/var/lib/scoring"),
            ("CS_SUBMIT_TIMEOUT_MS", "750"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/scoring"));
        assert_eq!(config.store_config().submit_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_timeout_millis_saturate() {
        let mut config =
            NodeConfig::from_lookup(lookup(&[("CS_SUBMIT_TIMEOUT_MS", "750")])).unwrap();
        assert_eq!(config.submit_timeout_ms(), 750);
        config.submit_timeout = Duration::MAX;
        assert_eq!(config.submit_timeout_ms(), u64::MAX);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert_eq!(
            NodeConfig::from_lookup(lookup(&[("CS_SUBMIT_TIMEOUT_MS", "0")])).unwrap_err(),
            ConfigError::ZeroTimeout
        );
    }

    #[test]
    fn test_garbage_number_rejected() {
        assert!(matches!(
            NodeConfig::from_lookup(lookup(&[("CS_BUS_CAPACITY", "lots")])),
            Err(ConfigError::NotANumber {
                name: "CS_BUS_CAPACITY",
                ..
            })
        ));
    }
}
