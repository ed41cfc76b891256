//! # Node Container
//!
//! Holds the wired store, its bus and the adapters behind it.

pub mod config;

pub use config::{ConfigError, NodeConfig};

use crate::adapters::{JsonFileRepository, JsonLinesLedger};
use anyhow::{Context, Result};
use cs_04_match_store::{BusNotificationSink, MatchStateStore};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use tracing::info;

/// The store as wired in the node.
pub type NodeStore = MatchStateStore<JsonFileRepository, JsonLinesLedger, BusNotificationSink>;

pub struct NodeContainer {
    pub config: NodeConfig,
    pub bus: Arc<InMemoryEventBus>,
    pub store: Arc<NodeStore>,
}

impl NodeContainer {
    /// Create the data directories and wire every component.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        let repository = JsonFileRepository::open(config.matches_dir())
            .await
            .context("Failed to open match documents")?;
        let ledger = JsonLinesLedger::open(config.ledger_dir())
            .await
            .context("Failed to open ball ledger")?;

        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let store = Arc::new(MatchStateStore::new(
            config.store_config(),
            Arc::new(repository),
            Arc::new(ledger),
            Arc::new(BusNotificationSink::new(Arc::clone(&bus))),
        ));

        info!(data_dir = %config.data_dir.display(), "Node container ready");
        Ok(Self { config, bus, store })
    }
}
