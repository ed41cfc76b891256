//! # Cricket Scoring Node
//!
//! Hosts the match state store for a single process and serves it over a
//! newline-delimited JSON protocol.
//!
//! ## Modular Structure
//!
//! - `container/` - node configuration and component wiring
//! - `adapters/` - file-backed match documents and ball ledger
//! - `handlers/` - command parsing and dispatch
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Open the data directory and wire the store
//! 3. Recover every stored match from its document and ledger
//! 4. Start the bus listener
//! 5. Serve commands until end of input or shutdown
//!
//! ## Protocol
//!
//! ```text
//! → {"cmd":"submit","match_id":"…","actor":"scorer","event":{"kind":"legal_delivery","runs":4}}
//! ← {"status":"committed","summary":{"version":7,"phase":"SCORING",…}}
//! ```

pub mod adapters;
pub mod container;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use shared_bus::EventFilter;
use shared_types::MatchId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::StreamExt;
use tracing::{debug, info};

use crate::adapters::{JsonFileRepository, JsonLinesLedger};
use crate::container::{NodeConfig, NodeContainer, NodeStore};
use crate::handlers::CommandHandler;
use cs_04_match_store::BusNotificationSink;

/// Command handler as wired in the node.
pub type NodeHandler = CommandHandler<JsonFileRepository, JsonLinesLedger, BusNotificationSink>;

/// The node runtime.
pub struct NodeRuntime {
    container: NodeContainer,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl NodeRuntime {
    pub async fn new(config: NodeConfig) -> Result<Self> {
        info!("Creating cricket scoring node runtime");
        let container = NodeContainer::new(config).await?;
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    pub fn store(&self) -> Arc<NodeStore> {
        Arc::clone(&self.container.store)
    }

    pub fn handler(&self) -> NodeHandler {
        CommandHandler::new(self.store())
    }

    /// Recover stored matches and start the bus listener.
    pub async fn start(&self) -> Result<Vec<MatchId>> {
        let recovered = self
            .container
            .store
            .recover_all()
            .await
            .context("Failed to list stored matches")?;

        let mut events = self.container.bus.event_stream(EventFilter::all());
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = events.next() => match event {
                        Some(event) => debug!(
                            match_id = %event.match_id(),
                            topic = ?event.topic(),
                            version = ?event.version(),
                            "Match event"
                        ),
                        None => break,
                    },
                    _ = shutdown.changed() => break,
                }
            }
        });

        info!(
            recovered = recovered.len(),
            data_dir = %self.container.config.data_dir.display(),
            "Scoring node started"
        );
        Ok(recovered)
    }

    /// Serve one command per input line, one response per output line.
    pub async fn serve<I, O>(&self, input: I, mut output: O) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let handler = self.handler();
        let mut lines = input.lines();
        let mut shutdown = self.shutdown_rx.clone();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        info!("Input closed");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    let response = handler.handle_line(&line).await;
                    let mut bytes = serde_json::to_vec(&response)
                        .context("Failed to encode response")?;
                    bytes.push(b'\n');
                    output.write_all(&bytes).await.context("Failed to write response")?;
                    output.flush().await.context("Failed to flush response")?;
                }
                _ = shutdown.changed() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }
        Ok(())
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
