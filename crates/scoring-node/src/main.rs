//! # Cricket Scoring Node
//!
//! Entry point: telemetry, configuration, recovery, then the command loop
//! on stdin/stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use scoring_node::container::NodeConfig;
use scoring_node::NodeRuntime;
use scoring_telemetry::{init_telemetry, TelemetryConfig};
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    let config = NodeConfig::from_env().context("Invalid node configuration")?;
    info!(
        data_dir = %config.data_dir.display(),
        submit_timeout_ms = config.submit_timeout_ms(),
        "Configuration loaded"
    );

    let runtime = Arc::new(NodeRuntime::new(config).await?);
    runtime.start().await?;

    let signal_runtime = Arc::clone(&runtime);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_runtime.shutdown(),
            Err(err) => error!(error = %err, "Failed to listen for ctrl-c"),
        }
    });

    runtime
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!("Scoring node stopped");
    Ok(())
}
