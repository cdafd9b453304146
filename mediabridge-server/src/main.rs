//! MediaBridge server - main entry point
//!
//! Wires configuration, tracing and a playback session against the stub
//! backend, then waits for SIGINT. Session events are printed as JSON
//! lines; the IPC transport that would normally carry them is supplied by
//! the platform integration.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use mediabridge_server::{
    Config, EventForwarder, SessionPlayer, StubBackend, ThreadTimerFactory,
};

/// Command-line arguments for mediabridge-server
#[derive(Parser, Debug)]
#[command(name = "mediabridge-server")]
#[command(about = "Media pipeline control server")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "MEDIABRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Tracing filter, overrides the configured default
    #[arg(long, env = "RUST_LOG")]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    let filter = args.log_filter.unwrap_or_else(|| config.log_filter.clone());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MediaBridge server");

    let session_id = Uuid::new_v4();
    let (event_tx, event_rx) = mpsc::channel();

    let player = SessionPlayer::new(
        session_id,
        Arc::new(StubBackend::new()),
        Arc::new(EventForwarder::new(session_id, event_tx)),
        Arc::new(ThreadTimerFactory),
        &config,
    )
    .context("Failed to create playback session")?;
    info!(%session_id, "Playback session ready");

    // Print session events as JSON lines until the forwarder goes away.
    let printer = std::thread::spawn(move || {
        for event in event_rx {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to serialize event: {}", e),
            }
        }
    });

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .context("Failed to install Ctrl+C handler")?;

    shutdown_rx.recv().ok();
    info!("Received Ctrl+C, shutting down");

    drop(player);
    let _ = printer.join();

    info!("Server shutdown complete");
    Ok(())
}
