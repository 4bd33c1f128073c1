//! nowplay - Now-playing poller entry point
//!
//! Polls a now-playing backend every few seconds, prints the playback
//! progress line and prints the track-info fragment whenever the playing
//! track changes. Runs until Ctrl+C or SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nowplay_poller::{startup, HttpStatusSource, Poller, TerminalTarget, TickOutcome};

/// Command-line arguments for nowplay
#[derive(Parser, Debug)]
#[command(name = "nowplay")]
#[command(about = "Polls a now-playing backend and renders progress and track info")]
#[command(version)]
struct Args {
    /// Backend base URL (overrides NOWPLAY_BASE_URL and the config file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Config file (defaults to ~/.config/nowplay/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single tick and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the rendered page. Tracing starts
    // before config loading so its info/warn lines are not lost.
    let (filter_layer, filter_handle) = startup::reloadable_filter(args.log_level.as_deref());
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting nowplay {}", startup::build_id());

    let config = startup::load_config(
        args.base_url.as_deref(),
        args.log_level.as_deref(),
        args.config.as_deref(),
    )
    .context("Failed to load configuration")?;
    startup::apply_log_level(&filter_handle, &config);

    info!("Backend: {}", config.base_url);

    let source =
        HttpStatusSource::new(&config.base_url).context("Failed to create backend client")?;
    let poller = Arc::new(Poller::new(
        Arc::new(source),
        Arc::new(TerminalTarget::stdout()),
    ));

    if args.once {
        if poller.tick().await == TickOutcome::Failed {
            bail!("Could not fetch playback progress from {}", config.base_url);
        }
        return Ok(());
    }

    let handle = poller.start();

    shutdown_signal().await;
    handle.stop().await;

    info!("Shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
