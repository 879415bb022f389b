//! Posture dashboard server.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!                 │                 POSTURE DASHBOARD                │
//!   Browser       │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ──────────────┼─▶│  http    │──▶│ posture  │──▶│     api      │──┼──▶ remote API
//!   ◀─────────────┼──│ render   │◀──│evaluator │◀──│  Envelope    │◀─┼─── /health
//!                 │  └──────────┘   └──────────┘   └──────────────┘  │    /security/info
//!                 │                                                  │    /tasks
//!                 │  ┌────────────────────────────────────────────┐  │
//!                 │  │ config (+ reload) │ observability │ lifecycle│  │
//!                 │  └────────────────────────────────────────────┘  │
//!                 └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use posture_dash::config::{
    load_or_default, validate_config, ConfigError, ConfigWatcher, Overrides,
};
use posture_dash::http::DashboardServer;
use posture_dash::lifecycle::{wait_for_signal, Shutdown};
use posture_dash::observability::{init_logging, init_metrics};

#[derive(Parser)]
#[command(name = "posture-dash")]
#[command(about = "Security posture dashboard for a task API", long_about = None)]
struct Args {
    /// TOML configuration file; watched for changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override api.base_url.
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let overrides = Overrides {
        base_url: args.url,
        bind_address: args.bind,
    };
    let mut config = load_or_default(args.config.as_deref())?;
    init_logging(&config.observability.log_level);
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "posture-dash starting");
    tracing::info!(
        base_url = %config.api.base_url,
        bind_address = %config.server.bind_address,
        api_timeout_secs = config.api.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher alive for the lifetime of the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path, overrides);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(wait_for_signal(shutdown));

    let server = DashboardServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
