use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use posture_dash::api::{ApiClient, Fetch, HEALTH_PATH, TASKS_PATH};
use posture_dash::config::{load_or_default, validate_config, ConfigError};
use posture_dash::lifecycle::{wait_for_signal, Shutdown};
use posture_dash::monitor::PostureMonitor;
use posture_dash::observability::init_logging;
use posture_dash::posture::{self, PostureReport};

#[derive(Parser)]
#[command(name = "posture-cli")]
#[command(about = "Check the security posture of a task API", long_about = None)]
struct Cli {
    /// API base URL (overrides the config file).
    #[arg(short, long)]
    url: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides the config file).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the security checks once; exits 1 if any check fails
    Check {
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-evaluate periodically until interrupted
    Watch {
        /// Seconds between evaluations (overrides the config file)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Show the raw health response
    Health,
    /// Show the task list
    Tasks,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }
    if let Some(timeout) = cli.timeout_secs {
        config.api.timeout_secs = timeout;
    }
    if let Commands::Watch { interval_secs: Some(secs) } = cli.command {
        config.watch.interval_secs = secs;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(if cli.verbose { "debug" } else { "warn" });
    let client = ApiClient::new(&config.api)?;

    match cli.command {
        Commands::Check { json } => {
            let report = posture::collect(&client).await;
            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
            return Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Commands::Watch { .. } => {
            let shutdown = Shutdown::new();
            let rx = shutdown.subscribe();
            tokio::spawn(wait_for_signal(shutdown));

            let monitor =
                PostureMonitor::new(client, Duration::from_secs(config.watch.interval_secs));
            monitor
                .run(rx, |report| {
                    print_report(report);
                    println!();
                })
                .await;
        }
        Commands::Health => {
            print_json(&client.get_json(HEALTH_PATH).await)?;
        }
        Commands::Tasks => {
            let tasks = client.get_json(TASKS_PATH).await;
            if !tasks.ok {
                eprintln!("Error: API returned status {}", tasks.status);
                if let Some(error) = &tasks.error {
                    eprintln!("Reason: {}", error);
                }
                return Ok(ExitCode::FAILURE);
            }
            print_json(&tasks.data)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &PostureReport) {
    for check in &report.checks {
        println!("{}", check);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
