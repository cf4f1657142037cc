use std::process::ExitCode;

use clap::Parser as _;
use clowder_core::telemetry::{self, init_subscriber};
use tokio::{
    select,
    signal::unix::{SignalKind, signal},
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::cli::Cli;

mod cli;
mod clipboard;
mod holdings;
mod render;
mod token;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("failed to install error reporter: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    // Load configuration
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to read config:\n{err:?}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    init_subscriber(telemetry::get_subscriber(&config.log_level));

    let shutdown_token = CancellationToken::new();
    let command_jh = tokio::spawn(cli.run(config, shutdown_token.clone()));

    // Set up signal handlers for graceful shutdown
    let mut sigterm = signal(SignalKind::terminate())
        .expect("setting sigterm listener on unix should always work");
    let mut sigint = signal(SignalKind::interrupt())
        .expect("setting sigint listener on unix should always work");

    // Wait for either command completion or interrupt signal
    select! {
        res = command_jh => match res {
            Ok(Ok(())) => {
                info!("command completed");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!(error = %e, "command failed");
                eprintln!("{e:?}");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(%e, "command exited unexpectedly");
                ExitCode::FAILURE
            }
        },
        _ = sigterm.recv() => {
            info!("received SIGTERM signal");
            shutdown_token.cancel();
            ExitCode::FAILURE
        }
        _ = sigint.recv() => {
            info!("received SIGINT signal");
            shutdown_token.cancel();
            ExitCode::FAILURE
        }
    }
}
