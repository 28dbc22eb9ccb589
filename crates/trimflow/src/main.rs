// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trimflow - WhatsApp customer-service and franchise-lead bot.
//!
//! Binary entry point: loads configuration, initializes logging, and
//! starts the gateway server.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod serve;

/// Trimflow - salon-chain WhatsApp bot.
#[derive(Parser, Debug)]
#[command(name = "trimflow", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook + dashboard server.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match trimflow_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("trimflow: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(agent = %config.agent.name, "configuration loaded");

    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run(config).await {
                tracing::error!(error = %e, "server exited with error");
                std::process::exit(1);
            }
        }
    }
}
