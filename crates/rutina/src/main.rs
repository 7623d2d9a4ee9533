// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rutina - a Telegram diary bot.
//!
//! Messages are classified as goals or notes; a background scheduler sends
//! periodic digests of outstanding goals. This is the binary entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod serve;

/// Rutina - a Telegram diary bot.
#[derive(Parser, Debug)]
#[command(name = "rutina", version, about, long_about = None)]
struct Cli {
    /// Explicit config file path (skips the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot and the reminder scheduler.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => rutina_config::load_and_validate_path(path),
        None => rutina_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            rutina_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("rutina: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("rutina: use --help for available commands");
        }
    }
}
