// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyrack - a credential vault backend with encrypted secrets at rest.
//!
//! This is the binary entry point.

use clap::{Parser, Subcommand};

mod serve;

/// Keyrack - a credential vault backend with encrypted secrets at rest.
#[derive(Parser, Debug)]
#[command(name = "keyrack", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Keyrack HTTP server.
    Serve,
    /// Generate a fresh 256-bit master key, hex-encoded for configuration.
    Keygen,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => {
            let config = match keyrack_config::load_and_validate() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("keyrack: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("keyrack: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Keygen) => match keyrack_vault::cipher::generate_key_hex() {
            Ok(key) => println!("{key}"),
            Err(e) => {
                eprintln!("keyrack: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("keyrack: use --help for available commands");
        }
    }
}
