//! Boutique CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! boutique-cli migrate
//!
//! # Seed sample users, products, and an order
//! boutique-cli seed
//!
//! # Wipe seeded data without re-importing
//! boutique-cli seed --destroy
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "boutique-cli")]
#[command(author, version, about = "Boutique CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Seed the database with sample data
    Seed {
        /// Delete all data without importing
        #[arg(short, long)]
        destroy: bool,
    },
}

#[tokio::main]
async fn main() {
    // Plain fmt subscriber, no Sentry in the CLI
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { destroy } => commands::seed::run(destroy).await?,
    }
    Ok(())
}
