//! Samsa Market CLI - Catalog seeding and backend checks.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog from a YAML file
//! sm-cli seed --file recipes.yaml
//!
//! # Verify backend reachability and report the catalog size
//! sm-cli check
//! ```
//!
//! # Commands
//!
//! - `seed` - Bulk-create recipe listings from a YAML file
//! - `check` - Verify Firestore reachability

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sm-cli")]
#[command(author, version, about = "Samsa Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the recipe catalog from a YAML file
    Seed {
        /// Path to the YAML file of recipe drafts
        #[arg(short, long)]
        file: String,

        /// Validate and report without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Verify backend reachability and report the catalog size
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Seed { file, dry_run } => commands::seed::run(&file, dry_run).await?,
        Commands::Check => commands::check::run().await?,
    }
    Ok(())
}
