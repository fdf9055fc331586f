//! Ratecard CLI - purchase offers for retail products.
//!
//! # Usage
//!
//! ```bash
//! # Offers for a single product
//! ratecard quote 1399 --name "Phone A"
//!
//! # Rate table for several products, finance rates normalized
//! ratecard table -p "1399=Phone A" -p "799=Phone B" --normalize
//!
//! # Export a CSV price list to a spreadsheet
//! ratecard table --input products.csv --output rates.csv
//!
//! # Inspect the active pricing policy
//! ratecard config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use ratecard_core::RateEngine;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let loaded = settings::load_policy(cli.config.as_deref())?;
    tracing::debug!(policy = %loaded.policy.name, source = %loaded.source, "pricing policy loaded");

    // Execute command
    match cli.command {
        Commands::Quote(args) => {
            let engine = RateEngine::new(loaded.policy)?;
            commands::quote::execute(args, engine, cli.format)?;
        }
        Commands::Table(args) => {
            let engine = RateEngine::new(loaded.policy)?;
            commands::table::execute(args, engine, cli.format, cli.quiet)?;
        }
        Commands::Config(args) => commands::config::execute(args, &loaded, cli.format, cli.quiet)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON and CSV output on stdout stay clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ratecard_cli=debug,ratecard_core=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ratecard_cli=info,ratecard_core=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
