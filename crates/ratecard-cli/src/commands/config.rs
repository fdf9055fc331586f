//! Config command implementation.
//!
//! Shows and creates the pricing policy file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use ratecard_core::money::format_cents;
use ratecard_core::{PricingPolicy, RetailInput};
use rust_decimal::Decimal;

use crate::cli::OutputFormat;
use crate::output::{
    print_header, print_info, print_json, print_key_values, print_success, KeyValue,
};
use crate::settings::{default_policy_path, write_policy, LoadedPolicy};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the active pricing policy
    Show,

    /// Show the policy file location
    Path,

    /// Write a policy file from a preset
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Preset to start from
    #[arg(long, value_enum, default_value = "standard")]
    pub preset: Preset,

    /// Target file (defaults to the standard location)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Built-in policy presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Whole-dollar input, "MaaS" subscription
    Standard,
    /// Cents kept on input, "MDaaS" subscription
    Device,
}

impl Preset {
    fn policy(self) -> PricingPolicy {
        match self {
            Self::Standard => PricingPolicy::standard(),
            Self::Device => PricingPolicy::device_as_a_service(),
        }
    }
}

/// Execute the config command.
pub fn execute(
    args: ConfigArgs,
    loaded: &LoadedPolicy,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(loaded, format),
        ConfigCommand::Path => {
            println!("{}", default_policy_path()?.display());
            Ok(())
        }
        ConfigCommand::Init(init) => {
            let path = match init.path {
                Some(path) => path,
                None => default_policy_path()?,
            };
            write_policy(&path, &init.preset.policy(), init.force)?;
            if !quiet {
                print_success(&format!("Wrote pricing policy to {}", path.display()));
            }
            Ok(())
        }
    }
}

fn show(loaded: &LoadedPolicy, format: OutputFormat) -> Result<()> {
    let policy = &loaded.policy;
    let retail_input = match policy.retail_input {
        RetailInput::Whole => "whole (cents truncated)",
        RetailInput::Fractional => "fractional",
    };
    let rows = vec![
        KeyValue::new("Name", policy.name.clone()),
        KeyValue::new("Subsidy", format_cents(policy.subsidy)),
        KeyValue::new(
            "Annual Rate",
            format!("{}%", (policy.annual_rate * Decimal::ONE_HUNDRED).normalize()),
        ),
        KeyValue::new(
            "Subscription Term",
            format!("{} months", policy.subscription_term_months),
        ),
        KeyValue::new("Subscription Label", policy.subscription_label.clone()),
        KeyValue::new("Retail Input", retail_input),
    ];

    match format {
        OutputFormat::Table => {
            print_header("Pricing Policy");
            print_key_values(&rows);
            print_info(&format!("Source: {}", loaded.source));
        }
        OutputFormat::Json => print_json(policy)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}
