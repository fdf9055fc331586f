//! Quote command implementation.
//!
//! Prints every offer for one product.

use anyhow::Result;
use clap::Args;

use ratecard_core::{RateEngine, RateLedger, RateRow};

use crate::cli::OutputFormat;
use crate::output::{self, print_header, print_key_values, KeyValue};

/// Arguments for the quote command.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Retail price (e.g. 1399 or 1399.99)
    pub retail: String,

    /// Product name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Round finance rates to .49 / .99 price points
    #[arg(long)]
    pub normalize: bool,
}

/// Execute the quote command.
pub fn execute(args: QuoteArgs, engine: RateEngine, format: OutputFormat) -> Result<()> {
    let mut ledger = RateLedger::new(engine);
    ledger.add_raw(&args.retail, args.name.as_deref())?;
    if args.normalize {
        ledger.normalize_all();
    }

    let table = ledger.to_table();
    let record = &ledger.all()[0];
    tracing::debug!(%record, "quote computed");

    match format {
        OutputFormat::Table => {
            if record.is_named() {
                print_header(&format!("Product Name: {}", record.product_name()));
            }
            let label = &ledger.engine().policy().subscription_label;
            let results = vec![
                KeyValue::from_amount("Retail Price", record.retail()),
                KeyValue::from_amount("Contract Price", record.contract()),
                KeyValue::from_amount(format!("{} Price", label), record.subscription()),
                KeyValue::from_amount("24M Finance Price", record.finance_24()),
                KeyValue::from_amount("36M Finance Price", record.finance_36()),
            ];
            print_key_values(&results);
        }
        OutputFormat::Json => {
            let row = RateRow::from_record(record);
            output::print_json(&row)?;
        }
        OutputFormat::Csv => {
            output::write_rate_table(&table, format, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
