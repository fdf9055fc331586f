//! Table command implementation.
//!
//! Prices a list of products into one rate table, printed or exported.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Deserialize;

use ratecard_core::{RateEngine, RateLedger};

use crate::cli::OutputFormat;
use crate::commands::parse_product;
use crate::error::{CliError, CliResult};
use crate::output::{print_success, write_rate_table};

/// Sample products: two handsets, one priced from text.
const DEMO_PRODUCTS: [(&str, &str); 2] = [
    ("1399", "Apple iPhone SE (2020) 64GB"),
    ("799", "Samsung Galaxy S22"),
];

/// Arguments for the table command.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Product as RETAIL=NAME; repeat for several products
    #[arg(short, long = "product", value_name = "RETAIL=NAME")]
    pub products: Vec<String>,

    /// CSV price list with a `retail` column and an optional `name` column
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the table to a file instead of stdout (.json for JSON, else CSV)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Round finance rates to .49 / .99 price points
    #[arg(long)]
    pub normalize: bool,

    /// Include the sample handsets
    #[arg(long)]
    pub demo: bool,
}

/// One row of an input price list.
#[derive(Debug, Deserialize)]
struct PriceListRow {
    retail: String,
    #[serde(default)]
    name: Option<String>,
}

/// Execute the table command.
pub fn execute(args: TableArgs, engine: RateEngine, format: OutputFormat, quiet: bool) -> Result<()> {
    let mut ledger = RateLedger::new(engine);

    if args.demo {
        for (retail, name) in DEMO_PRODUCTS {
            ledger.add_raw(retail, Some(name))?;
        }
    }

    if let Some(ref path) = args.input {
        let loaded = read_price_list(path)?;
        tracing::info!(path = %path.display(), rows = loaded.len(), "price list loaded");
        ledger.merge_ledger(price_ledger(ledger.engine().clone(), loaded)?);
    }

    for spec in &args.products {
        let (retail, name) = parse_product(spec)?;
        ledger.add_raw(&retail, name.as_deref())?;
    }

    if ledger.is_empty() {
        return Err(CliError::NoProducts.into());
    }

    if args.normalize {
        ledger.normalize_all();
    }

    let table = ledger.to_table();

    match args.output {
        Some(ref path) => {
            let export = if has_extension(path, "json") {
                OutputFormat::Json
            } else {
                OutputFormat::Csv
            };
            let file = File::create(path)?;
            write_rate_table(&table, export, BufWriter::new(file))?;
            tracing::info!(path = %path.display(), rows = table.len(), "rate table exported");
            if !quiet {
                print_success(&format!("Wrote {} rows to {}", table.len(), path.display()));
            }
        }
        None => write_rate_table(&table, format, std::io::stdout().lock())?,
    }

    Ok(())
}

/// Reads a CSV price list. Rows are returned with their line numbers.
fn read_price_list(path: &Path) -> CliResult<Vec<(u64, PriceListRow)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: PriceListRow = record.deserialize(Some(&headers))?;
        rows.push((line, row));
    }
    Ok(rows)
}

fn price_ledger(engine: RateEngine, rows: Vec<(u64, PriceListRow)>) -> CliResult<RateLedger> {
    let mut ledger = RateLedger::new(engine);
    for (line, row) in rows {
        ledger
            .add_raw(&row.retail, row.name.as_deref())
            .map_err(|e| CliError::InputRow {
                line,
                reason: e.to_string(),
            })?;
    }
    Ok(ledger)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_read_price_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retail,name").unwrap();
        writeln!(file, "1399, Phone A").unwrap();
        writeln!(file, "799,").unwrap();
        file.flush().unwrap();

        let rows = read_price_list(file.path()).unwrap();
        let ledger = price_ledger(RateEngine::default(), rows).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.all()[0].product_name(), "Phone A");
        assert_eq!(ledger.all()[0].contract(), dec!(949));
        assert!(!ledger.all()[1].is_named());
    }

    #[test]
    fn test_bad_row_reports_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retail,name").unwrap();
        writeln!(file, "1399,Phone A").unwrap();
        writeln!(file, "lots,Phone B").unwrap();
        file.flush().unwrap();

        let rows = read_price_list(file.path()).unwrap();
        match price_ledger(RateEngine::default(), rows) {
            Err(CliError::InputRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected InputRow, got {:?}", other.map(|l| l.len())),
        }
    }
}
