//! Output formatting utilities.

use std::io::Write;

use colored::Colorize;
use ratecard_core::money::format_cents;
use ratecard_core::RateTable;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Writes a rate table in the requested format.
pub fn write_rate_table<W: Write>(
    table: &RateTable,
    format: OutputFormat,
    mut writer: W,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            writeln!(writer, "{}", render_rate_table(table))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, table)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            wtr.write_record(&table.headers)?;
            for row in &table.rows {
                wtr.write_record(row.cells())?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Renders a rate table as a boxed text grid.
pub fn render_rate_table(table: &RateTable) -> String {
    if table.is_empty() {
        return "No results.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.cells().map(String::from));
    }

    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Prints key/value pairs as a table.
pub fn print_key_values(data: &[KeyValue]) {
    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Prints a single result as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Formats an amount as dollars with thousands separators (`$1,399.00`).
pub fn format_currency(value: Decimal) -> String {
    let plain = format_cents(value.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Item")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from an amount, formatted as currency.
    pub fn from_amount(key: impl Into<String>, value: Decimal) -> Self {
        Self::new(key, format_currency(value))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
