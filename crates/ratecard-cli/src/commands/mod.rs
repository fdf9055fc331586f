//! CLI command implementations.

pub mod config;
pub mod quote;
pub mod table;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use quote::QuoteArgs;
pub use table::TableArgs;

use crate::error::{CliError, CliResult};

/// Splits a `RETAIL=NAME` product argument.
///
/// The name is optional: `"799"` and `"799="` both price an unnamed product.
pub fn parse_product(spec: &str) -> CliResult<(String, Option<String>)> {
    let (retail, name) = match spec.split_once('=') {
        Some((retail, name)) => (retail.trim(), Some(name.trim())),
        None => (spec.trim(), None),
    };
    if retail.is_empty() {
        return Err(CliError::InvalidProduct(spec.to_string()));
    }
    let name = name.filter(|n| !n.is_empty()).map(str::to_string);
    Ok((retail.to_string(), name))
}
