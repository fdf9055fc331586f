//! CLI error types.

use std::path::PathBuf;

use ratecard_core::RateError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed `--product` argument.
    #[error("Invalid product '{0}'. Use RETAIL=NAME, e.g. \"1399=Phone A\".")]
    InvalidProduct(String),

    /// Bad row in an input price list.
    #[error("Input row {line}: {reason}")]
    InputRow {
        /// One-based line number in the input file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// Nothing to price.
    #[error("No products given. Use --product, --input or --demo.")]
    NoProducts,

    /// Unreadable or invalid policy file.
    #[error("Configuration error in {path}: {reason}")]
    Config {
        /// Policy file path.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Refusing to overwrite an existing policy file.
    #[error("Configuration file {0} already exists. Use --force to overwrite.")]
    ConfigExists(PathBuf),

    /// Neither a config nor a home directory could be located.
    #[error("Cannot determine a configuration directory")]
    NoConfigDir,

    /// Pricing error from the core.
    #[error(transparent)]
    Rate(#[from] RateError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
