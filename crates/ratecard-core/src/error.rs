//! Error types for the Ratecard library.
//!
//! Every failure in the core is a deterministic function of its input:
//! nothing here is transient and nothing is retried.

use std::fmt;

use thiserror::Error;

/// A specialized Result type for Ratecard operations.
pub type RateResult<T> = Result<T, RateError>;

/// The main error type for Ratecard operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    /// Retail price is negative, non-finite, non-numeric or out of range.
    #[error("Invalid retail price: {value} - {reason}")]
    InvalidInput {
        /// The rejected input, as the caller supplied it.
        value: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// No record in the ledger matches the requested identity.
    #[error("Product not found: {product_name}")]
    NotFound {
        /// Name of the missing product.
        product_name: String,
    },

    /// A pricing policy field failed validation.
    #[error("Invalid pricing policy: {field} - {reason}")]
    InvalidPolicy {
        /// Field that failed validation.
        field: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Several pricing policy fields failed validation.
    #[error("Invalid pricing policy: {}", join_errors(.0))]
    InvalidPolicies(Vec<ValidationError>),
}

impl RateError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(value: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(product_name: impl Into<String>) -> Self {
        Self::NotFound {
            product_name: product_name.into(),
        }
    }

    /// Returns true if this error reports a missing ledger entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> RateResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(RateError::InvalidPolicy {
                    field: err.field,
                    reason: err.message,
                })
            }
            _ => Err(RateError::InvalidPolicies(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RateError::invalid_input("-5", "retail price must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid retail price: -5 - retail price must not be negative"
        );
    }

    #[test]
    fn test_not_found() {
        let err = RateError::not_found("Phone Z");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Phone Z"));
    }

    #[test]
    fn test_multiple_validation_errors_display() {
        let err = RateError::InvalidPolicies(vec![
            ValidationError::new("subsidy", "must not be negative"),
            ValidationError::with_rule("annual_rate", "out of range", "rate_range"),
        ]);
        let text = err.to_string();
        assert!(text.contains("subsidy: must not be negative"));
        assert!(text.contains("annual_rate: out of range (rule: rate_range)"));
    }
}
