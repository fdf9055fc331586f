//! Pricing policy.
//!
//! A [`PricingPolicy`] holds every constant the rate engine needs. Engines
//! are built from a policy, so several policies can be priced side by side.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

// =============================================================================
// RETAIL INPUT COERCION
// =============================================================================

/// How a raw retail price is coerced before any rate is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetailInput {
    /// Truncate toward zero to whole currency units (`1399.99` -> `1399`).
    #[default]
    Whole,
    /// Keep the price verbatim, cents included.
    Fractional,
}

impl RetailInput {
    /// Applies the coercion to a retail price.
    #[must_use]
    pub fn coerce(self, retail: Decimal) -> Decimal {
        match self {
            Self::Whole => retail.trunc(),
            Self::Fractional => retail,
        }
    }
}

// =============================================================================
// PRICING POLICY
// =============================================================================

/// Constants that drive rate computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Policy name/identifier.
    #[serde(default = "default_name")]
    pub name: String,

    /// Fixed amount knocked off retail for the contract offer.
    #[serde(default = "default_subsidy")]
    pub subsidy: Decimal,

    /// Nominal annual interest rate for finance plans, compounded monthly.
    #[serde(default = "default_annual_rate")]
    pub annual_rate: Decimal,

    /// Term of the flat subscription offer, in months.
    #[serde(default = "default_subscription_term")]
    pub subscription_term_months: u32,

    /// Coercion applied to incoming retail prices.
    #[serde(default)]
    pub retail_input: RetailInput,

    /// Display label for the subscription column.
    #[serde(default = "default_subscription_label")]
    pub subscription_label: String,
}

fn default_name() -> String {
    "standard".to_string()
}

fn default_subsidy() -> Decimal {
    dec!(450)
}

fn default_annual_rate() -> Decimal {
    dec!(0.125)
}

fn default_subscription_term() -> u32 {
    24
}

fn default_subscription_label() -> String {
    "MaaS".to_string()
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl PricingPolicy {
    /// Creates a policy with the given name and standard constants.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::standard()
        }
    }

    /// Standard handset pricing: 450 subsidy, 12.5% APR, whole-dollar input.
    pub fn standard() -> Self {
        Self {
            name: default_name(),
            subsidy: default_subsidy(),
            annual_rate: default_annual_rate(),
            subscription_term_months: default_subscription_term(),
            retail_input: RetailInput::Whole,
            subscription_label: default_subscription_label(),
        }
    }

    /// Device-as-a-service pricing: same constants, cents kept on input.
    pub fn device_as_a_service() -> Self {
        Self {
            name: "device-as-a-service".to_string(),
            retail_input: RetailInput::Fractional,
            subscription_label: "MDaaS".to_string(),
            ..Self::standard()
        }
    }

    /// Monthly periodic rate (`annual_rate / 12`).
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / dec!(12)
    }

    /// Builder method to set the subsidy.
    pub fn with_subsidy(mut self, subsidy: Decimal) -> Self {
        self.subsidy = subsidy;
        self
    }

    /// Builder method to set the annual rate.
    pub fn with_annual_rate(mut self, annual_rate: Decimal) -> Self {
        self.annual_rate = annual_rate;
        self
    }

    /// Builder method to set the retail input coercion.
    pub fn with_retail_input(mut self, retail_input: RetailInput) -> Self {
        self.retail_input = retail_input;
        self
    }

    /// Builder method to set the subscription label.
    pub fn with_subscription_label(mut self, label: impl Into<String>) -> Self {
        self.subscription_label = label.into();
        self
    }
}

impl Validate for PricingPolicy {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.subsidy < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "subsidy",
                format!("Subsidy {} must not be negative", self.subsidy),
                "non_negative_subsidy",
            ));
        }

        if self.annual_rate < Decimal::ZERO || self.annual_rate >= Decimal::ONE {
            errors.push(ValidationError::with_rule(
                "annual_rate",
                format!("Annual rate {} must be in [0, 1)", self.annual_rate),
                "valid_rate",
            ));
        }

        if self.subscription_term_months == 0 {
            errors.push(ValidationError::with_rule(
                "subscription_term_months",
                "Subscription term must be at least one month",
                "positive_term",
            ));
        }

        if self.subscription_label.trim().is_empty() {
            errors.push(ValidationError::new(
                "subscription_label",
                "Subscription label cannot be empty",
            ));
        }

        errors
    }
}
