//! Rate records.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::RateFigures;
use crate::money::format_cents;

/// Name given to records created without a product name.
pub const UNDEFINED_PRODUCT: &str = "Undefined Product";

/// The computed offers for one product.
///
/// Figures are fixed at construction. The only later changes are a rename
/// and normalization of the two finance rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    product_name: String,
    retail: Decimal,
    contract: Decimal,
    subscription: Decimal,
    finance_24: Decimal,
    finance_36: Decimal,
}

impl RateRecord {
    /// Creates a record from computed figures.
    ///
    /// A missing or blank name is replaced by [`UNDEFINED_PRODUCT`].
    pub fn new(product_name: Option<&str>, figures: RateFigures) -> Self {
        Self {
            product_name: product_name_or_default(product_name),
            retail: figures.retail,
            contract: figures.contract,
            subscription: figures.subscription,
            finance_24: figures.finance_24,
            finance_36: figures.finance_36,
        }
    }

    /// Product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns true unless the record carries the sentinel name.
    pub fn is_named(&self) -> bool {
        self.product_name != UNDEFINED_PRODUCT
    }

    /// Retail price.
    pub fn retail(&self) -> Decimal {
        self.retail
    }

    /// Contract price.
    pub fn contract(&self) -> Decimal {
        self.contract
    }

    /// Subscription rate.
    pub fn subscription(&self) -> Decimal {
        self.subscription
    }

    /// 24 month finance rate.
    pub fn finance_24(&self) -> Decimal {
        self.finance_24
    }

    /// 36 month finance rate.
    pub fn finance_36(&self) -> Decimal {
        self.finance_36
    }

    /// Returns the five figures without the name.
    pub fn figures(&self) -> RateFigures {
        RateFigures {
            retail: self.retail,
            contract: self.contract,
            subscription: self.subscription,
            finance_24: self.finance_24,
            finance_36: self.finance_36,
        }
    }

    /// Reassigns the product name, returning the previous one.
    ///
    /// Collections keyed by name must re-index the record afterwards;
    /// [`RateLedger::rename`](crate::RateLedger::rename) does this.
    pub fn rename(&mut self, new_name: &str) -> String {
        std::mem::replace(&mut self.product_name, product_name_or_default(Some(new_name)))
    }

    pub(crate) fn set_finance_rates(&mut self, finance_24: Decimal, finance_36: Decimal) {
        self.finance_24 = finance_24;
        self.finance_36 = finance_36;
    }
}

fn product_name_or_default(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => UNDEFINED_PRODUCT.to_string(),
    }
}

impl fmt::Display for RateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: retail {} | contract {} | subscription {} | 24M {} | 36M {}",
            self.product_name,
            format_cents(self.retail),
            format_cents(self.contract),
            format_cents(self.subscription),
            format_cents(self.finance_24),
            format_cents(self.finance_36)
        )
    }
}
