//! Rate engine.
//!
//! Turns a retail price into the five canonical offers. Every figure is
//! derived from the retail price alone; nothing is cached between calls.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::{RateError, RateResult, Validate};
use crate::money::round_cents;
use crate::policy::PricingPolicy;
use crate::record::RateRecord;

/// Term of the shorter finance plan, in months.
pub const SHORT_FINANCE_TERM: u32 = 24;

/// Term of the longer finance plan, in months.
pub const LONG_FINANCE_TERM: u32 = 36;

/// The five offers derived from one retail price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateFigures {
    /// Retail price after input coercion.
    pub retail: Decimal,
    /// Subsidized contract price.
    pub contract: Decimal,
    /// Flat monthly subscription rate.
    pub subscription: Decimal,
    /// Monthly payment over the 24 month finance plan.
    pub finance_24: Decimal,
    /// Monthly payment over the 36 month finance plan.
    pub finance_36: Decimal,
}

/// Computes rate figures under a fixed [`PricingPolicy`].
///
/// # Example
///
/// ```rust
/// use ratecard_core::RateEngine;
/// use rust_decimal_macros::dec;
///
/// let engine = RateEngine::default();
/// let figures = engine.compute(dec!(1399)).unwrap();
/// assert_eq!(figures.contract, dec!(949));
/// assert_eq!(figures.subscription, dec!(58.29));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateEngine {
    policy: PricingPolicy,
}

impl RateEngine {
    /// Creates an engine for the given policy.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidPolicy` (or `InvalidPolicies`) if the policy
    /// fails validation.
    pub fn new(policy: PricingPolicy) -> RateResult<Self> {
        policy.validate_or_error()?;
        Ok(Self { policy })
    }

    /// Returns the policy this engine prices with.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Parses a retail price from text and applies the input coercion.
    ///
    /// Accepts plain decimal notation with optional surrounding whitespace
    /// (`"799"`, `" 1399.50 "`).
    pub fn parse_retail(&self, raw: &str) -> RateResult<Decimal> {
        let trimmed = raw.trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| RateError::invalid_input(raw, "retail price is not a number"))?;
        self.check_retail(value)
    }

    /// Computes all five figures for a retail price.
    ///
    /// The policy's [`RetailInput`](crate::policy::RetailInput) is applied
    /// first. Under the default `Whole` coercion cents are truncated, so
    /// `999.99` is priced and stored as `999`; use `Fractional` to keep them.
    pub fn compute(&self, retail: Decimal) -> RateResult<RateFigures> {
        let retail = self.check_retail(retail)?;

        let figures = RateFigures {
            retail,
            contract: self.contract(retail),
            subscription: self.subscription(retail),
            finance_24: self.finance(retail, SHORT_FINANCE_TERM)?,
            finance_36: self.finance(retail, LONG_FINANCE_TERM)?,
        };

        log::debug!(
            "policy={} retail={} contract={} subscription={} finance_24={} finance_36={}",
            self.policy.name,
            figures.retail,
            figures.contract,
            figures.subscription,
            figures.finance_24,
            figures.finance_36
        );

        Ok(figures)
    }

    /// Computes all five figures for a floating point retail price.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidInput` for NaN, infinities and values that
    /// do not fit a `Decimal`.
    pub fn compute_f64(&self, retail: f64) -> RateResult<RateFigures> {
        if !retail.is_finite() {
            return Err(RateError::invalid_input(retail, "retail price must be finite"));
        }
        let value = Decimal::from_f64(retail)
            .ok_or_else(|| RateError::invalid_input(retail, "retail price is out of range"))?;
        self.compute(value)
    }

    /// Computes a named [`RateRecord`]. A missing name gets the sentinel.
    pub fn record(&self, retail: Decimal, product_name: Option<&str>) -> RateResult<RateRecord> {
        let figures = self.compute(retail)?;
        Ok(RateRecord::new(product_name, figures))
    }

    /// Contract price: retail minus the subsidy, floored at zero.
    pub fn contract(&self, retail: Decimal) -> Decimal {
        if retail > self.policy.subsidy {
            retail - self.policy.subsidy
        } else {
            Decimal::ZERO
        }
    }

    /// Flat subscription rate: retail spread evenly over the term, to the cent.
    pub fn subscription(&self, retail: Decimal) -> Decimal {
        round_cents(retail / Decimal::from(self.policy.subscription_term_months))
    }

    /// Fixed monthly payment that fully amortizes `retail` over `term_months`.
    ///
    /// Ordinary annuity, zero future value, interest compounded monthly at
    /// `annual_rate / 12`:
    ///
    /// ```text
    /// payment = P * r / (1 - (1 + r)^-n)  =  P * r * f / (f - 1),  f = (1 + r)^n
    /// ```
    ///
    /// The result is rounded to the cent.
    pub fn finance(&self, retail: Decimal, term_months: u32) -> RateResult<Decimal> {
        if term_months == 0 {
            return Err(RateError::invalid_input(
                term_months,
                "finance term must be at least one month",
            ));
        }
        if retail.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let rate = self.policy.monthly_rate();
        if rate.is_zero() {
            return Ok(round_cents(retail / Decimal::from(term_months)));
        }

        let overflow = || RateError::invalid_input(retail, "retail price too large to amortize");
        let growth = (Decimal::ONE + rate)
            .checked_powi(i64::from(term_months))
            .ok_or_else(overflow)?;
        let payment = retail
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(growth))
            .and_then(|v| v.checked_div(growth - Decimal::ONE))
            .ok_or_else(overflow)?;

        log::trace!(
            "finance retail={} term={} raw_payment={}",
            retail,
            term_months,
            payment
        );

        Ok(round_cents(payment.abs()))
    }

    fn check_retail(&self, retail: Decimal) -> RateResult<Decimal> {
        if retail < Decimal::ZERO {
            return Err(RateError::invalid_input(
                retail,
                "retail price must not be negative",
            ));
        }
        Ok(self.policy.retail_input.coerce(retail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RetailInput;
    use rust_decimal_macros::dec;

    fn engine() -> RateEngine {
        RateEngine::default()
    }

    #[test]
    fn test_below_subsidy() {
        let figures = engine().compute(dec!(399)).unwrap();
        assert_eq!(figures.retail, dec!(399));
        assert_eq!(figures.contract, dec!(0));
        assert_eq!(figures.subscription, dec!(16.63));
        assert_eq!(figures.finance_24, dec!(18.88));
        assert_eq!(figures.finance_36, dec!(13.35));
    }

    #[test]
    fn test_above_subsidy() {
        let figures = engine().compute(dec!(1399)).unwrap();
        assert_eq!(figures.contract, dec!(949));
        assert_eq!(figures.subscription, dec!(58.29));
        assert_eq!(figures.finance_24, dec!(66.18));
        assert_eq!(figures.finance_36, dec!(46.80));
    }

    #[test]
    fn test_subsidy_boundary() {
        assert_eq!(engine().contract(dec!(450)), dec!(0));
        assert_eq!(engine().contract(dec!(451)), dec!(1));
    }

    #[test]
    fn test_zero_retail() {
        let figures = engine().compute(Decimal::ZERO).unwrap();
        assert_eq!(figures.contract, dec!(0));
        assert_eq!(figures.subscription, dec!(0));
        assert_eq!(figures.finance_24, dec!(0));
        assert_eq!(figures.finance_36, dec!(0));
    }

    #[test]
    fn test_negative_retail_rejected() {
        let err = engine().compute(dec!(-1)).unwrap_err();
        assert!(matches!(err, RateError::InvalidInput { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(engine().compute_f64(f64::NAN).is_err());
        assert!(engine().compute_f64(f64::INFINITY).is_err());
        assert_eq!(
            engine().compute_f64(799.0).unwrap(),
            engine().compute(dec!(799)).unwrap()
        );
    }

    #[test]
    fn test_parse_retail() {
        let engine = engine();
        assert_eq!(engine.parse_retail("799").unwrap(), dec!(799));
        assert_eq!(engine.parse_retail(" 1399.75 ").unwrap(), dec!(1399));
        assert!(engine.parse_retail("twelve").is_err());
        assert!(engine.parse_retail("").is_err());
        assert!(engine.parse_retail("-3").is_err());
    }

    #[test]
    fn test_fractional_input_keeps_cents() {
        let policy = PricingPolicy::standard().with_retail_input(RetailInput::Fractional);
        let engine = RateEngine::new(policy).unwrap();
        let figures = engine.compute(dec!(999.99)).unwrap();
        assert_eq!(figures.retail, dec!(999.99));
        assert_eq!(figures.contract, dec!(549.99));
        assert_eq!(figures.subscription, dec!(41.67));
        assert_eq!(figures.finance_24, dec!(47.31));
        assert_eq!(figures.finance_36, dec!(33.45));
    }

    #[test]
    fn test_whole_input_truncates() {
        let figures = engine().compute(dec!(999.99)).unwrap();
        assert_eq!(figures.retail, dec!(999));
    }

    #[test]
    fn test_zero_interest_policy() {
        let policy = PricingPolicy::standard().with_annual_rate(Decimal::ZERO);
        let engine = RateEngine::new(policy).unwrap();
        assert_eq!(engine.finance(dec!(1200), 24).unwrap(), dec!(50));
        assert_eq!(engine.finance(dec!(1200), 36).unwrap(), dec!(33.33));
    }

    #[test]
    fn test_zero_term_rejected() {
        assert!(engine().finance(dec!(100), 0).is_err());
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let policy = PricingPolicy::standard().with_subsidy(dec!(-450));
        assert!(RateEngine::new(policy).is_err());
    }

    #[test]
    fn test_custom_subsidy() {
        let policy = PricingPolicy::standard().with_subsidy(dec!(200));
        let engine = RateEngine::new(policy).unwrap();
        assert_eq!(engine.compute(dec!(399)).unwrap().contract, dec!(199));
    }
}
