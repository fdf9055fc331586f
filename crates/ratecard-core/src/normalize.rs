//! Psychological price normalization.
//!
//! Moves a computed finance rate onto the nearest of three anchors:
//! the previous dollar's `.99`, this dollar's `.49`, or this dollar's `.99`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::record::RateRecord;

const HIGH_ANCHOR: Decimal = dec!(0.99);
const LOW_ANCHOR: Decimal = dec!(0.49);
const DROP_THRESHOLD: Decimal = dec!(0.15);
const ONE_CENT: Decimal = dec!(0.01);

/// Rounds rates to `.49` / `.99` price points.
///
/// The rule, with `frac` the cents part of the rate:
///
/// | condition                                  | result               |
/// |--------------------------------------------|----------------------|
/// | `0.99 - frac <= frac - 0.49`               | `X.99`               |
/// | otherwise, `frac < 0.15`                   | `(X - 1).99`         |
/// | otherwise                                  | `X.49`               |
///
/// The output is a fixed point: normalizing it again changes nothing.
/// Rates under `0.15` land on `-0.01`, the `.99` below zero dollars.
///
/// # Example
///
/// ```rust
/// use ratecard_core::PriceNormalizer;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(PriceNormalizer::normalize(dec!(18.77)), dec!(18.99));
/// assert_eq!(PriceNormalizer::normalize(dec!(13.10)), dec!(12.99));
/// assert_eq!(PriceNormalizer::normalize(dec!(13.35)), dec!(13.49));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceNormalizer;

impl PriceNormalizer {
    /// Normalizes a single rate.
    #[must_use]
    pub fn normalize(rate: Decimal) -> Decimal {
        let frac = rate % Decimal::ONE;
        let whole = rate - frac;

        let to_high = HIGH_ANCHOR - frac;
        let to_low = frac - LOW_ANCHOR;

        if to_high > to_low {
            if frac < DROP_THRESHOLD {
                whole - ONE_CENT
            } else {
                whole + LOW_ANCHOR
            }
        } else {
            whole + HIGH_ANCHOR
        }
    }

    /// Normalizes both finance rates of a record in place.
    pub fn apply(record: &mut RateRecord) {
        let finance_24 = Self::normalize(record.finance_24());
        let finance_36 = Self::normalize(record.finance_36());
        log::debug!(
            "normalized '{}': finance_24 {} -> {}, finance_36 {} -> {}",
            record.product_name(),
            record.finance_24(),
            finance_24,
            record.finance_36(),
            finance_36
        );
        record.set_finance_rates(finance_24, finance_36);
    }
}
