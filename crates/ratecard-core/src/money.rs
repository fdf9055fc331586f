//! Rounding and formatting helpers for monetary amounts.
//!
//! `Decimal::round_dp` rounds half to even. Rates are instead pinned to
//! half away from zero so `16.625` becomes `16.63` on every platform.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every published figure carries.
pub const CENT_PLACES: u32 = 2;

/// Rounds to `dp` decimal places, half away from zero.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole cents, half away from zero.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    round_half_up(value, CENT_PLACES)
}

/// Formats an amount with exactly two decimal places (`949` -> `"949.00"`).
///
/// No currency symbol and no grouping separators; presentation belongs to
/// the caller.
#[must_use]
pub fn format_cents(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(CENT_PLACES);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_cents(dec!(16.625)), dec!(16.63));
        assert_eq!(round_cents(dec!(16.635)), dec!(16.64));
        assert_eq!(round_cents(dec!(16.624)), dec!(16.62));
        // banker's rounding would give 0.12 here
        assert_eq!(round_cents(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_format_pads_and_rounds() {
        assert_eq!(format_cents(dec!(949)), "949.00");
        assert_eq!(format_cents(dec!(16.625)), "16.63");
        assert_eq!(format_cents(dec!(0)), "0.00");
        assert_eq!(format_cents(dec!(12.5)), "12.50");
    }
}
