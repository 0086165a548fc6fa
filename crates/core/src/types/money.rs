//! Money rounding and cart totals.
//!
//! Prices are `rust_decimal::Decimal` everywhere; floats never touch money.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fixed cart tax rate (10%).
///
/// `from_parts` because `Decimal::new` is not const.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Round a monetary amount to 2 decimal places, half away from zero.
///
/// Rounding happens once, at the end of a computation - intermediate
/// values stay exact so rounding error cannot compound.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computed totals for a cart.
///
/// All three values are rounded to 2 decimal places. `tax` and `total` are
/// derived from the exact (unrounded) subtotal, so
/// `total == round2(subtotal_exact * (1 + TAX_RATE))` holds even when the
/// rounded parts would not sum exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of snapshot price x quantity over all items.
    pub subtotal: Decimal,
    /// Subtotal x [`TAX_RATE`].
    pub tax: Decimal,
    /// Subtotal plus tax.
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals from an exact (unrounded) subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        Self {
            subtotal: round2(subtotal),
            tax: round2(subtotal * TAX_RATE),
            total: round2(subtotal + subtotal * TAX_RATE),
        }
    }

    /// Totals for an empty cart.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_subtotal(Decimal::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, dec("0.10"));
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec("33.997")), dec("34.00"));
        assert_eq!(round2(dec("33.995")), dec("34.00"));
        assert_eq!(round2(dec("33.994")), dec("33.99"));
        assert_eq!(round2(dec("-1.005")), dec("-1.01"));
    }

    #[test]
    fn test_totals_for_sample_cart() {
        // 199.99 x 1 + 69.99 x 2 = 339.97
        let subtotal = dec("199.99") + dec("69.99") * dec("2");
        let totals = CartTotals::from_subtotal(subtotal);
        assert_eq!(totals.subtotal, dec("339.97"));
        assert_eq!(totals.tax, dec("34.00"));
        assert_eq!(totals.total, dec("373.97"));
    }

    #[test]
    fn test_totals_rounded_at_final_step_only() {
        // Tax before rounding is 0.999; rounding per-item first would give 1.00
        // from a different path. The invariant is against the exact subtotal.
        let subtotal = dec("9.99");
        let totals = CartTotals::from_subtotal(subtotal);
        assert_eq!(totals.tax, round2(subtotal * TAX_RATE));
        assert_eq!(totals.total, round2(subtotal + subtotal * TAX_RATE));
    }

    #[test]
    fn test_zero_totals() {
        let totals = CartTotals::zero();
        assert_eq!(totals.subtotal, Decimal::ZERO.round_dp(2));
        assert_eq!(totals.tax, Decimal::ZERO.round_dp(2));
        assert_eq!(totals.total, Decimal::ZERO.round_dp(2));
    }
}
