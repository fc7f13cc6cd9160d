//! Money helpers over decimal arithmetic.
//!
//! All monetary values in Tindahan are `rust_decimal::Decimal` stored as
//! `NUMERIC(10,2)`. These helpers keep rounding in one place: intermediate
//! math is exact, final amounts are rounded to 2 decimal places half-up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for stored money values.
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary amount to the stored scale (half-up).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute `pct` percent of `amount`, unrounded.
///
/// Used for sale prices (`price * (1 - pct/100)`) and percent vouchers.
#[must_use]
pub fn percent_of(amount: Decimal, pct: Decimal) -> Decimal {
    amount * pct / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_half_up() {
        // 1.005 -> 1.01, 1.004 -> 1.00
        assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_money(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn test_percent_of() {
        // 10% of 200 is 20
        assert_eq!(
            percent_of(Decimal::from(200), Decimal::from(10)),
            Decimal::from(20)
        );
        assert_eq!(
            percent_of(Decimal::new(9999, 2), Decimal::ZERO),
            Decimal::ZERO
        );
    }
}
