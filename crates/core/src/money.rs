use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for cash amounts.
pub const AMOUNT_DP: u32 = 2;
/// Decimal places for security quantities in a cost-basis posting.
pub const QUANTITY_DP: u32 = 3;
/// Decimal places for the unit price inside a cost-basis annotation.
pub const PRICE_DP: u32 = 4;

/// Renders `value` with exactly `dp` decimal places, rounding half away from zero.
///
/// A value that rounds to zero is always rendered unsigned.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("{:.*}", dp as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn pads_to_requested_places() {
        assert_eq!(fixed(dec("4.5"), AMOUNT_DP), "4.50");
        assert_eq!(fixed(dec("10"), QUANTITY_DP), "10.000");
        assert_eq!(fixed(dec("5"), PRICE_DP), "5.0000");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(fixed(dec("1.005"), AMOUNT_DP), "1.01");
        assert_eq!(fixed(dec("-1.005"), AMOUNT_DP), "-1.01");
        assert_eq!(fixed(dec("2.0044"), AMOUNT_DP), "2.00");
    }

    #[test]
    fn negative_zero_is_unsigned() {
        assert_eq!(fixed(-Decimal::ZERO, AMOUNT_DP), "0.00");
        assert_eq!(fixed(dec("-0.001"), AMOUNT_DP), "0.00");
    }

    #[test]
    fn keeps_sign_on_negative_amounts() {
        assert_eq!(fixed(dec("-50"), AMOUNT_DP), "-50.00");
    }
}
