//! Null-safe decimal arithmetic shared by the calculators.
//!
//! Every helper returns `None` when an operand is absent, a denominator is
//! zero, or the 128-bit decimal would overflow. A result of zero is always a
//! real zero, never a stand-in for "unknown".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const HUNDRED: Decimal = dec!(100);

/// `numerator / denominator`.
pub fn ratio(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let (n, d) = (numerator?, denominator?);
    if d.is_zero() {
        return None;
    }
    n.checked_div(d)
}

/// `numerator / denominator × 100`.
pub fn percent(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    ratio(numerator, denominator)?.checked_mul(HUNDRED)
}

/// `a − b`.
pub fn difference(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    a?.checked_sub(b?)
}

/// Period-over-period change, `(current − prior) / prior × 100`.
pub fn growth(current: Option<Decimal>, prior: Option<Decimal>) -> Option<Decimal> {
    percent(difference(current, prior), prior)
}

/// Signed change relative to the magnitude of `base`, `(value − base) / |base| × 100`.
pub fn percent_difference(value: Option<Decimal>, base: Option<Decimal>) -> Option<Decimal> {
    percent(difference(value, base), base.map(|b| b.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_absent_operands() {
        assert_eq!(ratio(None, Some(dec!(2))), None);
        assert_eq!(ratio(Some(dec!(2)), None), None);
        assert_eq!(ratio(None, None), None);
    }

    #[test]
    fn test_ratio_zero_denominator_is_absent() {
        assert_eq!(ratio(Some(dec!(5)), Some(Decimal::ZERO)), None);
        assert_eq!(percent(Some(dec!(5)), Some(Decimal::ZERO)), None);
    }

    #[test]
    fn test_zero_numerator_is_real_zero() {
        assert_eq!(ratio(Some(Decimal::ZERO), Some(dec!(4))), Some(Decimal::ZERO));
    }

    #[test]
    fn test_growth() {
        assert_eq!(growth(Some(dec!(110)), Some(dec!(100))), Some(dec!(10)));
        assert_eq!(growth(Some(dec!(90)), Some(dec!(100))), Some(dec!(-10)));
        assert_eq!(growth(Some(dec!(90)), Some(Decimal::ZERO)), None);
        assert_eq!(growth(Some(dec!(90)), None), None);
    }

    #[test]
    fn test_growth_from_negative_base_uses_signed_base() {
        // -50 -> -25 over a base of -50 is -50% by the plain formula
        assert_eq!(growth(Some(dec!(-25)), Some(dec!(-50))), Some(dec!(-50)));
    }

    #[test]
    fn test_percent_difference_uses_magnitude_of_base() {
        assert_eq!(
            percent_difference(Some(dec!(-25)), Some(dec!(-50))),
            Some(dec!(50))
        );
        assert_eq!(
            percent_difference(Some(dec!(12)), Some(dec!(10))),
            Some(dec!(20))
        );
    }

    #[test]
    fn test_overflow_is_absent() {
        assert_eq!(percent(Some(Decimal::MAX), Some(Decimal::ONE)), None);
        assert_eq!(difference(Some(Decimal::MIN), Some(Decimal::MAX)), None);
    }
}
