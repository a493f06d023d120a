//! Common arithmetic helpers for commission calculations.
//!
//! Every formula in the calculator reduces to "take a percentage of a base",
//! "express one amount as a share of another", or "round to a whole
//! employee". These helpers never panic: multiplication and addition
//! saturate at the `Decimal` range and ratios against a non-positive
//! denominator yield zero (or `None` where the caller needs a placeholder).

use rust_decimal::Decimal;

/// One half, used for half-up rounding to whole units.
const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Applies a percentage rate (0–100 scale) to a base amount.
///
/// Computed as `base * (pct / 100)`. Rates outside 0–100, including
/// negative rates, are applied as given.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(250000), dec!(5)), dec!(12500));
/// assert_eq!(percent_of(dec!(1000), dec!(-10)), dec!(-100));
/// ```
pub fn percent_of(
    base: Decimal,
    pct: Decimal,
) -> Decimal {
    base.saturating_mul(pct / Decimal::ONE_HUNDRED)
}

/// Expresses `part` as a percentage of `whole`.
///
/// Returns zero when `whole` is zero or negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::share_of;
///
/// assert_eq!(share_of(dec!(25), dec!(200)), dec!(12.5));
/// assert_eq!(share_of(dec!(25), dec!(0)), dec!(0));
/// ```
pub fn share_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    ratio_pct(part, whole).unwrap_or(Decimal::ZERO)
}

/// Expresses `delta` as a percentage change over `base`.
///
/// Returns `None` when `base` is zero or negative; callers render that as a
/// placeholder rather than a number.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::change_pct;
///
/// assert_eq!(change_pct(dec!(20375), dec!(12500)), Some(dec!(163)));
/// assert_eq!(change_pct(dec!(100), dec!(0)), None);
/// ```
pub fn change_pct(
    delta: Decimal,
    base: Decimal,
) -> Option<Decimal> {
    ratio_pct(delta, base)
}

fn ratio_pct(
    numerator: Decimal,
    denominator: Decimal,
) -> Option<Decimal> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    numerator
        .checked_div(denominator)
        .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Rounds to the nearest whole unit, with halves rounding up toward
/// positive infinity (`2.5 → 3`, `-2.5 → -2`).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::round_half_up_whole;
///
/// assert_eq!(round_half_up_whole(dec!(89.5)), dec!(90));
/// assert_eq!(round_half_up_whole(dec!(89.49)), dec!(89));
/// assert_eq!(round_half_up_whole(dec!(-2.5)), dec!(-2));
/// ```
pub fn round_half_up_whole(value: Decimal) -> Decimal {
    value.saturating_add(HALF).floor()
}

/// Sums a sequence of amounts, saturating at the `Decimal` range.
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_applies_rate() {
        let result = percent_of(dec!(135000), dec!(15));

        assert_eq!(result, dec!(20250));
    }

    #[test]
    fn percent_of_handles_fractional_rate() {
        let result = percent_of(dec!(100000), dec!(7.5));

        assert_eq!(result, dec!(7500));
    }

    #[test]
    fn percent_of_handles_negative_base() {
        let result = percent_of(dec!(-250000), dec!(5));

        assert_eq!(result, dec!(-12500));
    }

    #[test]
    fn percent_of_handles_rate_above_one_hundred() {
        let result = percent_of(dec!(1000), dec!(150));

        assert_eq!(result, dec!(1500));
    }

    #[test]
    fn percent_of_saturates_instead_of_overflowing() {
        let result = percent_of(Decimal::MAX, dec!(200));

        assert_eq!(result, Decimal::MAX);
    }

    // =========================================================================
    // share_of tests
    // =========================================================================

    #[test]
    fn share_of_returns_percentage() {
        let result = share_of(dec!(12500), dec!(50000));

        assert_eq!(result, dec!(25));
    }

    #[test]
    fn share_of_zero_whole_is_zero() {
        let result = share_of(dec!(12500), dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn share_of_negative_whole_is_zero() {
        let result = share_of(dec!(12500), dec!(-10));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // change_pct tests
    // =========================================================================

    #[test]
    fn change_pct_returns_relative_change() {
        let result = change_pct(dec!(5000), dec!(10000));

        assert_eq!(result, Some(dec!(50)));
    }

    #[test]
    fn change_pct_is_none_for_zero_base() {
        assert_eq!(change_pct(dec!(20250), dec!(0)), None);
    }

    #[test]
    fn change_pct_is_none_for_negative_base() {
        assert_eq!(change_pct(dec!(20250), dec!(-500)), None);
    }

    // =========================================================================
    // round_half_up_whole tests
    // =========================================================================

    #[test]
    fn round_half_up_whole_rounds_midpoint_up() {
        assert_eq!(round_half_up_whole(dec!(2.5)), dec!(3));
    }

    #[test]
    fn round_half_up_whole_rounds_below_midpoint_down() {
        assert_eq!(round_half_up_whole(dec!(2.4999)), dec!(2));
    }

    #[test]
    fn round_half_up_whole_negative_midpoint_rounds_toward_positive() {
        assert_eq!(round_half_up_whole(dec!(-2.5)), dec!(-2));
        assert_eq!(round_half_up_whole(dec!(-2.6)), dec!(-3));
    }

    #[test]
    fn round_half_up_whole_preserves_integers() {
        assert_eq!(round_half_up_whole(dec!(90)), dec!(90));
    }

    // =========================================================================
    // sum tests
    // =========================================================================

    #[test]
    fn sum_adds_all_values() {
        let result = sum([dec!(12500), dec!(10000), dec!(-2500)]);

        assert_eq!(result, dec!(20000));
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(sum(Vec::<Decimal>::new()), dec!(0));
    }
}
