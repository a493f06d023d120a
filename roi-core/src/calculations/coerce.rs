//! Numeric coercion for raw field input.
//!
//! Input surfaces hand over whatever the user typed. Before any arithmetic,
//! every raw value passes through [`coerce_number`], which never fails:
//!
//! | Raw input                         | Result                              |
//! |-----------------------------------|-------------------------------------|
//! | a finite number                   | that number                         |
//! | `""`                              | [`FieldValue::Empty`]               |
//! | missing                           | the fallback                        |
//! | text with stray characters        | the digits, dots and minus signs, parsed |
//! | text with nothing numeric in it   | zero                                |
//! | text that still does not parse    | the fallback                        |
//! | non-finite or out-of-range number | the fallback                        |
//!
//! Coercion is idempotent: feeding a result back in returns it unchanged.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{FieldValue, RawInput};

/// Every character that cannot be part of a plain decimal literal.
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("static pattern is valid"));

/// An optional leading minus, then digits with at most one dot.
static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?)(\d*)(?:\.(\d*))?$").expect("static pattern is valid")
});

/// Coerces raw input with a fallback of zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::coerce::coerce;
/// use roi_core::{FieldValue, RawInput};
///
/// assert_eq!(coerce(RawInput::Text("$1,250.50")), FieldValue::Number(dec!(1250.50)));
/// assert_eq!(coerce(RawInput::Text("")), FieldValue::Empty);
/// assert_eq!(coerce(RawInput::Text("1.2.3")), FieldValue::Number(dec!(0)));
/// ```
pub fn coerce(raw: RawInput<'_>) -> FieldValue {
    coerce_number(raw, Decimal::ZERO)
}

/// Coerces raw input into a [`FieldValue`], substituting `fallback` for
/// anything that cannot be read as a number.
pub fn coerce_number(
    raw: RawInput<'_>,
    fallback: Decimal,
) -> FieldValue {
    match raw {
        RawInput::Decimal(n) => FieldValue::Number(n),
        RawInput::Text("") => FieldValue::Empty,
        RawInput::Missing => FieldValue::Number(fallback),
        RawInput::Float(f) => match Decimal::try_from(f) {
            Ok(n) if f.is_finite() => FieldValue::Number(n),
            _ => {
                warn!(input = f, %fallback, "non-finite or out-of-range number; using fallback");
                FieldValue::Number(fallback)
            }
        },
        RawInput::Text(text) => match parse_stripped(text) {
            Some(n) => FieldValue::Number(n),
            None => {
                warn!(input = %text, %fallback, "unreadable numeric input; using fallback");
                FieldValue::Number(fallback)
            }
        },
    }
}

/// Strips non-numeric characters and parses what is left.
///
/// Nothing left means zero. A minus sign anywhere but the front, a second
/// dot, or a lone dot means the text is unreadable.
fn parse_stripped(text: &str) -> Option<Decimal> {
    let stripped = NON_NUMERIC.replace_all(text, "");
    if stripped.is_empty() {
        return Some(Decimal::ZERO);
    }

    let caps = DECIMAL_LITERAL.captures(&stripped)?;
    let sign = caps.get(1).map_or("", |m| m.as_str());
    let whole = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let literal = if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    };

    Decimal::from_str(&literal).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn number(value: Decimal) -> FieldValue {
        FieldValue::Number(value)
    }

    // =========================================================================
    // pass-through tests
    // =========================================================================

    #[test]
    fn decimal_passes_through() {
        assert_eq!(coerce(RawInput::Decimal(dec!(360))), number(dec!(360)));
    }

    #[test]
    fn finite_float_passes_through() {
        assert_eq!(coerce(RawInput::Float(25.0)), number(dec!(25)));
        assert_eq!(coerce(RawInput::Float(-0.5)), number(dec!(-0.5)));
    }

    #[test]
    fn empty_text_is_empty_sentinel() {
        assert_eq!(coerce_number(RawInput::Text(""), dec!(7)), FieldValue::Empty);
    }

    #[test]
    fn missing_uses_fallback() {
        assert_eq!(coerce_number(RawInput::Missing, dec!(7)), number(dec!(7)));
    }

    // =========================================================================
    // text parsing tests
    // =========================================================================

    #[test]
    fn plain_integer_text_parses() {
        assert_eq!(coerce(RawInput::Text("250000")), number(dec!(250000)));
    }

    #[test]
    fn currency_formatting_is_stripped() {
        assert_eq!(coerce(RawInput::Text("$250,000")), number(dec!(250000)));
        assert_eq!(coerce(RawInput::Text(" 1,500.75 USD ")), number(dec!(1500.75)));
    }

    #[test]
    fn percent_sign_is_stripped() {
        assert_eq!(coerce(RawInput::Text("7.5%")), number(dec!(7.5)));
    }

    #[test]
    fn leading_minus_is_kept() {
        assert_eq!(coerce(RawInput::Text("-42")), number(dec!(-42)));
    }

    #[test]
    fn leading_and_trailing_dots_parse() {
        assert_eq!(coerce(RawInput::Text(".5")), number(dec!(0.5)));
        assert_eq!(coerce(RawInput::Text("-.5")), number(dec!(-0.5)));
        assert_eq!(coerce(RawInput::Text("5.")), number(dec!(5)));
    }

    #[test]
    fn text_without_digits_is_zero() {
        assert_eq!(coerce_number(RawInput::Text("abc"), dec!(9)), number(dec!(0)));
        assert_eq!(coerce_number(RawInput::Text("   "), dec!(9)), number(dec!(0)));
    }

    #[test]
    fn inner_minus_uses_fallback() {
        assert_eq!(coerce_number(RawInput::Text("1-2"), dec!(9)), number(dec!(9)));
    }

    #[test]
    fn double_minus_uses_fallback() {
        assert_eq!(coerce_number(RawInput::Text("--5"), dec!(9)), number(dec!(9)));
    }

    #[test]
    fn second_dot_uses_fallback() {
        assert_eq!(coerce_number(RawInput::Text("1.2.3"), dec!(9)), number(dec!(9)));
    }

    #[test]
    fn lone_dot_or_minus_uses_fallback() {
        assert_eq!(coerce_number(RawInput::Text("."), dec!(9)), number(dec!(9)));
        assert_eq!(coerce_number(RawInput::Text("-"), dec!(9)), number(dec!(9)));
    }

    #[test]
    fn exponent_marker_is_stripped_not_interpreted() {
        assert_eq!(coerce(RawInput::Text("1e5")), number(dec!(15)));
    }

    #[test]
    fn out_of_range_text_uses_fallback() {
        let huge = "9".repeat(40);

        assert_eq!(coerce_number(RawInput::Text(&huge), dec!(9)), number(dec!(9)));
    }

    // =========================================================================
    // non-finite float tests
    // =========================================================================

    #[test]
    fn nan_uses_fallback() {
        assert_eq!(coerce_number(RawInput::Float(f64::NAN), dec!(3)), number(dec!(3)));
    }

    #[test]
    fn infinity_uses_fallback() {
        assert_eq!(
            coerce_number(RawInput::Float(f64::INFINITY), dec!(3)),
            number(dec!(3))
        );
        assert_eq!(
            coerce_number(RawInput::Float(f64::NEG_INFINITY), dec!(3)),
            number(dec!(3))
        );
    }

    // =========================================================================
    // idempotence tests
    // =========================================================================

    #[test]
    fn coercion_is_idempotent() {
        let inputs = ["", "abc", "$1,234.5", "-7", "1-2", ".25"];

        for input in inputs {
            let once = coerce_number(RawInput::Text(input), dec!(4));
            let twice = coerce_number(RawInput::from(once), dec!(4));
            assert_eq!(once, twice, "input {input:?}");
        }
    }
}
