use rust_decimal::{Decimal, RoundingStrategy};

use roi_core::calculations::common::round_half_up_whole;

/// Shown wherever a ratio has no meaningful value.
pub const PLACEHOLDER: &str = "—";

/// Groups an unsigned run of integer digits with commas: `"1234567"` → `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds half away from zero to `dp` places, folding `-0` into `0`.
fn round_for_display(
    value: Decimal,
    dp: u32,
) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

/// Formats `value` with thousands separators and at most `dp` fraction
/// digits (trailing zeros dropped). The sign is returned separately.
fn grouped(
    value: Decimal,
    dp: u32,
) -> (bool, String) {
    let rounded = round_for_display(value, dp);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().normalize().to_string();
    let formatted = match text.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
        None => group_thousands(&text),
    };
    (negative, formatted)
}

/// Formats a dollar amount as whole US dollars: `$12,500`, `-$1,000`.
pub fn format_currency(value: Decimal) -> String {
    match grouped(value, 0) {
        (true, digits) => format!("-${digits}"),
        (false, digits) => format!("${digits}"),
    }
}

/// Formats a headcount with thousands separators and up to three decimals.
pub fn format_count(value: Decimal) -> String {
    match grouped(value, 3) {
        (true, digits) => format!("-{digits}"),
        (false, digits) => digits,
    }
}

/// Formats a 0–100 percentage with one decimal: `61.6%`.
pub fn format_pct(value: Decimal) -> String {
    let mut rounded = round_for_display(value, 1);
    rounded.rescale(1);
    format!("{rounded}%")
}

/// Formats an optional percentage, using [`PLACEHOLDER`] when `None`.
pub fn format_opt_pct(value: Option<Decimal>) -> String {
    value
        .map(format_pct)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Formats a percentage rounded half-up to a whole number: `25%`.
pub fn format_whole_pct(value: Decimal) -> String {
    format!("{}%", round_half_up_whole(value).normalize())
}
