//! Division helpers that never leak NaN or infinity into displayed statistics.
//!
//! Every entry point goes through [`is_computable`], so `0/0`, `x/0` and
//! non-finite operands all collapse to the caller's fallback.

/// Decimal places used by [`safe_percentage`] when callers have no preference.
pub const DEFAULT_DECIMALS: usize = 1;

/// Returns true when `numerator / denominator` yields a usable number.
pub fn is_computable(numerator: f64, denominator: f64) -> bool {
    numerator.is_finite() && denominator.is_finite() && denominator != 0.0
}

/// Divide, returning 0 when the quotient is not computable.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    safe_divide_or(numerator, denominator, 0.0)
}

/// Divide, returning `fallback` when the quotient is not computable.
///
/// A quotient that overflows to infinity is treated the same as a bad operand.
pub fn safe_divide_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if !is_computable(numerator, denominator) {
        return fallback;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        fallback
    }
}

/// `part / total * 100`, or 0 when not computable.
pub fn safe_percentage_number(part: f64, total: f64) -> f64 {
    safe_percentage_number_or(part, total, 0.0)
}

pub fn safe_percentage_number_or(part: f64, total: f64, fallback: f64) -> f64 {
    if !is_computable(part, total) {
        return fallback;
    }
    let percentage = part / total * 100.0;
    if percentage.is_finite() {
        percentage
    } else {
        fallback
    }
}

/// Percentage formatted with `decimals` fixed digits; `"0.0"`-style zero on failure.
///
/// Values that round to zero never carry a minus sign.
pub fn safe_percentage(part: f64, total: f64, decimals: usize) -> String {
    let value = safe_percentage_number_or(part, total, 0.0);
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(digits) if digits.chars().all(|c| c == '0' || c == '.') => digits.to_string(),
        _ => text,
    }
}
