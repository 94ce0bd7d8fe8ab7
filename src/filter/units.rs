use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{AppError, Result};

/// Parse a non-negative integer amount in the smallest native unit.
pub fn parse_raw_amount(raw: &str) -> Result<i128> {
    let value = raw
        .trim()
        .parse::<i128>()
        .map_err(|_| AppError::Malformed(format!("price `{raw}` is not an integer")))?;
    if value < 0 {
        return Err(AppError::Malformed(format!("price `{raw}` is negative")));
    }
    Ok(value)
}

/// Scale a raw fixed-point amount down by `decimals` places, exactly.
pub fn to_decimal(raw: &str, decimals: u32) -> Result<Decimal> {
    let value = parse_raw_amount(raw)?;
    Decimal::try_from_i128_with_scale(value, decimals)
        .map(|d| d.normalize())
        .map_err(|e| AppError::Malformed(format!("price `{raw}` out of range: {e}")))
}

/// Render a raw amount the way wallets show ether values: trailing zeros
/// trimmed, but always at least one fractional digit (`1.0`, `0.25`).
pub fn format_units(raw: &str, decimals: u32) -> Result<String> {
    let s = to_decimal(raw, decimals)?.to_string();
    if s.contains('.') {
        Ok(s)
    } else {
        Ok(format!("{s}.0"))
    }
}

/// Lossy float view of a decimal for fiat arithmetic.
pub fn decimal_to_f64(d: Decimal) -> Result<f64> {
    d.to_f64()
        .ok_or_else(|| AppError::Malformed(format!("{d} cannot be represented as f64")))
}

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
