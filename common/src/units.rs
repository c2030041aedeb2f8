// common/src/units.rs
//! Conversion between human-readable token amounts and smallest units.

use anyhow::{bail, Context, Result};

/// Parses a plain decimal string (`"1.5"`, `"2.0"`, `"10"`) into the token's
/// smallest integer unit, scaled by `decimals`.
///
/// Signs, exponents and thousands separators are rejected, as is any amount
/// with more fractional digits than the token supports or one that does not
/// fit in a `u64`.
pub fn parse_units(amount: &str, decimals: u8) -> Result<u64> {
    let amount = amount.trim();
    if amount.is_empty() {
        bail!("amount is empty");
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        bail!("amount has no digits: {amount}");
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        bail!("amount is not a decimal number: {amount}");
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        bail!("too many decimals for a token with {decimals} decimals: {amount}");
    }

    if !supports_decimals(decimals) {
        bail!("unsupported decimal count {decimals}");
    }
    let scale = 10u128.pow(decimals as u32);
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(scale))
            .with_context(|| format!("amount overflows: {amount}"))?
    };

    // at most MAX_DECIMALS digits, always fits
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        padded
            .parse::<u128>()
            .with_context(|| format!("amount overflows: {amount}"))?
    };

    whole_units
        .checked_add(fraction_units)
        .and_then(|units| u64::try_from(units).ok())
        .with_context(|| format!("amount overflows: {amount}"))
}

/// Largest decimal count whose scale fits in a `u128`.
pub const MAX_DECIMALS: u8 = 38;

pub fn supports_decimals(decimals: u8) -> bool {
    decimals <= MAX_DECIMALS
}

/// Message shown when the user enters an unusable amount.
pub const INVALID_AMOUNT: &str = "Please enter a valid amount.";

/// Accepts only strictly positive amounts representable with `decimals`.
pub fn validate_amount(input: &str, decimals: u8) -> Result<u64, &'static str> {
    match parse_units(input, decimals) {
        Ok(units) if units > 0 => Ok(units),
        _ => Err(INVALID_AMOUNT),
    }
}
