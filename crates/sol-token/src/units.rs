//! Conversion between human-readable amounts and on-chain base units.
//!
//! The float path multiplies by `10^decimals` and rounds to the nearest
//! integer, half away from zero. It is exact for inputs with up to 15
//! significant digits; beyond that the `f64` representation of the input is
//! already off. [`parse_base_units`] takes decimal strings and is exact.

use crate::error::TokenError;

/// Decimals of the native currency (1 SOL = 10^9 lamports).
pub const LAMPORTS_DECIMALS: u8 = 9;

/// Scale `amount` by `10^decimals` and round to the nearest base unit.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64, TokenError> {
    if !amount.is_finite() {
        return Err(TokenError::InvalidAmount(format!("{amount} is not finite")));
    }
    if amount < 0.0 {
        return Err(TokenError::InvalidAmount(format!("{amount} is negative")));
    }

    let scaled = (amount * 10f64.powi(decimals as i32)).round();
    // u64::MAX as f64 rounds up to 2^64, which itself does not fit.
    if scaled >= u64::MAX as f64 {
        return Err(TokenError::InvalidAmount(format!(
            "{amount} with {decimals} decimals overflows u64"
        )));
    }

    Ok(scaled as u64)
}

/// Convert SOL to lamports.
pub fn to_lamports(sol: f64) -> Result<u64, TokenError> {
    to_base_units(sol, LAMPORTS_DECIMALS)
}

/// Parse a decimal string such as `"1000"` or `"0.25"` into base units.
///
/// Digits beyond `decimals` are rounded half-up on the first dropped digit,
/// matching [`to_base_units`] for values both can represent.
pub fn parse_base_units(amount: &str, decimals: u8) -> Result<u64, TokenError> {
    let invalid = |why: &str| TokenError::InvalidAmount(format!("{amount:?}: {why}"));

    let amount_str = amount.trim();
    let (whole, frac) = amount_str.split_once('.').unwrap_or((amount_str, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected an unsigned decimal number"));
    }

    let overflow = || invalid("overflows u64");
    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or_else(overflow)?;

    let digits = |s: &str| -> Result<u128, TokenError> {
        s.bytes().try_fold(0u128, |acc, b| {
            acc.checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u128))
                .ok_or_else(overflow)
        })
    };

    let kept = frac.len().min(decimals as usize);
    let mut frac_units = digits(&frac[..kept])?;
    frac_units = frac_units
        .checked_mul(10u128.pow((decimals as usize - kept) as u32))
        .ok_or_else(overflow)?;
    if frac.as_bytes().get(kept).is_some_and(|&b| b >= b'5') {
        frac_units += 1;
    }

    let total = digits(whole)?
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(overflow)?;

    u64::try_from(total).map_err(|_| overflow())
}
