//! Price and slippage-bound arithmetic for a Q64.64 CLMM pool.
//!
//! Prices are quoted as token Y per token X in display units unless a
//! function says otherwise. The swap itself is priced by the pool; these
//! helpers only derive the bounds passed along with the request.

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use std::str::FromStr;

/// 2^64
const Q64: f64 = 18_446_744_073_709_551_616.0;

/// Sqrt price bounds of the pool's tick range (ticks ±443636).
pub const MIN_SQRT_PRICE_X64: u128 = 4_295_048_016;
pub const MAX_SQRT_PRICE_X64: u128 = 79_226_673_515_401_279_992_447_579_055;

/// Display price (Y per X) of a raw Q64.64 sqrt price.
pub fn price_from_sqrt_price_x64(sqrt_price_x64: u128, decimals_x: u8, decimals_y: u8) -> f64 {
    let sqrt_price = sqrt_price_x64 as f64 / Q64;
    sqrt_price * sqrt_price * 10_f64.powi(decimals_x as i32 - decimals_y as i32)
}

/// Inverse of [`price_from_sqrt_price_x64`], clamped to the pool's valid range.
pub fn sqrt_price_x64_from_price(price: f64, decimals_x: u8, decimals_y: u8) -> u128 {
    let raw = price * 10_f64.powi(decimals_y as i32 - decimals_x as i32);
    if !raw.is_finite() || raw <= 0.0 {
        return MIN_SQRT_PRICE_X64;
    }
    // `as` saturates on overflow
    let sqrt_x64 = (raw.sqrt() * Q64) as u128;
    sqrt_x64.clamp(MIN_SQRT_PRICE_X64, MAX_SQRT_PRICE_X64)
}

/// Worst acceptable price for a sell, quoted as output per input.
///
/// X→Y sells at `P * (1 - S/100)`; Y→X at `(1/P) * (1 - S/100)`.
pub fn limit_price(current_price: f64, slippage_percentage: f64, is_x_to_y: bool) -> f64 {
    let quoted = if is_x_to_y {
        current_price
    } else {
        1.0 / current_price
    };
    quoted * (1.0 - slippage_percentage / 100.0)
}

/// [`limit_price`] turned back into pool orientation as a sqrt price.
///
/// X→Y pushes the pool price down, so the bound is the limit itself; Y→X
/// pushes it up, so the bound is the reciprocal of the limit.
pub fn sqrt_price_limit_x64(
    limit_price: f64,
    is_x_to_y: bool,
    decimals_x: u8,
    decimals_y: u8,
) -> u128 {
    let pool_price = if is_x_to_y {
        limit_price
    } else {
        1.0 / limit_price
    };
    sqrt_price_x64_from_price(pool_price, decimals_x, decimals_y)
}

/// Minimum output in base units when `amount_in` fills exactly at `limit_price`.
/// Rounds down; returns 0 when the bound cannot be represented.
pub fn min_amount_out(amount_in: u64, limit_price: f64, decimals_in: u8, decimals_out: u8) -> u64 {
    if !limit_price.is_finite() || limit_price <= 0.0 {
        return 0;
    }
    let Ok(limit) = BigDecimal::from_str(&limit_price.to_string()) else {
        return 0;
    };
    let exponent = decimals_out as i64 - decimals_in as i64;
    let scale = BigDecimal::new(1.into(), -exponent);
    let out = BigDecimal::from(amount_in) * limit * scale;
    out.with_scale(0).to_u64().unwrap_or(u64::MAX)
}
