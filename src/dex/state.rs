use crate::dex::calc::price_from_sqrt_price_x64;
use crate::errors::{AppError, Result};
use crate::models::PoolDescriptor;
use serde_json::Value;

/// Minimal snapshot of an MMT CLMM pool needed to quote a slippage bound.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolState {
    /// Current sqrt(price_y / price_x) in Q64.64, raw units (`pool.sqrt_price`).
    pub sqrt_price_x64: u128,
    /// Token X decimals (USDT 6)
    pub decimals_x: u8,
    /// Token Y decimals (USDC 6)
    pub decimals_y: u8,
}

impl PoolState {
    pub fn new(sqrt_price_x64: u128, decimals_x: u8, decimals_y: u8) -> Self {
        Self {
            sqrt_price_x64,
            decimals_x,
            decimals_y,
        }
    }

    /// Reads `sqrt_price` out of the pool object's Move fields. The fullnode
    /// renders u128 values as strings, but plain numbers are accepted too.
    pub fn from_fields(fields: &Value, pool: &PoolDescriptor) -> Result<Self> {
        let sqrt_price_x64 = match fields.get("sqrt_price") {
            Some(Value::String(s)) => s.parse::<u128>().ok(),
            Some(Value::Number(n)) => n.as_u64().map(u128::from),
            _ => None,
        }
        .filter(|v| *v > 0)
        .ok_or(AppError::MissingField("sqrt_price"))?;

        Ok(Self::new(
            sqrt_price_x64,
            pool.token_x.decimals,
            pool.token_y.decimals,
        ))
    }

    /// Token Y per token X in display units.
    pub fn price(&self) -> f64 {
        price_from_sqrt_price_x64(self.sqrt_price_x64, self.decimals_x, self.decimals_y)
    }
}
