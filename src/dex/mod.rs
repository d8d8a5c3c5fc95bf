//! DEX integration for MMT CLMM pools on Sui.

use crate::errors::Result;
use crate::models::{PoolDescriptor, SwapRequest, TransactionOutcome};
use crate::wallet::AccountContext;
use async_trait::async_trait;
use std::sync::Arc;

pub mod calc;
pub mod client;
pub mod executor;
pub mod state;

pub use calc::{limit_price, min_amount_out, sqrt_price_limit_x64};
pub use client::PoolPriceReader;
pub use executor::{MmtSwapExecutor, SwapExecutor, SwapTransactionBuilder};
pub use state::PoolState;

/// Current pool price, token Y per token X in display units.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn current_price(&self, pool: &PoolDescriptor) -> Result<f64>;
}

#[async_trait]
impl<T: PriceSource + ?Sized> PriceSource for Arc<T> {
    async fn current_price(&self, pool: &PoolDescriptor) -> Result<f64> {
        (**self).current_price(pool).await
    }
}

#[async_trait]
impl<T: SwapExecutor + ?Sized> SwapExecutor for Arc<T> {
    async fn execute(
        &self,
        account: &AccountContext,
        request: &SwapRequest,
    ) -> Result<TransactionOutcome> {
        (**self).execute(account, request).await
    }
}
