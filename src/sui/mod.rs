//! Sui fullnode access.
//!
//! Responsibilities:
//! • Read balances and coin objects for the signing account.
//! • Read pool objects for their current sqrt price.
//! • Submit signed transaction blocks and report their effects status.

use crate::errors::Result;
use crate::models::CoinFragment;
use async_trait::async_trait;
use std::sync::Arc;

pub mod client;
pub mod types;

pub use client::SuiClient;

/// Where the orchestrator reads spendable amounts from.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Total spendable amount of `coin_type` owned by `owner`, in base units.
    async fn balance(&self, owner: &str, coin_type: &str) -> Result<u64>;

    /// Every coin object of `coin_type` owned by `owner`.
    async fn coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinFragment>>;
}

#[async_trait]
impl<T: BalanceOracle + ?Sized> BalanceOracle for Arc<T> {
    async fn balance(&self, owner: &str, coin_type: &str) -> Result<u64> {
        (**self).balance(owner, coin_type).await
    }

    async fn coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinFragment>> {
        (**self).coins(owner, coin_type).await
    }
}
