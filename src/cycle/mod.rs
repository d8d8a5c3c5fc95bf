//! Swap cycle orchestration: N times, sell the whole balance of token A for
//! token B, wait, sell the whole balance of B back for A, wait.

use crate::config::RunConfig;
use crate::dex::{PriceSource, SwapExecutor};
use crate::sui::BalanceOracle;
use crate::wallet::AccountContext;

pub mod runner;
pub mod swap;
pub mod types;

#[cfg(test)]
mod testing;

pub use types::RunReport;

/// Sequential driver of the swap cycles for one account.
pub struct Orchestrator<B, P, E> {
    oracle: B,
    prices: P,
    executor: E,
    account: AccountContext,
    config: RunConfig,
}

impl<B, P, E> Orchestrator<B, P, E>
where
    B: BalanceOracle,
    P: PriceSource,
    E: SwapExecutor,
{
    pub fn new(
        oracle: B,
        prices: P,
        executor: E,
        account: AccountContext,
        config: RunConfig,
    ) -> Self {
        Self {
            oracle,
            prices,
            executor,
            account,
            config,
        }
    }

    pub fn account(&self) -> &AccountContext {
        &self.account
    }
}
