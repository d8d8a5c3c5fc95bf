//! In-memory stand-ins for the fullnode, the pool and the swap executor.

use crate::config::RunConfig;
use crate::cycle::Orchestrator;
use crate::dex::{PriceSource, SwapExecutor};
use crate::errors::{AppError, Result};
use crate::models::{
    CoinFragment, ExecutionStatus, PoolDescriptor, SwapRequest, TransactionOutcome,
};
use crate::sui::BalanceOracle;
use crate::wallet::AccountContext;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub(crate) type TestOrchestrator =
    Orchestrator<Arc<FakeOracle>, Arc<FakePrices>, Arc<FakeExecutor>>;

/// Static balances, one list of coin object amounts per coin type.
#[derive(Default)]
pub(crate) struct FakeOracle {
    fragments: HashMap<String, Vec<u64>>,
    unreachable: bool,
    pub balance_calls: Mutex<Vec<(String, Instant)>>,
    pub coin_calls: Mutex<Vec<String>>,
}

impl FakeOracle {
    pub fn with_coins(mut self, coin_type: &str, amounts: &[u64]) -> Self {
        self.fragments.insert(coin_type.to_string(), amounts.to_vec());
        self
    }

    /// Every balance read fails as if the fullnode were down.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BalanceOracle for FakeOracle {
    async fn balance(&self, _owner: &str, coin_type: &str) -> Result<u64> {
        self.balance_calls
            .lock()
            .unwrap()
            .push((coin_type.to_string(), Instant::now()));
        if self.unreachable {
            return Err(AppError::Rpc {
                code: -32000,
                message: "fullnode unavailable".into(),
            });
        }
        Ok(self
            .fragments
            .get(coin_type)
            .map(|amounts| amounts.iter().sum())
            .unwrap_or(0))
    }

    async fn coins(&self, _owner: &str, coin_type: &str) -> Result<Vec<CoinFragment>> {
        self.coin_calls.lock().unwrap().push(coin_type.to_string());
        let amounts = self.fragments.get(coin_type).cloned().unwrap_or_default();
        Ok(amounts
            .into_iter()
            .enumerate()
            .map(|(i, balance)| CoinFragment {
                coin_object_id: format!("0xcoin{i}"),
                balance,
            })
            .collect())
    }
}

/// Answers queued prices in order, then `fallback`. `None` means the read fails.
pub(crate) struct FakePrices {
    queued: Mutex<VecDeque<Option<f64>>>,
    fallback: Option<f64>,
}

impl FakePrices {
    pub fn always(price: f64) -> Self {
        Self::sequence(&[], Some(price))
    }

    pub fn unavailable() -> Self {
        Self::sequence(&[], None)
    }

    pub fn sequence(queued: &[Option<f64>], fallback: Option<f64>) -> Self {
        Self {
            queued: Mutex::new(queued.iter().copied().collect()),
            fallback,
        }
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn current_price(&self, _pool: &PoolDescriptor) -> Result<f64> {
        let next = self.queued.lock().unwrap().pop_front().unwrap_or(self.fallback);
        next.ok_or_else(|| AppError::Other("price feed unavailable".into()))
    }
}

/// Records every request; selected calls fail before or after reaching the chain.
#[derive(Default)]
pub(crate) struct FakeExecutor {
    pub requests: Mutex<Vec<SwapRequest>>,
    build_failures: Vec<usize>,
    chain_failures: Vec<usize>,
}

impl FakeExecutor {
    pub fn failing_build_on(calls: &[usize]) -> Self {
        Self {
            build_failures: calls.to_vec(),
            ..Self::default()
        }
    }

    pub fn failing_on_chain(calls: &[usize]) -> Self {
        Self {
            chain_failures: calls.to_vec(),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<SwapRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwapExecutor for FakeExecutor {
    async fn execute(
        &self,
        _account: &AccountContext,
        request: &SwapRequest,
    ) -> Result<TransactionOutcome> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        if self.build_failures.contains(&call) {
            return Err(AppError::Builder("simulated build failure".into()));
        }
        if self.chain_failures.contains(&call) {
            return Ok(TransactionOutcome {
                digest: format!("digest-{call}"),
                status: ExecutionStatus::Failure,
                error: Some("MoveAbort(trade, 6)".into()),
            });
        }
        Ok(TransactionOutcome {
            digest: format!("digest-{call}"),
            status: ExecutionStatus::Success,
            error: None,
        })
    }
}

pub(crate) fn account() -> AccountContext {
    AccountContext::from_base64_secret(&STANDARD.encode([42u8; 32])).unwrap()
}

pub(crate) fn run_config(iterations: u32, delay: Duration) -> RunConfig {
    RunConfig {
        iterations,
        delay,
        ..RunConfig::default()
    }
}

pub(crate) fn orchestrator(
    oracle: &Arc<FakeOracle>,
    prices: &Arc<FakePrices>,
    executor: &Arc<FakeExecutor>,
    config: RunConfig,
) -> TestOrchestrator {
    Orchestrator::new(
        oracle.clone(),
        prices.clone(),
        executor.clone(),
        account(),
        config,
    )
}
