use crate::cycle::Orchestrator;
use crate::dex::{PriceSource, SwapExecutor, limit_price, min_amount_out, sqrt_price_limit_x64};
use crate::errors::{AppError, Result};
use crate::models::{CoinFragment, Leg, SwapOutcome, SwapRequest, SwapStatus};
use crate::sui::BalanceOracle;
use crate::utils::format_amount;
use tracing::{error, info, warn};

impl<B, P, E> Orchestrator<B, P, E>
where
    B: BalanceOracle,
    P: PriceSource,
    E: SwapExecutor,
{
    /// Sells the account's entire balance of `leg.input` for `leg.output`.
    ///
    /// Returns a skipped outcome without touching the executor when there is
    /// nothing to sell. A build or submission error becomes a failed outcome
    /// carrying the attempted amount; oracle errors are returned as-is.
    pub async fn perform_swap(&self, cycle: u32, leg: Leg) -> Result<SwapOutcome> {
        let owner = self.account.address();
        let coin_type = leg.input.coin_type;

        let balance = self.oracle.balance(owner, coin_type).await?;
        if balance == 0 {
            info!(cycle, leg = %leg, "[SKIP] {} balance is empty", leg.input.symbol);
            return Ok(SwapOutcome::skipped(
                cycle,
                leg,
                format!("{} balance is zero", leg.input.symbol),
            ));
        }

        let fragments = self.oracle.coins(owner, coin_type).await?;
        let amount_in = total_balance(&fragments)?;
        if amount_in == 0 {
            info!(cycle, leg = %leg, "[SKIP] no spendable {} coin objects", leg.input.symbol);
            return Ok(SwapOutcome::skipped(
                cycle,
                leg,
                format!("no spendable {} coin objects", leg.input.symbol),
            ));
        }
        if amount_in != balance {
            warn!(
                cycle,
                balance,
                amount_in,
                "[SWAP] balance changed between reads, using coin object total"
            );
        }

        let price = self.current_price().await;
        let request = self.build_request(leg, amount_in, fragments, price);
        info!(
            cycle,
            leg = %leg,
            amount = %format_amount(amount_in, leg.input.decimals),
            coins = request.input_coins.len(),
            pool_price = price,
            limit_price = request.limit_price,
            "[SWAP] submitting"
        );

        let tx = match self.executor.execute(&self.account, &request).await {
            Ok(tx) => tx,
            Err(e) => {
                error!(cycle, leg = %leg, amount_in, error = %e, "[SWAP] execution failed");
                return Ok(SwapOutcome::failed(cycle, leg, amount_in, e.to_string()));
            }
        };
        let outcome = SwapOutcome::from_transaction(cycle, leg, amount_in, tx);
        if outcome.status == SwapStatus::Succeeded {
            info!(cycle, digest = ?outcome.digest, "[SWAP] {leg} | Status: {}", outcome.status);
        } else {
            warn!(
                cycle,
                digest = ?outcome.digest,
                error = ?outcome.detail,
                "[SWAP] {leg} | Status: {}",
                outcome.status
            );
        }
        Ok(outcome)
    }

    /// Live pool price, or the configured default when it cannot be read.
    /// Never falls back to an earlier reading.
    pub async fn current_price(&self) -> f64 {
        let default = self.config.default_price;
        match self.prices.current_price(&self.config.pool).await {
            Ok(price) if price.is_finite() && price > 0.0 => price,
            Ok(price) => {
                warn!(price, default, "[PRICE] unusable pool price, using default");
                default
            }
            Err(e) => {
                warn!(error = %e, default, "[PRICE] pool price unavailable, using default");
                default
            }
        }
    }

    fn build_request(
        &self,
        leg: Leg,
        amount_in: u64,
        fragments: Vec<CoinFragment>,
        price: f64,
    ) -> SwapRequest {
        let pool = &self.config.pool;
        let is_x_to_y = pool.is_x_to_y(&leg.input);
        let limit = limit_price(price, self.config.slippage_percentage, is_x_to_y);

        SwapRequest {
            pool_id: pool.pool_id.to_string(),
            coin_in_type: leg.input.coin_type.to_string(),
            coin_out_type: leg.output.coin_type.to_string(),
            amount_in,
            is_x_to_y,
            by_amount_in: true,
            limit_price: limit,
            sqrt_price_limit_x64: sqrt_price_limit_x64(
                limit,
                is_x_to_y,
                pool.token_x.decimals,
                pool.token_y.decimals,
            ),
            min_amount_out: min_amount_out(
                amount_in,
                limit,
                leg.input.decimals,
                leg.output.decimals,
            ),
            input_coins: fragments.into_iter().map(|f| f.coin_object_id).collect(),
            recipient: self.account.address().to_string(),
        }
    }
}

fn total_balance(fragments: &[CoinFragment]) -> Result<u64> {
    fragments
        .iter()
        .try_fold(0u64, |acc, f| acc.checked_add(f.balance))
        .ok_or_else(|| AppError::Other("coin balances overflow u64".into()))
}

#[cfg(test)]
mod tests {
    use crate::config::{USDC, USDT};
    use crate::cycle::testing::*;
    use crate::dex::limit_price;
    use crate::errors::AppError;
    use crate::models::{Leg, SwapStatus};
    use std::sync::Arc;
    use std::time::Duration;

    fn forward() -> Leg {
        Leg::new(USDT, USDC)
    }

    #[tokio::test]
    async fn zero_balance_skips_without_executor() {
        let oracle = Arc::new(FakeOracle::default());
        let prices = Arc::new(FakePrices::always(1.0));
        let executor = Arc::new(FakeExecutor::default());
        let bot = orchestrator(&oracle, &prices, &executor, run_config(1, Duration::ZERO));

        let outcome = bot.perform_swap(1, forward()).await.unwrap();

        assert_eq!(outcome.status, SwapStatus::Skipped);
        assert_eq!(outcome.amount_in, 0);
        assert!(executor.requests().is_empty());
        assert!(oracle.coin_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fragments_are_summed_and_all_merged() {
        let oracle = Arc::new(FakeOracle::default().with_coins(USDT.coin_type, &[400, 100, 500]));
        let prices = Arc::new(FakePrices::always(1.0));
        let executor = Arc::new(FakeExecutor::default());
        let bot = orchestrator(&oracle, &prices, &executor, run_config(1, Duration::ZERO));

        let outcome = bot.perform_swap(1, forward()).await.unwrap();

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount_in, 1_000);
        assert_eq!(requests[0].input_coins, vec!["0xcoin0", "0xcoin1", "0xcoin2"]);
        assert_eq!(requests[0].recipient, bot.account().address());
        assert_eq!(outcome.status, SwapStatus::Succeeded);
        assert_eq!(outcome.amount_in, 1_000);
        assert_eq!(outcome.digest.as_deref(), Some("digest-0"));
    }

    #[tokio::test]
    async fn direction_flag_follows_pool_token_x() {
        let oracle = Arc::new(
            FakeOracle::default()
                .with_coins(USDT.coin_type, &[10])
                .with_coins(USDC.coin_type, &[20]),
        );
        let prices = Arc::new(FakePrices::always(2.0));
        let executor = Arc::new(FakeExecutor::default());
        let bot = orchestrator(&oracle, &prices, &executor, run_config(1, Duration::ZERO));

        bot.perform_swap(1, forward()).await.unwrap();
        bot.perform_swap(1, forward().reversed()).await.unwrap();

        let requests = executor.requests();
        assert!(requests[0].is_x_to_y);
        assert_eq!(requests[0].coin_in_type, USDT.coin_type);
        assert_eq!(requests[0].limit_price, 2.0 * (1.0 - 0.1 / 100.0));
        assert!(!requests[1].is_x_to_y);
        assert_eq!(requests[1].coin_in_type, USDC.coin_type);
        assert_eq!(requests[1].limit_price, (1.0 / 2.0) * (1.0 - 0.1 / 100.0));
        assert!(requests.iter().all(|r| r.by_amount_in));
    }

    #[tokio::test]
    async fn price_failure_uses_default_not_last_reading() {
        let oracle = Arc::new(FakeOracle::default().with_coins(USDT.coin_type, &[1_000_000]));
        let prices = Arc::new(FakePrices::sequence(&[Some(2.0), None], None));
        let executor = Arc::new(FakeExecutor::default());
        let mut config = run_config(1, Duration::ZERO);
        config.default_price = 1.0;
        let bot = orchestrator(&oracle, &prices, &executor, config);

        bot.perform_swap(1, forward()).await.unwrap();
        bot.perform_swap(2, forward()).await.unwrap();

        let requests = executor.requests();
        assert_eq!(requests[0].limit_price, limit_price(2.0, 0.1, true));
        assert_eq!(requests[1].limit_price, limit_price(1.0, 0.1, true));
        assert_eq!(requests[1].min_amount_out, 999_000);
    }

    #[tokio::test]
    async fn unusable_price_uses_default() {
        let oracle = Arc::new(FakeOracle::default());
        let executor = Arc::new(FakeExecutor::default());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let prices = Arc::new(FakePrices::always(bad));
            let mut config = run_config(1, Duration::ZERO);
            config.default_price = 1.5;
            let bot = orchestrator(&oracle, &prices, &executor, config);
            assert_eq!(bot.current_price().await, 1.5);
        }
    }

    #[tokio::test]
    async fn executor_error_keeps_attempted_amount() {
        let oracle = Arc::new(FakeOracle::default().with_coins(USDT.coin_type, &[3, 2]));
        let prices = Arc::new(FakePrices::always(1.0));
        let executor = Arc::new(FakeExecutor::failing_build_on(&[0]));
        let bot = orchestrator(&oracle, &prices, &executor, run_config(1, Duration::ZERO));

        let outcome = bot.perform_swap(1, forward()).await.unwrap();

        assert_eq!(outcome.status, SwapStatus::Failed);
        assert_eq!(outcome.amount_in, 5);
        assert_eq!(outcome.digest, None);
        let detail = outcome.detail.unwrap();
        assert_eq!(detail, AppError::Builder("simulated build failure".into()).to_string());
    }

    #[tokio::test]
    async fn on_chain_failure_is_a_failed_outcome_with_digest() {
        let oracle = Arc::new(FakeOracle::default().with_coins(USDT.coin_type, &[5]));
        let prices = Arc::new(FakePrices::always(1.0));
        let executor = Arc::new(FakeExecutor::failing_on_chain(&[0]));
        let bot = orchestrator(&oracle, &prices, &executor, run_config(1, Duration::ZERO));

        let outcome = bot.perform_swap(1, forward()).await.unwrap();
        assert_eq!(outcome.status, SwapStatus::Failed);
        assert_eq!(outcome.digest.as_deref(), Some("digest-0"));
        assert_eq!(outcome.detail.as_deref(), Some("MoveAbort(trade, 6)"));
    }

    #[test]
    fn overflowing_fragments_are_rejected() {
        let fragments = vec![
            super::CoinFragment {
                coin_object_id: "0x1".into(),
                balance: u64::MAX,
            },
            super::CoinFragment {
                coin_object_id: "0x2".into(),
                balance: 1,
            },
        ];
        assert!(super::total_balance(&fragments).is_err());
    }
}
