use crate::cycle::{Orchestrator, RunReport};
use crate::dex::{PriceSource, SwapExecutor};
use crate::models::SwapOutcome;
use crate::sui::BalanceOracle;
use tracing::{error, info};

impl<B, P, E> Orchestrator<B, P, E>
where
    B: BalanceOracle,
    P: PriceSource,
    E: SwapExecutor,
{
    /// Runs `iterations` cycles of forward then reverse swaps.
    ///
    /// A failing leg is recorded and the run moves on. The configured delay
    /// separates every pair of consecutive legs; there is none after the last.
    pub async fn run(&self) -> RunReport {
        let iterations = self.config.iterations;
        let legs = [self.config.forward, self.config.forward.reversed()];
        let mut report = RunReport::default();

        info!(
            iterations,
            delay_ms = self.config.delay.as_millis() as u64,
            slippage = self.config.slippage_percentage,
            owner = %self.account.address(),
            "[CYCLE] starting"
        );

        for cycle in 1..=iterations {
            for (idx, leg) in legs.iter().copied().enumerate() {
                info!("[CYCLE] [{cycle}/{iterations}] Swapping {leg}");
                let outcome = match self.perform_swap(cycle, leg).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(cycle, leg = %leg, error = %e, "[CYCLE] swap failed");
                        SwapOutcome::failed(cycle, leg, 0, e.to_string())
                    }
                };
                report.record(outcome);

                let last_leg = cycle == iterations && idx == legs.len() - 1;
                if !last_leg && !self.config.delay.is_zero() {
                    tokio::time::sleep(self.config.delay).await;
                }
            }
        }

        info!(
            attempts = report.attempts(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "[DONE] all cycles finished"
        );
        report
    }
}
