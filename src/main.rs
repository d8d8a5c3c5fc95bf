use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use swap_cycler::{
    cli::Cli,
    config::AppConfig,
    cycle::Orchestrator,
    dex::{MmtSwapExecutor, PoolPriceReader, SwapTransactionBuilder},
    sui::SuiClient,
    utils,
    wallet::AccountContext,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    let account = AccountContext::from_secret(&config.signer)?;

    tracing::info!(
        network = ?config.network,
        rpc_url = %config.rpc_url,
        builder_url = %config.builder_url,
        address = %account.address(),
        pool = config.run.pool.pool_id,
        iterations = config.run.iterations,
        "[INIT] swap-cycler starting"
    );

    let client = Arc::new(SuiClient::new(config.rpc_url.clone())?);
    let prices = PoolPriceReader::new(client.clone());
    let builder = SwapTransactionBuilder::new(config.builder_url.clone(), config.gas_budget)?;
    let executor = MmtSwapExecutor::new(builder, client.clone());
    let bot = Orchestrator::new(client, prices, executor, account, config.run);

    tokio::select! {
        report = bot.run() => {
            tracing::info!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                skipped = report.skipped(),
                "[EXIT] run complete"
            );
        }
        _ = utils::wait_for_interrupt(tokio::signal::ctrl_c()) => {
            tracing::warn!("[EXIT] interrupted, stopping without finishing the current cycle");
        }
    }
    Ok(())
}
