//! Miscellaneous helper utilities.

use std::future::Future;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Resolves once `signal` fires. If the handler could not be installed the
/// run cannot be interrupted, so this logs and never resolves.
pub async fn wait_for_interrupt<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "[INIT] Ctrl-C handler unavailable, run continues uninterruptible");
        std::future::pending::<()>().await;
    }
}

/// Base units rendered in display units, e.g. `1_500_000` with 6 decimals is `1.500000`.
pub fn format_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let unit = 10u128.pow(decimals as u32);
    let amount = amount as u128;
    format!(
        "{}.{:0width$}",
        amount / unit,
        amount % unit,
        width = decimals as usize
    )
}
