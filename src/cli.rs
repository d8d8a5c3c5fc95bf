//! Command-line arguments. Every flag falls back to an environment variable so
//! the bot can be driven entirely from a `.env` file.

use crate::config::{
    DEFAULT_BUILDER_URL, DEFAULT_DELAY_MS, DEFAULT_GAS_BUDGET, DEFAULT_ITERATIONS,
    DEFAULT_POOL_PRICE, DEFAULT_SLIPPAGE_PERCENTAGE, Network,
};
use clap::Parser;

/// Swap the full USDT balance to USDC and back through an MMT CLMM pool on Sui,
/// repeating for a fixed number of cycles.
///
/// The signing account is read from PRIVATE_KEY (base64) or MNEMONIC.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Sui network whose public fullnode is used when --rpc-url is not set
    #[arg(long, value_enum, default_value = "mainnet", env = "SUI_NETWORK")]
    pub network: Network,

    /// Fullnode JSON-RPC endpoint, overrides --network
    #[arg(long, env = "SUI_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Number of A->B->A cycles
    #[arg(long, default_value_t = DEFAULT_ITERATIONS, env = "ITERATIONS")]
    pub iterations: u32,

    /// Pause after each swap, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS, env = "DELAY_MS")]
    pub delay_ms: u64,

    /// Slippage tolerance in percent (0.1 = 0.1%)
    #[arg(long, default_value_t = DEFAULT_SLIPPAGE_PERCENTAGE, env = "SLIPPAGE_PERCENTAGE")]
    pub slippage_percentage: f64,

    /// Pool price (token Y per token X) assumed when the pool cannot be read
    #[arg(long, default_value_t = DEFAULT_POOL_PRICE, env = "DEFAULT_POOL_PRICE")]
    pub default_price: f64,

    /// Swap transaction builder endpoint
    #[arg(long, default_value = DEFAULT_BUILDER_URL, env = "SWAP_BUILDER_URL")]
    pub builder_url: String,

    /// Gas budget per swap transaction, in MIST
    #[arg(long, default_value_t = DEFAULT_GAS_BUDGET, env = "GAS_BUDGET")]
    pub gas_budget: u64,
}
