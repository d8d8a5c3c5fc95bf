//! Configuration loader and application settings.

use crate::cli::Cli;
use crate::errors::{AppError, Result};
use crate::models::{Leg, PoolDescriptor, TokenDescriptor};
use clap::ValueEnum;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const USDT: TokenDescriptor = TokenDescriptor {
    symbol: "USDT",
    coin_type: "0xc060006111016b8a020ad5b33834984a437aaa7d3c74c18e09a95d48aceab08c::coin::COIN",
    decimals: 6,
};

pub const USDC: TokenDescriptor = TokenDescriptor {
    symbol: "USDC",
    coin_type: "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7::usdc::USDC",
    decimals: 6,
};

/// MMT USDT/USDC pool, 1 tick spacing.
pub const POOL: PoolDescriptor = PoolDescriptor {
    pool_id: "0x8a86062a0193c48b9d7c42e5d522ed1b30ba1010c72e0cd0dad1525036775c8b",
    token_x: USDT,
    token_y: USDC,
    tick_spacing: 1,
};

pub const DEFAULT_ITERATIONS: u32 = 100;
pub const DEFAULT_DELAY_MS: u64 = 61_000;
pub const DEFAULT_SLIPPAGE_PERCENTAGE: f64 = 0.1;
/// Used when the pool price cannot be read; the pair is two USD stablecoins.
pub const DEFAULT_POOL_PRICE: f64 = 1.0;
pub const DEFAULT_GAS_BUDGET: u64 = 50_000_000;
pub const DEFAULT_BUILDER_URL: &str = "http://127.0.0.1:8787/v1/swap";

/// Sui network the fullnode URL is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
            Network::Localnet => "http://127.0.0.1:9000",
        }
    }
}

/// Where the signing key comes from. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub enum SignerSecret {
    /// Base64 Ed25519 secret key.
    PrivateKey(String),
    /// BIP-39 phrase.
    Mnemonic(String),
}

impl SignerSecret {
    /// `PRIVATE_KEY` wins over `MNEMONIC`, blank values count as unset.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        non_empty("PRIVATE_KEY")
            .map(SignerSecret::PrivateKey)
            .or_else(|| non_empty("MNEMONIC").map(SignerSecret::Mnemonic))
    }
}

impl fmt::Debug for SignerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerSecret::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
            SignerSecret::Mnemonic(_) => f.write_str("Mnemonic(<redacted>)"),
        }
    }
}

/// Parameters the orchestrator loop needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub iterations: u32,
    pub delay: Duration,
    pub slippage_percentage: f64,
    pub default_price: f64,
    pub pool: PoolDescriptor,
    /// The first leg of each cycle; the second is its reverse.
    pub forward: Leg,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            slippage_percentage: DEFAULT_SLIPPAGE_PERCENTAGE,
            default_price: DEFAULT_POOL_PRICE,
            pool: POOL,
            forward: Leg::new(POOL.token_x, POOL.token_y),
        }
    }
}

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub network: Network,
    /// JSON-RPC endpoint of the Sui fullnode.
    pub rpc_url: Url,
    /// HTTP endpoint that turns a swap request into transaction bytes.
    pub builder_url: Url,
    pub gas_budget: u64,
    pub signer: SignerSecret,
    pub run: RunConfig,
}

impl AppConfig {
    /// Build from parsed arguments, reading the signing secret from the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::from_parts(cli, SignerSecret::from_env())
    }

    pub fn from_parts(cli: &Cli, signer: Option<SignerSecret>) -> Result<Self> {
        let signer = signer.ok_or_else(|| {
            AppError::Config("set PRIVATE_KEY or MNEMONIC to the signing account".into())
        })?;

        let rpc_url = match &cli.rpc_url {
            Some(raw) => Url::parse(raw)?,
            None => Url::parse(cli.network.fullnode_url())?,
        };
        let builder_url = Url::parse(&cli.builder_url)?;

        if !cli.slippage_percentage.is_finite()
            || cli.slippage_percentage < 0.0
            || cli.slippage_percentage >= 100.0
        {
            return Err(AppError::Config(format!(
                "slippage percentage must be in [0, 100), got {}",
                cli.slippage_percentage
            )));
        }
        if !cli.default_price.is_finite() || cli.default_price <= 0.0 {
            return Err(AppError::Config(format!(
                "default pool price must be positive, got {}",
                cli.default_price
            )));
        }

        Ok(Self {
            network: cli.network,
            rpc_url,
            builder_url,
            gas_budget: cli.gas_budget,
            signer,
            run: RunConfig {
                iterations: cli.iterations,
                delay: Duration::from_millis(cli.delay_ms),
                slippage_percentage: cli.slippage_percentage,
                default_price: cli.default_price,
                ..RunConfig::default()
            },
        })
    }
}
