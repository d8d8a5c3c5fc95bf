//! Shared data structures used throughout the application.

use std::fmt;

/// Static description of a coin type traded by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub symbol: &'static str,
    /// Fully qualified Move type, e.g. `0x..::usdc::USDC`.
    pub coin_type: &'static str,
    pub decimals: u8,
}

/// Static description of the CLMM pool both legs trade through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolDescriptor {
    pub pool_id: &'static str,
    pub token_x: TokenDescriptor,
    pub token_y: TokenDescriptor,
    pub tick_spacing: u32,
}

impl PoolDescriptor {
    /// `true` when selling token X for token Y (the pool's forward direction).
    pub fn is_x_to_y(&self, input: &TokenDescriptor) -> bool {
        input.coin_type == self.token_x.coin_type
    }
}

/// One direction of a cycle: what goes in and what comes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub input: TokenDescriptor,
    pub output: TokenDescriptor,
}

impl Leg {
    pub fn new(input: TokenDescriptor, output: TokenDescriptor) -> Self {
        Self { input, output }
    }

    pub fn reversed(&self) -> Self {
        Self {
            input: self.output,
            output: self.input,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input.symbol, self.output.symbol)
    }
}

/// A spendable coin object owned by the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinFragment {
    pub coin_object_id: String,
    pub balance: u64,
}

/// Fully resolved swap, built right before submission and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub pool_id: String,
    pub coin_in_type: String,
    pub coin_out_type: String,
    /// Whole consolidated balance of the input coin, in base units.
    pub amount_in: u64,
    pub is_x_to_y: bool,
    pub by_amount_in: bool,
    /// Worst acceptable price, quoted as output per input in display units.
    pub limit_price: f64,
    /// The same bound in pool orientation as a Q64.64 sqrt price.
    pub sqrt_price_limit_x64: u128,
    pub min_amount_out: u64,
    /// Every fragment to merge; the first one receives the others.
    pub input_coins: Vec<String>,
    pub recipient: String,
}

/// On-chain execution status reported by the fullnode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Failure,
}

/// Result of `sign_and_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub digest: String,
    pub status: ExecutionStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStatus {
    Succeeded,
    Failed,
    Skipped,
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwapStatus::Succeeded => "success",
            SwapStatus::Failed => "failure",
            SwapStatus::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// What happened to one leg of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub cycle: u32,
    pub leg: Leg,
    pub status: SwapStatus,
    pub amount_in: u64,
    pub digest: Option<String>,
    pub detail: Option<String>,
}

impl SwapOutcome {
    pub fn skipped(cycle: u32, leg: Leg, reason: impl Into<String>) -> Self {
        Self {
            cycle,
            leg,
            status: SwapStatus::Skipped,
            amount_in: 0,
            digest: None,
            detail: Some(reason.into()),
        }
    }

    /// `amount_in` is what the leg tried to sell, 0 when it failed before the
    /// amount was known.
    pub fn failed(cycle: u32, leg: Leg, amount_in: u64, error: impl Into<String>) -> Self {
        Self {
            cycle,
            leg,
            status: SwapStatus::Failed,
            amount_in,
            digest: None,
            detail: Some(error.into()),
        }
    }

    pub fn from_transaction(cycle: u32, leg: Leg, amount_in: u64, tx: TransactionOutcome) -> Self {
        let status = match tx.status {
            ExecutionStatus::Success => SwapStatus::Succeeded,
            ExecutionStatus::Failure => SwapStatus::Failed,
        };
        Self {
            cycle,
            leg,
            status,
            amount_in,
            digest: Some(tx.digest),
            detail: tx.error,
        }
    }
}
