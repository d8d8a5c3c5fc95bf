//! Swap execution: build the programmable transaction, sign it, submit it.
//!
//! Building is delegated to an HTTP service that wraps the MMT CLMM SDK. It
//! receives the fully resolved request and answers with unsigned BCS
//! transaction bytes in which every input coin is merged into the first one
//! ahead of the swap call, so consolidation and swap land or fail together.

use crate::errors::{AppError, Result};
use crate::models::{SwapRequest, TransactionOutcome};
use crate::sui::SuiClient;
use crate::wallet::AccountContext;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

const BUILD_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a [`SwapRequest`] into a submitted transaction.
#[async_trait]
pub trait SwapExecutor: Send + Sync {
    async fn execute(
        &self,
        account: &AccountContext,
        request: &SwapRequest,
    ) -> Result<TransactionOutcome>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildSwapBody<'a> {
    sender: &'a str,
    recipient: &'a str,
    pool_id: &'a str,
    coin_in_type: &'a str,
    coin_out_type: &'a str,
    amount_in: String,
    a_to_b: bool,
    by_amount_in: bool,
    sqrt_price_limit: String,
    min_amount_out: String,
    input_coins: &'a [String],
    gas_budget: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildSwapResponse {
    tx_bytes: Option<String>,
    error: Option<String>,
}

/// Client of the swap transaction builder service.
#[derive(Debug, Clone)]
pub struct SwapTransactionBuilder {
    http: reqwest::Client,
    url: Url,
    gas_budget: u64,
}

impl SwapTransactionBuilder {
    pub fn new(url: Url, gas_budget: u64) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(BUILD_TIMEOUT).build()?;
        Ok(Self {
            http,
            url,
            gas_budget,
        })
    }

    /// Returns base64 transaction bytes ready to be signed by `sender`.
    pub async fn build(&self, sender: &str, request: &SwapRequest) -> Result<String> {
        // u64/u128 go out as strings so JavaScript callers keep full precision
        let body = BuildSwapBody {
            sender,
            recipient: &request.recipient,
            pool_id: &request.pool_id,
            coin_in_type: &request.coin_in_type,
            coin_out_type: &request.coin_out_type,
            amount_in: request.amount_in.to_string(),
            a_to_b: request.is_x_to_y,
            by_amount_in: request.by_amount_in,
            sqrt_price_limit: request.sqrt_price_limit_x64.to_string(),
            min_amount_out: request.min_amount_out.to_string(),
            input_coins: &request.input_coins,
            gas_budget: self.gas_budget.to_string(),
        };

        let response = self.http.post(self.url.clone()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Builder(format!("{status}: {text}")));
        }

        let parsed: BuildSwapResponse = response.json().await?;
        if let Some(err) = parsed.error {
            return Err(AppError::Builder(err));
        }
        let tx_bytes = parsed.tx_bytes.ok_or(AppError::MissingField("txBytes"))?;
        debug!(pool = %request.pool_id, len = tx_bytes.len(), "[SWAP] transaction built");
        Ok(tx_bytes)
    }
}

/// Builds through [`SwapTransactionBuilder`], then signs and submits through
/// the fullnode.
#[derive(Debug, Clone)]
pub struct MmtSwapExecutor {
    builder: SwapTransactionBuilder,
    client: Arc<SuiClient>,
}

impl MmtSwapExecutor {
    pub fn new(builder: SwapTransactionBuilder, client: Arc<SuiClient>) -> Self {
        Self { builder, client }
    }
}

#[async_trait]
impl SwapExecutor for MmtSwapExecutor {
    async fn execute(
        &self,
        account: &AccountContext,
        request: &SwapRequest,
    ) -> Result<TransactionOutcome> {
        let tx_bytes = self.builder.build(account.address(), request).await?;
        self.client.sign_and_submit(&tx_bytes, account).await
    }
}
