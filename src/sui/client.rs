use crate::errors::{AppError, Result};
use crate::models::{CoinFragment, ExecutionStatus, TransactionOutcome};
use crate::sui::BalanceOracle;
use crate::sui::types::{
    Balance, CoinPage, ObjectResponse, RpcRequest, RpcResponse, TransactionBlockResponse,
};
use crate::wallet::AccountContext;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin JSON-RPC 2.0 client for a Sui fullnode.
#[derive(Debug)]
pub struct SuiClient {
    http: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

impl SuiClient {
    pub fn new(url: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(method, id, "[RPC] request");

        let response: RpcResponse<T> = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(AppError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        response.result.ok_or(AppError::MissingField("result"))
    }

    /// `suix_getBalance`: total balance across every coin object of the type.
    pub async fn get_balance(&self, owner: &str, coin_type: &str) -> Result<u64> {
        let balance: Balance = self
            .call("suix_getBalance", json!([owner, coin_type]))
            .await?;
        Ok(balance.total_balance)
    }

    /// `suix_getCoins`, following the cursor until the last page.
    pub async fn get_coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinFragment>> {
        let mut fragments = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page: CoinPage = self
                .call("suix_getCoins", json!([owner, coin_type, cursor, null]))
                .await?;
            fragments.extend(page.data.into_iter().map(|coin| CoinFragment {
                coin_object_id: coin.coin_object_id,
                balance: coin.balance,
            }));
            match page.next_cursor {
                Some(next) if page.has_next_page => cursor = Some(next),
                _ => break,
            }
        }
        Ok(fragments)
    }

    /// Move struct fields of an object, as returned with `showContent`.
    pub async fn get_object_fields(&self, object_id: &str) -> Result<Value> {
        let response: ObjectResponse = self
            .call(
                "sui_getObject",
                json!([object_id, { "showContent": true }]),
            )
            .await?;
        if let Some(err) = response.error {
            return Err(AppError::Other(format!("object {object_id} unavailable: {err}")));
        }
        response
            .data
            .and_then(|data| data.content)
            .map(|content| content.fields)
            .ok_or(AppError::MissingField("data.content"))
    }

    /// Executes an already signed transaction block and waits for its effects.
    pub async fn execute_transaction_block(
        &self,
        tx_bytes_b64: &str,
        signatures: &[String],
    ) -> Result<TransactionOutcome> {
        let response: TransactionBlockResponse = self
            .call(
                "sui_executeTransactionBlock",
                json!([tx_bytes_b64, signatures, { "showEffects": true }]),
            )
            .await?;

        let effects = response
            .effects
            .ok_or(AppError::MissingField("effects"))?;
        let status = match effects.status.status.as_str() {
            "success" => ExecutionStatus::Success,
            other => {
                warn!(digest = %response.digest, status = other, "[RPC] transaction did not succeed");
                ExecutionStatus::Failure
            }
        };
        Ok(TransactionOutcome {
            digest: response.digest,
            status,
            error: effects.status.error,
        })
    }

    /// Signs base64 transaction bytes with `account` and submits them.
    pub async fn sign_and_submit(
        &self,
        tx_bytes_b64: &str,
        account: &AccountContext,
    ) -> Result<TransactionOutcome> {
        let tx_bytes = STANDARD.decode(tx_bytes_b64)?;
        let signature = account.sign_transaction(&tx_bytes);
        self.execute_transaction_block(tx_bytes_b64, &[signature])
            .await
    }
}

#[async_trait]
impl BalanceOracle for SuiClient {
    async fn balance(&self, owner: &str, coin_type: &str) -> Result<u64> {
        self.get_balance(owner, coin_type).await
    }

    async fn coins(&self, owner: &str, coin_type: &str) -> Result<Vec<CoinFragment>> {
        self.get_coins(owner, coin_type).await
    }
}
