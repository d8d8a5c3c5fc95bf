use crate::dex::PriceSource;
use crate::dex::state::PoolState;
use crate::errors::Result;
use crate::models::PoolDescriptor;
use crate::sui::SuiClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Reads the live price of a pool straight from its on-chain object.
#[derive(Clone, Debug)]
pub struct PoolPriceReader {
    client: Arc<SuiClient>,
}

impl PoolPriceReader {
    pub fn new(client: Arc<SuiClient>) -> Self {
        Self { client }
    }

    pub async fn get_pool_state(&self, pool: &PoolDescriptor) -> Result<PoolState> {
        let fields = self.client.get_object_fields(pool.pool_id).await?;
        PoolState::from_fields(&fields, pool)
    }
}

#[async_trait]
impl PriceSource for PoolPriceReader {
    async fn current_price(&self, pool: &PoolDescriptor) -> Result<f64> {
        let state = self.get_pool_state(pool).await?;
        let price = state.price();
        debug!(pool = pool.pool_id, sqrt_price_x64 = %state.sqrt_price_x64, price, "[PRICE] pool state");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::POOL;
    use crate::errors::AppError;
    use mockito::{Matcher, Mock, Server};
    use serde_json::json;
    use url::Url;

    async fn reader_with_fields(
        server: &mut Server,
        fields: serde_json::Value,
    ) -> (PoolPriceReader, Mock) {
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "method": "sui_getObject",
                "params": [POOL.pool_id, {"showContent": true}]
            })))
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": {"data": {
                        "objectId": POOL.pool_id,
                        "content": {"dataType": "moveObject", "type": "pool::Pool", "fields": fields}
                    }}
                })
                .to_string(),
            )
            .create_async()
            .await;
        let client = SuiClient::new(Url::parse(&server.url()).unwrap()).unwrap();
        (PoolPriceReader::new(Arc::new(client)), mock)
    }

    #[tokio::test]
    async fn current_price_reads_sqrt_price_field() {
        let mut server = Server::new_async().await;
        // sqrt(1.0004) * 2^64
        let (reader, _mock) = reader_with_fields(
            &mut server,
            json!({"sqrt_price": "18450433053663180586"}),
        )
        .await;

        let price = reader.current_price(&POOL).await.unwrap();
        assert!((price - 1.0004).abs() < 1e-6, "price {price}");
    }

    #[tokio::test]
    async fn malformed_pool_object_is_an_error() {
        let mut server = Server::new_async().await;
        let (reader, _mock) = reader_with_fields(&mut server, json!({"liquidity": "5"})).await;

        let err = reader.current_price(&POOL).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField("sqrt_price")));
    }
}
