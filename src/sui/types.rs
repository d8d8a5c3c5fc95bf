//! Wire shapes of the Sui fullnode JSON-RPC API. Only the fields the bot reads
//! are modelled; everything else is ignored by serde.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `suix_getBalance`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin_type: String,
    pub coin_object_count: u64,
    #[serde(deserialize_with = "u64_from_str")]
    pub total_balance: u64,
}

/// One entry of a `suix_getCoins` page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_type: String,
    pub coin_object_id: String,
    pub version: String,
    pub digest: String,
    #[serde(deserialize_with = "u64_from_str")]
    pub balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<Coin>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

/// `sui_getObject` with `showContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    pub data: Option<ObjectData>,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    pub content: Option<ObjectContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub fields: Value,
}

/// `sui_executeTransactionBlock` with `showEffects`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionBlockResponse {
    pub digest: String,
    pub effects: Option<TransactionEffects>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEffects {
    pub status: EffectsStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectsStatus {
    pub status: String,
    pub error: Option<String>,
}

/// The fullnode encodes u64 amounts as decimal strings.
fn u64_from_str<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
        Raw::Num(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_parses_string_amount() {
        let raw = r#"{
            "coinType": "0x2::sui::SUI",
            "coinObjectCount": 3,
            "totalBalance": "1000000",
            "lockedBalance": {}
        }"#;
        let balance: Balance = serde_json::from_str(raw).unwrap();
        assert_eq!(balance.total_balance, 1_000_000);
        assert_eq!(balance.coin_object_count, 3);
    }

    #[test]
    fn balance_rejects_non_numeric_amount() {
        let raw = r#"{"coinType":"x","coinObjectCount":0,"totalBalance":"lots"}"#;
        assert!(serde_json::from_str::<Balance>(raw).is_err());
    }

    #[test]
    fn effects_failure_keeps_error_text() {
        let raw = r#"{
            "digest": "9nB1",
            "effects": {"status": {"status": "failure", "error": "MoveAbort(..., 3)"}}
        }"#;
        let resp: TransactionBlockResponse = serde_json::from_str(raw).unwrap();
        let status = resp.effects.unwrap().status;
        assert_eq!(status.status, "failure");
        assert_eq!(status.error.as_deref(), Some("MoveAbort(..., 3)"));
    }
}
