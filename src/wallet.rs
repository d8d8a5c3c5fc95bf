//! Signing account: Ed25519 key material and the Sui address derived from it.

use crate::config::SignerSecret;
use crate::errors::{AppError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use blake2::{Blake2b, Digest, digest::consts::U32};
use ed25519_dalek::{Signer, SigningKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;

type Blake2b256 = Blake2b<U32>;
type HmacSha512 = Hmac<Sha512>;

/// Signature scheme flag for Ed25519 in Sui's serialized keys and signatures.
const ED25519_FLAG: u8 = 0x00;
/// `m/44'/784'/0'/0'/0'`, every level hardened.
const SUI_DERIVATION_PATH: [u32; 5] = [44, 784, 0, 0, 0];
const HARDENED_OFFSET: u32 = 0x8000_0000;
/// IntentScope::TransactionData, IntentVersion::V0, AppId::Sui.
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

/// Account the bot trades from. Built once at startup and never mutated.
pub struct AccountContext {
    signing_key: SigningKey,
    address: String,
}

impl AccountContext {
    pub fn from_secret(secret: &SignerSecret) -> Result<Self> {
        match secret {
            SignerSecret::PrivateKey(encoded) => Self::from_base64_secret(encoded),
            SignerSecret::Mnemonic(phrase) => Self::from_mnemonic(phrase),
        }
    }

    /// Accepts a bare 32-byte secret, a 33-byte flagged secret as stored in a
    /// Sui keystore, or a legacy 64-byte secret-and-public pair.
    pub fn from_base64_secret(encoded: &str) -> Result<Self> {
        let bytes = STANDARD.decode(encoded.trim())?;
        let secret = match bytes.len() {
            32 => &bytes[..],
            33 if bytes[0] == ED25519_FLAG => &bytes[1..],
            33 => {
                return Err(AppError::Key(format!(
                    "unsupported key scheme flag {:#04x}, only Ed25519 is supported",
                    bytes[0]
                )));
            }
            64 => &bytes[..32],
            n => {
                return Err(AppError::Key(format!(
                    "expected 32, 33 or 64 key bytes, got {n}"
                )));
            }
        };
        let secret: [u8; 32] = secret
            .try_into()
            .map_err(|_| AppError::Key("secret key must be 32 bytes".into()))?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&secret)))
    }

    /// Derives the first Ed25519 account of a BIP-39 phrase, as Sui wallets do.
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let mnemonic = bip39::Mnemonic::parse_normalized(phrase.trim())
            .map_err(|e| AppError::Key(format!("invalid mnemonic: {e}")))?;
        let seed = mnemonic.to_seed("");
        let secret = slip10_derive(&seed, &SUI_DERIVATION_PATH)?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&secret)))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = sui_address(&signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// `0x`-prefixed hex Sui address.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Signs BCS transaction bytes with the transaction intent and returns the
    /// base64 serialized signature (`flag || signature || public key`).
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let digest = intent_digest(tx_bytes);
        let signature = self.signing_key.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key());
        STANDARD.encode(serialized)
    }
}

impl fmt::Debug for AccountContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountContext")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// blake2b-256 over the scheme flag and the public key.
pub fn sui_address(public_key: &[u8; 32]) -> String {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public_key);
    format!("0x{}", hex::encode(hasher.finalize()))
}

/// The 32 bytes that actually get signed for a transaction.
pub fn intent_digest(tx_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(TRANSACTION_INTENT);
    hasher.update(tx_bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// SLIP-0010 Ed25519 derivation. Ed25519 only supports hardened children, so
/// every index in `path` is hardened.
fn slip10_derive(seed: &[u8], path: &[u32]) -> Result<[u8; 32]> {
    let (mut key, mut chain_code) = split_hmac(b"ed25519 seed", seed)?;
    for index in path {
        let mut data = Vec::with_capacity(1 + 32 + 4);
        data.push(0);
        data.extend_from_slice(&key);
        data.extend_from_slice(&(index | HARDENED_OFFSET).to_be_bytes());
        (key, chain_code) = split_hmac(&chain_code, &data)?;
    }
    Ok(key)
}

fn split_hmac(key: &[u8], data: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| AppError::Key(format!("hmac init failed: {e}")))?;
    mac.update(data);
    let out = mac.finalize().into_bytes();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    Ok((left, right))
}
