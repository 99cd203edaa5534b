//! The external wallet service boundary.
//!
//! Keys never leave the wallet. The SDK hands it a prepared transaction blob
//! and gets back a signed transaction; [`Signer`] is the seam the submission
//! pipeline depends on, so tests can sign without a wallet service.

pub mod client;
pub mod http;

use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::shared::PubKey;

pub use http::WalletHttp;

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub wallet: &'a str,
    pub passphrase: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// A public key held by the wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletKey {
    #[serde(rename = "pub")]
    pub public_key: PubKey,
    #[serde(default)]
    pub algo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KeysResponse {
    #[serde(default)]
    pub keys: Vec<WalletKey>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyEnvelope {
    pub key: WalletKey,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateKeyRequest<'a> {
    pub passphrase: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<KeyMeta>,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeyMeta {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignRequest<'a> {
    pub tx: &'a str,
    pub pub_key: &'a str,
    pub propagate: bool,
}

/// A signed transaction, as returned by the wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    #[serde(default)]
    pub tx: String,
    /// Whether the wallet forwarded the transaction to the network itself.
    #[serde(default)]
    pub propagated: bool,
}

// ─── Signer ──────────────────────────────────────────────────────────────────

/// What the pipeline asks the wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    /// Prepared transaction blob, passed through opaque and unaltered.
    pub tx: String,
    pub pub_key: PubKey,
    /// Ask the wallet to forward the signed transaction to the network.
    pub propagate: bool,
}

/// Signs prepared transactions on behalf of a party.
#[allow(async_fn_in_trait)]
pub trait Signer {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SignedTransaction, WalletError>;
}
