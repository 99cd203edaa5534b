//! HTTP client for the wallet service.

use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing;

use crate::error::WalletError;
use crate::shared::PubKey;
use crate::wallet::{
    GenerateKeyRequest, KeyEnvelope, KeysResponse, LoginRequest, SignRequest, SignedTransaction,
    Signer, TokenResponse, TransactionEnvelope, WalletKey,
};

/// HTTP client for the wallet service's REST API.
///
/// Holds the session token behind a lock so a logged-in client can be shared
/// across tasks. The token is never exposed.
pub struct WalletHttp {
    base_url: String,
    client: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl WalletHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Create a new wallet and open a session for it.
    pub async fn create_wallet(&self, wallet: &str, passphrase: &str) -> Result<(), WalletError> {
        let url = format!("{}/api/v1/wallets", self.base_url);
        let body = LoginRequest { wallet, passphrase };
        let resp: TokenResponse = self.post(&url, &body).await?;
        *self.token.write().await = Some(resp.token);
        Ok(())
    }

    /// Open a session for an existing wallet.
    pub async fn login(&self, wallet: &str, passphrase: &str) -> Result<(), WalletError> {
        let url = format!("{}/api/v1/auth/token", self.base_url);
        let body = LoginRequest { wallet, passphrase };
        let resp: TokenResponse = self.post(&url, &body).await?;
        *self.token.write().await = Some(resp.token);
        tracing::debug!(wallet, "Wallet session opened");
        Ok(())
    }

    /// Close the session and drop the token, regardless of what the service
    /// says about it.
    pub async fn logout(&self) -> Result<(), WalletError> {
        let url = format!("{}/api/v1/auth/token", self.base_url);
        let result = self
            .request::<serde_json::Value, ()>(reqwest::Method::DELETE, &url, None)
            .await;
        *self.token.write().await = None;
        result.map(|_| ())
    }

    /// List the public keys the wallet holds.
    pub async fn list_keys(&self) -> Result<Vec<WalletKey>, WalletError> {
        let url = format!("{}/api/v1/keys", self.base_url);
        let resp: KeysResponse = self.get(&url).await?;
        Ok(resp.keys)
    }

    /// Look up one key by its public half.
    pub async fn get_key(&self, pub_key: &PubKey) -> Result<WalletKey, WalletError> {
        let url = format!("{}/api/v1/keys/{}", self.base_url, pub_key.as_str());
        let resp: KeyEnvelope = self.get(&url).await?;
        Ok(resp.key)
    }

    /// Generate a new keypair inside the wallet and return its public half.
    pub async fn generate_key(&self, passphrase: &str) -> Result<WalletKey, WalletError> {
        let url = format!("{}/api/v1/keys", self.base_url);
        let body = GenerateKeyRequest {
            passphrase,
            meta: Vec::new(),
        };
        let resp: KeyEnvelope = self.post(&url, &body).await?;
        Ok(resp.key)
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, WalletError> {
        self.request(reqwest::Method::GET, url, None::<&()>).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, WalletError> {
        self.request(reqwest::Method::POST, url, Some(body)).await
    }

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, WalletError> {
        let mut req = self.client.request(method, url);
        if let Some(token) = self.token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(WalletError::Unauthorized),
            _ => Err(WalletError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for WalletHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            token: self.token.clone(),
        }
    }
}

impl Signer for WalletHttp {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SignedTransaction, WalletError> {
        if !self.is_logged_in().await {
            return Err(WalletError::NotLoggedIn);
        }

        let url = format!("{}/api/v1/messages", self.base_url);
        let body = SignRequest {
            tx: &envelope.tx,
            pub_key: envelope.pub_key.as_str(),
            propagate: envelope.propagate,
        };

        match self.post::<SignedTransaction, _>(&url, &body).await {
            Ok(signed) => Ok(signed),
            Err(WalletError::ServerError { status, body }) if (400..500).contains(&status) => {
                Err(WalletError::SigningRejected(body))
            }
            Err(e) => Err(e),
        }
    }
}
