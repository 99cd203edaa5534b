//! Wallet sub-client — session management and key selection.

use tracing;

use crate::client::MeridianClient;
use crate::error::{SdkError, WalletError};
use crate::shared::PubKey;
use crate::wallet::WalletKey;

/// Sub-client for wallet operations.
pub struct Wallet<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Wallet<'a> {
    /// Open a wallet session and select the signing key: the preferred key
    /// when the client was built with one, otherwise the wallet's first key.
    pub async fn login(&self, wallet: &str, passphrase: &str) -> Result<PubKey, SdkError> {
        self.client.wallet_http.login(wallet, passphrase).await?;

        let keys = self.client.wallet_http.list_keys().await?;
        let key = match &self.client.preferred_key {
            Some(preferred) => keys
                .iter()
                .find(|k| k.public_key == *preferred)
                .map(|k| k.public_key.clone())
                .ok_or_else(|| {
                    SdkError::Other(format!(
                        "wallet holds no key matching the configured key {}",
                        preferred
                    ))
                })?,
            None => keys
                .first()
                .map(|k| k.public_key.clone())
                .ok_or(SdkError::Wallet(WalletError::NoKeysAvailable))?,
        };

        *self.client.session_key.write().await = Some(key.clone());
        tracing::info!(key = %key, "wallet session opened");
        Ok(key)
    }

    /// Create a new wallet, generate its first keypair, and open a session.
    pub async fn create(&self, wallet: &str, passphrase: &str) -> Result<PubKey, SdkError> {
        self.client.wallet_http.create_wallet(wallet, passphrase).await?;
        let key = self.client.wallet_http.generate_key(passphrase).await?;
        *self.client.session_key.write().await = Some(key.public_key.clone());
        Ok(key.public_key)
    }

    /// Close the session. The signing key is dropped even if the service
    /// call fails.
    pub async fn logout(&self) -> Result<(), SdkError> {
        *self.client.session_key.write().await = None;
        self.client.wallet_http.logout().await?;
        Ok(())
    }

    pub async fn keys(&self) -> Result<Vec<WalletKey>, SdkError> {
        Ok(self.client.wallet_http.list_keys().await?)
    }

    pub async fn key(&self, pub_key: &PubKey) -> Result<WalletKey, SdkError> {
        Ok(self.client.wallet_http.get_key(pub_key).await?)
    }

    pub async fn generate_key(&self, passphrase: &str) -> Result<WalletKey, SdkError> {
        Ok(self.client.wallet_http.generate_key(passphrase).await?)
    }

    /// Sign subsequent commands with `key` instead of the login-time choice.
    pub async fn use_key(&self, key: PubKey) {
        *self.client.session_key.write().await = Some(key);
    }

    /// The key the current session signs with, if logged in.
    pub async fn active_key(&self) -> Option<PubKey> {
        self.client.session_key.read().await.clone()
    }
}
