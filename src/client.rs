//! High-level client — `MeridianClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the wallet session state, and the accessors.

use std::sync::Arc;

use async_lock::RwLock;

use crate::config::Config;
use crate::domain::account::client::Accounts;
use crate::domain::asset::client::Assets;
use crate::domain::governance::client::Governance;
use crate::domain::market::client::Markets;
use crate::domain::network::client::Network;
use crate::domain::order::client::Orders;
use crate::domain::party::client::Parties;
use crate::domain::trade::client::Trades;
use crate::error::{SdkError, WalletError};
use crate::http::MeridianHttp;
use crate::poll::{PollOptions, Poller, SystemClock};
use crate::shared::PubKey;
use crate::wallet::client::Wallet;
use crate::wallet::WalletHttp;

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.governance()`, etc.
pub struct MeridianClient {
    pub(crate) http: MeridianHttp,
    pub(crate) wallet_http: WalletHttp,
    pub(crate) poll_options: PollOptions,
    /// Key preferred at login, when the wallet holds several.
    pub(crate) preferred_key: Option<PubKey>,
    /// Key the current wallet session signs with.
    pub(crate) session_key: Arc<RwLock<Option<PubKey>>>,
}

impl MeridianClient {
    pub fn builder() -> MeridianClientBuilder {
        MeridianClientBuilder::default()
    }

    /// Build a client straight from a validated [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, SdkError> {
        let mut builder = Self::builder()
            .node_url(&config.node_url)
            .wallet_url(&config.wallet_url)
            .poll_options(config.poll_options()?);
        if let Some(key) = &config.pub_key {
            builder = builder.preferred_key(key.clone());
        }
        builder.build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn parties(&self) -> Parties<'_> {
        Parties { client: self }
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    pub fn governance(&self) -> Governance<'_> {
        Governance { client: self }
    }

    pub fn network(&self) -> Network<'_> {
        Network { client: self }
    }

    pub fn wallet(&self) -> Wallet<'_> {
        Wallet { client: self }
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    /// The key the current session signs with, or `NotLoggedIn`.
    pub(crate) async fn session_key(&self) -> Result<PubKey, SdkError> {
        self.session_key
            .read()
            .await
            .clone()
            .ok_or(SdkError::Wallet(WalletError::NotLoggedIn))
    }

    /// A fresh poller carrying the client's configured deadline and pacing.
    pub(crate) fn poller(&self) -> Poller<SystemClock> {
        Poller::new(self.poll_options)
    }
}

impl Clone for MeridianClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            wallet_http: self.wallet_http.clone(),
            poll_options: self.poll_options,
            preferred_key: self.preferred_key.clone(),
            session_key: self.session_key.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MeridianClientBuilder {
    node_url: String,
    wallet_url: String,
    poll_options: PollOptions,
    preferred_key: Option<PubKey>,
}

impl Default for MeridianClientBuilder {
    fn default() -> Self {
        Self {
            node_url: crate::network::DEFAULT_NODE_URL.to_string(),
            wallet_url: crate::network::DEFAULT_WALLET_URL.to_string(),
            poll_options: PollOptions::default(),
            preferred_key: None,
        }
    }
}

impl MeridianClientBuilder {
    pub fn node_url(mut self, url: &str) -> Self {
        self.node_url = url.to_string();
        self
    }

    pub fn wallet_url(mut self, url: &str) -> Self {
        self.wallet_url = url.to_string();
        self
    }

    pub fn poll_options(mut self, options: PollOptions) -> Self {
        self.poll_options = options;
        self
    }

    /// Sign with this key after login instead of the wallet's first key.
    pub fn preferred_key(mut self, key: PubKey) -> Self {
        self.preferred_key = Some(key);
        self
    }

    pub fn build(self) -> Result<MeridianClient, SdkError> {
        Ok(MeridianClient {
            http: MeridianHttp::new(&self.node_url),
            wallet_http: WalletHttp::new(&self.wallet_url),
            poll_options: self.poll_options,
            preferred_key: self.preferred_key,
            session_key: Arc::new(RwLock::new(None)),
        })
    }
}
