//! SDK configuration.
//!
//! All endpoint/credential state is carried in an explicit [`Config`] value —
//! there is no process-wide singleton. [`Config::from_env`] loads and
//! validates the environment (including a `.env` file when present) and
//! surfaces problems as [`ConfigError`] instead of panicking.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::poll::PollOptions;
use crate::shared::PubKey;

/// Ledger node base URL.
pub const ENV_NODE_URL: &str = "MERIDIAN_NODE_URL";
/// Wallet service base URL.
pub const ENV_WALLET_URL: &str = "MERIDIAN_WALLET_URL";
/// Wallet name used at login.
pub const ENV_WALLET_NAME: &str = "MERIDIAN_WALLET_NAME";
/// Wallet passphrase used at login.
pub const ENV_WALLET_PASSPHRASE: &str = "MERIDIAN_WALLET_PASSPHRASE";
/// Optional pre-existing public key; skips key selection after login.
pub const ENV_PUBKEY: &str = "MERIDIAN_PUBKEY";
/// Per-phase confirmation timeout, in seconds.
pub const ENV_TIMEOUT: &str = "MERIDIAN_TIMEOUT";
/// Confirmation poll interval, in milliseconds.
pub const ENV_POLL_INTERVAL: &str = "MERIDIAN_POLL_INTERVAL";
/// Consecutive transient read failures tolerated inside one poll.
pub const ENV_MAX_TRANSIENT_ERRORS: &str = "MERIDIAN_MAX_TRANSIENT_ERRORS";

/// Immutable SDK configuration, passed explicitly into the client.
#[derive(Debug, Clone)]
pub struct Config {
    pub node_url: String,
    pub wallet_url: String,
    pub wallet_name: String,
    pub wallet_passphrase: String,
    /// Pre-selected signing key. When absent the client picks the wallet's
    /// first key at login.
    pub pub_key: Option<PubKey>,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub max_transient_errors: u32,
}

impl Config {
    /// Build a validated configuration from explicit values, using default
    /// confirmation timings.
    pub fn new(
        node_url: &str,
        wallet_url: &str,
        wallet_name: &str,
        wallet_passphrase: &str,
    ) -> Result<Self, ConfigError> {
        check_url(ENV_NODE_URL, node_url)?;
        check_url(ENV_WALLET_URL, wallet_url)?;
        check_var(ENV_WALLET_NAME, wallet_name)?;
        check_var(ENV_WALLET_PASSPHRASE, wallet_passphrase)?;

        Ok(Self {
            node_url: node_url.trim_end_matches('/').to_string(),
            wallet_url: normalize_wallet_url(wallet_url),
            wallet_name: wallet_name.to_string(),
            wallet_passphrase: wallet_passphrase.to_string(),
            pub_key: None,
            timeout: PollOptions::DEFAULT_TIMEOUT,
            poll_interval: PollOptions::DEFAULT_INTERVAL,
            max_transient_errors: PollOptions::DEFAULT_MAX_TRANSIENT_ERRORS,
        })
    }

    /// Load configuration from the environment (and `.env` when present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let node_url = require_var(ENV_NODE_URL)?;
        let wallet_url = require_var(ENV_WALLET_URL)?;
        let wallet_name = require_var(ENV_WALLET_NAME)?;
        let wallet_passphrase = require_var(ENV_WALLET_PASSPHRASE)?;

        let mut config = Config::new(&node_url, &wallet_url, &wallet_name, &wallet_passphrase)?;

        config.pub_key = env::var(ENV_PUBKEY).ok().map(PubKey::from);
        if let Some(secs) = optional_number(ENV_TIMEOUT)? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(millis) = optional_number(ENV_POLL_INTERVAL)? {
            config.poll_interval = Duration::from_millis(millis);
        }
        if let Some(count) = optional_number(ENV_MAX_TRANSIENT_ERRORS)? {
            config.max_transient_errors = count as u32;
        }

        Ok(config)
    }

    /// Confirmation poll options derived from the configured timings.
    pub fn poll_options(&self) -> Result<PollOptions, ConfigError> {
        PollOptions::new(self.timeout, self.poll_interval, self.max_transient_errors)
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional_number(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(None),
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

fn check_var(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingVar(name));
    }
    // Docs and onboarding snippets ship "example" values; catch them early.
    if value.contains("example") {
        return Err(ConfigError::PlaceholderValue {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    check_var(name, value)?;
    if !value.starts_with("https://") {
        return Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Strip a trailing API-version suffix from the wallet URL.
///
/// The SDK appends `/api/v1/...` itself; users copying a full endpoint URL
/// would otherwise end up with a doubled prefix.
fn normalize_wallet_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    for suffix in ["/api/v1", "/api"] {
        if let Some(base) = url.strip_suffix(suffix) {
            tracing::warn!(
                "wallet URL carries the {} suffix; using {} instead",
                suffix,
                base
            );
            return base.to_string();
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_validates_urls() {
        let err = Config::new("http://node", "https://wallet", "w", "p").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_config_rejects_placeholder_values() {
        let err = Config::new(
            "https://node.example.com",
            "https://wallet.host",
            "w",
            "p",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::PlaceholderValue { .. }));
    }

    #[test]
    fn test_config_rejects_empty_credentials() {
        let err = Config::new("https://node.host", "https://wallet.host", "", "p").unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(ENV_WALLET_NAME));
    }

    #[test]
    fn test_wallet_url_suffix_stripped() {
        assert_eq!(
            normalize_wallet_url("https://wallet.host/api/v1"),
            "https://wallet.host"
        );
        assert_eq!(
            normalize_wallet_url("https://wallet.host/"),
            "https://wallet.host"
        );
    }

    #[test]
    fn test_poll_options_from_config() {
        let config = Config::new("https://node.host", "https://wallet.host", "w", "p").unwrap();
        let opts = config.poll_options().unwrap();
        assert_eq!(opts.interval, PollOptions::DEFAULT_INTERVAL);
    }
}
