//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors from the ledger node's HTTP surface (reads and command preparation).
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Whether a failed read query may succeed on a later attempt.
    ///
    /// The confirmation poller treats these as Pending (up to its
    /// transient-error ceiling) instead of failing the whole operation.
    pub fn is_transient(&self) -> bool {
        match self {
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            HttpError::ServerError { status, .. } => matches!(status, 502 | 503 | 504),
            HttpError::RateLimited { .. } | HttpError::Timeout => true,
            _ => false,
        }
    }
}

/// Errors at the wallet-service boundary. Never retried by the poller.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Not logged in to the wallet service")]
    NotLoggedIn,

    #[error("Unauthorized (token rejected or expired)")]
    Unauthorized,

    #[error("Wallet has no keys; generate a keypair first")]
    NoKeysAvailable,

    #[error("Signing rejected: {0}")]
    SigningRejected(String),

    #[error("Wallet service error {status}: {body}")]
    ServerError { status: u16, body: String },
}

/// Local command validation failures. An invalid command is never submitted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Market identifier must not be empty")]
    EmptyMarket,

    #[error("Order size must be greater than zero")]
    ZeroSize,

    #[error("Order price must not be empty")]
    EmptyPrice,

    #[error("GTT orders require an expiry")]
    MissingExpiry,

    #[error("Relative expiry requires the current ledger time")]
    MissingLedgerTime,

    #[error("Order identifier must not be empty")]
    EmptyOrderId,

    #[error("Amendment must change at least one field")]
    EmptyAmendment,

    #[error("Cancelling a single order requires its market")]
    OrderWithoutMarket,

    #[error("Proposal timestamps must satisfy validation < closing <= enactment")]
    UnorderedTimestamps,

    #[error("Network parameter changes require a non-empty key")]
    EmptyParameterKey,

    #[error("Votes require a non-empty proposal identifier")]
    EmptyProposalId,
}

/// Configuration loading/validation failures, surfaced to the caller
/// instead of panicking on a bad environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("{name} looks like a placeholder value: {value}")]
    PlaceholderValue { name: &'static str, value: String },

    #[error("{name} must be an https URL: {value}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be a positive integer: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Poll timeout and interval must be positive, with interval <= timeout")]
    InvalidPollOptions,
}
