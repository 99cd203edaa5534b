//! # Meridian SDK
//!
//! A Rust SDK for the Meridian trading ledger: read API access, the write
//! pipeline (prepare → sign → submit → confirm), and the governance proposal
//! lifecycle.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, commands, errors
//! 2. **Confirmation** — `Poller`, the deadline-bounded read-until-terminal loop
//! 3. **HTTP API** — `MeridianHttp` (node) and `WalletHttp` (wallet service)
//! 4. **Pipeline** — `SubmissionCoordinator` and `ProposalLifecycleManager`
//! 5. **High-Level Client** — `MeridianClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meridian_sdk::prelude::*;
//!
//! let config = Config::from_env()?;
//! let client = MeridianClient::from_config(&config)?;
//! client.wallet().login(&config.wallet_name, &config.wallet_passphrase).await?;
//!
//! let order = OrderSubmission::builder(market_id, Side::Buy)
//!     .price("100000")
//!     .size(10)
//!     .build()?;
//! match client.orders().submit(order).await? {
//!     SubmissionOutcome::Confirmed(order) => println!("settled as {:?}", order.status),
//!     outcome => println!("not confirmed: {:?}", outcome),
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, sub-clients.
pub mod domain;

/// Write commands and their validating builders.
pub mod command;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Environment-driven configuration.
pub mod config;

// ── Layer 2: Confirmation ────────────────────────────────────────────────────

/// Deadline-bounded confirmation polling against the eventually-consistent
/// read API.
pub mod poll;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Node HTTP client with retry policies, plus the `LedgerApi` seam.
pub mod http;

/// Wallet service boundary: HTTP client and the `Signer` seam.
pub mod wallet;

// ── Layer 4: Pipeline ────────────────────────────────────────────────────────

/// The write pipeline: prepare, sign, submit, confirm.
pub mod submission;

/// The governance proposal lifecycle: propose, vote, enact.
pub mod lifecycle;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `MeridianClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, MarketId, OrderId, ProposalId, PubKey, Reference, Side};

    // Domain types
    pub use crate::domain::account::{Account, AccountType, Position};
    pub use crate::domain::asset::Asset;
    pub use crate::domain::governance::{Proposal, ProposalState, VoteValue};
    pub use crate::domain::market::{Market, MarketState};
    pub use crate::domain::network::{LedgerTime, NetworkParameter, Statistics};
    pub use crate::domain::order::{
        Order, OrderStatus, OrderType, PeggedOrder, PeggedReference, TimeInForce,
    };
    pub use crate::domain::party::Party;
    pub use crate::domain::trade::Trade;

    // Commands
    pub use crate::command::{
        Command, OrderAmendment, OrderCancellation, OrderSubmission, ProposalSubmission,
        ProposalTerms, VoteSubmission,
    };

    // Confirmation
    pub use crate::poll::{Classification, PollOptions, PollOutcome, Poller};

    // Pipeline
    pub use crate::lifecycle::{LifecycleContext, LifecycleOutcome, Phase, ProposalLifecycleManager};
    pub use crate::submission::{SubmissionCoordinator, SubmissionOutcome};

    // Errors & configuration
    pub use crate::config::Config;
    pub use crate::error::{CommandError, ConfigError, HttpError, SdkError, WalletError};

    // Network
    pub use crate::network::{DEFAULT_NODE_URL, DEFAULT_WALLET_URL};

    // HTTP + wallet seams
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
    pub use crate::http::{LedgerApi, MeridianHttp, PreparedCommand};
    pub use crate::wallet::{SignedTransaction, Signer, TransactionEnvelope, WalletHttp};

    // High-level client
    pub use crate::client::{MeridianClient, MeridianClientBuilder};
}
