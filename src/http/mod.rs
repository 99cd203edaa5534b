//! HTTP plumbing for the ledger node's REST API.
//!
//! [`client::MeridianHttp`] is the low-level client, one method per endpoint,
//! returning wire types. [`LedgerApi`] is the seam the submission coordinator
//! and lifecycle manager talk through, so tests can script a ledger without a
//! network.

pub mod client;
pub mod retry;

use serde::{Deserialize, Serialize};

use crate::command::{
    Command, OrderAmendment, OrderCancellation, OrderSubmission, ProposalSubmission,
    VoteSubmission,
};
use crate::domain::governance::Proposal;
use crate::domain::network::LedgerTime;
use crate::domain::order::Order;
use crate::error::HttpError;
use crate::shared::{MarketId, ProposalId, PubKey, Reference};

pub use client::MeridianHttp;
pub use retry::{RetryConfig, RetryPolicy};

// ─── Prepare wire types ──────────────────────────────────────────────────────

/// Body of `POST /orders/prepare/submit`.
#[derive(Debug, Serialize)]
pub(crate) struct PrepareSubmissionRequest<'a> {
    pub submission: SubmissionBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionBody<'a> {
    pub party_id: &'a PubKey,
    #[serde(flatten)]
    pub submission: &'a OrderSubmission,
}

/// Body of `POST /orders/prepare/amend`.
#[derive(Debug, Serialize)]
pub(crate) struct PrepareAmendmentRequest<'a> {
    pub amendment: AmendmentBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AmendmentBody<'a> {
    pub party_id: &'a PubKey,
    #[serde(flatten)]
    pub amendment: &'a OrderAmendment,
}

/// Body of `POST /orders/prepare/cancel`.
#[derive(Debug, Serialize)]
pub(crate) struct PrepareCancellationRequest<'a> {
    pub cancellation: CancellationBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CancellationBody<'a> {
    pub party_id: &'a PubKey,
    #[serde(flatten)]
    pub cancellation: &'a OrderCancellation,
}

/// Body of `POST /governance/prepare/proposal`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrepareProposalRequest<'a> {
    pub party_id: &'a PubKey,
    pub proposal: &'a ProposalSubmission,
}

/// Body of `POST /governance/prepare/vote`.
#[derive(Debug, Serialize)]
pub(crate) struct PrepareVoteRequest<'a> {
    pub vote: VoteBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoteBody<'a> {
    pub party_id: &'a PubKey,
    #[serde(flatten)]
    pub vote: &'a VoteSubmission,
}

/// Raw response of the prepare endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrepareResponse {
    /// Opaque serialized transaction, signed as-is by the wallet.
    pub blob: String,
    #[serde(default, alias = "submitID")]
    pub submit_id: Option<String>,
    #[serde(default)]
    pub pending_proposal: Option<Proposal>,
}

/// A prepared command, ready for signing.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCommand {
    /// Opaque serialized transaction. Must not be inspected or altered.
    pub blob: String,
    /// Reference assigned at preparation time, when the command gets one.
    pub reference: Option<Reference>,
}

impl From<PrepareResponse> for PreparedCommand {
    fn from(resp: PrepareResponse) -> Self {
        let reference = resp
            .submit_id
            .map(Reference::from)
            .or_else(|| resp.pending_proposal.map(|p| p.reference));
        PreparedCommand {
            blob: resp.blob,
            reference,
        }
    }
}

// ─── LedgerApi ───────────────────────────────────────────────────────────────

/// The slice of the node API the write pipeline depends on.
#[allow(async_fn_in_trait)]
pub trait LedgerApi {
    /// Prepare a command for signing, attributing it to `party`.
    async fn prepare_command(
        &self,
        command: &Command,
        party: &PubKey,
    ) -> Result<PreparedCommand, HttpError>;

    /// Look up an order by reference or order id. `Ok(None)` means the
    /// eventually-consistent read API has not surfaced it yet.
    async fn order_by_key(&self, key: &str) -> Result<Option<Order>, HttpError>;

    async fn proposal_by_reference(
        &self,
        reference: &Reference,
    ) -> Result<Option<Proposal>, HttpError>;

    async fn proposal_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, HttpError>;

    /// Identifiers of all tradeable markets. An enacted market-creation
    /// proposal surfaces here with the proposal's id.
    async fn market_ids(&self) -> Result<Vec<MarketId>, HttpError>;

    /// Current ledger time, used to derive command timestamps.
    async fn ledger_time(&self) -> Result<LedgerTime, HttpError>;
}
