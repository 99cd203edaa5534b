//! Governance domain — proposals and votes.

pub mod client;
pub mod wire;

use crate::shared::{ProposalId, PubKey, Reference};
use serde::{Deserialize, Serialize};

// ─── ProposalState ───────────────────────────────────────────────────────────

/// Governance proposal state as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    #[serde(rename = "STATE_UNSPECIFIED")]
    Unspecified,
    /// Accepted but still in its voting period.
    #[serde(rename = "STATE_OPEN")]
    Open,
    /// Voting closed with a passing majority; enactment pending.
    #[serde(rename = "STATE_PASSED")]
    Passed,
    /// The change took effect.
    #[serde(rename = "STATE_ENACTED")]
    Enacted,
    /// Failed validation before ever opening.
    #[serde(rename = "STATE_REJECTED")]
    Rejected,
    /// Voting closed without a passing majority.
    #[serde(rename = "STATE_DECLINED")]
    Declined,
    /// Passed but could not be enacted.
    #[serde(rename = "STATE_FAILED")]
    Failed,
    #[serde(rename = "STATE_WAITING_FOR_NODE_VOTE")]
    WaitingForNodeVote,
}

impl ProposalState {
    /// Whether this state ends the proposal's life without the change taking
    /// effect. Rejection is terminal — it is never "still pending".
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            ProposalState::Rejected | ProposalState::Declined | ProposalState::Failed
        )
    }
}

// ─── VoteValue ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteValue {
    #[serde(rename = "VALUE_YES")]
    Yes,
    #[serde(rename = "VALUE_NO")]
    No,
}

// ─── Proposal ────────────────────────────────────────────────────────────────

/// A governance proposal as observed through the read API.
///
/// `id` is empty until the network accepts the proposal; until then the
/// preparation-time `reference` is the only lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    #[serde(default, alias = "ID")]
    pub id: ProposalId,
    #[serde(default)]
    pub reference: Reference,
    #[serde(default)]
    pub party_id: PubKey,
    pub state: ProposalState,
    /// Populated when the proposal was rejected at validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
