//! Wire envelopes for governance read endpoints.

use super::Proposal;
use serde::{Deserialize, Serialize};

/// A proposal with its governance bookkeeping, as the ledger nests it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceData {
    pub proposal: Proposal,
}

/// Response of the by-id and by-reference proposal endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalEnvelope {
    pub data: GovernanceData,
}

/// Response of `GET /governance/proposals`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalsResponse {
    #[serde(default)]
    pub data: Vec<GovernanceData>,
}
