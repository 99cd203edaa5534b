//! Party domain — ledger participants, identified by their public key.

pub mod client;

use crate::shared::PubKey;
use serde::{Deserialize, Serialize};

/// A participant on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PubKey,
}

/// Response of `GET /parties`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartiesResponse {
    #[serde(default)]
    pub parties: Vec<Party>,
}

/// Response of `GET /parties/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyEnvelope {
    pub party: Party,
}
