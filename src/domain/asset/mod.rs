//! Asset domain — settlement assets known to the ledger.

pub mod client;

use crate::shared::{serde_util, AssetId};
use serde::{Deserialize, Serialize};

/// A settlement asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    #[serde(with = "serde_util::string_u64", default)]
    pub decimals: u64,
    #[serde(default)]
    pub total_supply: Option<String>,
}

/// Response of `GET /assets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsResponse {
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Response of `GET /assets/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEnvelope {
    pub asset: Asset,
}
