//! Market domain — the market read model.

pub mod client;
pub mod wire;

use crate::shared::{serde_util, MarketId};
use serde::{Deserialize, Serialize};

/// Market state as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketState {
    #[serde(rename = "STATE_PROPOSED")]
    Proposed,
    #[serde(rename = "STATE_PENDING")]
    Pending,
    #[serde(rename = "STATE_ACTIVE")]
    Active,
    #[serde(rename = "STATE_SUSPENDED")]
    Suspended,
    #[serde(rename = "STATE_CLOSED")]
    Closed,
    #[serde(rename = "STATE_SETTLED")]
    Settled,
}

/// Instrument metadata nested inside a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradableInstrument {
    pub instrument: Instrument,
}

/// A market as observed through the read API.
///
/// An enacted market-creation proposal surfaces here with `id` equal to the
/// proposal id, which is how enactment is detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: MarketId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradable_instrument: Option<TradableInstrument>,
    #[serde(with = "serde_util::string_u64", default)]
    pub decimal_places: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MarketState>,
}

impl Market {
    /// Instrument name, when the listing includes one.
    pub fn instrument_name(&self) -> Option<&str> {
        self.tradable_instrument
            .as_ref()
            .map(|t| t.instrument.name.as_str())
    }
}
