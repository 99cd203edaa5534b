//! Trade domain — executed trades.

pub mod client;

use crate::shared::{serde_util, MarketId, OrderId, PubKey, Side};
use serde::{Deserialize, Serialize};

/// An executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub market_id: MarketId,
    /// Market-scaled integer price, as a string.
    pub price: String,
    #[serde(with = "serde_util::string_u64")]
    pub size: u64,
    pub buyer: PubKey,
    pub seller: PubKey,
    /// Side of the aggressive (price-taking) party.
    pub aggressor: Side,
    #[serde(default)]
    pub buy_order: Option<OrderId>,
    #[serde(default)]
    pub sell_order: Option<OrderId>,
    #[serde(with = "serde_util::string_i64", default)]
    pub timestamp: i64,
}

/// Response of `GET /markets/{id}/trades` and `GET /orders/{id}/trades`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradesResponse {
    #[serde(default)]
    pub trades: Vec<Trade>,
}
