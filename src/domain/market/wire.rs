//! Wire envelopes for market read endpoints.

use super::Market;
use serde::{Deserialize, Serialize};

/// Response of `GET /markets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketsResponse {
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// Response of `GET /markets/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEnvelope {
    pub market: Market,
}
