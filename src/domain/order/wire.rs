//! Wire envelopes for order read endpoints.

use super::Order;
use serde::{Deserialize, Serialize};

/// Response of `GET /orders/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEnvelope {
    pub order: Order,
}

/// Response of `GET /markets/{id}/orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}
