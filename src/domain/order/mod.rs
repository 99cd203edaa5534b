//! Order domain — the order read model and its lifecycle enums.

pub mod client;
pub mod wire;

use crate::shared::{serde_util, MarketId, OrderId, PubKey, Reference, Side};
use serde::{Deserialize, Serialize};

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Order lifecycle status as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "STATUS_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "STATUS_ACTIVE")]
    Active,
    #[serde(rename = "STATUS_EXPIRED")]
    Expired,
    #[serde(rename = "STATUS_CANCELLED")]
    Cancelled,
    #[serde(rename = "STATUS_STOPPED")]
    Stopped,
    #[serde(rename = "STATUS_FILLED")]
    Filled,
    #[serde(rename = "STATUS_REJECTED")]
    Rejected,
    #[serde(rename = "STATUS_PARTIALLY_FILLED")]
    PartiallyFilled,
    #[serde(rename = "STATUS_PARKED")]
    Parked,
}

impl OrderStatus {
    /// Whether observing this status confirms that the ledger processed the
    /// write. Every settled status counts, including `Rejected` — a rejected
    /// order is a processed order; what to do about the rejection belongs to
    /// the caller.
    pub fn is_settled(&self) -> bool {
        !matches!(self, OrderStatus::Unspecified)
    }
}

// ─── TimeInForce ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "TIME_IN_FORCE_GTC")]
    Gtc,
    #[serde(rename = "TIME_IN_FORCE_GTT")]
    Gtt,
    #[serde(rename = "TIME_IN_FORCE_IOC")]
    Ioc,
    #[serde(rename = "TIME_IN_FORCE_FOK")]
    Fok,
    #[serde(rename = "TIME_IN_FORCE_GFA")]
    Gfa,
    #[serde(rename = "TIME_IN_FORCE_GFN")]
    Gfn,
}

// ─── OrderType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "TYPE_LIMIT")]
    Limit,
    #[serde(rename = "TYPE_MARKET")]
    Market,
    #[serde(rename = "TYPE_NETWORK")]
    Network,
}

// ─── Pegged orders ───────────────────────────────────────────────────────────

/// Price level a pegged order tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeggedReference {
    #[serde(rename = "PEGGED_REFERENCE_MID")]
    Mid,
    #[serde(rename = "PEGGED_REFERENCE_BEST_BID")]
    BestBid,
    #[serde(rename = "PEGGED_REFERENCE_BEST_ASK")]
    BestAsk,
}

/// Peg reference plus offset. The pairing is enforced by the type: an order
/// either has a complete peg or none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeggedOrder {
    pub reference: PeggedReference,
    /// Market-scaled integer offset from the reference, as a string; may be
    /// negative.
    pub offset: String,
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// An order as observed through the read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub market_id: MarketId,
    pub party_id: PubKey,
    pub side: Side,
    /// Market-scaled integer price, as a string.
    pub price: String,
    #[serde(with = "serde_util::string_u64")]
    pub size: u64,
    #[serde(with = "serde_util::string_u64", default)]
    pub remaining: u64,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// The client reference assigned at preparation time.
    #[serde(default)]
    pub reference: Reference,
    #[serde(with = "serde_util::string_u64", default)]
    pub version: u64,
    #[serde(with = "serde_util::opt_string_i64", default)]
    pub expires_at: Option<i64>,
    #[serde(with = "serde_util::opt_string_i64", default)]
    pub created_at: Option<i64>,
    /// Rejection reason, populated when status is `Rejected`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pegged_order: Option<PeggedOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "V0000012345",
            "marketId": "076BB86A5AA41E3E",
            "partyId": "a4f2b1",
            "side": "SIDE_BUY",
            "price": "1",
            "size": "10",
            "remaining": "10",
            "timeInForce": "TIME_IN_FORCE_GTT",
            "type": "TYPE_LIMIT",
            "status": "STATUS_ACTIVE",
            "reference": "ref-001",
            "version": "1",
            "expiresAt": "1614776400000000000"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.size, 10);
        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(order.expires_at, Some(1_614_776_400_000_000_000));
        assert!(order.reason.is_none());
    }

    #[test]
    fn test_every_settled_status_confirms() {
        for status in [
            OrderStatus::Active,
            OrderStatus::PartiallyFilled,
            OrderStatus::Filled,
            OrderStatus::Cancelled,
            OrderStatus::Expired,
            OrderStatus::Stopped,
            OrderStatus::Parked,
            OrderStatus::Rejected,
        ] {
            assert!(status.is_settled(), "{:?} should confirm", status);
        }
        assert!(!OrderStatus::Unspecified.is_settled());
    }
}
