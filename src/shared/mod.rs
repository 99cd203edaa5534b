//! Shared newtypes and utilities used across all domain modules.
//!
//! Identifier newtypes are serialization-transparent: they serialize and
//! deserialize as the plain strings the ledger sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(String::new())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok($name(s))
            }
        }
    };
}

string_id! {
    /// Market identifier assigned by the ledger.
    MarketId
}

string_id! {
    /// Order identifier assigned by the ledger once an order is processed.
    OrderId
}

string_id! {
    /// Governance proposal identifier. Empty until the network accepts the
    /// proposal; an enacted market proposal's market id equals this id.
    ProposalId
}

string_id! {
    /// Settlement asset identifier.
    AssetId
}

string_id! {
    /// Client-side reference attached to a pending transaction at preparation
    /// time. The only lookup key available before the ledger assigns an id.
    Reference
}

string_id! {
    /// A holder's public key, hex-encoded. Doubles as the party identifier
    /// on the ledger's read API.
    PubKey
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "SIDE_BUY")]
    Buy,
    #[serde(rename = "SIDE_SELL")]
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "SIDE_BUY",
            Side::Sell => "SIDE_SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_id_serde_transparent() {
        let id = MarketId::from("076BB86A5AA41E3E");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"076BB86A5AA41E3E\"");
        let back: MarketId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_proposal_id_empty() {
        assert!(ProposalId::from("").is_empty());
        assert!(!ProposalId::from("abc").is_empty());
    }

    #[test]
    fn test_side_serde() {
        let buy: Side = serde_json::from_str("\"SIDE_BUY\"").unwrap();
        assert_eq!(buy, Side::Buy);
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"SIDE_SELL\"");
    }
}
