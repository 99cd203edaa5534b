//! Network domain — ledger time, node statistics, network parameters.

pub mod client;

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─── LedgerTime ──────────────────────────────────────────────────────────────

/// The ledger's own clock, in nanoseconds past the Unix epoch.
///
/// Derived fields (order expiries, proposal timestamps) are computed from
/// this value, never from the local wall clock — the two can drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerTime(#[serde(with = "serde_util::string_i64")] i64);

impl LedgerTime {
    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn nanos(self) -> i64 {
        self.0
    }

    /// Seconds precision, as governance timestamps require.
    pub fn seconds(self) -> i64 {
        self.0 / 1_000_000_000
    }

    pub fn plus(self, offset: Duration) -> Self {
        Self(self.0 + offset.as_nanos() as i64)
    }
}

/// Response of `GET /time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeResponse {
    pub timestamp: LedgerTime,
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// Node statistics from `GET /statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(with = "serde_util::string_u64", default)]
    pub block_height: u64,
    #[serde(default)]
    pub total_peers: u32,
    pub genesis_time: Option<DateTime<Utc>>,
    pub current_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub chain_version: String,
    #[serde(default)]
    pub app_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub statistics: Statistics,
}

// ─── Network parameters ──────────────────────────────────────────────────────

/// A single network parameter key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParameter {
    pub key: String,
    pub value: String,
}

/// Response of `GET /network/parameters`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParametersResponse {
    #[serde(default)]
    pub network_parameters: Vec<NetworkParameter>,
}
