//! Account domain — balances and positions.

pub mod client;

use crate::shared::{serde_util, AssetId, MarketId, PubKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "ACCOUNT_TYPE_GENERAL")]
    General,
    #[serde(rename = "ACCOUNT_TYPE_MARGIN")]
    Margin,
    #[serde(rename = "ACCOUNT_TYPE_BOND")]
    Bond,
    #[serde(rename = "ACCOUNT_TYPE_INSURANCE")]
    Insurance,
    #[serde(rename = "ACCOUNT_TYPE_FEES_LIQUIDITY")]
    FeesLiquidity,
    #[serde(rename = "ACCOUNT_TYPE_FEES_INFRASTRUCTURE")]
    FeesInfrastructure,
}

/// A single account balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub owner: Option<PubKey>,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub asset: AssetId,
    #[serde(default)]
    pub market_id: Option<MarketId>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

/// A party's position on one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub market_id: MarketId,
    pub party_id: PubKey,
    #[serde(with = "serde_util::string_i64", default)]
    pub open_volume: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub realised_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub unrealised_pnl: Decimal,
    /// Market-scaled integer price, as a string.
    #[serde(default)]
    pub average_entry_price: String,
}

/// Response of the account listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// Response of `GET /parties/{id}/positions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionsResponse {
    #[serde(default)]
    pub positions: Vec<Position>,
}
