//! Accounts sub-client — balances and positions.

use crate::client::MeridianClient;
use crate::domain::account::{Account, Position};
use crate::error::SdkError;
use crate::shared::{MarketId, PubKey};

/// Sub-client for account and position reads.
pub struct Accounts<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Accounts<'a> {
    /// Margin, insurance and fee accounts scoped to a market.
    pub async fn by_market(&self, market_id: &MarketId) -> Result<Vec<Account>, SdkError> {
        Ok(self
            .client
            .http
            .get_market_accounts(market_id)
            .await?
            .accounts)
    }

    /// All of a party's accounts, across markets and assets.
    pub async fn by_party(&self, party: &PubKey) -> Result<Vec<Account>, SdkError> {
        Ok(self.client.http.get_party_accounts(party).await?.accounts)
    }

    pub async fn positions(&self, party: &PubKey) -> Result<Vec<Position>, SdkError> {
        Ok(self
            .client
            .http
            .get_party_positions(party)
            .await?
            .positions)
    }
}
