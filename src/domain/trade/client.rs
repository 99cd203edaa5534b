//! Trades sub-client.

use crate::client::MeridianClient;
use crate::domain::trade::Trade;
use crate::error::SdkError;
use crate::shared::{MarketId, OrderId};

/// Sub-client for trade reads.
pub struct Trades<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Trades<'a> {
    pub async fn by_market(&self, market_id: &MarketId) -> Result<Vec<Trade>, SdkError> {
        Ok(self.client.http.get_market_trades(market_id).await?.trades)
    }

    /// Trades a specific order participated in.
    pub async fn by_order(&self, order_id: &OrderId) -> Result<Vec<Trade>, SdkError> {
        Ok(self.client.http.get_order_trades(order_id).await?.trades)
    }
}
