//! Markets sub-client.

use crate::client::MeridianClient;
use crate::domain::market::Market;
use crate::error::{HttpError, SdkError};
use crate::shared::MarketId;

/// Sub-client for market reads.
pub struct Markets<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Markets<'a> {
    /// All tradeable markets.
    pub async fn list(&self) -> Result<Vec<Market>, SdkError> {
        Ok(self.client.http.get_markets().await?.markets)
    }

    pub async fn get(&self, id: &MarketId) -> Result<Market, SdkError> {
        match self.client.http.get_market(id).await? {
            Some(envelope) => Ok(envelope.market),
            None => Err(SdkError::Http(HttpError::NotFound(format!(
                "market not found: {}",
                id
            )))),
        }
    }
}
