//! Network sub-client — ledger time, statistics and parameters.

use crate::client::MeridianClient;
use crate::domain::network::{LedgerTime, NetworkParameter, Statistics};
use crate::error::SdkError;

/// Sub-client for network-level reads.
pub struct Network<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Network<'a> {
    /// Current ledger time. Command timestamps derive from this, never from
    /// the local wall clock.
    pub async fn time(&self) -> Result<LedgerTime, SdkError> {
        Ok(self.client.http.get_time().await?.timestamp)
    }

    pub async fn statistics(&self) -> Result<Statistics, SdkError> {
        Ok(self.client.http.get_statistics().await?.statistics)
    }

    pub async fn parameters(&self) -> Result<Vec<NetworkParameter>, SdkError> {
        Ok(self
            .client
            .http
            .get_network_parameters()
            .await?
            .network_parameters)
    }
}
