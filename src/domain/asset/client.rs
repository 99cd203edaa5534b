//! Assets sub-client.

use crate::client::MeridianClient;
use crate::domain::asset::Asset;
use crate::error::{HttpError, SdkError};

/// Sub-client for asset reads.
pub struct Assets<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Assets<'a> {
    pub async fn list(&self) -> Result<Vec<Asset>, SdkError> {
        Ok(self.client.http.get_assets().await?.assets)
    }

    pub async fn get(&self, id: &str) -> Result<Asset, SdkError> {
        match self.client.http.get_asset(id).await? {
            Some(envelope) => Ok(envelope.asset),
            None => Err(SdkError::Http(HttpError::NotFound(format!(
                "asset not found: {}",
                id
            )))),
        }
    }
}
