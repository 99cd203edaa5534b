//! Parties sub-client.

use crate::client::MeridianClient;
use crate::domain::party::Party;
use crate::error::{HttpError, SdkError};
use crate::shared::PubKey;

/// Sub-client for party reads.
pub struct Parties<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Parties<'a> {
    pub async fn list(&self) -> Result<Vec<Party>, SdkError> {
        Ok(self.client.http.get_parties().await?.parties)
    }

    pub async fn get(&self, id: &PubKey) -> Result<Party, SdkError> {
        match self.client.http.get_party(id).await? {
            Some(envelope) => Ok(envelope.party),
            None => Err(SdkError::Http(HttpError::NotFound(format!(
                "party not found: {}",
                id
            )))),
        }
    }
}
