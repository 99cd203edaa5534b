//! Orders sub-client — reads plus the write pipeline.
//!
//! The write methods require a wallet session (see `client.wallet().login()`)
//! and return a [`SubmissionOutcome`], never a bare acknowledgement: on this
//! ledger a write is only as real as its confirmed read.

use crate::client::MeridianClient;
use crate::command::{Command, OrderAmendment, OrderCancellation, OrderSubmission};
use crate::domain::order::Order;
use crate::error::SdkError;
use crate::shared::MarketId;
use crate::submission::{SubmissionCoordinator, SubmissionOutcome};

/// Sub-client for order operations.
pub struct Orders<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Orders<'a> {
    /// Look up one order by reference or order id. `Ok(None)` means the read
    /// API has not surfaced it (yet).
    pub async fn get(&self, key: &str) -> Result<Option<Order>, SdkError> {
        Ok(self
            .client
            .http
            .get_order(key)
            .await?
            .map(|envelope| envelope.order))
    }

    /// Live orders on a market.
    pub async fn by_market(&self, market_id: &MarketId) -> Result<Vec<Order>, SdkError> {
        Ok(self.client.http.get_market_orders(market_id).await?.orders)
    }

    /// Submit a new order and wait for it to settle.
    pub async fn submit(
        &self,
        submission: OrderSubmission,
    ) -> Result<SubmissionOutcome, SdkError> {
        self.run(Command::OrderSubmission(submission)).await
    }

    /// Amend a live order and wait for the change to be observable.
    pub async fn amend(&self, amendment: OrderAmendment) -> Result<SubmissionOutcome, SdkError> {
        self.run(Command::OrderAmendment(amendment)).await
    }

    /// Cancel one order, a market's orders, or every order the party has.
    /// Only the single-order scope is polled for confirmation; broader
    /// scopes come back as [`SubmissionOutcome::Submitted`].
    pub async fn cancel(
        &self,
        cancellation: OrderCancellation,
    ) -> Result<SubmissionOutcome, SdkError> {
        self.run(Command::OrderCancellation(cancellation)).await
    }

    async fn run(&self, command: Command) -> Result<SubmissionOutcome, SdkError> {
        let party = self.client.session_key().await?;
        let poller = self.client.poller();
        let coordinator =
            SubmissionCoordinator::new(&self.client.http, &self.client.wallet_http, &poller);
        Ok(coordinator.submit(&command, &party).await)
    }
}
