//! Governance sub-client — proposal reads and the propose/vote/enact flow.

use crate::client::MeridianClient;
use crate::command::{Command, ProposalSubmission, VoteSubmission};
use crate::domain::governance::{Proposal, VoteValue};
use crate::error::SdkError;
use crate::lifecycle::{LifecycleOutcome, ProposalLifecycleManager};
use crate::shared::{ProposalId, Reference};
use crate::submission::{SubmissionCoordinator, SubmissionOutcome};

/// Sub-client for governance operations.
pub struct Governance<'a> {
    pub(crate) client: &'a MeridianClient,
}

impl<'a> Governance<'a> {
    pub async fn list(&self) -> Result<Vec<Proposal>, SdkError> {
        Ok(self
            .client
            .http
            .get_proposals()
            .await?
            .data
            .into_iter()
            .map(|d| d.proposal)
            .collect())
    }

    pub async fn get(&self, id: &ProposalId) -> Result<Option<Proposal>, SdkError> {
        Ok(self
            .client
            .http
            .get_proposal(id)
            .await?
            .map(|envelope| envelope.data.proposal))
    }

    /// Look up a proposal by the reference assigned at preparation time.
    /// The only lookup key until the network assigns an id.
    pub async fn by_reference(
        &self,
        reference: &Reference,
    ) -> Result<Option<Proposal>, SdkError> {
        Ok(self
            .client
            .http
            .get_proposal_by_reference(reference)
            .await?
            .map(|envelope| envelope.data.proposal))
    }

    /// Submit a proposal. Comes back as [`SubmissionOutcome::Submitted`] with
    /// the preparation-time reference; use [`Self::by_reference`] or
    /// [`Self::propose_and_enact`] to follow it further.
    pub async fn propose(
        &self,
        proposal: ProposalSubmission,
    ) -> Result<SubmissionOutcome, SdkError> {
        self.run(Command::ProposalSubmission(proposal)).await
    }

    /// Vote on an open proposal.
    pub async fn vote(&self, vote: VoteSubmission) -> Result<SubmissionOutcome, SdkError> {
        self.run(Command::Vote(vote)).await
    }

    /// Run the full propose → vote → enact lifecycle, voting yes.
    pub async fn propose_and_enact(
        &self,
        proposal: ProposalSubmission,
    ) -> Result<LifecycleOutcome, SdkError> {
        self.propose_and_enact_with_vote(proposal, VoteValue::Yes)
            .await
    }

    pub async fn propose_and_enact_with_vote(
        &self,
        proposal: ProposalSubmission,
        vote: VoteValue,
    ) -> Result<LifecycleOutcome, SdkError> {
        let party = self.client.session_key().await?;
        let poller = self.client.poller();
        let manager =
            ProposalLifecycleManager::new(&self.client.http, &self.client.wallet_http, &poller)
                .with_vote(vote);
        Ok(manager.run(proposal, &party).await)
    }

    async fn run(&self, command: Command) -> Result<SubmissionOutcome, SdkError> {
        let party = self.client.session_key().await?;
        let poller = self.client.poller();
        let coordinator =
            SubmissionCoordinator::new(&self.client.http, &self.client.wallet_http, &poller);
        Ok(coordinator.submit(&command, &party).await)
    }
}
