//! The governance proposal lifecycle: propose, vote, enact.
//!
//! A proposal is not one write but a choreography of phases, each gated on
//! an eventually-consistent observation of the previous one. The manager
//! runs them in order and halts at the first phase that fails — a rejected
//! proposal is dead, never "still pending".

use std::fmt;

use tracing;

use crate::command::{Command, ProposalSubmission, VoteSubmission};
use crate::domain::governance::{Proposal, ProposalState, VoteValue};
use crate::error::HttpError;
use crate::http::LedgerApi;
use crate::poll::{Classification, Clock, PollOutcome, Poller, SystemClock};
use crate::shared::{ProposalId, PubKey, Reference};
use crate::submission::{SubmissionCoordinator, SubmissionOutcome};
use crate::wallet::Signer;

// ─── Phase ───────────────────────────────────────────────────────────────────

/// One phase of the proposal lifecycle, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Preparing, signing and propagating the proposal itself.
    Submission,
    /// Waiting for the network to accept the proposal and assign it an id.
    NetworkAcceptance,
    /// Preparing, signing and propagating the vote.
    VoteSubmission,
    /// Waiting for the voting period to resolve.
    VotePeriod,
    /// Waiting for the enacted change to become observable.
    Enactment,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Submission => "submission",
            Phase::NetworkAcceptance => "network acceptance",
            Phase::VoteSubmission => "vote submission",
            Phase::VotePeriod => "vote period",
            Phase::Enactment => "enactment",
        };
        f.write_str(name)
    }
}

// ─── Context & outcome ───────────────────────────────────────────────────────

/// Where a lifecycle run stood when it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleContext {
    /// Reference assigned at preparation time, once known.
    pub reference: Option<Reference>,
    /// Network-assigned id, once the proposal was accepted.
    pub proposal_id: Option<ProposalId>,
    /// The phase that was running.
    pub phase: Phase,
}

/// Outcome of a full lifecycle run.
#[must_use]
#[derive(Debug)]
pub enum LifecycleOutcome {
    /// The proposal passed its vote and the change took effect.
    Enacted { proposal_id: ProposalId },
    /// A phase failed or timed out; later phases never ran.
    FailedAtPhase {
        context: LifecycleContext,
        reason: String,
    },
}

// ─── Manager ─────────────────────────────────────────────────────────────────

/// Runs a proposal through submission, voting and enactment.
pub struct ProposalLifecycleManager<'a, L, S, C = SystemClock> {
    ledger: &'a L,
    signer: &'a S,
    poller: &'a Poller<C>,
    vote_value: VoteValue,
}

impl<'a, L, S, C> ProposalLifecycleManager<'a, L, S, C>
where
    L: LedgerApi,
    S: Signer,
    C: Clock,
{
    /// Votes [`VoteValue::Yes`] unless overridden with [`Self::with_vote`].
    pub fn new(ledger: &'a L, signer: &'a S, poller: &'a Poller<C>) -> Self {
        Self {
            ledger,
            signer,
            poller,
            vote_value: VoteValue::Yes,
        }
    }

    pub fn with_vote(mut self, value: VoteValue) -> Self {
        self.vote_value = value;
        self
    }

    /// Run the full lifecycle for `proposal`, attributed to `party`.
    ///
    /// Each polled phase gets the poller's full deadline budget; the phases
    /// do not share one.
    pub async fn run(&self, proposal: ProposalSubmission, party: &PubKey) -> LifecycleOutcome {
        let mut context = LifecycleContext {
            reference: None,
            proposal_id: None,
            phase: Phase::Submission,
        };
        let coordinator = SubmissionCoordinator::new(self.ledger, self.signer, self.poller);

        // Phase 1: propagate the proposal.
        let reference = match coordinator
            .submit(&Command::ProposalSubmission(proposal), party)
            .await
        {
            SubmissionOutcome::Submitted {
                reference: Some(reference),
            } => reference,
            SubmissionOutcome::Submitted { reference: None } => {
                return self.fail(context, "prepared proposal carried no reference".to_string());
            }
            SubmissionOutcome::Failed { reason } => return self.fail(context, reason),
            SubmissionOutcome::Confirmed(_) | SubmissionOutcome::TimedOut { .. } => {
                return self.fail(context, "unexpected submission outcome".to_string());
            }
        };
        context.reference = Some(reference.clone());

        // Phase 2: wait for the network to assign an id.
        context.phase = Phase::NetworkAcceptance;
        tracing::info!(reference = %reference, "waiting for network acceptance");
        let accepted = self
            .poller
            .poll(
                || self.ledger.proposal_by_reference(&reference),
                |proposal: &Proposal| {
                    if proposal.state.is_terminal_failure() {
                        Classification::Failure
                    } else if !proposal.id.is_empty() {
                        Classification::Success
                    } else {
                        Classification::Pending
                    }
                },
            )
            .await;
        let proposal_id = match accepted {
            PollOutcome::Confirmed(proposal) => proposal.id,
            PollOutcome::Rejected(proposal) => {
                let reason = rejection_reason(&proposal);
                return self.fail(context, reason);
            }
            PollOutcome::TimedOut { attempts } => {
                return self.fail(context, timeout_reason(attempts));
            }
            PollOutcome::Failed { reason } => return self.fail(context, reason),
        };
        context.proposal_id = Some(proposal_id.clone());
        tracing::info!(proposal_id = %proposal_id, "proposal accepted by the network");

        // Phase 3: vote on the now-identified proposal.
        context.phase = Phase::VoteSubmission;
        let now = match self.ledger.ledger_time().await {
            Ok(now) => now,
            Err(e) => return self.fail(context, format!("ledger time unavailable: {}", e)),
        };
        let vote = match VoteSubmission::new(proposal_id.clone(), self.vote_value, now) {
            Ok(vote) => vote,
            Err(e) => return self.fail(context, e.to_string()),
        };
        match coordinator.submit(&Command::Vote(vote), party).await {
            SubmissionOutcome::Submitted { .. } => {}
            SubmissionOutcome::Failed { reason } => return self.fail(context, reason),
            SubmissionOutcome::Confirmed(_) | SubmissionOutcome::TimedOut { .. } => {
                return self.fail(context, "unexpected vote outcome".to_string());
            }
        }

        // Phase 4: wait for the vote period to resolve.
        context.phase = Phase::VotePeriod;
        tracing::info!(proposal_id = %proposal_id, "waiting for the vote period");
        let resolved = self
            .poller
            .poll(
                || self.ledger.proposal_by_id(&proposal_id),
                |proposal: &Proposal| match proposal.state {
                    ProposalState::Passed | ProposalState::Enacted => Classification::Success,
                    state if state.is_terminal_failure() => Classification::Failure,
                    _ => Classification::Pending,
                },
            )
            .await;
        match resolved {
            PollOutcome::Confirmed(_) => {}
            PollOutcome::Rejected(proposal) => {
                let reason = rejection_reason(&proposal);
                return self.fail(context, reason);
            }
            PollOutcome::TimedOut { attempts } => {
                return self.fail(context, timeout_reason(attempts));
            }
            PollOutcome::Failed { reason } => return self.fail(context, reason),
        }

        // Phase 5: wait for the enacted change to become observable. A
        // market created by governance is listed under the proposal's id.
        context.phase = Phase::Enactment;
        tracing::info!(proposal_id = %proposal_id, "waiting for enactment");
        let enacted = self
            .poller
            .poll(
                || async {
                    let ids = self.ledger.market_ids().await?;
                    Ok::<_, HttpError>(
                        ids.into_iter()
                            .find(|id| id.as_str() == proposal_id.as_str()),
                    )
                },
                |_| Classification::Success,
            )
            .await;
        match enacted {
            PollOutcome::Confirmed(_) => {
                tracing::info!(proposal_id = %proposal_id, "proposal enacted");
                LifecycleOutcome::Enacted { proposal_id }
            }
            PollOutcome::Rejected(_) => {
                self.fail(context, "unexpected enactment outcome".to_string())
            }
            PollOutcome::TimedOut { attempts } => self.fail(context, timeout_reason(attempts)),
            PollOutcome::Failed { reason } => self.fail(context, reason),
        }
    }

    fn fail(&self, context: LifecycleContext, reason: String) -> LifecycleOutcome {
        tracing::warn!(phase = %context.phase, reason = %reason, "proposal lifecycle halted");
        LifecycleOutcome::FailedAtPhase { context, reason }
    }
}

fn rejection_reason(proposal: &Proposal) -> String {
    match &proposal.reason {
        Some(reason) => format!("proposal {:?}: {}", proposal.state, reason),
        None => format!("proposal {:?}", proposal.state),
    }
}

fn timeout_reason(attempts: u32) -> String {
    format!("timed out after {} polls", attempts)
}
