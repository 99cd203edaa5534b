//! The write pipeline: prepare, sign, submit, confirm.
//!
//! [`SubmissionCoordinator`] owns the full lifecycle of one command. It never
//! inspects or alters the prepared blob, and it reports timeouts and
//! rejections through [`SubmissionOutcome`] instead of errors — an order the
//! network rejected *was* confirmed, just not in the state the caller hoped.

use tracing;

use crate::command::Command;
use crate::domain::order::Order;
use crate::http::LedgerApi;
use crate::poll::{Classification, Clock, PollOutcome, Poller, SystemClock};
use crate::shared::{PubKey, Reference};
use crate::wallet::{Signer, TransactionEnvelope};

/// Outcome of submitting one command.
#[must_use]
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The order reached a settled state within the deadline. Inspect
    /// [`Order::status`] — a rejected order is confirmed too.
    Confirmed(Order),
    /// The command was accepted for propagation but has no single entity to
    /// poll (proposals, votes, broad cancellations). Confirmation belongs to
    /// the caller; the preparation-time reference is carried when one exists.
    Submitted { reference: Option<Reference> },
    /// The deadline elapsed with the entity still unconfirmed. The command
    /// may yet land — the caller decides whether to re-query or escalate.
    TimedOut { attempts: u32 },
    /// Preparation, signing or reading failed; the pipeline stopped at the
    /// failing stage.
    Failed { reason: String },
}

/// Drives a command through prepare → sign → confirm.
pub struct SubmissionCoordinator<'a, L, S, C = SystemClock> {
    ledger: &'a L,
    signer: &'a S,
    poller: &'a Poller<C>,
}

impl<'a, L, S, C> SubmissionCoordinator<'a, L, S, C>
where
    L: LedgerApi,
    S: Signer,
    C: Clock,
{
    pub fn new(ledger: &'a L, signer: &'a S, poller: &'a Poller<C>) -> Self {
        Self {
            ledger,
            signer,
            poller,
        }
    }

    /// Submit `command` on behalf of `party` and wait for confirmation.
    pub async fn submit(&self, command: &Command, party: &PubKey) -> SubmissionOutcome {
        tracing::info!(kind = command.kind(), party = %party, "submitting command");

        let prepared = match self.ledger.prepare_command(command, party).await {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(kind = command.kind(), error = %e, "command preparation failed");
                return SubmissionOutcome::Failed {
                    reason: format!("preparation failed: {}", e),
                };
            }
        };

        let envelope = TransactionEnvelope {
            tx: prepared.blob.clone(),
            pub_key: party.clone(),
            propagate: true,
        };
        if let Err(e) = self.signer.sign(&envelope).await {
            tracing::warn!(kind = command.kind(), error = %e, "signing failed");
            return SubmissionOutcome::Failed {
                reason: format!("signing failed: {}", e),
            };
        }

        let key = match command.lookup_key(prepared.reference.as_ref()) {
            Some(key) => key,
            None => {
                tracing::debug!(kind = command.kind(), "command has no pollable entity");
                return SubmissionOutcome::Submitted {
                    reference: prepared.reference,
                };
            }
        };

        let outcome = self
            .poller
            .poll(
                || self.ledger.order_by_key(&key),
                |order: &Order| {
                    if order.status.is_settled() {
                        Classification::Success
                    } else {
                        Classification::Pending
                    }
                },
            )
            .await;

        match outcome {
            PollOutcome::Confirmed(order) | PollOutcome::Rejected(order) => {
                tracing::info!(order_id = %order.id, status = ?order.status, "order confirmed");
                SubmissionOutcome::Confirmed(order)
            }
            PollOutcome::TimedOut { attempts } => {
                tracing::warn!(key = %key, attempts, "confirmation timed out");
                SubmissionOutcome::TimedOut { attempts }
            }
            PollOutcome::Failed { reason } => {
                tracing::warn!(key = %key, reason = %reason, "confirmation failed");
                SubmissionOutcome::Failed { reason }
            }
        }
    }
}
