//! Write-pipeline tests against a scripted ledger and wallet.
//!
//! The fakes implement the same seams the HTTP clients do, so the
//! coordinator under test runs the real pipeline end to end: prepare, sign,
//! then poll the read API until the order settles.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use meridian_sdk::command::{Command, OrderAmendment, OrderCancellation, OrderSubmission};
use meridian_sdk::domain::governance::Proposal;
use meridian_sdk::domain::network::LedgerTime;
use meridian_sdk::domain::order::{Order, OrderStatus, OrderType, TimeInForce};
use meridian_sdk::error::{HttpError, WalletError};
use meridian_sdk::http::{LedgerApi, PreparedCommand};
use meridian_sdk::poll::{ManualClock, PollOptions, Poller};
use meridian_sdk::shared::{MarketId, OrderId, ProposalId, PubKey, Reference, Side};
use meridian_sdk::submission::{SubmissionCoordinator, SubmissionOutcome};
use meridian_sdk::wallet::{SignedTransaction, Signer, TransactionEnvelope};

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeLedger {
    /// Responses for order lookups, popped front-first. An empty queue
    /// answers "not found".
    orders: Mutex<VecDeque<Result<Option<Order>, HttpError>>>,
    queried_keys: Mutex<Vec<String>>,
    prepared: Mutex<Vec<&'static str>>,
    reference: Option<&'static str>,
    fail_prepare: bool,
}

impl FakeLedger {
    fn with_reference(reference: &'static str) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    fn push_order(&self, order: Order) {
        self.orders.lock().unwrap().push_back(Ok(Some(order)));
    }

    fn push_missing(&self) {
        self.orders.lock().unwrap().push_back(Ok(None));
    }
}

impl LedgerApi for FakeLedger {
    async fn prepare_command(
        &self,
        command: &Command,
        _party: &PubKey,
    ) -> Result<PreparedCommand, HttpError> {
        if self.fail_prepare {
            return Err(HttpError::BadRequest("invalid command".to_string()));
        }
        self.prepared.lock().unwrap().push(command.kind());
        Ok(PreparedCommand {
            blob: format!("blob:{}", command.kind()),
            reference: self.reference.map(Reference::from),
        })
    }

    async fn order_by_key(&self, key: &str) -> Result<Option<Order>, HttpError> {
        self.queried_keys.lock().unwrap().push(key.to_string());
        self.orders.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn proposal_by_reference(
        &self,
        _reference: &Reference,
    ) -> Result<Option<Proposal>, HttpError> {
        Ok(None)
    }

    async fn proposal_by_id(&self, _id: &ProposalId) -> Result<Option<Proposal>, HttpError> {
        Ok(None)
    }

    async fn market_ids(&self) -> Result<Vec<MarketId>, HttpError> {
        Ok(Vec::new())
    }

    async fn ledger_time(&self) -> Result<LedgerTime, HttpError> {
        Ok(LedgerTime::from_nanos(1_614_776_400_000_000_000))
    }
}

#[derive(Default)]
struct FakeSigner {
    refuse: bool,
    signed: Mutex<Vec<TransactionEnvelope>>,
}

impl Signer for FakeSigner {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SignedTransaction, WalletError> {
        if self.refuse {
            return Err(WalletError::SigningRejected("user declined".to_string()));
        }
        self.signed.lock().unwrap().push(envelope.clone());
        Ok(SignedTransaction {
            tx: format!("signed:{}", envelope.tx),
            propagated: envelope.propagate,
        })
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn options() -> PollOptions {
    PollOptions::new(Duration::from_secs(5), Duration::from_millis(100), 3).unwrap()
}

const NOW_NANOS: i64 = 1_614_776_400_000_000_000;

fn order(id: &str, reference: &str, price: &str, version: u64, status: OrderStatus) -> Order {
    Order {
        id: OrderId::from(id),
        market_id: MarketId::from("m1"),
        party_id: PubKey::from("party-key"),
        side: Side::Buy,
        price: price.to_string(),
        size: 10,
        remaining: 10,
        time_in_force: TimeInForce::Gtt,
        order_type: OrderType::Limit,
        status,
        reference: Reference::from(reference),
        version,
        expires_at: Some(NOW_NANOS + 120_000_000_000),
        created_at: Some(NOW_NANOS),
        reason: None,
        pegged_order: None,
    }
}

/// A GTT buy of size 10 at price "1", expiring 120s past the ledger time.
fn submission() -> Command {
    Command::OrderSubmission(
        OrderSubmission::builder(MarketId::from("m1"), Side::Buy)
            .price("1")
            .size(10)
            .time_in_force(TimeInForce::Gtt)
            .expires_in(Duration::from_secs(120))
            .ledger_time(LedgerTime::from_nanos(NOW_NANOS))
            .build()
            .unwrap(),
    )
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_submit_amend_cancel_round_trip() {
    let ledger = FakeLedger::with_reference("ref-1");
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);
    let party = PubKey::from("party-key");

    // Submit: visible and active on the first poll.
    ledger.push_order(order("o1", "ref-1", "1", 1, OrderStatus::Active));
    match coordinator.submit(&submission(), &party).await {
        SubmissionOutcome::Confirmed(o) => {
            assert_eq!(o.price, "1");
            assert_eq!(o.status, OrderStatus::Active);
        }
        other => panic!("expected Confirmed, got {:?}", other),
    }

    // Amend the price; the read model shows the bumped version.
    ledger.push_order(order("o1", "ref-1", "2", 2, OrderStatus::Active));
    let amendment = Command::OrderAmendment(
        OrderAmendment::builder(OrderId::from("o1"), MarketId::from("m1"))
            .price("2")
            .build()
            .unwrap(),
    );
    match coordinator.submit(&amendment, &party).await {
        SubmissionOutcome::Confirmed(o) => {
            assert_eq!(o.price, "2");
            assert_eq!(o.version, 2);
        }
        other => panic!("expected Confirmed, got {:?}", other),
    }

    // Cancel the single order.
    ledger.push_order(order("o1", "ref-1", "2", 2, OrderStatus::Cancelled));
    let cancellation = Command::OrderCancellation(
        OrderCancellation::single(OrderId::from("o1"), MarketId::from("m1")).unwrap(),
    );
    match coordinator.submit(&cancellation, &party).await {
        SubmissionOutcome::Confirmed(o) => assert_eq!(o.status, OrderStatus::Cancelled),
        other => panic!("expected Confirmed, got {:?}", other),
    }

    // The submission polls by reference; amendment and cancellation by id.
    assert_eq!(
        *ledger.queried_keys.lock().unwrap(),
        vec!["ref-1", "o1", "o1"]
    );

    // Every prepared blob went to the wallet unaltered, with propagation on.
    let signed = signer.signed.lock().unwrap();
    assert_eq!(signed.len(), 3);
    assert_eq!(signed[0].tx, "blob:order submission");
    assert_eq!(signed[1].tx, "blob:order amendment");
    assert_eq!(signed[2].tx, "blob:order cancellation");
    assert!(signed.iter().all(|e| e.propagate));
}

#[tokio::test]
async fn test_submission_confirmed_after_read_lag() {
    let ledger = FakeLedger::with_reference("ref-1");
    let signer = FakeSigner::default();
    let clock = Arc::new(ManualClock::new());
    let poller = Poller::with_clock(options(), clock.clone());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);

    // Two polls see nothing; the third sees the settled order.
    ledger.push_missing();
    ledger.push_missing();
    ledger.push_order(order("o1", "ref-1", "1", 1, OrderStatus::Active));

    let outcome = coordinator
        .submit(&submission(), &PubKey::from("party-key"))
        .await;
    assert!(matches!(outcome, SubmissionOutcome::Confirmed(_)));
    assert_eq!(ledger.queried_keys.lock().unwrap().len(), 3);
    // Three polls cost exactly three intervals.
    assert_eq!(clock.elapsed(), Duration::from_millis(300));
}

#[tokio::test]
async fn test_rejected_order_still_confirms() {
    let ledger = FakeLedger::with_reference("ref-1");
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);

    let mut rejected = order("o1", "ref-1", "1", 1, OrderStatus::Rejected);
    rejected.reason = Some("margin check failed".to_string());
    ledger.push_order(rejected);

    match coordinator
        .submit(&submission(), &PubKey::from("party-key"))
        .await
    {
        SubmissionOutcome::Confirmed(o) => {
            assert_eq!(o.status, OrderStatus::Rejected);
            assert_eq!(o.reason.as_deref(), Some("margin check failed"));
        }
        other => panic!("expected Confirmed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_signer_refusal_fails_without_polling() {
    let ledger = FakeLedger::with_reference("ref-1");
    let signer = FakeSigner {
        refuse: true,
        ..FakeSigner::default()
    };
    let poller = Poller::with_clock(options(), ManualClock::new());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);

    match coordinator
        .submit(&submission(), &PubKey::from("party-key"))
        .await
    {
        SubmissionOutcome::Failed { reason } => {
            assert!(reason.contains("signing failed"), "reason: {}", reason);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(ledger.queried_keys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_prepare_failure_stops_the_pipeline() {
    let ledger = FakeLedger {
        fail_prepare: true,
        ..FakeLedger::default()
    };
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);

    match coordinator
        .submit(&submission(), &PubKey::from("party-key"))
        .await
    {
        SubmissionOutcome::Failed { reason } => {
            assert!(reason.contains("preparation failed"), "reason: {}", reason);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(signer.signed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_broad_cancellation_is_submitted_not_polled() {
    let ledger = FakeLedger::with_reference("ref-1");
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);

    let cancel_all = Command::OrderCancellation(OrderCancellation::all_for_party());
    match coordinator
        .submit(&cancel_all, &PubKey::from("party-key"))
        .await
    {
        SubmissionOutcome::Submitted { .. } => {}
        other => panic!("expected Submitted, got {:?}", other),
    }
    assert!(ledger.queried_keys.lock().unwrap().is_empty());
    assert_eq!(signer.signed.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unconfirmed_submission_times_out() {
    let ledger = FakeLedger::with_reference("ref-1");
    let signer = FakeSigner::default();
    let clock = Arc::new(ManualClock::new());
    let poll_options =
        PollOptions::new(Duration::from_secs(1), Duration::from_millis(100), 3).unwrap();
    let poller = Poller::with_clock(poll_options, clock.clone());
    let coordinator = SubmissionCoordinator::new(&ledger, &signer, &poller);

    // The queue stays empty: the order never becomes visible.
    match coordinator
        .submit(&submission(), &PubKey::from("party-key"))
        .await
    {
        SubmissionOutcome::TimedOut { attempts } => assert_eq!(attempts, 10),
        other => panic!("expected TimedOut, got {:?}", other),
    }
    assert_eq!(clock.elapsed(), Duration::from_secs(1));
}
