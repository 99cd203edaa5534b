//! Proposal lifecycle tests against a scripted ledger and wallet.
//!
//! Each scenario scripts what the read API reports per phase and checks that
//! the manager advances, halts, or times out exactly where it should.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use meridian_sdk::command::{
    Command, FutureProduct, InstrumentConfiguration, NewMarketChanges, ProposalSubmission,
    ProposalTerms,
};
use meridian_sdk::domain::governance::{Proposal, ProposalState};
use meridian_sdk::domain::network::LedgerTime;
use meridian_sdk::domain::order::Order;
use meridian_sdk::error::{HttpError, WalletError};
use meridian_sdk::http::{LedgerApi, PreparedCommand};
use meridian_sdk::lifecycle::{LifecycleOutcome, Phase, ProposalLifecycleManager};
use meridian_sdk::poll::{ManualClock, PollOptions, Poller};
use meridian_sdk::shared::{AssetId, MarketId, ProposalId, PubKey, Reference};
use meridian_sdk::wallet::{SignedTransaction, Signer, TransactionEnvelope};

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeLedger {
    /// Scripted answers per lookup, popped front-first; an empty queue
    /// answers "not found" (or "no markets").
    by_reference: Mutex<VecDeque<Result<Option<Proposal>, HttpError>>>,
    by_id: Mutex<VecDeque<Result<Option<Proposal>, HttpError>>>,
    markets: Mutex<VecDeque<Result<Vec<MarketId>, HttpError>>>,
    reference_polls: Mutex<u32>,
    id_polls: Mutex<u32>,
    market_polls: Mutex<u32>,
    prepared: Mutex<Vec<&'static str>>,
    reference: Option<&'static str>,
}

impl FakeLedger {
    fn with_reference(reference: &'static str) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    fn script_reference(&self, response: Option<Proposal>) {
        self.by_reference.lock().unwrap().push_back(Ok(response));
    }

    fn script_id(&self, response: Option<Proposal>) {
        self.by_id.lock().unwrap().push_back(Ok(response));
    }

    fn script_markets(&self, ids: Vec<MarketId>) {
        self.markets.lock().unwrap().push_back(Ok(ids));
    }
}

impl LedgerApi for FakeLedger {
    async fn prepare_command(
        &self,
        command: &Command,
        _party: &PubKey,
    ) -> Result<PreparedCommand, HttpError> {
        self.prepared.lock().unwrap().push(command.kind());
        Ok(PreparedCommand {
            blob: format!("blob:{}", command.kind()),
            reference: self.reference.map(Reference::from),
        })
    }

    async fn order_by_key(&self, _key: &str) -> Result<Option<Order>, HttpError> {
        Ok(None)
    }

    async fn proposal_by_reference(
        &self,
        _reference: &Reference,
    ) -> Result<Option<Proposal>, HttpError> {
        *self.reference_polls.lock().unwrap() += 1;
        self.by_reference
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn proposal_by_id(&self, _id: &ProposalId) -> Result<Option<Proposal>, HttpError> {
        *self.id_polls.lock().unwrap() += 1;
        self.by_id.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn market_ids(&self) -> Result<Vec<MarketId>, HttpError> {
        *self.market_polls.lock().unwrap() += 1;
        self.markets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn ledger_time(&self) -> Result<LedgerTime, HttpError> {
        Ok(LedgerTime::from_nanos(1_614_776_400_000_000_000))
    }
}

#[derive(Default)]
struct FakeSigner {
    signed: Mutex<Vec<TransactionEnvelope>>,
}

impl Signer for FakeSigner {
    async fn sign(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SignedTransaction, WalletError> {
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

fn proposal(id: &str, reference: &str, state: ProposalState) -> Proposal {
    Proposal {
        id: ProposalId::from(id),
        reference: Reference::from(reference),
        party_id: PubKey::from("party-key"),
        state,
        reason: None,
    }
}

fn market_proposal() -> ProposalSubmission {
    let terms = ProposalTerms::NewMarket {
        changes: NewMarketChanges {
            instrument: InstrumentConfiguration {
                name: "BTC/DAI".to_string(),
                code: "CRYPTO:BTCDAI".to_string(),
                quote_name: "DAI".to_string(),
                future: FutureProduct {
                    asset: AssetId::from("dai-id"),
                    maturity: None,
                },
            },
            decimal_places: 5,
            metadata: Vec::new(),
        },
    };
    ProposalSubmission::builder(terms)
        .build(LedgerTime::from_nanos(1_614_776_400_000_000_000))
        .unwrap()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_lifecycle_enacts() {
    let ledger = FakeLedger::with_reference("prop-ref");
    let signer = FakeSigner::default();
    let clock = Arc::new(ManualClock::new());
    let poller = Poller::with_clock(options(), clock.clone());
    let manager = ProposalLifecycleManager::new(&ledger, &signer, &poller);

    // Acceptance: invisible on the first poll, identified on the second.
    ledger.script_reference(None);
    ledger.script_reference(Some(proposal("p1", "prop-ref", ProposalState::Open)));
    // Vote period: open for three polls, then passed.
    ledger.script_id(Some(proposal("p1", "prop-ref", ProposalState::Open)));
    ledger.script_id(Some(proposal("p1", "prop-ref", ProposalState::Open)));
    ledger.script_id(Some(proposal("p1", "prop-ref", ProposalState::Open)));
    ledger.script_id(Some(proposal("p1", "prop-ref", ProposalState::Passed)));
    // Enactment: the market is listed under the proposal's id right away.
    ledger.script_markets(vec![MarketId::from("other"), MarketId::from("p1")]);

    match manager.run(market_proposal(), &PubKey::from("party-key")).await {
        LifecycleOutcome::Enacted { proposal_id } => {
            assert_eq!(proposal_id, ProposalId::from("p1"));
        }
        other => panic!("expected Enacted, got {:?}", other),
    }

    // One write per phase that writes: the proposal, then the vote.
    assert_eq!(
        *ledger.prepared.lock().unwrap(),
        vec!["proposal submission", "vote"]
    );
    let signed = signer.signed.lock().unwrap();
    assert_eq!(signed.len(), 2);
    assert_eq!(signed[1].tx, "blob:vote");

    // 2 acceptance polls + 4 vote-period polls + 1 enactment poll.
    assert_eq!(*ledger.reference_polls.lock().unwrap(), 2);
    assert_eq!(*ledger.id_polls.lock().unwrap(), 4);
    assert_eq!(*ledger.market_polls.lock().unwrap(), 1);
    assert_eq!(clock.elapsed(), Duration::from_millis(700));
}

#[tokio::test]
async fn test_rejected_proposal_is_terminal() {
    let ledger = FakeLedger::with_reference("prop-ref");
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let manager = ProposalLifecycleManager::new(&ledger, &signer, &poller);

    ledger.script_reference(Some(proposal("p1", "prop-ref", ProposalState::Open)));
    let mut rejected = proposal("p1", "prop-ref", ProposalState::Rejected);
    rejected.reason = Some("invalid instrument".to_string());
    ledger.script_id(Some(rejected));

    match manager.run(market_proposal(), &PubKey::from("party-key")).await {
        LifecycleOutcome::FailedAtPhase { context, reason } => {
            assert_eq!(context.phase, Phase::VotePeriod);
            assert_eq!(context.proposal_id, Some(ProposalId::from("p1")));
            assert!(reason.contains("invalid instrument"), "reason: {}", reason);
        }
        other => panic!("expected FailedAtPhase, got {:?}", other),
    }
    // Enactment never ran.
    assert_eq!(*ledger.market_polls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_rejection_at_validation_halts_before_voting() {
    let ledger = FakeLedger::with_reference("prop-ref");
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let manager = ProposalLifecycleManager::new(&ledger, &signer, &poller);

    ledger.script_reference(Some(proposal("", "prop-ref", ProposalState::Rejected)));

    match manager.run(market_proposal(), &PubKey::from("party-key")).await {
        LifecycleOutcome::FailedAtPhase { context, .. } => {
            assert_eq!(context.phase, Phase::NetworkAcceptance);
        }
        other => panic!("expected FailedAtPhase, got {:?}", other),
    }
    // No vote was prepared or signed.
    assert_eq!(*ledger.prepared.lock().unwrap(), vec!["proposal submission"]);
    assert_eq!(signer.signed.lock().unwrap().len(), 1);
    assert_eq!(*ledger.id_polls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_acceptance_timeout_halts_later_phases() {
    let ledger = FakeLedger::with_reference("prop-ref");
    let signer = FakeSigner::default();
    let clock = Arc::new(ManualClock::new());
    let poll_options =
        PollOptions::new(Duration::from_millis(500), Duration::from_millis(100), 3).unwrap();
    let poller = Poller::with_clock(poll_options, clock.clone());
    let manager = ProposalLifecycleManager::new(&ledger, &signer, &poller);

    // The proposal never becomes visible by reference.
    match manager.run(market_proposal(), &PubKey::from("party-key")).await {
        LifecycleOutcome::FailedAtPhase { context, reason } => {
            assert_eq!(context.phase, Phase::NetworkAcceptance);
            assert_eq!(context.reference, Some(Reference::from("prop-ref")));
            assert!(reason.contains("timed out"), "reason: {}", reason);
        }
        other => panic!("expected FailedAtPhase, got {:?}", other),
    }
    assert_eq!(*ledger.reference_polls.lock().unwrap(), 5);
    assert_eq!(*ledger.id_polls.lock().unwrap(), 0);
    assert_eq!(*ledger.market_polls.lock().unwrap(), 0);
    assert_eq!(clock.elapsed(), Duration::from_millis(500));
}

#[tokio::test]
async fn test_missing_preparation_reference_fails_at_submission() {
    let ledger = FakeLedger::default();
    let signer = FakeSigner::default();
    let poller = Poller::with_clock(options(), ManualClock::new());
    let manager = ProposalLifecycleManager::new(&ledger, &signer, &poller);

    match manager.run(market_proposal(), &PubKey::from("party-key")).await {
        LifecycleOutcome::FailedAtPhase { context, reason } => {
            assert_eq!(context.phase, Phase::Submission);
            assert!(reason.contains("reference"), "reason: {}", reason);
        }
        other => panic!("expected FailedAtPhase, got {:?}", other),
    }
    assert_eq!(*ledger.reference_polls.lock().unwrap(), 0);
}
