//! Domain commands and their builders.
//!
//! Construction is pure — no I/O — and every command is validated before it
//! can exist, so an invalid command is never prepared, signed or submitted.
//! Derived fields (absolute expiries, governance timestamps) are computed
//! from a caller-supplied [`LedgerTime`], never from the local wall clock.

use std::time::Duration;

use serde::Serialize;

use crate::domain::governance::VoteValue;
use crate::domain::network::LedgerTime;
use crate::domain::order::{OrderType, PeggedOrder, TimeInForce};
use crate::error::CommandError;
use crate::shared::{serde_util, AssetId, MarketId, OrderId, ProposalId, Reference, Side};

// ─── Command ─────────────────────────────────────────────────────────────────

/// A write command, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    OrderSubmission(OrderSubmission),
    OrderAmendment(OrderAmendment),
    OrderCancellation(OrderCancellation),
    ProposalSubmission(ProposalSubmission),
    Vote(VoteSubmission),
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::OrderSubmission(_) => "order submission",
            Command::OrderAmendment(_) => "order amendment",
            Command::OrderCancellation(_) => "order cancellation",
            Command::ProposalSubmission(_) => "proposal submission",
            Command::Vote(_) => "vote",
        }
    }

    /// The confirmation lookup key, if the command has one.
    ///
    /// Submissions are found by the reference assigned at preparation time;
    /// amendments and single-order cancellations by the existing order id.
    /// Broad cancellations, proposals and votes have no single entity to
    /// poll — their confirmation belongs to the caller.
    pub(crate) fn lookup_key(&self, prepared_reference: Option<&Reference>) -> Option<String> {
        match self {
            Command::OrderSubmission(_) => prepared_reference.map(|r| r.as_str().to_string()),
            Command::OrderAmendment(a) => Some(a.order_id.as_str().to_string()),
            Command::OrderCancellation(c) => {
                c.order_id.as_ref().map(|id| id.as_str().to_string())
            }
            Command::ProposalSubmission(_) | Command::Vote(_) => None,
        }
    }
}

// ─── OrderSubmission ─────────────────────────────────────────────────────────

/// A validated order submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub market_id: MarketId,
    pub side: Side,
    /// Market-scaled integer price, as a string.
    pub price: String,
    #[serde(with = "serde_util::string_u64")]
    pub size: u64,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(with = "serde_util::opt_string_i64", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pegged_order: Option<PeggedOrder>,
}

impl OrderSubmission {
    pub fn builder(market_id: MarketId, side: Side) -> OrderSubmissionBuilder {
        OrderSubmissionBuilder {
            market_id,
            side,
            price: String::new(),
            size: 0,
            time_in_force: TimeInForce::Gtc,
            order_type: OrderType::Limit,
            expiry: None,
            ledger_time: None,
            pegged_order: None,
        }
    }
}

enum Expiry {
    At(i64),
    In(Duration),
}

pub struct OrderSubmissionBuilder {
    market_id: MarketId,
    side: Side,
    price: String,
    size: u64,
    time_in_force: TimeInForce,
    order_type: OrderType,
    expiry: Option<Expiry>,
    ledger_time: Option<LedgerTime>,
    pegged_order: Option<PeggedOrder>,
}

impl OrderSubmissionBuilder {
    pub fn price(mut self, price: &str) -> Self {
        self.price = price.to_string();
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Absolute expiry, in ledger nanoseconds.
    pub fn expires_at(mut self, nanos: i64) -> Self {
        self.expiry = Some(Expiry::At(nanos));
        self
    }

    /// Expiry relative to the ledger time supplied via [`Self::ledger_time`].
    pub fn expires_in(mut self, offset: Duration) -> Self {
        self.expiry = Some(Expiry::In(offset));
        self
    }

    /// Current ledger time, required to resolve a relative expiry.
    pub fn ledger_time(mut self, now: LedgerTime) -> Self {
        self.ledger_time = Some(now);
        self
    }

    pub fn pegged(mut self, pegged: PeggedOrder) -> Self {
        self.pegged_order = Some(pegged);
        self
    }

    pub fn build(self) -> Result<OrderSubmission, CommandError> {
        if self.market_id.is_empty() {
            return Err(CommandError::EmptyMarket);
        }
        if self.size == 0 {
            return Err(CommandError::ZeroSize);
        }
        if self.price.is_empty() && self.order_type == OrderType::Limit {
            return Err(CommandError::EmptyPrice);
        }

        let expires_at = match (self.time_in_force, self.expiry) {
            (TimeInForce::Gtt, None) => return Err(CommandError::MissingExpiry),
            (_, None) => None,
            (_, Some(Expiry::At(nanos))) => Some(nanos),
            (_, Some(Expiry::In(offset))) => Some(
                self.ledger_time
                    .ok_or(CommandError::MissingLedgerTime)?
                    .plus(offset)
                    .nanos(),
            ),
        };

        Ok(OrderSubmission {
            market_id: self.market_id,
            side: self.side,
            price: self.price,
            size: self.size,
            time_in_force: self.time_in_force,
            order_type: self.order_type,
            expires_at,
            pegged_order: self.pegged_order,
        })
    }
}

// ─── OrderAmendment ──────────────────────────────────────────────────────────

/// Price wrapper used by the amendment wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendPrice {
    pub value: String,
}

/// A validated order amendment. At least one field changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAmendment {
    pub order_id: OrderId,
    pub market_id: MarketId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<AmendPrice>,
    #[serde(with = "serde_util::opt_string_i64", skip_serializing_if = "Option::is_none")]
    pub size_delta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(with = "serde_util::opt_string_i64", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pegged_order: Option<PeggedOrder>,
}

impl OrderAmendment {
    pub fn builder(order_id: OrderId, market_id: MarketId) -> OrderAmendmentBuilder {
        OrderAmendmentBuilder {
            order_id,
            market_id,
            price: None,
            size_delta: None,
            time_in_force: None,
            expires_at: None,
            pegged_order: None,
        }
    }
}

pub struct OrderAmendmentBuilder {
    order_id: OrderId,
    market_id: MarketId,
    price: Option<AmendPrice>,
    size_delta: Option<i64>,
    time_in_force: Option<TimeInForce>,
    expires_at: Option<i64>,
    pegged_order: Option<PeggedOrder>,
}

impl OrderAmendmentBuilder {
    pub fn price(mut self, price: &str) -> Self {
        self.price = Some(AmendPrice {
            value: price.to_string(),
        });
        self
    }

    /// Change in size; negative shrinks the order.
    pub fn size_delta(mut self, delta: i64) -> Self {
        self.size_delta = Some(delta);
        self
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn expires_at(mut self, nanos: i64) -> Self {
        self.expires_at = Some(nanos);
        self
    }

    pub fn pegged(mut self, pegged: PeggedOrder) -> Self {
        self.pegged_order = Some(pegged);
        self
    }

    pub fn build(self) -> Result<OrderAmendment, CommandError> {
        if self.order_id.is_empty() {
            return Err(CommandError::EmptyOrderId);
        }
        if self.market_id.is_empty() {
            return Err(CommandError::EmptyMarket);
        }
        if self.price.is_none()
            && self.size_delta.is_none()
            && self.time_in_force.is_none()
            && self.expires_at.is_none()
            && self.pegged_order.is_none()
        {
            return Err(CommandError::EmptyAmendment);
        }

        Ok(OrderAmendment {
            order_id: self.order_id,
            market_id: self.market_id,
            price: self.price,
            size_delta: self.size_delta,
            time_in_force: self.time_in_force,
            expires_at: self.expires_at,
            pegged_order: self.pegged_order,
        })
    }
}

// ─── OrderCancellation ───────────────────────────────────────────────────────

/// A validated order cancellation.
///
/// Scope is set by the fields present: order id + market cancels one order,
/// market alone cancels every order the party has on that market, and both
/// absent cancels every order the party has on every market — a deliberate,
/// distinct scope, constructed only through [`OrderCancellation::all_for_party`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancellation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) order_id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) market_id: Option<MarketId>,
}

impl OrderCancellation {
    /// Cancel a single order.
    pub fn single(order_id: OrderId, market_id: MarketId) -> Result<Self, CommandError> {
        Self::from_parts(Some(order_id), Some(market_id))
    }

    /// Cancel every order the party has on one market.
    pub fn market(market_id: MarketId) -> Result<Self, CommandError> {
        Self::from_parts(None, Some(market_id))
    }

    /// Cancel every order the party has, on every market.
    pub fn all_for_party() -> Self {
        Self {
            order_id: None,
            market_id: None,
        }
    }

    /// Build a cancellation from optional parts. An order id without its
    /// market is rejected: the ledger routes single-order cancellations by
    /// market.
    pub fn from_parts(
        order_id: Option<OrderId>,
        market_id: Option<MarketId>,
    ) -> Result<Self, CommandError> {
        if let Some(id) = &order_id {
            if id.is_empty() {
                return Err(CommandError::EmptyOrderId);
            }
            if market_id.is_none() {
                return Err(CommandError::OrderWithoutMarket);
            }
        }
        if let Some(market) = &market_id {
            if market.is_empty() {
                return Err(CommandError::EmptyMarket);
            }
        }
        Ok(Self {
            order_id,
            market_id,
        })
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn market_id(&self) -> Option<&MarketId> {
        self.market_id.as_ref()
    }
}

// ─── ProposalSubmission ──────────────────────────────────────────────────────

/// Instrument configuration for a market-creation proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentConfiguration {
    pub name: String,
    pub code: String,
    pub quote_name: String,
    pub future: FutureProduct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FutureProduct {
    /// Settlement asset identifier.
    pub asset: AssetId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketChanges {
    pub instrument: InstrumentConfiguration,
    #[serde(with = "serde_util::string_u64")]
    pub decimal_places: u64,
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkParameterChange {
    pub key: String,
    pub value: String,
}

/// What a proposal changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalTerms {
    NewMarket { changes: NewMarketChanges },
    UpdateNetworkParameter { changes: NetworkParameterChange },
}

/// A validated governance proposal submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSubmission {
    /// Seconds precision, per the governance wire format.
    pub validation_timestamp: i64,
    pub closing_timestamp: i64,
    pub enactment_timestamp: i64,
    #[serde(flatten)]
    pub terms: ProposalTerms,
}

impl ProposalSubmission {
    pub fn builder(terms: ProposalTerms) -> ProposalSubmissionBuilder {
        ProposalSubmissionBuilder {
            terms,
            validation_offset: Duration::from_secs(1),
            closing_offset: Duration::from_secs(15),
            enactment_offset: Duration::from_secs(20),
        }
    }
}

pub struct ProposalSubmissionBuilder {
    terms: ProposalTerms,
    validation_offset: Duration,
    closing_offset: Duration,
    enactment_offset: Duration,
}

impl ProposalSubmissionBuilder {
    /// How long after `now` validation may run.
    pub fn validation_offset(mut self, offset: Duration) -> Self {
        self.validation_offset = offset;
        self
    }

    /// How long after `now` voting closes.
    pub fn closing_offset(mut self, offset: Duration) -> Self {
        self.closing_offset = offset;
        self
    }

    /// How long after `now` the change takes effect, if passed.
    pub fn enactment_offset(mut self, offset: Duration) -> Self {
        self.enactment_offset = offset;
        self
    }

    pub fn build(self, now: LedgerTime) -> Result<ProposalSubmission, CommandError> {
        if let ProposalTerms::UpdateNetworkParameter { changes } = &self.terms {
            if changes.key.is_empty() {
                return Err(CommandError::EmptyParameterKey);
            }
        }

        let base = now.seconds();
        let validation = base + self.validation_offset.as_secs() as i64;
        let closing = base + self.closing_offset.as_secs() as i64;
        let enactment = base + self.enactment_offset.as_secs() as i64;
        if !(validation < closing && closing <= enactment) {
            return Err(CommandError::UnorderedTimestamps);
        }

        Ok(ProposalSubmission {
            validation_timestamp: validation,
            closing_timestamp: closing,
            enactment_timestamp: enactment,
            terms: self.terms,
        })
    }
}

// ─── VoteSubmission ──────────────────────────────────────────────────────────

/// A validated vote on an open proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteSubmission {
    #[serde(rename = "proposalID")]
    pub proposal_id: ProposalId,
    pub value: VoteValue,
    /// Ledger time of the vote, seconds precision.
    pub timestamp: i64,
}

impl VoteSubmission {
    pub fn new(
        proposal_id: ProposalId,
        value: VoteValue,
        now: LedgerTime,
    ) -> Result<Self, CommandError> {
        if proposal_id.is_empty() {
            return Err(CommandError::EmptyProposalId);
        }
        Ok(Self {
            proposal_id,
            value,
            timestamp: now.seconds(),
        })
    }
}
