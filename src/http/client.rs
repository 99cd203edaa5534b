//! Low-level HTTP client — `MeridianHttp`.
//!
//! One method per node endpoint, returning wire types. Internal to the SDK —
//! the high-level client wraps this.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing;

use crate::command::Command;
use crate::domain::account::{AccountsResponse, PositionsResponse};
use crate::domain::asset::{AssetEnvelope, AssetsResponse};
use crate::domain::governance::wire::{ProposalEnvelope, ProposalsResponse};
use crate::domain::governance::Proposal;
use crate::domain::market::wire::{MarketEnvelope, MarketsResponse};
use crate::domain::network::{
    LedgerTime, NetworkParametersResponse, StatisticsResponse, TimeResponse,
};
use crate::domain::order::wire::{OrderEnvelope, OrdersResponse};
use crate::domain::order::Order;
use crate::domain::party::{PartiesResponse, PartyEnvelope};
use crate::domain::trade::TradesResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::http::{
    AmendmentBody, CancellationBody, LedgerApi, PrepareAmendmentRequest,
    PrepareCancellationRequest, PrepareProposalRequest, PrepareResponse,
    PrepareSubmissionRequest, PrepareVoteRequest, PreparedCommand, SubmissionBody, VoteBody,
};
use crate::shared::{MarketId, OrderId, ProposalId, PubKey, Reference};

/// Low-level HTTP client for the ledger node's REST API.
pub struct MeridianHttp {
    base_url: String,
    client: Client,
}

impl MeridianHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub async fn get_markets(&self) -> Result<MarketsResponse, HttpError> {
        let url = format!("{}/markets", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_market(&self, id: &MarketId) -> Result<Option<MarketEnvelope>, HttpError> {
        let url = format!("{}/markets/{}", self.base_url, id.as_str());
        self.get_opt(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_market_orders(&self, id: &MarketId) -> Result<OrdersResponse, HttpError> {
        let url = format!("{}/markets/{}/orders", self.base_url, id.as_str());
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_market_trades(&self, id: &MarketId) -> Result<TradesResponse, HttpError> {
        let url = format!("{}/markets/{}/trades", self.base_url, id.as_str());
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_market_accounts(
        &self,
        id: &MarketId,
    ) -> Result<AccountsResponse, HttpError> {
        let url = format!("{}/markets/{}/accounts", self.base_url, id.as_str());
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    /// Look up an order by reference or order id. Issued from poll loops, so
    /// no request-level retries: the poller owns the re-query schedule.
    pub async fn get_order(&self, key: &str) -> Result<Option<OrderEnvelope>, HttpError> {
        let url = format!("{}/orders/{}", self.base_url, urlencoding::encode(key));
        self.get_opt(&url, RetryPolicy::None).await
    }

    pub async fn get_order_trades(&self, id: &OrderId) -> Result<TradesResponse, HttpError> {
        let url = format!("{}/orders/{}/trades", self.base_url, id.as_str());
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Assets ───────────────────────────────────────────────────────────

    pub async fn get_assets(&self) -> Result<AssetsResponse, HttpError> {
        let url = format!("{}/assets", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_asset(&self, id: &str) -> Result<Option<AssetEnvelope>, HttpError> {
        let url = format!("{}/assets/{}", self.base_url, id);
        self.get_opt(&url, RetryPolicy::Idempotent).await
    }

    // ── Parties ──────────────────────────────────────────────────────────

    pub async fn get_parties(&self) -> Result<PartiesResponse, HttpError> {
        let url = format!("{}/parties", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_party(&self, id: &PubKey) -> Result<Option<PartyEnvelope>, HttpError> {
        let url = format!("{}/parties/{}", self.base_url, id.as_str());
        self.get_opt(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_party_accounts(
        &self,
        id: &PubKey,
    ) -> Result<AccountsResponse, HttpError> {
        let url = format!("{}/parties/{}/accounts", self.base_url, id.as_str());
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_party_positions(
        &self,
        id: &PubKey,
    ) -> Result<PositionsResponse, HttpError> {
        let url = format!("{}/parties/{}/positions", self.base_url, id.as_str());
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Network ──────────────────────────────────────────────────────────

    pub async fn get_time(&self) -> Result<TimeResponse, HttpError> {
        let url = format!("{}/time", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_statistics(&self) -> Result<StatisticsResponse, HttpError> {
        let url = format!("{}/statistics", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_network_parameters(&self) -> Result<NetworkParametersResponse, HttpError> {
        let url = format!("{}/network/parameters", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Governance ───────────────────────────────────────────────────────

    pub async fn get_proposals(&self) -> Result<ProposalsResponse, HttpError> {
        let url = format!("{}/governance/proposals", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    /// By-id proposal lookup, polled during the vote period. No retries.
    pub async fn get_proposal(
        &self,
        id: &ProposalId,
    ) -> Result<Option<ProposalEnvelope>, HttpError> {
        let url = format!("{}/governance/proposals/{}", self.base_url, id.as_str());
        self.get_opt(&url, RetryPolicy::None).await
    }

    /// By-reference proposal lookup, polled while the network has not yet
    /// assigned the proposal an id. No retries.
    pub async fn get_proposal_by_reference(
        &self,
        reference: &Reference,
    ) -> Result<Option<ProposalEnvelope>, HttpError> {
        let url = format!(
            "{}/governance/proposals/reference/{}",
            self.base_url,
            urlencoding::encode(reference.as_str())
        );
        self.get_opt(&url, RetryPolicy::None).await
    }

    // ── Prepare ──────────────────────────────────────────────────────────

    pub(crate) async fn prepare(
        &self,
        command: &Command,
        party: &PubKey,
    ) -> Result<PrepareResponse, HttpError> {
        match command {
            Command::OrderSubmission(submission) => {
                let url = format!("{}/orders/prepare/submit", self.base_url);
                let body = PrepareSubmissionRequest {
                    submission: SubmissionBody {
                        party_id: party,
                        submission,
                    },
                };
                self.post(&url, &body, RetryPolicy::None).await
            }
            Command::OrderAmendment(amendment) => {
                let url = format!("{}/orders/prepare/amend", self.base_url);
                let body = PrepareAmendmentRequest {
                    amendment: AmendmentBody {
                        party_id: party,
                        amendment,
                    },
                };
                self.post(&url, &body, RetryPolicy::None).await
            }
            Command::OrderCancellation(cancellation) => {
                let url = format!("{}/orders/prepare/cancel", self.base_url);
                let body = PrepareCancellationRequest {
                    cancellation: CancellationBody {
                        party_id: party,
                        cancellation,
                    },
                };
                self.post(&url, &body, RetryPolicy::None).await
            }
            Command::ProposalSubmission(proposal) => {
                let url = format!("{}/governance/prepare/proposal", self.base_url);
                let body = PrepareProposalRequest {
                    party_id: party,
                    proposal,
                };
                self.post(&url, &body, RetryPolicy::None).await
            }
            Command::Vote(vote) => {
                let url = format!("{}/governance/prepare/vote", self.base_url);
                let body = PrepareVoteRequest {
                    vote: VoteBody {
                        party_id: party,
                        vote,
                    },
                };
                self.post(&url, &body, RetryPolicy::None).await
            }
        }
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    /// Like [`Self::get`], but maps 404 to `Ok(None)` — on an eventually
    /// consistent read API, not-found is an answer, not an error.
    async fn get_opt<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<Option<T>, HttpError> {
        match self.get(url, retry).await {
            Ok(value) => Ok(Some(value)),
            Err(HttpError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for MeridianHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
        }
    }
}

impl LedgerApi for MeridianHttp {
    async fn prepare_command(
        &self,
        command: &Command,
        party: &PubKey,
    ) -> Result<PreparedCommand, HttpError> {
        self.prepare(command, party).await.map(PreparedCommand::from)
    }

    async fn order_by_key(&self, key: &str) -> Result<Option<Order>, HttpError> {
        Ok(self.get_order(key).await?.map(|envelope| envelope.order))
    }

    async fn proposal_by_reference(
        &self,
        reference: &Reference,
    ) -> Result<Option<Proposal>, HttpError> {
        Ok(self
            .get_proposal_by_reference(reference)
            .await?
            .map(|envelope| envelope.data.proposal))
    }

    async fn proposal_by_id(&self, id: &ProposalId) -> Result<Option<Proposal>, HttpError> {
        Ok(self
            .get_proposal(id)
            .await?
            .map(|envelope| envelope.data.proposal))
    }

    async fn market_ids(&self) -> Result<Vec<MarketId>, HttpError> {
        let markets = self.get_markets().await?;
        Ok(markets.markets.into_iter().map(|m| m.id).collect())
    }

    async fn ledger_time(&self) -> Result<LedgerTime, HttpError> {
        Ok(self.get_time().await?.timestamp)
    }
}
