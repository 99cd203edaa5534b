//! Confirmation polling.
//!
//! The ledger offers no synchronous write acknowledgement: a signed
//! transaction lands in a block at some later point, and the only way to
//! observe it is to re-issue a read query until the entity reaches a
//! terminal state or a deadline expires. [`Poller::poll`] is that loop,
//! with the deadline accounting driven entirely by an injected [`Clock`]
//! so a scripted response sequence reproduces the same outcome every time.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::{ConfigError, HttpError};

// ─── Classification ──────────────────────────────────────────────────────────

/// Result of applying a terminal-state predicate to an observed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not terminal yet; keep polling.
    Pending,
    /// The entity reached the expected terminal state.
    Success,
    /// The entity reached a terminal state that means the operation failed
    /// (e.g. a rejected proposal). Terminal — polling stops immediately.
    Failure,
}

// ─── PollOptions ─────────────────────────────────────────────────────────────

/// Deadline and pacing for one poll operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Total budget for the operation.
    pub timeout: Duration,
    /// Pause between consecutive read queries.
    pub interval: Duration,
    /// Consecutive transient read failures tolerated before failing fast.
    pub max_transient_errors: u32,
}

impl PollOptions {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
    pub const DEFAULT_MAX_TRANSIENT_ERRORS: u32 = 3;

    /// Requires `timeout > 0`, `interval > 0` and `interval <= timeout`.
    pub fn new(
        timeout: Duration,
        interval: Duration,
        max_transient_errors: u32,
    ) -> Result<Self, ConfigError> {
        if timeout.is_zero() || interval.is_zero() || interval > timeout {
            return Err(ConfigError::InvalidPollOptions);
        }
        Ok(Self {
            timeout,
            interval,
            max_transient_errors,
        })
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            interval: Self::DEFAULT_INTERVAL,
            max_transient_errors: Self::DEFAULT_MAX_TRANSIENT_ERRORS,
        }
    }
}

// ─── PollOutcome ─────────────────────────────────────────────────────────────

/// Outcome of one poll operation. The only channel for timeouts and
/// network-side rejections — callers must handle every variant.
#[must_use]
#[derive(Debug)]
pub enum PollOutcome<T> {
    /// The predicate classified an observed state as Success.
    Confirmed(T),
    /// The predicate classified an observed state as Failure; carries the
    /// state that was observed.
    Rejected(T),
    /// The deadline elapsed before any terminal classification.
    TimedOut { attempts: u32 },
    /// The read queries failed persistently (or non-transiently) before the
    /// deadline.
    Failed { reason: String },
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Time source for deadline accounting and inter-attempt pacing.
///
/// Boxed sleep futures keep the trait object-safe; polling is paced in
/// hundreds of milliseconds, so the allocation is irrelevant.
pub trait Clock: Send + Sync {
    /// Monotonic reading since an arbitrary origin.
    fn monotonic(&self) -> Duration;

    /// Suspend the calling flow for `duration`.
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Wall-clock [`Clock`] backed by `futures_timer::Delay`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(futures_timer::Delay::new(duration))
    }
}

/// Deterministic [`Clock`] for tests and simulations: `sleep` advances the
/// reading instantly instead of suspending.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        *self.now.lock().expect("clock lock poisoned")
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Duration {
        self.elapsed()
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        *self.now.lock().expect("clock lock poisoned") += duration;
        Box::pin(std::future::ready(()))
    }
}

/// Lets a test hold on to a shared clock while the poller owns its handle.
impl<C: Clock> Clock for std::sync::Arc<C> {
    fn monotonic(&self) -> Duration {
        (**self).monotonic()
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        (**self).sleep(duration)
    }
}

// ─── Poller ──────────────────────────────────────────────────────────────────

/// Repeatedly issues a read query until a predicate reaches a terminal
/// classification or the deadline elapses.
pub struct Poller<C = SystemClock> {
    options: PollOptions,
    clock: C,
}

impl Poller<SystemClock> {
    pub fn new(options: PollOptions) -> Self {
        Self::with_clock(options, SystemClock::default())
    }
}

impl<C: Clock> Poller<C> {
    pub fn with_clock(options: PollOptions, clock: C) -> Self {
        Self { options, clock }
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Poll `fetch` until `predicate` reaches a terminal classification.
    ///
    /// `fetch` re-issues the same read query each attempt; `Ok(None)` means
    /// "not found yet", which is Pending — a freshly submitted entity takes
    /// at least a block to become visible, so absence is never terminal.
    /// For the same reason each attempt waits one interval *before*
    /// querying: k polls cost exactly k intervals of the clock.
    ///
    /// Transient transport errors count as Pending up to
    /// [`PollOptions::max_transient_errors`] consecutive failures; the
    /// counter resets on any successful response. Exceeding the ceiling, or
    /// any non-transient error, fails the operation immediately regardless
    /// of the remaining timeout budget.
    pub async fn poll<T, F, Fut, P>(&self, mut fetch: F, predicate: P) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, HttpError>>,
        P: Fn(&T) -> Classification,
    {
        let start = self.clock.monotonic();
        let mut attempts: u32 = 0;
        let mut consecutive_errors: u32 = 0;

        loop {
            if self.clock.monotonic() - start >= self.options.timeout {
                tracing::debug!(attempts, "confirmation poll timed out");
                return PollOutcome::TimedOut { attempts };
            }

            self.clock.sleep(self.options.interval).await;
            attempts += 1;

            match fetch().await {
                Ok(Some(entity)) => {
                    consecutive_errors = 0;
                    match predicate(&entity) {
                        Classification::Pending => {}
                        Classification::Success => {
                            tracing::debug!(attempts, "confirmation poll succeeded");
                            return PollOutcome::Confirmed(entity);
                        }
                        Classification::Failure => {
                            tracing::debug!(attempts, "entity reached a failure state");
                            return PollOutcome::Rejected(entity);
                        }
                    }
                }
                Ok(None) => {
                    consecutive_errors = 0;
                }
                Err(e) if e.is_transient() => {
                    consecutive_errors += 1;
                    tracing::debug!(attempts, consecutive_errors, error = %e, "transient read failure");
                    if consecutive_errors > self.options.max_transient_errors {
                        return PollOutcome::Failed {
                            reason: format!("persistent transport failure: {}", e),
                        };
                    }
                }
                Err(e) => {
                    return PollOutcome::Failed {
                        reason: e.to_string(),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn opts(timeout_ms: u64, interval_ms: u64) -> PollOptions {
        PollOptions::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(interval_ms),
            3,
        )
        .unwrap()
    }

    /// A scripted fetch: pops the front response each attempt.
    fn scripted<T: Clone>(
        responses: Vec<Result<Option<T>, HttpError>>,
    ) -> impl FnMut() -> std::future::Ready<Result<Option<T>, HttpError>> {
        let queue = RefCell::new(responses);
        move || {
            let next = {
                let mut q = queue.borrow_mut();
                if q.is_empty() {
                    Ok(None)
                } else {
                    q.remove(0)
                }
            };
            std::future::ready(next)
        }
    }

    #[test]
    fn test_poll_options_preconditions() {
        assert!(PollOptions::new(Duration::ZERO, Duration::from_millis(1), 0).is_err());
        assert!(PollOptions::new(Duration::from_millis(1), Duration::ZERO, 0).is_err());
        assert!(
            PollOptions::new(Duration::from_millis(1), Duration::from_millis(2), 0).is_err(),
            "interval must not exceed timeout"
        );
        assert!(PollOptions::new(Duration::from_millis(2), Duration::from_millis(2), 0).is_ok());
    }

    #[tokio::test]
    async fn test_never_satisfied_times_out_within_one_interval_of_deadline() {
        // timeout not an exact multiple of the interval: 2.5 intervals.
        let options = opts(250, 100);
        let clock = ManualClock::new();
        let poller = Poller::with_clock(options, clock);

        let outcome = poller
            .poll(scripted::<u32>(vec![]), |_| Classification::Pending)
            .await;

        match outcome {
            PollOutcome::TimedOut { attempts } => assert_eq!(attempts, 3),
            other => panic!("expected TimedOut, got {:?}", other),
        }
        let elapsed = poller.clock.elapsed();
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_exact_multiple_timeout_elapsed_equals_deadline() {
        let options = opts(300, 100);
        let poller = Poller::with_clock(options, ManualClock::new());

        let outcome = poller
            .poll(scripted::<u32>(vec![]), |_| Classification::Pending)
            .await;

        assert!(matches!(outcome, PollOutcome::TimedOut { attempts: 3 }));
        assert_eq!(poller.clock.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_success_on_kth_response_issues_exactly_k_queries() {
        let options = opts(10_000, 100);
        let poller = Poller::with_clock(options, ManualClock::new());
        let queries = RefCell::new(0u32);

        let outcome = poller
            .poll(
                || {
                    *queries.borrow_mut() += 1;
                    let state = if *queries.borrow() < 4 { 0u32 } else { 7 };
                    std::future::ready(Ok(Some(state)))
                },
                |s| {
                    if *s == 7 {
                        Classification::Success
                    } else {
                        Classification::Pending
                    }
                },
            )
            .await;

        match outcome {
            PollOutcome::Confirmed(state) => assert_eq!(state, 7),
            other => panic!("expected Confirmed, got {:?}", other),
        }
        assert_eq!(*queries.borrow(), 4);
        assert_eq!(poller.clock.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_not_found_is_pending_not_terminal() {
        let options = opts(10_000, 100);
        let poller = Poller::with_clock(options, ManualClock::new());

        let outcome = poller
            .poll(
                scripted(vec![Ok(None), Ok(None), Ok(Some(1u32))]),
                |_| Classification::Success,
            )
            .await;

        assert!(matches!(outcome, PollOutcome::Confirmed(1)));
    }

    #[tokio::test]
    async fn test_failure_classification_is_terminal() {
        let options = opts(10_000, 100);
        let poller = Poller::with_clock(options, ManualClock::new());

        let outcome = poller
            .poll(scripted(vec![Ok(Some(9u32))]), |_| Classification::Failure)
            .await;

        assert!(matches!(outcome, PollOutcome::Rejected(9)));
    }

    #[tokio::test]
    async fn test_transient_errors_beyond_ceiling_fail_fast() {
        let options = opts(60_000, 100);
        let poller = Poller::with_clock(options, ManualClock::new());

        let outcome = poller
            .poll(
                || std::future::ready(Err::<Option<u32>, _>(HttpError::Timeout)),
                |_| Classification::Success,
            )
            .await;

        match outcome {
            // Ceiling of 3 consecutive errors: the 4th exceeds it.
            PollOutcome::Failed { reason } => assert!(reason.contains("persistent")),
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(poller.clock.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_transient_error_counter_resets_on_success() {
        let options = opts(60_000, 100);
        let poller = Poller::with_clock(options, ManualClock::new());

        let outcome = poller
            .poll(
                scripted(vec![
                    Err(HttpError::Timeout),
                    Err(HttpError::Timeout),
                    Err(HttpError::Timeout),
                    Ok(None),
                    Err(HttpError::Timeout),
                    Err(HttpError::Timeout),
                    Ok(Some(5u32)),
                ]),
                |_| Classification::Success,
            )
            .await;

        assert!(matches!(outcome, PollOutcome::Confirmed(5)));
    }

    #[tokio::test]
    async fn test_non_transient_error_fails_immediately() {
        let options = opts(60_000, 100);
        let poller = Poller::with_clock(options, ManualClock::new());

        let outcome = poller
            .poll(
                scripted::<u32>(vec![Err(HttpError::BadRequest("bad key".into()))]),
                |_| Classification::Success,
            )
            .await;

        assert!(matches!(outcome, PollOutcome::Failed { .. }));
        assert_eq!(poller.clock.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_already_terminal_issues_single_query_and_is_reproducible() {
        let options = opts(10_000, 100);

        for _ in 0..2 {
            let poller = Poller::with_clock(options, ManualClock::new());
            let queries = RefCell::new(0u32);
            let outcome = poller
                .poll(
                    || {
                        *queries.borrow_mut() += 1;
                        std::future::ready(Ok(Some(42u32)))
                    },
                    |_| Classification::Success,
                )
                .await;

            assert!(matches!(outcome, PollOutcome::Confirmed(42)));
            assert_eq!(*queries.borrow(), 1);
        }
    }
}
