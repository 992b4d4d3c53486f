//! Wait mechanisms for page synchronization.
//!
//! The rendering side gives no reliable mutation hook for arbitrary locators,
//! so synchronization is bounded polling: a loop with an evaluation predicate
//! and a clock-based deadline, independent of any automation library's
//! built-in retry mechanism.
//!
//! Two usage modes share the same machinery:
//!
//! - **Blocking waits**: the caller cannot proceed until a condition holds
//!   (e.g. the confirmation header after checkout). A miss surfaces as
//!   [`CartwrightError::Timeout`] carrying the condition description and
//!   elapsed time.
//! - **Probes**: the caller wants to know *whether* something is visible
//!   without failing when it is not. Same wait, short budget, and the
//!   `Timeout` outcome is mapped to `false` instead of propagated.

use crate::locator::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use crate::result::{CartwrightError, CartwrightResult};
use std::fmt;
use std::time::{Duration, Instant};

/// Element state a wait can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Element is attached and rendered
    Visible,
    /// Element is attached but not rendered (or not attached at all)
    Hidden,
    /// Element exists in the document
    Attached,
    /// Element does not exist in the document
    Detached,
}

impl Condition {
    /// Short name used in timeout messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Attached => "attached",
            Self::Detached => "detached",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Successful outcome of a wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent polling before the condition held
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

impl WaitResult {
    /// Create a satisfied wait result
    #[must_use]
    pub fn satisfied(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            elapsed,
            waited_for: waited_for.into(),
        }
    }
}

/// Trait for custom wait predicates
pub trait WaitPredicate: Send + Sync {
    /// Check whether the condition currently holds
    fn check(&self) -> bool;

    /// Description for timeout messages
    fn description(&self) -> String;
}

/// Any `(description, closure)` pair is a predicate; no wrapper type needed.
impl<'a, F> WaitPredicate for (&'a str, F)
where
    F: Fn() -> bool + Send + Sync,
{
    fn check(&self) -> bool {
        (self.1)()
    }

    fn description(&self) -> String {
        self.0.to_string()
    }
}

/// Synchronous waiter for pure predicates (not tied to a session).
///
/// The element-level async poll loop lives in [`crate::ui::Ui`]; this waiter
/// covers the in-process conditions scenario code composes around it.
#[derive(Debug, Clone, Default)]
pub struct Waiter;

impl Waiter {
    /// Create a new waiter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Poll `predicate` until it holds or the budget is spent.
    ///
    /// Returns immediately on the first true evaluation; there is no fixed
    /// minimum wait.
    pub fn wait_for<P: WaitPredicate>(
        &self,
        predicate: &P,
        options: &WaitOptions,
    ) -> CartwrightResult<WaitResult> {
        let start = Instant::now();
        let timeout = options.timeout();
        loop {
            if predicate.check() {
                return Ok(WaitResult::satisfied(start.elapsed(), predicate.description()));
            }
            if start.elapsed() >= timeout {
                return Err(CartwrightError::Timeout {
                    condition: predicate.description(),
                    elapsed_ms: start.elapsed().as_millis() as u64,
                    timeout_ms: options.timeout_ms,
                });
            }
            std::thread::sleep(options.poll_interval());
        }
    }
}

/// Wait for a closure to return true with the given budget
pub fn wait_until<F>(predicate: F, timeout_ms: u64) -> CartwrightResult<WaitResult>
where
    F: Fn() -> bool + Send + Sync,
{
    let options = WaitOptions::new().with_timeout(timeout_ms);
    Waiter::new().wait_for(&("custom predicate", predicate), &options)
}

/// Map a wait outcome to a boolean probe result.
///
/// `Timeout` becomes `false`; every other error still propagates.
pub fn probe_outcome(result: CartwrightResult<WaitResult>) -> CartwrightResult<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(err) if err.is_timeout() => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod condition_tests {
        use super::*;

        #[test]
        fn test_condition_names() {
            assert_eq!(Condition::Visible.as_str(), "visible");
            assert_eq!(Condition::Hidden.as_str(), "hidden");
            assert_eq!(Condition::Attached.as_str(), "attached");
            assert_eq!(Condition::Detached.as_str(), "detached");
        }

        #[test]
        fn test_condition_display() {
            assert_eq!(format!("{}", Condition::Visible), "visible");
        }
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_chained_builders() {
            let opts = WaitOptions::new().with_timeout(5000).with_poll_interval(10);
            assert_eq!(opts.timeout(), Duration::from_millis(5000));
            assert_eq!(opts.poll_interval(), Duration::from_millis(10));
        }
    }

    mod waiter_tests {
        use super::*;
        use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
        use std::sync::Arc;

        #[test]
        fn test_immediate_satisfaction_no_minimum_wait() {
            let start = Instant::now();
            let result = wait_until(|| true, 10_000).unwrap();
            assert!(start.elapsed() < Duration::from_millis(500));
            assert_eq!(result.waited_for, "custom predicate");
        }

        #[test]
        fn test_timeout_carries_description_and_budget() {
            let predicate = ("badge absent", || false);
            let options = WaitOptions::new().with_timeout(80).with_poll_interval(10);
            let err = Waiter::new().wait_for(&predicate, &options).unwrap_err();
            match err {
                CartwrightError::Timeout {
                    condition,
                    timeout_ms,
                    elapsed_ms,
                } => {
                    assert_eq!(condition, "badge absent");
                    assert_eq!(timeout_ms, 80);
                    assert!(elapsed_ms >= 80);
                }
                other => panic!("expected Timeout, got {other:?}"),
            }
        }

        #[test]
        fn test_condition_becoming_true_is_observed() {
            let flag = Arc::new(AtomicBool::new(false));
            let writer = flag.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(40));
                writer.store(true, Ordering::SeqCst);
            });
            let result = wait_until(move || flag.load(Ordering::SeqCst), 2_000);
            assert!(result.is_ok());
        }

        #[test]
        fn test_polls_at_configured_cadence() {
            let calls = Arc::new(AtomicU32::new(0));
            let counter = calls.clone();
            let predicate = ("never", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                false
            });
            let options = WaitOptions::new().with_timeout(100).with_poll_interval(20);
            let _ = Waiter::new().wait_for(&predicate, &options);
            let n = calls.load(Ordering::SeqCst);
            // ~100ms / 20ms plus the initial evaluation; leave slack for CI
            assert!(n >= 3 && n <= 10, "unexpected poll count {n}");
        }
    }

    mod probe_tests {
        use super::*;

        #[test]
        fn test_probe_maps_timeout_to_false() {
            let timed_out: CartwrightResult<WaitResult> = Err(CartwrightError::Timeout {
                condition: "visible .x".to_string(),
                elapsed_ms: 100,
                timeout_ms: 100,
            });
            assert!(!probe_outcome(timed_out).unwrap());
        }

        #[test]
        fn test_probe_passes_satisfaction_through() {
            let ok = Ok(WaitResult::satisfied(Duration::from_millis(3), "visible .x"));
            assert!(probe_outcome(ok).unwrap());
        }

        #[test]
        fn test_probe_propagates_other_errors() {
            let err: CartwrightResult<WaitResult> = Err(CartwrightError::SessionError {
                message: "connection dropped".to_string(),
            });
            assert!(probe_outcome(err).is_err());
        }
    }
}
