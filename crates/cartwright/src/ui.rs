//! Element interaction façade.
//!
//! [`Ui`] is the shared contract every page model composes: typed operations
//! (click, fill, read-text, select, count, visibility) built on top of the
//! polling synchronization loop. Each action first resolves its locator and
//! waits for [`Condition::Visible`] before acting — except `count`, which
//! observes the document as-is.
//!
//! Actions that trigger navigation or a content reload (`click`, `select`)
//! deliberately do **not** wait for the resulting state. The "cause" wait
//! (element actionable) and the "effect" wait (next expected condition)
//! are separate; callers compose the latter explicitly, which keeps the
//! façade ignorant of every possible downstream state.

use crate::locator::{Locator, DEFAULT_PROBE_TIMEOUT_MS};
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use crate::wait::{probe_outcome, Condition, WaitOptions, WaitResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// Typed interaction surface over a [`Session`].
///
/// Cheap to clone; every page model for a scenario holds a clone backed by
/// the same exclusive session.
#[derive(Debug)]
pub struct Ui<S: Session> {
    session: Arc<S>,
    probe: WaitOptions,
}

impl<S: Session> Clone for Ui<S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            probe: self.probe,
        }
    }
}

impl<S: Session> Ui<S> {
    /// Create a façade over an injected session
    #[must_use]
    pub fn new(session: Arc<S>) -> Self {
        Self {
            session,
            probe: WaitOptions::new().with_timeout(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }

    /// Override the probe budget (existence checks)
    #[must_use]
    pub const fn with_probe_options(mut self, probe: WaitOptions) -> Self {
        self.probe = probe;
        self
    }

    /// The underlying session
    #[must_use]
    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    /// Navigate the session to a URL
    pub async fn goto(&self, url: &str) -> CartwrightResult<()> {
        debug!(url, "navigate");
        self.session.goto(url).await
    }

    /// Current page URL
    pub async fn current_url(&self) -> CartwrightResult<String> {
        self.session.current_url().await
    }

    /// Evaluate whether `condition` currently holds for `locator`.
    ///
    /// For index-narrowed locators visibility is approximated by element
    /// count: the Nth element exists. The target markup never renders
    /// hidden list entries, so the approximation holds there.
    async fn check(&self, locator: &Locator, condition: Condition) -> CartwrightResult<bool> {
        let query = locator.query();
        let present = match locator.index() {
            Some(i) => self.session.count(&query).await? > i,
            None => match condition {
                Condition::Visible | Condition::Hidden => {
                    self.session.is_displayed(&query).await?
                }
                Condition::Attached | Condition::Detached => {
                    self.session.count(&query).await? > 0
                }
            },
        };
        Ok(match condition {
            Condition::Visible | Condition::Attached => present,
            Condition::Hidden | Condition::Detached => !present,
        })
    }

    /// Block until `condition` holds for `locator`, using the locator's own
    /// budget and poll cadence.
    ///
    /// Satisfied returns on the first true evaluation; a miss is a
    /// [`CartwrightError::Timeout`] naming the condition, which blocking
    /// callers propagate untouched.
    pub async fn wait_for(
        &self,
        locator: &Locator,
        condition: Condition,
    ) -> CartwrightResult<WaitResult> {
        let opts = WaitOptions {
            timeout_ms: locator.options().timeout.as_millis() as u64,
            poll_interval_ms: locator.options().poll_interval.as_millis() as u64,
        };
        self.wait_for_with(locator, condition, &opts).await
    }

    /// Block until `condition` holds, with an explicit budget
    pub async fn wait_for_with(
        &self,
        locator: &Locator,
        condition: Condition,
        opts: &WaitOptions,
    ) -> CartwrightResult<WaitResult> {
        let description = format!("{condition} {locator}");
        let start = Instant::now();
        let timeout = opts.timeout();
        loop {
            if self.check(locator, condition).await? {
                trace!(%locator, %condition, elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
                return Ok(WaitResult::satisfied(start.elapsed(), description));
            }
            if start.elapsed() >= timeout {
                debug!(%locator, %condition, "wait timed out");
                return Err(CartwrightError::Timeout {
                    condition: description,
                    elapsed_ms: start.elapsed().as_millis() as u64,
                    timeout_ms: opts.timeout_ms,
                });
            }
            tokio::time::sleep(opts.poll_interval()).await;
        }
    }

    /// Wait for the element to be visible, then click it.
    ///
    /// No implicit wait for whatever the click causes.
    pub async fn click(&self, locator: &Locator) -> CartwrightResult<()> {
        self.wait_for(locator, Condition::Visible).await?;
        debug!(%locator, "click");
        self.session.click(&locator.query()).await
    }

    /// Wait for the element to be visible, then set its value to exactly
    /// `text` (prior content is not appended to).
    pub async fn fill(&self, locator: &Locator, text: &str) -> CartwrightResult<()> {
        self.wait_for(locator, Condition::Visible).await?;
        debug!(%locator, "fill");
        self.session.fill(&locator.query(), text).await
    }

    /// Wait for the dropdown to be visible, then select an option by value.
    ///
    /// If the page declares a dependent reload, waiting for it is the
    /// caller's explicit follow-up.
    pub async fn select(&self, locator: &Locator, value: &str) -> CartwrightResult<()> {
        self.wait_for(locator, Condition::Visible).await?;
        debug!(%locator, value, "select");
        self.session.select_value(&locator.query(), value).await
    }

    /// Wait for the element to be visible, then return its trimmed text
    pub async fn text(&self, locator: &Locator) -> CartwrightResult<String> {
        self.wait_for(locator, Condition::Visible).await?;
        match locator.index() {
            Some(i) => self.nth_text(locator, i).await,
            None => Ok(self.session.text(&locator.query()).await?.trim().to_string()),
        }
    }

    /// Trimmed text of every matching element, in document order.
    /// Does not wait: an empty document yields an empty list.
    pub async fn texts(&self, locator: &Locator) -> CartwrightResult<Vec<String>> {
        let raw = self.session.texts(&locator.query()).await?;
        Ok(raw.iter().map(|t| t.trim().to_string()).collect())
    }

    /// Trimmed text of the Nth matching element.
    ///
    /// Fails with [`CartwrightError::IndexOutOfRange`] when the collection
    /// is smaller — a fixture/logic mismatch, fatal to the scenario step.
    pub async fn nth_text(&self, locator: &Locator, index: usize) -> CartwrightResult<String> {
        let all = self.texts(locator).await?;
        all.get(index)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| CartwrightError::IndexOutOfRange {
                index,
                len: all.len(),
                what: locator.selector().to_query(),
            })
    }

    /// Number of matching elements right now. Never waits.
    pub async fn count(&self, locator: &Locator) -> CartwrightResult<usize> {
        self.session.count(&locator.query()).await
    }

    /// Probe: is the element visible within the short probe budget?
    ///
    /// Returns `false` on timeout instead of propagating it; any other
    /// session failure still surfaces. Calling this on a locator that never
    /// matches is not an error, and repeated calls keep returning `false`.
    pub async fn is_visible(&self, locator: &Locator) -> CartwrightResult<bool> {
        let probe = self.probe;
        probe_outcome(self.wait_for_with(locator, Condition::Visible, &probe).await)
    }

    /// Current value of a visible input/select element
    pub async fn input_value(&self, locator: &Locator) -> CartwrightResult<String> {
        self.wait_for(locator, Condition::Visible).await?;
        self.session.input_value(&locator.query()).await
    }
}
