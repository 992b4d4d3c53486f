//! Abstract page session — the wire boundary to the rendered document.
//!
//! Everything above this trait is deterministic test logic; everything below
//! it is a live browser (or the in-memory store used for unit tests). Keeping
//! the surface small protects against automation-API churn: if the CDP crate
//! ever becomes unmaintained, only the `cdp` module needs rewriting.
//!
//! A session is owned exclusively by one scenario. Page models receive it by
//! explicit injection rather than through ambient state, so parallel
//! scenarios cannot cross-talk.

use crate::result::CartwrightResult;
use async_trait::async_trait;

/// Read/query and interaction commands against the current rendered page.
///
/// Queries are instantaneous observations of the document as it is right
/// now; all wait/poll semantics live in [`crate::ui::Ui`]. Interactions act
/// on the first matching element.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate to a URL
    async fn goto(&self, url: &str) -> CartwrightResult<()>;

    /// Current page URL
    async fn current_url(&self) -> CartwrightResult<String>;

    /// Click the first element matching `query`
    async fn click(&self, query: &str) -> CartwrightResult<()>;

    /// Set the input value to exactly `text` (prior content is replaced,
    /// never appended)
    async fn fill(&self, query: &str, text: &str) -> CartwrightResult<()>;

    /// Select a dropdown option by value
    async fn select_value(&self, query: &str, value: &str) -> CartwrightResult<()>;

    /// Raw text content of the first matching element.
    ///
    /// Errors with [`crate::CartwrightError::SessionError`] if nothing
    /// matches; callers wanting existence semantics use `count`.
    async fn text(&self, query: &str) -> CartwrightResult<String>;

    /// Raw text content of every matching element, in document order
    async fn texts(&self, query: &str) -> CartwrightResult<Vec<String>>;

    /// Number of matching elements (zero when none)
    async fn count(&self, query: &str) -> CartwrightResult<usize>;

    /// Whether the first matching element is currently rendered.
    ///
    /// `false` when nothing matches; never an error for absence.
    async fn is_displayed(&self, query: &str) -> CartwrightResult<bool>;

    /// Current value of the first matching input/select element
    async fn input_value(&self, query: &str) -> CartwrightResult<String>;
}
