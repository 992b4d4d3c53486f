//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an opaque, immutable descriptor identifying zero or more
//! elements in the current document. It is pure configuration data: resolving
//! it against a live page is the job of the session, and waiting on it is the
//! job of the [`crate::ui::Ui`] façade. Locators are cheap to clone; multiple
//! page models may hold the same locator value independently.

use std::fmt;
use std::time::Duration;

/// Default timeout for page-level blocking waits (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for existence probes (5 seconds)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., `.shopping_cart_badge`)
    Css(String),
    /// XPath selector
    XPath(String),
    /// `data-test` attribute selector, the target site's stable hooks
    DataTest(String),
    /// CSS selector filtered by text content
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a `data-test` attribute selector
    #[must_use]
    pub fn data_test(id: impl Into<String>) -> Self {
        Self::DataTest(id.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create a CSS selector narrowed to elements with the given text
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Resolve to the concrete query string handed to the session.
    ///
    /// `DataTest` is sugar for an attribute selector; the attribute value
    /// must match the target site's markup exactly, including case.
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::XPath(s) => format!("xpath={s}"),
            Self::DataTest(id) => format!("[data-test=\"{id}\"]"),
            Self::CssWithText { css, text } => format!("{css} >> text={text}"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

/// Options controlling how long a locator is waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for blocking waits
    pub timeout: Duration,
    /// Polling interval
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// An immutable descriptor of zero or more elements in the live document.
///
/// Never mutated after construction; builder methods return a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
    nth: Option<usize>,
}

impl Locator {
    /// Create a locator from a CSS selector string
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
            nth: None,
        }
    }

    /// Create a locator for a `data-test` hook
    #[must_use]
    pub fn data_test(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::data_test(id))
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Narrow to the Nth matching element (0-based)
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the wait options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Get the element index, if narrowed
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }

    /// Concrete query string for the session
    #[must_use]
    pub fn query(&self) -> String {
        self.selector.to_query()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nth {
            Some(i) => write!(f, "{}[{i}]", self.selector),
            None => write!(f, "{}", self.selector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector_passthrough() {
            let selector = Selector::css(".shopping_cart_badge");
            assert_eq!(selector.to_query(), ".shopping_cart_badge");
        }

        #[test]
        fn test_data_test_selector_expands_to_attribute() {
            let selector = Selector::data_test("login-button");
            assert_eq!(selector.to_query(), "[data-test=\"login-button\"]");
        }

        #[test]
        fn test_data_test_preserves_case() {
            // Markup uses camelCase hooks; the query must match exactly
            let selector = Selector::data_test("firstName");
            assert_eq!(selector.to_query(), "[data-test=\"firstName\"]");
        }

        #[test]
        fn test_xpath_selector() {
            let selector = Selector::xpath("//button[@id='checkout']");
            assert!(selector.to_query().starts_with("xpath="));
        }

        #[test]
        fn test_css_with_text() {
            let selector = Selector::CssWithText {
                css: ".inventory_item_name".to_string(),
                text: "Sauce Labs Backpack".to_string(),
            };
            let query = selector.to_query();
            assert!(query.contains(".inventory_item_name"));
            assert!(query.contains("Sauce Labs Backpack"));
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_defaults() {
            let locator = Locator::new(".title");
            assert_eq!(
                locator.options().timeout,
                Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS)
            );
            assert_eq!(
                locator.options().poll_interval,
                Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
            );
            assert!(locator.index().is_none());
        }

        #[test]
        fn test_locator_with_timeout() {
            let locator = Locator::new(".title").with_timeout(Duration::from_secs(10));
            assert_eq!(locator.options().timeout, Duration::from_secs(10));
        }

        #[test]
        fn test_locator_nth() {
            let locator = Locator::new(".inventory_item").nth(3);
            assert_eq!(locator.index(), Some(3));
            assert_eq!(locator.to_string(), ".inventory_item[3]");
        }

        #[test]
        fn test_locator_is_value_like() {
            // Two page models holding the same locator value stay independent
            let a = Locator::data_test("checkout");
            let b = a.clone().with_timeout(Duration::from_secs(1));
            assert_eq!(a.options().timeout, Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS));
            assert_ne!(a, b);
        }

        #[test]
        fn test_default_constants() {
            assert_eq!(DEFAULT_WAIT_TIMEOUT_MS, 30_000);
            assert_eq!(DEFAULT_PROBE_TIMEOUT_MS, 5_000);
            assert_eq!(DEFAULT_POLL_INTERVAL_MS, 50);
        }
    }
}
