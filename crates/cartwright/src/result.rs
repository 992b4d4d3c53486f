//! Result and error types for Cartwright.

use thiserror::Error;

/// Result type for Cartwright operations
pub type CartwrightResult<T> = Result<T, CartwrightError>;

/// Errors that can occur in Cartwright
#[derive(Debug, Error)]
pub enum CartwrightError {
    /// A wait exceeded its budget. Recoverable by the caller: retry with a
    /// fresh bounded wait, fail the assertion, or treat as "feature absent"
    /// for probes.
    #[error("Timed out after {elapsed_ms}ms (budget {timeout_ms}ms) waiting for {condition}")]
    Timeout {
        /// Description of the condition that was waited for
        condition: String,
        /// Time actually spent polling, in milliseconds
        elapsed_ms: u64,
        /// The configured budget, in milliseconds
        timeout_ms: u64,
    },

    /// Caller requested the Nth item of a collection with fewer elements.
    /// Always fatal to the current scenario step.
    #[error("Index {index} out of range for {what} ({len} elements)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Actual element count
        len: usize,
        /// What collection was indexed
        what: String,
    },

    /// A displayed price string could not be parsed
    #[error("Malformed price string: {raw:?}")]
    MalformedPrice {
        /// The offending string, verbatim
        raw: String,
    },

    /// An observed value differs from an expected value. The primary
    /// user-visible test failure; always reports both sides.
    #[error("Assertion mismatch on {what}: expected {expected:?}, observed {observed:?}")]
    AssertionMismatch {
        /// What was being compared
        what: String,
        /// Expected value
        expected: String,
        /// Observed value
        observed: String,
    },

    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Session-level failure (query or interaction against the live page)
    #[error("Session error: {message}")]
    SessionError {
        /// Error message
        message: String,
    },

    /// Fixture data could not be loaded
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CartwrightError {
    /// Whether this error is a wait timeout (the only error kind probes
    /// are allowed to swallow).
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_carries_condition_and_elapsed() {
        let err = CartwrightError::Timeout {
            condition: "visible [data-test=\"error\"]".to_string(),
            elapsed_ms: 5012,
            timeout_ms: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("5012ms"));
        assert!(msg.contains("visible [data-test=\"error\"]"));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_assertion_mismatch_reports_both_sides() {
        let err = CartwrightError::AssertionMismatch {
            what: "tax".to_string(),
            expected: "2.84".to_string(),
            observed: "2.83".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2.84"));
        assert!(msg.contains("2.83"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = CartwrightError::IndexOutOfRange {
            index: 7,
            len: 6,
            what: "inventory items".to_string(),
        };
        assert!(err.to_string().contains("Index 7"));
        assert!(err.to_string().contains("6 elements"));
    }

    #[test]
    fn test_malformed_price_surfaces_raw_string() {
        let err = CartwrightError::MalformedPrice {
            raw: "29.99 USD".to_string(),
        };
        assert!(err.to_string().contains("29.99 USD"));
    }
}
