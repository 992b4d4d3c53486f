//! Result-returning checks for scenario code.
//!
//! Scenario steps run inside `async` helpers that propagate errors with `?`,
//! so verification failures are values, not panics. A failed check is a
//! [`CartwrightError::AssertionMismatch`] naming the field and both sides.

use crate::result::{CartwrightError, CartwrightResult};
use std::fmt::Debug;

/// Check that an observed value equals an expected value
pub fn ensure_eq<T: PartialEq + Debug>(
    what: impl Into<String>,
    expected: &T,
    observed: &T,
) -> CartwrightResult<()> {
    if expected == observed {
        Ok(())
    } else {
        Err(CartwrightError::AssertionMismatch {
            what: what.into(),
            expected: format!("{expected:?}"),
            observed: format!("{observed:?}"),
        })
    }
}

/// Check that a condition holds, with a description of what was expected
pub fn ensure(what: impl Into<String>, condition: bool) -> CartwrightResult<()> {
    if condition {
        Ok(())
    } else {
        Err(CartwrightError::AssertionMismatch {
            what: what.into(),
            expected: "true".to_string(),
            observed: "false".to_string(),
        })
    }
}

/// Check that observed text contains an expected fragment
pub fn ensure_contains(
    what: impl Into<String>,
    fragment: &str,
    observed: &str,
) -> CartwrightResult<()> {
    if observed.contains(fragment) {
        Ok(())
    } else {
        Err(CartwrightError::AssertionMismatch {
            what: what.into(),
            expected: format!("text containing {fragment:?}"),
            observed: observed.to_string(),
        })
    }
}
