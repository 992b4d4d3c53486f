//! Price parsing and order-summary arithmetic.
//!
//! Everything here is pure: no session, no waiting, no I/O. Displayed money
//! strings are parsed into [`Decimal`] values and recomputed independently,
//! then compared field by field against what the page shows. Binary floats
//! are never used for money.
//!
//! Rounding matches the storefront: half-up to two decimal places, with the
//! tax rounded on its own before it is added to the subtotal. Summing raw
//! unrounded tax and rounding only the total would drift by a cent on some
//! carts, and the comparison would blame the site for our arithmetic.

use crate::result::{CartwrightError, CartwrightResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Label prefix on the displayed subtotal line
pub const ITEM_TOTAL_PREFIX: &str = "Item total: $";

/// Label prefix on the displayed tax line
pub const TAX_PREFIX: &str = "Tax: $";

/// Label prefix on the displayed grand-total line
pub const TOTAL_PREFIX: &str = "Total: $";

/// Round to two decimal places, half away from zero
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a displayed price such as `"$29.99"` or `"29.99"`.
///
/// At most one leading `$` is accepted. The number must be non-negative
/// with at most two fractional digits; anything else (thousands
/// separators, trailing currency codes, embedded spaces) is
/// [`CartwrightError::MalformedPrice`] carrying the input verbatim.
pub fn parse_price(raw: &str) -> CartwrightResult<Decimal> {
    let malformed = || CartwrightError::MalformedPrice {
        raw: raw.to_string(),
    };
    let body = raw.strip_prefix('$').unwrap_or(raw);
    if body.is_empty() || body.starts_with('$') {
        return Err(malformed());
    }
    if let Some((_, frac)) = body.split_once('.') {
        if frac.is_empty() || frac.len() > 2 {
            return Err(malformed());
        }
    }
    if !body.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(malformed());
    }
    let value: Decimal = body.parse().map_err(|_| malformed())?;
    if value.is_sign_negative() {
        return Err(malformed());
    }
    Ok(value)
}

/// Strip a known label prefix (e.g. `"Item total: $"`) from a summary line
/// and parse the remainder as a price.
pub fn parse_labeled_price(line: &str, prefix: &str) -> CartwrightResult<Decimal> {
    let body = line
        .trim()
        .strip_prefix(prefix)
        .ok_or_else(|| CartwrightError::MalformedPrice {
            raw: line.to_string(),
        })?;
    parse_price(body)
}

/// One line item in a cart, as read off the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Displayed product name
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Displayed quantity
    pub quantity: u32,
}

impl CartLine {
    /// Build a line item from displayed strings
    pub fn from_display(name: &str, price: &str, quantity: &str) -> CartwrightResult<Self> {
        let quantity = quantity
            .trim()
            .parse()
            .map_err(|_| CartwrightError::MalformedPrice {
                raw: quantity.to_string(),
            })?;
        Ok(Self {
            name: name.trim().to_string(),
            price: parse_price(price.trim())?,
            quantity,
        })
    }

    /// Extended price for this line
    #[must_use]
    pub fn extended(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Check the domain invariant that every line holds exactly one unit.
    ///
    /// The storefront has no quantity control; a displayed quantity other
    /// than one means the page and our model of it have diverged.
    pub fn ensure_unit_quantity(&self) -> CartwrightResult<()> {
        if self.quantity == 1 {
            Ok(())
        } else {
            Err(CartwrightError::AssertionMismatch {
                what: format!("quantity of {}", self.name),
                expected: "1".to_string(),
                observed: self.quantity.to_string(),
            })
        }
    }
}

/// Independently computed (or page-scraped) order summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSummary {
    /// Sum of extended line prices, rounded
    pub subtotal: Decimal,
    /// Tax rate the summary was computed with
    pub tax_rate: Decimal,
    /// Tax amount, rounded before addition
    pub tax: Decimal,
    /// Subtotal plus tax, rounded
    pub total: Decimal,
}

impl PriceSummary {
    /// Compare this summary against another, field by field on the money
    /// fields, reporting the first mismatching field by name.
    pub fn verify_against(&self, observed: &Self) -> CartwrightResult<()> {
        for (what, expected, got) in [
            ("item total", self.subtotal, observed.subtotal),
            ("tax", self.tax, observed.tax),
            ("total", self.total, observed.total),
        ] {
            if expected != got {
                return Err(CartwrightError::AssertionMismatch {
                    what: what.to_string(),
                    expected: expected.to_string(),
                    observed: got.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Compute the expected order summary from displayed item prices.
///
/// - subtotal = round(sum of parsed prices)
/// - tax = round(subtotal * rate)
/// - total = round(subtotal + tax)
pub fn compute_summary(displayed_prices: &[&str], tax_rate: Decimal) -> CartwrightResult<PriceSummary> {
    let mut sum = Decimal::ZERO;
    for raw in displayed_prices {
        sum += parse_price(raw)?;
    }
    Ok(summarize(sum, tax_rate))
}

/// Compute the expected order summary from parsed cart lines
#[must_use]
pub fn summarize_lines(lines: &[CartLine], tax_rate: Decimal) -> PriceSummary {
    let sum = lines.iter().map(CartLine::extended).sum();
    summarize(sum, tax_rate)
}

fn summarize(raw_subtotal: Decimal, tax_rate: Decimal) -> PriceSummary {
    let subtotal = round_money(raw_subtotal);
    let tax = round_money(subtotal * tax_rate);
    let total = round_money(subtotal + tax);
    PriceSummary {
        subtotal,
        tax_rate,
        tax,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parses_dollar_prefixed_price() {
            assert_eq!(parse_price("$29.99").unwrap(), dec("29.99"));
        }

        #[test]
        fn test_parses_bare_price() {
            assert_eq!(parse_price("9.99").unwrap(), dec("9.99"));
        }

        #[test]
        fn test_parses_integral_price() {
            assert_eq!(parse_price("$10").unwrap(), dec("10"));
        }

        #[test]
        fn test_rejects_double_dollar() {
            assert!(parse_price("$$5.00").is_err());
        }

        #[test]
        fn test_rejects_negative() {
            assert!(parse_price("-5.00").is_err());
        }

        #[test]
        fn test_rejects_three_fractional_digits() {
            assert!(parse_price("$5.001").is_err());
        }

        #[test]
        fn test_rejects_trailing_garbage() {
            let err = parse_price("29.99 USD").unwrap_err();
            assert!(err.to_string().contains("29.99 USD"));
        }

        #[test]
        fn test_rejects_empty() {
            assert!(parse_price("").is_err());
            assert!(parse_price("$").is_err());
        }

        #[test]
        fn test_labeled_price_strips_prefix() {
            let value = parse_labeled_price("Item total: $29.99", ITEM_TOTAL_PREFIX).unwrap();
            assert_eq!(value, dec("29.99"));
        }

        #[test]
        fn test_labeled_price_wrong_prefix_is_malformed() {
            assert!(parse_labeled_price("Tax: $2.40", ITEM_TOTAL_PREFIX).is_err());
        }
    }

    mod rounding_tests {
        use super::*;

        #[test]
        fn test_half_up_at_midpoint() {
            assert_eq!(round_money(dec("2.005")), dec("2.01"));
            assert_eq!(round_money(dec("2.004")), dec("2.00"));
        }

        #[test]
        fn test_tax_rounded_before_addition() {
            // 35.50 * 0.08 = 2.84 exactly; 10.01 * 0.08 = 0.8008 -> 0.80
            let summary = compute_summary(&["$10.01"], dec("0.08")).unwrap();
            assert_eq!(summary.tax, dec("0.80"));
            assert_eq!(summary.total, dec("10.81"));
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_three_item_summary() {
            let summary =
                compute_summary(&["$10.00", "$20.00", "$5.50"], dec("0.08")).unwrap();
            assert_eq!(summary.subtotal, dec("35.50"));
            assert_eq!(summary.tax, dec("2.84"));
            assert_eq!(summary.total, dec("38.34"));
        }

        #[test]
        fn test_single_backpack_summary() {
            let summary = compute_summary(&["$29.99"], dec("0.08")).unwrap();
            assert_eq!(summary.subtotal, dec("29.99"));
            assert_eq!(summary.tax, dec("2.40"));
            assert_eq!(summary.total, dec("32.39"));
        }

        #[test]
        fn test_verify_against_matching() {
            let a = compute_summary(&["$29.99"], dec("0.08")).unwrap();
            let b = a.clone();
            assert!(a.verify_against(&b).is_ok());
        }

        #[test]
        fn test_verify_against_names_mismatching_field() {
            let expected = compute_summary(&["$29.99"], dec("0.08")).unwrap();
            let mut observed = expected.clone();
            observed.tax = dec("2.39");
            let err = expected.verify_against(&observed).unwrap_err();
            match err {
                CartwrightError::AssertionMismatch { what, .. } => assert_eq!(what, "tax"),
                other => panic!("expected AssertionMismatch, got {other:?}"),
            }
        }

        #[test]
        fn test_unit_quantity_invariant() {
            let ok = CartLine::from_display("Sauce Labs Onesie", "$7.99", "1").unwrap();
            assert!(ok.ensure_unit_quantity().is_ok());
            let bad = CartLine::from_display("Sauce Labs Onesie", "$7.99", "2").unwrap();
            let err = bad.ensure_unit_quantity().unwrap_err();
            assert!(err.to_string().contains("Sauce Labs Onesie"));
        }

        #[test]
        fn test_summarize_lines_uses_quantity() {
            let line = CartLine::from_display("Sauce Labs Backpack", "$29.99", "1").unwrap();
            assert_eq!(line.extended(), dec("29.99"));
            let summary = summarize_lines(&[line], dec("0.08"));
            assert_eq!(summary.total, dec("32.39"));
        }
    }
}
