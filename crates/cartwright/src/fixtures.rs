//! Typed fixture data.
//!
//! Scenario data lives in JSON files under `fixtures/` and deserializes into
//! these structs. Field names stay camelCase on the wire to match the files
//! as they are reviewed by non-Rust colleagues.

use crate::result::{CartwrightError, CartwrightResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A login credential pair, valid or known-bad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// Human note on what this account exercises
    #[serde(default)]
    pub description: Option<String>,
    /// For invalid users, the banner text the login page must show
    #[serde(default)]
    pub expected_error: Option<String>,
}

/// Contents of `users.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersFixture {
    /// Accounts expected to reach the inventory page
    pub valid_users: Vec<User>,
    /// Accounts expected to be rejected, with their banner text
    pub invalid_users: Vec<User>,
}

impl UsersFixture {
    /// The canonical happy-path account
    pub fn standard_user(&self) -> CartwrightResult<&User> {
        self.valid_users
            .iter()
            .find(|u| u.username == "standard_user")
            .ok_or_else(|| CartwrightError::FixtureError {
                message: "users fixture has no standard_user entry".to_string(),
            })
    }
}

/// A catalog product as displayed on the inventory page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product id
    pub id: u32,
    /// Displayed name, verbatim
    pub name: String,
    /// Displayed price including the `$` prefix
    pub price: String,
    /// Displayed description
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Parsed numeric price
    pub fn price_value(&self) -> CartwrightResult<Decimal> {
        crate::pricing::parse_price(&self.price)
    }
}

/// One entry of the sort dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOption {
    /// Option value attribute (`az`, `za`, `lohi`, `hilo`)
    pub value: String,
    /// Displayed option text
    pub text: String,
}

/// Contents of `products.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsFixture {
    /// Full expected catalog
    pub products: Vec<Product>,
    /// Expected sort dropdown entries
    pub sort_options: Vec<SortOption>,
}

impl ProductsFixture {
    /// Look up a product by its displayed name
    pub fn by_name(&self, name: &str) -> CartwrightResult<&Product> {
        self.products
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CartwrightError::FixtureError {
                message: format!("no product named {name:?} in fixture"),
            })
    }
}

/// Shipping information entered on the checkout form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInfo {
    /// First name field (may be empty for invalid scenarios)
    #[serde(default)]
    pub first_name: String,
    /// Last name field
    #[serde(default)]
    pub last_name: String,
    /// Postal code field
    #[serde(default)]
    pub postal_code: String,
    /// For invalid scenarios, the error the form must show
    #[serde(default)]
    pub expected_error: Option<String>,
}

/// Valid and invalid checkout form scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutScenarios {
    /// Information that must pass validation
    pub valid: CheckoutInfo,
    /// Incomplete entries with their expected first error
    pub invalid: Vec<CheckoutInfo>,
}

/// Expected payment constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Tax rate applied to the item total (e.g. 0.08)
    pub tax: Decimal,
}

/// Contents of `checkout.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFixture {
    /// Form scenarios
    pub checkout_info: CheckoutScenarios,
    /// Payment constants
    pub payment_info: PaymentInfo,
}

/// Parse a fixture from a JSON string
pub fn from_str<T: for<'de> Deserialize<'de>>(json: &str) -> CartwrightResult<T> {
    serde_json::from_str(json).map_err(|e| CartwrightError::FixtureError {
        message: e.to_string(),
    })
}

/// Load a fixture from a JSON file on disk
pub fn load<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> CartwrightResult<T> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| CartwrightError::FixtureError {
        message: format!("{}: {e}", path.display()),
    })?;
    from_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_fixture_round_trip() {
        let json = r#"{
            "validUsers": [
                {"username": "standard_user", "password": "secret_sauce"}
            ],
            "invalidUsers": [
                {
                    "username": "locked_out_user",
                    "password": "secret_sauce",
                    "expectedError": "Epic sadface: Sorry, this user has been locked out."
                }
            ]
        }"#;
        let fixture: UsersFixture = from_str(json).unwrap();
        assert_eq!(fixture.standard_user().unwrap().password, "secret_sauce");
        assert_eq!(
            fixture.invalid_users[0].expected_error.as_deref(),
            Some("Epic sadface: Sorry, this user has been locked out.")
        );
    }

    #[test]
    fn test_products_fixture_lookup() {
        let json = r#"{
            "products": [
                {"id": 4, "name": "Sauce Labs Backpack", "price": "$29.99"}
            ],
            "sortOptions": [
                {"value": "az", "text": "Name (A to Z)"}
            ]
        }"#;
        let fixture: ProductsFixture = from_str(json).unwrap();
        let backpack = fixture.by_name("Sauce Labs Backpack").unwrap();
        assert_eq!(backpack.id, 4);
        assert_eq!(backpack.price_value().unwrap().to_string(), "29.99");
        assert!(fixture.by_name("No Such Product").is_err());
    }

    #[test]
    fn test_checkout_fixture_tax_is_decimal() {
        let json = r#"{
            "checkoutInfo": {
                "valid": {"firstName": "John", "lastName": "Doe", "postalCode": "12345"},
                "invalid": [
                    {"lastName": "Doe", "postalCode": "12345",
                     "expectedError": "Error: First Name is required"}
                ]
            },
            "paymentInfo": {"tax": 0.08}
        }"#;
        let fixture: CheckoutFixture = from_str(json).unwrap();
        assert_eq!(fixture.payment_info.tax.to_string(), "0.08");
        assert_eq!(fixture.checkout_info.valid.first_name, "John");
        assert!(fixture.checkout_info.invalid[0].first_name.is_empty());
    }

    #[test]
    fn test_malformed_fixture_is_fixture_error() {
        let err = from_str::<UsersFixture>("{not json").unwrap_err();
        match err {
            CartwrightError::FixtureError { .. } => {}
            other => panic!("expected FixtureError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load::<UsersFixture>("/nonexistent/users.json").unwrap_err();
        assert!(err.to_string().contains("users.json"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.json");
        std::fs::write(
            &path,
            r#"{"checkoutInfo":{"valid":{"firstName":"John","lastName":"Doe","postalCode":"12345"},"invalid":[]},"paymentInfo":{"tax":0.08}}"#,
        )
        .unwrap();
        let fixture: CheckoutFixture = load(&path).unwrap();
        assert_eq!(fixture.checkout_info.valid.postal_code, "12345");
    }
}
