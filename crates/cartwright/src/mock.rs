//! In-memory storefront session for tests.
//!
//! [`MockSession`] implements [`Session`] against a simulated store instead
//! of a live browser: screens, a product catalog, login rules, a cart and
//! the checkout pipeline, all behind the same query strings the real markup
//! answers to. Unit and flow tests run against it deterministically and
//! offline; the `browser` feature swaps in the `cdp` session for the real
//! thing without touching test logic.
//!
//! An optional render latency makes every screen change invisible to
//! queries for a short window, which exercises the polling loop the same
//! way a real page load does.

use crate::pricing::{summarize_lines, CartLine, PriceSummary};
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::trace;

const LOGIN_ERR_USERNAME_REQUIRED: &str = "Epic sadface: Username is required";
const LOGIN_ERR_PASSWORD_REQUIRED: &str = "Epic sadface: Password is required";
const LOGIN_ERR_LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";
const LOGIN_ERR_MISMATCH: &str =
    "Epic sadface: Username and password do not match any user in this service";
const CHECKOUT_ERR_FIRST_NAME: &str = "Error: First Name is required";
const CHECKOUT_ERR_LAST_NAME: &str = "Error: Last Name is required";
const CHECKOUT_ERR_POSTAL_CODE: &str = "Error: Postal Code is required";

/// Which screen the simulated store is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Inventory,
    /// Detail view of one catalog entry, by index
    Detail(usize),
    Cart,
    CheckoutInfo,
    CheckoutOverview,
    Complete,
}

/// One catalog entry in the simulated store
#[derive(Debug, Clone)]
struct MockProduct {
    name: String,
    description: String,
    price: Decimal,
}

impl MockProduct {
    fn displayed_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    fn key(&self) -> String {
        crate::pages::product_key(&self.name)
    }
}

fn default_catalog() -> Vec<MockProduct> {
    let entry = |name: &str, description: &str, price: &str| MockProduct {
        name: name.to_string(),
        description: description.to_string(),
        // catalog literals, known-good
        price: price.parse().unwrap_or_default(),
    };
    vec![
        entry(
            "Sauce Labs Backpack",
            "carry.allTheThings() with the sleek, streamlined Sly Pack",
            "29.99",
        ),
        entry(
            "Sauce Labs Bike Light",
            "A red light isn't the desired state in testing",
            "9.99",
        ),
        entry(
            "Sauce Labs Bolt T-Shirt",
            "Get your testing superhero on with the Sauce Labs bolt T-shirt",
            "15.99",
        ),
        entry(
            "Sauce Labs Fleece Jacket",
            "It's not every day that you come across a midweight quarter-zip fleece jacket",
            "49.99",
        ),
        entry(
            "Sauce Labs Onesie",
            "Rib snap infant onesie for the junior automation engineer",
            "7.99",
        ),
        entry(
            "Test.allTheThings() T-Shirt (Red)",
            "This classic Sauce Labs t-shirt is perfect to wear",
            "15.99",
        ),
    ]
}

fn known_accounts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("standard_user", "secret_sauce"),
        ("locked_out_user", "secret_sauce"),
        ("problem_user", "secret_sauce"),
        ("performance_glitch_user", "secret_sauce"),
    ]
}

#[derive(Debug)]
struct MockState {
    screen: Screen,
    catalog: Vec<MockProduct>,
    /// Indexes into `catalog`, insertion order preserved
    cart: Vec<usize>,
    sort: String,
    error: Option<String>,
    username_input: String,
    password_input: String,
    first_name_input: String,
    last_name_input: String,
    postal_code_input: String,
    logged_in: bool,
    menu_open: bool,
    current_url: String,
    /// Queries before this instant see a blank page (render latency)
    ready_at: Instant,
}

impl MockState {
    fn new() -> Self {
        Self {
            screen: Screen::Login,
            catalog: default_catalog(),
            cart: Vec::new(),
            sort: "az".to_string(),
            error: None,
            username_input: String::new(),
            password_input: String::new(),
            first_name_input: String::new(),
            last_name_input: String::new(),
            postal_code_input: String::new(),
            logged_in: false,
            menu_open: false,
            current_url: "about:blank".to_string(),
            ready_at: Instant::now(),
        }
    }

    /// Catalog indexes in the currently selected display order
    fn listing(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.catalog.len()).collect();
        match self.sort.as_str() {
            "za" => order.sort_by(|&a, &b| self.catalog[b].name.cmp(&self.catalog[a].name)),
            "lohi" => order.sort_by(|&a, &b| self.catalog[a].price.cmp(&self.catalog[b].price)),
            "hilo" => order.sort_by(|&a, &b| self.catalog[b].price.cmp(&self.catalog[a].price)),
            _ => order.sort_by(|&a, &b| self.catalog[a].name.cmp(&self.catalog[b].name)),
        }
        order
    }

    fn cart_lines(&self) -> Vec<CartLine> {
        self.cart
            .iter()
            .map(|&i| CartLine {
                name: self.catalog[i].name.clone(),
                price: self.catalog[i].price,
                quantity: 1,
            })
            .collect()
    }

    fn summary(&self) -> PriceSummary {
        let rate: Decimal = "0.08".parse().unwrap_or_default();
        summarize_lines(&self.cart_lines(), rate)
    }

    fn heading(&self) -> Option<&'static str> {
        match self.screen {
            Screen::Login | Screen::Detail(_) => None,
            Screen::Inventory => Some("Products"),
            Screen::Cart => Some("Your Cart"),
            Screen::CheckoutInfo => Some("Checkout: Your Information"),
            Screen::CheckoutOverview => Some("Checkout: Overview"),
            Screen::Complete => Some("Checkout: Complete!"),
        }
    }

    fn product_by_key(&self, key: &str) -> Option<usize> {
        self.catalog.iter().position(|p| p.key() == key)
    }

    /// Text content of every element the query matches on the current
    /// screen, in display order.
    fn query_texts(&self, query: &str) -> Vec<String> {
        if let Some(key) = query
            .strip_prefix("[data-test=\"add-to-cart-")
            .and_then(|s| s.strip_suffix("\"]"))
        {
            return match (self.screen, self.product_by_key(key)) {
                (Screen::Inventory, Some(i)) if !self.cart.contains(&i) => {
                    vec!["Add to cart".to_string()]
                }
                _ => Vec::new(),
            };
        }
        if let Some(key) = query
            .strip_prefix("[data-test=\"remove-")
            .and_then(|s| s.strip_suffix("\"]"))
        {
            let on_screen = matches!(self.screen, Screen::Inventory | Screen::Cart);
            return match (on_screen, self.product_by_key(key)) {
                (true, Some(i)) if self.cart.contains(&i) => vec!["Remove".to_string()],
                _ => Vec::new(),
            };
        }
        if let Some(name) = query.strip_prefix(".inventory_item_name >> text=") {
            return match self.screen {
                Screen::Inventory if self.catalog.iter().any(|p| p.name == name) => {
                    vec![name.to_string()]
                }
                _ => Vec::new(),
            };
        }

        match query {
            ".title" => self.heading().map(String::from).into_iter().collect(),
            ".login_logo" | "[data-test=\"username\"]" | "[data-test=\"password\"]"
            | "[data-test=\"login-button\"]" => match self.screen {
                Screen::Login => vec![String::new()],
                _ => Vec::new(),
            },
            "[data-test=\"error\"]" => self.error.clone().into_iter().collect(),
            ".shopping_cart_link" | "#react-burger-menu-btn" => match self.screen {
                Screen::Login => Vec::new(),
                _ => vec![String::new()],
            },
            ".bm-item" | "#logout_sidebar_link" => {
                if self.menu_open && self.screen != Screen::Login {
                    vec![String::new()]
                } else {
                    Vec::new()
                }
            }
            ".shopping_cart_badge" => {
                if self.screen != Screen::Login && !self.cart.is_empty() {
                    vec![self.cart.len().to_string()]
                } else {
                    Vec::new()
                }
            }
            ".inventory_item" => match self.screen {
                Screen::Inventory => self.listing().iter().map(|_| String::new()).collect(),
                _ => Vec::new(),
            },
            ".inventory_item_name" => match self.screen {
                Screen::Inventory => self
                    .listing()
                    .iter()
                    .map(|&i| self.catalog[i].name.clone())
                    .collect(),
                Screen::Cart | Screen::CheckoutOverview => self
                    .cart
                    .iter()
                    .map(|&i| self.catalog[i].name.clone())
                    .collect(),
                _ => Vec::new(),
            },
            ".inventory_item_desc" => match self.screen {
                Screen::Inventory => self
                    .listing()
                    .iter()
                    .map(|&i| self.catalog[i].description.clone())
                    .collect(),
                _ => Vec::new(),
            },
            ".inventory_item_price" => match self.screen {
                Screen::Inventory => self
                    .listing()
                    .iter()
                    .map(|&i| self.catalog[i].displayed_price())
                    .collect(),
                Screen::Cart | Screen::CheckoutOverview => self
                    .cart
                    .iter()
                    .map(|&i| self.catalog[i].displayed_price())
                    .collect(),
                _ => Vec::new(),
            },
            ".inventory_details_name.large_size" => match self.screen {
                Screen::Detail(i) => vec![self.catalog[i].name.clone()],
                _ => Vec::new(),
            },
            ".inventory_details_desc" => match self.screen {
                Screen::Detail(i) => vec![self.catalog[i].description.clone()],
                _ => Vec::new(),
            },
            ".inventory_details_price" => match self.screen {
                Screen::Detail(i) => vec![self.catalog[i].displayed_price()],
                _ => Vec::new(),
            },
            "[data-test=\"add-to-cart\"]" => match self.screen {
                Screen::Detail(i) if !self.cart.contains(&i) => {
                    vec!["Add to cart".to_string()]
                }
                _ => Vec::new(),
            },
            "[data-test=\"remove\"]" => match self.screen {
                Screen::Detail(i) if self.cart.contains(&i) => vec!["Remove".to_string()],
                _ => Vec::new(),
            },
            "[data-test=\"product_sort_container\"]" => match self.screen {
                Screen::Inventory => vec![String::new()],
                _ => Vec::new(),
            },
            ".cart_item"
            | ".cart_item .inventory_item_name"
            | ".cart_item .inventory_item_price"
            | ".cart_item .cart_quantity" => {
                if !matches!(self.screen, Screen::Cart | Screen::CheckoutOverview) {
                    return Vec::new();
                }
                match query {
                    ".cart_item .inventory_item_name" => self
                        .cart
                        .iter()
                        .map(|&i| self.catalog[i].name.clone())
                        .collect(),
                    ".cart_item .inventory_item_price" => self
                        .cart
                        .iter()
                        .map(|&i| self.catalog[i].displayed_price())
                        .collect(),
                    ".cart_item .cart_quantity" => {
                        self.cart.iter().map(|_| "1".to_string()).collect()
                    }
                    _ => self.cart.iter().map(|_| String::new()).collect(),
                }
            }
            "[data-test=\"checkout\"]" | "[data-test=\"continue-shopping\"]" => {
                match self.screen {
                    Screen::Cart => vec![String::new()],
                    _ => Vec::new(),
                }
            }
            "[data-test=\"firstName\"]" | "[data-test=\"lastName\"]"
            | "[data-test=\"postalCode\"]" | "[data-test=\"continue\"]" => match self.screen {
                Screen::CheckoutInfo => vec![String::new()],
                _ => Vec::new(),
            },
            "[data-test=\"cancel\"]" => match self.screen {
                Screen::CheckoutInfo | Screen::CheckoutOverview => vec![String::new()],
                _ => Vec::new(),
            },
            ".summary_subtotal_label" => match self.screen {
                Screen::CheckoutOverview => {
                    vec![format!("Item total: ${:.2}", self.summary().subtotal)]
                }
                _ => Vec::new(),
            },
            ".summary_tax_label" => match self.screen {
                Screen::CheckoutOverview => vec![format!("Tax: ${:.2}", self.summary().tax)],
                _ => Vec::new(),
            },
            ".summary_total_label" => match self.screen {
                Screen::CheckoutOverview => {
                    vec![format!("Total: ${:.2}", self.summary().total)]
                }
                _ => Vec::new(),
            },
            "[data-test=\"finish\"]" => match self.screen {
                Screen::CheckoutOverview => vec![String::new()],
                _ => Vec::new(),
            },
            ".complete-header" => match self.screen {
                Screen::Complete => vec!["Thank you for your order!".to_string()],
                _ => Vec::new(),
            },
            "[data-test=\"back-to-products\"]" => match self.screen {
                Screen::Complete | Screen::Detail(_) => vec!["Back to products".to_string()],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn submit_login(&mut self) {
        self.error = None;
        if self.username_input.is_empty() {
            self.error = Some(LOGIN_ERR_USERNAME_REQUIRED.to_string());
            return;
        }
        if self.password_input.is_empty() {
            self.error = Some(LOGIN_ERR_PASSWORD_REQUIRED.to_string());
            return;
        }
        let known = known_accounts()
            .iter()
            .any(|(u, p)| *u == self.username_input && *p == self.password_input);
        if !known {
            self.error = Some(LOGIN_ERR_MISMATCH.to_string());
            return;
        }
        if self.username_input == "locked_out_user" {
            self.error = Some(LOGIN_ERR_LOCKED_OUT.to_string());
            return;
        }
        self.logged_in = true;
        self.screen = Screen::Inventory;
        self.current_url = "https://www.saucedemo.com/inventory.html".to_string();
    }

    fn submit_checkout_info(&mut self) {
        self.error = None;
        // first missing field wins, in form order
        if self.first_name_input.is_empty() {
            self.error = Some(CHECKOUT_ERR_FIRST_NAME.to_string());
        } else if self.last_name_input.is_empty() {
            self.error = Some(CHECKOUT_ERR_LAST_NAME.to_string());
        } else if self.postal_code_input.is_empty() {
            self.error = Some(CHECKOUT_ERR_POSTAL_CODE.to_string());
        } else {
            self.screen = Screen::CheckoutOverview;
        }
    }
}

/// Simulated store session. See the module docs.
#[derive(Debug)]
pub struct MockSession {
    state: Mutex<MockState>,
    render_latency: Duration,
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSession {
    /// A fresh store showing the login screen, with no render latency
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::new()),
            render_latency: Duration::ZERO,
        }
    }

    /// Delay every screen change's visibility by `latency`, so waits have
    /// something real to poll against
    #[must_use]
    pub fn with_render_latency(mut self, latency: Duration) -> Self {
        self.render_latency = latency;
        self
    }

    fn lock(&self) -> CartwrightResult<std::sync::MutexGuard<'_, MockState>> {
        self.state.lock().map_err(|_| CartwrightError::SessionError {
            message: "mock store state poisoned".to_string(),
        })
    }

    fn settle(&self, state: &mut MockState) {
        state.ready_at = Instant::now() + self.render_latency;
    }

    /// Run `f` against the state; before the settle deadline the page reads
    /// as blank, exactly like a document mid-load.
    fn query<T>(
        &self,
        f: impl FnOnce(&MockState) -> T,
        blank: impl FnOnce() -> T,
    ) -> CartwrightResult<T> {
        let state = self.lock()?;
        if Instant::now() < state.ready_at {
            return Ok(blank());
        }
        Ok(f(&state))
    }
}

#[async_trait]
impl Session for MockSession {
    async fn goto(&self, url: &str) -> CartwrightResult<()> {
        let mut state = self.lock()?;
        trace!(url, "mock navigation");
        state.current_url = url.to_string();
        state.screen = if state.logged_in && url.contains("inventory") {
            Screen::Inventory
        } else {
            Screen::Login
        };
        state.error = None;
        state.username_input.clear();
        state.password_input.clear();
        self.settle(&mut state);
        Ok(())
    }

    async fn current_url(&self) -> CartwrightResult<String> {
        Ok(self.lock()?.current_url.clone())
    }

    async fn click(&self, query: &str) -> CartwrightResult<()> {
        let mut state = self.lock()?;
        if state.query_texts(query).is_empty() {
            return Err(CartwrightError::SessionError {
                message: format!("no element matches {query:?} to click"),
            });
        }
        trace!(query, "mock click");
        match query {
            "[data-test=\"login-button\"]" => state.submit_login(),
            "#react-burger-menu-btn" => state.menu_open = true,
            "#logout_sidebar_link" => {
                state.logged_in = false;
                state.menu_open = false;
                state.error = None;
                state.username_input.clear();
                state.password_input.clear();
                state.screen = Screen::Login;
            }
            ".shopping_cart_link" => {
                state.menu_open = false;
                state.screen = Screen::Cart;
            }
            "[data-test=\"continue-shopping\"]" | "[data-test=\"back-to-products\"]" => {
                state.screen = Screen::Inventory;
                state.current_url = "https://www.saucedemo.com/inventory.html".to_string();
            }
            "[data-test=\"add-to-cart\"]" => {
                if let Screen::Detail(i) = state.screen {
                    if !state.cart.contains(&i) {
                        state.cart.push(i);
                    }
                }
            }
            "[data-test=\"remove\"]" => {
                if let Screen::Detail(i) = state.screen {
                    state.cart.retain(|&c| c != i);
                }
            }
            "[data-test=\"checkout\"]" => {
                state.screen = Screen::CheckoutInfo;
                state.error = None;
                state.first_name_input.clear();
                state.last_name_input.clear();
                state.postal_code_input.clear();
            }
            "[data-test=\"continue\"]" => state.submit_checkout_info(),
            "[data-test=\"cancel\"]" => {
                state.screen = match state.screen {
                    Screen::CheckoutOverview => Screen::Inventory,
                    _ => Screen::Cart,
                };
            }
            "[data-test=\"finish\"]" => {
                state.screen = Screen::Complete;
                state.cart.clear();
            }
            other => {
                if let Some(key) = other
                    .strip_prefix("[data-test=\"add-to-cart-")
                    .and_then(|s| s.strip_suffix("\"]"))
                {
                    if let Some(i) = state.product_by_key(key) {
                        if !state.cart.contains(&i) {
                            state.cart.push(i);
                        }
                    }
                } else if let Some(key) = other
                    .strip_prefix("[data-test=\"remove-")
                    .and_then(|s| s.strip_suffix("\"]"))
                {
                    if let Some(i) = state.product_by_key(key) {
                        state.cart.retain(|&c| c != i);
                    }
                } else if let Some(name) = other.strip_prefix(".inventory_item_name >> text=") {
                    if let Some(i) = state.catalog.iter().position(|p| p.name == name) {
                        state.screen = Screen::Detail(i);
                        state.current_url =
                            format!("https://www.saucedemo.com/inventory-item.html?id={i}");
                    }
                }
            }
        }
        self.settle(&mut state);
        Ok(())
    }

    async fn fill(&self, query: &str, text: &str) -> CartwrightResult<()> {
        let mut state = self.lock()?;
        let field = match query {
            "[data-test=\"username\"]" => &mut state.username_input,
            "[data-test=\"password\"]" => &mut state.password_input,
            "[data-test=\"firstName\"]" => &mut state.first_name_input,
            "[data-test=\"lastName\"]" => &mut state.last_name_input,
            "[data-test=\"postalCode\"]" => &mut state.postal_code_input,
            other => {
                return Err(CartwrightError::SessionError {
                    message: format!("{other:?} is not a fillable field"),
                })
            }
        };
        // replace, never append
        field.clear();
        field.push_str(text);
        Ok(())
    }

    async fn select_value(&self, query: &str, value: &str) -> CartwrightResult<()> {
        let mut state = self.lock()?;
        if query != "[data-test=\"product_sort_container\"]" || state.screen != Screen::Inventory {
            return Err(CartwrightError::SessionError {
                message: format!("no select element matches {query:?}"),
            });
        }
        if !matches!(value, "az" | "za" | "lohi" | "hilo") {
            return Err(CartwrightError::SessionError {
                message: format!("unknown sort value {value:?}"),
            });
        }
        state.sort = value.to_string();
        self.settle(&mut state);
        Ok(())
    }

    async fn text(&self, query: &str) -> CartwrightResult<String> {
        let texts = self.texts(query).await?;
        texts
            .into_iter()
            .next()
            .ok_or_else(|| CartwrightError::SessionError {
                message: format!("no element matches {query:?}"),
            })
    }

    async fn texts(&self, query: &str) -> CartwrightResult<Vec<String>> {
        self.query(|s| s.query_texts(query), Vec::new)
    }

    async fn count(&self, query: &str) -> CartwrightResult<usize> {
        self.query(|s| s.query_texts(query).len(), || 0)
    }

    async fn is_displayed(&self, query: &str) -> CartwrightResult<bool> {
        self.query(|s| !s.query_texts(query).is_empty(), || false)
    }

    async fn input_value(&self, query: &str) -> CartwrightResult<String> {
        let state = self.lock()?;
        let value = match query {
            "[data-test=\"username\"]" => state.username_input.clone(),
            "[data-test=\"password\"]" => state.password_input.clone(),
            "[data-test=\"firstName\"]" => state.first_name_input.clone(),
            "[data-test=\"lastName\"]" => state.last_name_input.clone(),
            "[data-test=\"postalCode\"]" => state.postal_code_input.clone(),
            "[data-test=\"product_sort_container\"]" => state.sort.clone(),
            other => {
                return Err(CartwrightError::SessionError {
                    message: format!("{other:?} has no input value"),
                })
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in_store() -> MockSession {
        let store = MockSession::new();
        {
            let mut state = store.state.lock().unwrap();
            state.username_input = "standard_user".to_string();
            state.password_input = "secret_sauce".to_string();
            state.submit_login();
            assert_eq!(state.screen, Screen::Inventory);
        }
        store
    }

    #[tokio::test]
    async fn test_login_validation_order() {
        let store = MockSession::new();
        store.click("[data-test=\"login-button\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            LOGIN_ERR_USERNAME_REQUIRED
        );

        store.fill("[data-test=\"username\"]", "standard_user").await.unwrap();
        store.click("[data-test=\"login-button\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            LOGIN_ERR_PASSWORD_REQUIRED
        );

        store.fill("[data-test=\"password\"]", "wrong").await.unwrap();
        store.click("[data-test=\"login-button\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            LOGIN_ERR_MISMATCH
        );
    }

    #[tokio::test]
    async fn test_locked_out_user_is_rejected() {
        let store = MockSession::new();
        store.fill("[data-test=\"username\"]", "locked_out_user").await.unwrap();
        store.fill("[data-test=\"password\"]", "secret_sauce").await.unwrap();
        store.click("[data-test=\"login-button\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            LOGIN_ERR_LOCKED_OUT
        );
        assert!(!store.is_displayed(".title").await.unwrap());
    }

    #[tokio::test]
    async fn test_successful_login_shows_inventory() {
        let store = MockSession::new();
        store.fill("[data-test=\"username\"]", "standard_user").await.unwrap();
        store.fill("[data-test=\"password\"]", "secret_sauce").await.unwrap();
        store.click("[data-test=\"login-button\"]").await.unwrap();
        assert_eq!(store.text(".title").await.unwrap(), "Products");
        assert_eq!(store.count(".inventory_item").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_badge_tracks_cart_and_disappears_when_empty() {
        let store = logged_in_store();
        assert!(!store.is_displayed(".shopping_cart_badge").await.unwrap());

        store
            .click("[data-test=\"add-to-cart-sauce-labs-backpack\"]")
            .await
            .unwrap();
        assert_eq!(store.text(".shopping_cart_badge").await.unwrap(), "1");

        store
            .click("[data-test=\"add-to-cart-sauce-labs-onesie\"]")
            .await
            .unwrap();
        assert_eq!(store.text(".shopping_cart_badge").await.unwrap(), "2");

        store
            .click("[data-test=\"remove-sauce-labs-backpack\"]")
            .await
            .unwrap();
        assert_eq!(store.text(".shopping_cart_badge").await.unwrap(), "1");

        store
            .click("[data-test=\"remove-sauce-labs-onesie\"]")
            .await
            .unwrap();
        assert!(!store.is_displayed(".shopping_cart_badge").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_button_swaps_to_remove() {
        let store = logged_in_store();
        let add = "[data-test=\"add-to-cart-sauce-labs-backpack\"]";
        let remove = "[data-test=\"remove-sauce-labs-backpack\"]";
        assert!(store.is_displayed(add).await.unwrap());
        assert!(!store.is_displayed(remove).await.unwrap());
        store.click(add).await.unwrap();
        assert!(!store.is_displayed(add).await.unwrap());
        assert!(store.is_displayed(remove).await.unwrap());
    }

    #[tokio::test]
    async fn test_sort_orders() {
        let store = logged_in_store();
        let names = store.texts(".inventory_item_name").await.unwrap();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "default listing is a-z");

        store
            .select_value("[data-test=\"product_sort_container\"]", "hilo")
            .await
            .unwrap();
        let prices = store.texts(".inventory_item_price").await.unwrap();
        assert_eq!(prices.first().map(String::as_str), Some("$49.99"));
        assert_eq!(prices.last().map(String::as_str), Some("$7.99"));
        assert_eq!(store.input_value("[data-test=\"product_sort_container\"]").await.unwrap(), "hilo");
    }

    #[tokio::test]
    async fn test_overview_summary_lines() {
        let store = logged_in_store();
        store
            .click("[data-test=\"add-to-cart-sauce-labs-backpack\"]")
            .await
            .unwrap();
        store.click(".shopping_cart_link").await.unwrap();
        store.click("[data-test=\"checkout\"]").await.unwrap();
        store.fill("[data-test=\"firstName\"]", "John").await.unwrap();
        store.fill("[data-test=\"lastName\"]", "Doe").await.unwrap();
        store.fill("[data-test=\"postalCode\"]", "12345").await.unwrap();
        store.click("[data-test=\"continue\"]").await.unwrap();

        assert_eq!(
            store.text(".summary_subtotal_label").await.unwrap(),
            "Item total: $29.99"
        );
        assert_eq!(store.text(".summary_tax_label").await.unwrap(), "Tax: $2.40");
        assert_eq!(store.text(".summary_total_label").await.unwrap(), "Total: $32.39");
    }

    #[tokio::test]
    async fn test_checkout_validation_priority() {
        let store = logged_in_store();
        store
            .click("[data-test=\"add-to-cart-sauce-labs-backpack\"]")
            .await
            .unwrap();
        store.click(".shopping_cart_link").await.unwrap();
        store.click("[data-test=\"checkout\"]").await.unwrap();

        store.click("[data-test=\"continue\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            CHECKOUT_ERR_FIRST_NAME
        );

        store.fill("[data-test=\"firstName\"]", "John").await.unwrap();
        store.click("[data-test=\"continue\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            CHECKOUT_ERR_LAST_NAME
        );

        store.fill("[data-test=\"lastName\"]", "Doe").await.unwrap();
        store.click("[data-test=\"continue\"]").await.unwrap();
        assert_eq!(
            store.text("[data-test=\"error\"]").await.unwrap(),
            CHECKOUT_ERR_POSTAL_CODE
        );
    }

    #[tokio::test]
    async fn test_cancel_targets_differ_by_step() {
        let store = logged_in_store();
        store.click(".shopping_cart_link").await.unwrap();
        store.click("[data-test=\"checkout\"]").await.unwrap();
        store.click("[data-test=\"cancel\"]").await.unwrap();
        assert_eq!(store.text(".title").await.unwrap(), "Your Cart");

        store.click("[data-test=\"checkout\"]").await.unwrap();
        store.fill("[data-test=\"firstName\"]", "John").await.unwrap();
        store.fill("[data-test=\"lastName\"]", "Doe").await.unwrap();
        store.fill("[data-test=\"postalCode\"]", "12345").await.unwrap();
        store.click("[data-test=\"continue\"]").await.unwrap();
        store.click("[data-test=\"cancel\"]").await.unwrap();
        assert_eq!(store.text(".title").await.unwrap(), "Products");
    }

    #[tokio::test]
    async fn test_finish_empties_cart() {
        let store = logged_in_store();
        store
            .click("[data-test=\"add-to-cart-sauce-labs-backpack\"]")
            .await
            .unwrap();
        store.click(".shopping_cart_link").await.unwrap();
        store.click("[data-test=\"checkout\"]").await.unwrap();
        store.fill("[data-test=\"firstName\"]", "John").await.unwrap();
        store.fill("[data-test=\"lastName\"]", "Doe").await.unwrap();
        store.fill("[data-test=\"postalCode\"]", "12345").await.unwrap();
        store.click("[data-test=\"continue\"]").await.unwrap();
        store.click("[data-test=\"finish\"]").await.unwrap();

        assert_eq!(
            store.text(".complete-header").await.unwrap(),
            "Thank you for your order!"
        );
        store.click("[data-test=\"back-to-products\"]").await.unwrap();
        assert!(!store.is_displayed(".shopping_cart_badge").await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_returns_to_login_screen() {
        let store = logged_in_store();
        assert!(!store.is_displayed("#logout_sidebar_link").await.unwrap());
        store.click("#react-burger-menu-btn").await.unwrap();
        assert!(store.is_displayed("#logout_sidebar_link").await.unwrap());
        store.click("#logout_sidebar_link").await.unwrap();
        assert!(store.is_displayed("[data-test=\"login-button\"]").await.unwrap());
        assert!(!store.is_displayed(".title").await.unwrap());
    }

    #[tokio::test]
    async fn test_render_latency_blanks_queries_until_settled() {
        let store = MockSession::new().with_render_latency(Duration::from_millis(60));
        store.fill("[data-test=\"username\"]", "standard_user").await.unwrap();
        store.fill("[data-test=\"password\"]", "secret_sauce").await.unwrap();
        store.click("[data-test=\"login-button\"]").await.unwrap();
        assert!(!store.is_displayed(".title").await.unwrap());
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(store.is_displayed(".title").await.unwrap());
    }

    #[tokio::test]
    async fn test_product_name_link_opens_detail_view() {
        let store = logged_in_store();
        store
            .click(".inventory_item_name >> text=Sauce Labs Backpack")
            .await
            .unwrap();
        assert!(store.current_url().await.unwrap().contains("/inventory-item.html"));
        assert_eq!(
            store.text(".inventory_details_name.large_size").await.unwrap(),
            "Sauce Labs Backpack"
        );
        assert_eq!(store.text(".inventory_details_price").await.unwrap(), "$29.99");
        assert!(!store.is_displayed(".title").await.unwrap());

        // the detail view's button pair carries no product key
        store.click("[data-test=\"add-to-cart\"]").await.unwrap();
        assert!(store.is_displayed("[data-test=\"remove\"]").await.unwrap());
        assert_eq!(store.text(".shopping_cart_badge").await.unwrap(), "1");

        store.click("[data-test=\"back-to-products\"]").await.unwrap();
        assert_eq!(store.text(".title").await.unwrap(), "Products");
        assert!(store
            .is_displayed("[data-test=\"remove-sauce-labs-backpack\"]")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_re_adding_same_product_keeps_one_line() {
        let store = logged_in_store();
        let add = "[data-test=\"add-to-cart-sauce-labs-backpack\"]";
        store.click(add).await.unwrap();
        // second add is a no-op: the button already reads Remove
        assert!(store.click(add).await.is_err());
        store.click(".shopping_cart_link").await.unwrap();
        assert_eq!(store.count(".cart_item").await.unwrap(), 1);
        assert_eq!(store.texts(".cart_item .cart_quantity").await.unwrap(), ["1"]);
    }
}
