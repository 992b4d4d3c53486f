//! Page models for the storefront checkout flow.
//!
//! Each page model owns the locator knowledge and interaction sequences for
//! one screen; scenario code never touches raw selectors. Navigation methods
//! return the model for the screen they lead to, so the flow reads as the
//! state machine it is:
//!
//! ```text
//! Login -> Inventory <-> Cart -> CheckoutInfo -> CheckoutOverview -> Complete
//!            ^   ^________________|                     |               |
//!            |   |  (cancel)                 (cancel)   |  (back home)  |
//!            |   |______________________________________|_______________|
//!            v
//!          Detail  (product name click <-> back to products)
//! ```
//!
//! Models hold a cloned [`Ui`] over the scenario's session. Constructing a
//! model does not verify the browser is on that screen; `is_loaded` does.

mod cart;
mod checkout;
mod detail;
mod inventory;
mod login;

pub use cart::CartPage;
pub use checkout::{CheckoutCompletePage, CheckoutInfoPage, CheckoutOverviewPage};
pub use detail::ProductDetailPage;
pub use inventory::{InventoryPage, ProductCard};
pub use login::LoginPage;

use crate::locator::Locator;
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::ui::Ui;
use async_trait::async_trait;

/// Common surface shared by every screen model
#[async_trait]
pub trait PageModel<S: Session>: Send + Sync {
    /// Heading text that identifies this screen
    fn title(&self) -> &'static str;

    /// The interaction façade this model drives
    fn ui(&self) -> &Ui<S>;

    /// Whether the session is currently on this screen.
    ///
    /// Waits for the heading element, then compares its text. The default
    /// covers screens identified by the shared `.title` heading.
    async fn is_loaded(&self) -> CartwrightResult<bool> {
        let heading = self.ui().text(&Locator::new(".title")).await?;
        Ok(heading == self.title())
    }
}

/// Derive the element key the storefront embeds in its add/remove button
/// hooks from a displayed product name.
///
/// Lowercase, whitespace runs become single hyphens, parentheses are
/// dropped. Dots and other punctuation pass through untouched.
#[must_use]
pub fn product_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            pending_hyphen = !key.is_empty();
            continue;
        }
        if c == '(' || c == ')' {
            continue;
        }
        if pending_hyphen {
            key.push('-');
            pending_hyphen = false;
        }
        key.extend(c.to_lowercase());
    }
    key
}

/// Locator for a product's add-to-cart button
#[must_use]
pub fn add_to_cart_locator(product_name: &str) -> Locator {
    Locator::data_test(format!("add-to-cart-{}", product_key(product_name)))
}

/// Locator for a product's remove button
#[must_use]
pub fn remove_locator(product_name: &str) -> Locator {
    Locator::data_test(format!("remove-{}", product_key(product_name)))
}
