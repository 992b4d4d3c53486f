//! Cart screen model.

use crate::locator::Locator;
use crate::pages::{remove_locator, CheckoutInfoPage, InventoryPage, PageModel};
use crate::pricing::CartLine;
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::ui::Ui;
use crate::wait::Condition;
use async_trait::async_trait;

/// The cart screen: line items, remove buttons, checkout entry point
#[derive(Debug, Clone)]
pub struct CartPage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> CartPage<S> {
    /// Model the cart screen over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn heading() -> Locator {
        Locator::new(".title")
    }

    fn item() -> Locator {
        Locator::new(".cart_item")
    }

    fn item_name() -> Locator {
        Locator::new(".cart_item .inventory_item_name")
    }

    fn item_price() -> Locator {
        Locator::new(".cart_item .inventory_item_price")
    }

    fn item_quantity() -> Locator {
        Locator::new(".cart_item .cart_quantity")
    }

    fn checkout_button() -> Locator {
        Locator::data_test("checkout")
    }

    fn continue_shopping_button() -> Locator {
        Locator::data_test("continue-shopping")
    }

    /// Block until the screen heading reads "Your Cart"
    pub async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        self.ui.wait_for(&Self::heading(), Condition::Visible).await?;
        let heading = self.ui.text(&Self::heading()).await?;
        crate::assertion::ensure_eq("cart heading", &self.title(), &heading.as_str())
    }

    /// Number of line items currently in the cart (no wait; an empty cart
    /// legitimately has zero)
    pub async fn item_count(&self) -> CartwrightResult<usize> {
        self.ui.count(&Self::item()).await
    }

    /// All line items as displayed: name, unit price, quantity.
    ///
    /// The storefront caps quantity at one per product, so a re-added
    /// product appears as the same single line, never quantity two.
    pub async fn items(&self) -> CartwrightResult<Vec<CartLine>> {
        let names = self.ui.texts(&Self::item_name()).await?;
        let prices = self.ui.texts(&Self::item_price()).await?;
        let quantities = self.ui.texts(&Self::item_quantity()).await?;
        names
            .iter()
            .zip(prices.iter())
            .zip(quantities.iter())
            .map(|((name, price), quantity)| CartLine::from_display(name, price, quantity))
            .collect()
    }

    /// Displayed names of the cart's line items
    pub async fn item_names(&self) -> CartwrightResult<Vec<String>> {
        self.ui.texts(&Self::item_name()).await
    }

    /// Displayed unit prices of the cart's line items
    pub async fn item_prices(&self) -> CartwrightResult<Vec<String>> {
        self.ui.texts(&Self::item_price()).await
    }

    /// Whether the cart has no line items
    pub async fn is_empty(&self) -> CartwrightResult<bool> {
        Ok(self.item_count().await? == 0)
    }

    /// Remove a product by its displayed name
    pub async fn remove(&self, product_name: &str) -> CartwrightResult<()> {
        self.ui.click(&remove_locator(product_name)).await
    }

    /// Whether a product is present in the cart (probe on its remove button)
    pub async fn contains(&self, product_name: &str) -> CartwrightResult<bool> {
        self.ui.is_visible(&remove_locator(product_name)).await
    }

    /// Proceed to the checkout information form
    pub async fn checkout(&self) -> CartwrightResult<CheckoutInfoPage<S>> {
        self.ui.click(&Self::checkout_button()).await?;
        let info = CheckoutInfoPage::new(self.ui.clone());
        info.wait_until_loaded().await?;
        Ok(info)
    }

    /// Return to the inventory screen
    pub async fn continue_shopping(&self) -> CartwrightResult<InventoryPage<S>> {
        self.ui.click(&Self::continue_shopping_button()).await?;
        let inventory = InventoryPage::new(self.ui.clone());
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for CartPage<S> {
    fn title(&self) -> &'static str {
        "Your Cart"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }
}
