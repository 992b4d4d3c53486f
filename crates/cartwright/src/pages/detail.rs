//! Product detail screen model.
//!
//! Reached by clicking a product's name (or image) on the listing. Unlike
//! the listing, the detail view's add/remove buttons carry no product key
//! in their hooks; the one product on screen owns them.

use crate::locator::{Locator, Selector};
use crate::pages::{CartPage, InventoryPage, PageModel};
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::ui::Ui;
use crate::wait::Condition;
use async_trait::async_trait;

/// A single product's detail view: large name, description, price, and a
/// keyless add/remove button pair
#[derive(Debug, Clone)]
pub struct ProductDetailPage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> ProductDetailPage<S> {
    /// Model the detail screen over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn detail_name() -> Locator {
        Locator::new(".inventory_details_name.large_size")
    }

    fn detail_description() -> Locator {
        Locator::new(".inventory_details_desc")
    }

    fn detail_price() -> Locator {
        Locator::new(".inventory_details_price")
    }

    fn add_button() -> Locator {
        Locator::data_test("add-to-cart")
    }

    fn remove_button() -> Locator {
        Locator::data_test("remove")
    }

    fn back_button() -> Locator {
        Locator::data_test("back-to-products")
    }

    fn cart_link() -> Locator {
        Locator::new(".shopping_cart_link")
    }

    /// Block until the detail name element renders
    pub async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        self.ui
            .wait_for(&Self::detail_name(), Condition::Visible)
            .await?;
        Ok(())
    }

    /// Displayed product name
    pub async fn name(&self) -> CartwrightResult<String> {
        self.ui.text(&Self::detail_name()).await
    }

    /// Displayed product description
    pub async fn description(&self) -> CartwrightResult<String> {
        self.ui.text(&Self::detail_description()).await
    }

    /// Displayed price, `$` prefix included
    pub async fn price(&self) -> CartwrightResult<String> {
        self.ui.text(&Self::detail_price()).await
    }

    /// Add the shown product to the cart
    pub async fn add_to_cart(&self) -> CartwrightResult<()> {
        self.ui.click(&Self::add_button()).await
    }

    /// Remove the shown product from the cart
    pub async fn remove_from_cart(&self) -> CartwrightResult<()> {
        self.ui.click(&Self::remove_button()).await
    }

    /// Whether the button currently reads Remove (probe)
    pub async fn is_in_cart(&self) -> CartwrightResult<bool> {
        self.ui.is_visible(&Self::remove_button()).await
    }

    /// Return to the product listing
    pub async fn back_to_products(&self) -> CartwrightResult<InventoryPage<S>> {
        self.ui.click(&Self::back_button()).await?;
        let inventory = InventoryPage::new(self.ui.clone());
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }

    /// Open the cart screen
    pub async fn open_cart(&self) -> CartwrightResult<CartPage<S>> {
        self.ui.click(&Self::cart_link()).await?;
        let cart = CartPage::new(self.ui.clone());
        cart.wait_until_loaded().await?;
        Ok(cart)
    }

    /// Locator for a product's name link on the listing, by displayed name
    #[must_use]
    pub fn listing_link(product_name: &str) -> Locator {
        Locator::from_selector(Selector::css_with_text(
            ".inventory_item_name",
            product_name,
        ))
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for ProductDetailPage<S> {
    /// The detail screen has no `.title` heading; the header shows the
    /// back link instead.
    fn title(&self) -> &'static str {
        "Back to products"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }

    async fn is_loaded(&self) -> CartwrightResult<bool> {
        self.ui.is_visible(&Self::detail_name()).await
    }
}
