//! Inventory (product listing) screen model.

use crate::locator::Locator;
use crate::pages::{
    add_to_cart_locator, remove_locator, CartPage, LoginPage, PageModel, ProductDetailPage,
};
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use crate::ui::Ui;
use crate::wait::Condition;
use async_trait::async_trait;

/// Name, description and displayed price of one listed product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Displayed name
    pub name: String,
    /// Displayed description
    pub description: String,
    /// Displayed price, `$` prefix included
    pub price: String,
}

/// The product listing: catalog grid, sort dropdown, cart badge
#[derive(Debug, Clone)]
pub struct InventoryPage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> InventoryPage<S> {
    /// Model the inventory screen over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn heading() -> Locator {
        Locator::new(".title")
    }

    fn item() -> Locator {
        Locator::new(".inventory_item")
    }

    fn item_name() -> Locator {
        Locator::new(".inventory_item_name")
    }

    fn item_description() -> Locator {
        Locator::new(".inventory_item_desc")
    }

    fn item_price() -> Locator {
        Locator::new(".inventory_item_price")
    }

    fn sort_dropdown() -> Locator {
        Locator::data_test("product_sort_container")
    }

    fn cart_link() -> Locator {
        Locator::new(".shopping_cart_link")
    }

    fn cart_badge() -> Locator {
        Locator::new(".shopping_cart_badge")
    }

    fn menu_button() -> Locator {
        Locator::new("#react-burger-menu-btn")
    }

    fn logout_link() -> Locator {
        Locator::new("#logout_sidebar_link")
    }

    /// Block until the screen heading reads "Products"
    pub async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        self.ui.wait_for(&Self::heading(), Condition::Visible).await?;
        let heading = self.ui.text(&Self::heading()).await?;
        crate::assertion::ensure_eq("inventory heading", &self.title(), &heading.as_str())
    }

    /// Displayed names of all listed products, in page order
    pub async fn product_names(&self) -> CartwrightResult<Vec<String>> {
        self.ui.texts(&Self::item_name()).await
    }

    /// Displayed prices of all listed products, in page order
    pub async fn product_prices(&self) -> CartwrightResult<Vec<String>> {
        self.ui.texts(&Self::item_price()).await
    }

    /// Number of products currently listed
    pub async fn product_count(&self) -> CartwrightResult<usize> {
        self.ui.count(&Self::item()).await
    }

    /// Name, description and price of the Nth listed product
    pub async fn product(&self, index: usize) -> CartwrightResult<ProductCard> {
        Ok(ProductCard {
            name: self.ui.nth_text(&Self::item_name(), index).await?,
            description: self.ui.nth_text(&Self::item_description(), index).await?,
            price: self.ui.nth_text(&Self::item_price(), index).await?,
        })
    }

    /// Add a product to the cart by its displayed name
    pub async fn add_to_cart(&self, product_name: &str) -> CartwrightResult<()> {
        self.ui.click(&add_to_cart_locator(product_name)).await
    }

    /// Remove a product from the cart by its displayed name
    pub async fn remove_from_cart(&self, product_name: &str) -> CartwrightResult<()> {
        self.ui.click(&remove_locator(product_name)).await
    }

    /// Whether a product's button currently reads Remove (probe)
    pub async fn is_in_cart(&self, product_name: &str) -> CartwrightResult<bool> {
        self.ui.is_visible(&remove_locator(product_name)).await
    }

    /// Cart badge count, `None` when the badge is absent.
    ///
    /// An empty cart removes the badge entirely; it never shows "0".
    pub async fn badge_count(&self) -> CartwrightResult<Option<u32>> {
        if !self.ui.is_visible(&Self::cart_badge()).await? {
            return Ok(None);
        }
        let raw = self.ui.text(&Self::cart_badge()).await?;
        let n = raw
            .parse()
            .map_err(|_| CartwrightError::SessionError {
                message: format!("cart badge shows non-numeric text {raw:?}"),
            })?;
        Ok(Some(n))
    }

    /// Select a sort order (`az`, `za`, `lohi`, `hilo`) and wait for the
    /// re-rendered listing.
    pub async fn sort_by(&self, value: &str) -> CartwrightResult<()> {
        self.ui.select(&Self::sort_dropdown(), value).await?;
        // the listing re-renders on sort; wait for it to be back
        self.ui.wait_for(&Self::item(), Condition::Visible).await?;
        Ok(())
    }

    /// Currently selected sort order value
    pub async fn current_sort(&self) -> CartwrightResult<String> {
        self.ui.input_value(&Self::sort_dropdown()).await
    }

    /// Log out through the burger menu, back to the login screen
    pub async fn logout(&self) -> CartwrightResult<LoginPage<S>> {
        self.ui.click(&Self::menu_button()).await?;
        self.ui.click(&Self::logout_link()).await?;
        let login = LoginPage::new(self.ui.clone());
        login
            .ui()
            .wait_for(&Locator::data_test("login-button"), Condition::Visible)
            .await?;
        Ok(login)
    }

    /// Open a product's detail view by clicking its name on the listing
    pub async fn open_product(&self, product_name: &str) -> CartwrightResult<ProductDetailPage<S>> {
        self.ui
            .click(&ProductDetailPage::<S>::listing_link(product_name))
            .await?;
        let detail = ProductDetailPage::new(self.ui.clone());
        detail.wait_until_loaded().await?;
        Ok(detail)
    }

    /// Open the detail view of the Nth listed product
    pub async fn open_product_at(&self, index: usize) -> CartwrightResult<ProductDetailPage<S>> {
        let name = self.ui.nth_text(&Self::item_name(), index).await?;
        self.open_product(&name).await
    }

    /// Open the cart screen
    pub async fn open_cart(&self) -> CartwrightResult<CartPage<S>> {
        self.ui.click(&Self::cart_link()).await?;
        let cart = CartPage::new(self.ui.clone());
        cart.wait_until_loaded().await?;
        Ok(cart)
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for InventoryPage<S> {
    fn title(&self) -> &'static str {
        "Products"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }
}
