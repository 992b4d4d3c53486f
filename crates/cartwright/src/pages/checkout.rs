//! Checkout screens: information form, order overview, confirmation.

use crate::locator::Locator;
use crate::pages::{CartPage, InventoryPage, PageModel};
use crate::pricing::{
    parse_labeled_price, CartLine, PriceSummary, ITEM_TOTAL_PREFIX, TAX_PREFIX, TOTAL_PREFIX,
};
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::ui::Ui;
use crate::wait::Condition;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Checkout step one: the shipping information form
#[derive(Debug, Clone)]
pub struct CheckoutInfoPage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> CheckoutInfoPage<S> {
    /// Model the information form over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn heading() -> Locator {
        Locator::new(".title")
    }

    fn first_name_input() -> Locator {
        Locator::data_test("firstName")
    }

    fn last_name_input() -> Locator {
        Locator::data_test("lastName")
    }

    fn postal_code_input() -> Locator {
        Locator::data_test("postalCode")
    }

    fn continue_button() -> Locator {
        Locator::data_test("continue")
    }

    fn cancel_button() -> Locator {
        Locator::data_test("cancel")
    }

    fn error_banner() -> Locator {
        Locator::data_test("error")
    }

    /// Block until the form heading is showing
    pub async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        self.ui.wait_for(&Self::heading(), Condition::Visible).await?;
        let heading = self.ui.text(&Self::heading()).await?;
        crate::assertion::ensure_eq("checkout heading", &self.title(), &heading.as_str())
    }

    /// Fill all three form fields
    pub async fn fill_info(
        &self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> CartwrightResult<()> {
        self.ui.fill(&Self::first_name_input(), first_name).await?;
        self.ui.fill(&Self::last_name_input(), last_name).await?;
        self.ui.fill(&Self::postal_code_input(), postal_code).await
    }

    /// Submit the form and wait for the overview screen
    pub async fn continue_to_overview(&self) -> CartwrightResult<CheckoutOverviewPage<S>> {
        self.ui.click(&Self::continue_button()).await?;
        let overview = CheckoutOverviewPage::new(self.ui.clone());
        overview.wait_until_loaded().await?;
        Ok(overview)
    }

    /// Submit a form expected to fail validation and return the error text
    pub async fn continue_expecting_error(&self) -> CartwrightResult<String> {
        self.ui.click(&Self::continue_button()).await?;
        self.ui.text(&Self::error_banner()).await
    }

    /// Whether the validation error banner is showing (probe)
    pub async fn has_error(&self) -> CartwrightResult<bool> {
        self.ui.is_visible(&Self::error_banner()).await
    }

    /// Abandon checkout, back to the cart
    pub async fn cancel(&self) -> CartwrightResult<CartPage<S>> {
        self.ui.click(&Self::cancel_button()).await?;
        let cart = CartPage::new(self.ui.clone());
        cart.wait_until_loaded().await?;
        Ok(cart)
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for CheckoutInfoPage<S> {
    fn title(&self) -> &'static str {
        "Checkout: Your Information"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }
}

/// Checkout step two: the order overview with the price summary
#[derive(Debug, Clone)]
pub struct CheckoutOverviewPage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> CheckoutOverviewPage<S> {
    /// Model the overview screen over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn heading() -> Locator {
        Locator::new(".title")
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

    fn subtotal_label() -> Locator {
        Locator::new(".summary_subtotal_label")
    }

    fn tax_label() -> Locator {
        Locator::new(".summary_tax_label")
    }

    fn total_label() -> Locator {
        Locator::new(".summary_total_label")
    }

    fn finish_button() -> Locator {
        Locator::data_test("finish")
    }

    fn cancel_button() -> Locator {
        Locator::data_test("cancel")
    }

    /// Block until the overview heading is showing
    pub async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        self.ui.wait_for(&Self::heading(), Condition::Visible).await?;
        let heading = self.ui.text(&Self::heading()).await?;
        crate::assertion::ensure_eq("overview heading", &self.title(), &heading.as_str())
    }

    /// Line items shown on the overview
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

    /// Scrape the displayed summary lines into a [`PriceSummary`].
    ///
    /// `tax_rate` is carried through so the scraped summary can be compared
    /// against an independently computed one; the page itself does not show
    /// the rate.
    pub async fn displayed_summary(&self, tax_rate: Decimal) -> CartwrightResult<PriceSummary> {
        let subtotal_line = self.ui.text(&Self::subtotal_label()).await?;
        let tax_line = self.ui.text(&Self::tax_label()).await?;
        let total_line = self.ui.text(&Self::total_label()).await?;
        Ok(PriceSummary {
            subtotal: parse_labeled_price(&subtotal_line, ITEM_TOTAL_PREFIX)?,
            tax_rate,
            tax: parse_labeled_price(&tax_line, TAX_PREFIX)?,
            total: parse_labeled_price(&total_line, TOTAL_PREFIX)?,
        })
    }

    /// Place the order and wait for the confirmation screen
    pub async fn finish(&self) -> CartwrightResult<CheckoutCompletePage<S>> {
        self.ui.click(&Self::finish_button()).await?;
        let complete = CheckoutCompletePage::new(self.ui.clone());
        complete.wait_until_loaded().await?;
        Ok(complete)
    }

    /// Abandon checkout; the overview's cancel returns to the inventory,
    /// not the cart
    pub async fn cancel(&self) -> CartwrightResult<InventoryPage<S>> {
        self.ui.click(&Self::cancel_button()).await?;
        let inventory = InventoryPage::new(self.ui.clone());
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for CheckoutOverviewPage<S> {
    fn title(&self) -> &'static str {
        "Checkout: Overview"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }
}

/// Checkout step three: the order confirmation
#[derive(Debug, Clone)]
pub struct CheckoutCompletePage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> CheckoutCompletePage<S> {
    /// Model the confirmation screen over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn complete_header() -> Locator {
        Locator::new(".complete-header")
    }

    fn back_home_button() -> Locator {
        Locator::data_test("back-to-products")
    }

    /// Block until the confirmation header is showing with the expected text
    pub async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        let header = self.ui.text(&Self::complete_header()).await?;
        crate::assertion::ensure_eq(
            "confirmation header",
            &"Thank you for your order!",
            &header.as_str(),
        )
    }

    /// The confirmation header text
    pub async fn header(&self) -> CartwrightResult<String> {
        self.ui.text(&Self::complete_header()).await
    }

    /// Return to the inventory screen; the completed order's cart is empty
    pub async fn back_home(&self) -> CartwrightResult<InventoryPage<S>> {
        self.ui.click(&Self::back_home_button()).await?;
        let inventory = InventoryPage::new(self.ui.clone());
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for CheckoutCompletePage<S> {
    fn title(&self) -> &'static str {
        "Checkout: Complete!"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }

    /// Identified by the confirmation header rather than the shared heading
    async fn is_loaded(&self) -> CartwrightResult<bool> {
        if !self.ui.is_visible(&Self::complete_header()).await? {
            return Ok(false);
        }
        Ok(self.header().await? == "Thank you for your order!")
    }
}
