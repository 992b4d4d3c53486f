//! Login screen model.

use crate::locator::Locator;
use crate::pages::{InventoryPage, PageModel};
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::ui::Ui;
use async_trait::async_trait;

/// The login screen: credential fields, submit button, error banner
#[derive(Debug, Clone)]
pub struct LoginPage<S: Session> {
    ui: Ui<S>,
}

impl<S: Session> LoginPage<S> {
    /// Model the login screen over a façade
    #[must_use]
    pub fn new(ui: Ui<S>) -> Self {
        Self { ui }
    }

    fn username_input() -> Locator {
        Locator::data_test("username")
    }

    fn password_input() -> Locator {
        Locator::data_test("password")
    }

    fn login_button() -> Locator {
        Locator::data_test("login-button")
    }

    fn error_banner() -> Locator {
        Locator::data_test("error")
    }

    /// Navigate to the login screen at `base_url`
    pub async fn open(&self, base_url: &str) -> CartwrightResult<()> {
        self.ui.goto(base_url).await?;
        self.ui
            .wait_for(&Self::login_button(), crate::wait::Condition::Visible)
            .await?;
        Ok(())
    }

    /// Fill both credential fields and submit.
    ///
    /// Does not wait for the outcome; use [`Self::login_as`] or
    /// [`Self::login_expecting_error`] for the full transition.
    pub async fn submit_credentials(&self, username: &str, password: &str) -> CartwrightResult<()> {
        self.ui.fill(&Self::username_input(), username).await?;
        self.ui.fill(&Self::password_input(), password).await?;
        self.ui.click(&Self::login_button()).await
    }

    /// Log in and wait for the inventory screen
    pub async fn login_as(
        &self,
        username: &str,
        password: &str,
    ) -> CartwrightResult<InventoryPage<S>> {
        self.submit_credentials(username, password).await?;
        let inventory = InventoryPage::new(self.ui.clone());
        inventory.wait_until_loaded().await?;
        Ok(inventory)
    }

    /// Submit credentials expected to fail and return the banner text
    pub async fn login_expecting_error(
        &self,
        username: &str,
        password: &str,
    ) -> CartwrightResult<String> {
        self.submit_credentials(username, password).await?;
        self.error_message().await
    }

    /// Text of the error banner (waits for it to appear)
    pub async fn error_message(&self) -> CartwrightResult<String> {
        self.ui.text(&Self::error_banner()).await
    }

    /// Whether the error banner is currently showing (probe)
    pub async fn has_error(&self) -> CartwrightResult<bool> {
        self.ui.is_visible(&Self::error_banner()).await
    }

    /// Current value of the username field
    pub async fn username_value(&self) -> CartwrightResult<String> {
        self.ui.input_value(&Self::username_input()).await
    }
}

#[async_trait]
impl<S: Session> PageModel<S> for LoginPage<S> {
    fn title(&self) -> &'static str {
        "Swag Labs"
    }

    fn ui(&self) -> &Ui<S> {
        &self.ui
    }

    /// The login screen has no `.title` heading; presence of the submit
    /// button identifies it.
    async fn is_loaded(&self) -> CartwrightResult<bool> {
        self.ui.is_visible(&Self::login_button()).await
    }
}
