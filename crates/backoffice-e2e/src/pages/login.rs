//! Login screen.

use tracing::{debug, warn};

use crate::browser::Page;
use crate::config::SuiteConfig;
use crate::locator::Locator;
use crate::pages::PageObject;
use crate::result::E2eResult;
use crate::wait::{safe_click, wait_for_visible, DEFAULT_WAIT_TIMEOUT_MS};

/// Page object for the admin login form.
#[derive(Debug)]
pub struct LoginPage<'a> {
    page: &'a Page,
    config: &'a SuiteConfig,
    username_input: Locator,
    password_input: Locator,
    remember_me_checkbox: Locator,
    remember_me_wrapper: Locator,
    submit_button: Locator,
    forgot_password_link: Locator,
    login_form: Locator,
    validation_errors: Locator,
    error_message: Locator,
}

impl<'a> LoginPage<'a> {
    /// Bind the login locator table to a page
    #[must_use]
    pub fn new(page: &'a Page, config: &'a SuiteConfig) -> Self {
        Self {
            page,
            config,
            username_input: Locator::id("loginForm_username"),
            password_input: Locator::id("loginForm_password"),
            remember_me_checkbox: Locator::css(".ant-checkbox-input"),
            remember_me_wrapper: Locator::css(".ant-checkbox-wrapper"),
            submit_button: Locator::css("button[type='submit']"),
            forgot_password_link: Locator::css("a[href='/auth/forgot-password']"),
            login_form: Locator::id("loginForm"),
            validation_errors: Locator::css(".ant-form-item-explain-error"),
            error_message: Locator::css(".ant-message, .ant-notification"),
        }
    }

    /// Navigate to the login page and wait for the form
    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.login_url).await?;
        wait_for_visible(self.page, &self.login_form, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Wait until the username input is visible
    pub async fn wait_ready(&self, timeout_ms: u64) -> E2eResult<()> {
        wait_for_visible(self.page, &self.username_input, timeout_ms).await
    }

    /// Fill the username field, replacing any existing value
    pub async fn fill_username(&self, username: &str) -> E2eResult<()> {
        wait_for_visible(self.page, &self.username_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.clear_and_type(&self.username_input, username).await
    }

    /// Fill the password field, replacing any existing value
    pub async fn fill_password(&self, password: &str) -> E2eResult<()> {
        wait_for_visible(self.page, &self.password_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.clear_and_type(&self.password_input, password).await
    }

    /// Best-effort "Remember me" toggle.
    ///
    /// The real checkbox input is visually hidden, so the wrapper is clicked
    /// first with the input itself as fallback. Failures are logged, never
    /// propagated.
    pub async fn toggle_remember_me(&self, should_check: bool) {
        let current = match self.page.element_selected(&self.remember_me_checkbox).await {
            Ok(state) => state,
            Err(error) => {
                warn!(%error, "remember-me checkbox not found");
                return;
            }
        };
        if current == should_check {
            debug!(state = current, "remember-me already in desired state");
            return;
        }
        let clicked = match self.page.click(&self.remember_me_wrapper).await {
            Ok(()) => true,
            Err(_) => self.page.click(&self.remember_me_checkbox).await.is_ok(),
        };
        if !clicked {
            warn!("remember-me toggle could not be clicked");
            return;
        }
        match self.page.element_selected(&self.remember_me_checkbox).await {
            Ok(state) => debug!(state, "remember-me toggled"),
            Err(error) => warn!(%error, "could not re-read remember-me state"),
        }
    }

    /// Click the submit button
    pub async fn submit(&self) -> E2eResult<()> {
        safe_click(self.page, &self.submit_button, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Perform a complete login
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> E2eResult<()> {
        self.fill_username(username).await?;
        self.fill_password(password).await?;
        if remember_me {
            self.toggle_remember_me(true).await;
        }
        self.submit().await
    }

    /// Follow the forgot-password link
    pub async fn click_forgot_password(&self) -> E2eResult<()> {
        safe_click(self.page, &self.forgot_password_link, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Whether the login form is currently displayed (short wait)
    pub async fn is_form_displayed(&self) -> bool {
        wait_for_visible(self.page, &self.login_form, 3000).await.is_ok()
    }

    /// Whether any inline validation error is shown
    pub async fn has_validation_errors(&self) -> bool {
        self.page
            .count(&self.validation_errors)
            .await
            .map(|n| n > 0)
            .unwrap_or(false)
    }

    /// All currently rendered inline validation messages
    pub async fn validation_error_texts(&self) -> E2eResult<Vec<String>> {
        self.page.texts(&self.validation_errors).await
    }

    /// Wait for at least one inline validation error to render
    pub async fn wait_validation_errors(&self, timeout_ms: u64) -> E2eResult<()> {
        wait_for_visible(self.page, &self.validation_errors, timeout_ms).await
    }

    /// Whether a message/notification error is shown
    pub async fn has_error_message(&self) -> bool {
        self.page
            .count(&self.error_message)
            .await
            .map(|n| n > 0)
            .unwrap_or(false)
    }

    /// Wait for a message/notification error to render, returning its text
    pub async fn wait_for_error_message(&self, timeout_ms: u64) -> Option<String> {
        wait_for_visible(self.page, &self.error_message, timeout_ms).await.ok()?;
        self.error_message().await
    }

    /// First non-empty message/notification text, if any
    pub async fn error_message(&self) -> Option<String> {
        let texts = self.page.texts(&self.error_message).await.ok()?;
        texts
            .into_iter()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    }

    /// Blank out both fields and refocus the username input so the form
    /// re-validates. Cleanup helper; failures are logged, never propagated.
    pub async fn clear_all_fields(&self) {
        let result: E2eResult<()> = async {
            self.fill_username("").await?;
            self.fill_password("").await?;
            self.page.click(&self.username_input).await
        }
        .await;
        if let Err(error) = result {
            warn!(%error, "failed to clear login form fields");
        }
    }

    /// Reload the login page to force a clean form state.
    /// Cleanup helper; failures are logged, never propagated.
    pub async fn refresh(&self) {
        let result: E2eResult<()> = async {
            self.page.refresh().await?;
            wait_for_visible(self.page, &self.login_form, DEFAULT_WAIT_TIMEOUT_MS).await
        }
        .await;
        if let Err(error) = result {
            warn!(%error, "failed to refresh login page");
        }
    }
}

impl PageObject for LoginPage<'_> {
    fn url_pattern(&self) -> &str {
        "/auth/login"
    }
}
