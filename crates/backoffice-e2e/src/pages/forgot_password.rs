//! Forgot-password screen.

use crate::browser::Page;
use crate::config::SuiteConfig;
use crate::locator::{Locator, Selector};
use crate::pages::PageObject;
use crate::result::E2eResult;
use crate::wait::{safe_click, wait_for_visible, wait_url_contains, DEFAULT_WAIT_TIMEOUT_MS};

/// Page object for the password-reset request form.
#[derive(Debug)]
pub struct ForgotPasswordPage<'a> {
    page: &'a Page,
    config: &'a SuiteConfig,
    email_input: Locator,
    submit_button: Locator,
    login_now_link: Locator,
    error_message: Locator,
    validation_error: Locator,
    success_message: Locator,
}

impl<'a> ForgotPasswordPage<'a> {
    /// Bind the forgot-password locator table to a page
    #[must_use]
    pub fn new(page: &'a Page, config: &'a SuiteConfig) -> Self {
        Self {
            page,
            config,
            email_input: Locator::css("input[type='email']")
                .or(Selector::css("input[name='email']"))
                .or(Selector::xpath("//input[contains(@placeholder,'mail')]")),
            submit_button: Locator::xpath("//button[text()='Submit']")
                .or(Selector::css("button[type='submit']")),
            login_now_link: Locator::xpath("//a[text()='Login now']")
                .or(Selector::css("a[href='/auth/login']")),
            error_message: Locator::xpath("//*[contains(@class, 'ant-message')]")
                .or(Selector::xpath("//*[contains(text(), 'User not found')]"))
                .or(Selector::xpath("//*[contains(@class, 'error')]")),
            validation_error: Locator::xpath(
                "//*[contains(text(), 'Please enter a valid email')]",
            )
            .or(Selector::xpath("//*[contains(@class, 'ant-form-item-explain')]")),
            success_message: Locator::xpath("//*[contains(@class, 'ant-message')]")
                .or(Selector::xpath("//*[contains(text(), 'sent')]")),
        }
    }

    /// Navigate to the forgot-password page and wait for its controls
    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.forgot_password_url).await?;
        wait_for_visible(self.page, &self.email_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        wait_for_visible(self.page, &self.submit_button, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Fill the email field, replacing any existing value
    pub async fn fill_email(&self, email: &str) -> E2eResult<()> {
        wait_for_visible(self.page, &self.email_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.clear_and_type(&self.email_input, email).await
    }

    /// Click the submit button
    pub async fn submit(&self) -> E2eResult<()> {
        safe_click(self.page, &self.submit_button, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Complete a password-reset request
    pub async fn request_reset(&self, email: &str) -> E2eResult<()> {
        self.fill_email(email).await?;
        self.submit().await
    }

    /// Follow the "Login now" link back to the login screen
    pub async fn click_login_now(&self) -> E2eResult<()> {
        safe_click(self.page, &self.login_now_link, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Verify the forgot-password page is fully displayed
    pub async fn expect_at_forgot_password(&self) -> E2eResult<()> {
        wait_for_visible(self.page, &self.email_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        wait_for_visible(self.page, &self.submit_button, DEFAULT_WAIT_TIMEOUT_MS).await?;
        wait_url_contains(self.page, "/auth/forgot-password", DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Whether an inline email validation error is present
    pub async fn has_validation_error(&self) -> bool {
        self.page
            .count(&self.validation_error)
            .await
            .map(|n| n > 0)
            .unwrap_or(false)
    }

    /// Validation error text, waiting briefly for it to render
    pub async fn validation_error(&self) -> Option<String> {
        wait_for_visible(self.page, &self.validation_error, 3000).await.ok()?;
        self.page.element_text(&self.validation_error).await.ok()?
    }

    /// Error message text (e.g. "User not found"), waiting for it to render
    pub async fn error_message(&self) -> Option<String> {
        wait_for_visible(self.page, &self.error_message, 5000).await.ok()?;
        self.page.element_text(&self.error_message).await.ok()?
    }

    /// Success message text, if a reset email was actually sent
    pub async fn success_message(&self) -> Option<String> {
        wait_for_visible(self.page, &self.success_message, 5000).await.ok()?;
        self.page.element_text(&self.success_message).await.ok()?
    }
}

impl PageObject for ForgotPasswordPage<'_> {
    fn url_pattern(&self) -> &str {
        "/auth/forgot-password"
    }
}
