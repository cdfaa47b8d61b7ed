//! Discount creation form.
//!
//! The busiest screen in the suite: a discount code input with
//! uppercase/length normalization, mutually exclusive percentage vs.
//! fixed-amount flows gated by radio buttons, toggle switches read through
//! `aria-checked`, a package-selection popup, and a large family of inline
//! validation messages.
//!
//! The form carries no test-id contract, so most locators chain several
//! alternates (id, attribute match, structural path).

use std::sync::OnceLock;
use std::time::Instant;

use regex::Regex;
use tracing::{debug, warn};

use crate::browser::Page;
use crate::config::SuiteConfig;
use crate::locator::{Locator, Selector};
use crate::pages::PageObject;
use crate::result::{E2eError, E2eResult};
use crate::wait::{
    safe_click, wait_for_clickable, wait_for_gone, wait_for_visible, WaitOptions,
    DEFAULT_WAIT_TIMEOUT_MS,
};

/// Inline messages the application renders near specific fields. When the
/// generic form-error scan misses, the expected text is matched against
/// these keys and located directly.
const INLINE_ERROR_KEYS: &[&str] = &[
    "Please fill out this field",
    "Accept only latin letters",
    "Only accepted 15 characters",
    "This code has already been created",
    "Enter a number greater than 0 and less than or equal to 100,000",
    "Enter a number greater than 0 and less than or equal to 100",
    "Value must be greater than 0",
    "Max Quantity per user must less than",
    "Please choose date later than current date",
    "Please enter a valid email",
    "Email does not exist",
    "Email has already been added",
    "Invalid referral code",
];

fn toast_success_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)success|created|added").unwrap())
}

fn body_success_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)create.*discount.*success|discount.*created|successfully.*created")
            .unwrap()
    })
}

/// Derive a unique, form-legal discount code (max 15 chars, uppercase).
fn generated_code() -> String {
    let seconds = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("AUTO{seconds}").chars().take(15).collect()
}

/// Page object for the discount creation form.
#[derive(Debug)]
pub struct CreateDiscountPage<'a> {
    page: &'a Page,
    config: &'a SuiteConfig,
    code_input: Locator,
    public_toggle: Locator,
    auto_display_trading_toggle: Locator,
    auto_display_custom_toggle: Locator,
    percent_radio: Locator,
    fixed_radio: Locator,
    percentage_off_input: Locator,
    maximum_amount_input: Locator,
    fixed_amount_input: Locator,
    min_initial_balance_radio: Locator,
    min_initial_balance_input: Locator,
    min_amount_radio: Locator,
    min_amount_input: Locator,
    description_input: Locator,
    expiration_date_input: Locator,
    specify_quantity_input: Locator,
    max_per_user_input: Locator,
    add_package_button: Locator,
    package_popup: Locator,
    package_id_input: Locator,
    package_save_button: Locator,
    add_email_input: Locator,
    add_email_button: Locator,
    ap_referral_input: Locator,
    ap_referral_add_button: Locator,
    status_toggle: Locator,
    create_button: Locator,
    toast: Locator,
    form_errors: Locator,
}

impl<'a> CreateDiscountPage<'a> {
    /// Bind the discount-form locator table to a page
    #[must_use]
    pub fn new(page: &'a Page, config: &'a SuiteConfig) -> Self {
        Self {
            page,
            config,
            code_input: Locator::id("code")
                .or(Selector::css("input[name='discountCode']"))
                .or(Selector::xpath(
                    "//label[contains(text(),'Discount Code')]/..//input",
                )),
            public_toggle: Locator::xpath(
                "//*[contains(text(),'Public to user')]/..//button",
            )
            .or(Selector::xpath(
                "//label[contains(text(),'Public to user')]//button",
            )),
            auto_display_trading_toggle: Locator::xpath(
                "//*[contains(text(),'Auto Display in Checkout For Trading Capital')]/..//button",
            ),
            auto_display_custom_toggle: Locator::xpath(
                "//*[contains(text(),'Auto display in Customize Package')]/..//button",
            ),
            percent_radio: Locator::xpath(
                "//label[contains(text(),'Percentage Discount')]//input[@type='radio']",
            )
            .or(Selector::xpath(
                "//span[contains(text(),'Percentage Discount')]/..//input[@type='radio']",
            )),
            fixed_radio: Locator::xpath(
                "//label[contains(text(),'Fixed Amount Discount')]//input[@type='radio']",
            )
            .or(Selector::xpath(
                "//span[contains(text(),'Fixed Amount Discount')]/..//input[@type='radio']",
            )),
            percentage_off_input: Locator::id("percentageOff")
                .or(Selector::css("input[placeholder='Enter percentage off']")),
            maximum_amount_input: Locator::id("maximumDiscountAmount")
                .or(Selector::css("input[placeholder='Enter maximum amount']")),
            fixed_amount_input: Locator::css("input[placeholder='Enter discount amount']")
                .or(Selector::css("input[name='fixedAmount']")),
            min_initial_balance_radio: Locator::xpath(
                "//label[contains(text(),'Minimum Initial Balance')]//input[@type='radio']",
            ),
            min_initial_balance_input: Locator::css(
                "input[placeholder='Enter Minimum Initial Balance']",
            )
            .or(Selector::css("input[name='minInitialBalance']")),
            min_amount_radio: Locator::xpath(
                "//label[contains(text(),'Minimum Amount')]//input[@type='radio']",
            ),
            min_amount_input: Locator::css("input[placeholder='Enter Minimum Amount']")
                .or(Selector::css("input[name='minAmount']")),
            description_input: Locator::css("textarea[placeholder='Enter Description']")
                .or(Selector::css("textarea[name='description']")),
            expiration_date_input: Locator::css("input[placeholder='Select date']")
                .or(Selector::css("input[name='expirationDate']"))
                .or(Selector::css("input[type='date']")),
            specify_quantity_input: Locator::id("specificQuantity")
                .or(Selector::css("input[placeholder='Enter Quantities']")),
            max_per_user_input: Locator::css("input[name='maxPerUser']").or(Selector::xpath(
                "//label[contains(text(),'Max Quantity per user')]/..//input",
            )),
            add_package_button: Locator::xpath("//button[contains(text(),'Add New Package')]")
                .or(Selector::xpath("//button[contains(text(),'Add Package')]")),
            package_popup: Locator::css("div[role='dialog']").or(Selector::xpath(
                "//div[contains(@class,'modal') or contains(@class,'popup')]",
            )),
            package_id_input: Locator::css("input[name='packageId']")
                .or(Selector::xpath("//input[contains(@placeholder,'Package ID')]")),
            package_save_button: Locator::xpath(
                "//div[@role='dialog']//button[contains(text(),'Save')]",
            )
            .or(Selector::xpath(
                "//div[contains(@class,'modal')]//button[contains(text(),'Save')]",
            )),
            add_email_input: Locator::css("input[placeholder='Enter Email']"),
            add_email_button: Locator::xpath(
                "//input[@placeholder='Enter Email']/following-sibling::button",
            ),
            ap_referral_input: Locator::css("input[placeholder='Enter AP Referral']"),
            ap_referral_add_button: Locator::xpath(
                "//input[@placeholder='Enter AP Referral']/following-sibling::button",
            ),
            status_toggle: Locator::xpath("//*[contains(text(),'Active')]/..//button")
                .or(Selector::xpath("//label[contains(text(),'Active')]//button")),
            create_button: Locator::xpath("//button[contains(text(),'Create')]")
                .or(Selector::css("button[type='submit']"))
                .or(Selector::xpath("//button[contains(text(),'Save')]")),
            toast: Locator::css(".ant-message, .ant-notification").or(Selector::xpath(
                "//div[contains(@class,'toast') or contains(@class,'notification')]",
            )),
            form_errors: Locator::css(
                ".ant-form-item-explain, .ant-form-item-explain-error",
            )
            .or(Selector::xpath(
                "//div[contains(@class,'error') or contains(@class,'invalid-feedback')]",
            )),
        }
    }

    /// Navigate to the creation form.
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::UnexpectedState`] when the app redirects away
    /// (an unauthenticated session lands back on the login screen).
    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.create_discount_url).await?;

        let url = self.page.current_url().await?;
        if !url.contains("/discount/create") {
            return Err(E2eError::unexpected(format!(
                "expected the discount create page but was redirected to {url}; authenticate before opening the form"
            )));
        }

        wait_for_visible(self.page, &self.code_input, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    // ---- code ----

    /// Type a discount code, replacing any existing value
    pub async fn fill_code(&self, code: &str) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.code_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.clear_and_type(&self.code_input, code).await
    }

    /// The code field's current value (after app-side normalization)
    pub async fn code_value(&self) -> E2eResult<Option<String>> {
        self.page.element_value(&self.code_input).await
    }

    /// Whether the code input is currently rendered
    pub async fn is_code_input_visible(&self) -> E2eResult<bool> {
        self.page.element_visible(&self.code_input).await
    }

    // ---- discount type flows ----

    /// Select the percentage flow and fill its inputs
    pub async fn choose_percentage_flow(
        &self,
        percent: u32,
        max_usd: Option<u32>,
    ) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.percent_radio, DEFAULT_WAIT_TIMEOUT_MS).await?;
        if !self.page.element_selected(&self.percent_radio).await? {
            self.page.click(&self.percent_radio).await?;
        }

        self.fill_number(&self.percentage_off_input, percent).await?;
        if let Some(max) = max_usd {
            self.fill_number(&self.maximum_amount_input, max).await?;
        }
        Ok(())
    }

    /// Select the fixed-amount radio without touching its inputs
    pub async fn select_fixed(&self) -> E2eResult<()> {
        safe_click(self.page, &self.fixed_radio, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Select the fixed-amount flow and fill the amount
    pub async fn choose_fixed_flow(&self, amount_usd: u32) -> E2eResult<()> {
        self.select_fixed().await?;
        self.fill_number(&self.fixed_amount_input, amount_usd).await
    }

    /// Whether the percentage radio is selected
    pub async fn is_percentage_selected(&self) -> E2eResult<bool> {
        self.page.element_selected(&self.percent_radio).await
    }

    /// Whether the fixed-amount radio is selected
    pub async fn is_fixed_selected(&self) -> E2eResult<bool> {
        self.page.element_selected(&self.fixed_radio).await
    }

    /// Percentage-off input state, for cross-flow exclusivity checks
    pub async fn percentage_off_value(&self) -> E2eResult<Option<String>> {
        self.page.element_value(&self.percentage_off_input).await
    }

    /// Whether the percentage-off input accepts interaction
    pub async fn percentage_off_enabled(&self) -> E2eResult<bool> {
        self.page.element_enabled(&self.percentage_off_input).await
    }

    /// Maximum-amount input value
    pub async fn maximum_amount_value(&self) -> E2eResult<Option<String>> {
        self.page.element_value(&self.maximum_amount_input).await
    }

    /// Whether the maximum-amount input accepts interaction
    pub async fn maximum_amount_enabled(&self) -> E2eResult<bool> {
        self.page.element_enabled(&self.maximum_amount_input).await
    }

    // ---- minimum-value flows ----

    /// Select the minimum-initial-balance gate and fill its threshold
    pub async fn set_min_initial_balance(&self, value: u32) -> E2eResult<()> {
        safe_click(self.page, &self.min_initial_balance_radio, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.fill_number(&self.min_initial_balance_input, value).await
    }

    /// Select the minimum-amount gate and fill its threshold
    pub async fn set_min_amount(&self, value: u32) -> E2eResult<()> {
        safe_click(self.page, &self.min_amount_radio, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.fill_number(&self.min_amount_input, value).await
    }

    // ---- remaining fields ----

    /// Fill the description textarea
    pub async fn set_description(&self, text: &str) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.description_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.clear_and_type(&self.description_input, text).await
    }

    /// Fill the expiration date (DD/MM/YYYY)
    pub async fn set_expiration(&self, date: &str) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.expiration_date_input, DEFAULT_WAIT_TIMEOUT_MS)
            .await?;
        self.page.clear_and_type(&self.expiration_date_input, date).await
    }

    /// Whether the expiration date field is rendered at all
    pub async fn has_expiration_field(&self) -> E2eResult<bool> {
        self.page.element_exists(&self.expiration_date_input).await
    }

    /// Fill total and/or per-user quantity limits
    pub async fn set_quantities(
        &self,
        total: Option<u32>,
        per_user: Option<u32>,
    ) -> E2eResult<()> {
        if let Some(total) = total {
            self.fill_number(&self.specify_quantity_input, total).await?;
        }
        if let Some(per_user) = per_user {
            self.fill_number(&self.max_per_user_input, per_user).await?;
        }
        Ok(())
    }

    /// Attach a package through the selection popup
    pub async fn add_package_id(&self, package_id: &str) -> E2eResult<()> {
        safe_click(self.page, &self.add_package_button, DEFAULT_WAIT_TIMEOUT_MS).await?;
        wait_for_clickable(self.page, &self.package_id_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.type_text(&self.package_id_input, package_id).await?;
        safe_click(self.page, &self.package_save_button, DEFAULT_WAIT_TIMEOUT_MS).await?;
        wait_for_gone(self.page, &self.package_popup, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Add an email to the specific-email allowlist
    pub async fn add_email(&self, email: &str) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.add_email_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.type_text(&self.add_email_input, email).await?;
        safe_click(self.page, &self.add_email_button, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Add an AP referral code
    pub async fn add_ap_referral(&self, code: &str) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.ap_referral_input, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.type_text(&self.ap_referral_input, code).await?;
        safe_click(self.page, &self.ap_referral_add_button, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    // ---- toggles (aria-checked switches) ----

    /// Set the "Public to user" switch
    pub async fn set_public(&self, on: bool) -> E2eResult<()> {
        self.set_toggle(&self.public_toggle, on).await
    }

    /// Set the "Auto Display in Checkout For Trading Capital" switch
    pub async fn set_auto_display_trading(&self, on: bool) -> E2eResult<()> {
        self.set_toggle(&self.auto_display_trading_toggle, on).await
    }

    /// Set the "Auto display in Customize Package" switch
    pub async fn set_auto_display_customized(&self, on: bool) -> E2eResult<()> {
        self.set_toggle(&self.auto_display_custom_toggle, on).await
    }

    /// Set the "Active" status switch
    pub async fn set_active(&self, on: bool) -> E2eResult<()> {
        self.set_toggle(&self.status_toggle, on).await
    }

    /// Best-effort reader for the "Public to user" switch
    pub async fn is_public_checked(&self) -> bool {
        self.toggle_state(&self.public_toggle, "public").await
    }

    /// Best-effort reader for the trading-capital auto-display switch
    pub async fn is_auto_display_trading_checked(&self) -> bool {
        self.toggle_state(&self.auto_display_trading_toggle, "auto-display-trading")
            .await
    }

    /// Best-effort reader for the customize-package auto-display switch
    pub async fn is_auto_display_customized_checked(&self) -> bool {
        self.toggle_state(&self.auto_display_custom_toggle, "auto-display-customized")
            .await
    }

    /// Best-effort reader for the "Active" status switch
    pub async fn is_status_active(&self) -> bool {
        self.toggle_state(&self.status_toggle, "status").await
    }

    async fn set_toggle(&self, locator: &Locator, on: bool) -> E2eResult<()> {
        wait_for_clickable(self.page, locator, DEFAULT_WAIT_TIMEOUT_MS).await?;
        let current = self.page.element_attr(locator, "aria-checked").await?;
        let currently_on = current.as_deref() == Some("true");
        if currently_on != on {
            self.page.click(locator).await?;
        } else {
            debug!(locator = %locator, on, "toggle already in desired state");
        }
        Ok(())
    }

    async fn toggle_state(&self, locator: &Locator, name: &str) -> bool {
        match self.page.element_attr(locator, "aria-checked").await {
            Ok(state) => state.as_deref() == Some("true"),
            Err(error) => {
                warn!(%error, toggle = name, "could not read toggle state");
                false
            }
        }
    }

    // ---- submission & feedback ----

    /// Click the create/submit button once it is enabled
    pub async fn submit_create(&self) -> E2eResult<()> {
        safe_click(self.page, &self.create_button, DEFAULT_WAIT_TIMEOUT_MS).await
    }

    /// Wait until the create button accepts clicks (the form enables it
    /// only once required fields validate)
    pub async fn wait_submit_enabled(&self, timeout_ms: u64) -> E2eResult<()> {
        wait_for_clickable(self.page, &self.create_button, timeout_ms).await
    }

    /// Assert a toast/notification containing `text` (case-insensitive)
    pub async fn expect_toast_contains(&self, text: &str) -> E2eResult<()> {
        wait_for_visible(self.page, &self.toast, DEFAULT_WAIT_TIMEOUT_MS).await?;
        let toast_text = self
            .page
            .element_text(&self.toast)
            .await?
            .unwrap_or_default();
        if toast_text.to_lowercase().contains(&text.to_lowercase()) {
            Ok(())
        } else {
            Err(E2eError::assertion(format!(
                "expected toast to contain {text:?}, but got {toast_text:?}"
            )))
        }
    }

    /// Poll for any success feedback: a matching toast, or success wording
    /// anywhere in the page body.
    pub async fn wait_for_success(&self, timeout_ms: u64) -> E2eResult<()> {
        let options = WaitOptions::new().with_timeout(timeout_ms);
        let start = Instant::now();
        loop {
            for text in self.page.texts(&self.toast).await? {
                if toast_success_re().is_match(&text) {
                    return Ok(());
                }
            }
            let body = self
                .page
                .element_text(&Locator::css("body"))
                .await?
                .unwrap_or_default();
            if body_success_re().is_match(&body) {
                return Ok(());
            }
            if start.elapsed() >= options.timeout() {
                return Err(E2eError::Timeout {
                    ms: timeout_ms,
                    waiting_for: "discount creation success feedback".to_string(),
                });
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    /// All currently rendered inline form error texts
    pub async fn inline_error_texts(&self) -> E2eResult<Vec<String>> {
        self.page.texts(&self.form_errors).await
    }

    /// Assert an inline error near `field_label` containing `expected`.
    ///
    /// Scans the generic form-error elements first, then falls back to the
    /// known per-message locators.
    pub async fn expect_inline_error(&self, field_label: &str, expected: &str) -> E2eResult<()> {
        let texts = self.inline_error_texts().await?;
        if texts.iter().any(|t| t.contains(expected)) {
            return Ok(());
        }

        if let Some(locator) = Self::specific_error_locator(expected) {
            if wait_for_visible(self.page, &locator, 3000).await.is_ok() {
                return Ok(());
            }
        }

        Err(E2eError::assertion(format!(
            "expected inline error {expected:?} near field {field_label:?}, but not found"
        )))
    }

    fn specific_error_locator(expected: &str) -> Option<Locator> {
        INLINE_ERROR_KEYS
            .iter()
            .find(|key| expected.contains(*key))
            .map(|key| Locator::xpath(format!("//*[contains(text(),'{key}')]")))
    }

    /// Fill a valid baseline form (unique code, percentage flow, future
    /// expiration) and return the generated code.
    pub async fn fill_required_fields(&self) -> E2eResult<String> {
        let code = generated_code();
        self.fill_code(&code).await?;
        self.choose_percentage_flow(15, Some(50)).await?;
        self.set_expiration("31/12/2099").await?;
        Ok(code)
    }

    async fn fill_number(&self, locator: &Locator, value: u32) -> E2eResult<()> {
        wait_for_clickable(self.page, locator, DEFAULT_WAIT_TIMEOUT_MS).await?;
        self.page.clear_and_type(locator, &value.to_string()).await
    }
}

impl PageObject for CreateDiscountPage<'_> {
    fn url_pattern(&self) -> &str {
        "/discount/create"
    }
}
