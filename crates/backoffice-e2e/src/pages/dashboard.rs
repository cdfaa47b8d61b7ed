//! Dashboard (post-login landing screen).
//!
//! The dashboard shares its URL with the application base URL, so "loaded"
//! is detected through navigation chrome rather than the address bar: any
//! of several sidebar/menu candidates counts as proof of an authenticated
//! session.

use tracing::{debug, warn};

use crate::browser::Page;
use crate::config::SuiteConfig;
use crate::locator::{Locator, Selector};
use crate::pages::PageObject;
use crate::result::{E2eError, E2eResult};
use crate::wait::{wait_for_clickable, wait_for_visible, wait_url_contains};

/// Per-candidate wait budget while probing for navigation chrome
const NAV_CANDIDATE_TIMEOUT_MS: u64 = 8000;

/// Page object for the admin dashboard.
#[derive(Debug)]
pub struct DashboardPage<'a> {
    page: &'a Page,
    config: &'a SuiteConfig,
    sidebar: Locator,
    system_management_nav: Locator,
    discount_nav: Locator,
    quest_nav: Locator,
    blind_box_nav: Locator,
    user_menu_button: Locator,
    user_dropdown: Locator,
    logout_item: Locator,
}

impl<'a> DashboardPage<'a> {
    /// Bind the dashboard locator table to a page
    #[must_use]
    pub fn new(page: &'a Page, config: &'a SuiteConfig) -> Self {
        Self {
            page,
            config,
            sidebar: Locator::xpath("//aside")
                .or(Selector::xpath("//div[contains(@class,'ant-layout-sider')]")),
            system_management_nav: Locator::xpath("//*[contains(text(), 'System Management')]"),
            discount_nav: Locator::xpath("//*[contains(text(), 'Discount')]"),
            quest_nav: Locator::xpath("//*[contains(text(), 'Quest')]"),
            blind_box_nav: Locator::xpath("//*[contains(text(), 'Blind Box')]"),
            user_menu_button: Locator::xpath(
                "//header//*[contains(@class,'avatar') or contains(@class,'user')]",
            )
            .or(Selector::xpath(
                "//header//*[contains(text(),'SuperAdmin') or contains(text(),'Admin')]",
            )),
            user_dropdown: Locator::xpath("//*[contains(@class, 'ant-dropdown')]")
                .or(Selector::xpath("//*[@role='menu']")),
            logout_item: Locator::xpath(
                "//a[normalize-space()='Logout' or normalize-space()='Log out']",
            )
            .or(Selector::xpath("//button[normalize-space()='Logout']"))
            .or(Selector::xpath("//*[contains(text(), 'Logout')]")),
        }
    }

    /// Verify the dashboard has loaded by finding any navigation candidate.
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::UnexpectedState`] when none of the candidates
    /// appears, which usually means login failed.
    pub async fn expect_loaded(&self) -> E2eResult<()> {
        self.expect_loaded_within(NAV_CANDIDATE_TIMEOUT_MS).await
    }

    /// [`Self::expect_loaded`] with an explicit per-candidate budget
    pub async fn expect_loaded_within(&self, per_candidate_ms: u64) -> E2eResult<()> {
        let candidates = [
            &self.system_management_nav,
            &self.discount_nav,
            &self.quest_nav,
            &self.blind_box_nav,
            &self.sidebar,
        ];
        for candidate in candidates {
            if wait_for_visible(self.page, candidate, per_candidate_ms).await.is_ok() {
                debug!(candidate = %candidate, "found dashboard navigation element");
                return Ok(());
            }
        }
        Err(E2eError::unexpected(
            "dashboard navigation elements not found - login may have failed",
        ))
    }

    /// Navigate to the dashboard and verify it loaded
    pub async fn open(&self) -> E2eResult<()> {
        self.page.goto(&self.config.dashboard_url).await?;
        self.expect_loaded().await
    }

    /// Whether the current URL is within the dashboard
    pub async fn is_loaded(&self) -> bool {
        self.page
            .current_url()
            .await
            .map(|url| url.contains(&self.config.dashboard_url))
            .unwrap_or(false)
    }

    /// Whether an authenticated session is active (sidebar present)
    pub async fn is_user_logged_in(&self) -> bool {
        wait_for_visible(self.page, &self.sidebar, 3000).await.is_ok()
    }

    /// Open the user avatar dropdown.
    ///
    /// Some deployments render the logout entry directly; in that case the
    /// dropdown is not needed and this succeeds without opening it.
    pub async fn open_user_menu(&self) -> E2eResult<()> {
        let via_menu: E2eResult<()> = async {
            wait_for_clickable(self.page, &self.user_menu_button, 10_000).await?;
            self.page.click(&self.user_menu_button).await?;
            wait_for_visible(self.page, &self.user_dropdown, 5000).await
        }
        .await;

        match via_menu {
            Ok(()) => Ok(()),
            Err(error) => {
                if self.page.element_exists(&self.logout_item).await.unwrap_or(false) {
                    return Ok(());
                }
                warn!(%error, "could not open user menu");
                Err(error)
            }
        }
    }

    /// Log out, falling back from the menu item to the direct logout URL.
    ///
    /// Best-effort: a logout that fails every path is logged and swallowed,
    /// because callers re-derive their state defensively anyway.
    pub async fn logout(&self) {
        if self.menu_logout().await.is_ok() {
            return;
        }
        if let Err(error) = self.url_logout().await {
            warn!(%error, "logout failed with all methods");
        }
    }

    async fn menu_logout(&self) -> E2eResult<()> {
        if wait_for_clickable(self.page, &self.logout_item, 3000).await.is_err() {
            self.open_user_menu().await?;
            wait_for_clickable(self.page, &self.logout_item, 5000).await?;
        }
        self.page.click(&self.logout_item).await?;
        wait_url_contains(self.page, &self.config.logout_success_url, 10_000).await
    }

    async fn url_logout(&self) -> E2eResult<()> {
        let origin = self.page.origin().await?;
        self.page.goto(&format!("{origin}/auth/logout")).await?;
        wait_url_contains(self.page, &self.config.logout_success_url, 5000).await
    }
}

impl PageObject for DashboardPage<'_> {
    fn url_pattern(&self) -> &str {
        &self.config.dashboard_url
    }
}

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::browser::{Browser, BrowserConfig, MockElement};

    fn config() -> SuiteConfig {
        SuiteConfig::from_vars(
            [
                ("LOGIN_URL", "https://bo.example.com/auth/login"),
                ("DASHBOARD_URL", "https://bo.example.com/"),
                ("LOGOUT_SUCCESS_URL", "/auth/login"),
                ("FORGOT_PASSWORD_URL", "https://bo.example.com/auth/forgot-password"),
                ("CREATE_DISCOUNT_URL", "https://bo.example.com/discount/create"),
                ("ADMIN_EMAIL", "admin@example.com"),
                ("ADMIN_PASSWORD", "hunter2"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    async fn page() -> Page {
        let browser = Browser::launch(BrowserConfig::default()).await.unwrap();
        browser.new_page().await.unwrap()
    }

    #[tokio::test]
    async fn test_expect_loaded_accepts_any_candidate() {
        let config = config();
        let page = page().await;
        // Only the Discount menu entry is present
        page.insert_element(
            "//*[contains(text(), 'Discount')]",
            MockElement::new().with_text("Discount"),
        );
        let dashboard = DashboardPage::new(&page, &config);
        dashboard.expect_loaded_within(100).await.unwrap();
    }

    #[tokio::test]
    async fn test_expect_loaded_fails_without_navigation() {
        let config = config();
        let page = page().await;
        let dashboard = DashboardPage::new(&page, &config);
        let result = dashboard.expect_loaded_within(50).await;
        assert!(matches!(result, Err(E2eError::UnexpectedState { .. })));
    }

    #[tokio::test]
    async fn test_is_loaded_checks_url() {
        let config = config();
        let page = page().await;
        let dashboard = DashboardPage::new(&page, &config);

        page.set_url("https://bo.example.com/");
        assert!(dashboard.is_loaded().await);

        page.set_url("about:blank");
        assert!(!dashboard.is_loaded().await);
    }

    #[tokio::test]
    async fn test_is_user_logged_in_with_sidebar() {
        let config = config();
        let page = page().await;
        page.insert_element("//aside", MockElement::new());
        let dashboard = DashboardPage::new(&page, &config);
        assert!(dashboard.is_user_logged_in().await);
    }

    #[tokio::test]
    async fn test_open_user_menu_via_avatar() {
        let config = config();
        let page = page().await;
        page.insert_element(
            "//header//*[contains(@class,'avatar') or contains(@class,'user')]",
            MockElement::new(),
        );
        page.insert_element("//*[@role='menu']", MockElement::new());
        let dashboard = DashboardPage::new(&page, &config);
        dashboard.open_user_menu().await.unwrap();
        let avatar = page
            .element("//header//*[contains(@class,'avatar') or contains(@class,'user')]")
            .unwrap();
        assert_eq!(avatar.clicks, 1);
    }
}
