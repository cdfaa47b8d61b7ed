//! Suite session harness.
//!
//! One [`Session`] wraps one browser for one spec file. Scenarios share it
//! strictly sequentially and re-derive their preconditions defensively:
//! every flow here detects the state it actually finds (already at login,
//! stale authenticated session, warm dashboard) and recovers, because a
//! failure in one scenario leaves the DOM wherever it happened to be.

use tracing::{debug, info, warn};

use crate::browser::{Browser, BrowserConfig, Page};
use crate::config::SuiteConfig;
use crate::pages::{CreateDiscountPage, DashboardPage, ForgotPasswordPage, LoginPage};
use crate::result::{E2eError, E2eResult};

/// A configured browser session against one deployment.
#[derive(Debug)]
pub struct Session {
    browser: Browser,
    /// The single page every scenario drives
    pub page: Page,
    /// The deployment configuration
    pub config: SuiteConfig,
}

impl Session {
    /// Launch a browser for `config` and open the initial blank page.
    pub async fn launch(config: SuiteConfig) -> E2eResult<Self> {
        crate::logging::init();
        let browser_config = BrowserConfig::default().with_headless(config.headless);
        let browser = Browser::launch(browser_config).await?;
        let page = browser.new_page().await?;
        info!(headless = config.headless, "browser session started");
        Ok(Self {
            browser,
            page,
            config,
        })
    }

    /// Close the browser.
    pub async fn close(self) -> E2eResult<()> {
        self.browser.close().await
    }

    /// Login page object bound to this session
    #[must_use]
    pub fn login_page(&self) -> LoginPage<'_> {
        LoginPage::new(&self.page, &self.config)
    }

    /// Dashboard page object bound to this session
    #[must_use]
    pub fn dashboard_page(&self) -> DashboardPage<'_> {
        DashboardPage::new(&self.page, &self.config)
    }

    /// Forgot-password page object bound to this session
    #[must_use]
    pub fn forgot_password_page(&self) -> ForgotPasswordPage<'_> {
        ForgotPasswordPage::new(&self.page, &self.config)
    }

    /// Discount form page object bound to this session
    #[must_use]
    pub fn create_discount_page(&self) -> CreateDiscountPage<'_> {
        CreateDiscountPage::new(&self.page, &self.config)
    }

    /// Ensure the session sits on the login page with the form ready.
    ///
    /// Recovers from whatever state the previous scenario left behind: an
    /// authenticated session is logged out (cookies dropped when logout
    /// fails), then the login URL is loaded again.
    pub async fn ensure_at_login(&self) -> E2eResult<()> {
        let login = self.login_page();

        if let Ok(url) = self.page.current_url().await {
            if (url.contains("/auth/login") || url.contains("/admin/login"))
                && login.wait_ready(3000).await.is_ok()
            {
                debug!("already at login with form visible");
                return Ok(());
            }
        }

        self.page.goto(&self.config.login_url).await?;
        if login.wait_ready(8000).await.is_ok() {
            return Ok(());
        }

        // Form did not appear; a stale authenticated session is the usual
        // cause. Log out, or failing that drop the cookies.
        let dashboard = self.dashboard_page();
        if dashboard.is_user_logged_in().await {
            dashboard.logout().await;
        } else {
            info!("logout not applicable, clearing cookies");
            self.page.clear_cookies().await?;
        }

        self.page.goto(&self.config.login_url).await?;
        login.wait_ready(10_000).await
    }

    /// Log in with the admin credentials and verify the dashboard loaded.
    pub async fn login_to_dashboard(&self) -> E2eResult<()> {
        let login = self.login_page();
        login
            .login(&self.config.admin_email, &self.config.admin_password, false)
            .await?;

        let dashboard = self.dashboard_page();
        dashboard.expect_loaded().await?;

        let url = self.page.current_url().await?;
        if url.contains(&self.config.dashboard_url) {
            Ok(())
        } else {
            Err(E2eError::assertion(format!(
                "expected dashboard URL containing {:?}, but got {url:?}",
                self.config.dashboard_url
            )))
        }
    }

    /// Authenticate if needed, then open the discount creation form.
    ///
    /// A warm session (already on the dashboard) skips the login round
    /// trip entirely.
    pub async fn goto_create_discount(&self) -> E2eResult<()> {
        let url = self.page.current_url().await.unwrap_or_default();
        let warm = url == self.config.dashboard_url
            || url == format!("{}#/", self.config.dashboard_url);

        if warm {
            debug!("already on dashboard, skipping login");
        } else {
            let dashboard = self.dashboard_page();
            if dashboard.is_user_logged_in().await {
                debug!("session already authenticated");
            } else {
                info!("not authenticated, logging in first");
                self.page.goto(&self.config.login_url).await?;
                let login = self.login_page();
                login.wait_ready(10_000).await?;
                login
                    .login(&self.config.admin_email, &self.config.admin_password, false)
                    .await?;
                dashboard.expect_loaded().await?;
            }
        }

        let form = self.create_discount_page();
        match form.open().await {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!(%error, "discount form did not open cleanly");
                Err(error)
            }
        }
    }
}

#[cfg(all(test, not(feature = "browser")))]
mod tests {
    use super::*;
    use crate::browser::MockElement;

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

    fn seed_login_form(page: &Page) {
        page.insert_element("loginForm", MockElement::new());
        page.insert_element("loginForm_username", MockElement::new());
        page.insert_element("loginForm_password", MockElement::new());
        page.insert_element("button[type='submit']", MockElement::new());
    }

    #[tokio::test]
    async fn test_launch_and_close() {
        let session = Session::launch(config().with_headless(true)).await.unwrap();
        assert!(session.config.headless);
        assert_eq!(session.page.current_url().await.unwrap(), "about:blank");
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_at_login_short_circuits_when_already_there() {
        let session = Session::launch(config()).await.unwrap();
        seed_login_form(&session.page);
        session.page.set_url("https://bo.example.com/auth/login");

        session.ensure_at_login().await.unwrap();
        // No navigation happened: the URL is untouched
        assert_eq!(
            session.page.current_url().await.unwrap(),
            "https://bo.example.com/auth/login"
        );
    }

    #[tokio::test]
    async fn test_ensure_at_login_navigates_from_blank() {
        let session = Session::launch(config()).await.unwrap();
        seed_login_form(&session.page);

        session.ensure_at_login().await.unwrap();
        assert_eq!(
            session.page.current_url().await.unwrap(),
            session.config.login_url
        );
    }

    #[tokio::test]
    async fn test_goto_create_discount_with_warm_dashboard() {
        let session = Session::launch(config()).await.unwrap();
        session.page.set_url("https://bo.example.com/");
        session
            .page
            .insert_element("code", MockElement::new());

        session.goto_create_discount().await.unwrap();
        assert_eq!(
            session.page.current_url().await.unwrap(),
            session.config.create_discount_url
        );
    }

    #[tokio::test]
    async fn test_goto_create_discount_surfaces_redirect() {
        let session = Session::launch(config()).await.unwrap();
        session.page.set_url("https://bo.example.com/");
        session.page.insert_element("code", MockElement::new());
        session.page.set_redirect(
            "https://bo.example.com/discount/create",
            "https://bo.example.com/auth/login",
        );

        let result = session.goto_create_discount().await;
        assert!(matches!(result, Err(E2eError::UnexpectedState { .. })));
    }
}
