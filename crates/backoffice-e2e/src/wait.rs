//! Explicit-wait primitives.
//!
//! Every synchronization point in the suite is a polled predicate over
//! remote page state with a hard timeout. There are no fixed-duration
//! pauses: where the UI needs time (validation rendering, toasts, redirect
//! chains), the caller waits on the condition itself.

use std::time::{Duration, Instant};

use crate::browser::Page;
use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (250ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Options honoring a locator's own timeout override, if set
    #[must_use]
    pub fn for_locator(locator: &Locator) -> Self {
        match locator.timeout_ms() {
            Some(ms) => Self::new().with_timeout(ms),
            None => Self::new(),
        }
    }
}

// =============================================================================
// WAIT CONDITIONS
// =============================================================================

/// A predicate over remote page state, polled until true or timeout
#[derive(Debug, Clone)]
pub enum WaitCondition {
    /// Element is located and visible
    Visible(Locator),
    /// Element is absent (or its reference went stale)
    Gone(Locator),
    /// Element is visible and enabled
    Clickable(Locator),
    /// Current URL contains a fragment
    UrlContains(String),
    /// Current URL does not contain a fragment
    UrlNotContains(String),
}

impl WaitCondition {
    /// Description used in timeout errors
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Visible(locator) => format!("{locator} to be visible"),
            Self::Gone(locator) => format!("{locator} to be gone"),
            Self::Clickable(locator) => format!("{locator} to be clickable"),
            Self::UrlContains(fragment) => format!("URL to contain {fragment:?}"),
            Self::UrlNotContains(fragment) => format!("URL to not contain {fragment:?}"),
        }
    }

    /// Evaluate the condition against the current page state
    pub async fn check(&self, page: &Page) -> E2eResult<bool> {
        match self {
            Self::Visible(locator) => page.element_visible(locator).await,
            Self::Gone(locator) => Ok(!page.element_exists(locator).await?),
            Self::Clickable(locator) => {
                Ok(page.element_visible(locator).await? && page.element_enabled(locator).await?)
            }
            Self::UrlContains(fragment) => Ok(page.current_url().await?.contains(fragment)),
            Self::UrlNotContains(fragment) => Ok(!page.current_url().await?.contains(fragment)),
        }
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll a condition until it holds or the timeout elapses.
///
/// # Errors
///
/// Returns [`E2eError::Timeout`] carrying the condition description when the
/// condition never holds; check errors propagate immediately.
pub async fn wait_until(
    page: &Page,
    condition: &WaitCondition,
    options: &WaitOptions,
) -> E2eResult<()> {
    let start = Instant::now();
    loop {
        if condition.check(page).await? {
            return Ok(());
        }
        if start.elapsed() >= options.timeout() {
            return Err(E2eError::Timeout {
                ms: options.timeout_ms,
                waiting_for: condition.description(),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Wait for an element to be located and visible
pub async fn wait_for_visible(page: &Page, locator: &Locator, timeout_ms: u64) -> E2eResult<()> {
    wait_until(
        page,
        &WaitCondition::Visible(locator.clone()),
        &WaitOptions::new().with_timeout(timeout_ms),
    )
    .await
}

/// Wait for an element to disappear.
///
/// An element that never existed is also "gone"; this never fails for a
/// locator that matches nothing.
pub async fn wait_for_gone(page: &Page, locator: &Locator, timeout_ms: u64) -> E2eResult<()> {
    wait_until(
        page,
        &WaitCondition::Gone(locator.clone()),
        &WaitOptions::new().with_timeout(timeout_ms),
    )
    .await
}

/// Wait for an element to be clickable (visible and enabled)
pub async fn wait_for_clickable(page: &Page, locator: &Locator, timeout_ms: u64) -> E2eResult<()> {
    wait_until(
        page,
        &WaitCondition::Clickable(locator.clone()),
        &WaitOptions::new().with_timeout(timeout_ms),
    )
    .await
}

/// Wait for the URL to contain a fragment
pub async fn wait_url_contains(page: &Page, fragment: &str, timeout_ms: u64) -> E2eResult<()> {
    wait_until(
        page,
        &WaitCondition::UrlContains(fragment.to_string()),
        &WaitOptions::new().with_timeout(timeout_ms),
    )
    .await
}

/// Wait for the URL to NOT contain a fragment
pub async fn wait_url_not_contains(page: &Page, fragment: &str, timeout_ms: u64) -> E2eResult<()> {
    wait_until(
        page,
        &WaitCondition::UrlNotContains(fragment.to_string()),
        &WaitOptions::new().with_timeout(timeout_ms),
    )
    .await
}

/// Wait for an element to be clickable, then click it
pub async fn safe_click(page: &Page, locator: &Locator, timeout_ms: u64) -> E2eResult<()> {
    wait_for_clickable(page, locator, timeout_ms).await?;
    page.click(locator).await
}

#[cfg(test)]
mod options_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_builder_chain() {
        let opts = WaitOptions::new().with_timeout(3000).with_poll_interval(50);
        assert_eq!(opts.timeout(), Duration::from_millis(3000));
        assert_eq!(opts.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_for_locator_honors_override() {
        let locator = Locator::css("button").with_timeout_ms(2500);
        assert_eq!(WaitOptions::for_locator(&locator).timeout_ms, 2500);

        let plain = Locator::css("button");
        assert_eq!(
            WaitOptions::for_locator(&plain).timeout_ms,
            DEFAULT_WAIT_TIMEOUT_MS
        );
    }

    #[test]
    fn test_condition_descriptions() {
        let visible = WaitCondition::Visible(Locator::id("loginForm"));
        assert_eq!(visible.description(), "id:loginForm to be visible");

        let url = WaitCondition::UrlContains("/auth/login".to_string());
        assert!(url.description().contains("/auth/login"));

        let not_url = WaitCondition::UrlNotContains("/admin".to_string());
        assert!(not_url.description().starts_with("URL to not contain"));
    }
}

#[cfg(all(test, not(feature = "browser")))]
mod polling_tests {
    use super::*;
    use crate::browser::{Browser, BrowserConfig, MockElement};

    async fn page() -> Page {
        let browser = Browser::launch(BrowserConfig::default()).await.unwrap();
        browser.new_page().await.unwrap()
    }

    #[tokio::test]
    async fn test_visible_succeeds_immediately() {
        let page = page().await;
        page.insert_element("loginForm", MockElement::new());
        wait_for_visible(&page, &Locator::id("loginForm"), 500)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_visible_times_out_with_description() {
        let page = page().await;
        let result = wait_for_visible(&page, &Locator::id("loginForm"), 300).await;
        match result {
            Err(E2eError::Timeout { ms, waiting_for }) => {
                assert_eq!(ms, 300);
                assert!(waiting_for.contains("loginForm"));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hidden_element_is_not_visible() {
        let page = page().await;
        page.insert_element("loginForm", MockElement::new().hidden());
        let result = wait_for_visible(&page, &Locator::id("loginForm"), 300).await;
        assert!(matches!(result, Err(E2eError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_gone_for_absent_element() {
        let page = page().await;
        wait_for_gone(&page, &Locator::css("div.modal"), 300)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_gone_after_removal() {
        let page = page().await;
        page.insert_element("div.modal", MockElement::new());
        let locator = Locator::css("div.modal");
        assert!(matches!(
            wait_for_gone(&page, &locator, 300).await,
            Err(E2eError::Timeout { .. })
        ));
        page.remove_element("div.modal");
        wait_for_gone(&page, &locator, 300).await.unwrap();
    }

    #[tokio::test]
    async fn test_clickable_requires_enabled() {
        let page = page().await;
        page.insert_element("button[type='submit']", MockElement::new().disabled());
        let locator = Locator::css("button[type='submit']");
        assert!(matches!(
            wait_for_clickable(&page, &locator, 300).await,
            Err(E2eError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_url_conditions() {
        let page = page().await;
        page.goto("https://bo.example.com/auth/login").await.unwrap();
        wait_url_contains(&page, "/auth/login", 300).await.unwrap();
        wait_url_not_contains(&page, "/discount", 300).await.unwrap();
        assert!(matches!(
            wait_url_contains(&page, "/discount", 300).await,
            Err(E2eError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_safe_click_waits_then_clicks() {
        let page = page().await;
        page.insert_element("button[type='submit']", MockElement::new());
        let locator = Locator::css("button[type='submit']");
        safe_click(&page, &locator, 500).await.unwrap();
        assert_eq!(page.element("button[type='submit']").unwrap().clicks, 1);
    }
}
