//! Browser session factory.
//!
//! This module provides browser control via the Chrome DevTools Protocol.
//! When compiled with the `browser` feature, it uses chromiumoxide against a
//! real Chrome instance. Without the feature, it provides a deterministic
//! in-memory page model so locator plumbing and page-object logic can be
//! unit-tested without a browser.
//!
//! Element operations are performed uniformly by evaluating the JavaScript
//! query a [`Locator`](crate::locator::Locator) compiles to, trying each
//! alternate selector in order. Form fills go through the native value
//! setter followed by `input`/`change` events, which is what the Ant Design
//! frontend under test actually reacts to.

use crate::result::{E2eError, E2eResult};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Sandbox mode (off for CI containers)
    pub sandbox: bool,
    /// Path to the chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Additional Chrome command-line switches
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            sandbox: false,
            chromium_path: None,
            extra_args: vec![
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
                "--disable-features=VizDisplayCompositor".to_string(),
                "--disable-features=IsolateOrigins,site-per-process".to_string(),
            ],
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set sandbox mode
    #[must_use]
    pub const fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }
}

/// Extract `scheme://authority` from a URL, if it has one.
fn origin_of(url: &str) -> Option<String> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    if rest.is_empty() {
        return None;
    }
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(format!(
        "{}{}",
        &url[..scheme_end + 3],
        &rest[..authority_end]
    ))
}

// ============================================================================
// Real CDP implementation (when the `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{origin_of, BrowserConfig, E2eError, E2eResult};
    use crate::locator::{Locator, Selector};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Browser instance with a live CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if the browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> E2eResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            for arg in &config.extra_args {
                builder = builder.arg(arg.as_str());
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| E2eError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| E2eError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Drive CDP events until the connection closes
            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Create a new page
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created
        pub async fn new_page(&self) -> E2eResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| E2eError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            Ok(Page {
                inner: Arc::new(Mutex::new(cdp_page)),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> E2eResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| E2eError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    /// A browser page backed by a live CDP target
    #[derive(Debug, Clone)]
    pub struct Page {
        inner: Arc<Mutex<CdpPage>>,
    }

    impl Page {
        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> E2eResult<T> {
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| E2eError::Eval {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| E2eError::Eval {
                message: e.to_string(),
            })
        }

        /// First alternate of `locator` that currently matches an element
        async fn first_match(&self, locator: &Locator) -> E2eResult<Option<Selector>> {
            for selector in locator.selectors() {
                let exists: bool = self.eval(&format!("!!({})", selector.to_query())).await?;
                if exists {
                    return Ok(Some(selector.clone()));
                }
            }
            Ok(None)
        }

        async fn resolve(&self, locator: &Locator) -> E2eResult<Selector> {
            self.first_match(locator)
                .await?
                .ok_or_else(|| E2eError::ElementNotFound {
                    locator: locator.describe(),
                })
        }

        /// Navigate to a URL
        ///
        /// # Errors
        ///
        /// Returns error if navigation fails
        pub async fn goto(&self, url: &str) -> E2eResult<()> {
            let page = self.inner.lock().await;
            page.goto(url).await.map_err(|e| E2eError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            page.wait_for_navigation()
                .await
                .map_err(|e| E2eError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Current URL of the page
        pub async fn current_url(&self) -> E2eResult<String> {
            let page = self.inner.lock().await;
            let url = page.url().await.map_err(|e| E2eError::Eval {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_else(|| "about:blank".to_string()))
        }

        /// `scheme://authority` of the current URL
        pub async fn origin(&self) -> E2eResult<String> {
            let url = self.current_url().await?;
            origin_of(&url).ok_or_else(|| {
                E2eError::unexpected(format!("current URL {url:?} has no origin"))
            })
        }

        /// Reload the current page
        pub async fn refresh(&self) -> E2eResult<()> {
            let page = self.inner.lock().await;
            page.reload().await.map_err(|e| E2eError::Navigation {
                url: "<reload>".to_string(),
                message: e.to_string(),
            })?;
            Ok(())
        }

        /// Drop all cookies for the session
        pub async fn clear_cookies(&self) -> E2eResult<()> {
            let page = self.inner.lock().await;
            page.execute(ClearBrowserCookiesParams::default())
                .await
                .map_err(|e| E2eError::Eval {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Whether any alternate of the locator matches an element
        pub async fn element_exists(&self, locator: &Locator) -> E2eResult<bool> {
            Ok(self.first_match(locator).await?.is_some())
        }

        /// Whether the located element is rendered and visible
        pub async fn element_visible(&self, locator: &Locator) -> E2eResult<bool> {
            match self.first_match(locator).await? {
                None => Ok(false),
                Some(selector) => {
                    let script = format!(
                        "(() => {{ const el = {}; if (!el) return false; \
                         const style = window.getComputedStyle(el); \
                         if (style.display === 'none' || style.visibility === 'hidden') return false; \
                         const rect = el.getBoundingClientRect(); \
                         return rect.width > 0 && rect.height > 0; }})()",
                        selector.to_query()
                    );
                    self.eval(&script).await
                }
            }
        }

        /// Whether the located element accepts interaction
        pub async fn element_enabled(&self, locator: &Locator) -> E2eResult<bool> {
            match self.first_match(locator).await? {
                None => Ok(false),
                Some(selector) => {
                    let script = format!(
                        "(() => {{ const el = {}; if (!el) return false; \
                         return !(el.disabled === true || el.getAttribute('aria-disabled') === 'true'); }})()",
                        selector.to_query()
                    );
                    self.eval(&script).await
                }
            }
        }

        /// Native checked state (radio buttons and checkbox inputs)
        pub async fn element_selected(&self, locator: &Locator) -> E2eResult<bool> {
            match self.first_match(locator).await? {
                None => Ok(false),
                Some(selector) => {
                    let script = format!(
                        "(() => {{ const el = {}; return !!(el && el.checked === true); }})()",
                        selector.to_query()
                    );
                    self.eval(&script).await
                }
            }
        }

        /// Text content of the located element, `None` when absent
        pub async fn element_text(&self, locator: &Locator) -> E2eResult<Option<String>> {
            match self.first_match(locator).await? {
                None => Ok(None),
                Some(selector) => {
                    let script = format!(
                        "(() => {{ const el = {}; return el ? (el.textContent || '') : null; }})()",
                        selector.to_query()
                    );
                    self.eval(&script).await
                }
            }
        }

        /// Attribute of the located element, `None` when absent or unset
        pub async fn element_attr(
            &self,
            locator: &Locator,
            name: &str,
        ) -> E2eResult<Option<String>> {
            match self.first_match(locator).await? {
                None => Ok(None),
                Some(selector) => {
                    let script = format!(
                        "(() => {{ const el = {}; return el ? el.getAttribute({name:?}) : null; }})()",
                        selector.to_query()
                    );
                    self.eval(&script).await
                }
            }
        }

        /// Current input value of the located element
        pub async fn element_value(&self, locator: &Locator) -> E2eResult<Option<String>> {
            match self.first_match(locator).await? {
                None => Ok(None),
                Some(selector) => {
                    let script = format!(
                        "(() => {{ const el = {}; return el && 'value' in el ? String(el.value) : null; }})()",
                        selector.to_query()
                    );
                    self.eval(&script).await
                }
            }
        }

        /// Text content of every element the locator matches
        pub async fn texts(&self, locator: &Locator) -> E2eResult<Vec<String>> {
            for selector in locator.selectors() {
                let script = format!(
                    "({}).map(el => el.textContent || '')",
                    selector.to_query_all()
                );
                let found: Vec<String> = self.eval(&script).await?;
                if !found.is_empty() {
                    return Ok(found);
                }
            }
            Ok(Vec::new())
        }

        /// Number of elements the locator matches
        pub async fn count(&self, locator: &Locator) -> E2eResult<usize> {
            for selector in locator.selectors() {
                let found: usize = self.eval(&selector.to_count_query()).await?;
                if found > 0 {
                    return Ok(found);
                }
            }
            Ok(0)
        }

        /// Click the located element
        ///
        /// # Errors
        ///
        /// Returns [`E2eError::ElementNotFound`] when no alternate matches
        pub async fn click(&self, locator: &Locator) -> E2eResult<()> {
            let selector = self.resolve(locator).await?;
            let script = format!(
                "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
                selector.to_query()
            );
            let clicked: bool = self.eval(&script).await?;
            if clicked {
                Ok(())
            } else {
                Err(E2eError::ElementNotFound {
                    locator: locator.describe(),
                })
            }
        }

        /// Replace the element's value with `text`, notifying the frontend.
        ///
        /// Goes through the native value setter and dispatches `input` and
        /// `change`, which is required for controlled Ant Design inputs to
        /// pick the value up.
        pub async fn clear_and_type(&self, locator: &Locator, text: &str) -> E2eResult<()> {
            self.set_value(locator, text, false).await
        }

        /// Append `text` to the element's current value
        pub async fn type_text(&self, locator: &Locator, text: &str) -> E2eResult<()> {
            self.set_value(locator, text, true).await
        }

        async fn set_value(&self, locator: &Locator, text: &str, append: bool) -> E2eResult<()> {
            let selector = self.resolve(locator).await?;
            let encoded = serde_json::to_string(text)?;
            let expression = if append {
                format!("(el.value || '') + {encoded}")
            } else {
                encoded
            };
            let script = format!(
                "(() => {{ const el = {}; if (!el) return false; \
                 el.focus(); \
                 const proto = el.tagName === 'TEXTAREA' \
                     ? window.HTMLTextAreaElement.prototype \
                     : window.HTMLInputElement.prototype; \
                 const setter = Object.getOwnPropertyDescriptor(proto, 'value').set; \
                 setter.call(el, {expression}); \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true; }})()",
                selector.to_query()
            );
            let ok: bool = self.eval(&script).await?;
            if ok {
                Ok(())
            } else {
                Err(E2eError::ElementNotFound {
                    locator: locator.describe(),
                })
            }
        }
    }
}

// ============================================================================
// Mock implementation (when the `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{origin_of, BrowserConfig, E2eError, E2eResult};
    use crate::locator::Locator;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// A seeded element in the mock DOM
    #[derive(Debug, Clone)]
    pub struct MockElement {
        /// Rendered and visible
        pub visible: bool,
        /// Accepts interaction
        pub enabled: bool,
        /// Native checked state
        pub selected: bool,
        /// Text content
        pub text: String,
        /// Input value
        pub value: String,
        /// Attributes
        pub attributes: HashMap<String, String>,
        /// Number of clicks received
        pub clicks: u32,
    }

    impl Default for MockElement {
        fn default() -> Self {
            Self {
                visible: true,
                enabled: true,
                selected: false,
                text: String::new(),
                value: String::new(),
                attributes: HashMap::new(),
                clicks: 0,
            }
        }
    }

    impl MockElement {
        /// Create a visible, enabled element
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Mark the element hidden
        #[must_use]
        pub fn hidden(mut self) -> Self {
            self.visible = false;
            self
        }

        /// Mark the element disabled
        #[must_use]
        pub fn disabled(mut self) -> Self {
            self.enabled = false;
            self
        }

        /// Mark the element checked/selected
        #[must_use]
        pub const fn selected(mut self) -> Self {
            self.selected = true;
            self
        }

        /// Set text content
        #[must_use]
        pub fn with_text(mut self, text: impl Into<String>) -> Self {
            self.text = text.into();
            self
        }

        /// Set input value
        #[must_use]
        pub fn with_value(mut self, value: impl Into<String>) -> Self {
            self.value = value.into();
            self
        }

        /// Set an attribute
        #[must_use]
        pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
            self.attributes.insert(name.into(), value.into());
            self
        }
    }

    #[derive(Debug, Default)]
    struct MockState {
        url: String,
        // Pattern -> element; duplicates allowed, first match wins for
        // single-element operations
        elements: Vec<(String, MockElement)>,
        // Navigation target -> URL the app "redirects" to
        redirects: HashMap<String, String>,
    }

    impl MockState {
        fn find(&self, locator: &Locator) -> Option<&MockElement> {
            locator.selectors().iter().find_map(|selector| {
                self.elements
                    .iter()
                    .find(|(pattern, _)| pattern == selector.pattern())
                    .map(|(_, element)| element)
            })
        }

        fn find_mut(&mut self, locator: &Locator) -> Option<&mut MockElement> {
            let pattern = locator.selectors().iter().find_map(|selector| {
                self.elements
                    .iter()
                    .find(|(pattern, _)| pattern == selector.pattern())
                    .map(|(pattern, _)| pattern.clone())
            })?;
            self.elements
                .iter_mut()
                .find(|(p, _)| *p == pattern)
                .map(|(_, element)| element)
        }

        fn find_all(&self, locator: &Locator) -> Vec<&MockElement> {
            for selector in locator.selectors() {
                let matches: Vec<&MockElement> = self
                    .elements
                    .iter()
                    .filter(|(pattern, _)| pattern == selector.pattern())
                    .map(|(_, element)| element)
                    .collect();
                if !matches.is_empty() {
                    return matches;
                }
            }
            Vec::new()
        }
    }

    /// Browser instance (mock)
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
    }

    impl Browser {
        /// Launch a new browser instance (mock)
        pub async fn launch(config: BrowserConfig) -> E2eResult<Self> {
            Ok(Self { config })
        }

        /// Create a new page with an empty DOM
        pub async fn new_page(&self) -> E2eResult<Page> {
            Ok(Page {
                state: Arc::new(Mutex::new(MockState {
                    url: "about:blank".to_string(),
                    ..MockState::default()
                })),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser (mock)
        pub async fn close(self) -> E2eResult<()> {
            Ok(())
        }
    }

    /// A browser page over an in-memory DOM
    #[derive(Debug, Clone)]
    pub struct Page {
        state: Arc<Mutex<MockState>>,
    }

    impl Page {
        fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
        }

        // ---- seeding hooks for unit tests ----

        /// Seed an element under a selector pattern
        pub fn insert_element(&self, pattern: impl Into<String>, element: MockElement) {
            self.lock().elements.push((pattern.into(), element));
        }

        /// Remove every element seeded under a pattern
        pub fn remove_element(&self, pattern: &str) {
            self.lock().elements.retain(|(p, _)| p != pattern);
        }

        /// Set the current URL without navigating
        pub fn set_url(&self, url: impl Into<String>) {
            self.lock().url = url.into();
        }

        /// Make future navigations to `from` land on `to` instead
        pub fn set_redirect(&self, from: impl Into<String>, to: impl Into<String>) {
            self.lock().redirects.insert(from.into(), to.into());
        }

        /// Snapshot of the first element seeded under a pattern
        #[must_use]
        pub fn element(&self, pattern: &str) -> Option<MockElement> {
            self.lock()
                .elements
                .iter()
                .find(|(p, _)| p == pattern)
                .map(|(_, element)| element.clone())
        }

        // ---- driver surface (mirrors the CDP implementation) ----

        /// Navigate to a URL, honoring any seeded redirect
        pub async fn goto(&self, url: &str) -> E2eResult<()> {
            let mut state = self.lock();
            state.url = state
                .redirects
                .get(url)
                .cloned()
                .unwrap_or_else(|| url.to_string());
            Ok(())
        }

        /// Current URL of the page
        pub async fn current_url(&self) -> E2eResult<String> {
            Ok(self.lock().url.clone())
        }

        /// `scheme://authority` of the current URL
        pub async fn origin(&self) -> E2eResult<String> {
            let url = self.current_url().await?;
            origin_of(&url).ok_or_else(|| {
                E2eError::unexpected(format!("current URL {url:?} has no origin"))
            })
        }

        /// Reload the current page (mock: no-op)
        pub async fn refresh(&self) -> E2eResult<()> {
            Ok(())
        }

        /// Drop all cookies for the session (mock: no-op)
        pub async fn clear_cookies(&self) -> E2eResult<()> {
            Ok(())
        }

        /// Whether any alternate of the locator matches an element
        pub async fn element_exists(&self, locator: &Locator) -> E2eResult<bool> {
            Ok(self.lock().find(locator).is_some())
        }

        /// Whether the located element is visible
        pub async fn element_visible(&self, locator: &Locator) -> E2eResult<bool> {
            Ok(self.lock().find(locator).is_some_and(|e| e.visible))
        }

        /// Whether the located element accepts interaction
        pub async fn element_enabled(&self, locator: &Locator) -> E2eResult<bool> {
            Ok(self.lock().find(locator).is_some_and(|e| e.enabled))
        }

        /// Native checked state
        pub async fn element_selected(&self, locator: &Locator) -> E2eResult<bool> {
            Ok(self.lock().find(locator).is_some_and(|e| e.selected))
        }

        /// Text content of the located element
        pub async fn element_text(&self, locator: &Locator) -> E2eResult<Option<String>> {
            Ok(self.lock().find(locator).map(|e| e.text.clone()))
        }

        /// Attribute of the located element
        pub async fn element_attr(
            &self,
            locator: &Locator,
            name: &str,
        ) -> E2eResult<Option<String>> {
            Ok(self
                .lock()
                .find(locator)
                .and_then(|e| e.attributes.get(name).cloned()))
        }

        /// Current input value of the located element
        pub async fn element_value(&self, locator: &Locator) -> E2eResult<Option<String>> {
            Ok(self.lock().find(locator).map(|e| e.value.clone()))
        }

        /// Text content of every element the locator matches
        pub async fn texts(&self, locator: &Locator) -> E2eResult<Vec<String>> {
            Ok(self
                .lock()
                .find_all(locator)
                .into_iter()
                .map(|e| e.text.clone())
                .collect())
        }

        /// Number of elements the locator matches
        pub async fn count(&self, locator: &Locator) -> E2eResult<usize> {
            Ok(self.lock().find_all(locator).len())
        }

        /// Click the located element.
        ///
        /// Toggle-style elements (carrying `aria-checked`) flip their state,
        /// radios become selected, checkboxes toggle their checked state.
        pub async fn click(&self, locator: &Locator) -> E2eResult<()> {
            let mut state = self.lock();
            let element = state
                .find_mut(locator)
                .ok_or_else(|| E2eError::ElementNotFound {
                    locator: locator.describe(),
                })?;
            element.clicks += 1;
            if let Some(checked) = element.attributes.get("aria-checked").cloned() {
                let flipped = if checked == "true" { "false" } else { "true" };
                element
                    .attributes
                    .insert("aria-checked".to_string(), flipped.to_string());
            }
            match element.attributes.get("type").map(String::as_str) {
                Some("radio") => element.selected = true,
                Some("checkbox") => element.selected = !element.selected,
                _ => {}
            }
            Ok(())
        }

        /// Replace the element's value with `text`
        pub async fn clear_and_type(&self, locator: &Locator, text: &str) -> E2eResult<()> {
            let mut state = self.lock();
            let element = state
                .find_mut(locator)
                .ok_or_else(|| E2eError::ElementNotFound {
                    locator: locator.describe(),
                })?;
            element.value = text.to_string();
            Ok(())
        }

        /// Append `text` to the element's current value
        pub async fn type_text(&self, locator: &Locator, text: &str) -> E2eResult<()> {
            let mut state = self.lock();
            let element = state
                .find_mut(locator)
                .ok_or_else(|| E2eError::ElementNotFound {
                    locator: locator.describe(),
                })?;
            element.value.push_str(text);
            Ok(())
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, MockElement, Page};

#[cfg(test)]
mod origin_tests {
    use super::origin_of;

    #[test]
    fn test_origin_with_path() {
        assert_eq!(
            origin_of("https://bo.example.com/auth/login").as_deref(),
            Some("https://bo.example.com")
        );
    }

    #[test]
    fn test_origin_with_port_and_query() {
        assert_eq!(
            origin_of("http://localhost:8080/admin?x=1").as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_origin_bare_host() {
        assert_eq!(
            origin_of("https://bo.example.com").as_deref(),
            Some("https://bo.example.com")
        );
    }

    #[test]
    fn test_origin_rejects_relative() {
        assert!(origin_of("/auth/login").is_none());
        assert!(origin_of("about:blank").is_none());
    }
}
