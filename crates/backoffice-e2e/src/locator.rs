//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an ordered chain of alternate [`Selector`]s. The live UI
//! offers no stable test-id contract, so most screens are addressed through
//! several equivalent strategies (an id where one exists, an attribute match,
//! a structural path as last resort); location tries each alternate in order
//! and uses the first one that resolves to an element.
//!
//! Selectors compile to JavaScript DOM queries, which keeps CSS, XPath and
//! id lookup uniform at the driver layer.

use serde::{Deserialize, Serialize};

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g. `button[type='submit']`)
    Css(String),
    /// XPath selector (e.g. `//*[contains(text(), 'Logout')]`)
    XPath(String),
    /// Element id (`document.getElementById`)
    Id(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Compile to a JavaScript expression resolving to the first match
    /// (or `null`)
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => format!(
                "document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
            Self::Id(s) => format!("document.getElementById({s:?})"),
        }
    }

    /// Compile to a JavaScript expression resolving to an array of all
    /// matches
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
            ),
            Self::Id(s) => {
                format!("(document.getElementById({s:?}) ? [document.getElementById({s:?})] : [])")
            }
        }
    }

    /// Compile to a JavaScript expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => format!(
                "document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
            ),
            Self::Id(s) => format!("(document.getElementById({s:?}) ? 1 : 0)"),
        }
    }

    /// The raw pattern string
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::Id(s) => s,
        }
    }

    /// Short tag for error messages
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
        }
    }
}

/// A locator: one or more alternate selectors tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selectors: Vec<Selector>,
    /// Per-locator wait timeout override, in milliseconds
    timeout_ms: Option<u64>,
}

impl Locator {
    /// Create a locator from a single selector
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
            timeout_ms: None,
        }
    }

    /// Create a locator with a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Create a locator with an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(Selector::xpath(selector))
    }

    /// Create a locator with an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::new(Selector::id(id))
    }

    /// Append a fallback selector, tried when the previous ones match
    /// nothing
    #[must_use]
    pub fn or(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Override the wait timeout for this locator
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// The alternates, in trial order
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// The timeout override, if any
    #[must_use]
    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// Human-readable description for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        let first = &self.selectors[0];
        if self.selectors.len() == 1 {
            format!("{}:{}", first.strategy(), first.pattern())
        } else {
            format!(
                "{}:{} (+{} alternates)",
                first.strategy(),
                first.pattern(),
                self.selectors.len() - 1
            )
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let query = Selector::css("button.primary").to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("button.primary"));
        }

        #[test]
        fn test_xpath_query() {
            let query = Selector::xpath("//button[@type='submit']").to_query();
            assert!(query.contains("document.evaluate"));
            assert!(query.contains("FIRST_ORDERED_NODE_TYPE"));
        }

        #[test]
        fn test_id_query() {
            let query = Selector::id("loginForm_username").to_query();
            assert!(query.contains("getElementById"));
            assert!(query.contains("loginForm_username"));
        }

        #[test]
        fn test_css_count_query() {
            let query = Selector::css(".ant-form-item-explain-error").to_count_query();
            assert!(query.contains("querySelectorAll"));
            assert!(query.ends_with(".length"));
        }

        #[test]
        fn test_xpath_query_all_iterates_snapshot() {
            let query = Selector::xpath("//div[contains(@class,'error')]").to_query_all();
            assert!(query.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
            assert!(query.contains("snapshotItem"));
        }

        #[test]
        fn test_pattern_quotes_are_escaped() {
            let query = Selector::css("a[href='/auth/forgot-password']").to_query();
            // The pattern is embedded via debug formatting, so the single
            // quotes survive inside a double-quoted JS string.
            assert!(query.contains("\"a[href='/auth/forgot-password']\""));
        }

        #[test]
        fn test_strategy_tags() {
            assert_eq!(Selector::css("x").strategy(), "css");
            assert_eq!(Selector::xpath("x").strategy(), "xpath");
            assert_eq!(Selector::id("x").strategy(), "id");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_single_selector() {
            let locator = Locator::css("button");
            assert_eq!(locator.selectors().len(), 1);
            assert_eq!(locator.describe(), "css:button");
        }

        #[test]
        fn test_fallback_chain_preserves_order() {
            let locator = Locator::id("code")
                .or(Selector::css("input[name='discountCode']"))
                .or(Selector::xpath("//label[contains(text(),'Discount Code')]/..//input"));
            let strategies: Vec<_> = locator.selectors().iter().map(Selector::strategy).collect();
            assert_eq!(strategies, ["id", "css", "xpath"]);
        }

        #[test]
        fn test_describe_counts_alternates() {
            let locator = Locator::id("code").or(Selector::css("input"));
            assert_eq!(locator.describe(), "id:code (+1 alternates)");
        }

        #[test]
        fn test_timeout_override() {
            let locator = Locator::css("button").with_timeout_ms(3000);
            assert_eq!(locator.timeout_ms(), Some(3000));

            let plain = Locator::css("button");
            assert_eq!(plain.timeout_ms(), None);
        }

        #[test]
        fn test_display_matches_describe() {
            let locator = Locator::xpath("//aside");
            assert_eq!(format!("{locator}"), locator.describe());
        }
    }
}
