//! End-to-end browser test suite for the back-office admin console.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Suite Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐             │
//! │   │ Test Spec  │    │ Page       │    │ Browser    │             │
//! │   │ (tests/)   │───►│ Objects    │───►│ (CDP /     │             │
//! │   │            │    │ + Waits    │    │  chromium) │             │
//! │   └────────────┘    └────────────┘    └────────────┘             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Specs drive intention-revealing page-object operations; page objects
//! locate elements through fallback selector chains and explicit waits; the
//! browser layer talks CDP when the `browser` feature is on, and a
//! deterministic in-memory page model otherwise.
//!
//! The deployment under test is configured entirely through environment
//! variables; see [`config::SuiteConfig`].

#![warn(missing_docs)]

pub mod browser;
pub mod config;
pub mod locator;
pub mod logging;
pub mod pages;
pub mod result;
pub mod session;
pub mod wait;

pub use browser::{Browser, BrowserConfig, Page};
pub use config::{FixtureValues, SuiteConfig};
pub use locator::{Locator, Selector};
pub use pages::{CreateDiscountPage, DashboardPage, ForgotPasswordPage, LoginPage, PageObject};
pub use result::{E2eError, E2eResult};
pub use session::Session;
pub use wait::{
    safe_click, wait_for_clickable, wait_for_gone, wait_for_visible, wait_until,
    wait_url_contains, wait_url_not_contains, WaitCondition, WaitOptions,
};
