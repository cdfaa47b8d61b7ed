//! Page objects.
//!
//! One struct per screen, each binding that screen's locator table to
//! intention-revealing operations. Page objects never retry; they locate,
//! wait for interactability, perform exactly one interaction, and surface
//! unexpected states as typed errors. Best-effort helpers (toggle state
//! readers, cleanup) log and continue instead of failing a scenario.

mod create_discount;
mod dashboard;
mod forgot_password;
mod login;

pub use create_discount::CreateDiscountPage;
pub use dashboard::DashboardPage;
pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;

/// Trait for page objects representing one screen of the application.
pub trait PageObject {
    /// URL fragment that identifies this page (e.g. `/auth/login`)
    fn url_pattern(&self) -> &str;

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Default wait budget for this page to become ready, in milliseconds
    fn load_timeout_ms(&self) -> u64 {
        10_000
    }
}
