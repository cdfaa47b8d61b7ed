//! Deployment configuration.
//!
//! The deployment under test is described entirely through environment
//! variables: screen URLs, admin credentials, headless mode, and optional
//! pre-provisioned fixture data (a registered email, a valid referral code,
//! a valid package id). Parsing is factored over an iterator of pairs so it
//! can be unit-tested without touching the process environment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::result::{E2eError, E2eResult};

/// Optional pre-provisioned data the discount scenarios can use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureValues {
    /// An email address registered in the application (`REGISTERED_EMAIL`)
    pub registered_email: Option<String>,
    /// A valid AP referral code (`REFERRAL_CODE`)
    pub referral_code: Option<String>,
    /// A valid package/challenge id (`PACKAGE_ID`)
    pub package_id: Option<String>,
}

/// Suite configuration resolved from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Login screen URL (`LOGIN_URL`)
    pub login_url: String,
    /// Dashboard URL the app redirects to after login (`DASHBOARD_URL`)
    pub dashboard_url: String,
    /// URL fragment expected after a successful logout (`LOGOUT_SUCCESS_URL`)
    pub logout_success_url: String,
    /// Forgot-password screen URL (`FORGOT_PASSWORD_URL`)
    pub forgot_password_url: String,
    /// Discount creation form URL (`CREATE_DISCOUNT_URL`)
    pub create_discount_url: String,
    /// Admin account email (`ADMIN_EMAIL`)
    pub admin_email: String,
    /// Admin account password (`ADMIN_PASSWORD`)
    pub admin_password: String,
    /// Run the browser headless (`HEADLESS`, accepts `true`/`false`/`1`/`0`)
    pub headless: bool,
    /// Optional fixture data
    pub fixtures: FixtureValues,
}

impl SuiteConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::MissingEnv`] for an unset required variable and
    /// [`E2eError::InvalidEnv`] for an unparsable `HEADLESS` value.
    pub fn from_env() -> E2eResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> E2eResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let map: HashMap<String, String> = vars.into_iter().collect();

        let require = |name: &str| -> E2eResult<String> {
            map.get(name)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or_else(|| E2eError::MissingEnv {
                    name: name.to_string(),
                })
        };
        let optional = |name: &str| map.get(name).filter(|v| !v.trim().is_empty()).cloned();

        let headless = match map.get("HEADLESS").map(String::as_str) {
            None | Some("") => false,
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            Some(other) => {
                return Err(E2eError::InvalidEnv {
                    name: "HEADLESS".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            login_url: require("LOGIN_URL")?,
            dashboard_url: require("DASHBOARD_URL")?,
            logout_success_url: require("LOGOUT_SUCCESS_URL")?,
            forgot_password_url: require("FORGOT_PASSWORD_URL")?,
            create_discount_url: require("CREATE_DISCOUNT_URL")?,
            admin_email: require("ADMIN_EMAIL")?,
            admin_password: require("ADMIN_PASSWORD")?,
            headless,
            fixtures: FixtureValues {
                registered_email: optional("REGISTERED_EMAIL"),
                referral_code: optional("REFERRAL_CODE"),
                package_id: optional("PACKAGE_ID"),
            },
        })
    }

    /// Set headless mode
    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> Vec<(String, String)> {
        [
            ("LOGIN_URL", "https://bo.example.com/auth/login"),
            ("DASHBOARD_URL", "https://bo.example.com/"),
            ("LOGOUT_SUCCESS_URL", "/auth/login"),
            (
                "FORGOT_PASSWORD_URL",
                "https://bo.example.com/auth/forgot-password",
            ),
            (
                "CREATE_DISCOUNT_URL",
                "https://bo.example.com/discount/create",
            ),
            ("ADMIN_EMAIL", "admin@example.com"),
            ("ADMIN_PASSWORD", "hunter2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_full_config_parses() {
        let config = SuiteConfig::from_vars(base_vars()).unwrap();
        assert_eq!(config.login_url, "https://bo.example.com/auth/login");
        assert_eq!(config.admin_email, "admin@example.com");
        assert!(!config.headless);
        assert!(config.fixtures.registered_email.is_none());
    }

    #[test]
    fn test_missing_required_variable() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| k != "ADMIN_PASSWORD")
            .collect();
        let err = SuiteConfig::from_vars(vars).unwrap_err();
        match err {
            E2eError::MissingEnv { name } => assert_eq!(name, "ADMIN_PASSWORD"),
            other => panic!("expected MissingEnv, got {other}"),
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut vars = base_vars();
        for (k, v) in &mut vars {
            if k == "LOGIN_URL" {
                *v = "   ".to_string();
            }
        }
        assert!(matches!(
            SuiteConfig::from_vars(vars),
            Err(E2eError::MissingEnv { .. })
        ));
    }

    #[test]
    fn test_headless_accepts_true_and_one() {
        for value in ["true", "1"] {
            let mut vars = base_vars();
            vars.push(("HEADLESS".to_string(), value.to_string()));
            assert!(SuiteConfig::from_vars(vars).unwrap().headless);
        }
    }

    #[test]
    fn test_headless_rejects_garbage() {
        let mut vars = base_vars();
        vars.push(("HEADLESS".to_string(), "yes please".to_string()));
        assert!(matches!(
            SuiteConfig::from_vars(vars),
            Err(E2eError::InvalidEnv { .. })
        ));
    }

    #[test]
    fn test_fixture_values_are_optional() {
        let mut vars = base_vars();
        vars.push(("REGISTERED_EMAIL".to_string(), "user@example.com".to_string()));
        vars.push(("PACKAGE_ID".to_string(), "PKG-001".to_string()));
        let config = SuiteConfig::from_vars(vars).unwrap();
        assert_eq!(
            config.fixtures.registered_email.as_deref(),
            Some("user@example.com")
        );
        assert_eq!(config.fixtures.package_id.as_deref(), Some("PKG-001"));
        assert!(config.fixtures.referral_code.is_none());
    }

    #[test]
    fn test_with_headless_builder() {
        let config = SuiteConfig::from_vars(base_vars()).unwrap().with_headless(true);
        assert!(config.headless);
    }
}
