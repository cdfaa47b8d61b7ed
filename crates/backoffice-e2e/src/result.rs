//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type E2eResult<T> = Result<T, E2eError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum E2eError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Script evaluation error
    #[error("Script evaluation failed: {message}")]
    Eval {
        /// Error message
        message: String,
    },

    /// A wait condition was never met
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waiting_for: String,
    },

    /// No alternate of a locator matched an element
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator description
        locator: String,
    },

    /// The page was not in the state an operation requires
    /// (e.g. an unauthenticated redirect away from a protected screen)
    #[error("Unexpected page state: {message}")]
    UnexpectedState {
        /// Error message
        message: String,
    },

    /// A required environment variable is not set
    #[error("Environment variable {name} must be set")]
    MissingEnv {
        /// Variable name
        name: String,
    },

    /// An environment variable holds an unusable value
    #[error("Environment variable {name} has invalid value {value:?}")]
    InvalidEnv {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
    },

    /// An expected DOM outcome did not hold
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl E2eError {
    /// Shorthand for an [`E2eError::Assertion`]
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Shorthand for an [`E2eError::UnexpectedState`]
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedState {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_condition() {
        let err = E2eError::Timeout {
            ms: 10_000,
            waiting_for: "login form to be visible".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("10000ms"));
        assert!(text.contains("login form to be visible"));
    }

    #[test]
    fn test_missing_env_message() {
        let err = E2eError::MissingEnv {
            name: "LOGIN_URL".to_string(),
        };
        assert_eq!(err.to_string(), "Environment variable LOGIN_URL must be set");
    }

    #[test]
    fn test_assertion_shorthand() {
        let err = E2eError::assertion("toast missing");
        assert!(matches!(err, E2eError::Assertion { .. }));
        assert!(err.to_string().contains("toast missing"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: E2eError = io.into();
        assert!(matches!(err, E2eError::Io(_)));
    }
}
