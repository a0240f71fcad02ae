//! Error types for token handling.

use thiserror::Error;

/// Failures when issuing or reading a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not a well-formed, correctly signed token.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The claims could not be signed.
    #[error("failed to sign token: {0}")]
    Encoding(String),
}

/// Failures when building a [`super::TokenConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenConfigError {
    /// A required environment variable is not set.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// The signing secret is shorter than HS256 requires.
    #[error("signing secret must be at least 32 bytes, got {0}")]
    WeakSecret(usize),

    /// A lifetime value is not a whole number of milliseconds.
    #[error("invalid value for {key}: {value:?}")]
    InvalidTtl {
        /// Configuration key that held the value.
        key: &'static str,
        /// Raw value as supplied.
        value: String,
    },

    /// A lifetime is zero or too large to express in seconds.
    #[error("{0} token lifetime is out of range")]
    TtlOutOfRange(&'static str),

    /// The refresh lifetime does not exceed the access lifetime.
    #[error("refresh lifetime ({refresh_ms} ms) must exceed access lifetime ({access_ms} ms) by at least one second")]
    RefreshNotLonger {
        /// Access token lifetime in milliseconds.
        access_ms: u64,
        /// Refresh token lifetime in milliseconds.
        refresh_ms: u64,
    },
}
