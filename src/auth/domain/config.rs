//! Signing secret and token lifetimes.

use super::TokenConfigError;
use std::fmt;

const SECRET_KEY: &str = "GEOTASK_JWT_SECRET";
const ACCESS_TTL_KEY: &str = "GEOTASK_JWT_EXPIRATION_MS";
const REFRESH_TTL_KEY: &str = "GEOTASK_JWT_REFRESH_EXPIRATION_MS";

/// Shared secret and lifetimes used to issue and verify tokens.
///
/// Lifetimes are configured in milliseconds and issued in whole seconds,
/// rounded up. Construction guarantees the refresh lifetime is at least one
/// second longer than the access lifetime once rounded, so token kind can be
/// told apart from lifetime alone.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenConfig {
    secret: Vec<u8>,
    access_ttl_ms: u64,
    refresh_ttl_ms: u64,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl TokenConfig {
    /// Minimum secret length for HS256 (256 bits).
    pub const MIN_SECRET_BYTES: usize = 32;

    /// Default access token lifetime: one day.
    pub const DEFAULT_ACCESS_TTL_MS: u64 = 86_400_000;

    /// Default refresh token lifetime: seven days.
    pub const DEFAULT_REFRESH_TTL_MS: u64 = 604_800_000;

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError::WeakSecret`] for secrets shorter than
    /// [`Self::MIN_SECRET_BYTES`], [`TokenConfigError::TtlOutOfRange`] for
    /// zero lifetimes and [`TokenConfigError::RefreshNotLonger`] when the
    /// refresh lifetime does not outlast the access lifetime.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        access_ttl_ms: u64,
        refresh_ttl_ms: u64,
    ) -> Result<Self, TokenConfigError> {
        let secret_bytes = secret.into();
        if secret_bytes.len() < Self::MIN_SECRET_BYTES {
            return Err(TokenConfigError::WeakSecret(secret_bytes.len()));
        }
        let access_lifetime_secs = whole_seconds(access_ttl_ms, "access")?;
        let refresh_lifetime_secs = whole_seconds(refresh_ttl_ms, "refresh")?;
        if refresh_lifetime_secs <= access_lifetime_secs {
            return Err(TokenConfigError::RefreshNotLonger {
                access_ms: access_ttl_ms,
                refresh_ms: refresh_ttl_ms,
            });
        }

        Ok(Self {
            secret: secret_bytes,
            access_ttl_ms,
            refresh_ttl_ms,
            access_lifetime_secs,
            refresh_lifetime_secs,
        })
    }

    /// Creates a configuration with the default one-day and seven-day
    /// lifetimes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError::WeakSecret`] for short secrets.
    pub fn with_default_lifetimes(secret: impl Into<Vec<u8>>) -> Result<Self, TokenConfigError> {
        Self::new(
            secret,
            Self::DEFAULT_ACCESS_TTL_MS,
            Self::DEFAULT_REFRESH_TTL_MS,
        )
    }

    /// Reads the configuration from `GEOTASK_JWT_SECRET`,
    /// `GEOTASK_JWT_EXPIRATION_MS` and `GEOTASK_JWT_REFRESH_EXPIRATION_MS`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError::Missing`] when the secret is unset,
    /// [`TokenConfigError::InvalidTtl`] for unparsable lifetimes, or any
    /// error from [`Self::new`].
    pub fn from_env() -> Result<Self, TokenConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Uses the same keys and defaults as [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TokenConfigError> {
        let secret = lookup(SECRET_KEY).ok_or(TokenConfigError::Missing(SECRET_KEY))?;
        let access = parse_ttl(&lookup, ACCESS_TTL_KEY, Self::DEFAULT_ACCESS_TTL_MS)?;
        let refresh = parse_ttl(&lookup, REFRESH_TTL_KEY, Self::DEFAULT_REFRESH_TTL_MS)?;
        Self::new(secret, access, refresh)
    }

    /// Returns the configured access lifetime in milliseconds.
    #[must_use]
    pub const fn access_ttl_ms(&self) -> u64 {
        self.access_ttl_ms
    }

    /// Returns the configured refresh lifetime in milliseconds.
    #[must_use]
    pub const fn refresh_ttl_ms(&self) -> u64 {
        self.refresh_ttl_ms
    }

    pub(crate) const fn access_lifetime_secs(&self) -> i64 {
        self.access_lifetime_secs
    }

    pub(crate) const fn refresh_lifetime_secs(&self) -> i64 {
        self.refresh_lifetime_secs
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_ms", &self.access_ttl_ms)
            .field("refresh_ttl_ms", &self.refresh_ttl_ms)
            .finish()
    }
}

fn whole_seconds(ttl_ms: u64, kind: &'static str) -> Result<i64, TokenConfigError> {
    if ttl_ms == 0 {
        return Err(TokenConfigError::TtlOutOfRange(kind));
    }
    i64::try_from(ttl_ms.div_ceil(1000)).map_err(|_| TokenConfigError::TtlOutOfRange(kind))
}

fn parse_ttl(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, TokenConfigError> {
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| TokenConfigError::InvalidTtl { key, value: raw })
    })
}
