//! Claims carried by issued tokens.

use crate::user::domain::{User, UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names owned by the token engine; extras may not override them.
const RESERVED_CLAIMS: [&str; 5] = ["sub", "userId", "role", "iat", "exp"];

/// Decoded token claims.
///
/// `iat` and `exp` are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    sub: String,
    #[serde(rename = "userId")]
    user_id: UserId,
    role: UserRole,
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TokenClaims {
    pub(crate) fn for_user(
        user: &User,
        issued_at: i64,
        lifetime_secs: i64,
        mut extra: Map<String, Value>,
    ) -> Self {
        extra.retain(|key, _| !RESERVED_CLAIMS.contains(&key.as_str()));
        Self {
            sub: user.username().as_str().to_owned(),
            user_id: user.id(),
            role: user.role(),
            iat: issued_at,
            exp: issued_at.saturating_add(lifetime_secs),
            extra,
        }
    }

    /// Returns the subject (username).
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns the user identifier claim.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the role claim.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the issue time in epoch seconds.
    #[must_use]
    pub const fn issued_at(&self) -> i64 {
        self.iat
    }

    /// Returns the expiry time in epoch seconds.
    #[must_use]
    pub const fn expires_at(&self) -> i64 {
        self.exp
    }

    /// Returns the issued lifetime in seconds.
    #[must_use]
    pub const fn lifetime_secs(&self) -> i64 {
        self.exp.saturating_sub(self.iat)
    }

    /// Returns the caller-supplied claims.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns one caller-supplied claim.
    #[must_use]
    pub fn extra_claim(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub(crate) fn issued_at_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub(crate) fn expires_at_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
