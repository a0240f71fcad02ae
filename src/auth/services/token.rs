//! HS256 token engine.

use crate::auth::domain::{TokenClaims, TokenConfig, TokenError};
use crate::user::domain::{User, UserId, UserRole};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues and inspects access and refresh tokens.
///
/// Signature checks are delegated to `jsonwebtoken`; expiry is evaluated
/// against the injected clock so that callers decide what "now" means.
pub struct TokenService<C>
where
    C: Clock + Send + Sync,
{
    config: Arc<TokenConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<C>,
}

impl<C> TokenService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a token service for the given configuration and clock.
    #[must_use]
    pub fn new(config: Arc<TokenConfig>, clock: Arc<C>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            config,
            validation,
            clock,
        }
    }

    /// Returns the configuration this service signs with.
    #[must_use]
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issues an access token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when signing fails.
    pub fn issue_access_token(&self, user: &User) -> Result<String, TokenError> {
        self.issue_access_token_with_claims(user, Map::new())
    }

    /// Issues an access token carrying additional claims.
    ///
    /// Extra claims named `sub`, `userId`, `role`, `iat` or `exp` are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when signing fails.
    pub fn issue_access_token_with_claims(
        &self,
        user: &User,
        extra: Map<String, Value>,
    ) -> Result<String, TokenError> {
        self.issue(user, self.config.access_lifetime_secs(), extra)
    }

    /// Issues a refresh token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when signing fails.
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        self.issue(user, self.config.refresh_lifetime_secs(), Map::new())
    }

    /// Verifies the signature and returns the claims.
    ///
    /// Expiry is not checked; use [`Self::is_expired`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] when the token is structurally
    /// invalid, signed with another secret or missing required claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| TokenError::Malformed(err.to_string()))
    }

    /// Returns the subject (username) of a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] as for [`Self::decode`].
    pub fn extract_username(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.subject().to_owned())
    }

    /// Returns the user identifier claim of a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] as for [`Self::decode`].
    pub fn extract_user_id(&self, token: &str) -> Result<UserId, TokenError> {
        self.decode(token).map(|claims| claims.user_id())
    }

    /// Returns the role claim of a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] as for [`Self::decode`].
    pub fn extract_role(&self, token: &str) -> Result<UserRole, TokenError> {
        self.decode(token).map(|claims| claims.role())
    }

    /// Returns the expiry instant of a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] as for [`Self::decode`], or when
    /// the `exp` claim is outside the representable time range.
    pub fn extract_expiration(&self, token: &str) -> Result<DateTime<Utc>, TokenError> {
        self.decode(token)?
            .expires_at_time()
            .ok_or_else(|| TokenError::Malformed("exp claim out of range".to_owned()))
    }

    /// Returns the issue instant of a token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] as for [`Self::decode`], or when
    /// the `iat` claim is outside the representable time range.
    pub fn extract_issued_at(&self, token: &str) -> Result<DateTime<Utc>, TokenError> {
        self.decode(token)?
            .issued_at_time()
            .ok_or_else(|| TokenError::Malformed("iat claim out of range".to_owned()))
    }

    /// Reports whether the token's expiry lies before the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] as for [`Self::decode`].
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        self.decode(token).map(|claims| self.has_expired(&claims))
    }

    /// Checks signature, expiry and that the subject is `expected_username`.
    ///
    /// Never fails; every problem yields `false`.
    #[must_use]
    pub fn validate(&self, token: &str, expected_username: &str) -> bool {
        self.decode(token).is_ok_and(|claims| {
            !self.has_expired(&claims) && claims.subject() == expected_username
        })
    }

    /// Checks signature and expiry only.
    ///
    /// Malformed tokens are logged at `warn` and reported as `false`.
    #[must_use]
    pub fn validate_standalone(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(claims) if self.has_expired(&claims) => {
                debug!(subject = claims.subject(), "token expired");
                false
            }
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "invalid token");
                false
            }
        }
    }

    /// Reports whether the token was issued with the refresh lifetime.
    ///
    /// Returns `false` for tokens that cannot be decoded.
    #[must_use]
    pub fn is_refresh_token(&self, token: &str) -> bool {
        self.decode(token).is_ok_and(|claims| {
            claims.lifetime_secs() >= self.config.refresh_lifetime_secs()
        })
    }

    /// Milliseconds until the token expires.
    ///
    /// Negative for tokens that have already expired and `0` for tokens that
    /// cannot be decoded.
    #[must_use]
    pub fn time_until_expiration(&self, token: &str) -> i64 {
        self.decode(token).map_or(0, |claims| {
            claims
                .expires_at()
                .saturating_mul(1000)
                .saturating_sub(self.now_millis())
        })
    }

    fn issue(
        &self,
        user: &User,
        lifetime_secs: i64,
        extra: Map<String, Value>,
    ) -> Result<String, TokenError> {
        let issued_at = self.clock.utc().timestamp();
        let claims = TokenClaims::for_user(user, issued_at, lifetime_secs, extra);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|err| TokenError::Encoding(err.to_string()))?;
        debug!(user_id = %user.id(), expires_at = claims.expires_at(), "issued token");
        Ok(token)
    }

    fn has_expired(&self, claims: &TokenClaims) -> bool {
        claims.expires_at().saturating_mul(1000) < self.now_millis()
    }

    fn now_millis(&self) -> i64 {
        self.clock.utc().timestamp_millis()
    }
}
