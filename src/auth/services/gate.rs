//! Authentication of presented tokens against stored users.

use super::TokenService;
use crate::auth::domain::{TokenClaims, TokenError};
use crate::user::{
    domain::{User, UserId, UserRole, Username},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Authenticated identity derived from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    username: Username,
    role: UserRole,
}

impl Principal {
    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the stored role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id(),
            username: user.username().clone(),
            role: user.role(),
        }
    }
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    access_token: String,
    refresh_token: String,
}

impl TokenPair {
    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

/// Errors returned by the authorization gate.
#[derive(Debug, Error)]
pub enum GateError {
    /// The presented token does not authenticate anyone.
    #[error("authentication required")]
    Unauthenticated,

    /// A new token could not be issued.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The user lookup failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Access,
    Refresh,
}

/// Resolves presented tokens to principals and issues session tokens.
pub struct AuthorizationGate<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tokens: Arc<TokenService<C>>,
    users: Arc<U>,
}

impl<U, C> AuthorizationGate<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a gate over the given token service and user repository.
    #[must_use]
    pub const fn new(tokens: Arc<TokenService<C>>, users: Arc<U>) -> Self {
        Self { tokens, users }
    }

    /// Authenticates an access token.
    ///
    /// Expired, malformed and foreign-signed tokens, refresh tokens, tokens
    /// for users that no longer exist and tokens whose subject differs from
    /// the stored username are all rejected with the same error.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Unauthenticated`] on rejection or
    /// [`GateError::UserRepository`] when the user lookup fails.
    pub async fn authenticate(&self, token: &str) -> GateResult<Principal> {
        let user = self.resolve(token, TokenKind::Access).await?;
        debug!(user_id = %user.id(), "authenticated request");
        Ok(Principal::from(&user))
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Unauthenticated`] unless `refresh_token` is a
    /// valid, unexpired refresh token for an existing user, or a token or
    /// repository error.
    pub async fn refresh(&self, refresh_token: &str) -> GateResult<TokenPair> {
        let user = self.resolve(refresh_token, TokenKind::Refresh).await?;
        self.issue_session(&user)
    }

    /// Issues an access and refresh token pair for an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Token`] when signing fails.
    pub fn issue_session(&self, user: &User) -> GateResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.tokens.issue_access_token(user)?,
            refresh_token: self.tokens.issue_refresh_token(user)?,
        })
    }

    async fn resolve(&self, token: &str, expected: TokenKind) -> GateResult<User> {
        if !self.tokens.validate_standalone(token) {
            return Err(GateError::Unauthenticated);
        }
        let kind = if self.tokens.is_refresh_token(token) {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        };
        if kind != expected {
            warn!(?kind, ?expected, "token presented for the wrong purpose");
            return Err(GateError::Unauthenticated);
        }
        let claims = self
            .tokens
            .decode(token)
            .map_err(|_| GateError::Unauthenticated)?;

        let Some(user) = self.users.find_by_id(claims.user_id()).await? else {
            warn!(user_id = %claims.user_id(), "token for unknown user");
            return Err(GateError::Unauthenticated);
        };
        if !self.tokens.validate(token, user.username().as_str()) {
            warn!(
                user_id = %user.id(),
                subject = claims.subject(),
                "token subject does not match stored user"
            );
            return Err(GateError::Unauthenticated);
        }
        log_role_drift(&claims, &user);
        Ok(user)
    }
}

fn log_role_drift(claims: &TokenClaims, user: &User) {
    if claims.role() != user.role() {
        debug!(
            user_id = %user.id(),
            token_role = %claims.role(),
            stored_role = %user.role(),
            "stored role differs from token claim"
        );
    }
}
