//! Token configuration, claims and errors.

mod claims;
mod config;
mod error;

pub use claims::TokenClaims;
pub use config::TokenConfig;
pub use error::{TokenConfigError, TokenError};
