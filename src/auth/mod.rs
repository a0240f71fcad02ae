//! Session tokens and the authorization gate.
//!
//! Tokens are compact HS256 JWTs signed with one shared secret. The
//! [`services::TokenService`] issues and inspects them against an injected
//! clock, and [`services::AuthorizationGate`] turns a presented access token
//! into a [`services::Principal`] that task operations accept as the acting
//! identity.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
