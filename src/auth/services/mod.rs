//! Token issuing and request authentication.

mod gate;
mod token;

pub use gate::{AuthorizationGate, GateError, GateResult, Principal, TokenPair};
pub use token::TokenService;
