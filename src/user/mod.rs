//! Users referenced by tasks and tokens.
//!
//! User accounts are owned by an external identity system; this module only
//! models the identity, username and role needed for task assignment and
//! token claims, together with the lookup port used to resolve them.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
