//! Location-bound task lifecycle.
//!
//! Tasks are assigned by one user to another and completed by submitting a
//! GPS fix that must fall inside the task's circular geofence. Every attempt
//! is recorded as a [`domain::TaskCompletion`], verified or not, so the
//! completion history doubles as an audit log. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
