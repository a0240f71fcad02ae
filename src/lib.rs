//! Geotask: geofenced task completion with token-based authorization.
//!
//! Tasks are assigned to a user at a target location. The assignee starts the
//! task and then claims completion from a GPS position; the claim is verified
//! against the task's geofence using great-circle distance, and every claim
//! is recorded whether or not it lands inside the fence. Requests are
//! authenticated with HS256 session tokens.
//!
//! # Architecture
//!
//! Geotask follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`geo`]: Coordinates, Haversine distance and geofence verification
//! - [`user`]: Users referenced by tasks and tokens
//! - [`task`]: Task lifecycle and completion records
//! - [`auth`]: Session tokens and request authentication

pub mod auth;
pub mod geo;
pub mod task;
pub mod user;
