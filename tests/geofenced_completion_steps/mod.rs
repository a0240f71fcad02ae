//! Step definitions for geofenced completion BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
