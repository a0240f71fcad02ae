//! Great-circle geometry and geofence verification.
//!
//! Everything in this module is pure and stateless: distances, bearings and
//! verdicts are computed from their inputs alone and may be called from any
//! number of threads.
//!
//! - [`Coordinate`] is a validated latitude/longitude pair
//! - [`calculate_distance`] and [`calculate_bearing`] implement the Haversine
//!   and forward-azimuth formulas on a spherical Earth
//! - [`verify`] applies a circular geofence to a claimed position

mod coordinate;
mod error;
mod geofence;
mod math;

pub use coordinate::{Coordinate, is_valid_coordinates};
pub use error::GeoError;
pub use geofence::{VerificationResult, verify};
pub use math::{EARTH_RADIUS_METERS, calculate_bearing, calculate_distance, format_distance};

#[cfg(test)]
mod tests;
