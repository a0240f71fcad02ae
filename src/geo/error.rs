//! Error types for coordinate validation.

use thiserror::Error;

/// Errors returned while constructing geographic values.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum GeoError {
    /// Latitude is outside `[-90, 90]` or not a number.
    #[error("invalid latitude {0}, expected a value in [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude is outside `[-180, 180]` or not a number.
    #[error("invalid longitude {0}, expected a value in [-180, 180]")]
    InvalidLongitude(f64),
}
