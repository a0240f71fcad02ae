//! Validated latitude/longitude pair.

use super::{GeoError, calculate_bearing, calculate_distance};
use serde::{Deserialize, Serialize};
use std::fmt;

const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Returns `true` when both values lie within the WGS84 degree ranges.
///
/// `NaN` is never valid.
#[must_use]
pub fn is_valid_coordinates(latitude: f64, longitude: f64) -> bool {
    LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude)
}

/// A point on the Earth's surface in decimal degrees.
///
/// Construction validates both components, so holding a `Coordinate` is
/// proof that it lies within range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidLatitude`] when `latitude` is outside
    /// `[-90, 90]` and [`GeoError::InvalidLongitude`] when `longitude` is
    /// outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        calculate_distance(self, other)
    }

    /// Initial bearing towards `other` in degrees, within `[0, 360)`.
    #[must_use]
    pub fn bearing_to(self, other: Self) -> f64 {
        calculate_bearing(self, other)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = GeoError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Unvalidated wire shape used so deserialisation goes through [`Coordinate::new`].
#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}
