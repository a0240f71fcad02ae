//! Haversine distance, forward azimuth and distance formatting.

#![expect(
    clippy::float_arithmetic,
    reason = "spherical trigonometry is inherently floating-point"
)]

use super::Coordinate;

/// Mean Earth radius in meters used by the spherical model.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

const METERS_PER_KILOMETER: f64 = 1000.0;

/// Great-circle distance between two coordinates in meters.
///
/// Uses the Haversine formula. The intermediate haversine term is clamped to
/// `[0, 1]` so rounding error near identical or antipodal points cannot push
/// the square roots out of their domain.
#[must_use]
pub fn calculate_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let sin_half_lat = (delta_lat / 2.0).sin();
    let sin_half_lon = (delta_lon / 2.0).sin();
    let haversine = sin_half_lat
        .mul_add(sin_half_lat, lat1.cos() * lat2.cos() * sin_half_lon * sin_half_lon)
        .clamp(0.0, 1.0);

    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());
    EARTH_RADIUS_METERS * central_angle
}

/// Initial bearing from `from` towards `to` in degrees, within `[0, 360)`.
#[must_use]
pub fn calculate_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1
        .cos()
        .mul_add(lat2.sin(), -(lat1.sin() * lat2.cos() * delta_lon.cos()));

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Renders a distance for display.
///
/// Below one kilometer the value is shown in whole meters, otherwise in
/// kilometers with two decimals.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < METERS_PER_KILOMETER {
        format!("{meters:.0} meters")
    } else {
        format!("{:.2} kilometers", meters / METERS_PER_KILOMETER)
    }
}
