//! Circular geofence verification.

#![expect(
    clippy::float_arithmetic,
    reason = "geofence overshoot is a floating-point difference"
)]

use super::{Coordinate, calculate_distance};
use serde::{Deserialize, Serialize};

/// Verdict of a single geofence check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    distance_meters: f64,
    within_radius: bool,
    radius_meters: f64,
}

impl VerificationResult {
    /// Great-circle distance between the claim and the target, in meters.
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Whether the claim satisfied the geofence.
    #[must_use]
    pub const fn within_radius(&self) -> bool {
        self.within_radius
    }

    /// Radius the claim was checked against, in meters.
    #[must_use]
    pub const fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// How far outside the fence the claim landed; zero when inside.
    #[must_use]
    pub fn overshoot_meters(&self) -> f64 {
        if self.within_radius {
            0.0
        } else {
            (self.distance_meters - self.radius_meters.max(0.0)).max(0.0)
        }
    }
}

/// Checks whether `claimed` lies within `radius_meters` of `target`.
///
/// The boundary is inclusive. A radius that is not strictly positive
/// (including `NaN`) is only satisfied by an exact-zero distance; the check
/// never fails, so malformed historical radii degrade to a rejection.
#[must_use]
pub fn verify(claimed: Coordinate, target: Coordinate, radius_meters: f64) -> VerificationResult {
    let distance_meters = calculate_distance(claimed, target);
    let within_radius = if radius_meters > 0.0 {
        distance_meters <= radius_meters
    } else {
        distance_meters <= 0.0
    };

    VerificationResult {
        distance_meters,
        within_radius,
        radius_meters,
    }
}
