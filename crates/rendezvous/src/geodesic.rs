//! Spherical forward projection and circle sampling.
//!
//! Inputs are validated eagerly: non-finite values, negative distances,
//! non-positive radii, and fewer than 3 segments are errors, never coerced.

use nalgebra::Vector2;

use crate::error::GeoError;
use crate::geojson::Polygon;
use crate::ring::Point;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Segment count used by [`circle_to_polygon`] callers that have no preference.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Great-circle destination from `start` (lon, lat degrees) after travelling
/// `distance_m` metres on initial bearing `bearing_deg` (0 = north, 90 = east).
///
/// The returned longitude is normalised to [-180, 180).
pub fn destination_point(start: Point, distance_m: f64, bearing_deg: f64) -> Result<Point, GeoError> {
    if !start.x.is_finite() || !start.y.is_finite() {
        return Err(GeoError::NonFinite { what: "start" });
    }
    if !distance_m.is_finite() {
        return Err(GeoError::NonFinite { what: "distance" });
    }
    if !bearing_deg.is_finite() {
        return Err(GeoError::NonFinite { what: "bearing" });
    }
    if distance_m < 0.0 {
        return Err(GeoError::NegativeDistance(distance_m));
    }

    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = start.y.to_radians();
    let lambda1 = start.x.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * phi2.sin();
    let lambda2 = lambda1 + y.atan2(x);

    let lon = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    Ok(Vector2::new(lon, phi2.to_degrees()))
}

/// Closed polygon approximating a circle of `radius_m` metres around `centre`,
/// sampled at `segments` evenly spaced bearings starting due north.
///
/// The ring has `segments + 1` coordinates; the last repeats the first exactly.
/// Bearings increase clockwise, so the ring winds clockwise in (lon, lat).
pub fn circle_to_polygon(centre: Point, radius_m: f64, segments: usize) -> Result<Polygon, GeoError> {
    if !centre.x.is_finite() || !centre.y.is_finite() {
        return Err(GeoError::NonFinite { what: "centre" });
    }
    if !radius_m.is_finite() {
        return Err(GeoError::NonFinite { what: "radius" });
    }
    if radius_m <= 0.0 {
        return Err(GeoError::NonPositiveRadius(radius_m));
    }
    if segments < 3 {
        return Err(GeoError::TooFewSegments(segments));
    }
    let mut ring = Vec::with_capacity(segments);
    for i in 0..segments {
        let bearing = 360.0 * i as f64 / segments as f64;
        ring.push(destination_point(centre, radius_m, bearing)?);
    }
    Ok(Polygon::from_open_ring(&ring))
}
