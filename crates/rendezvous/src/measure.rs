//! Planar measures on GeoJSON polygons.
//!
//! These project degrees to local metres around the ring's vertex-mean
//! latitude (111 320 m per degree of latitude, scaled by cos(lat) for
//! longitude). Good for regional extents of tens of kilometres; they degrade
//! near the poles and over very large areas. They are not geodesically exact.

use crate::geojson::{BBox, Coordinate, Polygon};

/// Metres per degree of latitude in the local planar approximation.
pub const METRES_PER_DEGREE: f64 = 111_320.0;

/// Bounding box of the outer ring; all zeros for an empty ring.
pub fn bounding_box(polygon: &Polygon) -> BBox {
    let ring = polygon.outer();
    if ring.is_empty() {
        return BBox::default();
    }
    let mut b = BBox {
        min_lon: f64::INFINITY,
        min_lat: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
        max_lat: f64::NEG_INFINITY,
    };
    for &[lon, lat] in ring {
        b.min_lon = b.min_lon.min(lon);
        b.max_lon = b.max_lon.max(lon);
        b.min_lat = b.min_lat.min(lat);
        b.max_lat = b.max_lat.max(lat);
    }
    b
}

/// Vertex mean of the open ring (the closing coordinate is not counted).
pub fn centroid(polygon: &Polygon) -> Coordinate {
    let ring = polygon.outer();
    if ring.len() < 2 {
        return Coordinate::default();
    }
    let n = ring.len() - 1;
    let (sum_lon, sum_lat) = ring[..n]
        .iter()
        .fold((0.0, 0.0), |(x, y), c| (x + c[0], y + c[1]));
    Coordinate {
        lon: sum_lon / n as f64,
        lat: sum_lat / n as f64,
    }
}

/// Unsigned area in square metres; 0 for rings with fewer than 4 closed coordinates.
pub fn area(polygon: &Polygon) -> f64 {
    let ring = polygon.outer();
    if ring.len() < 4 {
        return 0.0;
    }
    let c = centroid(polygon);
    let m_lat = METRES_PER_DEGREE;
    let m_lon = METRES_PER_DEGREE * c.lat.to_radians().cos();
    let n = ring.len() - 1;
    let mut acc = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (xi, yi) = (ring[i][0] * m_lon, ring[i][1] * m_lat);
        let (xj, yj) = (ring[j][0] * m_lon, ring[j][1] * m_lat);
        acc += xi * yj - xj * yi;
    }
    acc.abs() / 2.0
}
