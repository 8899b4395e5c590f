//! Restricted GeoJSON wire types.
//!
//! A [`Polygon`] is exactly `{"type": "Polygon", "coordinates": [[[lon, lat], ...]]}`
//! with a single closed outer ring. Any other `type` tag fails to deserialize.
//! Only the first ring is ever read; extra rings (holes) are ignored.

use serde::{Deserialize, Serialize};

use crate::ring::Point;

/// The only geometry tag accepted on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Polygon,
}

/// GeoJSON polygon with one outer ring of `[lon, lat]` pairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Wrap a single ring of coordinates as given (no closing, no checks).
    pub fn new(ring: Vec<[f64; 2]>) -> Self {
        Self {
            kind: GeometryKind::Polygon,
            coordinates: vec![ring],
        }
    }

    /// Build a closed polygon from an open ring of points.
    pub fn from_open_ring(ring: &[Point]) -> Self {
        Self::new(crate::ring::close_ring(ring))
    }

    /// The outer ring (closed form), or an empty slice if there is none.
    pub fn outer(&self) -> &[[f64; 2]] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Axis-aligned rectangle spanning `bbox`, counter-clockwise from its
    /// south-west corner.
    pub fn from_bbox(bbox: &BBox) -> Self {
        Self::new(vec![
            [bbox.min_lon, bbox.min_lat],
            [bbox.max_lon, bbox.min_lat],
            [bbox.max_lon, bbox.max_lat],
            [bbox.min_lon, bbox.max_lat],
            [bbox.min_lon, bbox.min_lat],
        ])
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    /// Bounding box of a point set; `None` when empty.
    pub fn of_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = BBox {
            min_lon: first.x,
            min_lat: first.y,
            max_lon: first.x,
            max_lat: first.y,
        };
        for p in it {
            b.min_lon = b.min_lon.min(p.x);
            b.max_lon = b.max_lon.max(p.x);
            b.min_lat = b.min_lat.min(p.y);
            b.max_lat = b.max_lat.max(p.y);
        }
        Some(b)
    }

    /// Closed-interval overlap test (touching boxes overlap).
    #[inline]
    pub fn overlaps(&self, other: &BBox) -> bool {
        self.min_lon <= other.max_lon
            && self.max_lon >= other.min_lon
            && self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
    }

    /// Smallest box containing both.
    #[inline]
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }
}

/// A geographic position as returned by [`crate::measure::centroid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}
