//! Routing backend seam: travel-time isochrones and route matrices.
//!
//! Concrete HTTP adapters (Valhalla, OpenRouteService, GraphHopper, OSRM) live
//! outside this crate. They implement [`RoutingEngine`] and map their failures
//! into [`UpstreamError`].

use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;
use crate::geojson::Polygon;
use crate::ring::Point;

/// Travel mode requested from the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Drive,
    Cycle,
    Walk,
    PublicTransit,
}

/// A labelled position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, label: None }
    }

    pub fn labelled(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            label: Some(label.into()),
        }
    }

    /// `(lon, lat)` as a planar point.
    pub fn to_point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// Area reachable from `origin` within `time_minutes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Isochrone {
    pub origin: LatLon,
    pub mode: TransportMode,
    pub time_minutes: f64,
    pub polygon: Polygon,
}

/// One origin/destination cell. A negative duration marks an unreachable pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixEntry {
    pub origin_index: usize,
    pub destination_index: usize,
    pub duration_minutes: f64,
    pub distance_km: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMatrix {
    pub origins: Vec<LatLon>,
    pub destinations: Vec<LatLon>,
    pub entries: Vec<MatrixEntry>,
}

impl RouteMatrix {
    /// Duration for `(origin, destination)`; `None` if the backend left the cell out.
    pub fn duration(&self, origin: usize, destination: usize) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.origin_index == origin && e.destination_index == destination)
            .map(|e| e.duration_minutes)
    }
}

/// A routing backend.
pub trait RoutingEngine {
    /// Human-readable backend name, used in error messages.
    fn name(&self) -> &str;

    fn compute_isochrone(
        &self,
        origin: &LatLon,
        mode: TransportMode,
        time_minutes: f64,
    ) -> Result<Isochrone, UpstreamError>;

    fn compute_route_matrix(
        &self,
        origins: &[LatLon],
        destinations: &[LatLon],
        mode: TransportMode,
    ) -> Result<RouteMatrix, UpstreamError>;
}
