//! Isochrone intersection and meeting-point search.
//!
//! The heart of this crate is a planar polygon-intersection engine: it folds an
//! arbitrary number of simple (possibly concave) polygons into zero, one, or
//! several disjoint overlap regions. Around it sit small geodesic helpers,
//! planar measures, and a rendezvous orchestrator that talks to routing and
//! venue backends through traits.
//!
//! Conventions
//! - Points are `(lon, lat)` degrees stored as `Vector2<f64>` (x = lon, y = lat)
//!   and treated as flat Cartesian coordinates for all planar operations.
//! - External polygons use the restricted GeoJSON shape in [`geojson::Polygon`]
//!   (one closed outer ring, no holes). Internal algorithms work on open rings.
//! - Geometric degeneracy yields empty results; nonsensical scalar inputs
//!   (NaN, negative radius, ...) yield a [`GeoError`].

pub mod cfg;
pub mod clip;
pub mod error;
pub mod fairness;
pub mod geodesic;
pub mod geojson;
pub mod intersect;
pub mod measure;
pub mod rand;
pub mod rendezvous;
pub mod ring;
pub mod routing;
pub mod venues;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::ClipCfg;
pub use error::{GeoError, RendezvousError, UpstreamError};
pub use geojson::{BBox, Coordinate, Polygon};
pub use ring::Point;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::ClipCfg;
    pub use crate::fairness::{score, FairnessStrategy};
    pub use crate::geodesic::{
        circle_to_polygon, destination_point, DEFAULT_CIRCLE_SEGMENTS, EARTH_RADIUS_M,
    };
    pub use crate::geojson::{BBox, Coordinate, Polygon};
    pub use crate::intersect::{intersect_all, intersect_all_with, intersect_one, intersect_one_with};
    pub use crate::measure::{area, bounding_box, centroid};
    pub use crate::rendezvous::{find_rendezvous, RendezvousOptions, RendezvousSuggestion};
    pub use crate::ring::Point;
    pub use crate::routing::{Isochrone, LatLon, MatrixEntry, RouteMatrix, RoutingEngine, TransportMode};
    pub use crate::venues::{Venue, VenueSearch};
    pub use nalgebra::Vector2;
}
