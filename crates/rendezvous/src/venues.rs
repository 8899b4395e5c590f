//! Venue search seam and the OpenStreetMap/Overpass tag vocabulary.
//!
//! The HTTP call itself belongs to the adapter implementing [`VenueSearch`];
//! this module only builds the query and interprets its answer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;
use crate::geojson::{BBox, Polygon};

/// A candidate meeting place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub venue_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<String>,
}

/// A venue backend. `area` is the polygon to search; backends may use only its extent.
pub trait VenueSearch {
    fn search(&self, area: &Polygon, venue_types: &[String]) -> Result<Vec<Venue>, UpstreamError>;
}

/// Venue type to OSM `key=value` tag.
pub const VENUE_TAG_MAP: &[(&str, (&str, &str))] = &[
    ("park", ("leisure", "park")),
    ("cafe", ("amenity", "cafe")),
    ("restaurant", ("amenity", "restaurant")),
    ("service_station", ("amenity", "fuel")),
    ("library", ("amenity", "library")),
    ("pub", ("amenity", "pub")),
    ("playground", ("leisure", "playground")),
    ("community_centre", ("amenity", "community_centre")),
    ("bar", ("amenity", "bar")),
    ("fast_food", ("amenity", "fast_food")),
    ("garden", ("leisure", "garden")),
    ("theatre", ("amenity", "theatre")),
    ("arts_centre", ("amenity", "arts_centre")),
    ("fitness_centre", ("leisure", "fitness_centre")),
    ("sports_centre", ("leisure", "sports_centre")),
    ("escape_game", ("leisure", "escape_game")),
    ("swimming_pool", ("leisure", "swimming_pool")),
];

fn known_tag(venue_type: &str) -> Option<(&'static str, &'static str)> {
    VENUE_TAG_MAP
        .iter()
        .find(|(t, _)| *t == venue_type)
        .map(|(_, tag)| *tag)
}

/// Overpass QL for named nodes of the requested types inside `bbox`.
///
/// Unknown types are queried as `amenity=<type>`.
pub fn overpass_query(bbox: &BBox, venue_types: &[String]) -> String {
    let area = format!(
        "{},{},{},{}",
        bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    );
    let clauses: Vec<String> = venue_types
        .iter()
        .map(|vt| {
            let (key, value) = match known_tag(vt) {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => ("amenity".to_string(), vt.clone()),
            };
            format!("node[\"{key}\"=\"{value}\"][\"name\"]({area});")
        })
        .collect();
    format!("[out:json][timeout:25];(\n{}\n);out body;", clauses.join("\n"))
}

/// First requested type whose tag the element carries; else the first
/// requested type; else `"unknown"`.
pub fn infer_venue_type(tags: &BTreeMap<String, String>, requested: &[String]) -> String {
    for vt in requested {
        if let Some((key, value)) = known_tag(vt) {
            if tags.get(key).map(String::as_str) == Some(value) {
                return vt.clone();
            }
        }
    }
    requested.first().cloned().unwrap_or_else(|| "unknown".to_string())
}

/// Top-level Overpass JSON answer.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassResponse {
    /// Named elements as venues, typed against `requested`.
    pub fn into_venues(self, requested: &[String]) -> Vec<Venue> {
        self.elements
            .into_iter()
            .filter_map(|el| {
                let name = el.tags.get("name").filter(|n| !n.is_empty())?.clone();
                Some(Venue {
                    venue_type: infer_venue_type(&el.tags, requested),
                    name,
                    lat: el.lat,
                    lon: el.lon,
                    osm_id: Some(format!("{}/{}", el.kind, el.id)),
                })
            })
            .collect()
    }
}
