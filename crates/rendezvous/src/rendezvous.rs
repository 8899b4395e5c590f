//! Meeting-point search for N travellers.
//!
//! Pipeline
//! 1. One isochrone per participant (same mode and time budget).
//! 2. [`intersect_all`] over the isochrones; no overlap means no suggestions.
//! 3. Venue search over the overlap. With several disjoint regions the search
//!    area is the rectangle spanning all of them.
//! 4. With no venues, a single synthetic "Meeting point" at the area-weighted
//!    centroid of the regions is proposed instead.
//! 5. Route matrix participants × venues; venues someone cannot reach, or
//!    cannot reach within the budget, are dropped.
//! 6. Rank by fairness score (ascending, stable) and keep `limit`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RendezvousError;
use crate::fairness::{score, FairnessStrategy};
use crate::geojson::{Coordinate, Polygon};
use crate::intersect::intersect_all;
use crate::measure::{area, bounding_box, centroid};
use crate::routing::{LatLon, RoutingEngine, TransportMode};
use crate::venues::{Venue, VenueSearch};

fn default_limit() -> usize {
    5
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendezvousOptions {
    pub participants: Vec<LatLon>,
    pub mode: TransportMode,
    pub max_time_minutes: f64,
    pub venue_types: Vec<String>,
    #[serde(default)]
    pub fairness: FairnessStrategy,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// A ranked venue with each participant's travel time (minutes, 0.1 precision).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendezvousSuggestion {
    pub venue: Venue,
    pub travel_times: BTreeMap<String, f64>,
    pub fairness_score: f64,
}

/// Rank meeting places reachable by every participant.
///
/// Venues that any participant cannot reach, or reaches over budget, are left
/// out of the result rather than ranked last with an infinite score.
pub fn find_rendezvous<E, V>(
    engine: &E,
    venue_search: &V,
    options: &RendezvousOptions,
) -> Result<Vec<RendezvousSuggestion>, RendezvousError>
where
    E: RoutingEngine + ?Sized,
    V: VenueSearch + ?Sized,
{
    let participants = &options.participants;
    if participants.len() < 2 {
        return Err(RendezvousError::TooFewParticipants(participants.len()));
    }
    let budget = options.max_time_minutes;
    if !budget.is_finite() || budget <= 0.0 {
        return Err(RendezvousError::InvalidBudget(budget));
    }

    let mut isochrones = Vec::with_capacity(participants.len());
    for p in participants {
        isochrones.push(engine.compute_isochrone(p, options.mode, budget)?.polygon);
    }
    let regions = intersect_all(&isochrones);
    debug!(engine = engine.name(), regions = regions.len(), "isochrones intersected");
    if regions.is_empty() {
        return Ok(Vec::new());
    }

    let mut venues = venue_search.search(&search_area(&regions), &options.venue_types)?;
    if venues.is_empty() {
        let c = weighted_centroid(&regions);
        debug!(lat = c.lat, lon = c.lon, "no venues; falling back to centroid");
        venues.push(Venue {
            name: "Meeting point".to_string(),
            lat: c.lat,
            lon: c.lon,
            venue_type: "centroid".to_string(),
            osm_id: None,
        });
    }

    let destinations: Vec<LatLon> = venues.iter().map(|v| LatLon::new(v.lat, v.lon)).collect();
    let matrix = engine.compute_route_matrix(participants, &destinations, options.mode)?;

    let mut suggestions = Vec::with_capacity(venues.len());
    for (vi, venue) in venues.into_iter().enumerate() {
        let times: Vec<f64> = (0..participants.len())
            .map(|pi| matrix.duration(pi, vi).unwrap_or(f64::INFINITY))
            .collect();
        if times.iter().any(|&t| t < 0.0 || t > budget) {
            debug!(venue = %venue.name, "venue unreachable within budget");
            continue;
        }
        let travel_times = participants
            .iter()
            .zip(&times)
            .enumerate()
            .map(|(pi, (p, &t))| {
                let key = p.label.clone().unwrap_or_else(|| format!("participant_{pi}"));
                (key, (t * 10.0).round() / 10.0)
            })
            .collect();
        suggestions.push(RendezvousSuggestion {
            venue,
            travel_times,
            fairness_score: score(&times, options.fairness),
        });
    }

    suggestions.sort_by(|a, b| a.fairness_score.total_cmp(&b.fairness_score));
    suggestions.truncate(options.limit);
    Ok(suggestions)
}

/// The single region itself, or the rectangle spanning all regions.
fn search_area(regions: &[Polygon]) -> Polygon {
    match regions {
        [only] => only.clone(),
        _ => {
            let bbox = regions
                .iter()
                .map(bounding_box)
                .reduce(|a, b| a.union(&b))
                .unwrap_or_default();
            Polygon::from_bbox(&bbox)
        }
    }
}

/// Mean of region centroids weighted by region area.
fn weighted_centroid(regions: &[Polygon]) -> Coordinate {
    let mut total = 0.0;
    let (mut lat, mut lon) = (0.0, 0.0);
    for r in regions {
        let w = area(r);
        let c = centroid(r);
        total += w;
        lat += w * c.lat;
        lon += w * c.lon;
    }
    if total > 0.0 {
        Coordinate {
            lat: lat / total,
            lon: lon / total,
        }
    } else {
        regions.first().map(centroid).unwrap_or_default()
    }
}
