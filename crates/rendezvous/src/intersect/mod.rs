//! N-ary polygon intersection.
//!
//! Purpose
//! - Fold a list of isochrone polygons into every disjoint region reachable by
//!   all of them (`intersect_all`), or just the largest one (`intersect_one`).
//!
//! Strategy per (region R, next polygon P), both canonicalised to CCW:
//! - bounding boxes disjoint: nothing;
//! - P convex: clip R by P;
//! - R convex: clip P by R (the convex operand must be the window);
//! - both concave: triangulate P, clip R by every triangle, merge the pieces.
//!
//! Concave subjects are always passed through the merger so that zero-width
//! bridges never reach the caller and every component becomes its own region.
//!
//! Degenerate or non-overlapping input gives an empty result, never an error.

use tracing::debug;

use crate::cfg::ClipCfg;
use crate::clip::{is_convex, merge, sutherland_hodgman, triangulate};
use crate::geojson::{BBox, Polygon};
use crate::measure;
use crate::ring::{canonicalize, drop_collinear, open_ring, signed_area, Point};

/// Every disjoint intersection region of `polygons`, with default tolerances.
pub fn intersect_all(polygons: &[Polygon]) -> Vec<Polygon> {
    intersect_all_with(polygons, ClipCfg::default())
}

/// The largest intersection region by planar area, if any.
///
/// Ties keep the first region encountered in fold order (implementation-defined).
pub fn intersect_one(polygons: &[Polygon]) -> Option<Polygon> {
    intersect_one_with(polygons, ClipCfg::default())
}

/// [`intersect_one`] with explicit tolerances.
pub fn intersect_one_with(polygons: &[Polygon], cfg: ClipCfg) -> Option<Polygon> {
    let mut best: Option<(f64, Polygon)> = None;
    for region in intersect_all_with(polygons, cfg) {
        let a = measure::area(&region);
        match &best {
            Some((best_area, _)) if a <= *best_area => {}
            _ => best = Some((a, region)),
        }
    }
    best.map(|(_, p)| p)
}

/// [`intersect_all`] with explicit tolerances.
pub fn intersect_all_with(polygons: &[Polygon], cfg: ClipCfg) -> Vec<Polygon> {
    let Some((first, rest)) = polygons.split_first() else {
        return Vec::new();
    };
    let Some(first) = canonical_ring(first, &cfg) else {
        return Vec::new();
    };
    if rest.is_empty() {
        return vec![Polygon::from_open_ring(&first)];
    }

    let mut regions: Vec<Vec<Point>> = vec![first];
    for (k, polygon) in rest.iter().enumerate() {
        let Some(clip) = canonical_ring(polygon, &cfg) else {
            debug!(index = k + 1, "degenerate input polygon; intersection is empty");
            return Vec::new();
        };
        let clip_box = ring_bbox(&clip);
        let clip_convex = is_convex(&clip);
        let mut next: Vec<Vec<Point>> = Vec::new();
        for region in &regions {
            if !ring_bbox(region).overlaps(&clip_box) {
                continue;
            }
            next.extend(clip_pair(region, &clip, clip_convex, &cfg));
        }
        if next.is_empty() {
            debug!(index = k + 1, "no overlap left; short-circuiting");
            return Vec::new();
        }
        regions = next;
    }

    regions
        .into_iter()
        .filter_map(|r| finish_ring(&r, &cfg))
        .map(|r| Polygon::from_open_ring(&r))
        .collect()
}

/// Intersect one region with one CCW polygon; 0, 1, or many CCW results.
fn clip_pair(region: &[Point], clip: &[Point], clip_convex: bool, cfg: &ClipCfg) -> Vec<Vec<Point>> {
    let region_convex = is_convex(region);
    if clip_convex {
        resolve(sutherland_hodgman(region, clip, cfg), region_convex, cfg)
    } else if region_convex {
        resolve(sutherland_hodgman(clip, region, cfg), false, cfg)
    } else {
        let region_box = ring_bbox(region);
        let mut pieces = Vec::new();
        for tri in triangulate(clip) {
            if signed_area(&tri) <= cfg.eps_parallel {
                continue;
            }
            if !ring_bbox(&tri).overlaps(&region_box) {
                continue;
            }
            let piece = sutherland_hodgman(region, &tri, cfg);
            if piece.len() >= 3 {
                pieces.push(piece);
            }
        }
        merge(&pieces, cfg)
    }
}

/// A convex subject clipped by a convex window is already a clean ring;
/// anything else may carry bridges and goes through the merger.
fn resolve(ring: Vec<Point>, subject_convex: bool, cfg: &ClipCfg) -> Vec<Vec<Point>> {
    if ring.len() < 3 {
        Vec::new()
    } else if subject_convex {
        vec![ring]
    } else {
        merge(&[ring], cfg)
    }
}

fn canonical_ring(polygon: &Polygon, cfg: &ClipCfg) -> Option<Vec<Point>> {
    canonicalize(&open_ring(polygon.outer()), cfg)
}

fn finish_ring(ring: &[Point], cfg: &ClipCfg) -> Option<Vec<Point>> {
    let cleaned = drop_collinear(&canonicalize(ring, cfg)?, cfg.eps_merge);
    // Dropping a spike can leave its neighbours adjacent and coincident.
    canonicalize(&cleaned, cfg)
}

fn ring_bbox(ring: &[Point]) -> BBox {
    BBox::of_points(ring).unwrap_or_default()
}

#[cfg(test)]
mod tests;
