//! Pairwise polygon clipping on open rings.
//!
//! Purpose
//! - `is_convex` picks the cheap path.
//! - `sutherland_hodgman` clips any subject against a convex, counter-clockwise
//!   clip window.
//! - `triangulate` and `merge` handle concave clip operands: clip against each
//!   ear triangle, then stitch the fragments back together.
//!
//! Conventions
//! - Clip windows must be CCW. "Inside" is left of (or on) each directed edge.
//! - A concave subject clipped by a convex window can come back as one ring
//!   whose pieces are joined by zero-width bridges along the window edges;
//!   `merge` splits such rings into their true components.

mod merge;
mod triangulate;

pub use merge::merge;
pub use triangulate::triangulate;

use nalgebra::Vector2;

use crate::cfg::ClipCfg;
use crate::ring::{cross, dedup_consecutive, Point};

/// True iff every turn along the ring has the same sign (collinear turns are
/// compatible with either).
pub fn is_convex(ring: &[Point]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut pos = false;
    let mut neg = false;
    for i in 0..n {
        let t = cross(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        if t > 0.0 {
            pos = true;
        } else if t < 0.0 {
            neg = true;
        }
        if pos && neg {
            return false;
        }
    }
    true
}

/// Clip `subject` against the convex CCW ring `clip` (Sutherland–Hodgman).
///
/// Returns the open result ring with consecutive duplicates removed; empty
/// when nothing survives. O(|subject| · |clip|).
pub fn sutherland_hodgman(subject: &[Point], clip: &[Point], cfg: &ClipCfg) -> Vec<Point> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }
    let mut output: Vec<Point> = subject.to_vec();
    let m = clip.len();
    for i in 0..m {
        if output.is_empty() {
            return Vec::new();
        }
        let edge_start = clip[i];
        let edge_end = clip[(i + 1) % m];
        let input = std::mem::take(&mut output);
        let k = input.len();
        for j in 0..k {
            let current = input[j];
            let previous = input[(j + k - 1) % k];
            let curr_inside = cross(edge_start, edge_end, current) >= 0.0;
            let prev_inside = cross(edge_start, edge_end, previous) >= 0.0;
            if curr_inside {
                if !prev_inside {
                    if let Some(p) = line_intersection(previous, current, edge_start, edge_end, cfg.eps_parallel) {
                        output.push(p);
                    }
                }
                output.push(current);
            } else if prev_inside {
                if let Some(p) = line_intersection(previous, current, edge_start, edge_end, cfg.eps_parallel) {
                    output.push(p);
                }
            }
        }
    }
    let out = dedup_consecutive(&output, cfg.eps_dup);
    if out.len() < 3 {
        return Vec::new();
    }
    out
}

/// Intersection of the line through `a1,a2` with the line through `b1,b2`.
///
/// `None` when |denominator| < `eps` (parallel or nearly so).
pub(crate) fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point, eps: f64) -> Option<Point> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < eps {
        return None;
    }
    let w = b1 - a1;
    let t = (w.x * d2.y - w.y * d2.x) / denom;
    Some(Vector2::new(a1.x + t * d1.x, a1.y + t * d1.y))
}
