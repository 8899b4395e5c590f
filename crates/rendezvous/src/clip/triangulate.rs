//! Ear-clipping triangulation over an index-linked ring.
//!
//! Vertices are removed by relinking `prev`/`next` indices rather than shifting
//! a vector. The scan is capped at N² steps; on numerically degenerate input
//! the triangles found so far plus one residual triangle are returned.

use tracing::debug;

use crate::ring::{cross, signed_area, Point};

/// Split a simple ring of N vertices into (at most) N − 2 triangles, each
/// wound counter-clockwise regardless of the input winding.
pub fn triangulate(ring: &[Point]) -> Vec<[Point; 3]> {
    let n = ring.len();
    if n < 3 {
        return Vec::new();
    }
    let sign = if signed_area(ring) >= 0.0 { 1.0 } else { -1.0 };
    let ccw = |a: Point, b: Point, c: Point| -> [Point; 3] {
        if sign > 0.0 {
            [a, b, c]
        } else {
            [a, c, b]
        }
    };

    let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
    let mut remaining = n;
    let mut cur = 0usize;
    let mut out = Vec::with_capacity(n - 2);
    let cap = n * n;
    let mut steps = 0usize;
    // Steps since the last ear was cut; a full lap without an ear means stuck.
    let mut since_cut = 0usize;

    while remaining > 3 {
        if steps >= cap || since_cut > remaining {
            debug!(
                vertices = n,
                remaining, "ear clipping stopped early; emitting residual triangle"
            );
            break;
        }
        steps += 1;
        let a = prev[cur];
        let c = next[cur];
        if is_ear(ring, &next, a, cur, c, sign) {
            out.push(ccw(ring[a], ring[cur], ring[c]));
            next[a] = c;
            prev[c] = a;
            remaining -= 1;
            since_cut = 0;
            cur = c;
        } else {
            since_cut += 1;
            cur = next[cur];
        }
    }

    let a = prev[cur];
    let c = next[cur];
    out.push(ccw(ring[a], ring[cur], ring[c]));
    out
}

/// `b` is an ear if it turns with the ring's orientation and no other live
/// vertex lies in (or on) triangle a-b-c.
fn is_ear(ring: &[Point], next: &[usize], a: usize, b: usize, c: usize, sign: f64) -> bool {
    let (pa, pb, pc) = (ring[a], ring[b], ring[c]);
    if cross(pa, pb, pc) * sign <= 0.0 {
        return false;
    }
    let mut k = next[c];
    while k != a {
        let p = ring[k];
        if p != pa && p != pb && p != pc && point_in_triangle(p, pa, pb, pc) {
            return false;
        }
        k = next[k];
    }
    true
}

/// Closed triangle membership via consistent-sign cross products (either winding).
pub(crate) fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
