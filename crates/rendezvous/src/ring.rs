//! Ring primitives: open/closed conversion, winding, cleanup.
//!
//! A ring is stored open (no repeated closing vertex) as `Vec<Point>`. The
//! closed form only exists at the wire boundary, see [`close_ring`] and
//! [`open_ring`].

use nalgebra::Vector2;

use crate::cfg::ClipCfg;

/// Planar point: x = longitude, y = latitude (degrees).
pub type Point = Vector2<f64>;

/// Signed turn at `b` for the path a → b → c (positive = left turn).
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Per-axis closeness.
#[inline]
pub fn approx_eq(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Signed shoelace area of an open ring (positive for CCW), in squared degrees.
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}

/// Strip the closing vertex of a closed coordinate ring.
///
/// Rings with fewer than 4 closed coordinates cannot describe 3 distinct
/// vertices and yield an empty ring. An unclosed input is taken as already open.
pub fn open_ring(coords: &[[f64; 2]]) -> Vec<Point> {
    if coords.len() < 4 {
        return Vec::new();
    }
    let mut pts: Vec<Point> = coords.iter().map(|c| Vector2::new(c[0], c[1])).collect();
    let first = pts[0];
    if pts.last().is_some_and(|l| *l == first) {
        pts.pop();
    }
    pts
}

/// Re-close an open ring by repeating its first vertex.
pub fn close_ring(ring: &[Point]) -> Vec<[f64; 2]> {
    let mut out: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
    if let Some(first) = out.first().copied() {
        out.push(first);
    }
    out
}

/// Drop consecutive duplicates (including last-vs-first) within `eps`.
pub fn dedup_consecutive(ring: &[Point], eps: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(ring.len());
    for &p in ring {
        if out.last().is_some_and(|&l| approx_eq(l, p, eps)) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && approx_eq(out[0], out[out.len() - 1], eps) {
        out.pop();
    }
    out
}

/// Remove vertices where the boundary does not turn: collinear pass-throughs
/// and zero-width spikes. `sin_eps` bounds |sin| of the turn angle.
pub fn drop_collinear(ring: &[Point], sin_eps: f64) -> Vec<Point> {
    let mut pts = ring.to_vec();
    let mut changed = true;
    while changed && pts.len() >= 3 {
        changed = false;
        let mut i = 0;
        while i < pts.len() && pts.len() >= 3 {
            let n = pts.len();
            let a = pts[(i + n - 1) % n];
            let b = pts[i];
            let c = pts[(i + 1) % n];
            let scale = (b - a).norm() * (c - b).norm();
            if scale == 0.0 || cross(a, b, c).abs() <= sin_eps * scale {
                pts.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
    pts
}

/// Cleaned, counter-clockwise open ring, or `None` if fewer than 3 distinct
/// vertices remain.
pub fn canonicalize(ring: &[Point], cfg: &ClipCfg) -> Option<Vec<Point>> {
    let mut pts = dedup_consecutive(ring, cfg.eps_dup);
    if pts.len() < 3 {
        return None;
    }
    if signed_area(&pts) < 0.0 {
        pts.reverse();
    }
    Some(pts)
}
