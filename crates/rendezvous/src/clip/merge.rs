//! Reassemble clip fragments into closed boundary rings.
//!
//! Fragments produced by clipping against the triangles of a concave operand
//! share the triangulation diagonals: one fragment walks a diagonal as `(a, b)`,
//! its neighbour as `(b, a)`. Cancelling those pairs leaves the true boundary,
//! which is then chained into one or more loops.
//!
//! Steps
//! 1. Split every edge at fragment vertices lying on it (T-junctions and the
//!    zero-width bridges a concave subject leaves along a clip edge).
//! 2. Cancel opposite pairs `(a, b)` / `(b, a)` within `eps_merge`, first match
//!    wins, already-paired edges are skipped. O(E²); fine for tens of fragments,
//!    a spatial hash would be the next step for much larger inputs.
//! 3. Chain the survivors start-to-end; loops with ≥ 3 vertices are kept. A
//!    vertex reached twice splits off its own loop, so pieces touching at a
//!    point stay separate. The walk is bounded by the edge count and an
//!    unfinished chain is dropped.

use tracing::trace;

use crate::cfg::ClipCfg;
use crate::geojson::BBox;
use crate::ring::{approx_eq, cross, dedup_consecutive, drop_collinear, Point};

#[derive(Clone, Copy, Debug)]
struct Edge {
    from: Point,
    to: Point,
}

/// Merge fragments into disjoint open rings (possibly none).
pub fn merge(fragments: &[Vec<Point>], cfg: &ClipCfg) -> Vec<Vec<Point>> {
    let eps = cfg.eps_merge;
    let vertices: Vec<Point> = fragments.iter().flatten().copied().collect();

    let mut edges: Vec<Edge> = Vec::new();
    for frag in fragments {
        let n = frag.len();
        if n < 3 {
            continue;
        }
        for i in 0..n {
            split_edge(frag[i], frag[(i + 1) % n], &vertices, eps, &mut edges);
        }
    }

    let boundary = cancel_pairs(&edges, eps);
    chain_loops(&boundary, cfg)
}

fn split_edge(from: Point, to: Point, vertices: &[Point], eps: f64, out: &mut Vec<Edge>) {
    let d = to - from;
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        return;
    }
    let len = len2.sqrt();
    let bounds = BBox {
        min_lon: from.x.min(to.x) - eps,
        min_lat: from.y.min(to.y) - eps,
        max_lon: from.x.max(to.x) + eps,
        max_lat: from.y.max(to.y) + eps,
    };
    let mut cuts: Vec<(f64, Point)> = Vec::new();
    for &v in vertices {
        if v.x < bounds.min_lon || v.x > bounds.max_lon || v.y < bounds.min_lat || v.y > bounds.max_lat {
            continue;
        }
        if approx_eq(v, from, eps) || approx_eq(v, to, eps) {
            continue;
        }
        if (cross(from, to, v) / len).abs() > eps {
            continue;
        }
        let t = (v - from).dot(&d) / len2;
        if t > 0.0 && t < 1.0 {
            cuts.push((t, v));
        }
    }
    if cuts.is_empty() {
        out.push(Edge { from, to });
        return;
    }
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut start = from;
    for (_, p) in cuts {
        if approx_eq(p, start, eps) {
            continue;
        }
        out.push(Edge { from: start, to: p });
        start = p;
    }
    if !approx_eq(start, to, eps) {
        out.push(Edge { from: start, to });
    }
}

fn cancel_pairs(edges: &[Edge], eps: f64) -> Vec<Edge> {
    let mut paired = vec![false; edges.len()];
    for i in 0..edges.len() {
        if paired[i] {
            continue;
        }
        let e = edges[i];
        for j in (i + 1)..edges.len() {
            if paired[j] {
                continue;
            }
            let f = edges[j];
            if approx_eq(e.from, f.to, eps) && approx_eq(e.to, f.from, eps) {
                paired[i] = true;
                paired[j] = true;
                break;
            }
        }
    }
    edges
        .iter()
        .zip(paired)
        .filter(|(_, p)| !p)
        .map(|(e, _)| *e)
        .collect()
}

fn chain_loops(edges: &[Edge], cfg: &ClipCfg) -> Vec<Vec<Point>> {
    let eps = cfg.eps_merge;
    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();
    for s in 0..edges.len() {
        if used[s] {
            continue;
        }
        used[s] = true;
        let start = edges[s].from;
        let mut chain = vec![start, edges[s].to];
        let mut closed = false;
        for _ in 0..edges.len() {
            let end = chain[chain.len() - 1];
            if approx_eq(end, start, eps) {
                closed = true;
                break;
            }
            // A revisited vertex is a pinch point: the edges since its first
            // visit close a separate loop.
            if let Some(k) = (1..chain.len() - 1).find(|&k| approx_eq(chain[k], end, eps)) {
                push_loop(&chain[k..chain.len() - 1], cfg, &mut loops);
                chain.truncate(k + 1);
            }
            let end = chain[chain.len() - 1];
            let found = (0..edges.len()).find(|&k| !used[k] && approx_eq(edges[k].from, end, eps));
            match found {
                Some(k) => {
                    used[k] = true;
                    chain.push(edges[k].to);
                }
                None => break,
            }
        }
        if !closed {
            trace!(len = chain.len(), "dropping open chain");
            continue;
        }
        chain.pop();
        push_loop(&chain, cfg, &mut loops);
    }
    loops
}

fn push_loop(chain: &[Point], cfg: &ClipCfg, loops: &mut Vec<Vec<Point>>) {
    let ring = drop_collinear(&dedup_consecutive(chain, cfg.eps_dup), cfg.eps_merge);
    if ring.len() >= 3 {
        loops.push(ring);
    }
}
