//! Tolerances used by the clipping pipeline.
//!
//! - `eps_parallel`: clip-line pairs with |denominator| below this are treated as
//!   parallel (no intersection point), and ears/triangles with doubled area below
//!   it are treated as degenerate.
//! - `eps_merge`: coordinate tolerance for matching fragment vertices and edges
//!   in the piece merger, and the sine threshold for dropping collinear vertices.
//! - `eps_dup`: consecutive vertices closer than this (per axis) are duplicates.

/// Clipping configuration (tolerances, in degrees unless noted).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipCfg {
    pub eps_parallel: f64,
    pub eps_merge: f64,
    pub eps_dup: f64,
}

impl Default for ClipCfg {
    fn default() -> Self {
        Self {
            eps_parallel: 1e-12,
            eps_merge: 1e-9,
            eps_dup: 1e-10,
        }
    }
}

/// Tolerance within which an output ring's last vertex must equal its first.
pub const CLOSE_EPS: f64 = 1e-8;
