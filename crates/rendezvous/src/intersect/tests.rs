use super::*;
use crate::cfg::CLOSE_EPS;
use crate::measure::{area, centroid};
use crate::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
use nalgebra::vector;
use proptest::prelude::*;

fn poly(coords: &[[f64; 2]]) -> Polygon {
    let mut ring = coords.to_vec();
    ring.push(coords[0]);
    Polygon::new(ring)
}

fn square(x0: f64, y0: f64, side: f64) -> Polygon {
    poly(&[[x0, y0], [x0 + side, y0], [x0 + side, y0 + side], [x0, y0 + side]])
}

/// Shoelace area in squared degrees, for checks against hand-computed values.
fn deg_area(p: &Polygon) -> f64 {
    signed_area(&open_ring(p.outer())).abs()
}

fn total_deg_area(ps: &[Polygon]) -> f64 {
    ps.iter().map(deg_area).sum()
}

/// Opens to the right: bottom arm [0,10]x[0,7], spine [0,3], top arm [0,10]x[10,14].
fn c_right() -> Polygon {
    poly(&[
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 7.0],
        [3.0, 7.0],
        [3.0, 10.0],
        [10.0, 10.0],
        [10.0, 14.0],
        [0.0, 14.0],
    ])
}

/// Opens to the left: bottom arm [4,14]x[0,8], spine [11,14], top arm [4,14]x[12,16].
fn c_left() -> Polygon {
    poly(&[
        [4.0, 0.0],
        [14.0, 0.0],
        [14.0, 16.0],
        [4.0, 16.0],
        [4.0, 12.0],
        [11.0, 12.0],
        [11.0, 8.0],
        [4.0, 8.0],
    ])
}

fn assert_ring_invariants(p: &Polygon) {
    let ring = p.outer();
    assert!(ring.len() >= 4, "ring too short: {ring:?}");
    let (first, last) = (ring[0], ring[ring.len() - 1]);
    assert!((first[0] - last[0]).abs() <= CLOSE_EPS && (first[1] - last[1]).abs() <= CLOSE_EPS);
    for w in ring.windows(2) {
        let d = ((w[0][0] - w[1][0]).abs()).max((w[0][1] - w[1][1]).abs());
        assert!(d > 1e-10, "duplicate consecutive vertex in {ring:?}");
    }
}

#[test]
fn empty_input_gives_nothing() {
    assert!(intersect_all(&[]).is_empty());
    assert!(intersect_one(&[]).is_none());
}

#[test]
fn single_input_is_identity() {
    let a = square(0.0, 0.0, 10.0);
    assert_eq!(intersect_one(&[a.clone()]), Some(a.clone()));
    assert_eq!(intersect_all(&[a.clone()]), vec![a]);
}

#[test]
fn two_squares() {
    let out = intersect_all(&[square(0.0, 0.0, 10.0), square(5.0, 5.0, 10.0)]);
    assert_eq!(out.len(), 1);
    let c = centroid(&out[0]);
    assert!((c.lon - 7.5).abs() < 1e-9 && (c.lat - 7.5).abs() < 1e-9);
    assert!((deg_area(&out[0]) - 25.0).abs() < 1e-9);
    assert_ring_invariants(&out[0]);
}

#[test]
fn three_squares() {
    let out = intersect_all(&[
        square(0.0, 0.0, 10.0),
        square(5.0, 5.0, 10.0),
        square(3.0, 3.0, 5.0),
    ]);
    assert_eq!(out.len(), 1);
    let c = centroid(&out[0]);
    assert!((c.lon - 6.5).abs() < 1e-9 && (c.lat - 6.5).abs() < 1e-9);
    assert!((deg_area(&out[0]) - 9.0).abs() < 1e-9);
}

#[test]
fn disjoint_bboxes_give_nothing() {
    let far = square(100.0, 100.0, 10.0);
    assert!(intersect_all(&[square(0.0, 0.0, 10.0), far.clone()]).is_empty());
    assert!(intersect_one(&[square(0.0, 0.0, 10.0), far]).is_none());
}

#[test]
fn short_circuits_on_empty_intermediate() {
    // The third polygon would overlap the first, but the first two are disjoint.
    let out = intersect_all(&[
        square(0.0, 0.0, 1.0),
        square(5.0, 5.0, 1.0),
        square(0.0, 0.0, 10.0),
    ]);
    assert!(out.is_empty());
}

#[test]
fn degenerate_ring_gives_nothing() {
    let line = Polygon::new(vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
    assert!(intersect_all(&[square(0.0, 0.0, 10.0), line.clone()]).is_empty());
    assert!(intersect_all(&[line, square(0.0, 0.0, 10.0)]).is_empty());
}

#[test]
fn self_intersection_keeps_area() {
    for p in [square(0.0, 0.0, 10.0), c_right(), c_left()] {
        let out = intersect_one(&[p.clone(), p.clone()]).unwrap();
        assert!((area(&out) - area(&p)).abs() / area(&p) < 1e-9);
    }
}

#[test]
fn containment_gives_inner_polygon() {
    let outer = c_right();
    let inner = square(0.5, 0.5, 2.0);
    let out = intersect_one(&[outer.clone(), inner.clone()]).unwrap();
    assert!((deg_area(&out) - 4.0).abs() < 1e-9);
    let swapped = intersect_one(&[inner, outer]).unwrap();
    assert!((deg_area(&swapped) - 4.0).abs() < 1e-9);
}

#[test]
fn two_c_shapes_overlap_in_two_rectangles() {
    let out = intersect_all(&[c_right(), c_left()]);
    assert_eq!(out.len(), 2);
    let mut areas: Vec<f64> = out.iter().map(deg_area).collect();
    areas.sort_by(f64::total_cmp);
    assert!((areas[0] - 12.0).abs() < 1e-9, "{areas:?}");
    assert!((areas[1] - 42.0).abs() < 1e-9, "{areas:?}");
    for p in &out {
        assert_ring_invariants(p);
    }
    let best = intersect_one(&[c_right(), c_left()]).unwrap();
    assert!((deg_area(&best) - 42.0).abs() < 1e-9);
}

#[test]
fn c_shapes_are_order_independent() {
    let ab = intersect_all(&[c_right(), c_left()]);
    let ba = intersect_all(&[c_left(), c_right()]);
    assert_eq!(ab.len(), ba.len());
    assert!((total_deg_area(&ab) - total_deg_area(&ba)).abs() < 1e-9);
}

#[test]
fn convex_window_over_concave_region_splits_components() {
    // A convex strip crossing both arms of a C yields two regions, not one bridged ring.
    let strip = poly(&[[5.0, -1.0], [8.0, -1.0], [8.0, 15.0], [5.0, 15.0]]);
    let out = intersect_all(&[c_right(), strip.clone()]);
    assert_eq!(out.len(), 2);
    assert!((total_deg_area(&out) - (3.0 * 7.0 + 3.0 * 4.0)).abs() < 1e-9);
    // Same with the roles swapped (convex region, concave polygon).
    let swapped = intersect_all(&[strip, c_right()]);
    assert_eq!(swapped.len(), 2);
    assert!((total_deg_area(&swapped) - 33.0).abs() < 1e-9);
}

#[test]
fn multi_region_then_convex_fold() {
    // Cutting the two-rectangle result with a big box keeps both regions.
    let big = square(-50.0, -50.0, 100.0);
    let out = intersect_all(&[c_right(), c_left(), big]);
    assert_eq!(out.len(), 2);
    assert!((total_deg_area(&out) - 54.0).abs() < 1e-9);
}

#[test]
fn clockwise_input_matches_counter_clockwise() {
    let ccw = square(0.0, 0.0, 1.0);
    let mut cw_ring = ccw.outer().to_vec();
    cw_ring.reverse();
    let cw = Polygon::new(cw_ring);
    let q = poly(&[[0.5, -1.0], [2.0, 0.5], [0.5, 2.0], [0.2, 0.5]]);
    let a_ccw = area(&intersect_one(&[ccw, q.clone()]).unwrap());
    let a_cw = area(&intersect_one(&[cw, q]).unwrap());
    assert!((a_ccw - a_cw).abs() / a_ccw < 1e-12);
}

#[test]
fn shared_edges_and_collinear_vertices() {
    // Squares sharing their whole left edge, one with a redundant collinear vertex.
    let a = poly(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 1.0]]);
    let b = square(0.0, 0.0, 1.0);
    let out = intersect_all(&[a, b]);
    assert_eq!(out.len(), 1);
    assert!((deg_area(&out[0]) - 1.0).abs() < 1e-12);
}

#[test]
fn touching_polygons_have_no_area() {
    let out = intersect_all(&[square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)]);
    assert!(total_deg_area(&out) < 1e-12);
}

/// Comb with three teeth hanging from y = 2.
fn comb_down() -> Polygon {
    poly(&[
        [1.0, 2.0],
        [7.0, 2.0],
        [7.0, 10.0],
        [5.0, 10.0],
        [5.0, 3.0],
        [4.0, 3.0],
        [4.0, 5.0],
        [3.0, 5.0],
        [3.0, 3.0],
        [2.0, 3.0],
        [2.0, 6.0],
        [1.0, 6.0],
    ])
}

/// Comb with fingers pointing right from the spine x in [1, 3].
fn comb_right() -> Polygon {
    poly(&[
        [1.0, 0.0],
        [1.0, 15.0],
        [6.0, 15.0],
        [6.0, 14.0],
        [3.0, 14.0],
        [3.0, 13.0],
        [6.0, 13.0],
        [6.0, 11.0],
        [3.0, 11.0],
        [3.0, 9.0],
        [5.0, 9.0],
        [5.0, 7.0],
        [3.0, 7.0],
        [3.0, 5.0],
        [6.0, 5.0],
        [6.0, 3.0],
        [3.0, 3.0],
        [3.0, 1.0],
        [10.0, 1.0],
        [10.0, 0.0],
    ])
}

#[test]
fn regions_touching_at_a_vertex_stay_separate() {
    // The overlap has pieces meeting only at (3, 3); none may be chained through it.
    let out = intersect_all(&[comb_down(), comb_right()]);
    assert_eq!(out.len(), 3);
    for p in &out {
        assert_ring_invariants(p);
        let ring = open_ring(p.outer());
        for (i, a) in ring.iter().enumerate() {
            for b in &ring[i + 1..] {
                assert!((a - b).norm() > 1e-9, "ring revisits vertex {a:?}: {ring:?}");
            }
        }
    }
    // An L of area 5 plus two 1x2 teeth.
    assert!((total_deg_area(&out) - 9.0).abs() < 1e-9);
    let best = intersect_one(&[comb_down(), comb_right()]).unwrap();
    let largest = out.iter().map(deg_area).fold(0.0, f64::max);
    assert!((deg_area(&best) - largest).abs() < 1e-9);
    assert!((largest - 5.0).abs() < 1e-9);
}

#[test]
fn outputs_are_counter_clockwise() {
    for p in intersect_all(&[c_right(), c_left()]) {
        assert!(signed_area(&open_ring(p.outer())) > 0.0);
    }
}

fn star(seed: u64, index: u64, centre: Point) -> Polygon {
    let cfg = StarCfg {
        vertex_count: VertexCount::Uniform { min: 5, max: 24 },
        angle_jitter_frac: 0.3,
        radial_jitter: 0.45,
        base_radius: 1.0,
    };
    draw_star_polygon(cfg, ReplayToken { seed, index }, centre)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_pairs_are_order_independent(seed in 0u64..10_000, dx in -0.8f64..0.8, dy in -0.8f64..0.8) {
        let a = star(seed, 0, vector![0.0, 0.0]);
        let b = star(seed, 1, vector![dx, dy]);
        let ab = total_deg_area(&intersect_all(&[a.clone(), b.clone()]));
        let ba = total_deg_area(&intersect_all(&[b, a]));
        prop_assert!((ab - ba).abs() <= 1e-7 * ab.max(1.0), "ab={} ba={}", ab, ba);
    }

    #[test]
    fn random_self_intersection_is_identity(seed in 0u64..10_000) {
        let a = star(seed, 0, vector![12.0, 48.0]);
        let out = intersect_all(&[a.clone(), a.clone()]);
        prop_assert!((total_deg_area(&out) - deg_area(&a)).abs() <= 1e-7 * deg_area(&a));
    }

    #[test]
    fn random_outputs_hold_ring_invariants(seed in 0u64..10_000, dx in -1.0f64..1.0) {
        let a = star(seed, 0, vector![0.0, 0.0]);
        let b = star(seed, 1, vector![dx, 0.3]);
        let c = star(seed, 2, vector![0.2, -dx]);
        for p in intersect_all(&[a, b, c]) {
            assert_ring_invariants(&p);
        }
    }
}
