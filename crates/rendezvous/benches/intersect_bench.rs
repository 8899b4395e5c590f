//! Criterion benches for the intersection engine on random star polygons.
//! Sizes: vertex count n in {8, 32, 128} per polygon, 2 and 4 operands.
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use rendezvous::clip::triangulate;
use rendezvous::prelude::*;
use rendezvous::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
use rendezvous::ring::open_ring;

fn stars(n: usize, count: u64, seed: u64) -> Vec<Polygon> {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(n),
        angle_jitter_frac: 0.3,
        radial_jitter: 0.4,
        base_radius: 0.05,
    };
    (0..count)
        .map(|index| {
            let centre = Vector2::new(13.40 + 0.02 * index as f64, 52.52 - 0.01 * index as f64);
            draw_star_polygon(cfg, ReplayToken { seed, index }, centre)
        })
        .collect()
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersect");
    for &n in &[8usize, 32, 128] {
        for &k in &[2u64, 4] {
            group.bench_with_input(
                BenchmarkId::new(format!("intersect_all_k{k}"), n),
                &n,
                |b, &n| {
                    b.iter_batched(
                        || stars(n, k, 42),
                        |polys| {
                            let _ = intersect_all(&polys);
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
        group.bench_with_input(BenchmarkId::new("triangulate", n), &n, |b, &n| {
            b.iter_batched(
                || open_ring(stars(n, 1, 7)[0].outer()),
                |ring| {
                    let _ = triangulate(&ring);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_geodesic(c: &mut Criterion) {
    let centre = Vector2::new(-0.1276, 51.5072);
    c.bench_function("circle_to_polygon_64", |b| {
        b.iter(|| circle_to_polygon(centre, 5000.0, DEFAULT_CIRCLE_SEGMENTS))
    });
}

criterion_group!(benches, bench_intersect, bench_geodesic);
criterion_main!(benches);
