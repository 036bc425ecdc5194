// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;

use brushwork_quadtree::{PixelPoint, Polygon, QuadTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_coord(&mut self, bound: i32) -> i32 {
        (self.next_u64() % bound as u64) as i32
    }
}

const WORLD: i32 = 1024;

fn gen_uniform_points(count: usize) -> Vec<PixelPoint> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| PixelPoint::new(rng.next_coord(WORLD), rng.next_coord(WORLD)))
        .collect()
}

fn gen_clustered_points(clusters: usize, per_cluster: usize) -> Vec<PixelPoint> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = rng.next_coord(WORLD);
        let cy = rng.next_coord(WORLD);
        for _ in 0..per_cluster {
            let dx = rng.next_coord(17) - 8;
            let dy = rng.next_coord(17) - 8;
            out.push(PixelPoint::new(cx + dx, cy + dy));
        }
    }
    out
}

fn build_tree(points: &[PixelPoint]) -> QuadTree<u32> {
    let mut tree = QuadTree::new();
    tree.reset(WORLD, WORLD);
    for (i, p) in points.iter().enumerate() {
        tree.insert(*p, i as u32);
    }
    tree
}

/// A mid-sized freehand-ish lasso covering roughly a quarter of the world.
fn lasso() -> Polygon {
    [
        (100.0, 150.0),
        (560.0, 90.0),
        (620.0, 380.0),
        (420.0, 520.0),
        (350.0, 330.0),
        (140.0, 470.0),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect()
}

fn bench_polygon_query(c: &mut Criterion) {
    let polygon = lasso();
    let mut group = c.benchmark_group("polygon_query_uniform");
    for &n in &[1_000usize, 10_000, 50_000] {
        let points = gen_uniform_points(n);
        let tree = build_tree(&points);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("quadtree", n), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                tree.query(black_box(&polygon), &mut out);
                out
            })
        });
        group.bench_function(BenchmarkId::new("linear_scan", n), |b| {
            b.iter(|| {
                points
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| polygon.contains(p.to_point()))
                    .map(|(i, _)| i as u32)
                    .collect::<Vec<_>>()
            })
        });
    }
    group.finish();
}

fn bench_polygon_query_clustered(c: &mut Criterion) {
    let polygon = lasso();
    let mut group = c.benchmark_group("polygon_query_clustered");
    for &clusters in &[50usize, 500] {
        let points = gen_clustered_points(clusters, 100);
        let tree = build_tree(&points);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(BenchmarkId::new("quadtree", clusters), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                tree.query(black_box(&polygon), &mut out);
                out
            })
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for &n in &[10_000usize, 50_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("insert_all", n), |b| {
            b.iter(|| build_tree(black_box(&points)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_polygon_query,
    bench_polygon_query_clustered,
    bench_build
);
criterion_main!(benches);
