// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dumps how a polygon query traverses the quadtree: node counts per depth,
//! then the visited/fast-accepted split for a lasso. This is the text-mode
//! version of the debug overlay a host would draw from the same data.

use brushwork_quadtree::{PixelPoint, Polygon, QuadTree, QueryTrace, TraversalKind};
use kurbo::Point;

const WORLD: i32 = 512;

struct Rng(u64);

impl Rng {
    fn next_coord(&mut self, bound: i32) -> i32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x % bound as u64) as i32
    }
}

fn main() {
    let mut rng = Rng(0xFACE_FEED_CAFE_BABE);
    let mut tree: QuadTree<u32> = QuadTree::new();
    tree.reset(WORLD, WORLD);
    for i in 0..20_000 {
        tree.insert(
            PixelPoint::new(rng.next_coord(WORLD), rng.next_coord(WORLD)),
            i,
        );
    }

    let mut per_depth: Vec<usize> = Vec::new();
    tree.visit_regions(|_, depth| {
        if per_depth.len() <= depth {
            per_depth.resize(depth + 1, 0);
        }
        per_depth[depth] += 1;
    });
    println!("{} entries, tree depth {}", tree.len(), tree.depth());
    for (depth, count) in per_depth.iter().enumerate() {
        println!("  depth {depth}: {count} nodes");
    }

    let lasso: Polygon = [
        (60.0, 80.0),
        (300.0, 40.0),
        (460.0, 250.0),
        (280.0, 470.0),
        (90.0, 380.0),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect();

    let mut hits = Vec::new();
    let mut trace = QueryTrace::new();
    tree.query_traced(&lasso, &mut hits, &mut trace);

    let fast_accepted = trace
        .steps()
        .iter()
        .filter(|s| s.kind == TraversalKind::FastAccepted)
        .count();
    println!(
        "lasso query: {} hits, {} nodes visited, {} subtrees fast-accepted",
        hits.len(),
        trace.steps().len() - fast_accepted,
        fast_accepted,
    );
}
