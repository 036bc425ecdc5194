// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushwork Quadtree: an adaptive 2D point index for interactive selection.
//!
//! This crate is the spatial core of the Brushwork selection engine. It
//! indexes point-keyed values over an integer pixel region and answers
//! "which values lie inside this polygon?" in `O(k + log n)` expected time,
//! which is what keeps lasso selection responsive while the pointer is still
//! moving over thousands of markers.
//!
//! - [`QuadTree`] is the index itself: adaptive quadrant splitting with a small
//!   per-leaf capacity, a duplicate-point guard so coordinate pile-ups never
//!   split forever, and an overflow list for points outside the indexed
//!   region.
//! - [`Polygon`] is the query shape: even-odd containment plus the exact
//!   rectangle overlap/containment tests the query uses to prune subtrees
//!   and to fast-accept subtrees that are entirely inside the lasso.
//! - [`QueryTrace`] is opt-in instrumentation recording which nodes a query
//!   visited, for hosts that render the index while debugging.
//!
//! ## Minimal example
//!
//! ```rust
//! use brushwork_quadtree::{PixelPoint, Polygon, QuadTree};
//! use kurbo::Point;
//!
//! let mut tree: QuadTree<usize> = QuadTree::new();
//! tree.reset(200, 200);
//! tree.insert(PixelPoint::new(20, 20), 0);
//! tree.insert(PixelPoint::new(180, 180), 1);
//!
//! let lasso: Polygon = [
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 0.0),
//!     Point::new(100.0, 100.0),
//!     Point::new(0.0, 100.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut hits = Vec::new();
//! tree.query(&lasso, &mut hits);
//! assert_eq!(hits, vec![0]);
//! ```
//!
//! ## Degenerate input
//!
//! All of the following are valid and return well-defined (possibly empty)
//! results: polygons with fewer than three vertices, polygons entirely
//! outside the region, queries against an empty tree, and any number of
//! entries sharing one point. The single fatal misuse is inserting before
//! the first [`QuadTree::reset`], which panics.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod polygon;
mod tree;
mod types;

pub use polygon::Polygon;
pub use tree::{DEFAULT_THRESHOLD, QuadTree, QueryTrace, TraceStep, TraversalKind};
pub use types::{PixelPoint, PixelRect};
