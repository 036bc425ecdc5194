// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adaptive point quadtree.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::polygon::Polygon;
use crate::types::{PixelPoint, PixelRect};

/// Default per-leaf entry capacity before a node splits.
pub const DEFAULT_THRESHOLD: usize = 5;

/// A point-keyed entry held by a leaf.
#[derive(Copy, Clone, Debug)]
struct Entry<R> {
    point: PixelPoint,
    value: R,
}

/// Leaf storage stays inline up to one past the default threshold, so the
/// common leaf never heap-allocates.
type Entries<R> = SmallVec<[Entry<R>; DEFAULT_THRESHOLD + 1]>;

#[derive(Clone, Debug)]
enum NodeKind<R> {
    Leaf(Entries<R>),
    Internal {
        children: Box<[TreeNode<R>; 4]>,
        /// Entries whose point falls outside this node's region. These are
        /// only ever produced at the root (descent routes every in-region
        /// point into a child), are never fast-accepted, and are tested
        /// entry-by-entry on every query that visits the node.
        overflow: Vec<Entry<R>>,
    },
}

#[derive(Clone, Debug)]
struct TreeNode<R> {
    region: PixelRect,
    kind: NodeKind<R>,
}

/// How a query handled a visited node, as recorded in a [`QueryTrace`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalKind {
    /// The node's entries (or children) were examined individually.
    Tested,
    /// The node's region was fully inside the polygon; all descendant
    /// entries were accepted without per-point tests.
    FastAccepted,
}

/// One visited node in a [`QueryTrace`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    /// The visited node's region.
    pub region: PixelRect,
    /// How the query handled the node.
    pub kind: TraversalKind,
}

/// A record of which nodes a query visited.
///
/// Purely instrumentation: hosts that render the index for debugging pass a
/// trace into [`QuadTree::query_traced`] and draw the visited regions
/// themselves. Tracing never changes query results, and the tree itself
/// holds no traversal state.
#[derive(Clone, Debug, Default)]
pub struct QueryTrace {
    steps: Vec<TraceStep>,
}

impl QueryTrace {
    /// Create an empty trace.
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// The visited nodes, in visit order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Whether anything was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Forget all recorded steps, keeping the allocation.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    fn push(&mut self, region: PixelRect, kind: TraversalKind) {
        self.steps.push(TraceStep { region, kind });
    }
}

/// A 2D index of point-keyed values answering polygon containment queries in
/// `O(k + log n)` expected time.
///
/// The tree covers an integer pixel region set by [`QuadTree::reset`]. A node
/// is either a leaf holding entries or an internal node with four equal
/// quadrant children; a leaf splits once it holds more than
/// [`threshold`](QuadTree::threshold) entries, unless all of them share one
/// point (so coordinate pile-ups can never split forever). Points outside
/// the region are kept in a side list and always tested individually.
///
/// # Example
///
/// ```rust
/// use brushwork_quadtree::{PixelPoint, Polygon, QuadTree};
/// use kurbo::Point;
///
/// let mut tree: QuadTree<u32> = QuadTree::new();
/// tree.reset(100, 100);
/// for i in 0..10 {
///     tree.insert(PixelPoint::new(i * 10, 50), i as u32);
/// }
///
/// // A triangle over the left half of the region.
/// let polygon: Polygon = [
///     Point::new(-1.0, -1.0),
///     Point::new(45.0, -1.0),
///     Point::new(45.0, 101.0),
///     Point::new(-1.0, 101.0),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut hits = Vec::new();
/// tree.query(&polygon, &mut hits);
/// hits.sort_unstable();
/// assert_eq!(hits, vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct QuadTree<R> {
    threshold: usize,
    len: usize,
    root: TreeNode<R>,
}

impl<R: Copy + Debug> Default for QuadTree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Debug> QuadTree<R> {
    /// Create an empty tree over a zero-area region.
    ///
    /// [`QuadTree::reset`] must give the tree a real region before anything
    /// is inserted.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// Create an empty tree with a custom split threshold (minimum 1).
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            len: 0,
            root: TreeNode {
                region: PixelRect::default(),
                kind: NodeKind::Leaf(Entries::new()),
            },
        }
    }

    /// Discard all entries and cover the region `[0, 0] - [width, height]`.
    pub fn reset(&mut self, width: i32, height: i32) {
        self.root = TreeNode {
            region: PixelRect::new(0, 0, width, height),
            kind: NodeKind::Leaf(Entries::new()),
        };
        self.len = 0;
    }

    /// The region this tree covers.
    pub fn region(&self) -> PixelRect {
        self.root.region
    }

    /// The per-leaf entry capacity before a split.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index `value` under `point`.
    ///
    /// Points outside the tree's region are accepted and kept queryable via
    /// the overflow list.
    ///
    /// # Panics
    ///
    /// Panics if the tree's region has zero area. That state means a query
    /// or insert was issued before the first `reset`, which is a caller
    /// ordering bug, not a recoverable condition.
    pub fn insert(&mut self, point: PixelPoint, value: R) {
        assert!(
            self.root.region.has_area(),
            "insert into a zero-area quadtree; reset(width, height) must come first"
        );
        Self::insert_into(&mut self.root, Entry { point, value }, self.threshold);
        self.len += 1;
    }

    /// Insert at `node`, splitting afterwards if the leaf went over
    /// threshold. The split re-runs this per node, so a fresh child that is
    /// still over threshold splits again.
    fn insert_into(node: &mut TreeNode<R>, entry: Entry<R>, threshold: usize) {
        match &mut node.kind {
            NodeKind::Internal { children, overflow } => {
                match children.iter_mut().find(|c| c.region.contains(entry.point)) {
                    Some(child) => Self::insert_into(child, entry, threshold),
                    None => overflow.push(entry),
                }
                return;
            }
            NodeKind::Leaf(entries) => {
                entries.push(entry);
                if entries.len() <= threshold || all_coincident(entries) {
                    return;
                }
            }
        }
        Self::split(node, threshold);
    }

    /// Turn a leaf into an internal node, redistributing its entries into
    /// the four quadrant children.
    fn split(node: &mut TreeNode<R>, threshold: usize) {
        let children = node.region.quadrants().map(|region| TreeNode {
            region,
            kind: NodeKind::Leaf(Entries::new()),
        });
        let old = core::mem::replace(
            &mut node.kind,
            NodeKind::Internal {
                children: Box::new(children),
                overflow: Vec::new(),
            },
        );
        if let NodeKind::Leaf(entries) = old {
            for entry in entries {
                Self::insert_into(node, entry, threshold);
            }
        }
    }

    /// Append to `out` the value of every entry whose point lies inside
    /// `polygon`.
    ///
    /// Subtrees whose region cannot meet the polygon are skipped; subtrees
    /// whose region is entirely inside it contribute all of their entries
    /// without per-point tests.
    pub fn query(&self, polygon: &Polygon, out: &mut Vec<R>) {
        Self::query_node(&self.root, polygon, out, None);
    }

    /// Like [`QuadTree::query`], additionally recording every visited node
    /// in `trace` for debug rendering.
    pub fn query_traced(&self, polygon: &Polygon, out: &mut Vec<R>, trace: &mut QueryTrace) {
        Self::query_node(&self.root, polygon, out, Some(trace));
    }

    fn query_node(
        node: &TreeNode<R>,
        polygon: &Polygon,
        out: &mut Vec<R>,
        mut trace: Option<&mut QueryTrace>,
    ) {
        if let Some(t) = trace.as_deref_mut() {
            t.push(node.region, TraversalKind::Tested);
        }
        match &node.kind {
            NodeKind::Leaf(entries) => {
                for e in entries {
                    if polygon.contains(e.point.to_point()) {
                        out.push(e.value);
                    }
                }
            }
            NodeKind::Internal { children, overflow } => {
                for child in children.iter() {
                    let rect = child.region.to_rect();
                    if !polygon.intersects_rect(rect) {
                        continue;
                    }
                    if polygon.contains_rect(rect) {
                        if let Some(t) = trace.as_deref_mut() {
                            t.push(child.region, TraversalKind::FastAccepted);
                        }
                        Self::collect_all(child, out);
                    } else {
                        Self::query_node(child, polygon, out, trace.as_deref_mut());
                    }
                }
                for e in overflow {
                    if polygon.contains(e.point.to_point()) {
                        out.push(e.value);
                    }
                }
            }
        }
    }

    /// Append every entry under `node` without testing. Overflow entries lie
    /// outside the accepted region by construction, so they are excluded;
    /// they are tested where they live instead.
    fn collect_all(node: &TreeNode<R>, out: &mut Vec<R>) {
        match &node.kind {
            NodeKind::Leaf(entries) => out.extend(entries.iter().map(|e| e.value)),
            NodeKind::Internal { children, .. } => {
                for child in children.iter() {
                    Self::collect_all(child, out);
                }
            }
        }
    }

    /// Visit every node's region with its depth, root first.
    ///
    /// Hosts use this to draw the index structure; combined with a
    /// [`QueryTrace`] it replaces any global "paint the tree" switch.
    pub fn visit_regions(&self, mut f: impl FnMut(PixelRect, usize)) {
        Self::visit(&self.root, 0, &mut f);
    }

    fn visit(node: &TreeNode<R>, depth: usize, f: &mut impl FnMut(PixelRect, usize)) {
        f(node.region, depth);
        if let NodeKind::Internal { children, .. } = &node.kind {
            for child in children.iter() {
                Self::visit(child, depth + 1, f);
            }
        }
    }

    /// Depth of the deepest node. An unsplit tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        self.visit_regions(|_, d| max = max.max(d));
        max
    }
}

fn all_coincident<R>(entries: &[Entry<R>]) -> bool {
    let Some(first) = entries.first() else {
        return true;
    };
    entries.iter().all(|e| e.point == first.point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Point;

    fn cover_all() -> Polygon {
        // Generously larger than any test region.
        Polygon::new(vec![
            Point::new(-10.0, -10.0),
            Point::new(1000.0, -10.0),
            Point::new(1000.0, 1000.0),
            Point::new(-10.0, 1000.0),
        ])
    }

    #[test]
    fn empty_tree_queries_empty() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.reset(100, 100);
        let mut out = Vec::new();
        tree.query(&cover_all(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    #[should_panic(expected = "zero-area quadtree")]
    fn insert_without_reset_panics() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.insert(PixelPoint::new(1, 1), 0);
    }

    #[test]
    fn split_happens_past_threshold() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.reset(100, 100);
        for i in 0..6 {
            tree.insert(PixelPoint::new(i * 10, i * 10), i as u32);
        }
        assert!(tree.depth() > 0, "six spread-out points must split the root");
        let mut out = Vec::new();
        tree.query(&cover_all(), &mut out);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn duplicate_points_never_split() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.reset(100, 100);
        for i in 0..50 {
            tree.insert(PixelPoint::new(5, 5), i);
        }
        assert_eq!(tree.depth(), 0, "coincident entries must not subdivide");
        let mut out = Vec::new();
        tree.query(&cover_all(), &mut out);
        assert_eq!(out.len(), 50);
    }

    #[test]
    fn out_of_region_points_stay_queryable() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.reset(100, 100);
        // Enough in-region points to force a split, plus strays outside.
        for i in 0..10 {
            tree.insert(PixelPoint::new(i * 7 + 3, 90 - i * 5), i as u32);
        }
        tree.insert(PixelPoint::new(105, 105), 100);
        tree.insert(PixelPoint::new(-5, 50), 101);
        let mut out = Vec::new();
        tree.query(&cover_all(), &mut out);
        assert_eq!(out.len(), 12);
        assert!(out.contains(&100) && out.contains(&101));
    }

    #[test]
    fn reset_discards_entries() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.reset(100, 100);
        tree.insert(PixelPoint::new(10, 10), 1);
        tree.reset(200, 50);
        assert!(tree.is_empty());
        assert_eq!(tree.region(), PixelRect::new(0, 0, 200, 50));
        let mut out = Vec::new();
        tree.query(&cover_all(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn query_traced_marks_fast_accepts() {
        let mut tree: QuadTree<u32> = QuadTree::new();
        tree.reset(128, 128);
        for x in 0..8 {
            for y in 0..8 {
                tree.insert(PixelPoint::new(x * 16 + 4, y * 16 + 4), (x * 8 + y) as u32);
            }
        }
        let mut out = Vec::new();
        let mut trace = QueryTrace::new();
        tree.query_traced(&cover_all(), &mut out, &mut trace);
        assert_eq!(out.len(), 64);
        assert!(
            trace
                .steps()
                .iter()
                .any(|s| s.kind == TraversalKind::FastAccepted),
            "a polygon covering everything must fast-accept whole subtrees"
        );

        // The plain query gives identical results.
        let mut plain = Vec::new();
        tree.query(&cover_all(), &mut plain);
        assert_eq!(out, plain);

        trace.clear();
        assert!(trace.is_empty());
    }
}
