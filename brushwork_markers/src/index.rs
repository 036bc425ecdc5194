// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lazy marker-to-record spatial index.

use alloc::boxed::Box;
use alloc::vec::Vec;

use brushwork_quadtree::{Polygon, QuadTree, QueryTrace};
use brushwork_selection::RecordId;
use kurbo::Point;

use crate::marker::Marker;

/// Indexes a marker list's hit points for lasso queries, lazily.
///
/// The owning render surface calls [`MarkerIndex::invalidate`] whenever
/// marker positions change (resize, re-layout); the actual rebuild is
/// deferred to the first polygon query after that, so repeated invalidation
/// is free and redundant rebuild triggers are harmless.
///
/// Markers are borrowed per call and never stored, so the index cannot hold
/// stale geometry. The `&mut self` receivers on the rebuild-and-query entry
/// points are the serialization boundary: a host that shares the marker
/// list with a periodic background refresh wraps the list and this index in
/// one mutex and the exclusivity falls out of the borrow.
#[derive(Clone, Debug)]
pub struct MarkerIndex {
    tree: QuadTree<RecordId>,
    stale: bool,
}

impl Default for MarkerIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerIndex {
    /// Create an index with no region.
    ///
    /// [`MarkerIndex::invalidate`] must size it before the first polygon
    /// query against a non-empty marker list.
    pub fn new() -> Self {
        Self {
            tree: QuadTree::new(),
            stale: true,
        }
    }

    /// Drop all entries, cover a `width` by `height` pixel space, and mark
    /// the index for rebuild on the next query.
    pub fn invalidate(&mut self, width: i32, height: i32) {
        self.tree.reset(width, height);
        self.stale = true;
    }

    /// Whether the next query will rebuild.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of indexed hit points (not markers, not records).
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the index holds no hit points.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying quadtree, for hosts that render the index structure.
    pub fn quadtree(&self) -> &QuadTree<RecordId> {
        &self.tree
    }

    /// Rebuild now if stale: one entry per selectable point of every marker
    /// that has both selectable points and a record. Idempotent between
    /// invalidations.
    ///
    /// # Panics
    ///
    /// Panics if a selectable marker is present but the index was never
    /// sized with [`MarkerIndex::invalidate`] (zero-area quadtree), which is
    /// a caller ordering bug.
    pub fn ensure_built(&mut self, markers: &[Box<dyn Marker>]) {
        if !self.stale {
            return;
        }
        for marker in markers {
            let (Some(points), Some(record)) = (marker.selectable_points(), marker.record())
            else {
                continue;
            };
            for point in points {
                self.tree.insert(*point, record);
            }
        }
        self.stale = false;
    }

    /// Collect the records whose hit points fall inside `polygon`.
    ///
    /// One record may be appended several times (several hit points, or
    /// several markers sharing a record); callers get set semantics from
    /// `SelectionGroup`, which de-duplicates on write.
    pub fn query_polygon(
        &mut self,
        markers: &[Box<dyn Marker>],
        polygon: &Polygon,
        out: &mut Vec<RecordId>,
    ) {
        self.ensure_built(markers);
        self.tree.query(polygon, out);
    }

    /// Like [`MarkerIndex::query_polygon`], recording visited quadtree nodes
    /// in `trace` for debug rendering.
    pub fn query_polygon_traced(
        &mut self,
        markers: &[Box<dyn Marker>],
        polygon: &Polygon,
        out: &mut Vec<RecordId>,
        trace: &mut QueryTrace,
    ) {
        self.ensure_built(markers);
        self.tree.query_traced(polygon, out, trace);
    }

    /// The record under `point`, by linear scan in draw order.
    ///
    /// Deliberately unindexed: "which marker is under the cursor" depends on
    /// draw order, which the spatial index does not preserve. The first
    /// marker (in draw order) whose bounding box and shape contain the point
    /// and that carries a record wins; a record-less marker containing the
    /// point does not stop the scan. Point probes happen at hover cadence,
    /// so the linear cost is acceptable where losing draw-order priority is
    /// not.
    pub fn record_at(&self, markers: &[Box<dyn Marker>], point: Point) -> Option<RecordId> {
        markers.iter().find_map(|marker| {
            (marker.bounding_box().contains(point) && marker.contains(point))
                .then(|| marker.record())
                .flatten()
        })
    }

    /// The first marker (in draw order) under `point` that has pointer
    /// listeners attached, as an index into `markers`.
    ///
    /// Hosts use this to route a pointer event to a marker instead of
    /// starting a selection gesture.
    pub fn listening_marker_at(&self, markers: &[Box<dyn Marker>], point: Point) -> Option<usize> {
        markers.iter().position(|marker| {
            marker.bounding_box().contains(point)
                && marker.has_pointer_listeners()
                && marker.contains(point)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CircleMarker, LineMarker};
    use alloc::vec;
    use brushwork_quadtree::PixelPoint;

    fn dot(x: i32, y: i32, record: u32) -> Box<dyn Marker> {
        Box::new(CircleMarker::new(
            PixelPoint::new(x, y),
            4.0,
            Some(RecordId::new(record)),
        ))
    }

    fn lasso_around_everything() -> Polygon {
        [
            Point::new(-10.0, -10.0),
            Point::new(210.0, -10.0),
            Point::new(210.0, 210.0),
            Point::new(-10.0, 210.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn rebuild_skips_unselectable_markers() {
        let markers: Vec<Box<dyn Marker>> = vec![
            dot(20, 20, 0),
            // A dot with no record: drawn, never indexed.
            Box::new(CircleMarker::new(PixelPoint::new(40, 40), 4.0, None)),
            dot(60, 60, 1),
        ];
        let mut index = MarkerIndex::new();
        index.invalidate(200, 200);
        index.ensure_built(&markers);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn ensure_built_is_idempotent() {
        let markers: Vec<Box<dyn Marker>> = vec![dot(20, 20, 0), dot(60, 60, 1), dot(90, 90, 2)];
        let mut index = MarkerIndex::new();
        index.invalidate(200, 200);
        index.ensure_built(&markers);
        let built_once = index.len();
        index.ensure_built(&markers);
        assert_eq!(index.len(), built_once, "second build must not re-insert");

        // Invalidation re-arms the rebuild.
        index.invalidate(200, 200);
        assert!(index.is_stale());
        index.ensure_built(&markers);
        assert_eq!(index.len(), built_once);
    }

    #[test]
    fn polygon_query_returns_one_entry_per_hit_point() {
        let markers: Vec<Box<dyn Marker>> = vec![Box::new(LineMarker::new(
            PixelPoint::new(20, 20),
            PixelPoint::new(80, 80),
            Some(RecordId::new(5)),
        ))];
        let mut index = MarkerIndex::new();
        index.invalidate(200, 200);
        let mut out = Vec::new();
        index.query_polygon(&markers, &lasso_around_everything(), &mut out);
        assert_eq!(out, vec![RecordId::new(5), RecordId::new(5)]);
    }

    #[test]
    fn query_with_no_markers_is_empty() {
        let markers: Vec<Box<dyn Marker>> = Vec::new();
        let mut index = MarkerIndex::new();
        index.invalidate(200, 200);
        let mut out = Vec::new();
        index.query_polygon(&markers, &lasso_around_everything(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn point_probe_prefers_first_in_draw_order() {
        // Two overlapping dots: the first-drawn one wins the probe.
        let markers: Vec<Box<dyn Marker>> = vec![dot(50, 50, 0), dot(52, 50, 1)];
        let mut index = MarkerIndex::new();
        index.invalidate(200, 200);
        assert_eq!(
            index.record_at(&markers, Point::new(51.0, 50.0)),
            Some(RecordId::new(0))
        );
        assert_eq!(index.record_at(&markers, Point::new(150.0, 150.0)), None);
    }

    #[test]
    fn point_probe_skips_recordless_markers() {
        let markers: Vec<Box<dyn Marker>> = vec![
            Box::new(CircleMarker::new(PixelPoint::new(50, 50), 6.0, None)),
            dot(50, 50, 3),
        ];
        let index = MarkerIndex::new();
        assert_eq!(
            index.record_at(&markers, Point::new(50.0, 50.0)),
            Some(RecordId::new(3)),
            "a record-less marker must not absorb the probe"
        );
    }

    #[test]
    fn listening_probe_requires_listeners() {
        let mut listening = CircleMarker::new(PixelPoint::new(50, 50), 6.0, None);
        listening.interactive = true;
        let markers: Vec<Box<dyn Marker>> = vec![dot(50, 50, 0), Box::new(listening)];
        let index = MarkerIndex::new();
        assert_eq!(
            index.listening_marker_at(&markers, Point::new(50.0, 50.0)),
            Some(1),
            "the record dot has no listeners; the interactive one wins"
        );
        assert_eq!(
            index.listening_marker_at(&markers, Point::new(150.0, 150.0)),
            None
        );
    }
}
