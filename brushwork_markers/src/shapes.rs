// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete marker shapes.
//!
//! These cover the marks common visualizations draw per record: dots,
//! cells, segments, filled outlines, labels, and composite glyphs. Each
//! caches its selectable pixel points at construction so the lazy index
//! rebuild is a straight copy.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use brushwork_quadtree::{PixelPoint, PixelRect, Polygon};
use brushwork_selection::RecordId;
use kurbo::{Point, Rect};

use crate::marker::Marker;

/// A filled dot, the scatterplot mark. Selectable by its center.
#[derive(Clone, Debug)]
pub struct CircleMarker {
    /// Center in pixel space.
    pub center: PixelPoint,
    /// Radius in pixels.
    pub radius: f64,
    /// The record this dot represents.
    pub record: Option<RecordId>,
    /// Whether pointer events should be routed to this marker.
    pub interactive: bool,
}

impl CircleMarker {
    /// Create a dot for `record` at `center`.
    pub const fn new(center: PixelPoint, radius: f64, record: Option<RecordId>) -> Self {
        Self {
            center,
            radius,
            record,
            interactive: false,
        }
    }
}

impl Marker for CircleMarker {
    fn bounding_box(&self) -> Rect {
        let c = self.center.to_point();
        Rect::new(
            c.x - self.radius,
            c.y - self.radius,
            c.x + self.radius,
            c.y + self.radius,
        )
    }

    fn contains(&self, point: Point) -> bool {
        let d = point - self.center.to_point();
        d.x * d.x + d.y * d.y < self.radius * self.radius
    }

    fn selectable_points(&self) -> Option<&[PixelPoint]> {
        Some(core::slice::from_ref(&self.center))
    }

    fn record(&self) -> Option<RecordId> {
        self.record
    }

    fn has_pointer_listeners(&self) -> bool {
        self.interactive
    }
}

/// An axis-aligned cell, the heatmap mark. Selectable by its four corners.
#[derive(Clone, Debug)]
pub struct RectMarker {
    /// The cell's pixel region.
    pub rect: PixelRect,
    /// The record this cell represents.
    pub record: Option<RecordId>,
    /// Whether pointer events should be routed to this marker.
    pub interactive: bool,
    corners: [PixelPoint; 4],
}

impl RectMarker {
    /// Create a cell for `record` covering `rect`.
    pub const fn new(rect: PixelRect, record: Option<RecordId>) -> Self {
        let (x1, y1) = (rect.x, rect.y);
        let (x2, y2) = (rect.x + rect.width, rect.y + rect.height);
        Self {
            rect,
            record,
            interactive: false,
            corners: [
                PixelPoint::new(x1, y1),
                PixelPoint::new(x2, y1),
                PixelPoint::new(x2, y2),
                PixelPoint::new(x1, y2),
            ],
        }
    }
}

impl Marker for RectMarker {
    fn bounding_box(&self) -> Rect {
        self.rect.to_rect()
    }

    fn contains(&self, point: Point) -> bool {
        // Strict interior: the shared edge of two adjacent cells belongs to
        // neither for point probes.
        let r = self.rect.to_rect();
        point.x > r.x0 && point.x < r.x1 && point.y > r.y0 && point.y < r.y1
    }

    fn selectable_points(&self) -> Option<&[PixelPoint]> {
        Some(&self.corners)
    }

    fn record(&self) -> Option<RecordId> {
        self.record
    }

    fn has_pointer_listeners(&self) -> bool {
        self.interactive
    }
}

/// A hairline segment, the parallel-coordinates mark. Selectable by both
/// endpoints; a hairline is not a point-probe target, so [`Marker::contains`]
/// stays `false`.
#[derive(Clone, Debug)]
pub struct LineMarker {
    /// The record this segment represents.
    pub record: Option<RecordId>,
    endpoints: [PixelPoint; 2],
}

impl LineMarker {
    /// Create a segment for `record` from `a` to `b`.
    pub const fn new(a: PixelPoint, b: PixelPoint, record: Option<RecordId>) -> Self {
        Self {
            record,
            endpoints: [a, b],
        }
    }

    /// The segment's endpoints.
    pub const fn endpoints(&self) -> [PixelPoint; 2] {
        self.endpoints
    }
}

impl Marker for LineMarker {
    fn bounding_box(&self) -> Rect {
        let [a, b] = self.endpoints;
        Rect::new(
            f64::from(a.x.min(b.x)),
            f64::from(a.y.min(b.y)),
            f64::from(a.x.max(b.x)),
            f64::from(a.y.max(b.y)),
        )
    }

    fn selectable_points(&self) -> Option<&[PixelPoint]> {
        Some(&self.endpoints)
    }

    fn record(&self) -> Option<RecordId> {
        self.record
    }
}

/// A filled outline, the mark for area shapes. Selectable by its vertices.
#[derive(Clone, Debug)]
pub struct PolygonMarker {
    /// The record this shape represents.
    pub record: Option<RecordId>,
    /// Whether pointer events should be routed to this marker.
    pub interactive: bool,
    vertices: Vec<PixelPoint>,
    outline: Polygon,
}

impl PolygonMarker {
    /// Create a filled outline for `record` through `vertices`.
    pub fn new(vertices: Vec<PixelPoint>, record: Option<RecordId>) -> Self {
        let outline = vertices.iter().map(|p| p.to_point()).collect();
        Self {
            record,
            interactive: false,
            vertices,
            outline,
        }
    }

    /// The outline's vertices.
    pub fn vertices(&self) -> &[PixelPoint] {
        &self.vertices
    }
}

impl Marker for PolygonMarker {
    fn bounding_box(&self) -> Rect {
        self.outline.bounding_box()
    }

    fn contains(&self, point: Point) -> bool {
        self.outline.contains(point)
    }

    fn selectable_points(&self) -> Option<&[PixelPoint]> {
        Some(&self.vertices)
    }

    fn record(&self) -> Option<RecordId> {
        self.record
    }

    fn has_pointer_listeners(&self) -> bool {
        self.interactive
    }
}

/// A text label. Not lasso-selectable; hit-tests by its box so interactive
/// labels can still receive routed pointer events.
#[derive(Clone, Debug)]
pub struct LabelMarker {
    /// The label's pixel box (layout is the renderer's concern).
    pub rect: PixelRect,
    /// The text content.
    pub text: String,
    /// Whether pointer events should be routed to this marker.
    pub interactive: bool,
}

impl LabelMarker {
    /// Create a label occupying `rect`.
    pub fn new(rect: PixelRect, text: String) -> Self {
        Self {
            rect,
            text,
            interactive: false,
        }
    }
}

impl Marker for LabelMarker {
    fn bounding_box(&self) -> Rect {
        self.rect.to_rect()
    }

    fn contains(&self, point: Point) -> bool {
        let r = self.rect.to_rect();
        point.x >= r.x0 && point.x < r.x1 && point.y >= r.y0 && point.y < r.y1
    }

    fn has_pointer_listeners(&self) -> bool {
        self.interactive
    }
}

/// A composite of several parts drawn for one record (a star glyph, a
/// whisker, a labeled dot). Selectable by the union of its parts' points.
#[derive(Debug)]
pub struct GlyphMarker {
    /// The record this glyph represents.
    pub record: Option<RecordId>,
    /// Whether pointer events should be routed to this marker.
    pub interactive: bool,
    parts: Vec<Box<dyn Marker>>,
    selectable: Vec<PixelPoint>,
}

impl GlyphMarker {
    /// Create a glyph for `record` from its parts.
    ///
    /// The glyph's selectable points are gathered from the parts once here;
    /// the parts' own record links are ignored in favor of the glyph's.
    pub fn new(parts: Vec<Box<dyn Marker>>, record: Option<RecordId>) -> Self {
        let selectable = parts
            .iter()
            .filter_map(|p| p.selectable_points())
            .flatten()
            .copied()
            .collect();
        Self {
            record,
            interactive: false,
            parts,
            selectable,
        }
    }

    /// The glyph's parts.
    pub fn parts(&self) -> &[Box<dyn Marker>] {
        &self.parts
    }
}

impl Marker for GlyphMarker {
    fn bounding_box(&self) -> Rect {
        let mut parts = self.parts.iter();
        let Some(first) = parts.next() else {
            return Rect::ZERO;
        };
        parts.fold(first.bounding_box(), |bb, p| bb.union(p.bounding_box()))
    }

    fn contains(&self, point: Point) -> bool {
        self.parts.iter().any(|p| p.contains(point))
    }

    fn selectable_points(&self) -> Option<&[PixelPoint]> {
        Some(&self.selectable)
    }

    fn record(&self) -> Option<RecordId> {
        self.record
    }

    fn has_pointer_listeners(&self) -> bool {
        self.interactive
    }
}
