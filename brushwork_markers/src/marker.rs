// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marker capability trait.

use core::fmt::Debug;

use brushwork_quadtree::PixelPoint;
use brushwork_selection::RecordId;
use kurbo::{Point, Rect};

/// Capabilities a drawn marker exposes to the selection engine.
///
/// A marker is whatever a visualization paints for one datum: a scatter dot,
/// a parallel-coordinates polyline, a heatmap cell, a glyph. The selection
/// engine does not paint; it only needs the marker's geometry for point
/// probes and the marker's hit points and record link for lasso indexing.
///
/// The defaults describe an inert decoration: not hit-testable, not
/// indexable, not listening. Override what applies:
///
/// - [`Marker::selectable_points`] + [`Marker::record`] make the marker
///   lasso-selectable. A marker may contribute any number of hit points
///   (a dot contributes its center, a polyline its vertices).
/// - [`Marker::contains`] makes it respond to point probes (hover, click).
/// - [`Marker::has_pointer_listeners`] routes raw pointer events to it
///   instead of to selection.
pub trait Marker: Debug {
    /// The marker's axis-aligned bounds in pixel space.
    ///
    /// Point probes test this before the (possibly costlier) exact shape
    /// test.
    fn bounding_box(&self) -> Rect;

    /// Exact shape containment for point probes.
    fn contains(&self, point: Point) -> bool {
        let _ = point;
        false
    }

    /// The pixel points this marker contributes to the spatial index, or
    /// `None` if it is not lasso-selectable.
    fn selectable_points(&self) -> Option<&[PixelPoint]> {
        None
    }

    /// The data record this marker represents, or `None` for decorations
    /// (axes, labels, grid lines).
    fn record(&self) -> Option<RecordId> {
        None
    }

    /// Whether pointer events over this marker should be routed to it
    /// rather than starting a selection gesture.
    fn has_pointer_listeners(&self) -> bool {
        false
    }
}
