// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushwork Markers: drawable markers and their selection index.
//!
//! A visualization surface draws one marker per datum (or several, or
//! decorations with no datum at all) and owns the mapping from marker
//! geometry back to record identity. This crate provides:
//!
//! - [`Marker`], the capability trait the selection engine sees: bounding
//!   box, exact shape containment, selectable hit points, the associated
//!   record, and whether the marker listens for pointer events. Rendering
//!   is deliberately absent; how markers are painted is the host's concern.
//! - Concrete shapes in [`shapes`]: [`CircleMarker`], [`RectMarker`],
//!   [`LineMarker`], [`PolygonMarker`], [`LabelMarker`], [`GlyphMarker`].
//! - [`MarkerIndex`], the lazy adapter that feeds selectable points into a
//!   `brushwork_quadtree` index for lasso queries, plus the draw-order
//!   point probes used for hover and click.
//!
//! ## Lazy rebuild
//!
//! The index is invalidated eagerly (every resize or re-layout) and rebuilt
//! lazily (first query afterwards). Rebuilds are idempotent, so redundant
//! invalidations cost nothing but a flag write.
//!
//! ## Threading
//!
//! Everything here is single-threaded by design; the pointer-event thread
//! owns the index. A host that also redraws from a background refresh must
//! serialize access to the marker list and the index together; one mutex
//! around both is sufficient, and the `&mut self` entry points make the
//! requirement explicit.
//!
//! ## Minimal example
//!
//! ```rust
//! use brushwork_markers::shapes::CircleMarker;
//! use brushwork_markers::{Marker, MarkerIndex};
//! use brushwork_quadtree::{PixelPoint, Polygon};
//! use brushwork_selection::RecordId;
//! use kurbo::Point;
//!
//! let markers: Vec<Box<dyn Marker>> = vec![
//!     Box::new(CircleMarker::new(PixelPoint::new(30, 30), 4.0, Some(RecordId::new(0)))),
//!     Box::new(CircleMarker::new(PixelPoint::new(160, 160), 4.0, Some(RecordId::new(1)))),
//! ];
//!
//! let mut index = MarkerIndex::new();
//! index.invalidate(200, 200);
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
//! index.query_polygon(&markers, &lasso, &mut hits);
//! assert_eq!(hits, vec![RecordId::new(0)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod marker;
pub mod shapes;

pub use index::MarkerIndex;
pub use marker::Marker;
pub use shapes::{CircleMarker, GlyphMarker, LabelMarker, LineMarker, PolygonMarker, RectMarker};
