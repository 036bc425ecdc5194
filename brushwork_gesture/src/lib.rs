// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushwork Gesture: the pointer state machine behind lasso selection.
//!
//! This crate converts a raw pointer-down / move / up sequence into
//! selection updates, tying together the other Brushwork crates: it builds
//! the outline, queries `brushwork_markers::MarkerIndex`, and writes the
//! resulting records into `brushwork_selection::SelectionSet`.
//!
//! ## Gesture vocabulary
//!
//! - **Freehand lasso**: primary button; every drag move appends an
//!   outline vertex.
//! - **Rectangle**: secondary or tertiary button; the outline stays a
//!   rectangle between the pointer-down anchor and the current position.
//! - **Multi-select modifier**: the gesture appends a new group to the
//!   selection instead of replacing it.
//! - **Brush modifier**: drag moves translate the whole outline instead
//!   of reshaping it, so a finished-looking lasso can be slid across the
//!   plot and re-queried as it goes.
//! - **Click**: a gesture that never leaves its starting pixel resolves
//!   as a draw-order point probe; clicking empty canvas without the
//!   multi-select modifier deselects everything.
//!
//! With [`GestureConfig::live_update`] (the default) the target group is
//! re-queried on every move, so highlights track the outline while the
//! pointer is still down; otherwise the query runs once on release.
//!
//! ## Minimal example
//!
//! ```rust
//! use brushwork_gesture::{GestureConfig, Modifiers, PointerButton, SelectionGesture};
//! use brushwork_markers::shapes::CircleMarker;
//! use brushwork_markers::{Marker, MarkerIndex};
//! use brushwork_quadtree::PixelPoint;
//! use brushwork_selection::{RecordId, SelectionSet};
//! use kurbo::Point;
//!
//! let markers: Vec<Box<dyn Marker>> = vec![
//!     Box::new(CircleMarker::new(PixelPoint::new(40, 40), 4.0, Some(RecordId::new(0)))),
//!     Box::new(CircleMarker::new(PixelPoint::new(160, 40), 4.0, Some(RecordId::new(1)))),
//! ];
//! let mut index = MarkerIndex::new();
//! index.invalidate(200, 200);
//! let mut selection = SelectionSet::new();
//! let mut gesture = SelectionGesture::new(GestureConfig::default());
//!
//! // Rectangle-select the left marker.
//! gesture.on_pointer_down(
//!     Point::new(10.0, 10.0),
//!     PointerButton::Secondary,
//!     Modifiers::empty(),
//!     &mut selection,
//! );
//! gesture.on_pointer_move(
//!     Point::new(80.0, 80.0),
//!     Modifiers::empty(),
//!     &mut index,
//!     &markers,
//!     &mut selection,
//! );
//! gesture.on_pointer_up(
//!     Point::new(80.0, 80.0),
//!     Modifiers::empty(),
//!     &mut index,
//!     &markers,
//!     &mut selection,
//! );
//!
//! let groups = selection.groups().unwrap();
//! assert_eq!(groups[0].members(), &[RecordId::new(0)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod gesture;
mod input;

pub use gesture::{GestureConfig, SelectionGesture, SelectionMode};
pub use input::{Modifiers, PointerButton};
