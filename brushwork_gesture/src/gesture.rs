// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection gesture state machine.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use brushwork_markers::{Marker, MarkerIndex};
use brushwork_quadtree::Polygon;
use brushwork_selection::{SelectionGroup, SelectionSet};

use crate::input::{Modifiers, PointerButton};

/// How the in-progress outline grows while dragging.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every move appends a vertex: a freehand lasso.
    Freehand,
    /// The outline stays a four-corner rectangle between the pointer-down
    /// anchor and the current position.
    Rectangle,
}

/// Behavior switches for the gesture state machine.
///
/// Passed in explicitly; there is no process-wide configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GestureConfig {
    /// Re-query and rewrite the target group on every drag move. When
    /// `false`, the query runs once on pointer-up instead.
    pub live_update: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { live_update: true }
    }
}

/// Per-drag state, created on pointer-down and dropped on pointer-up.
#[derive(Clone, Debug)]
struct ActiveGesture {
    mode: SelectionMode,
    /// Outline vertices in pixel space. Rectangle mode keeps exactly four.
    vertices: Vec<Point>,
    /// Index of the group this gesture writes into.
    target: usize,
    down_pos: Point,
    /// Last observed pointer position; brush moves translate by the delta
    /// from here.
    last_pos: Point,
    /// Set once the pointer has left its starting pixel. A gesture that
    /// never does is a click, and resolves as a point probe: containment
    /// tests over a single-point outline are not meaningful.
    polygon_formed: bool,
}

/// Turns a pointer-down / move / up sequence into selection updates.
///
/// The machine has two states: idle, and dragging with an [`ActiveGesture`].
/// All effects are written into the [`SelectionSet`] passed to each entry
/// point; hosts observe them through its revision counter (each entry point
/// also returns whether the selection changed, for convenience).
///
/// See the crate docs for the full gesture vocabulary.
#[derive(Clone, Debug, Default)]
pub struct SelectionGesture {
    config: GestureConfig,
    active: Option<ActiveGesture>,
}

impl SelectionGesture {
    /// Create an idle state machine.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// The configuration this machine was created with.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Whether a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The current gesture's mode, while one is in progress.
    pub fn mode(&self) -> Option<SelectionMode> {
        self.active.as_ref().map(|g| g.mode)
    }

    /// The in-progress outline, once the gesture has formed one.
    ///
    /// Hosts draw this as the selection overlay. `None` while idle and for
    /// gestures that have not left their starting pixel.
    pub fn active_polygon(&self) -> Option<Polygon> {
        self.active
            .as_ref()
            .filter(|g| g.polygon_formed)
            .map(|g| Polygon::new(g.vertices.clone()))
    }

    /// Begin a gesture.
    ///
    /// The primary button starts a freehand lasso; secondary and tertiary
    /// start a rectangle. With [`Modifiers::MULTI_SELECT`] held the gesture
    /// targets a new group appended to the selection; otherwise the
    /// selection is replaced by one empty group that the gesture fills.
    ///
    /// Returns whether the selection changed.
    pub fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        mods: Modifiers,
        selection: &mut SelectionSet,
    ) -> bool {
        let before = selection.revision();
        let mode = match button {
            PointerButton::Primary => SelectionMode::Freehand,
            PointerButton::Secondary | PointerButton::Tertiary => SelectionMode::Rectangle,
        };

        let mut vertices = vec![pos];
        if mode == SelectionMode::Rectangle {
            // The remaining corners start collapsed onto the anchor and get
            // stretched by the drag.
            vertices.extend([pos; 3]);
        }

        let target = if mods.contains(Modifiers::MULTI_SELECT) {
            selection.add_group(SelectionGroup::new())
        } else {
            selection.set_groups(Some(vec![SelectionGroup::new()]));
            0
        };

        self.active = Some(ActiveGesture {
            mode,
            vertices,
            target,
            down_pos: pos,
            last_pos: pos,
            polygon_formed: false,
        });
        selection.revision() != before
    }

    /// Advance a gesture to a new pointer position.
    ///
    /// With [`Modifiers::BRUSH`] held the whole outline is translated by
    /// the movement delta; otherwise the outline is reshaped according to
    /// the gesture's mode. In live-update mode the target group is
    /// re-queried and rewritten immediately.
    ///
    /// Returns whether the selection changed. Ignored while idle.
    pub fn on_pointer_move(
        &mut self,
        pos: Point,
        mods: Modifiers,
        index: &mut MarkerIndex,
        markers: &[Box<dyn Marker>],
        selection: &mut SelectionSet,
    ) -> bool {
        let Some(gesture) = self.active.as_mut() else {
            return false;
        };

        if mods.contains(Modifiers::BRUSH) {
            let delta = pos - gesture.last_pos;
            for v in &mut gesture.vertices {
                *v += delta;
            }
        } else {
            match gesture.mode {
                SelectionMode::Freehand => gesture.vertices.push(pos),
                SelectionMode::Rectangle => {
                    let anchor = gesture.vertices[0];
                    gesture.vertices[1] = Point::new(pos.x, anchor.y);
                    gesture.vertices[2] = pos;
                    gesture.vertices[3] = Point::new(anchor.x, pos.y);
                }
            }
        }
        gesture.last_pos = pos;
        if pos != gesture.down_pos {
            gesture.polygon_formed = true;
        }

        if !gesture.polygon_formed || !self.config.live_update {
            return false;
        }

        let before = selection.revision();
        let polygon = Polygon::new(gesture.vertices.clone());
        let mut found = Vec::new();
        index.query_polygon(markers, &polygon, &mut found);
        selection.set_group_members(gesture.target, found);
        selection.revision() != before
    }

    /// Finish a gesture.
    ///
    /// A gesture that never formed a polygon resolves as a point probe at
    /// `pos`, filling the target group with zero or one record. An empty
    /// outcome without [`Modifiers::MULTI_SELECT`] clears the selection
    /// entirely; a click on empty canvas deselects. A formed polygon is
    /// queried now if live updates were off.
    ///
    /// Returns whether the selection changed. Ignored while idle.
    pub fn on_pointer_up(
        &mut self,
        pos: Point,
        mods: Modifiers,
        index: &mut MarkerIndex,
        markers: &[Box<dyn Marker>],
        selection: &mut SelectionSet,
    ) -> bool {
        let Some(gesture) = self.active.take() else {
            return false;
        };
        let before = selection.revision();

        if !gesture.polygon_formed {
            let found = index.record_at(markers, pos);
            selection.set_group_members(gesture.target, found);
            Self::deselect_if_empty(&gesture, mods, selection);
        } else if !self.config.live_update {
            let polygon = Polygon::new(gesture.vertices.clone());
            let mut found = Vec::new();
            index.query_polygon(markers, &polygon, &mut found);
            selection.set_group_members(gesture.target, found);
        } else {
            Self::deselect_if_empty(&gesture, mods, selection);
        }

        selection.revision() != before
    }

    /// Abandon any gesture in progress without touching the selection.
    ///
    /// For hosts that lose pointer capture (focus loss, window switch).
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// A gesture that caught nothing, without the additive modifier, drops
    /// the selection back to the distinguished "no selection" state rather
    /// than leaving an empty group behind.
    fn deselect_if_empty(gesture: &ActiveGesture, mods: Modifiers, selection: &mut SelectionSet) {
        if mods.contains(Modifiers::MULTI_SELECT) {
            return;
        }
        if selection
            .group(gesture.target)
            .is_some_and(SelectionGroup::is_empty)
        {
            selection.set_groups(None);
        }
    }
}
