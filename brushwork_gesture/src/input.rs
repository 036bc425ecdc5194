// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input vocabulary: buttons and modifier flags.
//!
//! Hosts translate their windowing layer's events into these before calling
//! the gesture state machine; nothing here depends on any particular event
//! source.

/// Which pointer button went down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// The primary (usually left) button. Starts a freehand lasso.
    Primary,
    /// The secondary (usually right) button. Starts a rectangle selection.
    Secondary,
    /// The tertiary (usually middle) button. Starts a rectangle selection.
    Tertiary,
}

bitflags::bitflags! {
    /// Modifier keys observed while a selection gesture is in progress.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Additive selection: the gesture targets a new group appended to
        /// the existing selection instead of replacing it.
        const MULTI_SELECT = 1 << 0;
        /// Brush mode: drags translate the whole in-progress outline
        /// instead of reshaping it.
        const BRUSH = 1 << 1;
    }
}
