// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: keep a node at a fixed offset from the pointer.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragState::start`], passing the pointer and the node
//!    origin in the same coordinate space (usually the parent's), or with
//!    [`DragState::start_centered`] to snap the node origin to the pointer.
//! 2) Each tick, call [`DragState::follow`] with the pointer position to get the
//!    node's new origin.
//! 3) End the drag with [`DragState::end`]; ending twice is harmless.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use proscenium_pointer::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Grab a node sitting at (10, 10) with the pointer at (12, 13).
//! drag.start(Point::new(12.0, 13.0), Point::new(10.0, 10.0));
//! assert!(drag.is_dragging());
//!
//! // The node keeps its offset to the pointer.
//! assert_eq!(drag.follow(Point::new(20.0, 20.0)), Some(Point::new(18.0, 17.0)));
//!
//! drag.end();
//! assert_eq!(drag.follow(Point::new(0.0, 0.0)), None);
//! ```

use kurbo::{Point, Vec2};

/// Tracks the grab offset of an interactive drag.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    /// Pointer position minus node origin at grab time, while dragging.
    pub grab_offset: Option<Vec2>,
}

impl DragState {
    /// Start dragging, preserving the offset between `pointer` and `origin`.
    pub fn start(&mut self, pointer: Point, origin: Point) {
        self.grab_offset = Some(pointer - origin);
    }

    /// Start dragging with the node origin locked to the pointer.
    pub fn start_centered(&mut self) {
        self.grab_offset = Some(Vec2::ZERO);
    }

    /// Where the node origin should be for the given pointer position.
    #[must_use]
    pub fn follow(&self, pointer: Point) -> Option<Point> {
        self.grab_offset.map(|grab| pointer - grab)
    }

    /// End the drag and reset state.
    pub fn end(&mut self) {
        self.grab_offset = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }
}
