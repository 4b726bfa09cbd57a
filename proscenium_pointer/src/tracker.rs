// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer transition tracking between ticks.
//!
//! Each tick, call [`PointerState::update`] with the node under the pointer, the
//! pointer position and the button state. Transitions are produced in a fixed
//! order:
//!
//! 1. When the hit target changed: [`PointerTransition::Out`] for the previous
//!    target and [`PointerTransition::Over`] for the new one.
//! 2. Otherwise, when the pointer moved: [`PointerTransition::Move`].
//! 3. On press: [`PointerTransition::Down`]. The target becomes the press origin.
//! 4. On release: [`PointerTransition::Up`] for the current target, then
//!    [`PointerTransition::ReleaseOutside`] for the press origin if it differs.

use kurbo::Point;
use smallvec::SmallVec;

/// One synthesized pointer transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerTransition<K> {
    /// The pointer left this node.
    Out(K),
    /// The pointer entered this node.
    Over(K),
    /// The pointer moved while staying over this node.
    Move(K),
    /// The button was pressed over this node.
    Down(K),
    /// The button was released over this node.
    Up(K),
    /// The button was released elsewhere after being pressed over this node.
    ReleaseOutside(K),
}

impl<K: Copy> PointerTransition<K> {
    /// The node the transition is delivered to.
    #[must_use]
    pub fn node(&self) -> K {
        match *self {
            Self::Out(k)
            | Self::Over(k)
            | Self::Move(k)
            | Self::Down(k)
            | Self::Up(k)
            | Self::ReleaseOutside(k) => k,
        }
    }
}

/// Transitions produced by one update; rarely more than four.
pub type Transitions<K> = SmallVec<[PointerTransition<K>; 4]>;

/// Pointer tracking state carried from one tick to the next.
#[derive(Clone, Debug)]
pub struct PointerState<K> {
    hover: Option<K>,
    position: Option<Point>,
    pressed: bool,
    press_origin: Option<K>,
}

impl<K> Default for PointerState<K> {
    fn default() -> Self {
        Self {
            hover: None,
            position: None,
            pressed: false,
            press_origin: None,
        }
    }
}

impl<K: Copy + PartialEq> PointerState<K> {
    /// Create a tracker with no previous sample.
    ///
    /// The first update reports [`PointerTransition::Over`] for whatever it hits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker that considers `node` to be hovered already.
    ///
    /// Use this with the scene root so that nothing is reported while the
    /// pointer rests over empty space.
    pub fn with_hover(node: K) -> Self {
        Self {
            hover: Some(node),
            ..Self::default()
        }
    }

    /// Node hit by the latest sample.
    #[must_use]
    pub fn hover(&self) -> Option<K> {
        self.hover
    }

    /// Node the button was pressed over, while it is held.
    #[must_use]
    pub fn press_origin(&self) -> Option<K> {
        self.press_origin
    }

    /// Button state of the latest sample.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Position of the latest sample.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Feed a new sample and return the resulting transitions.
    pub fn update(&mut self, hit: K, position: Point, pressed: bool) -> Transitions<K> {
        let mut out = Transitions::new();
        let moved = self.position.is_some_and(|last| last != position);

        match self.hover {
            Some(prev) if prev == hit => {
                if moved {
                    out.push(PointerTransition::Move(hit));
                }
            }
            Some(prev) => {
                out.push(PointerTransition::Out(prev));
                out.push(PointerTransition::Over(hit));
            }
            None => out.push(PointerTransition::Over(hit)),
        }

        if pressed && !self.pressed {
            out.push(PointerTransition::Down(hit));
            self.press_origin = Some(hit);
        } else if !pressed && self.pressed {
            out.push(PointerTransition::Up(hit));
            if let Some(origin) = self.press_origin.take()
                && origin != hit
            {
                out.push(PointerTransition::ReleaseOutside(origin));
            }
        }

        self.hover = Some(hit);
        self.position = Some(position);
        self.pressed = pressed;
        out
    }

    /// Adopt a sample without producing transitions.
    ///
    /// Used when tracking resumes after a pause so that a button held during the
    /// pause is not reported as a fresh press.
    pub fn resync(&mut self, position: Point, pressed: bool) {
        self.position = Some(position);
        self.pressed = pressed;
    }

    /// Forget the press origin so no release-outside is reported for it.
    pub fn cancel_press(&mut self) {
        self.press_origin = None;
    }

    /// Forget `node` wherever it is referenced, for instance after it was destroyed.
    pub fn forget(&mut self, node: K) {
        if self.hover == Some(node) {
            self.hover = None;
        }
        if self.press_origin == Some(node) {
            self.press_origin = None;
        }
    }
}
