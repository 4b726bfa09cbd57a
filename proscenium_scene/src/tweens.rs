// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tweening node properties.
//!
//! ```
//! use kurbo::Point;
//! use proscenium_scene::{Scene, props};
//! use proscenium_tween::{Tween, easing};
//!
//! let mut scene = Scene::default();
//! let ball = scene.create_node("ball");
//! scene.add_child(scene.root(), ball).unwrap();
//!
//! let handle = scene
//!     .tween(Tween::new(ball, props::x(), 10.0, 2.0).with_easing(easing::linear))
//!     .unwrap();
//! scene.advance(0.0);
//! scene.advance(1.0);
//! assert_eq!(scene.x(ball), Some(5.0));
//! scene.advance(1.0);
//! assert_eq!(scene.position(ball), Some(Point::new(10.0, 0.0)));
//! assert!(handle.is_complete());
//! ```

use proscenium_tween::{Property, Tween, TweenHandle, TweenHost};
use tracing::warn;

use crate::{NodeId, Scene, SceneError};

impl TweenHost for Scene {
    type Target = NodeId;

    fn clock_time(&self, target: NodeId) -> Option<f64> {
        self.time_of(target)
    }
}

impl Scene {
    /// Start `tween`, timed by the clock of its target.
    pub fn tween(&mut self, tween: Tween<Self>) -> Result<TweenHandle, SceneError> {
        let target = tween.target();
        self.node(target)?;
        let start_time = self.time_of(target).unwrap_or_default();
        Ok(self.tweens.schedule_at(start_time, tween))
    }

    /// Number of tweens in progress.
    ///
    /// During an advance this includes the tweens still being stepped, so a
    /// tween callback sees the tween that called it.
    #[must_use]
    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    /// Abandon every tween in progress.
    ///
    /// From a tween callback this also stops the tweens the current advance
    /// has not reached yet.
    pub fn stop_all_tweens(&mut self) {
        self.tweens.clear();
    }
}

/// Properties of scene nodes that tweens can drive.
///
/// A write the node rejects, such as an easing overshoot that would drive a
/// scale through zero, is skipped and logged.
pub mod props {
    use super::*;

    fn checked(
        name: &'static str,
        get: fn(&Scene, NodeId) -> Option<f64>,
        set: fn(&mut Scene, NodeId, f64) -> Result<(), SceneError>,
    ) -> Property<Scene> {
        Property::new(
            name,
            move |scene: &Scene, node| get(scene, node).unwrap_or_default(),
            move |scene: &mut Scene, node, value| {
                if let Err(err) = set(scene, node, value) {
                    warn!(?node, property = name, value, %err, "tween write rejected");
                }
            },
        )
    }

    /// Horizontal position.
    pub fn x() -> Property<Scene> {
        checked("x", Scene::x, Scene::set_x)
    }

    /// Vertical position.
    pub fn y() -> Property<Scene> {
        checked("y", Scene::y, Scene::set_y)
    }

    /// Rotation in radians.
    pub fn rotation() -> Property<Scene> {
        checked("rotation", Scene::rotation, Scene::set_rotation)
    }

    /// Horizontal scale.
    pub fn scale_x() -> Property<Scene> {
        checked("scale_x", Scene::scale_x, Scene::set_scale_x)
    }

    /// Vertical scale.
    pub fn scale_y() -> Property<Scene> {
        checked("scale_y", Scene::scale_y, Scene::set_scale_y)
    }

    /// Own opacity.
    pub fn alpha() -> Property<Scene> {
        checked("alpha", Scene::alpha, Scene::set_alpha)
    }

    /// Width, through horizontal scale.
    pub fn width() -> Property<Scene> {
        checked("width", Scene::width, Scene::set_width)
    }

    /// Height, through vertical scale.
    pub fn height() -> Property<Scene> {
        checked("height", Scene::height, Scene::set_height)
    }
}

/// Tween callback that makes the target visible, for [`Tween::on_start`].
pub fn show(scene: &mut Scene, node: NodeId) {
    if let Err(err) = scene.set_visible(node, true) {
        warn!(?node, %err, "tween could not show its target");
    }
}

/// Tween callback that hides the target, for [`Tween::on_end`].
pub fn hide(scene: &mut Scene, node: NodeId) {
    if let Err(err) = scene.set_visible(node, false) {
        warn!(?node, %err, "tween could not hide its target");
    }
}
