// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit testing and event synthesis.
//!
//! Nodes that are mouse-enabled and on the scene are kept in a registry sorted
//! by depth, nearest first. Hit testing walks that registry and takes the
//! first node that is clickable, whose scene-space bounds contain the point
//! and whose hit mesh contains it. When nothing matches, the root is hit.

use core::mem;

use hashbrown::HashSet;
use kurbo::Point;
use proscenium_events::Event;
use proscenium_mesh::rect_contains;
use proscenium_pointer::tracker::PointerTransition;
use tracing::trace;

use crate::events::{
    MOUSE_DOWN, MOUSE_MOVE, MOUSE_OUT, MOUSE_OVER, MOUSE_UP, PointerData, RELEASE_OUTSIDE,
};
use crate::{NodeId, Scene, SceneError};

/// One reading of the pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Position in scene space.
    pub position: Point,
    /// Primary button held.
    pub pressed: bool,
}

/// A pointer polled once per tick.
pub trait PointerDevice {
    /// Current position and button state.
    fn sample(&mut self) -> PointerSample;
}

impl<F: FnMut() -> PointerSample> PointerDevice for F {
    fn sample(&mut self) -> PointerSample {
        self()
    }
}

#[derive(Debug, Default)]
pub(crate) struct MouseRegistry {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl MouseRegistry {
    fn insert(&mut self, id: NodeId) -> bool {
        let added = self.members.insert(id);
        if added {
            self.order.push(id);
        }
        added
    }

    pub(crate) fn remove(&mut self, id: NodeId) {
        if self.members.remove(&id) {
            self.order.retain(|&n| n != id);
        }
    }
}

impl Scene {
    /// Install the pointer sampled by [`Scene::advance`].
    pub fn set_pointer_device(&mut self, device: impl PointerDevice + 'static) {
        self.device = Some(Box::new(device));
    }

    /// Remove the pointer device; pointer events stop.
    pub fn clear_pointer_device(&mut self) {
        self.device = None;
    }

    /// Latest sampled pointer position in scene space.
    #[must_use]
    pub fn pointer_scene_position(&self) -> Point {
        self.pointer_position
    }

    /// Latest sampled pointer position in the local space of `id`.
    pub fn pointer_position(&self, id: NodeId) -> Result<Point, SceneError> {
        if !self.node(id)?.on_scene {
            return Err(SceneError::NotOnScene(id));
        }
        self.global_to_local(id, self.pointer_position)
            .ok_or(SceneError::StaleNode(id))
    }

    /// Node the pointer was over at the latest tick.
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.pointer.hover()
    }

    /// Nodes currently eligible for hit testing, nearest first.
    ///
    /// The order reflects the latest reorder.
    #[must_use]
    pub fn mouse_targets(&self) -> &[NodeId] {
        &self.mouse.order
    }

    pub(crate) fn sync_mouse(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            self.mouse.remove(id);
            return;
        };
        if node.on_scene && node.mouse_enabled() {
            if self.mouse.insert(id) {
                self.order_dirty = true;
            }
        } else {
            self.mouse.remove(id);
        }
    }

    /// Frontmost clickable node under `point`, or the root.
    ///
    /// `point` is in scene space. Reassigns depths first if the child order
    /// changed since the last tick.
    pub fn hit_test(&mut self, point: Point) -> NodeId {
        if self.order_dirty {
            self.reorder();
        }
        self.mouse
            .order
            .iter()
            .copied()
            .find(|&id| self.hits(id, point))
            .unwrap_or(self.root)
    }

    fn hits(&self, id: NodeId, point: Point) -> bool {
        if !self.is_clickable(id) {
            return false;
        }
        self.with_world_hit(id, |hit| {
            hit.bounds.is_some_and(|b| rect_contains(b, point)) && hit.mesh.contains(point)
        })
        .unwrap_or(false)
    }

    /// Assign depths in draw order and re-sort the mouse registry.
    ///
    /// Each child sits one layer spacing plus the thickness of its earlier
    /// siblings' subtrees in front of its parent. Lower depth is nearer.
    pub(crate) fn reorder(&mut self) {
        let spacing = self.options.layer_spacing;
        self.assign_depth(self.root, 0.0, spacing);
        let mut order = mem::take(&mut self.mouse.order);
        order.sort_by(|&a, &b| {
            let da = self.get(a).map_or(f64::INFINITY, |n| n.depth);
            let db = self.get(b).map_or(f64::INFINITY, |n| n.depth);
            da.total_cmp(&db)
        });
        self.mouse.order = order;
        self.order_dirty = false;
        trace!(targets = self.mouse.order.len(), "depths reassigned");
    }

    /// Returns the thickness of the subtree.
    fn assign_depth(&mut self, id: NodeId, depth: f64, spacing: f64) -> f64 {
        let Some(node) = self.get_mut(id) else {
            return 0.0;
        };
        node.depth = depth;
        let mut thickness = spacing;
        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            thickness += self.assign_depth(child, depth - thickness, spacing);
            i += 1;
        }
        thickness
    }

    pub(crate) fn sample_pointer(&mut self) {
        if !self.input_enabled {
            return;
        }
        let Some(device) = self.device.as_mut() else {
            return;
        };
        let sample = device.sample();
        self.pointer_position = sample.position;
        let hit = self.hit_test(sample.position);
        let transitions = self.pointer.update(hit, sample.position, sample.pressed);
        for transition in transitions {
            trace!(?transition, "pointer");
            self.deliver_pointer(transition, sample.position);
        }
    }

    fn deliver_pointer(&mut self, transition: PointerTransition<NodeId>, scene: Point) {
        let (name, bubbles) = match transition {
            PointerTransition::Out(_) => (MOUSE_OUT, false),
            PointerTransition::Over(_) => (MOUSE_OVER, false),
            PointerTransition::Move(_) => (MOUSE_MOVE, false),
            PointerTransition::Down(_) => (MOUSE_DOWN, true),
            PointerTransition::Up(_) => (MOUSE_UP, true),
            PointerTransition::ReleaseOutside(_) => (RELEASE_OUTSIDE, true),
        };
        let target = transition.node();
        let Some(local) = self.global_to_local(target, scene) else {
            return;
        };
        let mut event = Event::new(name, PointerData { local, scene }).with_bubbles(bubbles);
        self.dispatch(target, &mut event);
    }
}
