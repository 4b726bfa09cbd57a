// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listeners on nodes and dispatch through the tree.
//!
//! Events travel along the chain from the target up to the root or the top of
//! its detached subtree, in three phases; see [`proscenium_events::propagate`].
//! Listeners are keyed by event name and payload type.

use kurbo::Point;
use proscenium_events::{Event, Listener, propagate};

use crate::{NodeId, Scene, SceneError};

/// Pressed over a node. Bubbles.
pub const MOUSE_DOWN: &str = "mouse_down";
/// Moved while staying over a node. Does not bubble.
pub const MOUSE_MOVE: &str = "mouse_move";
/// Released over a node. Bubbles.
pub const MOUSE_UP: &str = "mouse_up";
/// Released elsewhere after a press over this node. Bubbles.
pub const RELEASE_OUTSIDE: &str = "release_outside";
/// Entered a node. Does not bubble.
pub const MOUSE_OVER: &str = "mouse_over";
/// Left a node. Does not bubble.
pub const MOUSE_OUT: &str = "mouse_out";

/// Payload of pointer events.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerData {
    /// Pointer in the local space of the node the event was dispatched at.
    pub local: Point,
    /// Pointer in scene space.
    pub scene: Point,
}

/// A listener on a scene node for payload `D`.
pub type NodeListener<D> = Listener<Scene, NodeId, D>;

/// An event travelling through a scene with payload `D`.
pub type NodeEvent<D> = Event<NodeId, D>;

/// A synthesized pointer event.
pub type PointerEvent = NodeEvent<PointerData>;

impl Scene {
    /// Register `listener` on `node` for events named `name` with payload `D`.
    ///
    /// Lower `priority` runs first; equal priorities run in registration order.
    pub fn add_listener<D: 'static>(
        &mut self,
        node: NodeId,
        name: &str,
        listener: NodeListener<D>,
        use_capture: bool,
        priority: i32,
    ) -> Result<(), SceneError> {
        self.node_mut(node)?
            .listeners
            .add(name, listener, use_capture, priority);
        Ok(())
    }

    /// Remove `listener` from `node` where it was registered with the same
    /// capture flag, returning how many registrations went away.
    pub fn remove_listener<D: 'static>(
        &mut self,
        node: NodeId,
        name: &str,
        listener: &NodeListener<D>,
        use_capture: bool,
    ) -> usize {
        self.get_mut(node)
            .map_or(0, |n| n.listeners.remove(name, listener, use_capture))
    }

    /// Returns `true` if `node` itself listens for `name` with payload `D`.
    #[must_use]
    pub fn has_listener<D: 'static>(&self, node: NodeId, name: &str) -> bool {
        self.get(node).is_some_and(|n| n.listeners.has::<D>(name))
    }

    /// Returns `true` if `node` or any of its descendants listens for `name`
    /// with payload `D`.
    ///
    /// This is conservative: a descendant's listener also counts when the
    /// event would not reach it, for instance when it does not bubble.
    #[must_use]
    pub fn will_trigger<D: 'static>(&self, node: NodeId, name: &str) -> bool {
        self.has_listener::<D>(node, name)
            || self
                .children(node)
                .iter()
                .any(|&c| self.will_trigger::<D>(c, name))
    }

    /// Dispatch `event` at `target`.
    pub fn dispatch_event<D: 'static>(
        &mut self,
        target: NodeId,
        event: &mut NodeEvent<D>,
    ) -> Result<(), SceneError> {
        self.node(target)?;
        self.dispatch(target, event);
        Ok(())
    }

    pub(crate) fn dispatch<D: 'static>(&mut self, target: NodeId, event: &mut NodeEvent<D>) {
        let mut chain = vec![target];
        let mut cursor = self.parent(target);
        while let Some(node) = cursor {
            chain.push(node);
            cursor = self.parent(node);
        }
        let name = event.name().to_owned();
        propagate(self, &chain, event, |scene, node, phase| {
            scene
                .get(node)
                .map(|n| n.listeners.snapshot::<D>(&name, phase))
                .unwrap_or_default()
        });
    }
}
