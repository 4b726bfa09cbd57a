// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node frame and lifecycle hooks.

use crate::{NodeId, Scene, SceneError};

/// Custom logic attached to a node.
///
/// Every hook defaults to doing nothing. Hooks get the whole scene, so they may
/// move, create or destroy nodes, including their own. While a hook runs, the
/// behavior is detached from its node; installing a new behavior on the same
/// node from inside a hook replaces this one.
///
/// Lifecycle hooks run after the tree mutation that caused them has completed.
pub trait Behavior: 'static {
    /// Called once per tick, parents before children.
    fn enter_frame(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// Called once per tick after pointer events and tweens, children before
    /// parents.
    fn exit_frame(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// The node, or one of its ancestors, was given a parent.
    fn attached(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// The node, or one of its ancestors, lost its parent.
    fn detached(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// The node became connected to the scene root.
    fn entered_scene(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// The node is no longer connected to the scene root.
    fn left_scene(&mut self, _scene: &mut Scene, _node: NodeId) {}
}

/// A lifecycle transition waiting to be delivered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Attached(NodeId),
    Detached(NodeId),
    EnteredScene(NodeId),
    LeftScene(NodeId),
}

impl Scene {
    /// Install `behavior` on `node`, returning the one it replaces.
    pub fn set_behavior(
        &mut self,
        node: NodeId,
        behavior: impl Behavior,
    ) -> Result<Option<Box<dyn Behavior>>, SceneError> {
        Ok(self.node_mut(node)?.behavior.replace(Box::new(behavior)))
    }

    /// Remove and return the behavior of `node`.
    pub fn take_behavior(&mut self, node: NodeId) -> Option<Box<dyn Behavior>> {
        self.get_mut(node)?.behavior.take()
    }

    /// Returns `true` if `node` carries a behavior.
    #[must_use]
    pub fn has_behavior(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|n| n.behavior.is_some())
    }

    pub(crate) fn with_behavior(
        &mut self,
        id: NodeId,
        hook: impl FnOnce(&mut dyn Behavior, &mut Self),
    ) {
        let Some(mut behavior) = self.get_mut(id).and_then(|n| n.behavior.take()) else {
            return;
        };
        hook(behavior.as_mut(), self);
        if let Some(node) = self.get_mut(id)
            && node.behavior.is_none()
        {
            node.behavior = Some(behavior);
        }
    }

    pub(crate) fn deliver(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            match notice {
                Notice::Attached(id) => self.with_behavior(id, |b, s| b.attached(s, id)),
                Notice::Detached(id) => self.with_behavior(id, |b, s| b.detached(s, id)),
                Notice::EnteredScene(id) => {
                    self.with_behavior(id, |b, s| b.entered_scene(s, id));
                }
                Notice::LeftScene(id) => self.with_behavior(id, |b, s| b.left_scene(s, id)),
            }
        }
    }
}
