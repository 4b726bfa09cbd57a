// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree structure: creation, destruction, parenting and child order.
//!
//! Every mutation validates its arguments before touching the tree, so an
//! error leaves the scene as it was.

use tracing::{debug, trace};

use crate::behavior::Notice;
use crate::node::Node;
use crate::{NodeId, Scene, SceneError};

impl Scene {
    /// Create a detached node.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let node = Node::new(name.into(), self.default_flags());
        let id = self.alloc(node);
        trace!(?id, "node created");
        id
    }

    /// Destroy `id`.
    ///
    /// The node is removed from its parent and its children are detached; they
    /// stay alive as roots of their own subtrees. Listeners, tweens and the
    /// behavior of the node go with it and the id becomes stale. Hooks of the
    /// destroyed node itself do not run.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootNotAllowed("destroyed"));
        }
        self.node(id)?;
        let mut notices = Vec::new();
        for child in self.children(id).to_vec() {
            self.relink(child, None, &mut notices);
        }
        if self.parent(id).is_some() {
            self.relink(id, None, &mut notices);
        }
        self.forget_node(id);
        debug!(?id, "node destroyed");
        self.deliver(notices);
        Ok(())
    }

    /// Destroy `id` together with all of its descendants.
    pub fn destroy_subtree(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootNotAllowed("destroyed"));
        }
        self.node(id)?;
        let doomed = self.subtree(id);
        let mut notices = Vec::new();
        if self.parent(id).is_some() {
            self.relink(id, None, &mut notices);
        }
        for &node in doomed.iter().rev() {
            self.forget_node(node);
        }
        debug!(?id, count = doomed.len(), "subtree destroyed");
        self.deliver(notices);
        Ok(())
    }

    fn forget_node(&mut self, id: NodeId) {
        self.mouse.remove(id);
        self.pointer.forget(id);
        self.release(id);
    }

    /// Append `child` to the children of `parent`, in front of its siblings.
    ///
    /// A node that already is a child of `parent` only moves to the end, without
    /// lifecycle hooks. Otherwise the node is first detached from its current
    /// parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.check_new_child(parent, child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        if let Some(at) = siblings.iter().position(|&c| c == child) {
            siblings.remove(at);
            siblings.push(child);
            self.order_dirty = true;
            return Ok(());
        }
        let at = siblings.len();
        let mut notices = Vec::new();
        self.relink(child, Some((parent, at)), &mut notices);
        self.deliver(notices);
        Ok(())
    }

    /// Insert `child` among the children of `parent` at `index`.
    ///
    /// `index` must name an existing position, so `parent` needs at least one
    /// child already; use [`Scene::add_child`] to append. A node that already is
    /// a child of `parent` moves to `index` without lifecycle hooks.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        self.check_new_child(parent, child)?;
        let len = self.num_children(parent);
        if index >= len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        if self.parent(child) == Some(parent) {
            return self.set_child_index(parent, child, index);
        }
        let mut notices = Vec::new();
        self.relink(child, Some((parent, index)), &mut notices);
        self.deliver(notices);
        Ok(())
    }

    fn check_new_child(&self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.root {
            return Err(SceneError::RootNotAllowed("added as a child"));
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }
        Ok(())
    }

    /// Detach `child` from `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(parent)?;
        self.node(child)?;
        let index = self.index_of(parent, child)?;
        self.remove_child_at(parent, index).map(|_| ())
    }

    /// Detach the child of `parent` at `index` and return it.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, SceneError> {
        let children = &self.node(parent)?.children;
        let child = *children.get(index).ok_or(SceneError::IndexOutOfRange {
            index,
            len: children.len(),
        })?;
        let mut notices = Vec::new();
        self.relink(child, None, &mut notices);
        self.deliver(notices);
        Ok(child)
    }

    /// Detach the children of `parent` from `begin` to `end` inclusive.
    ///
    /// `end` is clamped to the last child. Returns how many children were
    /// removed.
    pub fn remove_children(
        &mut self,
        parent: NodeId,
        begin: usize,
        end: usize,
    ) -> Result<usize, SceneError> {
        let len = self.node(parent)?.children.len();
        if len == 0 {
            return Err(SceneError::EmptyChildren(parent));
        }
        if begin >= len {
            return Err(SceneError::IndexOutOfRange { index: begin, len });
        }
        if end < begin {
            return Err(SceneError::InvalidRange { begin, end });
        }
        let end = end.min(len - 1);
        let doomed = self.children(parent)[begin..=end].to_vec();
        let mut notices = Vec::new();
        for &child in &doomed {
            self.relink(child, None, &mut notices);
        }
        self.deliver(notices);
        Ok(doomed.len())
    }

    /// Detach every child of `parent`, returning how many there were.
    pub fn remove_all_children(&mut self, parent: NodeId) -> Result<usize, SceneError> {
        if self.node(parent)?.children.is_empty() {
            return Ok(0);
        }
        self.remove_children(parent, 0, usize::MAX)
    }

    /// Move `child` to `index` among its siblings.
    pub fn set_child_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        self.node(child)?;
        let from = self.index_of(parent, child)?;
        let children = &mut self.node_mut(parent)?.children;
        if index >= children.len() {
            return Err(SceneError::IndexOutOfRange {
                index,
                len: children.len(),
            });
        }
        let moved = children.remove(from);
        children.insert(index, moved);
        self.order_dirty = true;
        trace!(?parent, ?child, from, to = index, "child index set");
        Ok(())
    }

    /// Exchange the positions of two children of `parent`.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Result<(), SceneError> {
        self.node(a)?;
        self.node(b)?;
        let i = self.index_of(parent, a)?;
        let j = self.index_of(parent, b)?;
        self.swap_children_at(parent, i, j)
    }

    /// Exchange the children of `parent` at positions `i` and `j`.
    pub fn swap_children_at(&mut self, parent: NodeId, i: usize, j: usize) -> Result<(), SceneError> {
        let children = &mut self.node_mut(parent)?.children;
        let len = children.len();
        for index in [i, j] {
            if index >= len {
                return Err(SceneError::IndexOutOfRange { index, len });
            }
        }
        children.swap(i, j);
        self.order_dirty = true;
        Ok(())
    }

    fn index_of(&self, parent: NodeId, child: NodeId) -> Result<usize, SceneError> {
        self.node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(SceneError::NotAChild { parent, child })
    }

    /// Move `child` below `target` at the given position, or detach it.
    ///
    /// Updates inherited state, caches and the mouse registry, and queues the
    /// lifecycle notices for the whole moved subtree.
    fn relink(
        &mut self,
        child: NodeId,
        target: Option<(NodeId, usize)>,
        notices: &mut Vec<Notice>,
    ) {
        let Some(node) = self.get_mut(child) else {
            return;
        };
        let was_on_scene = node.on_scene;
        let old_parent = node.parent.take();
        let subtree = self.subtree(child);

        if let Some(old) = old_parent {
            if let Some(parent) = self.get_mut(old) {
                parent.children.retain(|&c| c != child);
            }
            self.invalidate_bounds(old);
            notices.extend(subtree.iter().map(|&n| Notice::Detached(n)));
            trace!(?child, parent = ?old, "child removed");
        }

        let inherited = match target {
            Some((parent, index)) => {
                let Some(p) = self.get_mut(parent) else {
                    return;
                };
                let index = index.min(p.children.len());
                p.children.insert(index, child);
                let inherited = (p.visible_to_children(), p.mouse_to_children(), p.on_scene);
                if let Some(node) = self.get_mut(child) {
                    node.parent = Some(parent);
                }
                self.invalidate_bounds(parent);
                notices.extend(subtree.iter().map(|&n| Notice::Attached(n)));
                trace!(?child, ?parent, index, "child added");
                inherited
            }
            None => (true, true, false),
        };
        let (visible, mouse, on_scene) = inherited;
        self.inherit(child, visible, mouse, on_scene);

        if was_on_scene != on_scene {
            let notice = if on_scene {
                Notice::EnteredScene
            } else {
                Notice::LeftScene
            };
            notices.extend(subtree.iter().map(|&n| notice(n)));
        }
        self.order_dirty = true;
    }

    /// Push inherited flags into `id` and its descendants, dropping their
    /// cached transforms and keeping the mouse registry in sync.
    pub(crate) fn inherit(&mut self, id: NodeId, visible: bool, mouse: bool, on_scene: bool) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.ancestors_visible = visible;
        node.ancestors_permit_mouse = mouse;
        node.on_scene = on_scene;
        node.cache.global.set(None);
        node.cache.combined_alpha.set(None);
        *node.cache.world_hit.get_mut() = None;
        let (visible, mouse) = (node.visible_to_children(), node.mouse_to_children());
        self.sync_mouse(id);
        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.inherit(child, visible, mouse, on_scene);
            i += 1;
        }
    }

    /// Re-derive the inherited state of the descendants of `id`.
    pub(crate) fn refresh_descendants(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (visible, mouse, on_scene) = (
            node.visible_to_children(),
            node.mouse_to_children(),
            node.on_scene,
        );
        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.inherit(child, visible, mouse, on_scene);
            i += 1;
        }
    }

    /// `id` followed by all of its descendants, parents before children.
    pub(crate) fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.get(next) else {
                continue;
            };
            out.push(next);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Display name of `id`.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// Rename `id`.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), SceneError> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Parent of `id`; `None` for the root, detached nodes and stale ids.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id`, back to front. Empty for stale ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Number of direct children of `id`.
    #[must_use]
    pub fn num_children(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Number of nodes below `id`.
    #[must_use]
    pub fn num_descendants(&self, id: NodeId) -> usize {
        self.subtree(id).len().saturating_sub(1)
    }

    /// Returns `true` if `child` is a direct child of `parent`.
    #[must_use]
    pub fn contains(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_alive(parent) && self.parent(child) == Some(parent)
    }

    /// Returns `true` if `ancestor` lies strictly above `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Child of `parent` at `index`.
    #[must_use]
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// First child of `parent` named `name`.
    #[must_use]
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.name(c) == Some(name))
    }

    /// Position of `child` among the children of `parent`, or `-1`.
    #[must_use]
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> isize {
        self.children(parent)
            .iter()
            .position(|&c| c == child)
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// Returns `true` if `id` is connected to the root.
    #[must_use]
    pub fn is_on_scene(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.on_scene)
    }
}
