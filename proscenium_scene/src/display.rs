// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha, visibility and pointer participation.

use crate::{NodeFlags, NodeId, Scene, SceneError};

impl Scene {
    /// Own opacity of `id`.
    #[must_use]
    pub fn alpha(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(|n| n.alpha)
    }

    /// Set the own opacity of `id`.
    pub fn set_alpha(&mut self, id: NodeId, alpha: f64) -> Result<(), SceneError> {
        self.node_mut(id)?.alpha = alpha;
        self.invalidate_alpha(id);
        Ok(())
    }

    /// Opacity of `id` after multiplying in every ancestor's.
    #[must_use]
    pub fn combined_alpha(&self, id: NodeId) -> Option<f64> {
        let node = self.get(id)?;
        if let Some(alpha) = node.cache.combined_alpha.get() {
            return Some(alpha);
        }
        let inherited = node
            .parent
            .and_then(|p| self.combined_alpha(p))
            .unwrap_or(1.0);
        let alpha = inherited * node.alpha;
        node.cache.combined_alpha.set(Some(alpha));
        Some(alpha)
    }

    fn invalidate_alpha(&self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if node.cache.combined_alpha.take().is_none() {
            return;
        }
        for &child in &node.children {
            self.invalidate_alpha(child);
        }
    }

    /// Own switches of `id`.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.get(id).map(|n| n.flags)
    }

    /// Own visibility of `id`.
    #[must_use]
    pub fn visible(&self, id: NodeId) -> Option<bool> {
        self.get(id).map(|n| n.visible())
    }

    /// Show or hide `id` together with its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        if node.visible() == visible {
            return Ok(());
        }
        node.flags.set(NodeFlags::VISIBLE, visible);
        if visible {
            // Geometry was not maintained while hidden.
            node.cache.global.set(None);
            *node.cache.world_hit.get_mut() = None;
        }
        self.refresh_descendants(id);
        Ok(())
    }

    /// Returns `true` if `id` is on the scene and neither it nor any ancestor
    /// is hidden.
    #[must_use]
    pub fn is_renderable(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.renderable())
    }

    /// Whether `id` itself takes part in hit testing.
    #[must_use]
    pub fn mouse_enabled(&self, id: NodeId) -> Option<bool> {
        self.get(id).map(|n| n.mouse_enabled())
    }

    /// Include `id` in or exclude it from hit testing.
    pub fn set_mouse_enabled(&mut self, id: NodeId, enabled: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.flags.set(NodeFlags::MOUSE_ENABLED, enabled);
        self.sync_mouse(id);
        Ok(())
    }

    /// Whether descendants of `id` may receive pointer events.
    #[must_use]
    pub fn mouse_children(&self, id: NodeId) -> Option<bool> {
        self.get(id).map(|n| n.mouse_children())
    }

    /// Let descendants of `id` receive pointer events of their own, or not.
    ///
    /// When they may not, the pointer falls through them to whatever lies
    /// behind.
    pub fn set_mouse_children(&mut self, id: NodeId, enabled: bool) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        if node.mouse_children() == enabled {
            return Ok(());
        }
        node.flags.set(NodeFlags::MOUSE_CHILDREN, enabled);
        self.refresh_descendants(id);
        Ok(())
    }

    /// Returns `true` if pointer hit testing may pick `id`: it is on the scene,
    /// renderable, mouse-enabled and no ancestor withholds pointer events from
    /// its descendants.
    #[must_use]
    pub fn is_clickable(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.clickable())
    }

    /// Depth assigned to `id` by the latest reorder; lower is nearer the viewer.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(|n| n.depth)
    }
}
