// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handing geometry to a renderer.

use kurbo::Affine;
use proscenium_mesh::Mesh;

use crate::{NodeId, Scene};

/// One node to draw.
#[derive(Copy, Clone, Debug)]
pub struct RenderItem<'a> {
    /// The node being drawn.
    pub node: NodeId,
    /// Texture key, if any.
    pub texture: Option<&'a str>,
    /// Geometry in the node's local space.
    pub mesh: &'a Mesh,
    /// Local to scene transform.
    pub transform: Affine,
    /// Combined opacity.
    pub alpha: f64,
    /// Depth from the latest reorder; lower is nearer.
    pub depth: f64,
}

/// Receiver of [`Scene::render`] output.
pub trait RenderSink {
    /// Draw one item. Items arrive back to front.
    fn draw(&mut self, item: RenderItem<'_>);
}

impl Scene {
    /// Feed every renderable node with geometry to `sink`, back to front.
    ///
    /// Hidden subtrees are skipped entirely.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        self.render_node(self.root, sink);
    }

    fn render_node(&self, id: NodeId, sink: &mut dyn RenderSink) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.renderable() {
            return;
        }
        if let Some(mesh) = node.mesh.as_ref() {
            sink.draw(RenderItem {
                node: id,
                texture: node.texture.as_deref(),
                mesh,
                transform: self.global_transform(id).unwrap_or_default(),
                alpha: self.combined_alpha(id).unwrap_or(1.0),
                depth: node.depth,
            });
        }
        for &child in &node.children {
            self.render_node(child, sink);
        }
    }
}
