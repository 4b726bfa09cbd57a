// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node storage.

use core::cell::{Cell, RefCell};

use kurbo::{Affine, Point, Rect, Vec2};
use proscenium_events::ListenerRegistry;
use proscenium_mesh::{Mesh, NineSlice};
use proscenium_pointer::drag::DragState;

use crate::{Behavior, ClockId, NodeFlags, NodeId, PhysicsBody, PhysicsWorld, Scene};

/// Hit geometry in scene space, cached alongside the global transform.
#[derive(Clone, Debug)]
pub(crate) struct WorldHit {
    pub(crate) mesh: Mesh,
    pub(crate) bounds: Option<Rect>,
}

/// Lazily rebuilt derived state.
///
/// Invariants that let invalidation stop early:
/// - If `global` or `combined_alpha` is empty, it is empty for every
///   descendant as well.
/// - If `bounds` is empty, it is empty for every ancestor as well.
#[derive(Debug, Default)]
pub(crate) struct NodeCache {
    pub(crate) local: Cell<Option<Affine>>,
    pub(crate) global: Cell<Option<Affine>>,
    pub(crate) combined_alpha: Cell<Option<f64>>,
    /// Union of own and descendant geometry in this node's local space.
    pub(crate) bounds: Cell<Option<Option<Rect>>>,
    pub(crate) world_hit: RefCell<Option<WorldHit>>,
}

pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    pub(crate) position: Point,
    pub(crate) rotation: f64,
    pub(crate) scale: Vec2,

    pub(crate) flags: NodeFlags,
    /// Every ancestor is visible.
    pub(crate) ancestors_visible: bool,
    /// Every ancestor lets its descendants receive pointer events.
    pub(crate) ancestors_permit_mouse: bool,
    /// Connected to the scene root.
    pub(crate) on_scene: bool,
    pub(crate) alpha: f64,

    pub(crate) mesh: Option<Mesh>,
    /// Rebuilds `mesh` whenever the scale changes.
    pub(crate) nine_slice: Option<NineSlice>,
    pub(crate) hit_area: Option<Mesh>,
    pub(crate) texture: Option<String>,
    pub(crate) clock: Option<ClockId>,
    pub(crate) depth: f64,

    pub(crate) listeners: ListenerRegistry<Scene, NodeId>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) body: Option<Box<dyn PhysicsBody>>,
    pub(crate) world: Option<Box<dyn PhysicsWorld>>,
    pub(crate) drag: DragState,

    pub(crate) cache: NodeCache,
}

impl Node {
    pub(crate) fn new(name: String, flags: NodeFlags) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            position: Point::ORIGIN,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            flags,
            ancestors_visible: true,
            ancestors_permit_mouse: true,
            on_scene: false,
            alpha: 1.0,
            mesh: None,
            nine_slice: None,
            hit_area: None,
            texture: None,
            clock: None,
            depth: 0.0,
            listeners: ListenerRegistry::new(),
            behavior: None,
            body: None,
            world: None,
            drag: DragState::default(),
            cache: NodeCache::default(),
        }
    }

    pub(crate) fn visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub(crate) fn mouse_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::MOUSE_ENABLED)
    }

    pub(crate) fn mouse_children(&self) -> bool {
        self.flags.contains(NodeFlags::MOUSE_CHILDREN)
    }

    /// What this node passes down as `ancestors_visible`.
    pub(crate) fn visible_to_children(&self) -> bool {
        self.ancestors_visible && self.visible()
    }

    /// What this node passes down as `ancestors_permit_mouse`.
    pub(crate) fn mouse_to_children(&self) -> bool {
        self.ancestors_permit_mouse && self.mouse_children()
    }

    pub(crate) fn renderable(&self) -> bool {
        self.on_scene && self.visible_to_children()
    }

    pub(crate) fn clickable(&self) -> bool {
        self.renderable() && self.ancestors_permit_mouse && self.mouse_enabled()
    }

    /// Geometry hit testing runs against.
    pub(crate) fn hit_mesh(&self) -> Option<&Mesh> {
        self.hit_area.as_ref().or(self.mesh.as_ref())
    }

    pub(crate) fn local_transform(&self) -> Affine {
        if let Some(local) = self.cache.local.get() {
            return local;
        }
        let local = Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y);
        self.cache.local.set(Some(local));
        local
    }
}

/// An arena slot; `generation` counts how often the slot was handed out.
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node>,
}
