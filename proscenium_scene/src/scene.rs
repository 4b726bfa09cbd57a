// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene arena and its tick.

use core::fmt;

use kurbo::{Point, Size};
use proscenium_pointer::tracker::PointerState;
use proscenium_tween::TweenScheduler;
use tracing::debug;

use crate::mouse::{MouseRegistry, PointerDevice};
use crate::node::{Node, Slot};
use crate::{Clock, ClockId, NodeFlags, NodeId, SceneError, SceneOptions};

/// A retained-mode 2D scene.
///
/// A `Scene` owns every node, clock, listener and tween. Nodes are addressed by
/// [`NodeId`] and form a tree under the [root](Scene::root), which exists for
/// the whole life of the scene. Nodes created with [`Scene::create_node`] start
/// out detached and become part of the scene once they are added below the
/// root.
///
/// The host drives the scene by calling [`Scene::advance`] once per frame.
pub struct Scene {
    pub(crate) slots: Vec<Slot>,
    pub(crate) free: Vec<u32>,
    pub(crate) root: NodeId,
    pub(crate) options: SceneOptions,
    pub(crate) clocks: Vec<Clock>,
    pub(crate) viewport: Size,
    pub(crate) mouse: MouseRegistry,
    pub(crate) pointer: PointerState<NodeId>,
    pub(crate) device: Option<Box<dyn PointerDevice>>,
    pub(crate) pointer_position: Point,
    pub(crate) input_enabled: bool,
    pub(crate) tweens: TweenScheduler<Self>,
    /// Child order changed since depths were last assigned.
    pub(crate) order_dirty: bool,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("root", &self.root)
            .field("nodes", &self.len())
            .field("clocks", &self.clocks)
            .field("viewport", &self.viewport)
            .field("tweens", &self.tweens.len())
            .field("input_enabled", &self.input_enabled)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneOptions::default())
    }
}

impl Scene {
    /// Create a scene with a root node named `"root"` driven by the default clock.
    pub fn new(options: SceneOptions) -> Self {
        let side = options.viewport_max_dimension;
        let default_clock = Clock::new(options.default_clock_name.clone());
        let mut scene = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 1),
            options,
            clocks: vec![default_clock],
            viewport: Size::new(side, side),
            mouse: MouseRegistry::default(),
            pointer: PointerState::new(),
            device: None,
            pointer_position: Point::ORIGIN,
            input_enabled: true,
            tweens: TweenScheduler::new(),
            order_dirty: false,
        };
        let mut root = Node::new(String::from("root"), scene.default_flags());
        root.on_scene = true;
        root.clock = Some(ClockId(0));
        scene.root = scene.alloc(root);
        scene.pointer = PointerState::with_hover(scene.root);
        debug!(root = ?scene.root, options = ?scene.options, "scene created");
        scene
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Options the scene was created with.
    #[must_use]
    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Number of live nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Returns `true` if only the root is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Returns `true` if `id` refers to a live node of this scene.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn default_flags(&self) -> NodeFlags {
        let mut flags = NodeFlags::VISIBLE | NodeFlags::MOUSE_CHILDREN;
        flags.set(
            NodeFlags::MOUSE_ENABLED,
            self.options.mouse_enabled_by_default,
        );
        flags
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            return NodeId::new(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 1,
            node: Some(node),
        });
        NodeId::new(idx, 1)
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        let node = slot.node.take()?;
        self.free.push(id.0);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.idx())
            .filter(|s| s.generation == id.generation())
            .and_then(|s| s.node.as_mut())
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.get(id).ok_or(SceneError::StaleNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.get_mut(id).ok_or(SceneError::StaleNode(id))
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// One tick runs, in order:
    /// 1. every clock advances (paused clocks hold),
    /// 2. the enter-frame pass, top-down: drags follow the pointer, physics
    ///    worlds step and bodies report their pose, then behaviors run,
    /// 3. the pointer is sampled and pointer events are dispatched,
    /// 4. tweens advance,
    /// 5. the exit-frame pass, children before parents,
    /// 6. depths are reassigned if the child order changed.
    ///
    /// Frame passes skip every subtree whose own clock is paused. Transforms,
    /// bounds and hit meshes are rebuilt on demand from the caches the steps
    /// above invalidated.
    pub fn advance(&mut self, dt: f64) {
        for clock in &mut self.clocks {
            clock.tick(dt);
        }
        self.enter_frame(self.root);
        self.sample_pointer();
        self.advance_tweens();
        self.exit_frame(self.root);
        if self.order_dirty {
            self.reorder();
        }
    }

    fn subtree_paused(&self, node: &Node) -> bool {
        node.clock
            .and_then(|c| self.clocks.get(c.idx()))
            .is_some_and(Clock::is_paused)
    }

    fn enter_frame(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if self.subtree_paused(node) {
            return;
        }
        self.frame_update(id);
        self.with_behavior(id, |b, scene| b.enter_frame(scene, id));
        for child in self.children(id).to_vec() {
            if self.parent(child) == Some(id) {
                self.enter_frame(child);
            }
        }
    }

    fn exit_frame(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if self.subtree_paused(node) {
            return;
        }
        for child in self.children(id).to_vec() {
            if self.parent(child) == Some(id) {
                self.exit_frame(child);
            }
        }
        self.with_behavior(id, |b, scene| b.exit_frame(scene, id));
    }

    fn advance_tweens(&mut self) {
        let mut batch = self.tweens.detach();
        batch.advance(self);
        self.tweens.reattach(batch);
    }

    /// Resume the default clock and pointer tracking.
    pub fn enable(&mut self) {
        if let Some(clock) = self.clocks.get_mut(0) {
            clock.set_paused(false);
        }
        self.input_enabled = true;
        if let Some(device) = self.device.as_mut() {
            let sample = device.sample();
            self.pointer.resync(sample.position, sample.pressed);
        }
    }

    /// Pause the default clock and pointer tracking.
    ///
    /// A press in progress is forgotten, so releasing elsewhere later does not
    /// report a release-outside.
    pub fn disable(&mut self) {
        if let Some(clock) = self.clocks.get_mut(0) {
            clock.set_paused(true);
        }
        self.input_enabled = false;
        self.pointer.cancel_press();
    }

    /// Returns `true` unless [`Scene::disable`] is in effect.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Visible area in scene units.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Fit the viewport to a screen of `pixels`, with the longer side spanning
    /// [`SceneOptions::viewport_max_dimension`] units.
    ///
    /// Degenerate sizes are ignored.
    pub fn set_viewport_pixels(&mut self, pixels: Size) {
        if pixels.width <= 0.0 || pixels.height <= 0.0 {
            return;
        }
        let max = self.options.viewport_max_dimension;
        self.viewport = if pixels.width >= pixels.height {
            Size::new(max, max * pixels.height / pixels.width)
        } else {
            Size::new(max * pixels.width / pixels.height, max)
        };
    }

    /// Set the viewport width, keeping the aspect ratio.
    pub fn set_viewport_width(&mut self, width: f64) {
        if self.viewport.width > 0.0 && width > 0.0 {
            let aspect = self.viewport.height / self.viewport.width;
            self.viewport = Size::new(width, width * aspect);
        }
    }

    /// Set the viewport height, keeping the aspect ratio.
    pub fn set_viewport_height(&mut self, height: f64) {
        if self.viewport.height > 0.0 && height > 0.0 {
            let aspect = self.viewport.width / self.viewport.height;
            self.viewport = Size::new(height * aspect, height);
        }
    }
}
