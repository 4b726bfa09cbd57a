// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proscenium Scene: a retained-mode 2D scene graph.
//!
//! A [`Scene`] owns a tree of nodes under a single root. Each node has a
//! position, rotation and scale relative to its parent, optional geometry, an
//! opacity and visibility that combine down the tree, and its own listeners.
//! The host calls [`Scene::advance`] once per frame; everything else happens
//! inside that tick or in direct calls.
//!
//! - Tree: [`Scene::add_child`], [`Scene::remove_child`], [`Scene::set_child_index`]
//!   and friends. Nodes are addressed by generational [`NodeId`]s.
//! - Transforms: cached local and global [`kurbo::Affine`]s, with
//!   [`Scene::width`] and [`Scene::height`] derived from subtree geometry and
//!   settable through scale.
//! - Events: capture, target and bubble phases along the parent chain, see
//!   [`Scene::add_listener`] and [`Scene::dispatch_event`].
//! - Pointer: each tick the [`PointerDevice`] is sampled, the nearest clickable
//!   node is hit tested, and `mouse_over`, `mouse_out`, `mouse_move`,
//!   `mouse_down`, `mouse_up` and `release_outside` events are dispatched.
//! - Clocks: pausable time domains inherited down the tree, see [`Clock`].
//! - Tweens: [`Scene::tween`] with the accessors in [`props`].
//! - Hooks: per-node [`Behavior`]s for frame and lifecycle callbacks.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use proscenium_events::Listener;
//! use proscenium_mesh::Mesh;
//! use proscenium_scene::{MOUSE_DOWN, PointerData, PointerSample, Scene};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut scene = Scene::default();
//! let button = scene.create_node("button");
//! let quad = Mesh::quad(Rect::new(0.0, 0.0, 2.0, 1.0), Rect::new(0.0, 0.0, 1.0, 1.0));
//! scene.set_mesh(button, Some(quad)).unwrap();
//! scene.add_child(scene.root(), button).unwrap();
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&clicks);
//! scene
//!     .add_listener::<PointerData>(
//!         button,
//!         MOUSE_DOWN,
//!         Listener::new(move |_, _| counter.set(counter.get() + 1)),
//!         false,
//!         0,
//!     )
//!     .unwrap();
//!
//! scene.set_pointer_device(|| PointerSample {
//!     position: Point::new(0.5, 0.25),
//!     pressed: true,
//! });
//! scene.advance(1.0 / 60.0);
//! assert_eq!(clicks.get(), 1);
//! ```
//!
//! Scenes are single threaded. Callbacks receive `&mut Scene` and may change
//! anything, including the part of the tree that is being walked; walks use
//! snapshots where that matters.

mod behavior;
mod clock;
mod display;
mod drag;
mod error;
mod events;
mod mouse;
mod node;
mod options;
mod physics;
mod render;
mod scene;
mod sprite;
mod transform;
mod tree;
mod tweens;
mod types;

pub use behavior::Behavior;
pub use clock::Clock;
pub use error::{ErrorKind, SceneError};
pub use events::{
    MOUSE_DOWN, MOUSE_MOVE, MOUSE_OUT, MOUSE_OVER, MOUSE_UP, NodeEvent, NodeListener,
    PointerData, PointerEvent, RELEASE_OUTSIDE,
};
pub use mouse::{PointerDevice, PointerSample};
pub use options::SceneOptions;
pub use physics::{MAX_PHYSICS_STEP, PhysicsBody, PhysicsWorld};
pub use proscenium_events::{COMPLETE, Phase};
pub use proscenium_mesh::{NineSlice, RegistrationPoint};
pub use render::{RenderItem, RenderSink};
pub use scene::Scene;
pub use sprite::{AssetProvider, ImageInfo, SpriteOptions};
pub use tweens::{hide, props, show};
pub use types::{ClockId, NodeFlags, NodeId};
