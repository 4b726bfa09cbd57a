// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proscenium Events: typed listener registries and three-phase event propagation.
//!
//! This crate holds the dispatch protocol used by the Proscenium scene graph, kept
//! free of any knowledge about trees or geometry:
//!
//! - [`Event`]: a dispatched event record with its name, target, current node,
//!   [`Phase`], propagation flags and a typed payload.
//! - [`Listener`]: a shared callback with identity, so the same handler can be
//!   registered and later removed.
//! - [`ListenerRegistry`]: per-node buckets keyed by (payload type, event name),
//!   sorted by ascending priority with insertion order as the tie-break.
//! - [`propagate`]: walks an ancestor chain in capture → target → bubble order.
//!
//! Callbacks receive a mutable context `C` (usually the whole scene), which is why
//! [`propagate`] asks for the listeners through a closure: the listeners of each node
//! are snapshotted right before that node runs, and a callback may freely add or
//! remove listeners, or restructure the tree, without disturbing the walk.
//!
//! ## Minimal example
//!
//! ```
//! use proscenium_events::{Event, Listener, ListenerRegistry, Phase, propagate};
//!
//! // Node 0 is the root, node 1 its child.
//! struct Ctx {
//!     registries: Vec<ListenerRegistry<Ctx, usize>>,
//!     log: Vec<String>,
//! }
//!
//! let record = Listener::new(|ctx: &mut Ctx, ev: &mut Event<usize, ()>| {
//!     let here = ev.current_target().unwrap();
//!     ctx.log.push(format!("{:?}:{here}", ev.phase().unwrap()));
//! });
//!
//! let mut ctx = Ctx { registries: vec![ListenerRegistry::new(), ListenerRegistry::new()], log: vec![] };
//! ctx.registries[0].add("ping", record.clone(), true, 0);
//! ctx.registries[0].add("ping", record.clone(), false, 0);
//! ctx.registries[1].add("ping", record, false, 0);
//!
//! let mut ev = Event::new("ping", ());
//! propagate(&mut ctx, &[1, 0], &mut ev, |ctx, node, phase| {
//!     ctx.registries[node].snapshot::<()>("ping", phase)
//! });
//! assert_eq!(ctx.log, ["Capture:0", "Target:1", "Bubble:0"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod listener;
mod propagate;
mod registry;

pub use event::{COMPLETE, Event, Phase};
pub use listener::Listener;
pub use propagate::propagate;
pub use registry::{ListenerRegistry, Snapshot};
