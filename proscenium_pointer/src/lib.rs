// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proscenium Pointer: pointer state machines for a tick-driven scene graph.
//!
//! The scene samples the pointer once per tick, hit-tests it, and hands the result
//! to these state managers, which decide which events to synthesize:
//!
//! - [`tracker`]: over/out/move/down/up/release-outside transitions between
//!   consecutive samples.
//! - [`drag`]: the grab offset of an interactive drag.
//!
//! Neither knows anything about trees or hit testing. Node identifiers are
//! generic and only compared for equality.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use proscenium_pointer::tracker::{PointerState, PointerTransition};
//!
//! // Node 0 stands for the scene root, the implicit target when nothing is hit.
//! let mut pointer = PointerState::with_hover(0_u32);
//!
//! // Pointer enters node 7 and presses.
//! let out = pointer.update(7, Point::new(1.0, 1.0), true);
//! assert_eq!(out.as_slice(), &[
//!     PointerTransition::Out(0),
//!     PointerTransition::Over(7),
//!     PointerTransition::Down(7),
//! ]);
//!
//! // Pointer is released over node 9: node 9 receives the release, node 7 learns
//! // that the press ended outside of it.
//! let out = pointer.update(9, Point::new(5.0, 1.0), false);
//! assert_eq!(out.as_slice(), &[
//!     PointerTransition::Out(7),
//!     PointerTransition::Over(9),
//!     PointerTransition::Up(9),
//!     PointerTransition::ReleaseOutside(7),
//! ]);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod tracker;
