// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proscenium Mesh: triangle geometry for display nodes.
//!
//! A [`Mesh`] is what a node draws and, unless it has a dedicated hit area, what
//! it is hit-tested against: positions, texture coordinates and triangle
//! indices. The crate also provides:
//!
//! - [`point_in_triangle`]: the barycentric test used for precise hits.
//! - [`RegistrationPoint`]: the pivot of a sprite, as a fraction of its size.
//! - [`sprite_quad`]: a textured quad cut from a texture region.
//! - [`NineSlice`]: a sprite grid whose borders keep their size when scaled.
//! - [`Mesh::round`]: a circular fan, typically used as a hit area.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Affine, Point, Rect};
//! use proscenium_mesh::Mesh;
//!
//! let quad = Mesh::quad(Rect::new(-1.0, -1.0, 1.0, 1.0), Rect::new(0.0, 0.0, 1.0, 1.0));
//! assert_eq!(quad.triangle_count(), 2);
//! assert!(quad.contains(Point::new(0.5, 0.5)));
//!
//! let moved = quad.transformed(Affine::translate((10.0, 0.0)));
//! assert!(!moved.contains(Point::new(0.5, 0.5)));
//! assert!(moved.contains(Point::new(10.5, 0.5)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod mesh;
mod sprite;

pub use mesh::{Mesh, point_in_triangle, rect_contains};
pub use sprite::{NineSlice, RegistrationPoint, sprite_nine_slice, sprite_quad};
