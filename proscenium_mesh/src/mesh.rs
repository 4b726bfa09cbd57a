// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle meshes and the point-in-triangle test.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::TAU;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect};

/// Indexed triangle geometry in some local space.
///
/// `uvs` is either empty or parallel to `positions`. Every three entries of
/// `indices` form one triangle; trailing indices that do not complete a
/// triangle, and triangles referencing missing positions, are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Point>,
    /// Texture coordinates, one per position.
    pub uvs: Vec<Point>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from its parts.
    pub fn new(positions: Vec<Point>, uvs: Vec<Point>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            uvs,
            indices,
        }
    }

    /// A two-triangle quad covering `bounds`, textured with `uv`.
    ///
    /// Corners run `(x0, y0)`, `(x1, y0)`, `(x1, y1)`, `(x0, y1)` in both sets.
    pub fn quad(bounds: Rect, uv: Rect) -> Self {
        let corners = |r: Rect| {
            vec![
                Point::new(r.x0, r.y0),
                Point::new(r.x1, r.y0),
                Point::new(r.x1, r.y1),
                Point::new(r.x0, r.y1),
            ]
        };
        Self {
            positions: corners(bounds),
            uvs: corners(uv),
            indices: vec![3, 2, 1, 0, 3, 1],
        }
    }

    /// A triangle fan approximating a circle centered on the origin.
    ///
    /// Fewer than three slices would not enclose any area, so `slices` is
    /// raised to three. Texture coordinates are all zero.
    pub fn round(radius: f64, slices: u32) -> Self {
        let slices = slices.max(3);
        let mut positions = Vec::with_capacity(slices as usize + 1);
        positions.push(Point::ORIGIN);
        for step in 0..slices {
            let theta = TAU * f64::from(step) / f64::from(slices);
            positions.push(Point::new(radius * theta.cos(), radius * theta.sin()));
        }
        let mut indices = Vec::with_capacity(slices as usize * 3);
        for step in 1..slices {
            indices.extend_from_slice(&[0, step, step + 1]);
        }
        indices.extend_from_slice(&[0, slices, 1]);
        Self {
            uvs: vec![Point::ORIGIN; positions.len()],
            positions,
            indices,
        }
    }

    /// Returns `true` if the mesh has no complete triangle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Number of index triples.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over the triangles as corner triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let at = |i: u32| self.positions.get(i as usize).copied();
            Some([at(tri[0])?, at(tri[1])?, at(tri[2])?])
        })
    }

    /// Axis-aligned bounds of the positions, or `None` for a mesh without positions.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let (first, rest) = self.positions.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
        )
    }

    /// A copy with every position mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: Affine) -> Self {
        Self {
            positions: self.positions.iter().map(|p| transform * *p).collect(),
            uvs: self.uvs.clone(),
            indices: self.indices.clone(),
        }
    }

    /// Returns `true` if `pt` lies inside any triangle.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.triangles()
            .any(|[a, b, c]| point_in_triangle(pt, a, b, c))
    }
}

/// Barycentric point-in-triangle test.
///
/// Points on the edges from `a` count as inside, points on the edge opposite `a`
/// do not, so two triangles sharing that edge never both claim a point on it.
/// Degenerate triangles contain nothing.
#[must_use]
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == 0.0 {
        return false;
    }
    let inv = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv;
    let v = (dot00 * dot12 - dot01 * dot02) * inv;
    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

/// Inclusive rectangle containment, used as the cheap first hit-test pass.
#[must_use]
pub fn rect_contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
