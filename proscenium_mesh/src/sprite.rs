// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration points, textured sprite quads and nine-slice grids.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

use crate::Mesh;

/// The pivot of a sprite, as a fraction of its width and height.
///
/// `x` runs from 0 (left edge) to 1 (right edge) and `y` from 0 (bottom edge) to
/// 1 (top edge). The sprite's local origin sits on this point, so it is also
/// what the sprite rotates and scales around.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegistrationPoint {
    /// Horizontal fraction, 0 at the left edge.
    pub x: f64,
    /// Vertical fraction, 0 at the bottom edge.
    pub y: f64,
}

impl RegistrationPoint {
    /// Top left corner.
    pub const TOP_LEFT: Self = Self::new(0.0, 1.0);
    /// Middle of the top edge.
    pub const TOP: Self = Self::new(0.5, 1.0);
    /// Top right corner.
    pub const TOP_RIGHT: Self = Self::new(1.0, 1.0);
    /// Middle of the left edge.
    pub const LEFT: Self = Self::new(0.0, 0.5);
    /// Center.
    pub const CENTER: Self = Self::new(0.5, 0.5);
    /// Middle of the right edge.
    pub const RIGHT: Self = Self::new(1.0, 0.5);
    /// Bottom left corner.
    pub const BOTTOM_LEFT: Self = Self::new(0.0, 0.0);
    /// Middle of the bottom edge.
    pub const BOTTOM: Self = Self::new(0.5, 0.0);
    /// Bottom right corner.
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 0.0);

    /// A custom pivot with `y` measured from the bottom edge.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A custom pivot with `y` measured from the top edge.
    pub const fn from_top_left(x: f64, y: f64) -> Self {
        Self { x, y: 1.0 - y }
    }
}

impl Default for RegistrationPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Scene-unit bounds around the pivot and texture coordinates of a sprite cut
/// from `region` of `texture`.
fn frame(
    texture: Size,
    region: Rect,
    pixels_per_unit: f64,
    pivot: RegistrationPoint,
    top_left_origin: bool,
) -> (Rect, Rect) {
    let region = if top_left_origin {
        let y0 = texture.height - (region.y0 + region.height());
        Rect::new(region.x0, y0, region.x1, y0 + region.height())
    } else {
        region
    };
    let frac = |v: f64, extent: f64| if extent > 0.0 { v / extent } else { 0.0 };
    let uv = Rect::new(
        frac(region.x0, texture.width),
        frac(region.y0, texture.height),
        frac(region.x1, texture.width),
        frac(region.y1, texture.height),
    );

    let w = region.width() / pixels_per_unit;
    let h = region.height() / pixels_per_unit;
    let bounds = Rect::new(
        -w * pivot.x,
        -h * pivot.y,
        w * (1.0 - pivot.x),
        h * (1.0 - pivot.y),
    );
    (bounds, uv)
}

/// Build the quad for a sprite cut from `region` of a texture of size `texture`.
///
/// Both are in pixels. The quad measures `region / pixels_per_unit` in scene
/// units and is placed so that `pivot` lands on the origin. With
/// `top_left_origin`, `region` is measured from the top of the texture, as
/// sprite sheet tools usually do. Texture coordinates are always bottom-up.
#[must_use]
pub fn sprite_quad(
    texture: Size,
    region: Rect,
    pixels_per_unit: f64,
    pivot: RegistrationPoint,
    top_left_origin: bool,
) -> Mesh {
    let (bounds, uv) = frame(texture, region, pixels_per_unit, pivot, top_left_origin);
    Mesh::quad(bounds, uv)
}

/// Same as [`sprite_quad`], but cut into a nine-slice grid.
#[must_use]
pub fn sprite_nine_slice(
    texture: Size,
    region: Rect,
    pixels_per_unit: f64,
    pivot: RegistrationPoint,
    top_left_origin: bool,
    grid: Rect,
) -> NineSlice {
    let (bounds, uv) = frame(texture, region, pixels_per_unit, pivot, top_left_origin);
    NineSlice::new(bounds, uv, grid)
}

/// A sprite cut into a 3x3 grid whose borders keep their size under scaling.
///
/// `grid` is the inner cell in fractions of the sprite, with `y` measured from
/// the bottom edge like [`RegistrationPoint`]. When the sprite is scaled, the
/// inner grid lines move so that the border cells cover the same scene
/// distance as at scale 1, until the borders meet. Texture coordinates never
/// move, so the border artwork is not stretched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NineSlice {
    bounds: Rect,
    uv: Rect,
    grid: Rect,
}

impl NineSlice {
    /// Slice the sprite occupying `bounds`, textured with `uv`.
    pub fn new(bounds: Rect, uv: Rect, grid: Rect) -> Self {
        let unit = |v: f64| v.clamp(0.0, 1.0);
        let grid = Rect::new(unit(grid.x0), unit(grid.y0), unit(grid.x1), unit(grid.y1)).abs();
        Self { bounds, uv, grid }
    }

    /// Unscaled extent of the sprite in its local space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The inner cell, in fractions of the sprite.
    #[must_use]
    pub fn grid(&self) -> Rect {
        self.grid
    }

    /// Lay out the 16 vertices for a node scaled by `scale_x` and `scale_y`.
    ///
    /// The outline always matches [`NineSlice::bounds`].
    #[must_use]
    pub fn mesh(&self, scale_x: f64, scale_y: f64) -> Mesh {
        let xs = stops(self.grid.x0, self.grid.x1, scale_x);
        let ys = stops(self.grid.y0, self.grid.y1, scale_y);
        let u = [0.0, self.grid.x0, self.grid.x1, 1.0];
        let v = [0.0, self.grid.y0, self.grid.y1, 1.0];
        let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;

        let mut positions = Vec::with_capacity(16);
        let mut uvs = Vec::with_capacity(16);
        for row in 0..4 {
            for col in 0..4 {
                positions.push(Point::new(
                    lerp(self.bounds.x0, self.bounds.x1, xs[col]),
                    lerp(self.bounds.y0, self.bounds.y1, ys[row]),
                ));
                uvs.push(Point::new(
                    lerp(self.uv.x0, self.uv.x1, u[col]),
                    lerp(self.uv.y0, self.uv.y1, v[row]),
                ));
            }
        }
        let mut indices = Vec::with_capacity(54);
        for row in 0..3_u32 {
            for col in 0..3_u32 {
                let i = col + row * 4;
                // Same winding as `Mesh::quad`.
                indices.extend_from_slice(&[i + 4, i + 5, i + 1, i, i + 4, i + 1]);
            }
        }
        Mesh::new(positions, uvs, indices)
    }
}

/// Fractions at which the four grid lines of one axis sit under `scale`.
fn stops(inner0: f64, inner1: f64, scale: f64) -> [f64; 4] {
    let near = inner0;
    let far = 1.0 - inner1;
    let scale = scale.abs();
    if scale == 0.0 {
        return [0.0, inner0, inner1, 1.0];
    }
    // Where the two borders meet when squeezed.
    let limit = if near + far > 0.0 { near / (near + far) } else { near };
    [0.0, (near / scale).min(limit), (1.0 - far / scale).max(limit), 1.0]
}
