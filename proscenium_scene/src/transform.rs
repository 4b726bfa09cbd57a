// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transforms, geometry and derived size.
//!
//! The local transform of a node is `translate * rotate * scale`; its global
//! transform is the parent's global transform times the local one, so the
//! root and detached nodes use their local transform as is.
//!
//! All of these are cached. Position, rotation and scale writes drop the
//! cached global transforms of the subtree and the cached bounds of the
//! ancestors; nothing is recomputed until somebody asks.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use proscenium_mesh::{Mesh, NineSlice};

use crate::node::WorldHit;
use crate::{NodeId, Scene, SceneError};

impl Scene {
    /// Position of `id` in its parent's space.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(|n| n.position)
    }

    /// Horizontal position of `id`.
    #[must_use]
    pub fn x(&self, id: NodeId) -> Option<f64> {
        self.position(id).map(|p| p.x)
    }

    /// Vertical position of `id`.
    #[must_use]
    pub fn y(&self, id: NodeId) -> Option<f64> {
        self.position(id).map(|p| p.y)
    }

    /// Rotation of `id` in radians.
    #[must_use]
    pub fn rotation(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(|n| n.rotation)
    }

    /// Scale of `id`.
    #[must_use]
    pub fn scale(&self, id: NodeId) -> Option<Vec2> {
        self.get(id).map(|n| n.scale)
    }

    /// Horizontal scale of `id`.
    #[must_use]
    pub fn scale_x(&self, id: NodeId) -> Option<f64> {
        self.scale(id).map(|s| s.x)
    }

    /// Vertical scale of `id`.
    #[must_use]
    pub fn scale_y(&self, id: NodeId) -> Option<f64> {
        self.scale(id).map(|s| s.y)
    }

    /// Move `id` within its parent's space.
    ///
    /// The root stays at the origin. A node bound to a physics body pushes the
    /// new pose into the body.
    pub fn set_position(&mut self, id: NodeId, position: Point) -> Result<(), SceneError> {
        self.node(id)?;
        if id != self.root {
            self.write_pose(id, Some(position), None, true);
        }
        Ok(())
    }

    /// Set the horizontal position of `id`.
    pub fn set_x(&mut self, id: NodeId, x: f64) -> Result<(), SceneError> {
        let p = self.node(id)?.position;
        self.set_position(id, Point::new(x, p.y))
    }

    /// Set the vertical position of `id`.
    pub fn set_y(&mut self, id: NodeId, y: f64) -> Result<(), SceneError> {
        let p = self.node(id)?.position;
        self.set_position(id, Point::new(p.x, y))
    }

    /// Set the rotation of `id` in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) -> Result<(), SceneError> {
        self.node(id)?;
        if id != self.root {
            self.write_pose(id, None, Some(rotation), true);
        }
        Ok(())
    }

    pub(crate) fn write_pose(
        &mut self,
        id: NodeId,
        position: Option<Point>,
        rotation: Option<f64>,
        push_to_body: bool,
    ) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        if let Some(position) = position {
            node.position = position;
        }
        if let Some(rotation) = rotation {
            node.rotation = rotation;
        }
        let pose = (node.position, node.rotation);
        if push_to_body && let Some(body) = node.body.as_mut() {
            body.set_pose(pose.0, pose.1);
        }
        node.cache.local.set(None);
        self.transform_changed(id);
    }

    /// Set both scale components of `id`.
    ///
    /// Rejects a zero component, and any scale that would stretch the
    /// node's bounds beyond [`SceneOptions::max_dimension`](crate::SceneOptions::max_dimension).
    /// The root keeps its identity scale.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) -> Result<(), SceneError> {
        self.node(id)?;
        if id == self.root {
            return Ok(());
        }
        if scale.x == 0.0 || scale.y == 0.0 {
            return Err(SceneError::ZeroScale);
        }
        let natural = self.natural_size(id);
        let max = self.options.max_dimension;
        let value = (scale.x * natural.width).abs().max((scale.y * natural.height).abs());
        if value > max {
            return Err(SceneError::DimensionTooLarge { value, max });
        }
        let node = self.node_mut(id)?;
        node.scale = scale;
        node.cache.local.set(None);
        if let Some(slice) = node.nine_slice {
            node.mesh = Some(slice.mesh(scale.x, scale.y));
            *node.cache.world_hit.get_mut() = None;
        }
        self.transform_changed(id);
        Ok(())
    }

    /// Set the horizontal scale of `id`; see [`Scene::set_scale`].
    pub fn set_scale_x(&mut self, id: NodeId, scale_x: f64) -> Result<(), SceneError> {
        let s = self.node(id)?.scale;
        self.set_scale(id, Vec2::new(scale_x, s.y))
    }

    /// Set the vertical scale of `id`; see [`Scene::set_scale`].
    pub fn set_scale_y(&mut self, id: NodeId, scale_y: f64) -> Result<(), SceneError> {
        let s = self.node(id)?.scale;
        self.set_scale(id, Vec2::new(s.x, scale_y))
    }

    /// Width of `id` and its subtree in its parent's units, ignoring rotation.
    #[must_use]
    pub fn width(&self, id: NodeId) -> Option<f64> {
        let scale = self.get(id)?.scale;
        Some(self.natural_size(id).width * scale.x.abs())
    }

    /// Height of `id` and its subtree in its parent's units, ignoring rotation.
    #[must_use]
    pub fn height(&self, id: NodeId) -> Option<f64> {
        let scale = self.get(id)?.scale;
        Some(self.natural_size(id).height * scale.y.abs())
    }

    /// Scale `id` horizontally so that its width becomes `width`.
    ///
    /// Does nothing when the subtree has no geometry. A mirrored node stays
    /// mirrored.
    pub fn set_width(&mut self, id: NodeId, width: f64) -> Result<(), SceneError> {
        let scale = self.node(id)?.scale;
        let natural = self.natural_size(id).width;
        let Some(ratio) = self.back_solve(natural * scale.x.abs(), natural, width)? else {
            return Ok(());
        };
        self.set_scale_x(id, scale.x.signum() * ratio)
    }

    /// Scale `id` vertically so that its height becomes `height`.
    ///
    /// Does nothing when the subtree has no geometry. A mirrored node stays
    /// mirrored.
    pub fn set_height(&mut self, id: NodeId, height: f64) -> Result<(), SceneError> {
        let scale = self.node(id)?.scale;
        let natural = self.natural_size(id).height;
        let Some(ratio) = self.back_solve(natural * scale.y.abs(), natural, height)? else {
            return Ok(());
        };
        self.set_scale_y(id, scale.y.signum() * ratio)
    }

    fn back_solve(&self, current: f64, natural: f64, target: f64) -> Result<Option<f64>, SceneError> {
        if current == 0.0 || natural == 0.0 {
            return Ok(None);
        }
        if target == 0.0 {
            return Err(SceneError::ZeroDimension);
        }
        let max = self.options.max_dimension;
        if target.abs() > max {
            return Err(SceneError::DimensionTooLarge {
                value: target.abs(),
                max,
            });
        }
        Ok(Some(target / natural))
    }

    /// Unscaled size of the geometry of `id` and its subtree.
    pub(crate) fn natural_size(&self, id: NodeId) -> Size {
        self.subtree_bounds(id).map_or(Size::ZERO, |r| r.size())
    }

    /// Bounds of the geometry of `id` and its descendants in the local space
    /// of `id`, or `None` when there is none.
    #[must_use]
    pub fn subtree_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        if let Some(bounds) = node.cache.bounds.get() {
            return bounds;
        }
        let mut bounds = node.mesh.as_ref().and_then(Mesh::bounds);
        for &child in &node.children {
            let (Some(c), Some(inner)) = (self.get(child), self.subtree_bounds(child)) else {
                continue;
            };
            let outer = c.local_transform().transform_rect_bbox(inner);
            bounds = Some(bounds.map_or(outer, |b| b.union(outer)));
        }
        node.cache.bounds.set(Some(bounds));
        bounds
    }

    fn transform_changed(&self, id: NodeId) {
        self.invalidate_global(id);
        if let Some(parent) = self.parent(id) {
            self.invalidate_bounds(parent);
        }
    }

    /// Drop cached global transforms and hit meshes from `id` down.
    pub(crate) fn invalidate_global(&self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if node.cache.global.take().is_none() {
            return;
        }
        *node.cache.world_hit.borrow_mut() = None;
        for &child in &node.children {
            self.invalidate_global(child);
        }
    }

    /// Drop cached subtree bounds from `id` up.
    pub(crate) fn invalidate_bounds(&self, id: NodeId) {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.get(current) else {
                return;
            };
            if node.cache.bounds.take().is_none() {
                return;
            }
            cursor = node.parent;
        }
    }

    /// Transform from the local space of `id` to its parent's space.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Option<Affine> {
        self.get(id).map(|n| n.local_transform())
    }

    /// Transform from the local space of `id` to scene space.
    #[must_use]
    pub fn global_transform(&self, id: NodeId) -> Option<Affine> {
        let node = self.get(id)?;
        if let Some(global) = node.cache.global.get() {
            return Some(global);
        }
        let local = node.local_transform();
        let global = match node.parent.and_then(|p| self.global_transform(p)) {
            Some(parent) => parent * local,
            None => local,
        };
        node.cache.global.set(Some(global));
        Some(global)
    }

    /// Map `point` from the local space of `id` to scene space.
    #[must_use]
    pub fn local_to_global(&self, id: NodeId, point: Point) -> Option<Point> {
        self.global_transform(id).map(|t| t * point)
    }

    /// Map `point` from scene space to the local space of `id`.
    #[must_use]
    pub fn global_to_local(&self, id: NodeId, point: Point) -> Option<Point> {
        self.global_transform(id).map(|t| t.inverse() * point)
    }

    /// Render geometry of `id`.
    #[must_use]
    pub fn mesh(&self, id: NodeId) -> Option<&Mesh> {
        self.get(id)?.mesh.as_ref()
    }

    /// Replace the render geometry of `id`.
    ///
    /// Without a [hit area](Scene::set_hit_area) this is also what pointer hit
    /// testing uses. Any nine-slice grid on the node is dropped.
    pub fn set_mesh(&mut self, id: NodeId, mesh: Option<Mesh>) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.mesh = mesh;
        node.nine_slice = None;
        *node.cache.world_hit.get_mut() = None;
        self.invalidate_bounds(id);
        Ok(())
    }

    /// Nine-slice grid of `id`, if its geometry is one.
    #[must_use]
    pub fn nine_slice(&self, id: NodeId) -> Option<&NineSlice> {
        self.get(id)?.nine_slice.as_ref()
    }

    /// Make the geometry of `id` a nine-slice grid laid out for its current
    /// scale, or keep the current geometry as a plain mesh with `None`.
    ///
    /// From then on every scale change, including through
    /// [`Scene::set_width`] and [`Scene::set_height`], moves the inner grid
    /// lines so the borders keep their size on screen.
    pub fn set_nine_slice(
        &mut self,
        id: NodeId,
        slice: Option<NineSlice>,
    ) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        if let Some(slice) = slice {
            node.mesh = Some(slice.mesh(node.scale.x, node.scale.y));
            *node.cache.world_hit.get_mut() = None;
        }
        node.nine_slice = slice;
        self.invalidate_bounds(id);
        Ok(())
    }

    /// Custom hit geometry of `id`.
    #[must_use]
    pub fn hit_area(&self, id: NodeId) -> Option<&Mesh> {
        self.get(id)?.hit_area.as_ref()
    }

    /// Replace the hit geometry of `id`; `None` falls back to the render mesh.
    pub fn set_hit_area(&mut self, id: NodeId, hit_area: Option<Mesh>) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.hit_area = hit_area;
        *node.cache.world_hit.get_mut() = None;
        Ok(())
    }

    /// Texture key of `id`.
    #[must_use]
    pub fn texture(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.texture.as_deref()
    }

    /// Set the texture key the renderer should draw `id` with.
    pub fn set_texture(&mut self, id: NodeId, texture: Option<String>) -> Result<(), SceneError> {
        self.node_mut(id)?.texture = texture;
        Ok(())
    }

    /// Run `f` on the scene-space hit geometry of `id`, rebuilding it if needed.
    pub(crate) fn with_world_hit<R>(&self, id: NodeId, f: impl FnOnce(&WorldHit) -> R) -> Option<R> {
        let global = self.global_transform(id)?;
        let node = self.get(id)?;
        let mesh = node.hit_mesh()?;
        let mut cache = node.cache.world_hit.borrow_mut();
        let hit = cache.get_or_insert_with(|| {
            let mesh = mesh.transformed(global);
            let bounds = mesh.bounds();
            WorldHit { mesh, bounds }
        });
        Some(f(hit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    fn unit_square() -> Mesh {
        Mesh::quad(Rect::new(-0.5, -0.5, 0.5, 0.5), Rect::new(0.0, 0.0, 1.0, 1.0))
    }

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn global_composes_parent_and_local() {
        let mut scene = Scene::default();
        let parent = scene.create_node("parent");
        let child = scene.create_node("child");
        scene.add_child(scene.root(), parent).unwrap();
        scene.add_child(parent, child).unwrap();
        scene.set_position(parent, Point::new(10.0, 0.0)).unwrap();
        scene.set_rotation(parent, FRAC_PI_2).unwrap();
        scene.set_position(child, Point::new(1.0, 0.0)).unwrap();

        let p = scene.local_to_global(child, Point::ORIGIN).unwrap();
        assert!(approx(p, Point::new(10.0, 1.0)), "got {p:?}");
        let back = scene.global_to_local(child, p).unwrap();
        assert!(approx(back, Point::ORIGIN), "got {back:?}");

        // Moving the parent invalidates the cached child transform.
        scene.set_x(parent, 20.0).unwrap();
        let p = scene.local_to_global(child, Point::ORIGIN).unwrap();
        assert!(approx(p, Point::new(20.0, 1.0)), "got {p:?}");
    }

    #[test]
    fn reparenting_refreshes_the_global_transform() {
        let mut scene = Scene::default();
        let a = scene.create_node("a");
        let b = scene.create_node("b");
        let c = scene.create_node("c");
        scene.set_position(a, Point::new(5.0, 0.0)).unwrap();
        scene.set_position(b, Point::new(0.0, 7.0)).unwrap();
        scene.add_child(a, c).unwrap();
        assert_eq!(scene.local_to_global(c, Point::ORIGIN), Some(Point::new(5.0, 0.0)));
        scene.add_child(b, c).unwrap();
        assert_eq!(scene.local_to_global(c, Point::ORIGIN), Some(Point::new(0.0, 7.0)));
    }

    #[test]
    fn root_ignores_transform_writes() {
        let mut scene = Scene::default();
        let root = scene.root();
        scene.set_position(root, Point::new(3.0, 4.0)).unwrap();
        scene.set_scale(root, Vec2::new(2.0, 2.0)).unwrap();
        assert_eq!(scene.position(root), Some(Point::ORIGIN));
        assert_eq!(scene.global_transform(root), Some(Affine::IDENTITY));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let mut scene = Scene::default();
        let n = scene.create_node("n");
        assert_eq!(scene.set_scale_x(n, 0.0), Err(SceneError::ZeroScale));
        assert_eq!(scene.set_scale_y(n, 0.0), Err(SceneError::ZeroScale));
        assert_eq!(scene.scale(n), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn scale_beyond_max_dimension_is_rejected() {
        let mut scene = Scene::default();
        let n = scene.create_node("n");
        scene.set_mesh(n, Some(unit_square())).unwrap();
        assert_eq!(
            scene.set_scale_x(n, 6000.0),
            Err(SceneError::DimensionTooLarge {
                value: 6000.0,
                max: 5000.0,
            })
        );
        scene.set_scale_x(n, 4000.0).unwrap();
        assert_eq!(scene.width(n), Some(4000.0));
    }

    #[test]
    fn width_is_back_solved_through_scale() {
        let mut scene = Scene::default();
        let n = scene.create_node("n");
        scene.set_mesh(n, Some(unit_square())).unwrap();
        scene.set_width(n, 3.0).unwrap();
        assert_eq!(scene.scale_x(n), Some(3.0));
        assert_eq!(scene.width(n), Some(3.0));
        assert_eq!(scene.set_width(n, 0.0), Err(SceneError::ZeroDimension));
        assert!(matches!(
            scene.set_height(n, 9000.0),
            Err(SceneError::DimensionTooLarge { .. })
        ));

        scene.set_scale_x(n, -1.0).unwrap();
        scene.set_width(n, 2.0).unwrap();
        assert_eq!(scene.scale_x(n), Some(-2.0));
    }

    #[test]
    fn width_on_empty_subtree_is_a_no_op() {
        let mut scene = Scene::default();
        let n = scene.create_node("n");
        assert_eq!(scene.set_width(n, 0.0), Ok(()));
        assert_eq!(scene.set_width(n, 10.0), Ok(()));
        assert_eq!(scene.width(n), Some(0.0));
        assert_eq!(scene.scale_x(n), Some(1.0));
    }

    #[test]
    fn subtree_bounds_follow_children() {
        let mut scene = Scene::default();
        let parent = scene.create_node("parent");
        let child = scene.create_node("child");
        scene.add_child(parent, child).unwrap();
        scene.set_mesh(child, Some(unit_square())).unwrap();
        assert_eq!(scene.width(parent), Some(1.0));

        scene.set_scale_x(child, 2.0).unwrap();
        assert_eq!(scene.width(parent), Some(2.0));

        scene.set_position(child, Point::new(10.0, 0.0)).unwrap();
        assert_eq!(
            scene.subtree_bounds(parent),
            Some(Rect::new(9.0, -0.5, 11.0, 0.5))
        );

        scene.remove_child(parent, child).unwrap();
        assert_eq!(scene.width(parent), Some(0.0));
    }
}
