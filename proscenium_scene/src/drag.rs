// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{NodeId, Scene, SceneError};

impl Scene {
    /// Make `node` follow the pointer from the next enter-frame on.
    ///
    /// The node keeps its current offset to the pointer, or snaps its origin
    /// onto the pointer with `lock_center`.
    pub fn start_drag(&mut self, node: NodeId, lock_center: bool) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootNotAllowed("dragged"));
        }
        let n = self.node(node)?;
        let parent = match n.parent {
            Some(parent) if n.on_scene => parent,
            _ => return Err(SceneError::NotOnScene(node)),
        };
        let origin = n.position;
        let pointer = self
            .global_to_local(parent, self.pointer_position)
            .ok_or(SceneError::StaleNode(parent))?;
        let drag = &mut self.node_mut(node)?.drag;
        if lock_center {
            drag.start_centered();
        } else {
            drag.start(pointer, origin);
        }
        Ok(())
    }

    /// End dragging `node`. Does nothing if it is not being dragged.
    pub fn stop_drag(&mut self, node: NodeId) {
        if let Some(n) = self.get_mut(node) {
            n.drag.end();
        }
    }

    /// Returns `true` while `node` follows the pointer.
    #[must_use]
    pub fn is_dragging(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|n| n.drag.is_dragging())
    }

    /// Move a dragged node after the pointer. Returns `false` if `id` is not
    /// being dragged.
    pub(crate) fn follow_drag(&mut self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let Some(parent) = node.parent else {
            return false;
        };
        let drag = node.drag;
        let Some(target) = self
            .global_to_local(parent, self.pointer_position)
            .and_then(|pointer| drag.follow(pointer))
        else {
            return false;
        };
        self.write_pose(id, Some(target), None, true);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PointerSample;
    use kurbo::{Point, Vec2};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dragged_node_keeps_its_grab_offset() {
        let mut scene = Scene::default();
        let pointer = Rc::new(Cell::new(Point::new(1.0, 1.0)));
        let source = Rc::clone(&pointer);
        scene.set_pointer_device(move || PointerSample {
            position: source.get(),
            pressed: true,
        });
        let parent = scene.create_node("parent");
        let item = scene.create_node("item");
        scene.add_child(scene.root(), parent).unwrap();
        scene.add_child(parent, item).unwrap();
        scene.set_scale(parent, Vec2::new(2.0, 2.0)).unwrap();
        scene.advance(0.0);

        scene.start_drag(item, false).unwrap();
        assert!(scene.is_dragging(item));
        pointer.set(Point::new(5.0, 1.0));
        scene.advance(0.0);
        // The pointer sample of the previous tick drives this enter-frame.
        scene.advance(0.0);
        assert_eq!(scene.position(item), Some(Point::new(2.0, 0.0)));

        scene.stop_drag(item);
        scene.stop_drag(item);
        assert!(!scene.is_dragging(item));
        pointer.set(Point::new(9.0, 9.0));
        scene.advance(0.0);
        scene.advance(0.0);
        assert_eq!(scene.position(item), Some(Point::new(2.0, 0.0)));
    }

    #[test]
    fn dragging_requires_the_scene() {
        let mut scene = Scene::default();
        let loose = scene.create_node("loose");
        assert_eq!(
            scene.start_drag(loose, true),
            Err(SceneError::NotOnScene(loose))
        );
        assert!(matches!(
            scene.start_drag(scene.root(), true),
            Err(SceneError::RootNotAllowed(_))
        ));
        scene.stop_drag(loose);
        assert!(!scene.is_dragging(loose));
    }
}
