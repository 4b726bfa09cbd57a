// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding nodes to an external physics engine.
//!
//! A node bound to a [`PhysicsBody`] follows the body: every enter-frame
//! pulls its pose, and position or rotation writes push the new pose back into
//! the body. A node bound to a [`PhysicsWorld`] steps that world once per
//! enter-frame, with the step capped at a thirtieth of a second.

use kurbo::Point;

use crate::{NodeId, Scene, SceneError};

/// Longest simulation step, in seconds.
pub const MAX_PHYSICS_STEP: f64 = 1.0 / 30.0;

/// A rigid body owned by a physics engine.
pub trait PhysicsBody {
    /// Current position, in the space of the node's parent, and rotation.
    fn pose(&self) -> (Point, f64);

    /// Teleport the body.
    fn set_pose(&mut self, position: Point, rotation: f64);
}

/// A simulation that advances in steps.
pub trait PhysicsWorld {
    /// Advance the simulation by `dt` seconds.
    fn step(&mut self, dt: f64);
}

impl Scene {
    /// Let `body` drive the pose of `node`, returning the body it replaces.
    pub fn bind_body(
        &mut self,
        node: NodeId,
        body: impl PhysicsBody + 'static,
    ) -> Result<Option<Box<dyn PhysicsBody>>, SceneError> {
        Ok(self.node_mut(node)?.body.replace(Box::new(body)))
    }

    /// Release the body bound to `node`.
    pub fn unbind_body(&mut self, node: NodeId) -> Option<Box<dyn PhysicsBody>> {
        self.get_mut(node)?.body.take()
    }

    /// Step `world` from the enter-frame of `node`, returning the world it replaces.
    pub fn bind_world(
        &mut self,
        node: NodeId,
        world: impl PhysicsWorld + 'static,
    ) -> Result<Option<Box<dyn PhysicsWorld>>, SceneError> {
        Ok(self.node_mut(node)?.world.replace(Box::new(world)))
    }

    /// Release the world bound to `node`.
    pub fn unbind_world(&mut self, node: NodeId) -> Option<Box<dyn PhysicsWorld>> {
        self.get_mut(node)?.world.take()
    }

    /// Built-in part of the enter-frame of `id`: drag, world step, body pose.
    pub(crate) fn frame_update(&mut self, id: NodeId) {
        let delta = self.delta_of(id).unwrap_or_default();
        // A dragged node leads its body instead of following it.
        if !self.follow_drag(id)
            && let Some((position, rotation)) =
                self.get(id).and_then(|n| n.body.as_ref()).map(|b| b.pose())
        {
            self.write_pose(id, Some(position), Some(rotation), false);
        }
        if let Some(world) = self.get_mut(id).and_then(|n| n.world.as_mut()) {
            world.step(delta.min(MAX_PHYSICS_STEP));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Shared {
        pose: (Point, f64),
        pushed: Vec<(Point, f64)>,
        steps: Vec<f64>,
    }

    #[derive(Clone, Default)]
    struct Handle(Rc<RefCell<Shared>>);

    impl PhysicsBody for Handle {
        fn pose(&self) -> (Point, f64) {
            self.0.borrow().pose
        }

        fn set_pose(&mut self, position: Point, rotation: f64) {
            let mut shared = self.0.borrow_mut();
            shared.pose = (position, rotation);
            shared.pushed.push((position, rotation));
        }
    }

    impl PhysicsWorld for Handle {
        fn step(&mut self, dt: f64) {
            let mut shared = self.0.borrow_mut();
            shared.steps.push(dt);
            shared.pose.0.y -= 1.0;
        }
    }

    #[test]
    fn world_steps_and_body_pose_is_pulled() {
        let mut scene = Scene::default();
        let world_node = scene.create_node("world");
        let ball = scene.create_node("ball");
        scene.add_child(scene.root(), world_node).unwrap();
        scene.add_child(world_node, ball).unwrap();

        let handle = Handle::default();
        scene.bind_world(world_node, handle.clone()).unwrap();
        scene.bind_body(ball, handle.clone()).unwrap();

        scene.advance(0.5);
        // The world steps before its children pull their pose.
        assert_eq!(handle.0.borrow().steps, [MAX_PHYSICS_STEP]);
        assert_eq!(scene.position(ball), Some(Point::new(0.0, -1.0)));

        scene.advance(0.01);
        assert_eq!(handle.0.borrow().steps, [MAX_PHYSICS_STEP, 0.01]);
        assert_eq!(scene.y(ball), Some(-2.0));
        assert!(handle.0.borrow().pushed.is_empty());
    }

    #[test]
    fn setters_push_into_the_body() {
        let mut scene = Scene::default();
        let ball = scene.create_node("ball");
        let handle = Handle::default();
        scene.bind_body(ball, handle.clone()).unwrap();
        scene.set_position(ball, Point::new(3.0, 4.0)).unwrap();
        scene.set_rotation(ball, 1.0).unwrap();
        assert_eq!(
            handle.0.borrow().pushed,
            [(Point::new(3.0, 4.0), 0.0), (Point::new(3.0, 4.0), 1.0)]
        );
        assert!(scene.unbind_body(ball).is_some());
        scene.set_x(ball, 0.0).unwrap();
        assert_eq!(handle.0.borrow().pushed.len(), 2);
    }
}
