// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child ordering and lifecycle hooks through a long sequence of edits.

use std::cell::RefCell;
use std::rc::Rc;

use proscenium_scene::{Behavior, NodeId, Scene, SceneError};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Counts {
    attached: u32,
    detached: u32,
    entered: u32,
    left: u32,
}

struct Counter(Rc<RefCell<Counts>>);

impl Behavior for Counter {
    fn attached(&mut self, _scene: &mut Scene, _node: NodeId) {
        self.0.borrow_mut().attached += 1;
    }

    fn detached(&mut self, _scene: &mut Scene, _node: NodeId) {
        self.0.borrow_mut().detached += 1;
    }

    fn entered_scene(&mut self, _scene: &mut Scene, _node: NodeId) {
        self.0.borrow_mut().entered += 1;
    }

    fn left_scene(&mut self, _scene: &mut Scene, _node: NodeId) {
        self.0.borrow_mut().left += 1;
    }
}

fn counted(scene: &mut Scene, name: &str) -> (NodeId, Rc<RefCell<Counts>>) {
    let id = scene.create_node(name);
    let counts = Rc::new(RefCell::new(Counts::default()));
    scene.set_behavior(id, Counter(Rc::clone(&counts))).unwrap();
    (id, counts)
}

fn names(scene: &Scene, parent: NodeId) -> Vec<&str> {
    scene
        .children(parent)
        .iter()
        .map(|&c| scene.name(c).unwrap())
        .collect()
}

#[test]
fn child_order_edits() {
    let mut scene = Scene::default();
    let root = scene.root();
    let parent = scene.create_node("parent");
    assert!(!scene.is_on_scene(parent));
    scene.add_child(root, parent).unwrap();
    assert!(scene.is_on_scene(parent));
    assert_eq!(scene.parent(parent), Some(root));
    assert_eq!(scene.num_children(parent), 0);

    for i in 1..=10 {
        let child = scene.create_node(format!("Child{i}"));
        scene.add_child(parent, child).unwrap();
    }
    assert_eq!(scene.num_children(parent), 10);

    // Moving each child to the front reverses the list.
    for i in 1..=10 {
        let child = scene.child_by_name(parent, &format!("Child{i}")).unwrap();
        scene.add_child_at(parent, child, 0).unwrap();
    }
    for i in 0..10 {
        let child = scene.child_at(parent, i).unwrap();
        assert_eq!(scene.name(child), Some(format!("Child{}", 10 - i).as_str()));
    }

    let c8 = scene.child_by_name(parent, "Child8").unwrap();
    assert!(scene.is_on_scene(c8));
    assert_eq!(scene.parent(c8), Some(parent));

    assert_eq!(scene.remove_children(parent, 1, 8), Ok(8));
    assert_eq!(names(&scene, parent), ["Child10", "Child1"]);
    assert_eq!(scene.parent(c8), None);
    assert!(!scene.is_on_scene(c8));

    scene.swap_children_at(parent, 0, 1).unwrap();
    assert_eq!(names(&scene, parent), ["Child1", "Child10"]);
    let c1 = scene.child_by_name(parent, "Child1").unwrap();
    let c10 = scene.child_by_name(parent, "Child10").unwrap();
    assert_eq!(scene.child_index(parent, c1), 0);
    assert_eq!(scene.child_index(parent, c10), 1);
    assert_eq!(scene.child_index(parent, c8), -1);

    scene.swap_children(parent, c1, c10).unwrap();
    assert_eq!(names(&scene, parent), ["Child10", "Child1"]);

    assert_eq!(
        scene.set_child_index(parent, c8, 1),
        Err(SceneError::NotAChild { parent, child: c8 })
    );
    assert_eq!(
        scene.set_child_index(parent, c1, 2),
        Err(SceneError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(scene.num_children(parent), 2);

    scene.add_child(parent, c8).unwrap();
    assert!(scene.is_on_scene(c8));
    assert_eq!(scene.num_children(parent), 3);
    scene.set_child_index(parent, c8, 1).unwrap();
    assert_eq!(scene.parent(c8), Some(parent));
    assert_eq!(names(&scene, parent), ["Child10", "Child8", "Child1"]);

    scene.remove_child(parent, c8).unwrap();
    assert_eq!(scene.parent(c8), None);
    assert!(!scene.is_on_scene(c8));
    assert_eq!(names(&scene, parent), ["Child10", "Child1"]);
}

#[test]
fn attach_and_detach_hooks_count_real_moves() {
    let mut scene = Scene::default();
    let root = scene.root();
    let parent = scene.create_node("parent");
    scene.add_child(root, parent).unwrap();
    let c10 = scene.create_node("Child10");
    let c1 = scene.create_node("Child1");
    scene.add_child(parent, c10).unwrap();
    scene.add_child(parent, c1).unwrap();

    let (probe, counts) = counted(&mut scene, "probe");
    let at = |attached, detached| Counts {
        attached,
        detached,
        entered: attached,
        left: detached,
    };

    assert!(matches!(
        scene.remove_child(parent, probe),
        Err(SceneError::NotAChild { .. })
    ));
    assert_eq!(*counts.borrow(), at(0, 0));

    scene.add_child(parent, probe).unwrap();
    assert_eq!(*counts.borrow(), at(1, 0));
    scene.remove_child(parent, probe).unwrap();
    assert_eq!(*counts.borrow(), at(1, 1));

    // Removing the other children leaves the probe alone.
    assert_eq!(scene.remove_children(parent, 0, 100), Ok(2));
    assert_eq!(scene.num_children(parent), 0);
    assert_eq!(*counts.borrow(), at(1, 1));
    assert_eq!(
        scene.remove_children(parent, 0, 100),
        Err(SceneError::EmptyChildren(parent))
    );

    scene.add_child(parent, probe).unwrap();
    assert_eq!(scene.remove_all_children(parent), Ok(1));
    assert_eq!(*counts.borrow(), at(2, 2));

    // Adding an existing child again only reorders.
    scene.add_child(parent, probe).unwrap();
    assert_eq!(*counts.borrow(), at(3, 2));
    scene.add_child(parent, probe).unwrap();
    assert_eq!(scene.num_children(parent), 1);
    assert_eq!(*counts.borrow(), at(3, 2));

    scene.add_child(parent, c1).unwrap();
    scene.add_child(parent, c10).unwrap();
    scene.set_child_index(parent, probe, 1).unwrap();
    assert_eq!(*counts.borrow(), at(3, 2));

    assert_eq!(scene.remove_child_at(parent, 1), Ok(probe));
    assert_eq!(*counts.borrow(), at(3, 3));
}

#[test]
fn scene_hooks_follow_connectivity() {
    let mut scene = Scene::default();
    let root = scene.root();
    let parent = scene.create_node("parent");
    let (probe, counts) = counted(&mut scene, "probe");
    let seen = |c: &Rc<RefCell<Counts>>| {
        let c = c.borrow();
        (c.entered, c.left)
    };

    // Building off-scene does not enter the scene.
    scene.add_child(parent, probe).unwrap();
    assert_eq!(seen(&counts), (0, 0));
    let another = scene.create_node("another");
    scene.add_child(another, parent).unwrap();
    assert_eq!(seen(&counts), (0, 0));
    // An ancestor's move still counts as an attach.
    assert_eq!(counts.borrow().attached, 2);

    scene.add_child(root, another).unwrap();
    assert_eq!(seen(&counts), (1, 0));
    assert!(scene.is_on_scene(probe));

    scene.remove_child(root, another).unwrap();
    assert_eq!(seen(&counts), (1, 1));

    scene.add_child(root, another).unwrap();
    scene.remove_child_at(another, 0).unwrap();
    assert_eq!(seen(&counts), (2, 2));
    assert!(!scene.is_on_scene(probe));
}

#[test]
fn reparenting_on_scene_does_not_leave_it() {
    let mut scene = Scene::default();
    let root = scene.root();
    let a = scene.create_node("a");
    let b = scene.create_node("b");
    scene.add_child(root, a).unwrap();
    scene.add_child(root, b).unwrap();
    let (probe, counts) = counted(&mut scene, "probe");
    scene.add_child(a, probe).unwrap();

    scene.add_child(b, probe).unwrap();
    assert_eq!(
        *counts.borrow(),
        Counts {
            attached: 2,
            detached: 1,
            entered: 1,
            left: 0,
        }
    );
    assert_eq!(scene.parent(probe), Some(b));
}

#[test]
fn hooks_may_restructure_the_tree() {
    struct Orphan;

    impl Behavior for Orphan {
        fn entered_scene(&mut self, scene: &mut Scene, node: NodeId) {
            if let Some(parent) = scene.parent(node) {
                scene.remove_child(parent, node).unwrap();
            }
        }
    }

    let mut scene = Scene::default();
    let root = scene.root();
    let runaway = scene.create_node("runaway");
    scene.set_behavior(runaway, Orphan).unwrap();
    scene.add_child(root, runaway).unwrap();
    assert_eq!(scene.parent(runaway), None);
    assert_eq!(scene.num_children(root), 0);
    assert!(scene.has_behavior(runaway));
}

#[test]
fn destroyed_nodes_are_gone_and_children_orphaned() {
    let mut scene = Scene::default();
    let root = scene.root();
    let group = scene.create_node("group");
    scene.add_child(root, group).unwrap();
    let (kid, counts) = counted(&mut scene, "kid");
    scene.add_child(group, kid).unwrap();

    scene.destroy(group).unwrap();
    assert!(!scene.is_alive(group));
    assert!(scene.is_alive(kid));
    assert_eq!(scene.parent(kid), None);
    assert_eq!(counts.borrow().detached, 1);
    assert_eq!(counts.borrow().left, 1);
    assert_eq!(scene.add_child(root, group), Err(SceneError::StaleNode(group)));
    assert_eq!(
        scene.destroy(root),
        Err(SceneError::RootNotAllowed("destroyed"))
    );

    let again = scene.create_node("again");
    assert_ne!(again, group);
    assert_eq!(scene.name(group), None);
}
