// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public identifiers and flags.

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// A small, copyable handle made of a slot index and a generation counter. It
/// stays stable while the node moves around the tree and becomes stale once
/// the node is destroyed.
///
/// - A fresh slot starts at generation `1`.
/// - Destroying a node frees its slot; existing ids pointing at it are stale.
/// - Reusing a freed slot bumps its generation, so stale ids never alias a
///   different live node.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Identifier for a [`Clock`](crate::Clock) owned by a scene.
///
/// Clocks live as long as their scene.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ClockId(pub(crate) u32);

impl ClockId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// A node's own display and input switches.
    ///
    /// These are the node's own settings; whether the node is actually drawn or
    /// hit also depends on its ancestors, see
    /// [`Scene::is_renderable`](crate::Scene::is_renderable) and
    /// [`Scene::is_clickable`](crate::Scene::is_clickable).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is drawn, and so are its children unless they opt out.
        const VISIBLE        = 0b0000_0001;
        /// Node participates in pointer hit testing.
        const MOUSE_ENABLED  = 0b0000_0010;
        /// Descendants may receive pointer events of their own.
        const MOUSE_CHILDREN = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::MOUSE_ENABLED | Self::MOUSE_CHILDREN
    }
}
