// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::{ClockId, NodeId};

/// Broad category of a [`SceneError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A node, index or range passed in does not fit the current tree.
    InvalidArgument,
    /// The request is well formed but the node cannot honor it right now.
    InvalidState,
    /// An asset key could not be resolved.
    NotFound,
}

/// Errors raised by scene operations.
///
/// Operations validate before mutating: when one of these is returned the
/// scene is unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The node id is stale or belongs to another scene.
    #[error("node {0:?} does not exist")]
    StaleNode(NodeId),
    /// The clock id belongs to another scene.
    #[error("clock {0:?} does not exist")]
    UnknownClock(ClockId),
    /// The root cannot take part in this operation.
    #[error("the scene root cannot be {0}")]
    RootNotAllowed(&'static str),
    /// Adding `child` under `parent` would make a node its own ancestor.
    #[error("node {child:?} is an ancestor of {parent:?}")]
    CycleDetected {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    /// `child` is not a child of `parent`.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent that was asked.
        parent: NodeId,
        /// The node that was expected among its children.
        child: NodeId,
    },
    /// A child index is outside the valid range.
    #[error("index {index} is out of range for {len} children")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Current number of children.
        len: usize,
    },
    /// A bulk removal was requested on a node without children.
    #[error("node {0:?} has no children to remove")]
    EmptyChildren(NodeId),
    /// A range ends before it begins.
    #[error("range end {end} precedes begin {begin}")]
    InvalidRange {
        /// First index.
        begin: usize,
        /// Last index, inclusive.
        end: usize,
    },
    /// Scale components must be non-zero.
    #[error("scale must not be zero")]
    ZeroScale,
    /// Width and height cannot be set to zero.
    #[error("dimension must not be zero")]
    ZeroDimension,
    /// The combined bounds would exceed the configured maximum dimension.
    #[error("dimension {value} exceeds the maximum of {max}")]
    DimensionTooLarge {
        /// The dimension that would result.
        value: f64,
        /// [`SceneOptions::max_dimension`](crate::SceneOptions::max_dimension).
        max: f64,
    },
    /// The operation requires the node to be attached to the scene root.
    #[error("node {0:?} is not on the scene")]
    NotOnScene(NodeId),
    /// The asset provider does not know the key.
    #[error("asset {0:?} not found")]
    AssetNotFound(String),
}

impl SceneError {
    /// Category of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StaleNode(_)
            | Self::UnknownClock(_)
            | Self::RootNotAllowed(_)
            | Self::CycleDetected { .. }
            | Self::NotAChild { .. }
            | Self::IndexOutOfRange { .. }
            | Self::EmptyChildren(_)
            | Self::InvalidRange { .. } => ErrorKind::InvalidArgument,
            Self::ZeroScale
            | Self::ZeroDimension
            | Self::DimensionTooLarge { .. }
            | Self::NotOnScene(_) => ErrorKind::InvalidState,
            Self::AssetNotFound(_) => ErrorKind::NotFound,
        }
    }
}
