// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree construction and composed-tree walks.

use crate::types::{NodeId, NodeKind};

/// A composed-tree walk ran longer than its bound.
///
/// Walks are bounded by [`ComposedTopology::walk_limit`](crate::ComposedTopology::walk_limit).
/// Hitting the bound means the topology has a cycle through parent, host, or slot
/// edges; it is a defect of the tree that was handed in and is not recoverable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("composed-tree walk exceeded {limit} steps; the topology contains a cycle")]
pub struct WalkError {
    /// The bound that was exceeded.
    pub limit: usize,
}

/// Misuse of the [`Tree`](crate::Tree) construction API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node was removed (or never belonged to this tree).
    #[error("node {0:?} is not alive")]
    Stale(NodeId),
    /// The parent's kind does not accept children.
    #[error("node {node:?} of kind {kind:?} cannot have children")]
    NotAContainer {
        /// Offending parent.
        node: NodeId,
        /// Its kind.
        kind: NodeKind,
    },
    /// Shadow roots are created with `attach_shadow`, windows and documents by `Tree::new`.
    #[error("nodes of kind {0:?} cannot be inserted directly")]
    NotInsertable(NodeKind),
    /// Only elements may host shadow roots.
    #[error("node {node:?} of kind {kind:?} cannot host a shadow root")]
    NotAHost {
        /// Offending node.
        node: NodeId,
        /// Its kind.
        kind: NodeKind,
    },
    /// The element already hosts a shadow root.
    #[error("element {0:?} already hosts a shadow root")]
    ShadowAlreadyAttached(NodeId),
    /// The node named as a slot is not a slot.
    #[error("node {0:?} is not a slot")]
    NotASlot(NodeId),
    /// The node's kind cannot be slotted.
    #[error("node {node:?} of kind {kind:?} cannot be assigned to a slot")]
    NotSlottable {
        /// Offending node.
        node: NodeId,
        /// Its kind.
        kind: NodeKind,
    },
    /// The slot does not belong to the shadow tree of the node's light parent.
    #[error("slot {slot:?} is not in the shadow tree hosted by the parent of {node:?}")]
    SlotOutOfScope {
        /// Node being assigned.
        node: NodeId,
        /// Slot it was assigned to.
        slot: NodeId,
    },
    /// A walk over the tree failed while validating the request.
    #[error(transparent)]
    Walk(#[from] WalkError),
}
