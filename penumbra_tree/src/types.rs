// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the composed tree: node identifiers, kinds, and per-node data.

use alloc::string::String;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What a node is, as far as composition is concerned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// The top-level window sentinel. Parent of the document in the composed tree.
    Window,
    /// The document sentinel.
    Document,
    /// An ordinary element. May host a shadow root.
    Element,
    /// A slot element standing in for assigned light children of its host.
    Slot,
    /// A text node. Can be slotted, cannot have children.
    Text,
    /// The root of a shadow tree. Only created by [`Tree::attach_shadow`](crate::Tree::attach_shadow).
    ShadowRoot,
}

impl NodeKind {
    /// Whether nodes of this kind may be given children with [`Tree::insert`](crate::Tree::insert).
    pub const fn accepts_children(self) -> bool {
        matches!(
            self,
            Self::Document | Self::Element | Self::Slot | Self::ShadowRoot
        )
    }

    /// Whether nodes of this kind may be assigned to a slot.
    pub const fn is_slottable(self) -> bool {
        matches!(self, Self::Element | Self::Slot | Self::Text)
    }
}

/// Data supplied when inserting a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeData {
    /// Node kind.
    pub kind: NodeKind,
    /// Optional label used for lookup and diagnostics (a `data-id`, a tag name, ...).
    pub label: Option<String>,
}

impl NodeData {
    /// An element with a label.
    pub fn element(label: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element,
            label: Some(label.into()),
        }
    }

    /// A slot with a label.
    pub fn slot(label: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Slot,
            label: Some(label.into()),
        }
    }

    /// An unlabeled text node.
    pub fn text() -> Self {
        Self {
            kind: NodeKind::Text,
            label: None,
        }
    }
}

impl From<NodeKind> for NodeData {
    fn from(kind: NodeKind) -> Self {
        Self { kind, label: None }
    }
}
