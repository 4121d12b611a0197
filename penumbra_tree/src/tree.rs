// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena tree: structure, shadow attachment, slot assignment, queries.

use alloc::{string::String, vec::Vec};

use crate::error::TreeError;
use crate::topology::{ComposedTopology, Role};
use crate::types::{NodeData, NodeId, NodeKind};

/// Arena-backed composed tree.
///
/// Owns its own `window` and `document` sentinels; the document's composed parent is the
/// window. Elements, slots, and text nodes are inserted under a parent (or detached with
/// `None`), shadow roots are attached to elements, and light children of a host can be
/// assigned to slots in the host's shadow tree.
///
/// Construction only ever adds leaves, so a `Tree` is acyclic by construction. Walks are
/// still bounded through [`ComposedTopology::walk_limit`].
///
/// ## Example
///
/// ```rust
/// use penumbra_tree::{ComposedTopology, NodeData, Tree};
///
/// let mut tree = Tree::new();
/// let host = tree.insert(Some(tree.document()), NodeData::element("x-card")).unwrap();
/// let root = tree.attach_shadow(host).unwrap();
/// let slot = tree.insert(Some(root), NodeData::slot("card_slot")).unwrap();
/// let text = tree.insert(Some(host), NodeData::text()).unwrap();
/// tree.assign_slot(text, Some(slot)).unwrap();
///
/// assert_eq!(tree.composed_parent(&text), Some(slot));
/// assert_eq!(tree.composed_parent(&root), Some(host));
/// assert_eq!(tree.rooting_shadow_root(&slot).unwrap(), Some(root));
/// assert_eq!(tree.rooting_shadow_root(&text).unwrap(), None);
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    window: NodeId,
    document: NodeId,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("window", &self.window)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    kind: NodeKind,
    label: Option<String>,
    /// Light parent, or the host for shadow roots.
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    shadow_root: Option<NodeId>,
    assigned_slot: Option<NodeId>,
}

impl Node {
    fn new(generation: u32, data: NodeData) -> Self {
        Self {
            generation,
            kind: data.kind,
            label: data.label,
            parent: None,
            children: Vec::new(),
            shadow_root: None,
            assigned_slot: None,
        }
    }
}

impl Tree {
    /// Create a tree holding only the `window` and `document` sentinels.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            window: NodeId::new(0, 0),
            document: NodeId::new(0, 0),
        };
        tree.window = tree.alloc(NodeData {
            kind: NodeKind::Window,
            label: Some("window".into()),
        });
        tree.document = tree.alloc(NodeData {
            kind: NodeKind::Document,
            label: Some("document".into()),
        });
        tree
    }

    /// The window sentinel.
    pub fn window(&self) -> NodeId {
        self.window
    }

    /// The document sentinel.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Insert a new node as the last child of `parent` (or as a detached root if `None`).
    ///
    /// Windows, documents, and shadow roots cannot be inserted this way.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        data: impl Into<NodeData>,
    ) -> Result<NodeId, TreeError> {
        let data = data.into();
        if matches!(
            data.kind,
            NodeKind::Window | NodeKind::Document | NodeKind::ShadowRoot
        ) {
            return Err(TreeError::NotInsertable(data.kind));
        }
        if let Some(p) = parent {
            let kind = self.try_node(p)?.kind;
            if !kind.accepts_children() {
                return Err(TreeError::NotAContainer { node: p, kind });
            }
        }
        let id = self.alloc(data);
        if let Some(p) = parent {
            self.node_mut(id).parent = Some(p);
            self.node_mut(p).children.push(id);
        }
        Ok(id)
    }

    /// Attach a shadow root to `host` and return it.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, TreeError> {
        let h = self.try_node(host)?;
        if h.kind != NodeKind::Element {
            return Err(TreeError::NotAHost {
                node: host,
                kind: h.kind,
            });
        }
        if h.shadow_root.is_some() {
            return Err(TreeError::ShadowAlreadyAttached(host));
        }
        let label = h.label.as_ref().map(|l| {
            let mut s = l.clone();
            s.push_str("#shadow-root");
            s
        });
        let root = self.alloc(NodeData {
            kind: NodeKind::ShadowRoot,
            label,
        });
        self.node_mut(root).parent = Some(host);
        self.node_mut(host).shadow_root = Some(root);
        Ok(root)
    }

    /// Assign `node` to `slot`, or clear its assignment with `None`.
    ///
    /// The slot must live in the shadow tree hosted by `node`'s light parent.
    pub fn assign_slot(&mut self, node: NodeId, slot: Option<NodeId>) -> Result<(), TreeError> {
        let n = self.try_node(node)?;
        let parent = n.parent;
        let kind = n.kind;
        let Some(slot) = slot else {
            self.node_mut(node).assigned_slot = None;
            return Ok(());
        };
        if !kind.is_slottable() {
            return Err(TreeError::NotSlottable { node, kind });
        }
        if self.try_node(slot)?.kind != NodeKind::Slot {
            return Err(TreeError::NotASlot(slot));
        }
        let scope_host = self
            .rooting_shadow_root(&slot)?
            .and_then(|root| self.host_of(&root));
        if scope_host.is_none() || scope_host != parent {
            return Err(TreeError::SlotOutOfScope { node, slot });
        }
        self.node_mut(node).assigned_slot = Some(slot);
        Ok(())
    }

    /// Remove a node, its light subtree, and any shadow tree it hosts.
    ///
    /// Removing the window or the document is a no-op. Slot assignments that point into the
    /// removed subtree are cleared.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.window || id == self.document {
            return;
        }
        let n = self.node(id);
        match (n.kind, n.parent) {
            (NodeKind::ShadowRoot, Some(host)) => self.node_mut(host).shadow_root = None,
            (_, Some(parent)) => self.node_mut(parent).children.retain(|c| *c != id),
            _ => {}
        }
        self.free_subtree(id);
        let dangling: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, n)| {
                let slot = n.as_ref()?.assigned_slot?;
                (!self.is_alive(slot)).then_some(idx)
            })
            .collect();
        for idx in dangling {
            if let Some(n) = self.nodes[idx].as_mut() {
                n.assigned_slot = None;
            }
        }
    }

    /// Returns true if `id` refers to a live node in this tree.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.kind)
    }

    /// Label of a live node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).and_then(|n| n.label.as_deref())
    }

    /// Light parent of a live node. Shadow roots, detached roots, and the window have none.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let n = self.node_opt(id)?;
        if n.kind == NodeKind::ShadowRoot {
            return None;
        }
        n.parent
    }

    /// Light children of a node, in insertion order. Empty for stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Slot a live node is assigned to.
    pub fn assigned_slot_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.assigned_slot)
    }

    /// Light children of the slot's host that are assigned to `slot`, in tree order.
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        let Some(host) = self
            .rooting_shadow_root(&slot)
            .ok()
            .flatten()
            .and_then(|root| self.host_of(&root))
        else {
            return Vec::new();
        };
        self.children_of(host)
            .iter()
            .copied()
            .filter(|c| self.assigned_slot_of(*c) == Some(slot))
            .collect()
    }

    /// First live node carrying `label`, in allocation order.
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().enumerate().find_map(|(idx, n)| {
            let n = n.as_ref().filter(|n| n.label.as_deref() == Some(label))?;
            Some(NodeId::new(u32::try_from(idx).ok()?, n.generation))
        })
    }

    /// Number of live nodes, sentinels included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Always false: the sentinels cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn free_subtree(&mut self, id: NodeId) {
        let n = self.node(id);
        let mut doomed = n.children.clone();
        doomed.extend(n.shadow_root);
        for child in doomed {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn try_node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.node_opt(id).ok_or(TreeError::Stale(id))
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    /// Panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }
}

impl ComposedTopology<NodeId> for Tree {
    /// Stale ids report a parentless light role, which ends any walk.
    fn role(&self, node: &NodeId) -> Role<NodeId> {
        let Some(n) = self.node_opt(*node) else {
            return Role::Light { parent: None };
        };
        match (n.kind, n.parent, n.assigned_slot) {
            (NodeKind::Document, ..) => Role::Document {
                window: Some(self.window),
            },
            (NodeKind::ShadowRoot, Some(host), _) => Role::ShadowRoot { host },
            (_, Some(parent), Some(slot)) => Role::Slotted { parent, slot },
            (_, parent, _) => Role::Light { parent },
        }
    }

    fn shadow_root_of(&self, node: &NodeId) -> Option<NodeId> {
        self.node_opt(*node).and_then(|n| n.shadow_root)
    }

    fn walk_limit(&self) -> usize {
        self.nodes.len() + 1
    }
}
