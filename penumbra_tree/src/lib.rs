// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=penumbra_tree --heading-base-level=0

//! Penumbra Tree: a composed-tree model for shadow hosts, shadow roots, and slots.
//!
//! Component systems compose independently encapsulated subtrees into one rendered tree.
//! This crate models the edges that make that composition walkable:
//!
//! - Light edges: the author-visible parent/child tree.
//! - Host edges: a shadow root to the element it is attached to.
//! - Slot edges: a light child of a host to the slot that stands in for it inside the host's shadow tree.
//!
//! ## Where this fits
//!
//! - Composition (templating, rendering, diffing): upstream, produces the tree.
//! - Composed-tree model: this crate.
//! - Event propagation: `penumbra_events`, which walks this model to compute composed paths and retargeted targets.
//!
//! ## API overview
//!
//! - [`ComposedTopology`]: the seam. Implement [`ComposedTopology::role`] and
//!   [`ComposedTopology::shadow_root_of`] for your own tree and get
//!   [`composed_parent`](ComposedTopology::composed_parent),
//!   [`rooting_shadow_root`](ComposedTopology::rooting_shadow_root), and the shadow-including
//!   ancestry queries for free.
//! - [`Role`]: the tagged union every node reports: light, shadow root, document, or slotted.
//! - [`Tree`]: an arena implementation with `window`/`document` sentinels, generational [`NodeId`]s,
//!   shadow attachment, and checked slot assignment.
//! - [`WalkBudget`] / [`WalkError`]: bounded walks; a cycle fails fast instead of looping.
//! - [`TreeError`]: construction misuse.
//!
//! ## Example
//!
//! ```rust
//! use penumbra_tree::{ComposedTopology, NodeData, Tree};
//!
//! let mut tree = Tree::new();
//! let host = tree.insert(Some(tree.document()), NodeData::element("x-button")).unwrap();
//! let root = tree.attach_shadow(host).unwrap();
//! let button = tree.insert(Some(root), NodeData::element("button")).unwrap();
//!
//! // button → #shadow-root → x-button → document → window
//! let mut chain = vec![button];
//! while let Some(p) = tree.composed_parent(chain.last().unwrap()) {
//!     chain.push(p);
//! }
//! assert_eq!(chain, vec![button, root, host, tree.document(), tree.window()]);
//! assert_eq!(tree.rooting_shadow_root(&button).unwrap(), Some(root));
//! assert_eq!(tree.rooting_shadow_root(&host).unwrap(), None);
//! // Light chains end at the document; only the composed parent reaches the window.
//! assert_eq!(tree.root_of(&host).unwrap(), tree.document());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod topology;
mod tree;
mod types;

pub use error::{TreeError, WalkError};
pub use topology::{ComposedTopology, DEFAULT_WALK_LIMIT, Role, WalkBudget};
pub use tree::Tree;
pub use types::{NodeData, NodeId, NodeKind};
