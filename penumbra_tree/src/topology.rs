// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composed-tree seam: node roles and the walks derived from them.
//!
//! ## Overview
//!
//! A topology only has to answer two questions per node: what [`Role`] it plays and whether
//! it hosts a shadow root. Everything else (composed parent, light root, rooting shadow root,
//! shadow-including ancestry) is derived here, so external trees and the arena [`Tree`](crate::Tree)
//! share one implementation of the rules.
//!
//! ## Edges
//!
//! - Light edges: the author-visible parent. A shadow root has no light parent.
//! - Host edges: shadow root → host element.
//! - Slot edges: slotted node → the slot it is assigned to.
//! - The window edge: document → window. Only the composed parent follows it.
//!
//! The composed parent follows slot edges first, then host edges, then light edges. The rooting
//! shadow root follows light edges only.
//!
//! ## Bounded walks
//!
//! Every walk that takes more than one step is metered by a [`WalkBudget`] sized from
//! [`ComposedTopology::walk_limit`]. A walk that runs out of budget returns [`WalkError`].

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::WalkError;

/// Default bound on the number of steps in a single walk.
pub const DEFAULT_WALK_LIMIT: usize = 4096;

/// The role a node plays in the composed tree.
///
/// Each node has exactly one role; the composed parent is a single match over it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role<K> {
    /// An ordinary node: an element, a slot, a text node, or the window.
    Light {
        /// Light parent, `None` at a root.
        parent: Option<K>,
    },
    /// The root of a shadow tree.
    ShadowRoot {
        /// Element the shadow tree is attached to.
        host: K,
    },
    /// The root of the document tree.
    ///
    /// Light and shadow-including walks end here; only the composed parent continues to the
    /// window.
    Document {
        /// Window the document belongs to, if any.
        window: Option<K>,
    },
    /// A light child of a host that is assigned to a slot in the host's shadow tree.
    Slotted {
        /// Light parent (the host).
        parent: K,
        /// Slot standing in for the node in the composed tree.
        slot: K,
    },
}

/// Step counter for a bounded walk.
#[derive(Clone, Debug)]
pub struct WalkBudget {
    limit: usize,
    steps: usize,
}

impl WalkBudget {
    /// A fresh budget allowing `limit` steps.
    pub const fn new(limit: usize) -> Self {
        Self { limit, steps: 0 }
    }

    /// Spend one step, failing once the limit is exceeded.
    pub fn step(&mut self) -> Result<(), WalkError> {
        self.steps += 1;
        if self.steps > self.limit {
            log::warn!(
                "composed-tree walk exceeded {} steps; aborting",
                self.limit
            );
            return Err(WalkError { limit: self.limit });
        }
        Ok(())
    }
}

/// A tree with light, host, and slot edges.
///
/// Implement [`role`](Self::role) and [`shadow_root_of`](Self::shadow_root_of); the rest is provided.
pub trait ComposedTopology<K: Copy + Eq + Debug> {
    /// Role of `node`.
    fn role(&self, node: &K) -> Role<K>;

    /// Shadow root hosted by `node`, if any.
    fn shadow_root_of(&self, node: &K) -> Option<K>;

    /// Maximum number of steps a single walk may take before it is treated as a cycle.
    fn walk_limit(&self) -> usize {
        DEFAULT_WALK_LIMIT
    }

    /// One step up the composed tree: assigned slot, else host, else light parent.
    fn composed_parent(&self, node: &K) -> Option<K> {
        match self.role(node) {
            Role::Slotted { slot, .. } => Some(slot),
            Role::ShadowRoot { host } => Some(host),
            Role::Document { window } => window,
            Role::Light { parent } => parent,
        }
    }

    /// Author-visible parent. Slot assignment is ignored; shadow roots have none.
    fn light_parent(&self, node: &K) -> Option<K> {
        match self.role(node) {
            Role::Light { parent } => parent,
            Role::Slotted { parent, .. } => Some(parent),
            Role::ShadowRoot { .. } | Role::Document { .. } => None,
        }
    }

    /// Light parent, or the host when `node` is a shadow root.
    fn shadow_including_parent(&self, node: &K) -> Option<K> {
        match self.role(node) {
            Role::Light { parent } => parent,
            Role::Slotted { parent, .. } => Some(parent),
            Role::ShadowRoot { host } => Some(host),
            Role::Document { .. } => None,
        }
    }

    /// Host of `node` when it is a shadow root.
    fn host_of(&self, node: &K) -> Option<K> {
        match self.role(node) {
            Role::ShadowRoot { host } => Some(host),
            _ => None,
        }
    }

    /// Whether `node` is a shadow root.
    fn is_shadow_root(&self, node: &K) -> bool {
        matches!(self.role(node), Role::ShadowRoot { .. })
    }

    /// Whether `node` hosts a shadow root.
    fn is_shadow_host(&self, node: &K) -> bool {
        self.shadow_root_of(node).is_some()
    }

    /// Root of `node`'s light tree (a shadow root, the document, or a detached root).
    fn root_of(&self, node: &K) -> Result<K, WalkError> {
        let mut budget = WalkBudget::new(self.walk_limit());
        let mut cur = *node;
        while let Some(parent) = self.light_parent(&cur) {
            budget.step()?;
            cur = parent;
        }
        Ok(cur)
    }

    /// The shadow root whose tree `node` belongs to; a shadow root roots itself.
    ///
    /// `None` when `node` lives in the document tree or in a detached light tree.
    fn rooting_shadow_root(&self, node: &K) -> Result<Option<K>, WalkError> {
        let root = self.root_of(node)?;
        Ok(self.is_shadow_root(&root).then_some(root))
    }

    /// Whether `ancestor` is `node` or is reached from it through light parents and hosts.
    fn is_shadow_including_inclusive_ancestor(
        &self,
        ancestor: &K,
        node: &K,
    ) -> Result<bool, WalkError> {
        let mut budget = WalkBudget::new(self.walk_limit());
        let mut cur = *node;
        loop {
            if cur == *ancestor {
                return Ok(true);
            }
            match self.shadow_including_parent(&cur) {
                Some(parent) => {
                    budget.step()?;
                    cur = parent;
                }
                None => return Ok(false),
            }
        }
    }

    /// `node` followed by its shadow-including ancestors, innermost first.
    fn shadow_including_ancestors(&self, node: &K) -> Result<Vec<K>, WalkError> {
        let mut budget = WalkBudget::new(self.walk_limit());
        let mut out = Vec::new();
        let mut cur = Some(*node);
        while let Some(n) = cur {
            out.push(n);
            cur = self.shadow_including_parent(&n);
            if cur.is_some() {
                budget.step()?;
            }
        }
        Ok(out)
    }
}
