// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composed paths.
//!
//! The composed path of a target is the target followed by repeated
//! [`composed_parent`](penumbra_tree::ComposedTopology::composed_parent) steps until the top of
//! the composed tree (the window, or the root of a detached tree). It is a structural property
//! of the tree, so computing it twice on an unchanged tree yields the same sequence.

use core::fmt::Debug;
use core::ops::Deref;

use penumbra_tree::{ComposedTopology, WalkBudget, WalkError};
use smallvec::SmallVec;

/// Ordered composed path, target first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComposedPath<K>(SmallVec<[K; 16]>);

impl<K: Copy + Eq> ComposedPath<K> {
    /// The node the path starts at.
    pub fn target(&self) -> K {
        self.0[0]
    }

    /// Index of `node` in the path.
    pub fn position(&self, node: &K) -> Option<usize> {
        self.0.iter().position(|n| n == node)
    }

    /// The first `len` nodes, never fewer than the target alone.
    pub fn prefix(&self, len: usize) -> Self {
        let len = len.clamp(1, self.0.len());
        Self(SmallVec::from_slice(&self.0[..len]))
    }

    /// The nodes as a slice.
    pub fn as_slice(&self) -> &[K] {
        &self.0
    }
}

impl<K> Deref for ComposedPath<K> {
    type Target = [K];

    fn deref(&self) -> &[K] {
        &self.0
    }
}

/// Compute the full composed path of `target`.
///
/// Fails only when the walk exceeds the topology's [`walk_limit`](ComposedTopology::walk_limit).
///
/// ```
/// use penumbra_events::composed_path;
/// use penumbra_tree::{NodeData, Tree};
///
/// let mut tree = Tree::new();
/// let host = tree.insert(Some(tree.document()), NodeData::element("x-host")).unwrap();
/// let root = tree.attach_shadow(host).unwrap();
/// let inner = tree.insert(Some(root), NodeData::element("inner")).unwrap();
///
/// let path = composed_path(&tree, inner).unwrap();
/// assert_eq!(&path[..], &[inner, root, host, tree.document(), tree.window()]);
/// ```
pub fn composed_path<K, T>(topology: &T, target: K) -> Result<ComposedPath<K>, WalkError>
where
    K: Copy + Eq + Debug,
    T: ComposedTopology<K> + ?Sized,
{
    let mut budget = WalkBudget::new(topology.walk_limit());
    let mut out = SmallVec::new();
    let mut cur = Some(target);
    while let Some(n) = cur {
        out.push(n);
        cur = topology.composed_parent(&n);
        if cur.is_some() {
            budget.step()?;
        }
    }
    log::trace!("composed path from {target:?}: {} nodes", out.len());
    Ok(ComposedPath(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use penumbra_tree::{NodeData, Role, Tree};

    #[test]
    fn fixture_path_from_button() {
        let f = Fixture::new();
        let path = composed_path(&f.tree, f.button).unwrap();
        assert_eq!(&path[..], &f.full_path_from_button()[..]);
        assert_eq!(path.len(), 16);
        assert_eq!(path.target(), f.button);
        assert_eq!(path.position(&f.x_button), Some(3));
    }

    #[test]
    fn fixture_path_from_host() {
        let f = Fixture::new();
        let path = composed_path(&f.tree, f.x_button).unwrap();
        assert_eq!(&path[..], &f.full_path_from_button()[3..]);
    }

    #[test]
    fn path_is_deterministic() {
        let f = Fixture::new();
        for node in f.all() {
            let a = composed_path(&f.tree, node).unwrap();
            let b = composed_path(&f.tree, node).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn detached_target_terminates_at_its_root() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::element("detached")).unwrap();
        let leaf = tree.insert(Some(root), NodeData::element("leaf")).unwrap();
        let path = composed_path(&tree, leaf).unwrap();
        assert_eq!(path.as_slice(), &[leaf, root]);
    }

    #[test]
    fn window_path_is_a_singleton() {
        let tree = Tree::new();
        let path = composed_path(&tree, tree.window()).unwrap();
        assert_eq!(path.as_slice(), &[tree.window()]);
    }

    #[test]
    fn slot_cycle_is_reported() {
        // 1 is slotted into 2, whose light parent is 1.
        struct Loop;
        impl ComposedTopology<u8> for Loop {
            fn role(&self, node: &u8) -> Role<u8> {
                match node {
                    1 => Role::Slotted { parent: 0, slot: 2 },
                    2 => Role::Light { parent: Some(1) },
                    _ => Role::Light { parent: None },
                }
            }
            fn shadow_root_of(&self, _node: &u8) -> Option<u8> {
                None
            }
            fn walk_limit(&self) -> usize {
                32
            }
        }
        assert_eq!(composed_path(&Loop, 1), Err(WalkError { limit: 32 }));
    }
}
