// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target retargeting.
//!
//! A listener must not see into shadow trees it sits outside of. Starting from the dispatch
//! target, the walk follows the composed path; whenever it reaches the shadow root that roots
//! the current candidate and the listener is not inside that shadow tree, the candidate moves
//! to the shadow root's host (the next node on the path). The final candidate is the target the
//! listener observes.
//!
//! ## Properties
//!
//! - A listener in the target's own shadow tree (or in a deeper tree the target is slotted
//!   into) observes the target unchanged.
//! - Moving the listener outward across more shadow boundaries only ever moves the observed
//!   target to a composed ancestor of the previous one.

use core::fmt::Debug;

use penumbra_tree::{ComposedTopology, WalkError};

use crate::path::ComposedPath;

/// Compute the target `listener` observes for an event travelling along `path`.
///
/// `path` must start at the dispatch target. When it is truncated (a non-composed event), no
/// candidate beyond its last node is considered.
///
/// ```
/// use penumbra_events::{composed_path, retarget};
/// use penumbra_tree::{NodeData, Tree};
///
/// let mut tree = Tree::new();
/// let host = tree.insert(Some(tree.document()), NodeData::element("x-host")).unwrap();
/// let root = tree.attach_shadow(host).unwrap();
/// let inner = tree.insert(Some(root), NodeData::element("inner")).unwrap();
/// let path = composed_path(&tree, inner).unwrap();
///
/// // Inside the shadow tree the real target is visible.
/// assert_eq!(retarget(&tree, &path, root).unwrap(), inner);
/// // Outside it, the host stands in for it.
/// assert_eq!(retarget(&tree, &path, tree.document()).unwrap(), host);
/// ```
pub fn retarget<K, T>(topology: &T, path: &ComposedPath<K>, listener: K) -> Result<K, WalkError>
where
    K: Copy + Eq + Debug,
    T: ComposedTopology<K> + ?Sized,
{
    let mut candidate = path.target();
    let mut scope = topology.rooting_shadow_root(&candidate)?;
    for (i, node) in path.iter().enumerate() {
        let Some(root) = scope else {
            break;
        };
        if *node != root {
            continue;
        }
        if topology.is_shadow_including_inclusive_ancestor(&root, &listener)? {
            break;
        }
        // The composed parent of a shadow root is its host.
        let Some(&host) = path.get(i + 1) else {
            break;
        };
        candidate = host;
        scope = topology.rooting_shadow_root(&host)?;
    }
    Ok(candidate)
}
