// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener logs for inspecting propagation.
//!
//! [`listen_along_chain`] registers a recording listener on the target and on every
//! shadow-including ancestor (light parent, or host for a shadow root), up to and including the
//! document, the way a test harness observes a dispatch. Each invocation appends a [`TraceEntry`] to a shared [`TraceLog`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Debug;
use core::hash::Hash;

use penumbra_tree::{ComposedTopology, WalkError};

use crate::listeners::{Invocation, ListenerId, ListenerRegistry};
use crate::types::Outcome;

/// One recorded listener invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry<K> {
    /// Node the listener was registered on.
    pub current_target: K,
    /// Observed target.
    pub target: Option<K>,
    /// `composedPath()` as seen by the listener.
    pub composed_path: Vec<K>,
}

/// Shared, append-only log of invocations.
#[derive(Clone, Debug)]
pub struct TraceLog<K>(Rc<RefCell<Vec<TraceEntry<K>>>>);

impl<K> Default for TraceLog<K> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }
}

impl<K: Copy + 'static> TraceLog<K> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that records every invocation into this log.
    pub fn recorder(&self) -> impl FnMut(&Invocation<'_, K>) -> Outcome + 'static {
        let log = self.0.clone();
        move |inv| {
            log.borrow_mut().push(TraceEntry {
                current_target: inv.current_target(),
                target: inv.target(),
                composed_path: inv.composed_path().to_vec(),
            });
            Outcome::Continue
        }
    }

    /// Snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<TraceEntry<K>> {
        self.0.borrow().clone()
    }

    /// `(current target, observed target)` pairs, in order.
    pub fn pairs(&self) -> Vec<(K, Option<K>)> {
        self.0
            .borrow()
            .iter()
            .map(|e| (e.current_target, e.target))
            .collect()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Forget every entry.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Register a recorder for `event_type` on `target` and each of its shadow-including ancestors.
///
/// Returns the registered listener ids, innermost first.
pub fn listen_along_chain<K, T>(
    topology: &T,
    listeners: &mut ListenerRegistry<K>,
    target: K,
    event_type: &str,
    log: &TraceLog<K>,
) -> Result<Vec<ListenerId>, WalkError>
where
    K: Copy + Eq + Hash + Debug + 'static,
    T: ComposedTopology<K> + ?Sized,
{
    let chain = topology.shadow_including_ancestors(&target)?;
    Ok(chain
        .into_iter()
        .map(|node| listeners.add(node, event_type, log.recorder()))
        .collect())
}
