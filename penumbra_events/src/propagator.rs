// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagator implementation.
//!
//! ## Overview
//!
//! Computes the composed path once, decides where a non-composed event stops, and emits the
//! ordered deliveries (target first, then ancestors) with the target each node observes.
//!
//! ## Boundary
//!
//! - Composed events travel the whole composed path.
//! - Non-composed events stop at the target's rooting shadow root. `composedPath()` as seen by
//!   every receiver is the path up to and including that root.
//! - `BUBBLES` never changes the reported path; it only gates which nodes are notified.
//!
//! ## Modes
//!
//! | event                  | [`Native`](ShadowMode::Native)            | [`Synthetic`](ShadowMode::Synthetic)                                   |
//! |------------------------|-------------------------------------------|-------------------------------------------------------------------------|
//! | bubbles, composed      | every node on the path, retargeted        | same                                                                    |
//! | bubbles, not composed  | every node up to the boundary, retargeted | same, then plain nodes past the boundary with a `None` target           |
//! | not bubbling           | nodes whose observed target is themselves | the target only                                                         |
//!
//! The synthetic rows reproduce what an emulated shadow tree can actually do: it lives in one
//! flat real tree, so a non-composed event keeps bubbling past the boundary. Plain nodes out
//! there are still notified but cannot be shown a target; hosts and shadow roots filter the
//! event out. Likewise the flat tree has no at-target phase for enclosing hosts.
//!
//! ## See Also
//!
//! [`ListenerRegistry`](crate::listeners::ListenerRegistry) and [`dispatcher`](crate::dispatcher)
//! for executing listeners over a [`Propagation`].

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use penumbra_tree::{ComposedTopology, WalkError};

use crate::listeners::{DispatchReport, ListenerRegistry};
use crate::path::{ComposedPath, composed_path};
use crate::retarget::retarget;
use crate::types::{Delivery, Event, ShadowMode};

/// Propagation plan for one dispatch.
///
/// Immutable once computed; listeners that mutate the tree do not affect it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Propagation<K> {
    event: Event,
    mode: ShadowMode,
    path: ComposedPath<K>,
    reported_len: usize,
    deliveries: Vec<Delivery<K>>,
}

impl<K: Copy + Eq> Propagation<K> {
    /// The event being propagated.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Mode the plan was computed for.
    pub fn mode(&self) -> ShadowMode {
        self.mode
    }

    /// The dispatch target.
    pub fn target(&self) -> K {
        self.path.target()
    }

    /// The untruncated composed path of the target.
    pub fn full_path(&self) -> &ComposedPath<K> {
        &self.path
    }

    /// The path every receiver sees as `composedPath()`.
    pub fn composed_path(&self) -> &[K] {
        &self.path[..self.reported_len]
    }

    /// Shadow root a non-composed event stops at, if it stops before the top.
    pub fn boundary(&self) -> Option<K> {
        (self.reported_len < self.path.len()).then(|| self.path[self.reported_len - 1])
    }

    /// Ordered deliveries, target first.
    pub fn deliveries(&self) -> &[Delivery<K>] {
        &self.deliveries
    }
}

/// Computes propagation plans for one runtime.
///
/// ## Usage
///
/// - Construct with [`Propagator::new`] or from the runtime's capability flag with
///   [`Propagator::from_native_support`]. The mode is fixed for the propagator's lifetime.
/// - Call [`Propagator::propagate`] to get a [`Propagation`], then run listeners over it with
///   [`ListenerRegistry::dispatch`] or [`dispatcher::run`](crate::dispatcher::run).
/// - Or call [`Propagator::dispatch`] to do both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Propagator {
    mode: ShadowMode,
}

impl Propagator {
    /// Create a propagator for `mode`.
    pub const fn new(mode: ShadowMode) -> Self {
        Self { mode }
    }

    /// Create a propagator from the runtime's native shadow support flag.
    pub const fn from_native_support(native_shadow_supported: bool) -> Self {
        Self::new(ShadowMode::from_native_support(native_shadow_supported))
    }

    /// The mode this propagator applies.
    pub fn mode(&self) -> ShadowMode {
        self.mode
    }

    /// Compute the propagation of `event` dispatched on `target`.
    pub fn propagate<K, T>(
        &self,
        topology: &T,
        target: K,
        event: &Event,
    ) -> Result<Propagation<K>, WalkError>
    where
        K: Copy + Eq + Debug,
        T: ComposedTopology<K> + ?Sized,
    {
        let path = composed_path(topology, target)?;
        let boundary = if event.composed() {
            None
        } else {
            topology
                .rooting_shadow_root(&target)?
                .and_then(|root| path.position(&root))
        };
        let reported_len = boundary.map_or(path.len(), |i| i + 1);
        let reported = path.prefix(reported_len);

        let mut deliveries = Vec::new();
        if event.bubbles() || self.mode.is_native() {
            for &node in reported.iter() {
                let observed = retarget(topology, &reported, node)?;
                if event.bubbles() || observed == node {
                    deliveries.push(Delivery::retargeted(node, observed));
                }
            }
        } else {
            deliveries.push(Delivery::retargeted(target, target));
        }

        if event.bubbles() && !self.mode.is_native() && boundary.is_some() {
            for &node in &path[reported_len..] {
                if topology.is_shadow_root(&node) || topology.is_shadow_host(&node) {
                    continue;
                }
                log::debug!(
                    "synthetic {:?}: {node:?} is past the shadow boundary; target hidden",
                    event.event_type()
                );
                deliveries.push(Delivery::nulled(node));
            }
        }

        log::trace!(
            "propagate {:?} from {target:?} ({:?}, {:?}): {} deliveries, composedPath length {}",
            event.event_type(),
            self.mode,
            event.flags(),
            deliveries.len(),
            reported_len
        );
        Ok(Propagation {
            event: event.clone(),
            mode: self.mode,
            path,
            reported_len,
            deliveries,
        })
    }

    /// Propagate `event` from `target` and invoke matching listeners in `listeners`.
    pub fn dispatch<K, T>(
        &self,
        topology: &T,
        listeners: &mut ListenerRegistry<K>,
        target: K,
        event: &Event,
    ) -> Result<DispatchReport<K>, WalkError>
    where
        K: Copy + Eq + Hash + Debug,
        T: ComposedTopology<K> + ?Sized,
    {
        let propagation = self.propagate(topology, target, event)?;
        Ok(listeners.dispatch(&propagation))
    }
}
