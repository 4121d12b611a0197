// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a propagation's deliveries and honor stop outcomes.
//!
//! The dispatcher executes a handler for each delivery of a [`Propagation`] and applies one
//! propagation rule. It is deliberately minimal:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`run`] reports where propagation stopped (if at all).
//! - Anything else a handler wants to record lives on the payload you pass to [`run`].
//!
//! ## Semantics
//!
//! - Deliveries are processed in order, target first.
//! - Every handler call receives the same `composedPath()` slice.
//! - [`Outcome::Stop`] aborts propagation immediately; the path already handed out is unchanged.
//!
//! Use [`ListenerRegistry`](crate::listeners::ListenerRegistry) for per-node listener lists; use
//! [`run`] directly when your toolkit keeps its own handler tables.
//!
//! ## Minimal example
//!
//! ```
//! use penumbra_events::dispatcher;
//! use penumbra_events::{Event, EventFlags, Outcome, Propagator, ShadowMode};
//! use penumbra_tree::{NodeData, Tree};
//!
//! let mut tree = Tree::new();
//! let host = tree.insert(Some(tree.document()), NodeData::element("x-host")).unwrap();
//! let root = tree.attach_shadow(host).unwrap();
//! let inner = tree.insert(Some(root), NodeData::element("inner")).unwrap();
//!
//! let event = Event::new("ping", EventFlags::BUBBLES | EventFlags::COMPOSED);
//! let propagation = Propagator::new(ShadowMode::Native)
//!     .propagate(&tree, inner, &event)
//!     .unwrap();
//!
//! let mut seen = Vec::new();
//! let stopped = dispatcher::run(&propagation, &mut seen, |d, path, seen| {
//!     seen.push((d.node, d.target, path.len()));
//!     Outcome::Continue
//! });
//!
//! assert!(stopped.is_none());
//! assert_eq!(seen[0], (inner, Some(inner), 5));
//! assert_eq!(seen[2], (host, Some(host), 5));
//! assert_eq!(seen[3], (tree.document(), Some(host), 5));
//! ```

use crate::propagator::Propagation;
use crate::types::{Delivery, Outcome};

/// Run a handler over a propagation's deliveries and honor stop outcomes.
///
/// ## Usage
///
/// - Inputs:
///   - `propagation`: a plan from [`Propagator::propagate`](crate::Propagator::propagate).
///   - `event`: a mutable payload carried across handler calls; you own its shape.
///   - `handler`: per-delivery callback receiving the delivery, the shared composed path, and
///     the payload; return an [`Outcome`] to control propagation.
/// - Return:
///   - `None` if every delivery was visited.
///   - `Some(d)` with the last visited [`Delivery`] if a handler returned [`Outcome::Stop`].
pub fn run<'a, K, E>(
    propagation: &'a Propagation<K>,
    event: &mut E,
    mut handler: impl FnMut(&Delivery<K>, &[K], &mut E) -> Outcome,
) -> Option<&'a Delivery<K>>
where
    K: Copy + Eq,
{
    let path = propagation.composed_path();
    for d in propagation.deliveries() {
        match handler(d, path, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use crate::propagator::Propagator;
    use crate::types::{Event, EventFlags, ShadowMode};
    use alloc::vec;
    use alloc::vec::Vec;
    use penumbra_tree::NodeId;

    fn composed_bubbling(f: &Fixture) -> Propagation<NodeId> {
        Propagator::new(ShadowMode::Native)
            .propagate(
                &f.tree,
                f.x_button,
                &Event::new("test", EventFlags::BUBBLES | EventFlags::COMPOSED),
            )
            .unwrap()
    }

    #[test]
    fn continue_through_all() {
        let f = Fixture::new();
        let p = composed_bubbling(&f);
        let mut seen: Vec<NodeId> = Vec::new();
        let stopped = run(&p, &mut seen, |d, _, seen| {
            seen.push(d.node);
            Outcome::Continue
        });
        assert!(stopped.is_none());
        assert_eq!(seen.len(), p.deliveries().len());
    }

    #[test]
    fn stop_aborts_propagation() {
        let f = Fixture::new();
        let p = composed_bubbling(&f);
        let mut seen: Vec<NodeId> = Vec::new();
        let stopped = run(&p, &mut seen, |d, _, seen| {
            seen.push(d.node);
            if d.node == f.x_button_group {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        let stopped = stopped.unwrap();
        assert_eq!(stopped.node, f.x_button_group);
        assert_eq!(
            seen,
            vec![
                f.x_button,
                f.container_slot,
                f.button_group_slot,
                f.button_group_div,
                f.x_button_group_root,
                f.x_button_group,
            ]
        );
    }

    #[test]
    fn every_handler_sees_the_same_path() {
        let f = Fixture::new();
        let p = composed_bubbling(&f);
        let mut lens: Vec<usize> = Vec::new();
        run(&p, &mut lens, |_, path, lens| {
            assert_eq!(path, p.composed_path());
            lens.push(path.len());
            Outcome::Continue
        });
        assert!(lens.iter().all(|&l| l == 13));
    }
}
