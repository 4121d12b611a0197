// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=penumbra_events --heading-base-level=0

//! Penumbra Events: deterministic, `no_std` event propagation across shadow boundaries.
//!
//! ## Overview
//!
//! Given a composed tree (see [`penumbra_tree`]) and a dispatch target, this crate computes:
//!
//! - the composed path the event travels ([`composed_path`]),
//! - the target each listening node observes ([`retarget`]),
//! - which nodes are notified, and in what order, given the event's `bubbles`/`composed` flags and
//!   whether shadow encapsulation is native or synthetic ([`Propagator::propagate`]).
//!
//! ## Inputs
//!
//! Any tree implementing [`ComposedTopology`](penumbra_tree::ComposedTopology), an [`Event`]
//! carrying [`EventFlags`], and a [`ShadowMode`] fixed per [`Propagator`].
//!
//! ## Native and synthetic modes
//!
//! In [`ShadowMode::Native`] a non-composed event stops at the target's shadow root, and a
//! non-bubbling event still reaches every enclosing host in its at-target phase.
//! In [`ShadowMode::Synthetic`] shadow trees are emulated over one flat tree: a non-composed event
//! keeps bubbling past the shadow root, and plain nodes out there observe a `None` target while
//! hosts and shadow roots are skipped; a non-bubbling event reaches the target only.
//! This gap is intentional and stable. See [`propagator`] for the full table.
//!
//! ## Layering
//!
//! The propagator only computes the plan. [`ListenerRegistry`] invokes per-node listeners over it,
//! and [`dispatcher::run`] is the low-level runner for toolkits that keep their own handler tables.
//! [`trace`] records what listeners saw.
//!
//! ## Example
//!
//! ```
//! use penumbra_events::trace::{TraceLog, listen_along_chain};
//! use penumbra_events::{Event, EventFlags, ListenerRegistry, Propagator, ShadowMode};
//! use penumbra_tree::{NodeData, Tree};
//!
//! let mut tree = Tree::new();
//! let host = tree.insert(Some(tree.document()), NodeData::element("x-host")).unwrap();
//! let root = tree.attach_shadow(host).unwrap();
//! let inner = tree.insert(Some(root), NodeData::element("inner")).unwrap();
//!
//! let mut listeners = ListenerRegistry::new();
//! let log = TraceLog::new();
//! listen_along_chain(&tree, &mut listeners, inner, "ping", &log).unwrap();
//!
//! // Not composed, bubbling, without native shadow support.
//! let event = Event::new("ping", EventFlags::BUBBLES);
//! Propagator::new(ShadowMode::Synthetic)
//!     .dispatch(&tree, &mut listeners, inner, &event)
//!     .unwrap();
//!
//! assert_eq!(
//!     log.pairs(),
//!     vec![
//!         (inner, Some(inner)),
//!         (root, Some(inner)),
//!         // x-host is a shadow host past the boundary: skipped.
//!         (tree.document(), None),
//!     ]
//! );
//! assert!(log.entries().iter().all(|e| e.composed_path == vec![inner, root]));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod listeners;
pub mod path;
pub mod propagator;
pub mod retarget;
pub mod trace;
pub mod types;

#[cfg(test)]
mod fixture;
#[cfg(test)]
mod scenarios;

pub use listeners::{DispatchReport, Invocation, ListenerId, ListenerRegistry};
pub use path::{ComposedPath, composed_path};
pub use propagator::{Propagation, Propagator};
pub use retarget::retarget;
pub use types::{Delivery, Event, EventFlags, Outcome, Phase, ShadowMode};
