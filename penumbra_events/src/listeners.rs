// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: ordered per-node listeners invoked synchronously over a propagation.
//!
//! Listeners are registered per `(node, event type)` and run in registration order within a
//! node, in delivery order across nodes. Each call receives an [`Invocation`] exposing the
//! current target, the observed target, the phase, and the shared `composedPath()`.
//!
//! Listeners may add or remove listeners through the [`Invocation`] while a dispatch is running.
//! Those changes are queued and applied once the walk ends, so they never affect the dispatch
//! that made them.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use penumbra_events::{Event, EventFlags, ListenerRegistry, Outcome, Propagator};
//! use penumbra_tree::{NodeData, Tree};
//!
//! let mut tree = Tree::new();
//! let host = tree.insert(Some(tree.document()), NodeData::element("x-host")).unwrap();
//! let root = tree.attach_shadow(host).unwrap();
//! let inner = tree.insert(Some(root), NodeData::element("inner")).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut listeners = ListenerRegistry::new();
//! let log = seen.clone();
//! listeners.add(tree.document(), "ping", move |inv| {
//!     log.borrow_mut().push(inv.target());
//!     Outcome::Continue
//! });
//!
//! let event = Event::new("ping", EventFlags::BUBBLES | EventFlags::COMPOSED);
//! let report = Propagator::default()
//!     .dispatch(&tree, &mut listeners, inner, &event)
//!     .unwrap();
//!
//! assert_eq!(*seen.borrow(), vec![Some(host)]);
//! assert_eq!(report.invoked, vec![(tree.document(), Some(host))]);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug};
use core::hash::Hash;

use hashbrown::HashMap;

use crate::dispatcher;
use crate::propagator::Propagation;
use crate::types::{Delivery, Event, Outcome, Phase};

/// Identifier of a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// What a listener sees when it is invoked.
#[derive(Copy, Clone, Debug)]
pub struct Invocation<'a, K> {
    event: &'a Event,
    delivery: &'a Delivery<K>,
    composed_path: &'a [K],
    pending: &'a Pending<K>,
}

impl<'a, K: Copy> Invocation<'a, K> {
    /// The event.
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// Node the listener is registered on.
    pub fn current_target(&self) -> K {
        self.delivery.node
    }

    /// Target as observed from the current node. `None` when it is hidden.
    pub fn target(&self) -> Option<K> {
        self.delivery.target
    }

    /// Propagation phase.
    pub fn phase(&self) -> Phase {
        self.delivery.phase
    }

    /// `composedPath()`: identical for every listener of one dispatch.
    pub fn composed_path(&self) -> &'a [K] {
        self.composed_path
    }

    /// Register a listener once the current dispatch has finished.
    ///
    /// The id is valid immediately; the listener first runs on the next dispatch.
    pub fn add_listener(
        &self,
        node: K,
        event_type: impl Into<String>,
        callback: impl FnMut(&Invocation<'_, K>) -> Outcome + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.pending.next_id.get());
        self.pending.next_id.set(id.0 + 1);
        self.pending.ops.borrow_mut().push(Deferred::Add(
            node,
            Listener {
                id,
                event_type: event_type.into(),
                callback: Box::new(callback),
            },
        ));
        id
    }

    /// Unregister a listener once the current dispatch has finished.
    pub fn remove_listener(&self, id: ListenerId) {
        self.pending.ops.borrow_mut().push(Deferred::Remove(id));
    }
}

type Callback<K> = Box<dyn FnMut(&Invocation<'_, K>) -> Outcome>;

struct Listener<K> {
    id: ListenerId,
    event_type: String,
    callback: Callback<K>,
}

enum Deferred<K> {
    Add(K, Listener<K>),
    Remove(ListenerId),
}

/// Registry changes requested by listeners during a dispatch.
struct Pending<K> {
    next_id: Cell<u64>,
    ops: RefCell<Vec<Deferred<K>>>,
}

impl<K> Debug for Pending<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("ops", &self.ops.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Result of running listeners over one propagation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport<K> {
    /// `(node, observed target)` for every node at which at least one listener ran, in order.
    pub invoked: Vec<(K, Option<K>)>,
    /// The `composedPath()` every listener saw.
    pub composed_path: Vec<K>,
    /// Node whose listener returned [`Outcome::Stop`], if any.
    pub stopped_at: Option<K>,
}

/// Ordered `(node, event type, callback)` entries.
pub struct ListenerRegistry<K> {
    by_node: HashMap<K, Vec<Listener<K>>>,
    next_id: u64,
}

impl<K> Debug for ListenerRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.by_node.values().map(Vec::len).sum();
        f.debug_struct("ListenerRegistry")
            .field("nodes", &self.by_node.len())
            .field("listeners", &total)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash> Default for ListenerRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> ListenerRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_node: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register `callback` for `event_type` events reaching `node`.
    pub fn add(
        &mut self,
        node: K,
        event_type: impl Into<String>,
        callback: impl FnMut(&Invocation<'_, K>) -> Outcome + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_node.entry(node).or_default().push(Listener {
            id,
            event_type: event_type.into(),
            callback: Box::new(callback),
        });
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        self.by_node.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|l| l.id != id);
            removed |= listeners.len() != before;
            !listeners.is_empty()
        });
        removed
    }

    /// Drop every listener registered on `node`.
    pub fn clear_node(&mut self, node: &K) {
        self.by_node.remove(node);
    }

    /// Whether `node` has a listener for `event_type`.
    pub fn has_listener(&self, node: &K, event_type: &str) -> bool {
        self.by_node
            .get(node)
            .is_some_and(|ls| ls.iter().any(|l| l.event_type == event_type))
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

impl<K: Copy + Eq + Hash + Debug> ListenerRegistry<K> {
    /// Invoke matching listeners over `propagation`, synchronously and in order.
    ///
    /// A listener returning [`Outcome::Stop`] ends the walk at once; later listeners, including
    /// the remaining ones on the same node, do not run. Additions and removals requested through
    /// [`Invocation`] are applied after the walk.
    pub fn dispatch(&mut self, propagation: &Propagation<K>) -> DispatchReport<K> {
        let event = propagation.event();
        let pending = Pending {
            next_id: Cell::new(self.next_id),
            ops: RefCell::new(Vec::new()),
        };
        let by_node = &mut self.by_node;
        let mut invoked = Vec::new();
        let stopped = dispatcher::run(propagation, &mut invoked, |d, path, invoked| {
            let Some(listeners) = by_node.get_mut(&d.node) else {
                return Outcome::Continue;
            };
            let invocation = Invocation {
                event,
                delivery: d,
                composed_path: path,
                pending: &pending,
            };
            let mut ran = false;
            let mut outcome = Outcome::Continue;
            for l in listeners
                .iter_mut()
                .filter(|l| l.event_type == event.event_type())
            {
                ran = true;
                outcome = (l.callback)(&invocation);
                if outcome == Outcome::Stop {
                    break;
                }
            }
            if ran {
                invoked.push((d.node, d.target));
            }
            outcome
        });
        let stopped_at = stopped.map(|d| d.node);
        if let Some(node) = stopped_at {
            log::debug!("{:?} stopped at {node:?}", event.event_type());
        }
        self.next_id = pending.next_id.get();
        for op in pending.ops.into_inner() {
            match op {
                Deferred::Add(node, listener) => {
                    self.by_node.entry(node).or_default().push(listener);
                }
                Deferred::Remove(id) => {
                    self.remove(id);
                }
            }
        }
        DispatchReport {
            invoked,
            composed_path: propagation.composed_path().to_vec(),
            stopped_at,
        }
    }
}
