// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end dispatches over the container fixture, observed by listeners on the target and
//! every shadow-including ancestor.

use alloc::vec;
use alloc::vec::Vec;

use penumbra_tree::NodeId;

use crate::fixture::Fixture;
use crate::listeners::ListenerRegistry;
use crate::propagator::Propagator;
use crate::trace::{TraceLog, listen_along_chain};
use crate::types::{Event, EventFlags, ShadowMode};

const BOTH: EventFlags = EventFlags::BUBBLES.union(EventFlags::COMPOSED);
const MODES: [ShadowMode; 2] = [ShadowMode::Native, ShadowMode::Synthetic];

type Pair = (NodeId, Option<NodeId>);

/// Dispatch and return the observed pairs, checking every listener saw `path`.
fn observe(
    f: &Fixture,
    mode: ShadowMode,
    target: NodeId,
    flags: EventFlags,
    path: &[NodeId],
) -> Vec<Pair> {
    let mut listeners = ListenerRegistry::new();
    let log = TraceLog::new();
    listen_along_chain(&f.tree, &mut listeners, target, "test", &log).unwrap();
    Propagator::new(mode)
        .dispatch(&f.tree, &mut listeners, target, &Event::new("test", flags))
        .unwrap();
    for entry in log.entries() {
        assert_eq!(entry.composed_path, path, "{mode:?} at {:?}", entry.current_target);
    }
    log.pairs()
}

fn inside_button(f: &Fixture) -> Vec<NodeId> {
    vec![f.button, f.button_div, f.x_button_root]
}

fn from_x_button(f: &Fixture) -> Vec<NodeId> {
    f.full_path_from_button()[3..].to_vec()
}

fn from_x_button_to_container_root(f: &Fixture) -> Vec<NodeId> {
    f.full_path_from_button()[3..11].to_vec()
}

#[test]
fn button_bubbles_composed() {
    let f = Fixture::new();
    let expected = vec![
        (f.button, Some(f.button)),
        (f.button_div, Some(f.button)),
        (f.x_button_root, Some(f.button)),
        (f.x_button, Some(f.x_button)),
        (f.container_slot, Some(f.x_button)),
        (f.x_button_group, Some(f.x_button)),
        (f.container_div, Some(f.x_button)),
        (f.x_container_root, Some(f.x_button)),
        (f.x_container, Some(f.x_container)),
        (f.body, Some(f.x_container)),
        (f.html, Some(f.x_container)),
        (f.document(), Some(f.x_container)),
    ];
    for mode in MODES {
        let path = f.full_path_from_button();
        assert_eq!(observe(&f, mode, f.button, BOTH, &path), expected, "{mode:?}");
    }
}

#[test]
fn button_bubbles_not_composed() {
    let f = Fixture::new();
    let path = inside_button(&f);
    let inside = vec![
        (f.button, Some(f.button)),
        (f.button_div, Some(f.button)),
        (f.x_button_root, Some(f.button)),
    ];
    assert_eq!(
        observe(&f, ShadowMode::Native, f.button, EventFlags::BUBBLES, &path),
        inside
    );

    let mut synthetic = inside;
    synthetic.extend([
        (f.container_slot, None),
        (f.container_div, None),
        (f.body, None),
        (f.html, None),
        (f.document(), None),
    ]);
    assert_eq!(
        observe(&f, ShadowMode::Synthetic, f.button, EventFlags::BUBBLES, &path),
        synthetic
    );
}

#[test]
fn button_composed_not_bubbling() {
    let f = Fixture::new();
    let path = f.full_path_from_button();
    assert_eq!(
        observe(&f, ShadowMode::Native, f.button, EventFlags::COMPOSED, &path),
        vec![
            (f.button, Some(f.button)),
            (f.x_button, Some(f.x_button)),
            (f.x_container, Some(f.x_container)),
        ]
    );
    assert_eq!(
        observe(&f, ShadowMode::Synthetic, f.button, EventFlags::COMPOSED, &path),
        vec![(f.button, Some(f.button))]
    );
}

#[test]
fn button_neither() {
    let f = Fixture::new();
    let path = inside_button(&f);
    for mode in MODES {
        assert_eq!(
            observe(&f, mode, f.button, EventFlags::empty(), &path),
            vec![(f.button, Some(f.button))],
            "{mode:?}"
        );
    }
}

#[test]
fn host_bubbles_composed() {
    let f = Fixture::new();
    let path = from_x_button(&f);
    let expected = vec![
        (f.x_button, Some(f.x_button)),
        (f.container_slot, Some(f.x_button)),
        (f.x_button_group, Some(f.x_button)),
        (f.container_div, Some(f.x_button)),
        (f.x_container_root, Some(f.x_button)),
        (f.x_container, Some(f.x_container)),
        (f.body, Some(f.x_container)),
        (f.html, Some(f.x_container)),
        (f.document(), Some(f.x_container)),
    ];
    for mode in MODES {
        assert_eq!(observe(&f, mode, f.x_button, BOTH, &path), expected, "{mode:?}");
    }
}

#[test]
fn host_bubbles_not_composed() {
    let f = Fixture::new();
    let path = from_x_button_to_container_root(&f);
    let inside = vec![
        (f.x_button, Some(f.x_button)),
        (f.container_slot, Some(f.x_button)),
        (f.x_button_group, Some(f.x_button)),
        (f.container_div, Some(f.x_button)),
        (f.x_container_root, Some(f.x_button)),
    ];
    assert_eq!(
        observe(&f, ShadowMode::Native, f.x_button, EventFlags::BUBBLES, &path),
        inside
    );

    let mut synthetic = inside;
    synthetic.extend([
        (f.body, None),
        (f.html, None),
        (f.document(), None),
    ]);
    assert_eq!(
        observe(&f, ShadowMode::Synthetic, f.x_button, EventFlags::BUBBLES, &path),
        synthetic
    );
}

#[test]
fn host_composed_not_bubbling() {
    let f = Fixture::new();
    let path = from_x_button(&f);
    assert_eq!(
        observe(&f, ShadowMode::Native, f.x_button, EventFlags::COMPOSED, &path),
        vec![
            (f.x_button, Some(f.x_button)),
            (f.x_container, Some(f.x_container)),
        ]
    );
    assert_eq!(
        observe(&f, ShadowMode::Synthetic, f.x_button, EventFlags::COMPOSED, &path),
        vec![(f.x_button, Some(f.x_button))]
    );
}

#[test]
fn host_neither() {
    let f = Fixture::new();
    let path = from_x_button_to_container_root(&f);
    for mode in MODES {
        assert_eq!(
            observe(&f, mode, f.x_button, EventFlags::empty(), &path),
            vec![(f.x_button, Some(f.x_button))],
            "{mode:?}"
        );
    }
}
