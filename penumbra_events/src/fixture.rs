// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test fixture: a container hosting a button group hosting a button.
//!
//! ```text
//! window
//! └─ document
//!    └─ html
//!       └─ body
//!          └─ x-container
//!             └─ #shadow-root
//!                └─ container_div
//!                   └─ x-button-group
//!                      ├─ #shadow-root
//!                      │  └─ button_group_div
//!                      │     └─ button_group_slot
//!                      └─ container_slot            (assigned to button_group_slot)
//!                         └─ x-button               (fallback content of container_slot)
//!                            └─ #shadow-root
//!                               └─ button_div
//!                                  └─ button
//! ```

use alloc::vec;
use alloc::vec::Vec;

use penumbra_tree::{NodeData, NodeId, Tree};

pub(crate) struct Fixture {
    pub(crate) tree: Tree,
    pub(crate) html: NodeId,
    pub(crate) body: NodeId,
    pub(crate) x_container: NodeId,
    pub(crate) x_container_root: NodeId,
    pub(crate) container_div: NodeId,
    pub(crate) x_button_group: NodeId,
    pub(crate) x_button_group_root: NodeId,
    pub(crate) button_group_div: NodeId,
    pub(crate) button_group_slot: NodeId,
    pub(crate) container_slot: NodeId,
    pub(crate) x_button: NodeId,
    pub(crate) x_button_root: NodeId,
    pub(crate) button_div: NodeId,
    pub(crate) button: NodeId,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let mut tree = Tree::new();
        let el = |tree: &mut Tree, parent: NodeId, label: &str| {
            tree.insert(Some(parent), NodeData::element(label)).unwrap()
        };

        let document = tree.document();
        let html = el(&mut tree, document, "html");
        let body = el(&mut tree, html, "body");
        let x_container = el(&mut tree, body, "x-container");
        let x_container_root = tree.attach_shadow(x_container).unwrap();
        let container_div = el(&mut tree, x_container_root, "container_div");
        let x_button_group = el(&mut tree, container_div, "x-button-group");
        let x_button_group_root = tree.attach_shadow(x_button_group).unwrap();
        let button_group_div = el(&mut tree, x_button_group_root, "button_group_div");
        let button_group_slot = tree
            .insert(
                Some(button_group_div),
                NodeData::slot("button_group_slot"),
            )
            .unwrap();
        let container_slot = tree
            .insert(Some(x_button_group), NodeData::slot("container_slot"))
            .unwrap();
        tree.assign_slot(container_slot, Some(button_group_slot))
            .unwrap();
        let x_button = el(&mut tree, container_slot, "x-button");
        let x_button_root = tree.attach_shadow(x_button).unwrap();
        let button_div = el(&mut tree, x_button_root, "button_div");
        let button = el(&mut tree, button_div, "button");

        Self {
            tree,
            html,
            body,
            x_container,
            x_container_root,
            container_div,
            x_button_group,
            x_button_group_root,
            button_group_div,
            button_group_slot,
            container_slot,
            x_button,
            x_button_root,
            button_div,
            button,
        }
    }

    pub(crate) fn document(&self) -> NodeId {
        self.tree.document()
    }

    pub(crate) fn window(&self) -> NodeId {
        self.tree.window()
    }

    /// Composed path of `button` for a composed event.
    pub(crate) fn full_path_from_button(&self) -> Vec<NodeId> {
        vec![
            self.button,
            self.button_div,
            self.x_button_root,
            self.x_button,
            self.container_slot,
            self.button_group_slot,
            self.button_group_div,
            self.x_button_group_root,
            self.x_button_group,
            self.container_div,
            self.x_container_root,
            self.x_container,
            self.body,
            self.html,
            self.document(),
            self.window(),
        ]
    }

    pub(crate) fn all(&self) -> Vec<NodeId> {
        self.full_path_from_button()
    }
}
