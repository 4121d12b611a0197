// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: event descriptors, shadow modes, phases, deliveries, and outcomes.

use alloc::string::String;

bitflags::bitflags! {
    /// Propagation flags of an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// The event travels from the target towards the root.
        const BUBBLES  = 0b0000_0001;
        /// The event crosses shadow boundaries.
        const COMPOSED = 0b0000_0010;
    }
}

/// An immutable event descriptor.
///
/// Created by the caller and consumed by one propagation. The dispatch target is passed
/// alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    event_type: String,
    flags: EventFlags,
}

impl Event {
    /// Create an event of `event_type` with the given flags.
    pub fn new(event_type: impl Into<String>, flags: EventFlags) -> Self {
        Self {
            event_type: event_type.into(),
            flags,
        }
    }

    /// Event type (`"click"`, `"test"`, ...).
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Propagation flags.
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.flags.contains(EventFlags::BUBBLES)
    }

    /// Whether the event crosses shadow boundaries.
    pub fn composed(&self) -> bool {
        self.flags.contains(EventFlags::COMPOSED)
    }
}

/// Whether shadow encapsulation is enforced by the runtime or emulated over one flat tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadowMode {
    /// Real shadow boundaries. Non-composed events genuinely stop at the target's shadow root.
    #[default]
    Native,
    /// Shadow trees flattened into one real tree. Non-composed events keep bubbling past the
    /// boundary: plain nodes beyond it observe a `None` target, hosts and shadow roots are skipped.
    Synthetic,
}

impl ShadowMode {
    /// Pick the mode from a runtime capability flag.
    pub const fn from_native_support(native_shadow_supported: bool) -> Self {
        if native_shadow_supported {
            Self::Native
        } else {
            Self::Synthetic
        }
    }

    /// Whether this is [`ShadowMode::Native`].
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }
}

/// Propagation phase of a delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The node is the observed target itself: the dispatch target, or a host the target was retargeted to.
    Target,
    /// An ancestor receiving a bubbling event.
    Bubble,
}

/// One node receiving the event, with the target it observes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Delivery<K> {
    /// Node being notified (the current target).
    pub node: K,
    /// Observed target. `None` for synthetic-mode deliveries past a non-composed boundary.
    pub target: Option<K>,
    /// Phase.
    pub phase: Phase,
}

impl<K: Copy + Eq> Delivery<K> {
    /// A delivery with a retargeted target; the phase is derived from it.
    pub fn retargeted(node: K, target: K) -> Self {
        let phase = if node == target {
            Phase::Target
        } else {
            Phase::Bubble
        };
        Self {
            node,
            target: Some(target),
            phase,
        }
    }

    /// A bubble delivery whose target is hidden.
    pub fn nulled(node: K) -> Self {
        Self {
            node,
            target: None,
            phase: Phase::Bubble,
        }
    }
}

/// Handler outcome to control propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep going.
    Continue,
    /// Stop propagation immediately.
    Stop,
}
