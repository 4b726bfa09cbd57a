// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatched event record.

use alloc::borrow::Cow;

/// Generic name for "an operation finished" notifications.
pub const COMPLETE: &str = "complete";

/// Propagation phase of an event.
///
/// Events travel from the outermost ancestor inward ([`Phase::Capture`]),
/// reach the target ([`Phase::Target`]), and then travel back outward
/// ([`Phase::Bubble`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Outermost ancestor down to the target's parent.
    Capture,
    /// The target itself.
    Target,
    /// The target's parent up to the outermost ancestor.
    Bubble,
}

/// A dispatched event instance.
///
/// `K` is the node key of the hierarchy the event travels through and `D` the
/// kind-specific payload. Listeners are keyed by both the payload type and the
/// event name, so two events with the same name but different payload types
/// never reach each other's listeners.
///
/// Events bubble and are cancelable unless configured otherwise.
#[derive(Clone, Debug)]
pub struct Event<K, D> {
    name: Cow<'static, str>,
    target: Option<K>,
    current_target: Option<K>,
    phase: Option<Phase>,
    bubbles: bool,
    cancelable: bool,
    stopped: bool,
    /// Kind-specific payload.
    pub data: D,
}

impl<K: Copy, D> Event<K, D> {
    /// Create a bubbling, cancelable event.
    pub fn new(name: impl Into<Cow<'static, str>>, data: D) -> Self {
        Self {
            name: name.into(),
            target: None,
            current_target: None,
            phase: None,
            bubbles: true,
            cancelable: true,
            stopped: false,
            data,
        }
    }

    /// Set whether the event visits ancestors.
    ///
    /// A non-bubbling event is delivered to its target only: it has neither a
    /// capture nor a bubble phase.
    #[must_use]
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set whether [`Event::stop_propagation`] has any effect.
    #[must_use]
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Name of the event.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node the event was dispatched at, once dispatch has begun.
    #[must_use]
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// The node whose listeners are currently running.
    #[must_use]
    pub fn current_target(&self) -> Option<K> {
        self.current_target
    }

    /// The current propagation phase, once dispatch has begun.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Whether the event visits ancestors.
    #[must_use]
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether propagation can be stopped.
    #[must_use]
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Stop propagation after the listeners of the current node have run.
    ///
    /// No-op for non-cancelable events.
    pub fn stop_propagation(&mut self) {
        if self.cancelable {
            self.stopped = true;
        }
    }

    /// Returns `true` once propagation has been stopped.
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn begin(&mut self, target: K) {
        self.target = Some(target);
        self.current_target = None;
        self.phase = None;
        self.stopped = false;
    }

    pub(crate) fn enter(&mut self, node: K, phase: Phase) {
        self.current_target = Some(node);
        self.phase = Some(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bubble_and_cancel() {
        let ev: Event<u32, ()> = Event::new("x", ());
        assert!(ev.bubbles());
        assert!(ev.cancelable());
        assert!(!ev.is_propagation_stopped());
        assert_eq!(ev.target(), None);
        assert_eq!(ev.phase(), None);
    }

    #[test]
    fn stop_propagation_requires_cancelable() {
        let mut ev: Event<u32, ()> = Event::new("x", ()).with_cancelable(false);
        ev.stop_propagation();
        assert!(!ev.is_propagation_stopped());

        let mut ev: Event<u32, ()> = Event::new("x", ());
        ev.stop_propagation();
        assert!(ev.is_propagation_stopped());
        // Stopping twice changes nothing.
        ev.stop_propagation();
        assert!(ev.is_propagation_stopped());
    }
}
