// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::debug;

use crate::{ClockId, NodeId, Scene, SceneError};

/// A pausable logical time source.
///
/// Nodes use the clock of their nearest ancestor that has one, up to the root's
/// default clock. Pausing a clock freezes the time seen by every node and tween
/// in its domain.
#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    name: String,
    paused: bool,
    time: f64,
    delta: f64,
}

impl Clock {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paused: false,
            time: 0.0,
            delta: 0.0,
        }
    }

    /// Name given at creation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Accumulated time, advanced only while running.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time added by the latest tick; zero while paused.
    #[must_use]
    pub fn delta(&self) -> f64 {
        if self.paused { 0.0 } else { self.delta }
    }

    pub(crate) fn tick(&mut self, dt: f64) {
        if !self.paused {
            self.delta = dt;
            self.time += dt;
        }
    }
}

impl Scene {
    /// Add a clock. It starts running at time zero.
    pub fn create_clock(&mut self, name: impl Into<String>) -> ClockId {
        let id = ClockId(u32::try_from(self.clocks.len()).unwrap_or(u32::MAX));
        let clock = Clock::new(name);
        debug!(?id, name = clock.name(), "clock created");
        self.clocks.push(clock);
        id
    }

    /// The clock driving the root.
    #[must_use]
    pub fn default_clock(&self) -> ClockId {
        ClockId(0)
    }

    /// Look up a clock.
    #[must_use]
    pub fn clock(&self, id: ClockId) -> Option<&Clock> {
        self.clocks.get(id.idx())
    }

    /// Pause or resume a clock.
    pub fn set_paused(&mut self, id: ClockId, paused: bool) -> Result<(), SceneError> {
        self.clocks
            .get_mut(id.idx())
            .ok_or(SceneError::UnknownClock(id))?
            .set_paused(paused);
        Ok(())
    }

    /// Give `node` its own clock, or let it inherit again with `None`.
    ///
    /// The root always keeps the default clock.
    pub fn set_clock(&mut self, node: NodeId, clock: Option<ClockId>) -> Result<(), SceneError> {
        if let Some(id) = clock
            && id.idx() >= self.clocks.len()
        {
            return Err(SceneError::UnknownClock(id));
        }
        self.node(node)?;
        if node != self.root {
            self.node_mut(node)?.clock = clock;
        }
        Ok(())
    }

    /// Clock set on `node` itself.
    #[must_use]
    pub fn own_clock(&self, node: NodeId) -> Option<ClockId> {
        self.get(node)?.clock
    }

    /// Clock that drives `node`: its own, or the nearest ancestor's.
    ///
    /// Detached subtrees without a clock of their own run on the default clock.
    #[must_use]
    pub fn effective_clock(&self, node: NodeId) -> Option<ClockId> {
        let mut cursor = self.get(node)?;
        loop {
            if let Some(clock) = cursor.clock {
                return Some(clock);
            }
            match cursor.parent.and_then(|p| self.get(p)) {
                Some(parent) => cursor = parent,
                None => return Some(self.default_clock()),
            }
        }
    }

    /// Time of the clock that drives `node`.
    #[must_use]
    pub fn time_of(&self, node: NodeId) -> Option<f64> {
        self.effective_clock(node)
            .and_then(|c| self.clock(c))
            .map(Clock::time)
    }

    /// Delta of the latest tick on the clock that drives `node`.
    #[must_use]
    pub fn delta_of(&self, node: NodeId) -> Option<f64> {
        self.effective_clock(node)
            .and_then(|c| self.clock(c))
            .map(Clock::delta)
    }
}
