// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::{Ease, Property, TweenHost, easing};

/// Identifier of a tween, unique within the scheduler that scheduled it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub(crate) u64);

impl TweenId {
    /// Placeholder carried until the tween is scheduled.
    pub(crate) const UNSCHEDULED: Self = Self(0);
}

#[derive(Debug, Default)]
pub(crate) struct Status {
    started: Cell<bool>,
    complete: Cell<bool>,
}

/// Observe or stop a scheduled tween.
///
/// Handles stay valid after the tween is gone.
#[derive(Clone, Debug)]
pub struct TweenHandle {
    id: TweenId,
    status: Rc<Status>,
}

impl TweenHandle {
    /// Identifier of the tween.
    #[must_use]
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Returns `true` once the tween has read its start value.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.status.started.get()
    }

    /// Returns `true` once the tween reached its end or was stopped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.complete.get()
    }

    /// Abandon the tween.
    ///
    /// The property keeps whatever value it has, the end callback does not run
    /// and chained follow-ups are never scheduled. Stopping a finished tween
    /// does nothing.
    pub fn stop(&self) {
        self.status.complete.set(true);
    }
}

type Callback<H> = Box<dyn FnMut(&mut H, <H as TweenHost>::Target)>;

/// One scheduled interpolation of a property.
///
/// Built with [`Tween::new`] and the `with_*` methods, then handed to
/// [`TweenScheduler::schedule`](crate::TweenScheduler::schedule).
pub struct Tween<H: TweenHost> {
    pub(crate) id: TweenId,
    pub(crate) target: H::Target,
    pub(crate) property: Property<H>,
    pub(crate) end: f64,
    pub(crate) duration: f64,
    pub(crate) delay: f64,
    pub(crate) easing: Rc<dyn Ease>,
    pub(crate) start_time: f64,
    pub(crate) start_value: f64,
    pub(crate) status: Rc<Status>,
    pub(crate) on_start: Option<Callback<H>>,
    pub(crate) on_end: Option<Callback<H>>,
    pub(crate) next: Option<Box<Self>>,
}

impl<H: TweenHost> Tween<H> {
    /// Move `property` of `target` to `end` over `duration`, linearly and
    /// without delay.
    pub fn new(target: H::Target, property: Property<H>, end: f64, duration: f64) -> Self {
        Self {
            id: TweenId::UNSCHEDULED,
            target,
            property,
            end,
            duration,
            delay: 0.0,
            easing: Rc::new(easing::linear),
            start_time: 0.0,
            start_value: 0.0,
            status: Rc::default(),
            on_start: None,
            on_end: None,
            next: None,
        }
    }

    /// Shape the interpolation.
    #[must_use]
    pub fn with_easing(mut self, easing: impl Ease + 'static) -> Self {
        self.easing = Rc::new(easing);
        self
    }

    /// Wait `delay` before reading the start value and moving.
    #[must_use]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Run `callback` right after the start value is read.
    #[must_use]
    pub fn on_start(mut self, callback: impl FnMut(&mut H, H::Target) + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Run `callback` right after the end value is written.
    #[must_use]
    pub fn on_end(mut self, callback: impl FnMut(&mut H, H::Target) + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }

    /// Queue a follow-up on the same target and property.
    ///
    /// The follow-up is scheduled when the last tween of the chain completes,
    /// so repeated calls build a sequence. It starts from whatever value the
    /// property has at that time.
    #[must_use]
    pub fn continue_to(
        mut self,
        end: f64,
        duration: f64,
        easing: impl Ease + 'static,
        delay: f64,
    ) -> Self {
        let follow_up = Self::new(self.target, self.property.clone(), end, duration)
            .with_easing(easing)
            .with_delay(delay);
        self.append(follow_up);
        self
    }

    fn append(&mut self, follow_up: Self) {
        match &mut self.next {
            Some(next) => next.append(follow_up),
            None => self.next = Some(Box::new(follow_up)),
        }
    }

    /// The tweened target.
    #[must_use]
    pub fn target(&self) -> H::Target {
        self.target
    }

    /// Number of queued follow-ups.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        let mut n = 0;
        let mut link = &self.next;
        while let Some(next) = link {
            n += 1;
            link = &next.next;
        }
        n
    }

    pub(crate) fn handle(&self) -> TweenHandle {
        TweenHandle {
            id: self.id,
            status: Rc::clone(&self.status),
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.status.complete.get()
    }

    pub(crate) fn is_started(&self) -> bool {
        self.status.started.get()
    }

    pub(crate) fn mark_started(&self) {
        self.status.started.set(true);
    }

    pub(crate) fn mark_complete(&self) {
        self.status.complete.set(true);
    }
}

impl<H: TweenHost> fmt::Debug for Tween<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("property", &self.property.name())
            .field("end", &self.end)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("start_time", &self.start_time)
            .field("started", &self.is_started())
            .field("complete", &self.is_complete())
            .field("chain_len", &self.chain_len())
            .finish_non_exhaustive()
    }
}
