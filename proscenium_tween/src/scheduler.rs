// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::{Tween, TweenHandle, TweenId};

/// Owner of tween targets.
pub trait TweenHost {
    /// Handle of a tweenable object.
    type Target: Copy + fmt::Debug;

    /// Current time of the clock driving `target`, or `None` if the target no
    /// longer exists.
    ///
    /// Tweens on targets that disappear are dropped without further callbacks.
    fn clock_time(&self, target: Self::Target) -> Option<f64>;
}

enum Step<H: TweenHost> {
    Waiting,
    Running,
    Finished(Option<Box<Tween<H>>>),
    Dropped,
}

/// Bookkeeping shared by a scheduler and the sets detached from it.
#[derive(Debug, Default)]
struct Ledger {
    last_id: Cell<u64>,
    /// Bumped by [`TweenScheduler::clear`].
    epoch: Cell<u64>,
    /// Tweens in the detached set while it is being advanced.
    in_flight: Cell<usize>,
}

/// The set of active tweens.
///
/// Tweens are advanced from the most recently scheduled to the oldest, so a
/// later tween on the same property is overridden by an earlier one that is
/// still running. Follow-ups scheduled during an advance first run on the
/// next one.
///
/// A host that owns its scheduler cannot lend it out while also lending
/// itself to the callbacks. It [detaches](TweenScheduler::detach) the active
/// tweens instead, advances them, and [reattaches](TweenScheduler::reattach)
/// them. Meanwhile the owned scheduler still counts the detached tweens,
/// accepts new ones and can [clear](TweenScheduler::clear) everything.
pub struct TweenScheduler<H: TweenHost> {
    active: Vec<Tween<H>>,
    ledger: Rc<Ledger>,
    /// Epoch of the owner when this set was detached from it.
    detached_at: Option<u64>,
}

impl<H: TweenHost> Default for TweenScheduler<H> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            ledger: Rc::default(),
            detached_at: None,
        }
    }
}

impl<H: TweenHost> fmt::Debug for TweenScheduler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenScheduler")
            .field("active", &self.active)
            .field("in_flight", &self.ledger.in_flight.get())
            .field("detached", &self.detached_at.is_some())
            .finish()
    }
}

impl<H: TweenHost> TweenScheduler<H> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active tweens, not counting queued follow-ups.
    ///
    /// Includes tweens detached for an advance that are still running.
    #[must_use]
    pub fn len(&self) -> usize {
        let detached = if self.detached_at.is_none() {
            self.ledger.in_flight.get()
        } else {
            0
        };
        self.active.len() + detached
    }

    /// Returns `true` if no tween is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the tween with `id` is held by this set.
    #[must_use]
    pub fn contains(&self, id: TweenId) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    /// Drop every active tween without writing or calling back.
    ///
    /// Tweens detached for an advance in progress are dropped as well, as soon
    /// as the callback that cleared them returns.
    pub fn clear(&mut self) {
        self.active.clear();
        self.ledger.epoch.set(self.ledger.epoch.get() + 1);
        self.ledger.in_flight.set(0);
    }

    /// Start tracking `tween`.
    ///
    /// Its start time is the current time of the target's clock. The start value
    /// is read later, when the delay has passed.
    pub fn schedule(&mut self, host: &H, tween: Tween<H>) -> TweenHandle {
        let start_time = host.clock_time(tween.target).unwrap_or_default();
        self.schedule_at(start_time, tween)
    }

    /// Start tracking `tween` as if scheduled at `start_time` on its target's clock.
    pub fn schedule_at(&mut self, start_time: f64, mut tween: Tween<H>) -> TweenHandle {
        let id = self.ledger.last_id.get() + 1;
        self.ledger.last_id.set(id);
        tween.id = TweenId(id);
        tween.start_time = start_time;
        debug!(
            id = ?tween.id,
            target = ?tween.target,
            property = tween.property.name(),
            end = tween.end,
            "tween scheduled"
        );
        let handle = tween.handle();
        self.active.push(tween);
        self.sync_in_flight();
        handle
    }

    /// Take the active tweens out for an advance, leaving this scheduler empty.
    #[must_use]
    pub fn detach(&mut self) -> Self {
        let batch = Self {
            active: mem::take(&mut self.active),
            ledger: Rc::clone(&self.ledger),
            detached_at: Some(self.ledger.epoch.get()),
        };
        batch.sync_in_flight();
        batch
    }

    /// Put back tweens taken by [`TweenScheduler::detach`].
    ///
    /// They go before the tweens scheduled in the meantime. If this scheduler
    /// was cleared since, they are dropped.
    pub fn reattach(&mut self, mut batch: Self) {
        if !batch.cleared() {
            batch.active.append(&mut self.active);
            self.active = batch.active;
        }
        self.ledger.in_flight.set(0);
    }

    /// The owner was cleared after this set was detached.
    fn cleared(&self) -> bool {
        self.detached_at
            .is_some_and(|epoch| epoch != self.ledger.epoch.get())
    }

    fn sync_in_flight(&self) {
        if self.detached_at.is_some() && !self.cleared() {
            self.ledger.in_flight.set(self.active.len());
        }
    }

    /// Advance every active tween to the current time of its target's clock.
    pub fn advance(&mut self, host: &mut H) {
        let mut follow_ups = Vec::new();
        let mut i = self.active.len();
        while i > 0 && !self.cleared() {
            i -= 1;
            let tween = &mut self.active[i];
            if tween.is_complete() {
                trace!(id = ?tween.id, "stopped tween removed");
                self.active.remove(i);
                self.sync_in_flight();
                continue;
            }
            let outcome = step(tween, host);
            if self.cleared() {
                break;
            }
            match outcome {
                Step::Waiting | Step::Running => {}
                Step::Finished(next) => {
                    self.active.remove(i);
                    follow_ups.extend(next);
                }
                Step::Dropped => {
                    self.active.remove(i);
                }
            }
            self.sync_in_flight();
        }
        if self.cleared() {
            debug!("tweens cleared during advance");
            self.active.clear();
            return;
        }
        for next in follow_ups {
            self.schedule(host, *next);
        }
    }
}

fn step<H: TweenHost>(tween: &mut Tween<H>, host: &mut H) -> Step<H> {
    let target = tween.target;
    let Some(now) = host.clock_time(target) else {
        debug!(id = ?tween.id, ?target, "tween target is gone");
        return Step::Dropped;
    };
    let elapsed = now - tween.start_time;
    if elapsed < tween.delay {
        return Step::Waiting;
    }

    if !tween.is_started() {
        tween.mark_started();
        tween.start_value = tween.property.get(host, target);
        if let Some(on_start) = tween.on_start.as_mut() {
            on_start(host, target);
        }
        if tween.is_complete() {
            return Step::Dropped;
        }
    }

    if elapsed >= tween.delay + tween.duration {
        tween.property.set(host, target, tween.end);
        tween.mark_complete();
        debug!(id = ?tween.id, ?target, property = tween.property.name(), "tween complete");
        if let Some(on_end) = tween.on_end.as_mut() {
            on_end(host, target);
        }
        return Step::Finished(tween.next.take());
    }

    let value = tween.easing.ease(
        elapsed - tween.delay,
        tween.start_value,
        tween.end - tween.start_value,
        tween.duration,
    );
    tween.property.set(host, target, value);
    Step::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Property, easing};

    #[derive(Default)]
    struct Host {
        /// Per target: clock time, or `None` once removed.
        clocks: Vec<Option<f64>>,
        values: Vec<f64>,
        log: Vec<String>,
    }

    impl Host {
        fn with_targets(n: usize) -> Self {
            Self {
                clocks: vec![Some(0.0); n],
                values: vec![0.0; n],
                log: Vec::new(),
            }
        }

        fn set_time(&mut self, t: f64) {
            for c in self.clocks.iter_mut().flatten() {
                *c = t;
            }
        }
    }

    impl TweenHost for Host {
        type Target = usize;

        fn clock_time(&self, target: usize) -> Option<f64> {
            self.clocks.get(target).copied().flatten()
        }
    }

    fn value() -> Property<Host> {
        Property::new(
            "value",
            |h: &Host, t| h.values[t],
            |h: &mut Host, t, v| h.values[t] = v,
        )
    }

    #[test]
    fn linear_midpoint_and_exact_end() {
        let mut host = Host::with_targets(1);
        host.values[0] = 4.0;
        let mut s = TweenScheduler::new();
        let handle = s.schedule(&host, Tween::new(0, value(), 10.0, 2.0));

        // The first advance only reads the start value.
        s.advance(&mut host);
        assert_eq!(host.values[0], 4.0);
        assert!(handle.is_started());

        host.set_time(1.0);
        s.advance(&mut host);
        assert_eq!(host.values[0], 7.0);

        host.set_time(2.3);
        s.advance(&mut host);
        assert_eq!(host.values[0], 10.0);
        assert!(handle.is_complete());
        assert!(s.is_empty());
    }

    #[test]
    fn start_value_is_read_after_the_delay() {
        let mut host = Host::with_targets(1);
        let mut s = TweenScheduler::new();
        s.schedule(&host, Tween::new(0, value(), 10.0, 2.0).with_delay(1.0));

        host.set_time(0.5);
        s.advance(&mut host);
        // Somebody else moves the value during the delay.
        host.values[0] = 6.0;

        host.set_time(1.0);
        s.advance(&mut host);
        assert_eq!(host.values[0], 6.0);

        host.set_time(2.0);
        s.advance(&mut host);
        assert_eq!(host.values[0], 8.0);
    }

    #[test]
    fn stalled_clock_stalls_the_tween() {
        let mut host = Host::with_targets(2);
        let mut s = TweenScheduler::new();
        s.schedule(&host, Tween::new(0, value(), 10.0, 1.0));
        s.schedule(&host, Tween::new(1, value(), 10.0, 1.0));

        // Only target 1's clock advances.
        host.clocks[1] = Some(0.5);
        s.advance(&mut host);
        assert_eq!(host.values, vec![0.0, 5.0]);
        host.clocks[1] = Some(1.0);
        s.advance(&mut host);
        assert_eq!(host.values, vec![0.0, 10.0]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn callbacks_fire_once_in_order() {
        let mut host = Host::with_targets(1);
        let mut s = TweenScheduler::new();
        let tween = Tween::new(0, value(), 1.0, 1.0)
            .on_start(|h: &mut Host, t| h.log.push(format!("start {t}")))
            .on_end(|h: &mut Host, t| h.log.push(format!("end {t} at {}", h.values[t])));
        s.schedule(&host, tween);
        for t in [0.0, 0.5, 1.0, 1.5] {
            host.set_time(t);
            s.advance(&mut host);
        }
        assert_eq!(host.log, vec!["start 0", "end 0 at 1"]);
    }

    #[test]
    fn chained_follow_up_starts_when_previous_ends() {
        let mut host = Host::with_targets(1);
        let mut s = TweenScheduler::new();
        let tween = Tween::new(0, value(), 10.0, 1.0).continue_to(0.0, 2.0, easing::linear, 0.0);
        assert_eq!(tween.chain_len(), 1);
        s.schedule(&host, tween);

        host.set_time(1.5);
        s.advance(&mut host);
        assert_eq!(host.values[0], 10.0);
        // The follow-up is scheduled at 1.5 and runs from the next advance on.
        assert_eq!(s.len(), 1);

        // It reads its start value (10) one second into its run.
        host.set_time(2.5);
        s.advance(&mut host);
        assert_eq!(host.values[0], 5.0);
        host.set_time(3.5);
        s.advance(&mut host);
        assert_eq!(host.values[0], 0.0);
        assert!(s.is_empty());
    }

    #[test]
    fn stop_abandons_without_writing_and_is_idempotent() {
        let mut host = Host::with_targets(1);
        let mut s = TweenScheduler::new();
        let tween = Tween::new(0, value(), 10.0, 1.0)
            .on_end(|h: &mut Host, _| h.log.push("end".into()))
            .continue_to(20.0, 1.0, easing::linear, 0.0);
        let handle = s.schedule(&host, tween);
        host.set_time(0.5);
        s.advance(&mut host);
        assert_eq!(host.values[0], 5.0);

        handle.stop();
        handle.stop();
        assert!(handle.is_complete());
        host.set_time(5.0);
        s.advance(&mut host);
        s.advance(&mut host);
        assert_eq!(host.values[0], 5.0);
        assert!(host.log.is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn vanished_target_drops_the_tween() {
        let mut host = Host::with_targets(1);
        let mut s = TweenScheduler::new();
        let handle = s.schedule(
            &host,
            Tween::new(0, value(), 10.0, 1.0).on_end(|h: &mut Host, _| h.log.push("end".into())),
        );
        host.clocks[0] = None;
        s.advance(&mut host);
        assert!(s.is_empty());
        assert!(!handle.is_complete());
        assert!(host.log.is_empty());
    }

    #[test]
    fn zero_duration_jumps_to_the_end() {
        let mut host = Host::with_targets(1);
        let mut s = TweenScheduler::new();
        s.schedule(&host, Tween::new(0, value(), 3.0, 0.0));
        s.advance(&mut host);
        assert_eq!(host.values[0], 3.0);
        assert!(s.is_empty());
    }

    #[test]
    fn ids_are_handed_out_per_scheduler() {
        let host = Host::with_targets(1);
        let mut a = TweenScheduler::new();
        let mut b = TweenScheduler::new();
        let first = a.schedule(&host, Tween::new(0, value(), 1.0, 1.0));
        let second = a.schedule(&host, Tween::new(0, value(), 2.0, 1.0));
        let other = b.schedule(&host, Tween::new(0, value(), 3.0, 1.0));
        assert_ne!(first.id(), second.id());
        assert_eq!(first.id(), other.id());
        assert!(a.contains(second.id()));
    }

    #[test]
    fn detached_tweens_still_count_and_come_back_first() {
        let mut host = Host::with_targets(1);
        let mut owner = TweenScheduler::new();
        let early = owner.schedule(&host, Tween::new(0, value(), 1.0, 1.0));
        let mut batch = owner.detach();
        assert_eq!(owner.len(), 1);

        let late = owner.schedule(&host, Tween::new(0, value(), 2.0, 1.0));
        assert_eq!(owner.len(), 2);
        assert_ne!(early.id(), late.id());

        host.set_time(0.5);
        batch.advance(&mut host);
        owner.reattach(batch);
        assert_eq!(owner.len(), 2);
        assert!(owner.contains(early.id()));
        assert!(owner.contains(late.id()));
    }

    #[test]
    fn clearing_the_owner_drops_the_detached_set() {
        let mut host = Host::with_targets(1);
        let mut owner = TweenScheduler::new();
        let handle = owner.schedule(&host, Tween::new(0, value(), 10.0, 1.0));
        let mut batch = owner.detach();
        owner.clear();
        assert!(owner.is_empty());
        let fresh = owner.schedule(&host, Tween::new(0, value(), 5.0, 1.0));

        host.set_time(0.5);
        batch.advance(&mut host);
        assert_eq!(host.values[0], 0.0);
        owner.reattach(batch);
        assert_eq!(owner.len(), 1);
        assert!(owner.contains(fresh.id()));
        assert!(!owner.contains(handle.id()));
    }
}
