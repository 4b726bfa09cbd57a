// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener registry.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{Listener, Phase};

/// Listeners selected for one node and one phase, copied out of the registry.
pub type Snapshot<C, K, D> = SmallVec<[Listener<C, K, D>; 4]>;

struct Entry<C, K, D> {
    listener: Listener<C, K, D>,
    use_capture: bool,
    priority: i32,
}

type Bucket<C, K, D> = Vec<Entry<C, K, D>>;

/// Listener buckets of a single node, keyed by (payload type, event name).
///
/// Each bucket is kept sorted by ascending priority; entries with equal
/// priority run in insertion order. The same handler may be registered more
/// than once and is then invoked once per registration.
pub struct ListenerRegistry<C, K> {
    buckets: HashMap<TypeId, HashMap<String, Box<dyn Any>>>,
    marker: PhantomData<fn(&mut C, K)>,
}

impl<C, K> Default for ListenerRegistry<C, K> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            marker: PhantomData,
        }
    }
}

impl<C, K> fmt::Debug for ListenerRegistry<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: usize = self.buckets.values().map(HashMap::len).sum();
        f.debug_struct("ListenerRegistry")
            .field("buckets", &names)
            .finish_non_exhaustive()
    }
}

impl<C: 'static, K: 'static> ListenerRegistry<C, K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket<D: 'static>(&self, name: &str) -> Option<&Bucket<C, K, D>> {
        self.buckets
            .get(&TypeId::of::<D>())?
            .get(name)?
            .downcast_ref()
    }

    /// Register `listener` for events named `name` carrying payload `D`.
    ///
    /// Capture listeners run while the event travels toward its target; others
    /// run while it bubbles back out. Both kinds run when the event is
    /// dispatched at this node itself. Lower `priority` runs first.
    pub fn add<D: 'static>(
        &mut self,
        name: &str,
        listener: Listener<C, K, D>,
        use_capture: bool,
        priority: i32,
    ) {
        let slot = self
            .buckets
            .entry(TypeId::of::<D>())
            .or_default()
            .entry(name.to_owned())
            .or_insert_with(|| Box::new(Bucket::<C, K, D>::new()));
        if let Some(bucket) = slot.downcast_mut::<Bucket<C, K, D>>() {
            let at = bucket.partition_point(|e| e.priority <= priority);
            bucket.insert(
                at,
                Entry {
                    listener,
                    use_capture,
                    priority,
                },
            );
        }
    }

    /// Remove every registration of `listener` under `name` with the same
    /// capture flag, returning how many were removed.
    ///
    /// A registration with the other capture flag stays in place. Removing an
    /// unknown listener is a no-op.
    pub fn remove<D: 'static>(
        &mut self,
        name: &str,
        listener: &Listener<C, K, D>,
        use_capture: bool,
    ) -> usize {
        let Some(names) = self.buckets.get_mut(&TypeId::of::<D>()) else {
            return 0;
        };
        let Some(bucket) = names
            .get_mut(name)
            .and_then(|slot| slot.downcast_mut::<Bucket<C, K, D>>())
        else {
            return 0;
        };
        let before = bucket.len();
        bucket.retain(|e| !(e.use_capture == use_capture && e.listener.ptr_eq(listener)));
        let removed = before - bucket.len();
        if bucket.is_empty() {
            names.remove(name);
            if names.is_empty() {
                self.buckets.remove(&TypeId::of::<D>());
            }
        }
        removed
    }

    /// Returns `true` if at least one listener is registered under `name` for payload `D`.
    #[must_use]
    pub fn has<D: 'static>(&self, name: &str) -> bool {
        self.len::<D>(name) > 0
    }

    /// Number of registrations under `name` for payload `D`.
    #[must_use]
    pub fn len<D: 'static>(&self, name: &str) -> usize {
        self.bucket::<D>(name).map_or(0, Vec::len)
    }

    /// Returns `true` if nothing is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Copy out the listeners that run for `phase`, in invocation order.
    ///
    /// [`Phase::Target`] selects every listener regardless of its capture flag.
    #[must_use]
    pub fn snapshot<D: 'static>(&self, name: &str, phase: Phase) -> Snapshot<C, K, D> {
        let Some(bucket) = self.bucket::<D>(name) else {
            return SmallVec::new();
        };
        bucket
            .iter()
            .filter(|e| match phase {
                Phase::Capture => e.use_capture,
                Phase::Target => true,
                Phase::Bubble => !e.use_capture,
            })
            .map(|e| e.listener.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use alloc::vec;

    type Log = Vec<i32>;

    fn tagged(tag: i32) -> Listener<Log, u32, ()> {
        Listener::new(move |log: &mut Log, _ev: &mut Event<u32, ()>| log.push(tag))
    }

    fn run_all(reg: &ListenerRegistry<Log, u32>, name: &str, phase: Phase) -> Log {
        let mut log = Log::new();
        let mut ev = Event::new("unused", ());
        for l in reg.snapshot::<()>(name, phase) {
            l.call(&mut log, &mut ev);
        }
        log
    }

    #[test]
    fn priority_orders_and_ties_keep_insertion_order() {
        let mut reg = ListenerRegistry::new();
        reg.add("e", tagged(1), false, 5);
        reg.add("e", tagged(2), false, -1);
        reg.add("e", tagged(3), false, 5);
        reg.add("e", tagged(4), false, 0);
        assert_eq!(run_all(&reg, "e", Phase::Target), vec![2, 4, 1, 3]);
    }

    #[test]
    fn phase_filters_on_capture_flag() {
        let mut reg = ListenerRegistry::new();
        reg.add("e", tagged(1), true, 0);
        reg.add("e", tagged(2), false, 0);
        assert_eq!(run_all(&reg, "e", Phase::Capture), vec![1]);
        assert_eq!(run_all(&reg, "e", Phase::Bubble), vec![2]);
        assert_eq!(run_all(&reg, "e", Phase::Target), vec![1, 2]);
    }

    #[test]
    fn remove_matches_identity_and_capture_flag() {
        let mut reg = ListenerRegistry::new();
        let a = tagged(1);
        let b = tagged(2);
        reg.add("e", a.clone(), false, 0);
        reg.add("e", a.clone(), false, 0);
        reg.add("e", a.clone(), true, 0);

        assert_eq!(reg.remove("e", &b, false), 0);
        assert_eq!(reg.len::<()>("e"), 3);

        // Both bubble registrations go, the capture one stays.
        assert_eq!(reg.remove("e", &a, false), 2);
        assert_eq!(reg.len::<()>("e"), 1);
        assert!(reg.has::<()>("e"));

        assert_eq!(reg.remove("e", &a, true), 1);
        assert!(!reg.has::<()>("e"));
        assert!(reg.is_empty());
    }

    #[test]
    fn payload_type_separates_buckets() {
        let mut reg: ListenerRegistry<Log, u32> = ListenerRegistry::new();
        reg.add("e", tagged(1), false, 0);
        assert!(reg.has::<()>("e"));
        assert!(!reg.has::<u8>("e"));
        assert!(!reg.has::<()>("other"));
        assert!(reg.snapshot::<u8>("e", Phase::Target).is_empty());
    }
}
