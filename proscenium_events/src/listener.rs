// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared listener callbacks with identity.

use alloc::rc::Rc;
use core::fmt;

use crate::Event;

type Callback<C, K, D> = dyn Fn(&mut C, &mut Event<K, D>);

/// An event callback.
///
/// Cloning a `Listener` yields the same handler: removal from a
/// [`ListenerRegistry`](crate::ListenerRegistry) matches by identity, so keep a
/// clone around if you intend to unregister it later. Two listeners built from
/// separate [`Listener::new`] calls are always distinct, even when the closures
/// have identical bodies.
pub struct Listener<C, K, D>(Rc<Callback<C, K, D>>);

impl<C, K, D> Listener<C, K, D> {
    /// Wrap a callback.
    pub fn new(callback: impl Fn(&mut C, &mut Event<K, D>) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Returns `true` if both values refer to the same handler.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Invoke the callback.
    pub fn call(&self, ctx: &mut C, event: &mut Event<K, D>) {
        (self.0)(ctx, event);
    }
}

impl<C, K, D> Clone for Listener<C, K, D> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C, K, D> fmt::Debug for Listener<C, K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_follows_clones() {
        let a: Listener<(), u32, ()> = Listener::new(|_, _| {});
        let b = a.clone();
        let c: Listener<(), u32, ()> = Listener::new(|_, _| {});
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
