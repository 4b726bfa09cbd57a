// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::rc::Rc;

use crate::TweenHost;

type Getter<H> = dyn Fn(&H, <H as TweenHost>::Target) -> f64;
type Setter<H> = dyn Fn(&mut H, <H as TweenHost>::Target, f64);

/// A tweenable numeric property: a named getter and setter pair.
///
/// Cloning is cheap; chained tweens share the accessors of the tween they
/// continue.
pub struct Property<H: TweenHost> {
    name: &'static str,
    get: Rc<Getter<H>>,
    set: Rc<Setter<H>>,
}

impl<H: TweenHost> Property<H> {
    /// Create a property from its accessors.
    pub fn new(
        name: &'static str,
        get: impl Fn(&H, H::Target) -> f64 + 'static,
        set: impl Fn(&mut H, H::Target, f64) + 'static,
    ) -> Self {
        Self {
            name,
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the current value.
    pub fn get(&self, host: &H, target: H::Target) -> f64 {
        (self.get)(host, target)
    }

    /// Write a value.
    pub fn set(&self, host: &mut H, target: H::Target, value: f64) {
        (self.set)(host, target, value);
    }
}

impl<H: TweenHost> Clone for Property<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<H: TweenHost> fmt::Debug for Property<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
