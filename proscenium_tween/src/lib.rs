// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proscenium Tween: interpolate numeric properties over logical time.
//!
//! A [`Tween`] moves one numeric [`Property`] of one target from its current value
//! to an end value over a duration, shaped by an [`Ease`] strategy. The
//! [`TweenScheduler`] advances every active tween once per tick.
//!
//! The scheduler is generic over a [`TweenHost`], which owns the targets and
//! reports the time of each target's own clock. Reading time per target, rather
//! than from one global clock, is what lets a paused part of a scene stall its
//! tweens while everything else keeps animating.
//!
//! - Start values are read when the tween actually starts, after its delay.
//! - The final tick writes the exact end value.
//! - [`Tween::continue_to`] chains follow-ups that start when the previous one ends.
//! - [`TweenHandle::stop`] abandons a tween without writing or calling back.
//!
//! ## Example
//!
//! ```
//! use proscenium_tween::{Property, Tween, TweenHost, TweenScheduler, easing};
//!
//! struct Host { time: f64, x: f64 }
//!
//! impl TweenHost for Host {
//!     type Target = ();
//!     fn clock_time(&self, _: ()) -> Option<f64> { Some(self.time) }
//! }
//!
//! let x: Property<Host> = Property::new("x", |h: &Host, _| h.x, |h: &mut Host, _, v| h.x = v);
//! let mut host = Host { time: 0.0, x: 0.0 };
//! let mut tweens = TweenScheduler::new();
//! tweens.schedule(&host, Tween::new((), x, 10.0, 2.0).with_easing(easing::linear));
//!
//! host.time = 1.0;
//! tweens.advance(&mut host);
//! assert_eq!(host.x, 5.0);
//!
//! host.time = 2.5;
//! tweens.advance(&mut host);
//! assert_eq!(host.x, 10.0);
//! assert!(tweens.is_empty());
//! ```

pub mod easing;
mod property;
mod scheduler;
mod tween;

pub use easing::Ease;
pub use property::Property;
pub use scheduler::{TweenHost, TweenScheduler};
pub use tween::{Tween, TweenHandle, TweenId};
