// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing strategies.
//!
//! An easing maps `(elapsed, start, delta, duration)` to a value: `start` at
//! `elapsed == 0` and `start + delta` at `elapsed == duration`. Any closure or
//! function with that signature implements [`Ease`].
//!
//! The functions in this module are Robert Penner's easing equations (BSD
//! licensed, © 2001 Robert Penner), grouped by family. Every family provides
//! `ease_in` (accelerate), `ease_out` (decelerate), `ease_in_out` (accelerate to
//! the midpoint, then decelerate) and `ease_out_in` (decelerate to the midpoint,
//! then accelerate).
//!
//! ```
//! use proscenium_tween::easing::{self, Ease};
//!
//! assert_eq!(easing::linear.ease(1.0, 0.0, 10.0, 4.0), 2.5);
//! assert_eq!(easing::quad::ease_in.ease(2.0, 0.0, 10.0, 4.0), 2.5);
//! assert_eq!(easing::quad::ease_out.ease(2.0, 0.0, 10.0, 4.0), 7.5);
//!
//! // Custom parameters are a closure away.
//! let wobbly = |t, b, c, d| easing::elastic::ease_out_with(t, b, c, d, Some(12.0), Some(0.5));
//! assert_eq!(wobbly.ease(0.0, 3.0, 1.0, 1.0), 3.0);
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Maps elapsed time to an interpolated value.
pub trait Ease {
    /// Value at `elapsed` for a transition from `start` to `start + delta`
    /// taking `duration`.
    fn ease(&self, elapsed: f64, start: f64, delta: f64, duration: f64) -> f64;
}

impl<F> Ease for F
where
    F: Fn(f64, f64, f64, f64) -> f64,
{
    fn ease(&self, elapsed: f64, start: f64, delta: f64, duration: f64) -> f64 {
        self(elapsed, start, delta, duration)
    }
}

/// Constant speed.
pub fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * t / d + b
}

/// First half eases out over half the change, second half eases in over the rest.
fn split_out_in(
    out: impl Fn(f64, f64, f64, f64) -> f64,
    inn: impl Fn(f64, f64, f64, f64) -> f64,
    t: f64,
    b: f64,
    c: f64,
    d: f64,
) -> f64 {
    if t < d / 2.0 {
        out(t * 2.0, b, c / 2.0, d)
    } else {
        inn(t * 2.0 - d, b + c / 2.0, c / 2.0, d)
    }
}

macro_rules! out_in {
    () => {
        /// Decelerate to the midpoint, then accelerate.
        pub fn ease_out_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
            super::split_out_in(ease_out, ease_in, t, b, c, d)
        }
    };
}

/// Quadratic (t²) easing.
pub mod quad {
    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d;
        c * t * t + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d;
        -c * t * (t - 2.0) + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            return c / 2.0 * t * t + b;
        }
        let t = t - 1.0;
        -c / 2.0 * (t * (t - 2.0) - 1.0) + b
    }

    out_in!();
}

/// Cubic (t³) easing.
pub mod cubic {
    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d;
        c * t * t * t + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d - 1.0;
        c * (t * t * t + 1.0) + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            return c / 2.0 * t * t * t + b;
        }
        let t = t - 2.0;
        c / 2.0 * (t * t * t + 2.0) + b
    }

    out_in!();
}

/// Quartic (t⁴) easing.
pub mod quart {
    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d;
        c * t * t * t * t + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d - 1.0;
        -c * (t * t * t * t - 1.0) + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            return c / 2.0 * t * t * t * t + b;
        }
        let t = t - 2.0;
        -c / 2.0 * (t * t * t * t - 2.0) + b
    }

    out_in!();
}

/// Quintic (t⁵) easing.
pub mod quint {
    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d;
        c * t * t * t * t * t + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d - 1.0;
        c * (t * t * t * t * t + 1.0) + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            return c / 2.0 * t * t * t * t * t + b;
        }
        let t = t - 2.0;
        c / 2.0 * (t * t * t * t * t + 2.0) + b
    }

    out_in!();
}

/// Sinusoidal easing.
pub mod sine {
    use super::{FRAC_PI_2, PI};

    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        -c * (t / d * FRAC_PI_2).cos() + c + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        c * (t / d * FRAC_PI_2).sin() + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        -c / 2.0 * ((PI * t / d).cos() - 1.0) + b
    }

    out_in!();
}

/// Exponential (2ᵗ) easing.
///
/// The curves are scaled slightly so that they leave and reach their ends
/// without a visible jump; the exact end points are returned at `0` and
/// `duration`.
pub mod expo {
    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        if t == 0.0 {
            return b;
        }
        c * 2_f64.powf(10.0 * (t / d - 1.0)) + b - c * 0.001
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        if t == d {
            return b + c;
        }
        c * 1.001 * (1.0 - 2_f64.powf(-10.0 * t / d)) + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        if t == 0.0 {
            return b;
        }
        if t == d {
            return b + c;
        }
        let t = t / (d / 2.0);
        if t < 1.0 {
            return c / 2.0 * 2_f64.powf(10.0 * (t - 1.0)) + b - c * 0.0005;
        }
        c / 2.0 * 1.0005 * (2.0 - 2_f64.powf(-10.0 * (t - 1.0))) + b
    }

    out_in!();
}

/// Circular (√(1 - t²)) easing.
pub mod circ {
    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d;
        -c * ((1.0 - t * t).sqrt() - 1.0) + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / d - 1.0;
        c * (1.0 - t * t).sqrt() + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        let t = t / (d / 2.0);
        if t < 1.0 {
            return -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b;
        }
        let t = t - 2.0;
        c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
    }

    out_in!();
}

/// Exponentially decaying sine wave.
///
/// The `_with` variants take an optional `amplitude` (ignored when smaller than
/// the change itself) and an optional `period`, which defaults to 30% of the
/// duration (45% for `ease_in_out`).
pub mod elastic {
    use super::TAU;

    fn phase(c: f64, period: f64, amplitude: Option<f64>) -> (f64, f64) {
        match amplitude {
            Some(a) if a >= c.abs() => (a, period / TAU * (c / a).asin()),
            _ => (c, period / 4.0),
        }
    }

    /// Accelerate from zero velocity.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        ease_in_with(t, b, c, d, None, None)
    }

    /// [`ease_in`] with explicit amplitude and period.
    pub fn ease_in_with(
        t: f64,
        b: f64,
        c: f64,
        d: f64,
        amplitude: Option<f64>,
        period: Option<f64>,
    ) -> f64 {
        if t == 0.0 {
            return b;
        }
        let t = t / d;
        if t == 1.0 {
            return b + c;
        }
        let p = period.unwrap_or(d * 0.3);
        let (a, s) = phase(c, p, amplitude);
        let t = t - 1.0;
        -(a * 2_f64.powf(10.0 * t) * ((t * d - s) * TAU / p).sin()) + b
    }

    /// Decelerate to zero velocity.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        ease_out_with(t, b, c, d, None, None)
    }

    /// [`ease_out`] with explicit amplitude and period.
    pub fn ease_out_with(
        t: f64,
        b: f64,
        c: f64,
        d: f64,
        amplitude: Option<f64>,
        period: Option<f64>,
    ) -> f64 {
        if t == 0.0 {
            return b;
        }
        let t = t / d;
        if t == 1.0 {
            return b + c;
        }
        let p = period.unwrap_or(d * 0.3);
        let (a, s) = phase(c, p, amplitude);
        a * 2_f64.powf(-10.0 * t) * ((t * d - s) * TAU / p).sin() + c + b
    }

    /// Accelerate to the midpoint, then decelerate.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        ease_in_out_with(t, b, c, d, None, None)
    }

    /// [`ease_in_out`] with explicit amplitude and period.
    pub fn ease_in_out_with(
        t: f64,
        b: f64,
        c: f64,
        d: f64,
        amplitude: Option<f64>,
        period: Option<f64>,
    ) -> f64 {
        if t == 0.0 {
            return b;
        }
        let t = t / (d / 2.0);
        if t == 2.0 {
            return b + c;
        }
        let p = period.unwrap_or(d * (0.3 * 1.5));
        let (a, s) = phase(c, p, amplitude);
        let t = t - 1.0;
        let wave = ((t * d - s) * TAU / p).sin();
        if t < 0.0 {
            return -0.5 * (a * 2_f64.powf(10.0 * t) * wave) + b;
        }
        a * 2_f64.powf(-10.0 * t) * wave * 0.5 + c + b
    }

    out_in!();

    /// [`ease_out_in`] with explicit amplitude and period.
    pub fn ease_out_in_with(
        t: f64,
        b: f64,
        c: f64,
        d: f64,
        amplitude: Option<f64>,
        period: Option<f64>,
    ) -> f64 {
        super::split_out_in(
            |t, b, c, d| ease_out_with(t, b, c, d, amplitude, period),
            |t, b, c, d| ease_in_with(t, b, c, d, amplitude, period),
            t,
            b,
            c,
            d,
        )
    }
}

/// Overshooting cubic easing.
///
/// The `_with` variants take the overshoot amount; the default of `1.70158`
/// overshoots by about ten percent.
pub mod back {
    /// Default overshoot amount.
    pub const OVERSHOOT: f64 = 1.70158;

    /// Back up slightly, then accelerate.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        ease_in_with(t, b, c, d, OVERSHOOT)
    }

    /// [`ease_in`] with an explicit overshoot.
    pub fn ease_in_with(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
        let t = t / d;
        c * t * t * ((s + 1.0) * t - s) + b
    }

    /// Overshoot the end, then settle.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        ease_out_with(t, b, c, d, OVERSHOOT)
    }

    /// [`ease_out`] with an explicit overshoot.
    pub fn ease_out_with(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
        let t = t / d - 1.0;
        c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
    }

    /// Back up, accelerate through the midpoint, overshoot and settle.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        ease_in_out_with(t, b, c, d, OVERSHOOT)
    }

    /// [`ease_in_out`] with an explicit overshoot.
    pub fn ease_in_out_with(t: f64, b: f64, c: f64, d: f64, s: f64) -> f64 {
        let s = s * 1.525;
        let t = t / (d / 2.0);
        if t < 1.0 {
            return c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b;
        }
        let t = t - 2.0;
        c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
    }

    out_in!();
}

/// Bouncing easing.
pub mod bounce {
    /// Bounce with growing height, then land at the end.
    pub fn ease_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
        c - ease_out(d - t, 0.0, c, d) + b
    }

    /// Reach the end, then bounce with shrinking height.
    pub fn ease_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        const K: f64 = 7.5625;
        let t = t / d;
        if t < 1.0 / 2.75 {
            c * (K * t * t) + b
        } else if t < 2.0 / 2.75 {
            let t = t - 1.5 / 2.75;
            c * (K * t * t + 0.75) + b
        } else if t < 2.5 / 2.75 {
            let t = t - 2.25 / 2.75;
            c * (K * t * t + 0.9375) + b
        } else {
            let t = t - 2.625 / 2.75;
            c * (K * t * t + 0.984375) + b
        }
    }

    /// Bounce in over the first half, bounce out over the second.
    pub fn ease_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
        if t < d / 2.0 {
            ease_in(t * 2.0, 0.0, c, d) * 0.5 + b
        } else {
            ease_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
        }
    }

    out_in!();
}
