// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for multi-step tween sequences driven through `TweenScheduler`.

use proscenium_tween::{Property, Tween, TweenHost, TweenScheduler, easing};

struct Puppet {
    time: f64,
    x: f64,
    y: f64,
    visible: bool,
}

impl TweenHost for Puppet {
    type Target = ();

    fn clock_time(&self, (): ()) -> Option<f64> {
        Some(self.time)
    }
}

fn x() -> Property<Puppet> {
    Property::new("x", |p: &Puppet, ()| p.x, |p: &mut Puppet, (), v| p.x = v)
}

fn y() -> Property<Puppet> {
    Property::new("y", |p: &Puppet, ()| p.y, |p: &mut Puppet, (), v| p.y = v)
}

fn run_until(s: &mut TweenScheduler<Puppet>, p: &mut Puppet, until: f64, dt: f64) {
    while p.time < until {
        p.time += dt;
        s.advance(p);
    }
}

#[test]
fn three_legged_chain_visits_every_waypoint() {
    let mut p = Puppet { time: 0.0, x: 0.0, y: 0.0, visible: true };
    let mut s = TweenScheduler::new();
    let tween = Tween::new((), x(), 1.0, 0.25)
        .continue_to(2.0, 0.25, easing::quad::ease_out, 0.0)
        .continue_to(-1.0, 0.25, easing::bounce::ease_out, 0.5);
    assert_eq!(tween.chain_len(), 2);
    s.schedule(&p, tween);

    run_until(&mut s, &mut p, 0.25, 0.125);
    assert_eq!(p.x, 1.0);
    run_until(&mut s, &mut p, 0.75, 0.125);
    assert_eq!(p.x, 2.0);
    // The last leg waits out its delay before moving.
    run_until(&mut s, &mut p, 1.0, 0.125);
    assert_eq!(p.x, 2.0);
    run_until(&mut s, &mut p, 2.5, 0.125);
    assert_eq!(p.x, -1.0);
    assert!(s.is_empty());
}

#[test]
fn independent_properties_animate_together() {
    let mut p = Puppet { time: 0.0, x: 0.0, y: 0.0, visible: false };
    let mut s = TweenScheduler::new();
    s.schedule(
        &p,
        Tween::new((), x(), 4.0, 1.0).on_start(|p: &mut Puppet, ()| p.visible = true),
    );
    s.schedule(&p, Tween::new((), y(), -4.0, 2.0).with_easing(easing::sine::ease_in_out));
    assert_eq!(s.len(), 2);

    run_until(&mut s, &mut p, 1.0, 0.25);
    assert!(p.visible);
    assert_eq!(p.x, 4.0);
    assert!((p.y - -2.0).abs() < 1e-9, "y = {}", p.y);
    assert_eq!(s.len(), 1);

    run_until(&mut s, &mut p, 2.0, 0.25);
    assert_eq!(p.y, -4.0);
    assert!(s.is_empty());
}
