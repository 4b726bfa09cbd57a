// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-phase propagation over an ancestor chain.

use crate::{Event, Phase, Snapshot};

/// Deliver `event` along `chain`.
///
/// `chain[0]` is the target and the remaining entries are its ancestors from
/// the immediate parent outward. `listeners` is asked for the listeners of one
/// node and phase right before that node runs, so callbacks may mutate the
/// registries (or the hierarchy) through `ctx` without affecting the walk that
/// is already in progress.
///
/// - Capture: outermost ancestor down to the target's parent.
/// - Target: every listener of the target.
/// - Bubble: the target's parent up to the outermost ancestor.
///
/// A non-bubbling event only visits the target. Once a listener stops
/// propagation, the remaining listeners of the current node still run, but no
/// further node is visited. An empty `chain` delivers nothing.
pub fn propagate<C, K, D>(
    ctx: &mut C,
    chain: &[K],
    event: &mut Event<K, D>,
    mut listeners: impl FnMut(&C, K, Phase) -> Snapshot<C, K, D>,
) where
    K: Copy,
{
    let Some((&target, ancestors)) = chain.split_first() else {
        return;
    };
    event.begin(target);
    let ancestors = if event.bubbles() { ancestors } else { &[] };

    for &node in ancestors.iter().rev() {
        if event.is_propagation_stopped() {
            return;
        }
        visit(ctx, node, Phase::Capture, event, &mut listeners);
    }
    if event.is_propagation_stopped() {
        return;
    }
    visit(ctx, target, Phase::Target, event, &mut listeners);
    for &node in ancestors {
        if event.is_propagation_stopped() {
            return;
        }
        visit(ctx, node, Phase::Bubble, event, &mut listeners);
    }
}

fn visit<C, K, D>(
    ctx: &mut C,
    node: K,
    phase: Phase,
    event: &mut Event<K, D>,
    listeners: &mut impl FnMut(&C, K, Phase) -> Snapshot<C, K, D>,
) where
    K: Copy,
{
    let run = listeners(ctx, node, phase);
    if run.is_empty() {
        return;
    }
    event.enter(node, phase);
    for listener in run {
        listener.call(ctx, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Listener, ListenerRegistry};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    struct Ctx {
        nodes: Vec<ListenerRegistry<Self, usize>>,
        log: Vec<String>,
    }

    impl Ctx {
        fn new(n: usize) -> Self {
            Self {
                nodes: (0..n).map(|_| ListenerRegistry::new()).collect(),
                log: Vec::new(),
            }
        }

        fn dispatch(&mut self, chain: &[usize], ev: &mut Event<usize, ()>) {
            propagate(self, chain, ev, |ctx, node, phase| {
                ctx.nodes[node].snapshot::<()>("e", phase)
            });
        }
    }

    fn recorder() -> Listener<Ctx, usize, ()> {
        Listener::new(|ctx: &mut Ctx, ev: &mut Event<usize, ()>| {
            let tag = match ev.phase() {
                Some(Phase::Capture) => "CAP",
                Some(Phase::Target) => "AT",
                Some(Phase::Bubble) => "BUB",
                None => "?",
            };
            ctx.log.push(format!("{tag}:{}", ev.current_target().unwrap()));
        })
    }

    #[test]
    fn capture_target_bubble_order() {
        // 0 is the outermost, 2 the target.
        let mut ctx = Ctx::new(3);
        let r = recorder();
        for n in 0..3 {
            ctx.nodes[n].add("e", r.clone(), true, 0);
            ctx.nodes[n].add("e", r.clone(), false, 0);
        }
        let mut ev = Event::new("e", ());
        ctx.dispatch(&[2, 1, 0], &mut ev);
        assert_eq!(
            ctx.log,
            vec!["CAP:0", "CAP:1", "AT:2", "AT:2", "BUB:1", "BUB:0"]
        );
        assert_eq!(ev.target(), Some(2));
    }

    #[test]
    fn non_bubbling_only_reaches_target() {
        let mut ctx = Ctx::new(2);
        let r = recorder();
        ctx.nodes[0].add("e", r.clone(), true, 0);
        ctx.nodes[0].add("e", r.clone(), false, 0);
        ctx.nodes[1].add("e", r, false, 0);
        let mut ev = Event::new("e", ()).with_bubbles(false);
        ctx.dispatch(&[1, 0], &mut ev);
        assert_eq!(ctx.log, vec!["AT:1"]);
    }

    #[test]
    fn stop_in_capture_skips_later_nodes_but_not_siblings() {
        let mut ctx = Ctx::new(2);
        let stopper = Listener::new(|ctx: &mut Ctx, ev: &mut Event<usize, ()>| {
            ctx.log.push(String::from("stop"));
            ev.stop_propagation();
        });
        ctx.nodes[0].add("e", stopper, true, 0);
        ctx.nodes[0].add("e", recorder(), true, 1);
        ctx.nodes[1].add("e", recorder(), false, 0);
        let mut ev = Event::new("e", ());
        ctx.dispatch(&[1, 0], &mut ev);
        assert_eq!(ctx.log, vec!["stop", "CAP:0"]);
    }

    #[test]
    fn uncancelable_event_keeps_going() {
        let mut ctx = Ctx::new(2);
        let stopper = Listener::new(|_: &mut Ctx, ev: &mut Event<usize, ()>| {
            ev.stop_propagation();
        });
        ctx.nodes[1].add("e", stopper, false, 0);
        ctx.nodes[0].add("e", recorder(), false, 0);
        let mut ev = Event::new("e", ()).with_cancelable(false);
        ctx.dispatch(&[1, 0], &mut ev);
        assert_eq!(ctx.log, vec!["BUB:0"]);
    }

    #[test]
    fn listener_added_during_dispatch_waits_for_next_dispatch() {
        let mut ctx = Ctx::new(1);
        let late = recorder();
        let adder = Listener::new(move |ctx: &mut Ctx, _: &mut Event<usize, ()>| {
            ctx.nodes[0].add("e", late.clone(), false, 0);
        });
        ctx.nodes[0].add("e", adder, false, 0);
        let mut ev = Event::new("e", ());
        ctx.dispatch(&[0], &mut ev);
        assert!(ctx.log.is_empty());
        ctx.dispatch(&[0], &mut Event::new("e", ()));
        assert_eq!(ctx.log, vec!["AT:0"]);
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let mut ctx = Ctx::new(0);
        let mut ev = Event::new("e", ());
        ctx.dispatch(&[], &mut ev);
        assert_eq!(ev.target(), None);
    }
}
