//! Entrance animations
//!
//! Content cards start hidden (opacity 0, nudged 20px down) with a declared
//! 0.6s ease transition, and reveal the first time at least 10% of their box
//! enters the viewport. Reveal is terminal: the element's machine moves
//! pending -> revealed, the revealed class goes on, and both the
//! intersection watch entry and the bus subscription for that element are
//! canceled. A document-level class rule makes the revealed values override
//! the inline hidden ones.
//!
//! Stagger delays are precomputed at mount: direct children of each grid
//! container get index * 0.1s, then timeline items get index * 0.15s. An
//! element in both groups keeps the timeline delay (last write wins).

use crate::runtime::Runtime;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex};
use vitrine_core::dom::{ClassRule, ElementId, TimingFunction, TransitionDecl, TransitionProperty};
use vitrine_core::events::{EventKind, PageEvent, Subscription};
use vitrine_core::fsm::{FsmId, FsmRuntime, StateMachine, Transition};

/// Class applied on reveal.
pub const REVEAL_CLASS: &str = "animate-in";

/// Content selectors watched for viewport entry.
pub const ANIMATABLE_CLASSES: [&str; 5] = [
    "skill-card",
    "timeline-item",
    "stat",
    "credential-card",
    "contact-card",
];

/// Grid containers whose direct children are staggered.
pub const GRID_CLASSES: [&str; 4] = [
    "skills-grid",
    "about-stats",
    "contact-grid",
    "credentials-grid",
];

/// Fraction of an element's box that must be visible to count as entered.
pub const INTERSECTION_THRESHOLD: f32 = 0.1;

/// Declared transition on hidden elements.
pub const ENTRANCE_DURATION_MS: u32 = 600;

/// Initial downward offset of hidden elements.
pub const HIDDEN_OFFSET_Y: f32 = 20.0;

/// Per-index delay increment for grid children.
pub const GRID_STAGGER_MS: u32 = 100;

/// Per-index delay increment for timeline items.
pub const TIMELINE_STAGGER_MS: u32 = 150;

const TIMELINE_CLASS: &str = "timeline-item";

// Machine states and the single driving event.
const PENDING: u32 = 0;
const REVEALED: u32 = 1;
const INTERSECTED: u32 = 1;

struct EntranceState {
    machines: FsmRuntime,
    ids: FxHashMap<ElementId, FsmId>,
}

/// Mount the controller: hide the targets, precompute stagger delays, and
/// watch for viewport entry.
pub fn install(runtime: &mut Runtime) -> Vec<Subscription> {
    let doc = runtime.doc();
    let watch = runtime.watch();

    let state = Arc::new(Mutex::new(EntranceState {
        machines: FsmRuntime::new(),
        ids: FxHashMap::default(),
    }));

    let targets = {
        let mut d = doc.lock().unwrap();

        // The revealed values must beat the inline hidden ones.
        d.register_class_rule(ClassRule {
            class: REVEAL_CLASS.to_string(),
            opacity: Some(1.0),
            translate_y: Some(0.0),
            important: true,
        });

        let mut seen = FxHashSet::default();
        let mut targets = Vec::new();
        for class in ANIMATABLE_CLASSES {
            for el in d.by_class(class) {
                if seen.insert(el) {
                    targets.push(el);
                }
            }
        }

        {
            let mut s = state.lock().unwrap();
            let mut w = watch.lock().unwrap();
            for &el in &targets {
                if let Some(node) = d.element_mut(el) {
                    node.style.opacity = Some(0.0);
                    node.style.translate_y = Some(HIDDEN_OFFSET_Y);
                    node.style.transition = Some(TransitionDecl::new(
                        [TransitionProperty::Opacity, TransitionProperty::Transform],
                        ENTRANCE_DURATION_MS,
                        TimingFunction::Ease,
                    ));
                }
                let fsm = s.machines.create(StateMachine::new(
                    PENDING,
                    vec![Transition::new(PENDING, INTERSECTED, REVEALED)],
                ));
                s.ids.insert(el, fsm);
                w.observe(el, INTERSECTION_THRESHOLD);
            }
        }

        // Grid pass first, timeline pass second: an element in both groups
        // keeps the timeline delay.
        for grid_class in GRID_CLASSES {
            for grid in d.by_class(grid_class) {
                let children: Vec<ElementId> = d.children(grid).to_vec();
                for (index, child) in children.into_iter().enumerate() {
                    if let Some(node) = d.element_mut(child) {
                        node.style.transition_delay_ms = Some(index as u32 * GRID_STAGGER_MS);
                    }
                }
            }
        }
        for (index, item) in d.by_class(TIMELINE_CLASS).into_iter().enumerate() {
            if let Some(node) = d.element_mut(item) {
                node.style.transition_delay_ms = Some(index as u32 * TIMELINE_STAGGER_MS);
            }
        }

        targets
    };

    let mut subscriptions = Vec::new();
    for el in targets {
        let doc = doc.clone();
        let watch = watch.clone();
        let state = state.clone();
        subscriptions.push(runtime.bus_mut().subscribe(
            EventKind::Intersection,
            Some(el),
            move |event, sub| {
                let PageEvent::Intersection { ratio, .. } = event else {
                    return;
                };
                if *ratio < INTERSECTION_THRESHOLD {
                    return;
                }

                {
                    let mut s = state.lock().unwrap();
                    let Some(&fsm) = s.ids.get(&el) else {
                        return;
                    };
                    // Terminal transition owns the exactly-once guarantee.
                    if !s.machines.get(fsm).is_some_and(|m| m.can_send(INTERSECTED)) {
                        return;
                    }
                    s.machines.send(fsm, INTERSECTED);
                }

                doc.lock().unwrap().add_class(el, REVEAL_CLASS);
                watch.lock().unwrap().unobserve(el);
                sub.cancel();
                tracing::debug!(?el, "revealed");
            },
        ));
    }

    subscriptions
}
