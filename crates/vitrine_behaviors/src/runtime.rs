//! Behaviors runtime
//!
//! The single-threaded pump that stands in for the hosting event loop. It
//! owns the document, the event bus, the timer queue, the in-flight scroll
//! animation, and the intersection watch, and it enforces run-to-completion
//! semantics: each event's handlers finish before the next event is
//! processed.
//!
//! Attribute writes made by a handler are journaled by the document and
//! delivered as `AttributeChanged` events after that handler returns, so an
//! attribute write always happens-before its observers' recompute.
//!
//! Time is logical. `advance` is one frame: it expires due timers, ticks the
//! in-flight scroll glide and any running style transitions, and pumps
//! whatever events that produced.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use vitrine_animation::{StyleTransition, TimerId, TimerQueue, ValueTransition};
use vitrine_core::dom::{Document, ElementId};
use vitrine_core::events::{EventBus, PageEvent};
use vitrine_core::geometry::Size;

/// Shared document handle. One execution context; the lock exists so
/// handlers can be `Send` closures, not for contention.
pub type SharedDocument = Arc<Mutex<Document>>;

/// Handle to the in-flight animated scroll, if any.
pub type ScrollAnimation = Arc<Mutex<Option<ValueTransition>>>;

/// Handle to the running style transitions.
pub type ActiveTransitions = Arc<Mutex<Vec<ElementTransition>>>;

/// A style transition attached to an element; the runtime writes its current
/// channel values into the element's inline style each frame.
pub struct ElementTransition {
    pub element: ElementId,
    pub transition: StyleTransition,
}

struct WatchEntry {
    threshold: f32,
    intersecting: bool,
}

/// Tracks which elements are watched for viewport entry and reports
/// threshold crossings. Edge-triggered per element, like the hosting
/// primitive: a report is produced only when the at-or-above-threshold
/// state changes.
pub struct IntersectionWatch {
    entries: FxHashMap<ElementId, WatchEntry>,
}

impl IntersectionWatch {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn observe(&mut self, element: ElementId, threshold: f32) {
        self.entries.insert(
            element,
            WatchEntry {
                threshold,
                intersecting: false,
            },
        );
    }

    pub fn unobserve(&mut self, element: ElementId) {
        self.entries.remove(&element);
    }

    pub fn is_watched(&self, element: ElementId) -> bool {
        self.entries.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recompute every watched element's visible ratio against the current
    /// viewport, returning the elements whose threshold state flipped.
    pub fn sweep(&mut self, doc: &Document) -> Vec<(ElementId, f32)> {
        let viewport = doc.viewport_rect();
        let mut reports = Vec::new();
        for (element, entry) in self.entries.iter_mut() {
            let ratio = doc.bounds(*element).visible_ratio(&viewport);
            let intersecting = ratio >= entry.threshold;
            if intersecting != entry.intersecting {
                entry.intersecting = intersecting;
                reports.push((*element, ratio));
            }
        }
        reports
    }
}

impl Default for IntersectionWatch {
    fn default() -> Self {
        Self::new()
    }
}

/// The event pump.
pub struct Runtime {
    doc: SharedDocument,
    bus: EventBus,
    queue: VecDeque<PageEvent>,
    timers: TimerQueue,
    timer_actions: FxHashMap<TimerId, Box<dyn FnMut() + Send>>,
    scroll_anim: ScrollAnimation,
    transitions: ActiveTransitions,
    watch: Arc<Mutex<IntersectionWatch>>,
}

impl Runtime {
    pub fn new(doc: Document) -> Self {
        Self {
            doc: Arc::new(Mutex::new(doc)),
            bus: EventBus::new(),
            queue: VecDeque::new(),
            timers: TimerQueue::new(),
            timer_actions: FxHashMap::default(),
            scroll_anim: Arc::new(Mutex::new(None)),
            transitions: Arc::new(Mutex::new(Vec::new())),
            watch: Arc::new(Mutex::new(IntersectionWatch::new())),
        }
    }

    // ========== Handles for behavior wiring ==========

    pub fn doc(&self) -> SharedDocument {
        Arc::clone(&self.doc)
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn watch(&self) -> Arc<Mutex<IntersectionWatch>> {
        Arc::clone(&self.watch)
    }

    pub fn scroll_handle(&self) -> ScrollAnimation {
        Arc::clone(&self.scroll_anim)
    }

    pub fn transitions_handle(&self) -> ActiveTransitions {
        Arc::clone(&self.transitions)
    }

    /// Arm a one-shot timer; the action runs when `advance` crosses the
    /// deadline.
    pub fn schedule<F>(&mut self, delay_ms: u32, action: F) -> TimerId
    where
        F: FnMut() + Send + 'static,
    {
        let id = self.timers.schedule(delay_ms);
        self.timer_actions.insert(id, Box::new(action));
        id
    }

    // ========== Event entry points ==========

    /// Deliver an event and run it (and everything it causes) to
    /// completion.
    pub fn dispatch(&mut self, event: PageEvent) {
        self.queue.push_back(event);
        self.pump();
    }

    /// A control or link was activated.
    pub fn activate(&mut self, element: ElementId) {
        self.dispatch(PageEvent::Activate(element));
    }

    /// The user scrolled the document to `offset`.
    pub fn scroll_to(&mut self, offset: f32) {
        let offset = {
            let mut doc = self.doc.lock().unwrap();
            doc.set_scroll_y(offset);
            doc.scroll_y()
        };
        self.dispatch(PageEvent::Scroll { offset });
    }

    /// The viewport changed size.
    pub fn resize(&mut self, viewport: Size) {
        self.doc.lock().unwrap().set_viewport(viewport);
        self.dispatch(PageEvent::Resize { viewport });
    }

    /// The system color-scheme preference flipped.
    pub fn media_change(&mut self, dark: bool) {
        self.dispatch(PageEvent::MediaChange { dark });
    }

    /// Flush pending mutations and run an intersection pass. Called once at
    /// mount so initially-visible watched elements report immediately.
    pub fn refresh(&mut self) {
        self.pump();
        self.sweep_intersections();
        self.pump();
    }

    /// Advance the logical clock by one frame of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f32) {
        // Due timers first; their actions may write styles or attributes.
        let fired = self.timers.advance(dt_ms);
        for id in fired {
            if let Some(mut action) = self.timer_actions.remove(&id) {
                action();
            }
        }
        self.pump();

        // In-flight animated scroll: move the document and report the
        // scroll like any other scroll event.
        let scrolled = {
            let mut anim = self.scroll_anim.lock().unwrap();
            match anim.as_mut() {
                Some(glide) => {
                    glide.tick(dt_ms);
                    let value = glide.value();
                    if !glide.is_playing() {
                        *anim = None;
                    }
                    Some(value)
                }
                None => None,
            }
        };
        if let Some(offset) = scrolled {
            let offset = {
                let mut doc = self.doc.lock().unwrap();
                doc.set_scroll_y(offset);
                doc.scroll_y()
            };
            self.dispatch(PageEvent::Scroll { offset });
        }

        // Running style transitions write through to inline styles.
        {
            let mut transitions = self.transitions.lock().unwrap();
            let mut doc = self.doc.lock().unwrap();
            transitions.retain_mut(|entry| {
                entry.transition.tick(dt_ms);
                let values = entry.transition.current();
                if let Some(node) = doc.element_mut(entry.element) {
                    if let Some(opacity) = values.opacity {
                        node.style.opacity = Some(opacity);
                    }
                    if let Some(translate_y) = values.translate_y {
                        node.style.translate_y = Some(translate_y);
                    }
                }
                entry.transition.is_playing()
            });
        }
    }

    /// Whether any timer, scroll glide, or style transition is still
    /// pending.
    pub fn is_settled(&self) -> bool {
        self.timers.is_empty()
            && self.scroll_anim.lock().unwrap().is_none()
            && self.transitions.lock().unwrap().is_empty()
    }

    fn pump(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            let needs_sweep = matches!(
                event,
                PageEvent::Scroll { .. } | PageEvent::Resize { .. }
            );
            self.bus.dispatch(&event);

            // Journaled attribute writes become observer events only after
            // the writing handler has completed.
            let mutations = self.doc.lock().unwrap().take_mutations();
            for mutation in mutations {
                self.queue.push_back(PageEvent::AttributeChanged {
                    target: mutation.target,
                    attribute: mutation.attribute,
                });
            }

            if needs_sweep {
                self.sweep_intersections();
            }
        }
        self.bus.prune();
    }

    fn sweep_intersections(&mut self) {
        let reports = {
            let doc = self.doc.lock().unwrap();
            self.watch.lock().unwrap().sweep(&doc)
        };
        for (target, ratio) in reports {
            self.queue.push_back(PageEvent::Intersection { target, ratio });
        }
    }
}
