//! Event bus
//!
//! Normalizes the hosting side's notification mechanisms - control
//! activation, scrolling, attribute mutation, viewport intersection, and
//! media-query changes - into one subscription surface with explicit
//! cancellation. Handlers for the same event kind fire in registration
//! order; a canceled subscription is skipped from the next dispatch on.

use crate::dom::ElementId;
use crate::geometry::Size;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Event kinds a subscription can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Activate,
    Scroll,
    Resize,
    AttributeChanged,
    Intersection,
    MediaChange,
}

/// An event delivered by the hosting environment.
#[derive(Clone, Debug)]
pub enum PageEvent {
    /// A control or link was activated (click, keyboard).
    Activate(ElementId),
    /// The document scrolled to a new vertical offset.
    Scroll { offset: f32 },
    /// The viewport changed size.
    Resize { viewport: Size },
    /// An attribute write was observed on an element.
    AttributeChanged {
        target: ElementId,
        attribute: String,
    },
    /// A watched element's visible-area ratio crossed the threshold.
    Intersection { target: ElementId, ratio: f32 },
    /// The system color-scheme preference flipped.
    MediaChange { dark: bool },
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Activate(_) => EventKind::Activate,
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::AttributeChanged { .. } => EventKind::AttributeChanged,
            PageEvent::Intersection { .. } => EventKind::Intersection,
            PageEvent::MediaChange { .. } => EventKind::MediaChange,
        }
    }

    /// The element the event is about, when it is about one.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            PageEvent::Activate(target)
            | PageEvent::AttributeChanged { target, .. }
            | PageEvent::Intersection { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Cancelable handle to a registered handler.
///
/// Cancellation is effective immediately: the handler will not run again,
/// even for events later in the current dispatch.
#[derive(Clone)]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Handler signature. The subscription handle is passed back in so a handler
/// can cancel itself - the one-shot reveal pattern.
pub type EventHandler = Box<dyn Fn(&PageEvent, &Subscription) + Send + Sync>;

struct Entry {
    kind: EventKind,
    target: Option<ElementId>,
    subscription: Subscription,
    handler: EventHandler,
}

/// Dispatches page events to registered handlers in registration order.
pub struct EventBus {
    entries: Vec<Entry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a handler for an event kind, optionally scoped to a single
    /// target element.
    pub fn subscribe<F>(
        &mut self,
        kind: EventKind,
        target: Option<ElementId>,
        handler: F,
    ) -> Subscription
    where
        F: Fn(&PageEvent, &Subscription) + Send + Sync + 'static,
    {
        let subscription = Subscription::new();
        self.entries.push(Entry {
            kind,
            target,
            subscription: subscription.clone(),
            handler: Box::new(handler),
        });
        subscription
    }

    /// Deliver an event to every live matching handler, in registration
    /// order.
    pub fn dispatch(&self, event: &PageEvent) {
        tracing::trace!(?event, "dispatch");
        for entry in &self.entries {
            if entry.kind != event.kind() {
                continue;
            }
            if !entry.subscription.is_active() {
                continue;
            }
            if let Some(target) = entry.target {
                if event.target() != Some(target) {
                    continue;
                }
            }
            (entry.handler)(event, &entry.subscription);
        }
    }

    /// Drop entries whose subscriptions have been canceled.
    pub fn prune(&mut self) {
        self.entries.retain(|e| e.subscription.is_active());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn handlers_fire_in_registration_order() {
        let mut bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = log.clone();
            bus.subscribe(EventKind::Scroll, None, move |_, _| {
                log.lock().unwrap().push(tag);
            });
        }

        bus.dispatch(&PageEvent::Scroll { offset: 10.0 });
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn canceled_subscription_stops_delivery() {
        let mut bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        let sub = bus.subscribe(EventKind::Scroll, None, move |_, _| {
            *count_clone.lock().unwrap() += 1;
        });

        bus.dispatch(&PageEvent::Scroll { offset: 1.0 });
        sub.cancel();
        bus.dispatch(&PageEvent::Scroll { offset: 2.0 });

        assert_eq!(*count.lock().unwrap(), 1);

        bus.prune();
        assert!(bus.is_empty());
    }

    #[test]
    fn handler_can_cancel_itself() {
        let mut bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        bus.subscribe(EventKind::Scroll, None, move |_, sub| {
            *count_clone.lock().unwrap() += 1;
            sub.cancel();
        });

        bus.dispatch(&PageEvent::Scroll { offset: 1.0 });
        bus.dispatch(&PageEvent::Scroll { offset: 2.0 });

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn targeted_subscription_filters_other_elements() {
        let mut doc = crate::dom::Document::new(Size::new(100.0, 100.0));
        let a = doc.create_element("a");
        let b = doc.create_element("a");

        let mut bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        bus.subscribe(EventKind::Activate, Some(a), move |_, _| {
            *count_clone.lock().unwrap() += 1;
        });

        bus.dispatch(&PageEvent::Activate(b));
        assert_eq!(*count.lock().unwrap(), 0);
        bus.dispatch(&PageEvent::Activate(a));
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
