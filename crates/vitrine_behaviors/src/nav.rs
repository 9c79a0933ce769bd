//! Responsive navigation toggle
//!
//! The toggle control and the menu container carry an `active` class as two
//! independent visual flags, always kept equal. Activating any link inside
//! the menu force-closes both, whatever the current state. Links are bound
//! at mount time only.

use crate::runtime::Runtime;
use vitrine_core::events::{EventKind, Subscription};

/// Class carried by the toggle control and menu while the menu is open.
pub const OPEN_CLASS: &str = "active";

/// Wire the toggle. No-op when either the toggle control or the menu
/// container is missing from the document.
pub fn install(runtime: &mut Runtime) -> Vec<Subscription> {
    let doc = runtime.doc();
    let (toggle, menu, links) = {
        let d = doc.lock().unwrap();
        let toggle = d.first_by_class("nav-toggle");
        let menu = d.first_by_class("nav-menu");
        match (toggle, menu) {
            (Some(toggle), Some(menu)) => (toggle, menu, d.by_tag_within(menu, "a")),
            _ => return Vec::new(),
        }
    };

    let mut subscriptions = Vec::new();

    {
        let doc = doc.clone();
        subscriptions.push(runtime.bus_mut().subscribe(
            EventKind::Activate,
            Some(toggle),
            move |_, _| {
                let mut d = doc.lock().unwrap();
                d.toggle_class(menu, OPEN_CLASS);
                d.toggle_class(toggle, OPEN_CLASS);
            },
        ));
    }

    for link in links {
        let doc = doc.clone();
        subscriptions.push(runtime.bus_mut().subscribe(
            EventKind::Activate,
            Some(link),
            move |_, _| {
                let mut d = doc.lock().unwrap();
                d.remove_class(menu, OPEN_CLASS);
                d.remove_class(toggle, OPEN_CLASS);
            },
        ));
    }

    subscriptions
}
