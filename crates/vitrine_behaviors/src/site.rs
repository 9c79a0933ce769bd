//! Site wiring
//!
//! Mounts every behavior against a document, once, in a fixed order:
//! theme controller, smooth scroll router, navigation toggle (so the menu's
//! link-close handlers register after the router's), navbar styling,
//! entrance animations, code-block reveal. After mount, everything runs
//! purely in reaction to events.

use crate::{code_reveal, entrance, nav, navbar, runtime::Runtime, scroll};
use std::sync::{Arc, Mutex};
use vitrine_core::events::{EventKind, PageEvent, Subscription};
use vitrine_theme::{ColorScheme, PreferenceStore, SchemeSignal, ThemeController};

/// A mounted page: the theme controller plus the live subscriptions.
pub struct Site {
    theme: Arc<Mutex<ThemeController>>,
    subscriptions: Vec<Subscription>,
}

impl Site {
    /// Wire all behaviors. Missing page elements disable their feature
    /// silently; nothing here errors.
    pub fn mount(
        runtime: &mut Runtime,
        store: Box<dyn PreferenceStore>,
        system: Box<dyn SchemeSignal>,
    ) -> Site {
        let doc = runtime.doc();
        let mut subscriptions = Vec::new();

        // Theme: resolve and reflect the startup scheme, then listen for
        // the toggle control (if present) and system scheme flips.
        let theme = Arc::new(Mutex::new(ThemeController::new(store, system)));
        {
            let mut controller = theme.lock().unwrap();
            let mut d = doc.lock().unwrap();
            controller.initialize(&mut d);
        }

        let toggle_control = doc.lock().unwrap().first_by_class("theme-toggle");
        if let Some(control) = toggle_control {
            let theme = theme.clone();
            let doc = doc.clone();
            subscriptions.push(runtime.bus_mut().subscribe(
                EventKind::Activate,
                Some(control),
                move |_, _| {
                    let mut controller = theme.lock().unwrap();
                    let mut d = doc.lock().unwrap();
                    controller.toggle(&mut d);
                },
            ));
        }

        {
            let theme = theme.clone();
            let doc = doc.clone();
            subscriptions.push(runtime.bus_mut().subscribe(
                EventKind::MediaChange,
                None,
                move |event, _| {
                    let PageEvent::MediaChange { dark } = event else {
                        return;
                    };
                    let mut controller = theme.lock().unwrap();
                    let mut d = doc.lock().unwrap();
                    controller.on_system_change(&mut d, ColorScheme::from_media(*dark));
                },
            ));
        }

        // The router's handlers must precede the menu's close handlers.
        subscriptions.extend(scroll::install(runtime));
        subscriptions.extend(nav::install(runtime));
        subscriptions.extend(navbar::install(runtime));
        subscriptions.extend(entrance::install(runtime));
        code_reveal::install(runtime);

        // Deliver the initialization writes to their observers and run the
        // first intersection pass for content already in view.
        runtime.refresh();

        Site {
            theme,
            subscriptions,
        }
    }

    pub fn theme(&self) -> Arc<Mutex<ThemeController>> {
        Arc::clone(&self.theme)
    }

    /// Live (non-canceled) subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions
            .iter()
            .filter(|sub| sub.is_active())
            .count()
    }
}
