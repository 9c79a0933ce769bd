//! Scroll-reactive navbar styling
//!
//! The navbar background is a pure function of the current theme attribute
//! and the scroll offset, recomputed on every scroll event and on every
//! observed write to the root's theme attribute. No throttling: recompute
//! is cheap and the settled state is what matters.

use crate::runtime::Runtime;
use vitrine_core::color::Color;
use vitrine_core::events::{EventKind, PageEvent, Subscription};
use vitrine_theme::THEME_ATTRIBUTE;

/// Scroll distance past which the navbar tightens up.
pub const SCROLL_THRESHOLD: f32 = 50.0;

/// Navbar background policy.
///
/// Anything other than the literal `"light"` attribute value - including an
/// absent attribute - styles as dark. Two branches only; there is no third
/// state.
pub fn navbar_background(theme_attr: Option<&str>, scroll_y: f32) -> Color {
    let scrolled = scroll_y > SCROLL_THRESHOLD;
    if theme_attr != Some("light") {
        let alpha = if scrolled { 0.95 } else { 0.80 };
        Color::from_rgb8(10, 10, 11).with_alpha(alpha)
    } else {
        let alpha = if scrolled { 0.95 } else { 0.90 };
        Color::from_rgb8(255, 255, 255).with_alpha(alpha)
    }
}

/// Wire the styler: restyle on scroll and on theme-attribute mutations.
/// No navbar element, no subscriptions.
pub fn install(runtime: &mut Runtime) -> Vec<Subscription> {
    let doc = runtime.doc();
    let navbar = {
        let d = doc.lock().unwrap();
        d.first_by_class("navbar")
    };
    let Some(navbar) = navbar else {
        return Vec::new();
    };

    let root = doc.lock().unwrap().root();

    let restyle = {
        let doc = doc.clone();
        move || {
            let mut d = doc.lock().unwrap();
            let background =
                navbar_background(d.attribute(d.root(), THEME_ATTRIBUTE), d.scroll_y());
            if let Some(node) = d.element_mut(navbar) {
                node.style.background = Some(background);
            }
        }
    };

    let mut subscriptions = Vec::new();

    let on_scroll = restyle.clone();
    subscriptions.push(runtime.bus_mut().subscribe(
        EventKind::Scroll,
        None,
        move |_, _| on_scroll(),
    ));

    subscriptions.push(runtime.bus_mut().subscribe(
        EventKind::AttributeChanged,
        Some(root),
        move |event, _| {
            if let PageEvent::AttributeChanged { attribute, .. } = event {
                if attribute == THEME_ATTRIBUTE {
                    restyle();
                }
            }
        },
    ));

    subscriptions
}
