//! Code-block reveal
//!
//! A single deferred fade for the decorative code sample: invisible at
//! mount, then after 800ms a 0.5s opacity transition to fully visible.
//! One-shot, no cancellation path. No-op when the element is absent.

use crate::runtime::{ElementTransition, Runtime};
use vitrine_animation::{Easing, StyleTransition, TransitionValues};
use vitrine_core::dom::{TimingFunction, TransitionDecl, TransitionProperty};

/// Delay before the fade starts.
pub const REVEAL_DELAY_MS: u32 = 800;

/// Duration of the fade itself.
pub const FADE_MS: u32 = 500;

/// Arm the reveal timer if a code sample is present.
pub fn install(runtime: &mut Runtime) {
    let doc = runtime.doc();
    let element = {
        let mut d = doc.lock().unwrap();
        let Some(element) = d.first_by_class("code-block") else {
            return;
        };
        if let Some(node) = d.element_mut(element) {
            node.style.opacity = Some(0.0);
        }
        element
    };

    let transitions = runtime.transitions_handle();
    runtime.schedule(REVEAL_DELAY_MS, move || {
        {
            let mut d = doc.lock().unwrap();
            if let Some(node) = d.element_mut(element) {
                node.style.transition = Some(TransitionDecl::new(
                    [TransitionProperty::Opacity],
                    FADE_MS,
                    TimingFunction::Ease,
                ));
            }
        }

        let mut fade = StyleTransition::new(
            TransitionValues::opacity(0.0),
            TransitionValues::opacity(1.0),
            FADE_MS,
        )
        .easing(Easing::CSS_EASE);
        fade.start();
        transitions.lock().unwrap().push(ElementTransition {
            element,
            transition: fade,
        });
        tracing::debug!("code block fading in");
    });
}
