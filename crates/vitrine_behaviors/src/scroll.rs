//! Smooth anchor scrolling
//!
//! Every anchor whose `href` is an in-page fragment gets its default jump
//! suppressed and replaced by an animated glide. The landing offset
//! compensates for the fixed navbar, whose height is read live at
//! activation time. Unresolvable fragments are silently ignored.

use crate::runtime::Runtime;
use vitrine_animation::{Easing, ValueTransition};
use vitrine_core::events::{EventKind, Subscription};

/// Duration of the glide. The exact curve is an implementation detail; the
/// contract is one continuous eased approach landing exactly on the
/// computed offset.
pub const SCROLL_DURATION_MS: u32 = 480;

/// Wire every fragment anchor present at mount time.
pub fn install(runtime: &mut Runtime) -> Vec<Subscription> {
    let doc = runtime.doc();
    let glide = runtime.scroll_handle();

    let anchors: Vec<_> = {
        let d = doc.lock().unwrap();
        d.by_tag("a")
            .into_iter()
            .filter_map(|el| {
                let href = d.element(el)?.attribute("href")?;
                href.starts_with('#')
                    .then(|| (el, href.trim_start_matches('#').to_string()))
            })
            .collect()
    };

    let mut subscriptions = Vec::new();
    for (anchor, fragment) in anchors {
        let doc = doc.clone();
        let glide = glide.clone();
        subscriptions.push(runtime.bus_mut().subscribe(
            EventKind::Activate,
            Some(anchor),
            move |_, _| {
                let (current, offset) = {
                    let d = doc.lock().unwrap();
                    let Some(target) = d.element_by_id(&fragment) else {
                        return; // dead fragment, nothing to do
                    };
                    let navbar_height = d
                        .first_by_class("navbar")
                        .map(|navbar| d.bounds(navbar).height())
                        .unwrap_or(0.0);
                    let offset =
                        d.top_relative_to_viewport(target) + d.scroll_y() - navbar_height;
                    (d.scroll_y(), offset)
                };

                tracing::debug!(fragment = %fragment, offset, "smooth scroll");
                let mut anim = glide.lock().unwrap();
                match anim.as_mut() {
                    Some(active) => active.retarget(offset),
                    None => {
                        let mut transition = ValueTransition::new(
                            current,
                            offset,
                            SCROLL_DURATION_MS,
                            Easing::EaseInOut,
                        );
                        transition.start();
                        *anim = Some(transition);
                    }
                }
            },
        ));
    }

    subscriptions
}
