//! Scripted walkthrough of the consulting landing page.
//!
//! Builds the page structure, mounts the behaviors, and drives a short
//! session: scroll past the fold, open and use the mobile menu, follow an
//! anchor link, flip the theme. Run with `RUST_LOG=debug` to watch the
//! behaviors narrate.

use tracing_subscriber::EnvFilter;
use vitrine_behaviors::{Runtime, Site};
use vitrine_core::dom::Document;
use vitrine_core::geometry::{Rect, Size};
use vitrine_theme::{ColorScheme, FilePreferences, StaticSignal};

fn build_page() -> Document {
    let mut d = Document::new(Size::new(1280.0, 720.0));
    let root = d.root();

    let navbar = d.create_element("nav");
    d.add_class(navbar, "navbar");
    d.set_bounds(navbar, Rect::new(0.0, 0.0, 1280.0, 64.0));
    d.append_child(root, navbar);

    for class in ["theme-toggle", "nav-toggle"] {
        let button = d.create_element("button");
        d.add_class(button, class);
        d.append_child(navbar, button);
    }

    let menu = d.create_element("ul");
    d.add_class(menu, "nav-menu");
    d.append_child(navbar, menu);
    for section in ["skills", "experience", "contact"] {
        let link = d.create_element("a");
        d.set_attribute(link, "href", &format!("#{section}"));
        d.append_child(menu, link);
    }

    let hero = d.create_element("section");
    d.set_id(hero, "hero");
    d.set_bounds(hero, Rect::new(0.0, 64.0, 1280.0, 700.0));
    d.append_child(root, hero);

    let code = d.create_element("code");
    d.add_class(code, "code-block");
    d.set_bounds(code, Rect::new(700.0, 180.0, 420.0, 320.0));
    d.append_child(hero, code);

    let skills = d.create_element("section");
    d.set_id(skills, "skills");
    d.set_bounds(skills, Rect::new(0.0, 800.0, 1280.0, 720.0));
    d.append_child(root, skills);

    let grid = d.create_element("div");
    d.add_class(grid, "skills-grid");
    d.append_child(skills, grid);
    for i in 0..4 {
        let card = d.create_element("div");
        d.add_class(card, "skill-card");
        d.set_bounds(card, Rect::new(0.0, 840.0 + 200.0 * i as f32, 300.0, 180.0));
        d.append_child(grid, card);
    }

    let experience = d.create_element("section");
    d.set_id(experience, "experience");
    d.set_bounds(experience, Rect::new(0.0, 1600.0, 1280.0, 700.0));
    d.append_child(root, experience);
    for i in 0..3 {
        let item = d.create_element("div");
        d.add_class(item, "timeline-item");
        d.set_bounds(item, Rect::new(0.0, 1640.0 + 200.0 * i as f32, 600.0, 160.0));
        d.append_child(experience, item);
    }

    let contact = d.create_element("section");
    d.set_id(contact, "contact");
    d.set_bounds(contact, Rect::new(0.0, 2400.0, 1280.0, 500.0));
    d.append_child(root, contact);

    d.take_mutations();
    d
}

fn run_frames(runtime: &mut Runtime, total_ms: f32) {
    let mut elapsed = 0.0;
    while elapsed < total_ms {
        runtime.advance(16.0);
        elapsed += 16.0;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let prefs_path = std::env::temp_dir().join("vitrine-landing-prefs.toml");
    tracing::info!(path = %prefs_path.display(), "theme preference file");

    let mut runtime = Runtime::new(build_page());
    let site = Site::mount(
        &mut runtime,
        Box::new(FilePreferences::open(&prefs_path)),
        Box::new(StaticSignal(ColorScheme::Dark)),
    );
    tracing::info!(
        subscriptions = site.active_subscriptions(),
        "site mounted"
    );

    // Let the code block fade in.
    run_frames(&mut runtime, 1400.0);

    // Open the menu, follow the skills link; the menu closes itself and
    // the page glides to the section.
    let (nav_toggle, skills_link) = {
        let doc = runtime.doc();
        let d = doc.lock().unwrap();
        let toggle = d.first_by_class("nav-toggle").expect("nav toggle");
        let menu = d.first_by_class("nav-menu").expect("nav menu");
        (toggle, d.by_tag_within(menu, "a")[0])
    };
    runtime.activate(nav_toggle);
    runtime.activate(skills_link);
    run_frames(&mut runtime, 600.0);

    {
        let doc = runtime.doc();
        let d = doc.lock().unwrap();
        let revealed = d.by_class("skill-card")
            .iter()
            .filter(|card| d.has_class(**card, "animate-in"))
            .count();
        tracing::info!(
            scroll = d.scroll_y(),
            revealed,
            "landed on the skills section"
        );
    }

    // Flip the theme; the navbar restyles through the attribute observer.
    let theme_toggle = {
        let doc = runtime.doc();
        let d = doc.lock().unwrap();
        d.first_by_class("theme-toggle").expect("theme toggle")
    };
    runtime.activate(theme_toggle);

    {
        let doc = runtime.doc();
        let d = doc.lock().unwrap();
        let navbar = d.first_by_class("navbar").expect("navbar");
        tracing::info!(
            theme = d.attribute(d.root(), "data-theme").unwrap_or("unset"),
            background = ?d.element(navbar).unwrap().style.background,
            "theme toggled"
        );
    }
}
