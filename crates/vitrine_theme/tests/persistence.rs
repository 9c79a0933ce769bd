use vitrine_core::dom::Document;
use vitrine_core::geometry::Size;
use vitrine_theme::{
    ColorScheme, FilePreferences, PreferenceStore, StaticSignal, ThemeController, THEME_ATTRIBUTE,
    THEME_KEY,
};

fn doc() -> Document {
    Document::new(Size::new(1280.0, 720.0))
}

#[test]
fn apply_reflects_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    for scheme in [ColorScheme::Light, ColorScheme::Dark] {
        let mut doc = doc();
        let mut controller = ThemeController::new(
            Box::new(FilePreferences::open(&path)),
            Box::new(StaticSignal::default()),
        );

        controller.apply(&mut doc, scheme);
        assert_eq!(
            doc.attribute(doc.root(), THEME_ATTRIBUTE),
            Some(scheme.as_str())
        );

        // A fresh store sees the persisted value.
        let reopened = FilePreferences::open(&path);
        assert_eq!(reopened.get(THEME_KEY), Some(scheme.as_str().to_string()));
    }
}

#[test]
fn toggle_twice_returns_to_original() {
    let mut doc = doc();
    let mut controller = ThemeController::new(
        Box::new(vitrine_theme::MemoryPreferences::new()),
        Box::new(StaticSignal(ColorScheme::Dark)),
    );

    controller.initialize(&mut doc);
    let original = controller.current(&doc);
    controller.toggle(&mut doc);
    assert_ne!(controller.current(&doc), original);
    controller.toggle(&mut doc);
    assert_eq!(controller.current(&doc), original);
}

#[test]
fn explicit_choice_survives_reopen_and_blocks_system() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");

    {
        let mut doc = doc();
        let mut controller = ThemeController::new(
            Box::new(FilePreferences::open(&path)),
            Box::new(StaticSignal(ColorScheme::Light)),
        );
        controller.initialize(&mut doc);
        controller.toggle(&mut doc); // explicit: dark
    }

    // New session, system now prefers light; the stored choice wins.
    let mut doc = doc();
    let mut controller = ThemeController::new(
        Box::new(FilePreferences::open(&path)),
        Box::new(StaticSignal(ColorScheme::Light)),
    );
    controller.initialize(&mut doc);
    assert_eq!(controller.current(&doc), ColorScheme::Dark);

    controller.on_system_change(&mut doc, ColorScheme::Light);
    assert_eq!(controller.current(&doc), ColorScheme::Dark);
}

#[test]
fn corrupt_preference_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "this is not [valid toml").unwrap();

    let store = FilePreferences::open(&path);
    assert_eq!(store.get(THEME_KEY), None);

    // And it recovers on the next write.
    let mut store = store;
    store.set(THEME_KEY, "dark");
    let reopened = FilePreferences::open(&path);
    assert_eq!(reopened.get(THEME_KEY), Some("dark".to_string()));
}

#[test]
fn scheme_serializes_as_lowercase_literals() {
    assert_eq!(
        serde_json::to_string(&ColorScheme::Dark).unwrap(),
        "\"dark\""
    );
    assert_eq!(
        serde_json::from_str::<ColorScheme>("\"light\"").unwrap(),
        ColorScheme::Light
    );
}
