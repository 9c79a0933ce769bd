//! Theme controller
//!
//! Owns the current color scheme: mirrors it onto the document root's theme
//! attribute and reconciles explicit user toggles with system-level scheme
//! changes. Precedence is explicit stored choice > system signal > light.
//!
//! Only explicit actions persist. Initialization and system reconciliation
//! write the attribute but leave the store untouched, so the controller
//! keeps following the system signal until the user actually chooses.

use crate::scheme::ColorScheme;
use crate::signal::SchemeSignal;
use crate::store::{PreferenceStore, THEME_KEY};
use vitrine_core::dom::Document;

/// Attribute on the document root that carries the active scheme.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Controller for the page's light/dark scheme.
pub struct ThemeController {
    store: Box<dyn PreferenceStore>,
    system: Box<dyn SchemeSignal>,
}

impl ThemeController {
    pub fn new(store: Box<dyn PreferenceStore>, system: Box<dyn SchemeSignal>) -> Self {
        Self { store, system }
    }

    /// Resolve the startup scheme (stored choice, else system signal) and
    /// reflect it onto the document. Does not persist: startup is not a
    /// user choice.
    pub fn initialize(&mut self, doc: &mut Document) {
        let scheme = self
            .stored_scheme()
            .unwrap_or_else(|| self.system.current());
        self.reflect(doc, scheme);
        tracing::debug!(scheme = %scheme, "theme initialized");
    }

    /// The scheme the document currently shows. Absent or unknown attribute
    /// values read as light here; the navbar policy applies its own
    /// dark-by-default branch separately.
    pub fn current(&self, doc: &Document) -> ColorScheme {
        doc.attribute(doc.root(), THEME_ATTRIBUTE)
            .and_then(ColorScheme::parse)
            .unwrap_or(ColorScheme::Light)
    }

    /// Explicitly apply a scheme: reflect it and persist it. Re-applying
    /// the current scheme is always safe.
    pub fn apply(&mut self, doc: &mut Document, scheme: ColorScheme) {
        self.reflect(doc, scheme);
        self.store.set(THEME_KEY, scheme.as_str());
    }

    /// Flip between the two schemes, keyed off the attribute the document
    /// actually shows (an absent attribute toggles to dark).
    pub fn toggle(&mut self, doc: &mut Document) {
        let next = match doc.attribute(doc.root(), THEME_ATTRIBUTE) {
            Some("dark") => ColorScheme::Light,
            _ => ColorScheme::Dark,
        };
        tracing::debug!(scheme = %next, "theme toggled");
        self.apply(doc, next);
    }

    /// Reconcile a system-level scheme change. An explicit stored choice
    /// always wins until storage is cleared; otherwise the document follows
    /// the system, still without persisting.
    pub fn on_system_change(&mut self, doc: &mut Document, scheme: ColorScheme) {
        if self.store.get(THEME_KEY).is_some() {
            tracing::debug!(scheme = %scheme, "system change ignored, explicit choice stored");
            return;
        }
        self.reflect(doc, scheme);
        tracing::debug!(scheme = %scheme, "theme following system change");
    }

    fn stored_scheme(&self) -> Option<ColorScheme> {
        self.store
            .get(THEME_KEY)
            .and_then(|value| ColorScheme::parse(&value))
    }

    fn reflect(&self, doc: &mut Document, scheme: ColorScheme) {
        let root = doc.root();
        doc.set_attribute(root, THEME_ATTRIBUTE, scheme.as_str());
    }
}
