//! System color-scheme signal
//!
//! The environment's "prefers dark" setting, injected into the controller
//! so hosts (and tests) decide where it comes from. Change notifications do
//! not flow through this trait; they arrive as media-change events on the
//! page event bus, at most one per actual flip.

use crate::scheme::ColorScheme;

/// Synchronous view of the environment's preferred color scheme.
pub trait SchemeSignal: Send {
    fn current(&self) -> ColorScheme;
}

/// A fixed signal value, for hosts without scheme detection and for tests.
#[derive(Clone, Copy, Debug)]
pub struct StaticSignal(pub ColorScheme);

impl SchemeSignal for StaticSignal {
    fn current(&self) -> ColorScheme {
        self.0
    }
}

impl Default for StaticSignal {
    fn default() -> Self {
        Self(ColorScheme::Light)
    }
}
