//! Vitrine Theme System
//!
//! Light/dark scheme management for the page-behavior engine.
//!
//! # Overview
//!
//! - [`ColorScheme`]: the two-value mode, serialized as `"light"`/`"dark"`
//! - [`PreferenceStore`]: durable synchronous key-value persistence, with
//!   file-backed and in-memory implementations
//! - [`SchemeSignal`]: the injected system "prefers dark" setting
//! - [`ThemeController`]: resolves precedence (stored choice > system >
//!   light) and mirrors the active scheme onto the document root
//!
//! # Quick Start
//!
//! ```rust
//! use vitrine_core::dom::Document;
//! use vitrine_core::geometry::Size;
//! use vitrine_theme::{ColorScheme, MemoryPreferences, StaticSignal, ThemeController};
//!
//! let mut doc = Document::new(Size::new(1280.0, 720.0));
//! let mut controller = ThemeController::new(
//!     Box::new(MemoryPreferences::new()),
//!     Box::new(StaticSignal(ColorScheme::Dark)),
//! );
//!
//! controller.initialize(&mut doc);
//! assert_eq!(controller.current(&doc), ColorScheme::Dark);
//!
//! controller.toggle(&mut doc);
//! assert_eq!(controller.current(&doc), ColorScheme::Light);
//! ```

pub mod controller;
pub mod scheme;
pub mod signal;
pub mod store;

pub use controller::{ThemeController, THEME_ATTRIBUTE};
pub use scheme::ColorScheme;
pub use signal::{SchemeSignal, StaticSignal};
pub use store::{FilePreferences, MemoryPreferences, PreferenceStore, StoreError, THEME_KEY};
