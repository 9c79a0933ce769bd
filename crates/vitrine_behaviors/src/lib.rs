//! Vitrine Page Behaviors
//!
//! The behaviors of a static marketing page, wired against the
//! `vitrine_core` document model:
//!
//! - **Theme**: light/dark persistence with system-preference fallback
//! - **Navigation toggle**: responsive menu open/close
//! - **Smooth scrolling**: animated fragment navigation compensating for
//!   the fixed navbar
//! - **Navbar styling**: background recomputed from theme and scroll
//! - **Entrance animations**: staggered one-shot reveals on viewport entry
//! - **Code reveal**: a deferred decorative fade
//!
//! [`Site::mount`] wires everything once; the [`Runtime`] then pumps
//! events with run-to-completion semantics.
//!
//! # Example
//!
//! ```rust
//! use vitrine_behaviors::{Runtime, Site};
//! use vitrine_core::dom::Document;
//! use vitrine_core::geometry::Size;
//! use vitrine_theme::{ColorScheme, MemoryPreferences, StaticSignal};
//!
//! let doc = Document::new(Size::new(1280.0, 720.0));
//! let mut runtime = Runtime::new(doc);
//! let site = Site::mount(
//!     &mut runtime,
//!     Box::new(MemoryPreferences::new()),
//!     Box::new(StaticSignal(ColorScheme::Dark)),
//! );
//!
//! runtime.scroll_to(120.0);
//! assert!(site.active_subscriptions() > 0);
//! ```

pub mod code_reveal;
pub mod entrance;
pub mod nav;
pub mod navbar;
pub mod runtime;
pub mod scroll;
pub mod site;

pub use navbar::navbar_background;
pub use runtime::{ElementTransition, IntersectionWatch, Runtime};
pub use site::Site;
