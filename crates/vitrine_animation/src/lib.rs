//! Vitrine Animation System
//!
//! Easing curves, style transitions, and one-shot timers.
//!
//! # Features
//!
//! - **Easing**: stylesheet-compatible curves including cubic bezier
//! - **Transitions**: delay-aware, fill-forwards style progressions
//! - **Timers**: deterministic one-shot deadlines on a logical clock
//!
//! Everything here is ticked by an external clock; the crate never reads
//! wall time, which keeps behavior reproducible under test.

pub mod easing;
pub mod timers;
pub mod transition;

pub use easing::Easing;
pub use timers::{TimerId, TimerQueue};
pub use transition::{StyleTransition, TransitionValues, ValueTransition};
