//! Vitrine Core Runtime
//!
//! Foundational primitives for the Vitrine page-behavior engine:
//!
//! - **Document model**: an element tree with classes, attributes, inline
//!   styles, and boxes, standing in for the hosting page
//! - **Event bus**: one cancelable-subscription surface over every hosting
//!   notification mechanism
//! - **State machines**: flat automata for one-way visual states
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::dom::Document;
//! use vitrine_core::events::{EventBus, EventKind, PageEvent};
//! use vitrine_core::geometry::Size;
//!
//! let mut doc = Document::new(Size::new(1280.0, 720.0));
//! let card = doc.create_element("div");
//! doc.append_child(doc.root(), card);
//!
//! let mut bus = EventBus::new();
//! let sub = bus.subscribe(EventKind::Activate, Some(card), |event, _| {
//!     println!("activated: {:?}", event);
//! });
//!
//! bus.dispatch(&PageEvent::Activate(card));
//! sub.cancel();
//! ```

pub mod color;
pub mod dom;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use dom::{ClassRule, Document, Element, ElementId, InlineStyle, TransitionDecl};
pub use events::{EventBus, EventKind, PageEvent, Subscription};
pub use fsm::{EventId, FsmId, FsmRuntime, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
