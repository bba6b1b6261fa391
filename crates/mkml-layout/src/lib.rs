//! mkml-layout: the element tree, its geometry, scrolling and input dispatch.
//!
//! Layout is immediate mode. Each frame the tree is walked top-down to assign
//! positions, painted into a [`mkml_core::DisplayList`], and input events are
//! routed to every button in declaration order.

pub mod context;
pub mod document;
pub mod elements;
pub mod event;
pub mod scroll;

pub use context::{ScrollSettings, StyleContext};
pub use document::{Document, Script};
pub use elements::{Button, Div, Element, Grid, HeadingLevel, Paragraph};
pub use event::{InputEvent, MouseButton, PointerState};
pub use scroll::{ScrollController, ScrollState};
