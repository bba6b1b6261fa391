//! mkml-text: text measurement and wrapping for mkml layout.
//!
//! Glyph rendering is left to the host; layout only needs the size a string
//! would occupy, which is what a [`TextMeasurer`] provides.
//! - [`MonospaceMeasurer`]: deterministic fixed-advance metrics
//! - [`FontMeasurer`]: metrics from a TrueType/OpenType font via fontdue
//! - [`wrap_text`]: greedy per-grapheme wrapping against a measurer

pub mod font;
pub mod measure;
pub mod wrap;

pub use font::{FontMeasurer, TextError};
pub use measure::{MonospaceMeasurer, TextBounds, TextMeasurer};
pub use wrap::wrap_text;
