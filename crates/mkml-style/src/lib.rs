//! Mini-CSS style engine for mkml documents.
//!
//! Style text is parsed once into a [`StyleSheet`]; elements then resolve their
//! effective [`StyleRecord`] through a fixed cascade (`#id`, `.class`, tag,
//! engine default), consulting `:hover` variants first at every level. Grid
//! track templates are tokenized and resolved here as well.

mod cascade;
mod diagnostics;
mod error;
mod parser;
mod selector;
mod track;
mod types;

pub use cascade::StyleSheet;
pub use diagnostics::{Severity, StyleDiagnostic, diagnostics_enabled};
pub use error::StyleError;
pub use parser::{parse_color, parse_font_size, parse_number};
pub use selector::{Selector, SelectorKind};
pub use track::{TrackSize, parse_track_list, resolve_template, resolve_tracks};
pub use types::{DEFAULT_FONT_SIZE, StyleRecord};
