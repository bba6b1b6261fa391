//! Per-pass context threaded through construction, layout and paint.
//!
//! Replaces ambient global state: everything an element needs to resolve its
//! style or measure text is borrowed from here, so independent trees can be
//! laid out side by side.

use mkml_core::Viewport;
use mkml_style::{StyleRecord, StyleSheet};
use mkml_text::TextMeasurer;

/// Wheel and scrollbar tuning shared by every scrollable container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    /// Offset change per unit of wheel delta.
    pub speed: f32,
    /// Fraction of the distance to a boundary removed when within one
    /// `speed` of it.
    pub damping: f32,
    pub scrollbar_width: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self { speed: 30.0, damping: 0.3, scrollbar_width: 8.0 }
    }
}

#[derive(Clone, Copy)]
pub struct StyleContext<'a> {
    pub styles: &'a StyleSheet,
    pub measurer: &'a dyn TextMeasurer,
    pub viewport: Viewport,
    pub scroll: ScrollSettings,
}

impl<'a> StyleContext<'a> {
    pub fn new(styles: &'a StyleSheet, measurer: &'a dyn TextMeasurer, viewport: Viewport) -> Self {
        Self { styles, measurer, viewport, scroll: ScrollSettings::default() }
    }

    pub fn with_scroll(mut self, scroll: ScrollSettings) -> Self {
        self.scroll = scroll;
        self
    }

    /// Cascade lookup for one element identity.
    pub fn resolve(&self, id: &str, class: &str, tag: &str, hover: bool) -> &'a StyleRecord {
        self.styles.resolve(id, class, tag, hover)
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport.width as f32
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport.height as f32
    }
}

impl std::fmt::Debug for StyleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleContext")
            .field("rules", &self.styles.len())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .finish()
    }
}
