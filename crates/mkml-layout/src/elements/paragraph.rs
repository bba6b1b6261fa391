use mkml_core::{DisplayList, Point, Rect};
use mkml_style::DEFAULT_FONT_SIZE;
use mkml_text::wrap_text;

use crate::context::StyleContext;
use crate::event::PointerState;

/// Fixed padding added below the measured text block.
pub const PARAGRAPH_PADDING: f32 = 10.0;

/// Markup level of a text block, which picks its default font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    #[default]
    Body,
}

impl HeadingLevel {
    pub fn font_size(self) -> u32 {
        match self {
            HeadingLevel::H1 => 32,
            HeadingLevel::H2 => 24,
            HeadingLevel::H3 => 19,
            HeadingLevel::H4 => 16,
            HeadingLevel::H5 => 13,
            HeadingLevel::H6 => 11,
            HeadingLevel::Body => 16,
        }
    }

    /// Map a markup tag (`h1`..`h6`, `p`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag.to_ascii_lowercase().as_str() {
            "h1" => HeadingLevel::H1,
            "h2" => HeadingLevel::H2,
            "h3" => HeadingLevel::H3,
            "h4" => HeadingLevel::H4,
            "h5" => HeadingLevel::H5,
            "h6" => HeadingLevel::H6,
            "p" => HeadingLevel::Body,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct WrapKey {
    width_bits: u32,
    font_size: u32,
}

/// A block of wrapped text.
#[derive(Debug, Clone)]
pub struct Paragraph {
    text: String,
    wrapped: String,
    wrapped_for: Option<WrapKey>,
    pub id: String,
    pub class: String,
    font_size_hint: u32,
    font_size: u32,
    pub x: f32,
    pub y: f32,
    width: f32,
    height: f32,
}

impl Paragraph {
    pub const TAG: &'static str = "p";

    pub fn new(
        text: impl Into<String>,
        font_size_hint: u32,
        width: f32,
        id: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            wrapped: String::new(),
            wrapped_for: None,
            id: id.into(),
            class: class.into(),
            font_size_hint,
            font_size: font_size_hint,
            x: 0.0,
            y: 0.0,
            width,
            height: PARAGRAPH_PADDING,
        }
    }

    pub fn heading(level: HeadingLevel, text: impl Into<String>, width: f32) -> Self {
        Self::new(text, level.font_size(), width, "", "")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text as laid out, with line breaks inserted by wrapping.
    pub fn wrapped_text(&self) -> &str {
        &self.wrapped
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.wrapped_for = None;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        if width != self.width {
            self.width = width;
            self.wrapped_for = None;
        }
    }

    /// Derived height: measured wrapped text plus fixed padding.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Font size in effect after the last layout.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// The size hint wins unless the sheet sets a non-default font size.
    fn effective_font_size(&self, cx: &StyleContext<'_>) -> u32 {
        let style = cx.resolve(&self.id, &self.class, Self::TAG, false);
        if style.font_size == DEFAULT_FONT_SIZE { self.font_size_hint } else { style.font_size }
    }

    /// Re-wrap if text, width or font size changed, then recompute height.
    pub fn layout(&mut self, cx: &StyleContext<'_>) {
        self.font_size = self.effective_font_size(cx);
        let key = WrapKey { width_bits: self.width.to_bits(), font_size: self.font_size };
        if self.wrapped_for.as_ref() != Some(&key) {
            self.wrapped = wrap_text(&self.text, cx.measurer, self.font_size, self.width);
            self.wrapped_for = Some(key);
        }
        let bounds = cx.measurer.measure(&self.wrapped, self.font_size);
        self.height = bounds.height + PARAGRAPH_PADDING;
    }

    pub fn paint(&self, cx: &StyleContext<'_>, pointer: &PointerState, out: &mut DisplayList) {
        let hover = self.contains_point(pointer.pos);
        let style = cx.resolve(&self.id, &self.class, Self::TAG, hover);
        out.fill_rect(self.bounds(), style.background_color, 0.0);
        if !self.wrapped.is_empty() {
            out.text(self.wrapped.clone(), Point::new(self.x, self.y), self.font_size, style.text_color);
        }
    }
}
