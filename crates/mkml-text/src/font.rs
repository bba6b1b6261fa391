use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};
use thiserror::Error;

use crate::measure::{TextBounds, TextMeasurer};

/// Errors that can occur while loading a font.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid font data: {0}")]
    InvalidFont(String),
}

/// Measurer backed by a real font: per-glyph advances with pair kerning for
/// width, the font's line metrics for height.
pub struct FontMeasurer {
    font: Font,
}

impl FontMeasurer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| TextError::InvalidFont(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let measurer = Self::from_bytes(&bytes)?;
        tracing::info!(path = %path.display(), "loaded font for text measurement");
        Ok(measurer)
    }

    fn line_height(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|lm| lm.new_line_size)
            .unwrap_or(px * 1.2)
    }

    fn advance(&self, line: &str, px: f32) -> f32 {
        let mut width = 0.0;
        let mut prev: Option<char> = None;
        for ch in line.chars() {
            if let Some(p) = prev {
                width += self.font.horizontal_kern(p, ch, px).unwrap_or(0.0);
            }
            width += self.font.metrics(ch, px).advance_width;
            prev = Some(ch);
        }
        width
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&self, text: &str, font_size: u32) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        let px = font_size as f32;
        let mut width = 0.0f32;
        let mut lines = 0usize;
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            lines += 1;
            width = width.max(self.advance(line, px));
        }
        TextBounds { width, height: lines as f32 * self.line_height(px) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_bytes() {
        let err = FontMeasurer::from_bytes(b"definitely not a font").err();
        assert!(matches!(err, Some(TextError::InvalidFont(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FontMeasurer::from_path("/nonexistent/mkml/font.ttf").err();
        assert!(matches!(err, Some(TextError::Io(_))));
    }
}
