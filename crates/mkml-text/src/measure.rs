use unicode_segmentation::UnicodeSegmentation;

/// Extent of a (possibly multiline) string.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    /// Width of the widest line.
    pub width: f32,
    /// Combined height of all lines.
    pub height: f32,
}

/// Measurement capability consumed by layout.
///
/// `text` may contain `\n`; implementations report the widest line and the
/// stacked height of every line. Empty text measures as zero.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, font_size: u32) -> TextBounds;

    /// Width of a single line, ignoring any line structure.
    fn line_width(&self, text: &str, font_size: u32) -> f32 {
        self.measure(text, font_size).width
    }
}

/// Fixed-advance measurer: every grapheme is `advance_ratio × size` wide and
/// every line `line_height_ratio × size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f32,
    pub line_height_ratio: f32,
}

impl MonospaceMeasurer {
    pub fn new(advance_ratio: f32, line_height_ratio: f32) -> Self {
        Self { advance_ratio, line_height_ratio }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6, 1.2)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size: u32) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        let size = font_size as f32;
        let mut widest = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            lines += 1;
            widest = widest.max(line.graphemes(true).count());
        }
        TextBounds {
            width: widest as f32 * self.advance_ratio * size,
            height: lines as f32 * self.line_height_ratio * size,
        }
    }
}
