use crate::scene::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800, height: 600 }
    }
}

/// One draw call handed to the renderer. The renderer is a pure consumer.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FillRect { rect: Rect, color: Color, radius: f32 },
    StrokeRect { rect: Rect, color: Color, width: f32, radius: f32 },
    /// `pos` is the top-left of the text block; `text` may contain `\n`.
    Text { text: String, pos: Point, size: u32, color: Color },
    PushClip(Rect),
    PopClip,
}

#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub viewport: Viewport,
    pub commands: Vec<Command>,
}

impl DisplayList {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, commands: Vec::new() }
    }

    pub fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.push(Command::FillRect { rect, color, radius });
    }

    /// Zero-width strokes are dropped.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32, radius: f32) {
        if width > 0.0 {
            self.push(Command::StrokeRect { rect, color, width, radius });
        }
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Point, size: u32, color: Color) {
        self.push(Command::Text { text: text.into(), pos, size, color });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the text commands in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, u32, Color)> {
        self.commands.iter().filter_map(|c| match c {
            Command::Text { text, pos, size, color } => Some((text.as_str(), *pos, *size, *color)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_with_zero_width_is_skipped() {
        let mut list = DisplayList::new(Viewport::default());
        list.stroke_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK, 0.0, 0.0);
        assert!(list.is_empty());
        list.stroke_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK, 1.0, 0.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn texts_filters_commands() {
        let mut list = DisplayList::default();
        list.fill_rect(Rect::default(), Color::WHITE, 0.0);
        list.text("hi", Point::new(1.0, 2.0), 16, Color::BLACK);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, "hi");
        assert_eq!(texts[0].2, 16);
    }
}
