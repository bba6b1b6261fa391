use mkml_core::{Color, Command, DisplayList, Point, Rect};
use mkml_style::diagnostics_enabled;

use super::{Button, Element, Grid, HeadingLevel, Paragraph};
use crate::context::StyleContext;
use crate::event::{InputEvent, MouseButton, PointerState};
use crate::scroll::ScrollController;

/// Horizontal offset of nested containers relative to their parent.
pub const CHILD_INDENT: f32 = 10.0;

/// Origin of the root container inside the window.
pub const ROOT_ORIGIN: f32 = 2.0;

const SCROLL_TRACK: Color = Color::rgba(0, 0, 0, 30);
const SCROLL_THUMB: Color = Color::rgba(0, 0, 0, 110);
const SCROLL_THUMB_ACTIVE: Color = Color::rgba(0, 0, 0, 170);

/// Vertical stacking container.
///
/// Elements are stacked first, in insertion order, followed by child
/// containers indented by [`CHILD_INDENT`]. A container with a visible height
/// scrolls its content; the total height it reports never depends on the
/// current scroll offset.
#[derive(Debug)]
pub struct Div {
    pub id: String,
    pub class: String,
    pub x: f32,
    pub y: f32,
    max_width: f32,
    elements: Vec<Element>,
    children: Vec<Div>,
    visible_height: Option<f32>,
    scroll: ScrollController,
}

impl Div {
    pub const TAG: &'static str = "div";

    /// `max_width` is fixed from the viewport and `x` at construction.
    pub fn new(
        cx: &StyleContext<'_>,
        x: f32,
        y: f32,
        id: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            x,
            y,
            max_width: cx.viewport_width() - 2.0 * x,
            elements: Vec::new(),
            children: Vec::new(),
            visible_height: None,
            scroll: ScrollController::new(cx.scroll),
        }
    }

    /// Window-filling root container; the only one that scrolls by default.
    pub fn root(cx: &StyleContext<'_>) -> Self {
        let mut div = Self::new(cx, ROOT_ORIGIN, ROOT_ORIGIN, "", "");
        div.visible_height = Some(cx.viewport_height() - 2.0 * ROOT_ORIGIN);
        div
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    pub fn set_max_width(&mut self, width: f32) {
        self.max_width = width;
    }

    pub fn visible_height(&self) -> Option<f32> {
        self.visible_height
    }

    /// Give the container a viewport of its own (`Some`) to make it scroll.
    pub fn set_visible_height(&mut self, height: Option<f32>) {
        self.visible_height = height;
        if height.is_none() {
            self.scroll.set_extent(0.0, 0.0);
        }
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.scroll.max_offset()
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn add_paragraph(
        &mut self,
        text: impl Into<String>,
        font_size: u32,
        id: impl Into<String>,
        class: impl Into<String>,
    ) {
        let p = Paragraph::new(text, font_size, self.max_width, id, class);
        self.elements.push(p.into());
    }

    pub fn add_heading(
        &mut self,
        level: HeadingLevel,
        text: impl Into<String>,
        id: impl Into<String>,
        class: impl Into<String>,
    ) {
        self.add_paragraph(text, level.font_size(), id, class);
    }

    pub fn add_button(&mut self, text: impl Into<String>, id: impl Into<String>, class: impl Into<String>) {
        self.elements.push(Button::new(text, id, class).into());
    }

    pub fn add_grid(&mut self, grid: Grid) {
        self.elements.push(grid.into());
    }

    /// Append any element, taking ownership.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Append a nested container, taking ownership of its subtree.
    pub fn add_child(&mut self, child: Div) {
        self.children.push(child);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    pub fn children(&self) -> &[Div] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Div] {
        &mut self.children
    }

    /// Depth-first search: own elements (and what they contain) first, then
    /// child containers, each in declaration order.
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        if id.is_empty() {
            return None;
        }
        self.elements
            .iter()
            .find_map(|e| e.find_by_id(id))
            .or_else(|| self.children.iter().find_map(|c| c.get_element_by_id(id)))
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if id.is_empty() {
            return None;
        }
        if let Some(found) = self.elements.iter_mut().find_map(|e| e.find_by_id_mut(id)) {
            return Some(found);
        }
        self.children.iter_mut().find_map(|c| c.get_element_by_id_mut(id))
    }

    /// Sum of element heights and child container heights.
    pub fn total_height(&self) -> f32 {
        let elements: f32 = self.elements.iter().map(Element::height).sum();
        let children: f32 = self.children.iter().map(Div::total_height).sum();
        elements + children
    }

    /// Area the container occupies on screen: its visible height when it
    /// scrolls, its full content otherwise.
    pub fn bounds(&self) -> Rect {
        let h = self.visible_height.unwrap_or_else(|| self.total_height());
        Rect::new(self.x, self.y, self.max_width, h)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Position every descendant top-down, starting at `y - scroll_offset`.
    pub fn layout(&mut self, cx: &StyleContext<'_>) {
        let origin = self.y - self.scroll.offset();
        let mut cursor = origin;
        for element in &mut self.elements {
            let (x, width) = match element {
                Element::Paragraph(_) => (self.x, Some(self.max_width)),
                Element::Div(_) => (self.x + CHILD_INDENT, None),
                _ => (self.x, None),
            };
            element.place(cx, x, cursor, width);
            cursor += element.height();
        }
        for child in &mut self.children {
            child.set_position(self.x + CHILD_INDENT, cursor);
            child.layout(cx);
            cursor += child.total_height();
        }
        if let Some(visible) = self.visible_height {
            self.scroll.set_extent(cursor - origin, visible);
        }
        if diagnostics_enabled("layout") {
            tracing::trace!(
                id = %self.id,
                total = cursor - origin,
                offset = self.scroll.offset(),
                "div laid out"
            );
        }
    }

    pub fn paint(&self, cx: &StyleContext<'_>, pointer: &PointerState, out: &mut DisplayList) {
        let hover = self.contains_point(pointer.pos);
        let style = cx.resolve(&self.id, &self.class, Self::TAG, hover);
        let clip = self.visible_height.map(|h| Rect::new(self.x, self.y, self.max_width, h));
        if let Some(area) = clip {
            out.push(Command::PushClip(area));
        }

        let content = Rect::new(self.x, self.y - self.scroll.offset(), self.max_width, self.total_height());
        out.fill_rect(content, style.background_color, 0.0);
        for element in &self.elements {
            element.paint(cx, pointer, out);
        }
        for child in &self.children {
            child.paint(cx, pointer, out);
        }

        if let Some(area) = clip {
            out.push(Command::PopClip);
            if let (Some(track), Some(thumb)) = (self.scroll.track_rect(area), self.scroll.thumb_rect(area)) {
                let thumb_color = if self.scroll.is_dragging() { SCROLL_THUMB_ACTIVE } else { SCROLL_THUMB };
                out.fill_rect(track, SCROLL_TRACK, 0.0);
                out.fill_rect(thumb, thumb_color, thumb.w / 2.0);
            }
        }
    }

    /// Route input to the scrollbar, then to every element and child
    /// container in declaration order. Nothing stops propagation.
    pub fn handle_event(&mut self, event: &InputEvent, pointer: &PointerState) {
        if let Some(visible) = self.visible_height {
            self.handle_scroll(event, Rect::new(self.x, self.y, self.max_width, visible));
        }
        for element in &mut self.elements {
            element.handle_event(event, pointer);
        }
        for child in &mut self.children {
            child.handle_event(event, pointer);
        }
    }

    fn handle_scroll(&mut self, event: &InputEvent, area: Rect) {
        match *event {
            InputEvent::Wheel { delta } => self.scroll.wheel(delta),
            InputEvent::PointerPressed { button: MouseButton::Left, pos } => {
                if self.scroll.thumb_rect(area).is_some_and(|thumb| thumb.contains(pos)) {
                    self.scroll.begin_drag(pos.y);
                }
            }
            InputEvent::PointerMoved { pos } => self.scroll.drag_to(pos.y),
            InputEvent::PointerReleased { .. } => self.scroll.end_drag(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkml_core::Viewport;
    use mkml_style::StyleSheet;
    use mkml_text::MonospaceMeasurer;

    fn fixtures() -> (StyleSheet, MonospaceMeasurer) {
        (StyleSheet::empty(), MonospaceMeasurer::new(0.5, 1.0))
    }

    #[test]
    fn max_width_comes_from_viewport_and_x() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport { width: 800, height: 600 });
        assert_eq!(Div::new(&cx, 20.0, 0.0, "", "").max_width(), 760.0);
        let root = Div::root(&cx);
        assert_eq!((root.x, root.y), (2.0, 2.0));
        assert_eq!(root.max_width(), 796.0);
        assert_eq!(root.visible_height(), Some(596.0));
    }

    #[test]
    fn stacks_elements_then_children() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport::default());
        let mut div = Div::new(&cx, 0.0, 0.0, "", "");
        div.add_paragraph("one", 16, "p1", "");
        div.add_button("go", "b1", "");
        let mut child = Div::new(&cx, 0.0, 0.0, "", "");
        child.add_paragraph("two", 16, "p2", "");
        div.add_child(child);
        div.layout(&cx);

        // paragraph: 16 + 10; button: 18 + 10 + 10
        let b = div.get_element_by_id("b1").and_then(Element::as_button).unwrap();
        assert_eq!(b.y, 26.0);
        let c = &div.children()[0];
        assert_eq!((c.x, c.y), (10.0, 26.0 + 38.0));
        assert_eq!(div.total_height(), 26.0 + 38.0 + 26.0);
    }

    #[test]
    fn total_height_ignores_scroll() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport { width: 400, height: 100 });
        let mut root = Div::root(&cx);
        for i in 0..10 {
            root.add_paragraph(format!("line {i}"), 16, "", "");
        }
        root.layout(&cx);
        let before = root.total_height();
        assert_eq!(before, 260.0);
        assert_eq!(root.max_scroll_offset(), 260.0 - 96.0);

        root.handle_event(&InputEvent::Wheel { delta: -2.0 }, &PointerState::default());
        root.layout(&cx);
        assert_eq!(root.scroll_offset(), 60.0);
        assert_eq!(root.total_height(), before);
        let first = root.elements()[0].as_paragraph().unwrap();
        assert_eq!(first.y, 2.0 - 60.0);
    }

    #[test]
    fn unscrollable_div_ignores_wheel() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport::default());
        let mut div = Div::new(&cx, 0.0, 0.0, "", "");
        for _ in 0..100 {
            div.add_paragraph("x", 16, "", "");
        }
        div.layout(&cx);
        div.handle_event(&InputEvent::Wheel { delta: -5.0 }, &PointerState::default());
        assert_eq!(div.scroll_offset(), 0.0);
        assert_eq!(div.max_scroll_offset(), 0.0);
    }

    #[test]
    fn thumb_drag_scrolls_content() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport { width: 400, height: 204 });
        let mut root = Div::root(&cx);
        for _ in 0..20 {
            root.add_paragraph("row", 16, "", "");
        }
        root.layout(&cx);
        // total 520, visible 200: thumb spans 2..~78 on the right edge.
        let grab = Point::new(395.0, 10.0);
        let mut pointer = PointerState::default();
        for event in [
            InputEvent::PointerPressed { button: MouseButton::Left, pos: grab },
            InputEvent::PointerMoved { pos: Point::new(395.0, 60.0) },
        ] {
            pointer.update(&event);
            root.handle_event(&event, &pointer);
        }
        assert!(root.scroll().is_dragging());
        assert_eq!(root.scroll_offset(), 50.0 / 200.0 * 520.0);

        let release = InputEvent::PointerReleased { button: MouseButton::Left, pos: Point::new(0.0, 0.0) };
        root.handle_event(&release, &pointer);
        assert!(!root.scroll().is_dragging());
    }

    #[test]
    fn lookup_descends_into_grids_and_children() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport::default());
        let mut grid = Grid::new(&cx, 0.0, 0.0, 100.0, 100.0, "g", "");
        grid.add_child(Button::new("in grid", "cell", ""));
        let mut child = Div::new(&cx, 0.0, 0.0, "", "");
        child.add_button("deep", "deep", "");
        let mut div = Div::new(&cx, 0.0, 0.0, "", "");
        div.add_grid(grid);
        div.add_child(child);

        assert!(div.get_element_by_id("g").and_then(Element::as_grid).is_some());
        assert!(div.get_element_by_id("cell").and_then(Element::as_button).is_some());
        if let Some(b) = div.get_element_by_id_mut("deep").and_then(Element::as_button_mut) {
            b.set_text("renamed");
        }
        assert_eq!(
            div.get_element_by_id("deep").and_then(Element::as_button).map(Button::label),
            Some("renamed")
        );
        assert!(div.get_element_by_id("missing").is_none());
    }

    #[test]
    fn paints_clip_and_scrollbar_for_overflowing_root() {
        let (sheet, m) = fixtures();
        let cx = StyleContext::new(&sheet, &m, Viewport { width: 300, height: 104 });
        let mut root = Div::root(&cx);
        for _ in 0..10 {
            root.add_paragraph("z", 16, "", "");
        }
        root.layout(&cx);
        let mut out = DisplayList::new(cx.viewport);
        root.paint(&cx, &PointerState::default(), &mut out);
        assert!(matches!(out.commands.first(), Some(Command::PushClip(_))));
        let pop = out.commands.iter().position(|c| *c == Command::PopClip);
        assert_eq!(pop, Some(out.len() - 3));
        assert_eq!(out.texts().count(), 10);
    }
}
