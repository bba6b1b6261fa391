use std::fmt;

use mkml_core::{DisplayList, Point, Rect};
use mkml_style::diagnostics_enabled;

use crate::context::StyleContext;
use crate::event::{InputEvent, PointerState};

/// Vertical space a button occupies below itself in a stacked layout.
pub const BUTTON_MARGIN: f32 = 10.0;

/// Fraction of the viewport width a button may grow to.
pub const MAX_WIDTH_RATIO: f32 = 0.8;

pub type ClickHandler = Box<dyn FnMut()>;

/// A clickable label.
///
/// Press state machine: a left press while hovered arms the button; a left
/// release fires the click handler only if armed and still hovered. Every
/// left release disarms, hovered or not.
pub struct Button {
    label: String,
    pub id: String,
    pub class: String,
    pub x: f32,
    pub y: f32,
    width: f32,
    height: f32,
    pressed: bool,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub const TAG: &'static str = "button";

    pub fn new(label: impl Into<String>, id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
            class: class.into(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            pressed: false,
            on_click: None,
        }
    }

    pub fn with_on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.set_on_click(f);
        self
    }

    pub fn set_on_click(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label; width follows on the next layout.
    pub fn set_text(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Override the auto-sized width, e.g. to fill a grid column.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Space taken in a vertical stack: the button plus its margin.
    pub fn advance(&self) -> f32 {
        self.height + BUTTON_MARGIN
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

    /// Auto-size from the measured label and the plain style's padding.
    pub fn layout(&mut self, cx: &StyleContext<'_>) {
        let style = cx.resolve(&self.id, &self.class, Self::TAG, false);
        let text_width = cx.measurer.line_width(&self.label, style.font_size);
        let max_width = cx.viewport_width() * MAX_WIDTH_RATIO;
        self.width = (text_width + style.padding * 2.0).min(max_width);
        self.height = style.font_size as f32 + style.padding * 2.0;
    }

    pub fn handle_event(&mut self, event: &InputEvent, pointer: &PointerState) {
        let hovered = self.contains_point(pointer.pos);
        if event.is_left_press() && hovered {
            self.pressed = true;
        }
        if event.is_left_release() {
            if self.pressed && hovered {
                if diagnostics_enabled("input") {
                    tracing::debug!(id = %self.id, label = %self.label, "button clicked");
                }
                if let Some(cb) = self.on_click.as_mut() {
                    cb();
                }
            }
            self.pressed = false;
        }
    }

    pub fn paint(&self, cx: &StyleContext<'_>, pointer: &PointerState, out: &mut DisplayList) {
        let hover = self.contains_point(pointer.pos);
        let style = cx.resolve(&self.id, &self.class, Self::TAG, hover);
        let rect = self.bounds();
        out.fill_rect(rect, style.background_color, style.border_radius);
        out.stroke_rect(rect, style.border_color, style.border_thickness, style.border_radius);

        let text = cx.measurer.measure(&self.label, style.font_size);
        let pos = Point::new(
            self.x + (self.width - text.width) / 2.0,
            self.y + (self.height - text.height) / 2.0,
        );
        out.text(self.label.clone(), pos, style.font_size, style.text_color);
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("id", &self.id)
            .field("class", &self.class)
            .field("bounds", &self.bounds())
            .field("pressed", &self.pressed)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use mkml_core::{Color, Command, Viewport};
    use mkml_style::StyleSheet;
    use mkml_text::MonospaceMeasurer;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerPressed { button: MouseButton::Left, pos: Point::new(x, y) }
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerReleased { button: MouseButton::Left, pos: Point::new(x, y) }
    }

    fn counting_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let mut b = Button::new("ok", "", "").with_on_click(move || c.set(c.get() + 1));
        b.set_position(0.0, 0.0);
        b.set_width(50.0);
        b.height = 20.0;
        (b, clicks)
    }

    fn send(b: &mut Button, e: InputEvent) {
        let mut p = PointerState::default();
        p.update(&e);
        b.handle_event(&e, &p);
    }

    #[test]
    fn press_release_inside_fires_once() {
        let (mut b, clicks) = counting_button();
        send(&mut b, press(10.0, 10.0));
        assert!(b.is_pressed());
        send(&mut b, release(12.0, 10.0));
        assert_eq!(clicks.get(), 1);
        assert!(!b.is_pressed());
        send(&mut b, release(12.0, 10.0));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn release_outside_cancels() {
        let (mut b, clicks) = counting_button();
        send(&mut b, press(10.0, 10.0));
        send(&mut b, InputEvent::PointerMoved { pos: Point::new(200.0, 10.0) });
        send(&mut b, release(200.0, 10.0));
        assert_eq!(clicks.get(), 0);
        assert!(!b.is_pressed());
    }

    #[test]
    fn release_without_press_does_nothing() {
        let (mut b, clicks) = counting_button();
        send(&mut b, release(10.0, 10.0));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn press_outside_does_not_arm() {
        let (mut b, clicks) = counting_button();
        send(&mut b, press(300.0, 300.0));
        send(&mut b, InputEvent::PointerMoved { pos: Point::new(10.0, 10.0) });
        send(&mut b, release(10.0, 10.0));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn right_button_is_ignored() {
        let (mut b, clicks) = counting_button();
        send(&mut b, InputEvent::PointerPressed { button: MouseButton::Right, pos: Point::new(5.0, 5.0) });
        send(&mut b, InputEvent::PointerReleased { button: MouseButton::Right, pos: Point::new(5.0, 5.0) });
        assert!(!b.is_pressed());
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn auto_size_from_label_and_padding() {
        let sheet = StyleSheet::parse("button { padding: 6; font-size: 20 }").unwrap();
        let m = MonospaceMeasurer::new(0.5, 1.0);
        let cx = StyleContext::new(&sheet, &m, Viewport::default());
        let mut b = Button::new("Save", "", "");
        b.layout(&cx);
        assert_eq!(b.width(), 4.0 * 10.0 + 12.0);
        assert_eq!(b.height(), 32.0);
        assert_eq!(b.advance(), 42.0);
    }

    #[test]
    fn width_capped_at_viewport_ratio() {
        let sheet = StyleSheet::empty();
        let m = MonospaceMeasurer::new(1.0, 1.0);
        let cx = StyleContext::new(&sheet, &m, Viewport { width: 100, height: 100 });
        let mut b = Button::new("a very long label indeed", "", "");
        b.layout(&cx);
        assert_eq!(b.width(), 80.0);
    }

    #[test]
    fn paints_centered_label_with_border() {
        let sheet = StyleSheet::parse("#go:hover { background-color: green }").unwrap();
        let m = MonospaceMeasurer::new(0.5, 1.0);
        let cx = StyleContext::new(&sheet, &m, Viewport::default());
        let mut b = Button::new("Go", "go", "");
        b.set_position(100.0, 50.0);
        b.layout(&cx);

        let mut out = DisplayList::new(cx.viewport);
        b.paint(&cx, &PointerState::at(101.0, 51.0), &mut out);
        assert!(matches!(out.commands[0], Command::FillRect { color, .. } if color == Color::GREEN));
        assert!(matches!(out.commands[1], Command::StrokeRect { width, .. } if width == 1.0));
        let (_, pos, _, _) = out.texts().next().unwrap();
        // 18px font: label 18 wide and 18 tall inside a 28 x 28 box.
        assert_eq!(pos, Point::new(105.0, 55.0));
    }
}
