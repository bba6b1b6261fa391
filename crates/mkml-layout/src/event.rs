use mkml_core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Host-independent pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { button: MouseButton, pos: Point },
    PointerReleased { button: MouseButton, pos: Point },
    PointerMoved { pos: Point },
    /// Vertical wheel delta in lines; positive scrolls content up (towards
    /// the start).
    Wheel { delta: f32 },
}

impl InputEvent {
    pub fn position(&self) -> Option<Point> {
        match *self {
            InputEvent::PointerPressed { pos, .. }
            | InputEvent::PointerReleased { pos, .. }
            | InputEvent::PointerMoved { pos } => Some(pos),
            InputEvent::Wheel { .. } => None,
        }
    }

    pub fn is_left_press(&self) -> bool {
        matches!(self, InputEvent::PointerPressed { button: MouseButton::Left, .. })
    }

    pub fn is_left_release(&self) -> bool {
        matches!(self, InputEvent::PointerReleased { button: MouseButton::Left, .. })
    }
}

/// Last known pointer position, used for hover and hit tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub pos: Point,
    pub left_down: bool,
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self { pos: Point::new(x, y), left_down: false }
    }

    /// Track position and left button state from an incoming event.
    pub fn update(&mut self, event: &InputEvent) {
        if let Some(pos) = event.position() {
            self.pos = pos;
        }
        if event.is_left_press() {
            self.left_down = true;
        } else if event.is_left_release() {
            self.left_down = false;
        }
    }
}
