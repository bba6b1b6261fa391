//! Element tree payloads and the closed [`Element`] sum type that lets any of
//! them occupy a single child slot.

pub mod button;
pub mod div;
pub mod grid;
pub mod paragraph;

pub use button::Button;
pub use div::Div;
pub use grid::Grid;
pub use paragraph::{HeadingLevel, Paragraph};

use mkml_core::{DisplayList, Point};

use crate::context::StyleContext;
use crate::event::{InputEvent, PointerState};

/// One child slot. Each variant exclusively owns its payload; elements move
/// between containers and are never cloned, since buttons carry per-instance
/// press state and callbacks.
#[derive(Debug)]
pub enum Element {
    Paragraph(Paragraph),
    Button(Button),
    Grid(Grid),
    Div(Div),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Element::Paragraph(p) => &p.id,
            Element::Button(b) => &b.id,
            Element::Grid(g) => &g.id,
            Element::Div(d) => &d.id,
        }
    }

    pub fn class(&self) -> &str {
        match self {
            Element::Paragraph(p) => &p.class,
            Element::Button(b) => &b.class,
            Element::Grid(g) => &g.class,
            Element::Div(d) => &d.class,
        }
    }

    /// Tag name used for the cascade's tag level.
    pub fn tag(&self) -> &'static str {
        match self {
            Element::Paragraph(_) => Paragraph::TAG,
            Element::Button(_) => Button::TAG,
            Element::Grid(_) => Grid::TAG,
            Element::Div(_) => Div::TAG,
        }
    }

    /// Vertical space the element takes in a stacked layout.
    pub fn height(&self) -> f32 {
        match self {
            Element::Paragraph(p) => p.height(),
            Element::Button(b) => b.advance(),
            Element::Grid(g) => g.content_height(),
            Element::Div(d) => d.total_height(),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        match self {
            Element::Paragraph(p) => p.set_position(x, y),
            Element::Button(b) => b.set_position(x, y),
            Element::Grid(g) => g.set_position(x, y),
            Element::Div(d) => d.set_position(x, y),
        }
    }

    /// Position and lay out the element. `width`, when given, is imposed by
    /// the parent: paragraphs wrap to it, buttons are stretched to it.
    pub fn place(&mut self, cx: &StyleContext<'_>, x: f32, y: f32, width: Option<f32>) {
        self.set_position(x, y);
        match self {
            Element::Paragraph(p) => {
                if let Some(w) = width {
                    p.set_width(w);
                }
                p.layout(cx);
            }
            Element::Button(b) => {
                b.layout(cx);
                if let Some(w) = width {
                    b.set_width(w);
                }
            }
            Element::Grid(g) => g.layout(cx),
            Element::Div(d) => {
                if let Some(w) = width {
                    d.set_max_width(w);
                }
                d.layout(cx);
            }
        }
    }

    pub fn paint(&self, cx: &StyleContext<'_>, pointer: &PointerState, out: &mut DisplayList) {
        match self {
            Element::Paragraph(p) => p.paint(cx, pointer, out),
            Element::Button(b) => b.paint(cx, pointer, out),
            Element::Grid(g) => g.paint(cx, pointer, out),
            Element::Div(d) => d.paint(cx, pointer, out),
        }
    }

    /// Route input to the element. Paragraphs are inert.
    pub fn handle_event(&mut self, event: &InputEvent, pointer: &PointerState) {
        match self {
            Element::Paragraph(_) => {}
            Element::Button(b) => b.handle_event(event, pointer),
            Element::Grid(g) => g.handle_event(event, pointer),
            Element::Div(d) => d.handle_event(event, pointer),
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Element::Paragraph(e) => e.contains_point(p),
            Element::Button(e) => e.contains_point(p),
            Element::Grid(e) => e.contains_point(p),
            Element::Div(e) => e.contains_point(p),
        }
    }

    /// Depth-first search of this element and anything it contains.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if id.is_empty() {
            return None;
        }
        if self.id() == id {
            return Some(self);
        }
        match self {
            Element::Grid(g) => g.find_by_id(id),
            Element::Div(d) => d.get_element_by_id(id),
            _ => None,
        }
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if id.is_empty() {
            return None;
        }
        if self.id() == id {
            return Some(self);
        }
        match self {
            Element::Grid(g) => g.find_by_id_mut(id),
            Element::Div(d) => d.get_element_by_id_mut(id),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Element::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Element::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Element::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_grid_mut(&mut self) -> Option<&mut Grid> {
        match self {
            Element::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_div(&self) -> Option<&Div> {
        match self {
            Element::Div(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_div_mut(&mut self) -> Option<&mut Div> {
        match self {
            Element::Div(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Paragraph> for Element {
    fn from(p: Paragraph) -> Self {
        Element::Paragraph(p)
    }
}

impl From<Button> for Element {
    fn from(b: Button) -> Self {
        Element::Button(b)
    }
}

impl From<Grid> for Element {
    fn from(g: Grid) -> Self {
        Element::Grid(g)
    }
}

impl From<Div> for Element {
    fn from(d: Div) -> Self {
        Element::Div(d)
    }
}
