//! Owner of a complete element tree and the resources it is laid out with.
//!
//! A frame is: route each pending input event through the tree, lay the tree
//! out, paint it into a [`DisplayList`]. Nothing blocks and nothing outlives
//! the frame except element state.

use mkml_core::{DisplayList, Viewport};
use mkml_style::{StyleDiagnostic, StyleError, StyleSheet};
use mkml_text::TextMeasurer;

use crate::context::{ScrollSettings, StyleContext};
use crate::elements::{Div, Element};
use crate::event::{InputEvent, PointerState};

/// Lifecycle hooks for code attached to a document.
pub trait Script {
    /// Called once when the script is attached, with the root container.
    fn on_load(&mut self, root: &mut Div) {
        let _ = root;
    }

    /// Called once when the document is dropped.
    fn on_unload(&mut self) {}
}

pub struct Document {
    styles: StyleSheet,
    measurer: Box<dyn TextMeasurer>,
    viewport: Viewport,
    scroll: ScrollSettings,
    root: Div,
    pointer: PointerState,
    scripts: Vec<Box<dyn Script>>,
}

impl Document {
    pub fn new(
        styles: StyleSheet,
        measurer: Box<dyn TextMeasurer>,
        viewport: Viewport,
        scroll: ScrollSettings,
    ) -> Self {
        let root = {
            let cx = StyleContext::new(&styles, measurer.as_ref(), viewport).with_scroll(scroll);
            Div::root(&cx)
        };
        Self {
            styles,
            measurer,
            viewport,
            scroll,
            root,
            pointer: PointerState::default(),
            scripts: Vec::new(),
        }
    }

    pub fn context(&self) -> StyleContext<'_> {
        StyleContext::new(&self.styles, self.measurer.as_ref(), self.viewport).with_scroll(self.scroll)
    }

    /// Run `f` with mutable access to the root and a context for
    /// constructing elements that need one (grids, nested containers).
    pub fn build<R>(&mut self, f: impl FnOnce(&mut Div, &StyleContext<'_>) -> R) -> R {
        let cx = StyleContext::new(&self.styles, self.measurer.as_ref(), self.viewport).with_scroll(self.scroll);
        f(&mut self.root, &cx)
    }

    pub fn root(&self) -> &Div {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Div {
        &mut self.root
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.get_element_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.get_element_by_id_mut(id)
    }

    /// Attach a script, running its load hook against the root.
    pub fn attach_script(&mut self, mut script: Box<dyn Script>) {
        script.on_load(&mut self.root);
        self.scripts.push(script);
    }

    /// Replace the stylesheet wholesale from new style text. On a strict
    /// failure the previous sheet stays in place.
    pub fn reload_styles(&mut self, text: &str, strict: bool) -> Result<Vec<StyleDiagnostic>, StyleError> {
        let (sheet, diagnostics) = StyleSheet::parse_with(text, strict)?;
        tracing::info!(rules = sheet.len(), warnings = diagnostics.len(), "stylesheet reloaded");
        self.styles = sheet;
        Ok(diagnostics)
    }

    /// Track a new window size. The root keeps its origin and refills the
    /// window; paragraphs re-wrap on the next layout.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let x = self.root.x;
        let y = self.root.y;
        self.root.set_max_width(viewport.width as f32 - 2.0 * x);
        self.root.set_visible_height(Some(viewport.height as f32 - 2.0 * y));
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.pointer.update(event);
        let pointer = self.pointer;
        self.root.handle_event(event, &pointer);
    }

    pub fn layout(&mut self) {
        let cx = StyleContext::new(&self.styles, self.measurer.as_ref(), self.viewport).with_scroll(self.scroll);
        self.root.layout(&cx);
    }

    pub fn paint(&self) -> DisplayList {
        let cx = self.context();
        let mut out = DisplayList::new(self.viewport);
        self.root.paint(&cx, &self.pointer, &mut out);
        out
    }

    /// One frame. Geometry is brought up to date before dispatch so hit
    /// tests see the tree as it was last presented.
    pub fn frame(&mut self, events: impl IntoIterator<Item = InputEvent>) -> DisplayList {
        self.layout();
        for event in events {
            self.handle_event(&event);
        }
        self.layout();
        self.paint()
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        for script in &mut self.scripts {
            script.on_unload();
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("viewport", &self.viewport)
            .field("rules", &self.styles.len())
            .field("root", &self.root)
            .field("scripts", &self.scripts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkml_text::MonospaceMeasurer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn document(width: u32, height: u32) -> Document {
        Document::new(
            StyleSheet::empty(),
            Box::new(MonospaceMeasurer::new(0.5, 1.0)),
            Viewport { width, height },
            ScrollSettings::default(),
        )
    }

    struct Recorder {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Script for Recorder {
        fn on_load(&mut self, root: &mut Div) {
            root.add_paragraph("from script", 16, "greeting", "");
            self.log.borrow_mut().push("load");
        }

        fn on_unload(&mut self) {
            self.log.borrow_mut().push("unload");
        }
    }

    struct Silent;

    impl Script for Silent {}

    #[test]
    fn script_hooks_run_on_attach_and_drop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut doc = document(800, 600);
            doc.attach_script(Box::new(Recorder { log: log.clone() }));
            doc.attach_script(Box::new(Silent));
            assert!(doc.get_element_by_id("greeting").is_some());
            assert_eq!(*log.borrow(), ["load"]);
        }
        assert_eq!(*log.borrow(), ["load", "unload"]);
    }

    #[test]
    fn strict_reload_failure_keeps_previous_sheet() {
        let mut doc = document(800, 600);
        doc.reload_styles("p { font-size: 20 }", true).unwrap();
        assert_eq!(doc.styles().len(), 1);
        assert!(doc.reload_styles("p { font-size: big }", true).is_err());
        assert_eq!(doc.styles().resolve("", "", "p", false).font_size, 20);
    }

    #[test]
    fn lenient_reload_reports_and_replaces() {
        let mut doc = document(800, 600);
        let diagnostics = doc.reload_styles("p { font-size: big } button { padding: 3 }", false).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(doc.styles().resolve("", "", "button", false).padding, 3.0);
    }

    #[test]
    fn resize_refills_window() {
        let mut doc = document(800, 600);
        doc.resize(Viewport { width: 400, height: 300 });
        assert_eq!(doc.root().max_width(), 396.0);
        assert_eq!(doc.root().visible_height(), Some(296.0));
        assert_eq!(doc.viewport(), Viewport { width: 400, height: 300 });
    }

    #[test]
    fn frame_tracks_pointer() {
        let mut doc = document(800, 600);
        let pos = mkml_core::Point::new(30.0, 40.0);
        doc.frame([InputEvent::PointerMoved { pos }]);
        assert_eq!(doc.pointer().pos, pos);
    }
}
