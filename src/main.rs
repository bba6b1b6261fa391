//! Headless frame runner: loads configuration and styles, builds a sample
//! document and drives a few frames of synthetic input through it, logging
//! what each frame would draw.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use mkml_config::MkmlConfig;
use mkml_core::{Command, DisplayList, Point, Viewport};
use mkml_layout::{
    Button, Div, Document, Grid, HeadingLevel, InputEvent, MouseButton, ScrollSettings, Script,
};
use mkml_style::StyleSheet;
use mkml_text::{FontMeasurer, MonospaceMeasurer, TextMeasurer};
use tracing_subscriber::EnvFilter;

const DEFAULT_STYLES: &str = r#"
/* built-in sheet used when no stylesheet is configured */
p { color: black; background-color: white }
button { background-color: gray; color: white; border-radius: 4; padding: 6 }
button:hover { background-color: blue; color: white; border-radius: 4; padding: 6 }
#counter { color: blue }
.toolbar { grid-template-columns: 1fr 1fr 120px; grid-template-rows: 40px; gap: 6 }
"#;

/// Keeps a click count and mirrors it into the `#counter` paragraph.
struct CounterScript {
    clicks: Rc<Cell<u32>>,
}

impl Script for CounterScript {
    fn on_load(&mut self, root: &mut Div) {
        let clicks = self.clicks.clone();
        if let Some(button) = root.get_element_by_id_mut("increment").and_then(|e| e.as_button_mut()) {
            button.set_on_click(move || clicks.set(clicks.get() + 1));
        }
        tracing::info!("counter script loaded");
    }

    fn on_unload(&mut self) {
        tracing::info!(clicks = self.clicks.get(), "counter script unloaded");
    }
}

fn measurer(config: &MkmlConfig) -> Result<Box<dyn TextMeasurer>> {
    match &config.text.font {
        Some(path) => {
            let font = FontMeasurer::from_path(path)
                .with_context(|| format!("loading font {}", path.display()))?;
            Ok(Box::new(font))
        }
        None => Ok(Box::new(MonospaceMeasurer::new(
            config.text.advance_ratio,
            config.text.line_height_ratio,
        ))),
    }
}

fn stylesheet(config: &MkmlConfig) -> Result<StyleSheet> {
    let (sheet, diagnostics) = match &config.style.stylesheet {
        Some(path) => StyleSheet::load(path, config.style.strict)
            .with_context(|| format!("loading stylesheet {}", path.display()))?,
        None => StyleSheet::parse_with(DEFAULT_STYLES, config.style.strict)
            .context("parsing built-in stylesheet")?,
    };
    tracing::info!(rules = sheet.len(), diagnostics = diagnostics.len(), "stylesheet ready");
    Ok(sheet)
}

fn build_sample(doc: &mut Document) {
    doc.build(|root, cx| {
        root.add_heading(HeadingLevel::H1, "MKML", "", "");
        root.add_paragraph(
            "Immediate-mode layout of paragraphs, buttons and grids, driven headlessly.",
            HeadingLevel::Body.font_size(),
            "intro",
            "",
        );
        root.add_paragraph("Clicks: 0", 16, "counter", "");
        root.add_button("Increment", "increment", "");

        let mut toolbar = Grid::new(cx, 0.0, 0.0, cx.viewport_width() - 20.0, 40.0, "", "toolbar");
        toolbar.add_child(Button::new("Open", "open", ""));
        toolbar.add_child(Button::new("Save", "save", ""));
        toolbar.add_child(Button::new("Quit", "quit", ""));
        root.add_grid(toolbar);

        let mut notes = Div::new(cx, 0.0, 0.0, "notes", "");
        for i in 1..=30 {
            notes.add_paragraph(format!("Note {i}"), 13, "", "");
        }
        root.add_child(notes);
    });
}

fn click(pos: Point) -> Vec<InputEvent> {
    vec![
        InputEvent::PointerMoved { pos },
        InputEvent::PointerPressed { button: MouseButton::Left, pos },
        InputEvent::PointerReleased { button: MouseButton::Left, pos },
    ]
}

fn summarize(frame: usize, list: &DisplayList) {
    let mut fills = 0;
    let mut strokes = 0;
    let mut clips = 0;
    for command in &list.commands {
        match command {
            Command::FillRect { .. } => fills += 1,
            Command::StrokeRect { .. } => strokes += 1,
            Command::PushClip(_) => clips += 1,
            Command::Text { .. } | Command::PopClip => {}
        }
    }
    tracing::info!(frame, commands = list.len(), fills, strokes, texts = list.texts().count(), clips, "frame painted");
    for (text, pos, size, color) in list.texts() {
        tracing::debug!(frame, x = pos.x, y = pos.y, size, color = %color.to_hex(), "{}", text.replace('\n', " / "));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MkmlConfig::load();
    tracing::info!(title = %config.window.title, width = config.window.width, height = config.window.height, "starting");

    let viewport = Viewport { width: config.window.width, height: config.window.height };
    let scroll = ScrollSettings {
        speed: config.scroll.speed,
        damping: config.scroll.damping,
        scrollbar_width: config.scroll.scrollbar_width,
    };
    let mut doc = Document::new(stylesheet(&config)?, measurer(&config)?, viewport, scroll);
    build_sample(&mut doc);

    let clicks = Rc::new(Cell::new(0));
    doc.attach_script(Box::new(CounterScript { clicks: clicks.clone() }));

    summarize(0, &doc.frame([]));

    let mut frames: Vec<Vec<InputEvent>> = Vec::new();
    if let Some(button) = doc.get_element_by_id("increment").and_then(|e| e.as_button()) {
        let b = button.bounds();
        let target = Point::new(b.x + b.w / 2.0, b.y + b.h / 2.0);
        frames.push(click(target));
        frames.push(click(target));
    }
    frames.push(vec![InputEvent::Wheel { delta: -4.0 }]);
    frames.push(vec![InputEvent::Wheel { delta: 1.0 }]);

    let count = frames.len();
    for (i, events) in frames.into_iter().enumerate() {
        let list = doc.frame(events);
        let text = format!("Clicks: {}", clicks.get());
        if let Some(p) = doc.get_element_by_id_mut("counter").and_then(|e| e.as_paragraph_mut()) {
            if p.text() != text {
                p.set_text(text);
            }
        }
        tracing::info!(frame = i + 1, offset = doc.root().scroll_offset(), max = doc.root().max_scroll_offset(), "scroll");
        summarize(i + 1, &list);
    }

    // Counter text set after the last frame shows up here.
    summarize(count + 1, &doc.frame([]));
    Ok(())
}
