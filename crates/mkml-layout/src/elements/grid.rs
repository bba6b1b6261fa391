use mkml_core::{DisplayList, Point, Rect};
use mkml_style::{StyleRecord, resolve_template};

use super::Element;
use crate::context::StyleContext;
use crate::event::{InputEvent, PointerState};

/// Track template and available size a track list was last resolved for.
#[derive(Debug, Clone, PartialEq)]
struct ResolvedFor {
    template: String,
    total_bits: u32,
    gap_bits: u32,
}

impl ResolvedFor {
    fn new(template: &str, total: f32, gap: f32) -> Self {
        Self { template: template.to_string(), total_bits: total.to_bits(), gap_bits: gap.to_bits() }
    }
}

/// A two-dimensional arrangement of elements.
///
/// Cells are sparse and grow on demand. Track sizes come from the style's
/// `grid-template-*` strings when present, otherwise from
/// [`Grid::set_dimensions`] or explicit per-track setters. Only cells inside
/// the resolved track bounds are laid out, painted or receive input.
#[derive(Debug)]
pub struct Grid {
    pub id: String,
    pub class: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    cells: Vec<Vec<Option<Element>>>,
    column_widths: Vec<f32>,
    row_heights: Vec<f32>,
    column_gap: f32,
    row_gap: f32,
    current_row: usize,
    current_col: usize,
    columns_for: Option<ResolvedFor>,
    rows_for: Option<ResolvedFor>,
}

impl Grid {
    pub const TAG: &'static str = "grid";

    pub fn new(
        cx: &StyleContext<'_>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        id: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        let mut grid = Self {
            id: id.into(),
            class: class.into(),
            x,
            y,
            width,
            height,
            cells: Vec::new(),
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            column_gap: 5.0,
            row_gap: 5.0,
            current_row: 0,
            current_col: 0,
            columns_for: None,
            rows_for: None,
        };
        grid.apply_style(cx);
        grid
    }

    /// Resize the track lists, giving new tracks an even share of the
    /// declared size. Existing track sizes are kept.
    pub fn set_dimensions(&mut self, cols: usize, rows: usize) {
        if cols > 0 {
            self.column_widths.resize(cols, self.width / cols as f32);
        } else {
            self.column_widths.clear();
        }
        if rows > 0 {
            self.row_heights.resize(rows, self.height / rows as f32);
        } else {
            self.row_heights.clear();
        }
    }

    /// Out-of-range indices are ignored.
    pub fn set_column_width(&mut self, col: usize, width: f32) {
        if let Some(w) = self.column_widths.get_mut(col) {
            *w = width;
        }
    }

    pub fn set_row_height(&mut self, row: usize, height: f32) {
        if let Some(h) = self.row_heights.get_mut(row) {
            *h = height;
        }
    }

    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[f32] {
        &self.row_heights
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Place an element at an explicit cell, replacing any occupant.
    pub fn add_element(&mut self, col: usize, row: usize, element: impl Into<Element>) {
        if row >= self.cells.len() {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if col >= cells.len() {
            cells.resize_with(col + 1, || None);
        }
        cells[col] = Some(element.into());
    }

    /// Place an element at the auto-placement cursor, which advances across
    /// the declared columns and wraps to the next row. An axis with no tracks
    /// yet gets a single track spanning the declared size; the other axis is
    /// left as resolved.
    pub fn add_child(&mut self, element: impl Into<Element>) {
        if self.column_widths.is_empty() {
            self.column_widths.push(self.width);
        }
        if self.row_heights.is_empty() {
            self.row_heights.push(self.height);
        }
        let (row, col) = (self.current_row, self.current_col);
        self.add_element(col, row, element);
        self.current_col += 1;
        if self.current_col >= self.column_widths.len() {
            self.current_col = 0;
            self.current_row += 1;
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Element> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Element> {
        self.cells.get_mut(row)?.get_mut(col)?.as_mut()
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Element> {
        self.cells.iter().flatten().flatten()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.cells.iter_mut().flatten().flatten()
    }

    /// Occupied cells inside the resolved track bounds.
    fn visible_cells_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        let (cols, rows) = (self.column_widths.len(), self.row_heights.len());
        self.cells
            .iter_mut()
            .take(rows)
            .flat_map(move |row| row.iter_mut().take(cols))
            .flatten()
    }

    fn visible_cells(&self) -> impl Iterator<Item = &Element> {
        let (cols, rows) = (self.column_widths.len(), self.row_heights.len());
        self.cells
            .iter()
            .take(rows)
            .flat_map(move |row| row.iter().take(cols))
            .flatten()
    }

    /// Resolve track templates and gaps from the plain style. Templates are
    /// only re-resolved when their text or the available size changes, so a
    /// bad token is reported once rather than every frame.
    pub fn apply_style(&mut self, cx: &StyleContext<'_>) {
        let style: &StyleRecord = cx.resolve(&self.id, &self.class, Self::TAG, false);
        self.column_gap = style.column_gap;
        self.row_gap = style.row_gap;

        if style.grid_template_columns.trim().is_empty() {
            if self.columns_for.take().is_some() {
                self.column_widths.clear();
            }
        } else {
            let key = ResolvedFor::new(&style.grid_template_columns, self.width, self.column_gap);
            if self.columns_for.as_ref() != Some(&key) {
                let (sizes, _) = resolve_template(&style.grid_template_columns, self.width, self.column_gap);
                self.column_widths = sizes;
                self.columns_for = Some(key);
            }
        }
        if style.grid_template_rows.trim().is_empty() {
            if self.rows_for.take().is_some() {
                self.row_heights.clear();
            }
        } else {
            let key = ResolvedFor::new(&style.grid_template_rows, self.height, self.row_gap);
            if self.rows_for.as_ref() != Some(&key) {
                let (sizes, _) = resolve_template(&style.grid_template_rows, self.height, self.row_gap);
                self.row_heights = sizes;
                self.rows_for = Some(key);
            }
        }
    }

    /// Total height of the resolved rows and the gaps between them.
    pub fn content_height(&self) -> f32 {
        if self.row_heights.is_empty() {
            return 0.0;
        }
        (self.row_heights.iter().sum::<f32>() + self.row_gap * (self.row_heights.len() - 1) as f32).max(0.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    pub fn layout(&mut self, cx: &StyleContext<'_>) {
        self.apply_style(cx);
        let inset = self.column_gap * 2.0;
        let mut cy = self.y;
        for (row, cells) in self.cells.iter_mut().enumerate() {
            let Some(&row_height) = self.row_heights.get(row) else {
                break;
            };
            let mut cx_pos = self.x;
            for (col, slot) in cells.iter_mut().enumerate() {
                let Some(&col_width) = self.column_widths.get(col) else {
                    break;
                };
                if let Some(element) = slot {
                    element.place(cx, cx_pos, cy, Some((col_width - inset).max(0.0)));
                }
                cx_pos += col_width + self.column_gap;
            }
            cy += row_height + self.row_gap;
        }
    }

    pub fn paint(&self, cx: &StyleContext<'_>, pointer: &PointerState, out: &mut DisplayList) {
        let hover = self.contains_point(pointer.pos);
        let style = cx.resolve(&self.id, &self.class, Self::TAG, hover);
        out.fill_rect(self.bounds(), style.background_color, 0.0);
        for element in self.visible_cells() {
            element.paint(cx, pointer, out);
        }
    }

    /// Forward input to every laid-out cell.
    pub fn handle_event(&mut self, event: &InputEvent, pointer: &PointerState) {
        for element in self.visible_cells_mut() {
            element.handle_event(event, pointer);
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.cells().find_map(|e| e.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.cells_mut().find_map(|e| e.find_by_id_mut(id))
    }
}
