use mkml_core::Color;

/// Font size every record starts with. Elements treat a resolved size equal to
/// this value as "not set by the sheet" when they carry their own size hint.
pub const DEFAULT_FONT_SIZE: u32 = 18;

/// Fully resolved visual style of one element.
///
/// A record is a total override: a rule that sets only `color` still carries
/// engine defaults for every other field. Nothing is inherited from ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub background_color: Color,
    pub text_color: Color,
    pub font_size: u32,
    pub padding: f32,
    pub border_radius: f32,
    pub border_color: Color,
    pub border_thickness: f32,
    /// Raw `grid-template-columns` text; tokenized by the grid at layout time.
    pub grid_template_columns: String,
    /// Raw `grid-template-rows` text.
    pub grid_template_rows: String,
    pub column_gap: f32,
    pub row_gap: f32,
    pub justify_items: String,
    pub align_items: String,
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self {
            background_color: Color::rgba(255, 255, 255, 0),
            text_color: Color::BLACK,
            font_size: DEFAULT_FONT_SIZE,
            padding: 5.0,
            border_radius: 4.0,
            border_color: Color::rgba(0, 0, 0, 100),
            border_thickness: 1.0,
            grid_template_columns: String::new(),
            grid_template_rows: String::new(),
            column_gap: 5.0,
            row_gap: 5.0,
            justify_items: "start".to_string(),
            align_items: "start".to_string(),
        }
    }
}
