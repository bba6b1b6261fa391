use mkml_core::Color;

use crate::types::StyleRecord;

/// Raw `selectors { body }` block, before selector or value parsing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawRule {
    pub selectors: String,
    pub body: String,
}

/// Marker for a property value that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidValue;

/// Whether a declaration changed the record or was skipped as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Applied {
    Set,
    Unknown,
}

// Minimal CSS block splitter: yields (selectors, body). Text after the last
// closing brace is dropped.
pub(crate) fn split_rules(css: &str) -> Vec<RawRule> {
    let source = strip_css_comments(css);
    let mut out = Vec::new();
    let mut pieces: Vec<&str> = source.split('}').collect();
    // The final piece has no closing brace.
    pieces.pop();
    for raw in pieces {
        if let Some((sel, body)) = raw.split_once('{') {
            let sel = sel.trim();
            if !sel.is_empty() {
                out.push(RawRule {
                    selectors: sel.to_string(),
                    body: body.trim().to_string(),
                });
            }
        }
    }
    out
}

fn strip_css_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_comment = false;
    while let Some(ch) = chars.next() {
        if in_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_comment = false;
            }
        } else if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            in_comment = true;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Split a declaration block into lowercase property names and raw values.
pub(crate) fn parse_declarations(body: &str) -> Vec<(String, String)> {
    body.split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value))
        })
        .collect()
}

/// Parse a length-like number. A trailing `px` or `fr` unit is stripped and
/// anything after the leading numeric run is ignored (`"12em"` is 12). A value
/// with no digits at all is rejected rather than read as zero.
pub fn parse_number(raw: &str) -> Option<f32> {
    let v = raw.trim();
    let v = v
        .strip_suffix("px")
        .or_else(|| v.strip_suffix("fr"))
        .unwrap_or(v)
        .trim_end();
    let end = v
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(v.len());
    let number = &v[..end];
    if !number.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    number.parse::<f32>().ok().filter(|n| n.is_finite())
}

/// Parse `font-size`: a non-negative number, fractional part truncated.
pub fn parse_font_size(raw: &str) -> Option<u32> {
    let n = parse_number(raw)?;
    if n < 0.0 {
        return None;
    }
    Some(n.trunc() as u32)
}

/// Named keywords and `#RRGGBB`; everything else resolves to white.
pub fn parse_color(raw: &str) -> Color {
    let v = raw.trim();
    match v.to_ascii_lowercase().as_str() {
        "red" => return Color::RED,
        "green" => return Color::GREEN,
        "blue" => return Color::BLUE,
        "black" => return Color::BLACK,
        "white" => return Color::WHITE,
        "gray" => return Color::GRAY,
        "yellow" => return Color::YELLOW,
        _ => {}
    }
    if v.len() == 7 && v.starts_with('#') {
        if let Ok(c) = csscolorparser::parse(v) {
            let [r, g, b, _] = c.to_rgba8();
            return Color::rgb(r, g, b);
        }
    }
    Color::WHITE
}

pub(crate) fn apply_property(
    out: &mut StyleRecord,
    name: &str,
    value: &str,
) -> Result<Applied, InvalidValue> {
    let number = || parse_number(value).ok_or(InvalidValue);
    match name {
        "background-color" => out.background_color = parse_color(value),
        "color" => out.text_color = parse_color(value),
        "border-color" => out.border_color = parse_color(value),
        "font-size" => out.font_size = parse_font_size(value).ok_or(InvalidValue)?,
        "padding" => out.padding = number()?,
        "border-radius" => out.border_radius = number()?,
        "border-width" => out.border_thickness = number()?,
        "grid-template-columns" => out.grid_template_columns = value.to_string(),
        "grid-template-rows" => out.grid_template_rows = value.to_string(),
        "grid-column-gap" | "column-gap" => out.column_gap = number()?,
        "grid-row-gap" | "row-gap" => out.row_gap = number()?,
        "grid-gap" | "gap" => {
            let gap = number()?;
            out.column_gap = gap;
            out.row_gap = gap;
        }
        "justify-items" => out.justify_items = value.to_string(),
        "align-items" => out.align_items = value.to_string(),
        _ => return Ok(Applied::Unknown),
    }
    Ok(Applied::Set)
}
