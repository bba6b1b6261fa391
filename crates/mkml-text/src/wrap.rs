use unicode_segmentation::UnicodeSegmentation;

use crate::measure::TextMeasurer;

/// Greedy wrap at grapheme granularity.
///
/// Graphemes are appended to the current line until its measured width
/// exceeds `max_width`; the overflowing grapheme then starts the next line.
/// Words are not kept together. A grapheme wider than `max_width` on its own
/// still occupies one line, so a degenerate width yields one grapheme per line.
/// Existing newlines are hard breaks, which keeps wrapping idempotent.
pub fn wrap_text(text: &str, measurer: &dyn TextMeasurer, font_size: u32, max_width: f32) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut line = String::new();
    for g in text.graphemes(true) {
        if g == "\n" || g == "\r\n" {
            out.push_str(&line);
            out.push_str(g);
            line.clear();
            continue;
        }
        line.push_str(g);
        if line.len() > g.len() && measurer.line_width(&line, font_size) > max_width {
            line.truncate(line.len() - g.len());
            out.push_str(&line);
            out.push('\n');
            line.clear();
            line.push_str(g);
        }
    }
    out.push_str(&line);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasurer;

    // 5px per grapheme at size 10.
    fn mono() -> MonospaceMeasurer {
        MonospaceMeasurer::new(0.5, 1.0)
    }

    #[test]
    fn breaks_mid_word_once_width_is_exceeded() {
        assert_eq!(wrap_text("abcdefghij", &mono(), 10, 20.0), "abcd\nefgh\nij");
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap_text("abcd", &mono(), 10, 20.0), "abcd");
    }

    #[test]
    fn degenerate_width_emits_one_grapheme_per_line() {
        assert_eq!(wrap_text("abc", &mono(), 10, 1.0), "a\nb\nc");
        assert_eq!(wrap_text("x", &mono(), 10, 0.0), "x");
    }

    #[test]
    fn existing_newlines_are_hard_breaks() {
        assert_eq!(wrap_text("ab\nabcdef", &mono(), 10, 20.0), "ab\nabcd\nef");
    }

    #[test]
    fn crlf_breaks_are_kept_verbatim() {
        let wrapped = wrap_text("ab\r\nabcdef", &mono(), 10, 20.0);
        assert_eq!(wrapped, "ab\r\nabcd\nef");
        assert_eq!(wrap_text(&wrapped, &mono(), 10, 20.0), wrapped);
        assert_eq!(mono().measure("ab\r\nabcd", 10).width, 20.0);
    }

    #[test]
    fn graphemes_are_never_split() {
        let text = "e\u{301}e\u{301}e\u{301}";
        let wrapped = wrap_text(text, &mono(), 10, 10.0);
        assert_eq!(wrapped, "e\u{301}e\u{301}\ne\u{301}");
    }

    #[test]
    fn empty_text_wraps_to_empty() {
        assert_eq!(wrap_text("", &mono(), 10, 20.0), "");
    }
}
