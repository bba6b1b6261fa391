use mkml_text::{MonospaceMeasurer, TextMeasurer, wrap_text};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rewrapping_is_stable(
        text in "[a-z ]{0,80}(\n[a-z ]{0,40}){0,3}",
        max_width in 1.0f32..200.0,
        size in 8u32..32,
    ) {
        let m = MonospaceMeasurer::default();
        let once = wrap_text(&text, &m, size, max_width);
        let twice = wrap_text(&once, &m, size, max_width);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn wrapped_lines_fit_or_hold_one_grapheme(
        text in "[a-zA-Z0-9]{1,120}",
        max_width in 0.0f32..300.0,
    ) {
        let m = MonospaceMeasurer::new(0.6, 1.2);
        let wrapped = wrap_text(&text, &m, 16, max_width);
        prop_assert_eq!(wrapped.replace('\n', ""), text);
        for line in wrapped.split('\n') {
            prop_assert!(!line.is_empty());
            prop_assert!(line.chars().count() == 1 || m.line_width(line, 16) <= max_width);
        }
    }
}

#[test]
fn wrapped_height_grows_with_line_count() {
    let m = MonospaceMeasurer::new(0.5, 1.0);
    let wrapped = wrap_text("aaaaaaaaaaaa", &m, 10, 20.0);
    assert_eq!(wrapped.lines().count(), 3);
    assert_eq!(m.measure(&wrapped, 10).height, 30.0);
}
