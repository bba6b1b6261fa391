//! Grid track templates: tokenizing `grid-template-*` values and resolving
//! them against an available size.

use std::fmt;

use crate::diagnostics::{StyleDiagnostic, diagnostics_enabled};

/// One declared track size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackSize {
    Auto,
    /// Proportional share of the remaining space, by weight.
    Fraction(f32),
    /// Absolute size in pixels.
    Fixed(f32),
}

impl TrackSize {
    /// Parse one token: `auto`, `<n>fr`, `<n>px` or a bare number (px).
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("auto") {
            return Some(TrackSize::Auto);
        }
        if let Some(n) = token.strip_suffix("fr") {
            return parse_weight(n).map(TrackSize::Fraction);
        }
        let n = token.strip_suffix("px").unwrap_or(token);
        parse_weight(n).map(TrackSize::Fixed)
    }
}

fn parse_weight(raw: &str) -> Option<f32> {
    let v: f32 = raw.trim().parse().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSize::Auto => write!(f, "auto"),
            TrackSize::Fraction(w) => write!(f, "{w}fr"),
            TrackSize::Fixed(px) => write!(f, "{px}px"),
        }
    }
}

/// Tokenize a whitespace separated template. Unparsable tokens become
/// `Fixed(0.0)` and are reported, so the track count always matches the
/// token count.
pub fn parse_track_list(template: &str) -> (Vec<TrackSize>, Vec<StyleDiagnostic>) {
    let mut tracks = Vec::new();
    let mut diagnostics = Vec::new();
    for token in template.split_whitespace() {
        match TrackSize::parse(token) {
            Some(track) => tracks.push(track),
            None => {
                let diag = StyleDiagnostic::error(token, "unparsable track size; using 0")
                    .with_property("grid-template");
                diag.emit();
                diagnostics.push(diag);
                tracks.push(TrackSize::Fixed(0.0));
            }
        }
    }
    (tracks, diagnostics)
}

/// Resolve declared tracks to concrete sizes along an axis of `total` length.
///
/// Fixed tracks keep their size. The space left after fixed tracks and the
/// `gap`s between tracks is shared among flexible tracks: with only `auto`
/// tracks each gets an equal share; with `fr` tracks each gets its weight's
/// proportion. When both kinds appear, `auto` counts as `1fr`. A template with
/// no flexible track may under- or overflow `total`. Remaining space may be
/// negative when fixed tracks and gaps overflow `total`; flexible tracks then
/// come out negative so the axis still sums to `total`, and consumers clamp
/// when placing content.
pub fn resolve_tracks(tracks: &[TrackSize], total: f32, gap: f32) -> Vec<f32> {
    if tracks.is_empty() {
        return Vec::new();
    }
    let mut fixed = 0.0f32;
    let mut auto_count = 0usize;
    let mut fr_total = 0.0f32;
    for track in tracks {
        match *track {
            TrackSize::Fixed(px) => fixed += px,
            TrackSize::Auto => auto_count += 1,
            TrackSize::Fraction(w) => fr_total += w,
        }
    }
    let remaining = total - fixed - gap * (tracks.len() - 1) as f32;
    let weight_total = fr_total + auto_count as f32;
    let share = |weight: f32| {
        if weight_total > 0.0 { remaining * weight / weight_total } else { 0.0 }
    };

    let sizes: Vec<f32> = tracks
        .iter()
        .map(|track| match *track {
            TrackSize::Fixed(px) => px,
            TrackSize::Auto => share(1.0),
            TrackSize::Fraction(w) => share(w),
        })
        .collect();
    if diagnostics_enabled("layout") {
        tracing::debug!(total, gap, remaining, ?sizes, "resolved grid tracks");
    }
    sizes
}

/// Tokenize and resolve in one step.
pub fn resolve_template(template: &str, total: f32, gap: f32) -> (Vec<f32>, Vec<StyleDiagnostic>) {
    let (tracks, diagnostics) = parse_track_list(template);
    (resolve_tracks(&tracks, total, gap), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn parses_every_token_kind() {
        assert_eq!(TrackSize::parse("auto"), Some(TrackSize::Auto));
        assert_eq!(TrackSize::parse("2fr"), Some(TrackSize::Fraction(2.0)));
        assert_eq!(TrackSize::parse("0.5fr"), Some(TrackSize::Fraction(0.5)));
        assert_eq!(TrackSize::parse("100px"), Some(TrackSize::Fixed(100.0)));
        assert_eq!(TrackSize::parse("40"), Some(TrackSize::Fixed(40.0)));
        assert_eq!(TrackSize::parse("fr"), None);
        assert_eq!(TrackSize::parse("wide"), None);
        assert_eq!(TrackSize::parse("-3px"), None);
    }

    #[test]
    fn bad_tokens_become_zero_placeholders() {
        let (tracks, diags) = parse_track_list("1fr  oops 50px");
        assert_eq!(
            tracks,
            vec![TrackSize::Fraction(1.0), TrackSize::Fixed(0.0), TrackSize::Fixed(50.0)]
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].value, "oops");
    }

    #[test]
    fn fractions_share_remaining_space() {
        let (sizes, diags) = resolve_template("1fr 2fr 100px", 700.0, 10.0);
        assert!(diags.is_empty());
        assert_eq!(sizes.len(), 3);
        assert!(approx(sizes[0], 193.33));
        assert!(approx(sizes[1], 386.67));
        assert!(approx(sizes[2], 100.0));
    }

    #[test]
    fn autos_split_evenly() {
        let sizes = resolve_tracks(&[TrackSize::Auto, TrackSize::Fixed(40.0), TrackSize::Auto], 300.0, 10.0);
        assert!(approx(sizes[0], 120.0));
        assert!(approx(sizes[2], 120.0));
    }

    #[test]
    fn mixed_auto_and_fr_counts_auto_as_one_fraction() {
        let sizes = resolve_tracks(&[TrackSize::Auto, TrackSize::Fraction(3.0)], 400.0, 0.0);
        assert!(approx(sizes[0], 100.0));
        assert!(approx(sizes[1], 300.0));
    }

    #[test]
    fn fixed_only_templates_are_not_stretched() {
        let sizes = resolve_tracks(&[TrackSize::Fixed(50.0), TrackSize::Fixed(60.0)], 1000.0, 5.0);
        assert_eq!(sizes, vec![50.0, 60.0]);
    }

    #[test]
    fn overflowing_fixed_tracks_keep_the_axis_sum() {
        let (sizes, _) = resolve_template("1fr 300px", 200.0, 10.0);
        assert!(approx(sizes[0], -110.0));
        assert_eq!(sizes[1], 300.0);
        assert!(approx(sizes.iter().sum::<f32>() + 10.0, 200.0));
    }

    #[test]
    fn zero_weight_fractions_resolve_to_zero() {
        let sizes = resolve_tracks(&[TrackSize::Fraction(0.0)], 100.0, 0.0);
        assert_eq!(sizes, vec![0.0]);
    }

    #[test]
    fn empty_template_has_no_tracks() {
        assert!(resolve_template("   ", 100.0, 5.0).0.is_empty());
    }
}
