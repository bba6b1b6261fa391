use mkml_style::{TrackSize, resolve_tracks};
use proptest::prelude::*;

fn track() -> impl Strategy<Value = TrackSize> {
    prop_oneof![
        Just(TrackSize::Auto),
        (0.1f32..8.0).prop_map(TrackSize::Fraction),
        (0.0f32..60.0).prop_map(TrackSize::Fixed),
    ]
}

proptest! {
    #[test]
    fn flexible_templates_fill_the_axis(
        tracks in prop::collection::vec(track(), 1..8),
        gap in 0.0f32..20.0,
        slack in -500.0f32..2000.0,
    ) {
        prop_assume!(tracks.iter().any(|t| !matches!(t, TrackSize::Fixed(_))));
        let fixed: f32 = tracks
            .iter()
            .map(|t| if let TrackSize::Fixed(px) = t { *px } else { 0.0 })
            .sum();
        let total = (fixed + gap * (tracks.len() - 1) as f32 + slack).max(0.0);

        let sizes = resolve_tracks(&tracks, total, gap);
        prop_assert_eq!(sizes.len(), tracks.len());
        let used: f32 = sizes.iter().sum::<f32>() + gap * (tracks.len() - 1) as f32;
        prop_assert!((used - total).abs() < total.max(1.0) * 1e-3, "used {} total {}", used, total);
    }

    #[test]
    fn fixed_tracks_keep_their_size(
        tracks in prop::collection::vec(track(), 1..8),
        total in 0.0f32..2000.0,
        gap in 0.0f32..20.0,
    ) {
        let sizes = resolve_tracks(&tracks, total, gap);
        for (track, size) in tracks.iter().zip(&sizes) {
            if let TrackSize::Fixed(px) = track {
                prop_assert_eq!(*px, *size);
            }
        }
    }
}
