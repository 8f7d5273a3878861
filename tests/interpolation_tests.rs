use gradient_forge::{Gradient, Rgb};
use pretty_assertions::assert_eq;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::{BLUE, GREEN, RED, colors_of, red_to_blue, scrambled_hues};

#[test]
fn test_midpoint_of_two_stops() {
    assert_eq!(red_to_blue().color_at(0.5), Rgb::new(127, 0, 127));
}

#[test]
fn test_extreme_stops_are_exact_regardless_of_insertion_order() {
    let gradient = Gradient::from_stops([(1.0, BLUE), (0.3, GREEN), (0.0, RED)]);

    assert_eq!(gradient.color_at(0.0), RED);
    assert_eq!(gradient.color_at(0.3), GREEN);
    assert_eq!(gradient.color_at(1.0), BLUE);
}

#[test]
fn test_queries_outside_unit_range_are_clamped() {
    let gradient = red_to_blue();
    assert_eq!(gradient.color_at(-3.0), RED);
    assert_eq!(gradient.color_at(7.5), BLUE);
}

#[test]
fn test_queries_beyond_the_outermost_stops() {
    let gradient = Gradient::from_stops([(0.6, GREEN), (0.2, RED)]);

    // nothing at or below 0.1: the first inserted stop is used
    assert_eq!(gradient.color_at(0.1), GREEN);
    // nothing at or above 0.9: the last inserted stop is used
    assert_eq!(gradient.color_at(0.9), RED);
}

#[test]
fn test_degenerate_stop_lists() {
    assert_eq!(Gradient::empty().color_at(0.5), Rgb::FALLBACK);
    assert_eq!(Gradient::from_stops([(0.7, GREEN)]).color_at(0.1), GREEN);

    let coincident = Gradient::from_stops([(0.5, RED), (0.5, BLUE)]);
    assert_eq!(coincident.color_at(0.5), RED);
}

#[test]
fn test_sampling_is_continuous() {
    let gradient = scrambled_hues();
    let samples = gradient.sample_colors(1001);

    for pair in samples.windows(2) {
        let jump = pair[0]
            .channels()
            .iter()
            .zip(pair[1].channels())
            .map(|(a, b)| a.abs_diff(b))
            .max()
            .unwrap_or(0);
        assert!(jump <= 3, "discontinuity between {} and {}", pair[0], pair[1]);
    }
}

#[test]
fn test_add_then_remove_round_trips() {
    let mut gradient = scrambled_hues();
    let before = gradient.color_stops();

    assert!(gradient.add_color_stop(0.4, Rgb::WHITE));
    gradient.remove_color_stop_at_index(gradient.len() - 1);
    assert_eq!(gradient.color_stops(), before);

    assert!(gradient.insert_color_stop(2, 0.4, Rgb::WHITE));
    gradient.remove_color_stop_at_index(2);
    assert_eq!(gradient.color_stops(), before);
}

#[test]
fn test_storage_order_is_never_sorted_implicitly() {
    let mut gradient = Gradient::from_stops([(1.0, BLUE), (0.0, RED)]);
    gradient.add_color_stop(0.5, GREEN);
    let _ = gradient.color_at(0.25);

    assert_eq!(colors_of(&gradient), vec![BLUE, RED, GREEN]);

    gradient.sort_color_stops();
    assert_eq!(colors_of(&gradient), vec![RED, GREEN, BLUE]);
}

#[test]
fn test_seamless_reads_wrap_for_any_order() {
    let mut gradient = Gradient::from_stops([(1.0, BLUE), (0.5, GREEN), (0.0, RED)]);
    gradient.seamless_mut().set_enabled(true);

    assert_eq!(gradient.color_at(1.0), RED);
    assert_eq!(gradient.base_color_at(1.0), BLUE);
    // storage is untouched by the view
    assert_eq!(colors_of(&gradient), vec![BLUE, GREEN, RED]);

    assert!(gradient.apply_seamless_permanently());
    assert_eq!(colors_of(&gradient), vec![RED, GREEN, RED]);
    assert!(gradient.apply_seamless_permanently());
    assert_eq!(colors_of(&gradient), vec![RED, GREEN, RED]);
}

#[test]
fn test_progressive_preview_only_touches_the_edges() {
    let mut gradient = red_to_blue();
    let seamless = gradient.seamless_mut();
    seamless.set_enabled(true);
    seamless.set_progressive(true);
    seamless.set_blend_region(0.1);

    assert_eq!(gradient.color_at_for_preview(0.5), gradient.base_color_at(0.5));
    assert_ne!(gradient.color_at_for_preview(0.95), gradient.base_color_at(0.95));
}
