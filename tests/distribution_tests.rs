use gradient_forge::distribution::{
    DISTRIBUTION_NAMES, available_distributions, blend_distributions, distribute, try_distribute,
};
use gradient_forge::{Distribution, DistributionError, Gradient, PositionPattern, Rgb, SortKey};
use pretty_assertions::assert_eq;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::{BLUE, CYAN, GREEN, RED, YELLOW, colors_of, positions_of, scrambled_hues};

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

#[test]
fn test_hue_distribution_keeps_endpoints_and_sorts_interior() {
    let mut gradient = scrambled_hues();
    distribute(&mut gradient, "hue", false, true);

    assert_eq!(positions_of(&gradient), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(colors_of(&gradient), vec![RED, YELLOW, GREEN, CYAN, BLUE]);
}

#[test]
fn test_reverse_hue_distribution() {
    let mut gradient = scrambled_hues();
    distribute(&mut gradient, "hue", true, true);

    assert_eq!(colors_of(&gradient), vec![RED, CYAN, GREEN, YELLOW, BLUE]);
}

#[test]
fn test_every_distribution_preserves_positions_and_endpoints() {
    let original = Gradient::from_stops([
        (1.0, BLUE),
        (0.3, Rgb::new(200, 40, 90)),
        (0.0, RED),
        (0.6, Rgb::new(12, 180, 33)),
        (0.45, Rgb::new(250, 250, 250)),
        (0.8, Rgb::new(90, 90, 90)),
    ]);

    for name in DISTRIBUTION_NAMES {
        for reverse in [false, true] {
            let mut gradient = original.clone();
            try_distribute(&mut gradient, name, reverse, true).expect("registered name");

            assert_eq!(
                positions_of(&gradient),
                positions_of(&original),
                "{name} moved positions"
            );
            // min and max positions live at indices 2 and 0
            assert_eq!(gradient.color_at(0.0), RED, "{name} moved the first color");
            assert_eq!(gradient.base_color_at(1.0), BLUE, "{name} moved the last color");

            let mut before = colors_of(&original);
            let mut after = colors_of(&gradient);
            before.sort_by_key(|c| c.channels());
            after.sort_by_key(|c| c.channels());
            assert_eq!(after, before, "{name} changed the color multiset");
        }
    }
}

#[test]
fn test_without_endpoint_preservation_everything_moves() {
    let mut gradient = Gradient::from_stops([
        (0.0, Rgb::WHITE),
        (0.5, Rgb::new(128, 128, 128)),
        (1.0, Rgb::BLACK),
    ]);
    distribute(&mut gradient, "brightness", false, false);

    assert_eq!(
        colors_of(&gradient),
        vec![Rgb::BLACK, Rgb::new(128, 128, 128), Rgb::WHITE]
    );
}

#[test]
fn test_unknown_names() {
    let mut gradient = scrambled_hues();
    assert_eq!(
        try_distribute(&mut gradient, "sparkle", false, true),
        Err(DistributionError::UnknownDistribution("sparkle".to_string()))
    );
    // a failed lookup leaves the gradient alone
    assert_eq!(gradient, scrambled_hues());

    let mut fallback = scrambled_hues();
    distribute(&mut fallback, "sparkle", false, true);
    let mut simple = scrambled_hues();
    distribute(&mut simple, "simple_brightness", false, true);
    assert_eq!(fallback, simple);
}

#[test]
fn test_seeded_random_is_reproducible_and_independent() {
    let stops = Gradient::from_stops(
        (0..12).map(|i| (f64::from(i) / 11.0, Rgb::new(i * 20, 255 - i * 20, 7))),
    );
    let shuffle = |seed| {
        Distribution::Random { seed: Some(seed) }.distribute_stops(stops.stops(), false, true)
    };

    let first = shuffle(42);
    let _unrelated = Distribution::Random { seed: None }.distribute_stops(stops.stops(), false, true);
    assert_eq!(shuffle(42), first);

    assert_eq!(first[0].1, Rgb::new(0, 255, 7));
    assert_eq!(first[11].1, Rgb::new(220, 35, 7));
    assert_eq!(
        first.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
        positions_of(&stops)
    );
}

#[test]
fn test_registry_lists_every_name() {
    let listed: Vec<&str> = available_distributions()
        .into_iter()
        .map(|(id, _, _)| id)
        .collect();
    assert_eq!(listed, DISTRIBUTION_NAMES.to_vec());
    assert_eq!(
        Distribution::from_name("Warm_Cool"),
        Ok(Distribution::Sorted(SortKey::WarmCool))
    );
}

#[test]
fn test_blend_distributions_threshold() {
    let original = scrambled_hues().color_stops();
    let mut distributed_gradient = scrambled_hues();
    distribute(&mut distributed_gradient, "hue", false, true);
    let distributed = distributed_gradient.color_stops();

    assert_eq!(blend_distributions(&original, &distributed, 0.49), original);
    assert_eq!(blend_distributions(&original, &distributed, 0.5), distributed);
    assert_eq!(blend_distributions(&original, &distributed, -2.0), original);
    assert_eq!(blend_distributions(&original, &distributed[..2], 0.2), distributed[..2].to_vec());
}

#[test]
fn test_position_patterns_keep_color_order() {
    for name in PositionPattern::NAMES {
        let pattern = PositionPattern::from_name(name).expect("registered pattern");
        let mut gradient = scrambled_hues();
        pattern.apply(&mut gradient);

        let positions = positions_of(&gradient);
        assert_eq!(positions.len(), 5, "{name}");
        assert_eq!(positions.clone(), sorted(positions.clone()), "{name} unsorted");
        assert!(positions.iter().all(|p| (0.0..=1.0).contains(p)), "{name}");
        assert_eq!(
            colors_of(&gradient),
            vec![RED, CYAN, YELLOW, GREEN, BLUE],
            "{name} reordered colors"
        );
    }
}

#[test]
fn test_power_curve_bunches_toward_start() {
    let positions = PositionPattern::PowerCurve {
        power: 2.0,
        phase: 0.0,
    }
    .positions(5);

    assert_eq!(positions.first(), Some(&0.0));
    assert_eq!(positions.last(), Some(&1.0));
    assert!(positions[2] < 0.5);
}
