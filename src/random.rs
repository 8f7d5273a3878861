//! Random gradient generation by color scheme.
//!
//! Every generator takes an explicit `&mut impl Rng`. Seeded helpers build a
//! [`StdRng`] from the seed, unseeded helpers draw a fresh OS-seeded one per
//! call, so no two call sites ever share generator state.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::color::{Hsv, Rgb, normalize_hue};
use crate::gradient::{DEFAULT_STOPS, Gradient, MAX_COLOR_STOPS};
use crate::log_debug;

/// Minimum spacing enforced between generated positions.
const MIN_POSITION_GAP: f64 = 0.01;

/// How random colors relate to each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorScheme {
    /// Unconstrained hues.
    #[default]
    Random,
    Monochromatic,
    Analogous,
    Complementary,
    Triadic,
    /// Like analogous, with a wider hue spread.
    Harmonious,
}

impl ColorScheme {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Monochromatic => "Monochromatic",
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::Triadic => "Triadic",
            Self::Harmonious => "Harmonious",
        }
    }

    /// One color drawn around `base_hue`.
    fn color<R: Rng>(self, base_hue: f64, rng: &mut R) -> Rgb {
        let around = |rng: &mut R, center: f64, spread: f64| {
            normalize_hue(center + rng.random_range(-spread..spread))
        };

        let (h, s, v) = match self {
            Self::Random => (
                rng.random_range(0.0..360.0),
                rng.random_range(0.3..1.0),
                rng.random_range(0.2..1.0),
            ),
            Self::Monochromatic => (
                around(rng, base_hue, 10.0),
                rng.random_range(0.3..0.9),
                rng.random_range(0.2..0.9),
            ),
            Self::Analogous => (
                around(rng, base_hue, 30.0),
                rng.random_range(0.5..0.9),
                rng.random_range(0.3..0.9),
            ),
            Self::Complementary => {
                let center = if rng.random::<f64>() < 0.5 {
                    base_hue
                } else {
                    normalize_hue(base_hue + 180.0)
                };
                (
                    around(rng, center, 30.0),
                    rng.random_range(0.6..1.0),
                    rng.random_range(0.3..0.9),
                )
            }
            Self::Triadic => {
                let hues = [
                    base_hue,
                    normalize_hue(base_hue + 120.0),
                    normalize_hue(base_hue + 240.0),
                ];
                let center = hues.choose(rng).copied().unwrap_or(base_hue);
                (
                    around(rng, center, 15.0),
                    rng.random_range(0.5..0.9),
                    rng.random_range(0.3..0.9),
                )
            }
            Self::Harmonious => (
                around(rng, base_hue, 45.0),
                rng.random_range(0.5..0.95),
                rng.random_range(0.3..0.9),
            ),
        };

        Hsv::new(h, s, v).to_rgb()
    }
}

/// Generate a gradient from `rng`.
///
/// `stops` is clamped to `[2, 64]`. The base hue is drawn first, then every
/// color, then the positions. Positions start with 0.0 and 1.0 followed by
/// interior positions in `[0.01, 0.99]`, are spread at least 0.01 apart where
/// possible, and are left unsorted. `seed_label` only affects the name.
pub fn generate<R: Rng>(
    rng: &mut R,
    scheme: ColorScheme,
    stops: usize,
    seed_label: Option<u64>,
) -> Gradient {
    let stops = stops.clamp(2, MAX_COLOR_STOPS);

    let base_hue = rng.random_range(0.0..360.0);
    let colors: Vec<Rgb> = (0..stops).map(|_| scheme.color(base_hue, rng)).collect();
    let positions = random_positions(stops, rng);

    let mut gradient = Gradient::from_stops(positions.into_iter().zip(colors));
    gradient.set_name(random_name(scheme, base_hue, stops, seed_label));
    gradient.metadata_mut().description =
        format!("Random {scheme} gradient with {stops} stops and random positions");

    log_debug!("Generated '{}'", gradient.name());
    gradient
}

/// Reproducible generation from `seed`.
#[must_use]
pub fn generate_seeded(scheme: ColorScheme, stops: usize, seed: u64) -> Gradient {
    generate(&mut StdRng::seed_from_u64(seed), scheme, stops, Some(seed))
}

/// Generation from the thread-local generator.
#[must_use]
pub fn generate_unseeded(scheme: ColorScheme, stops: usize) -> Gradient {
    generate(&mut rand::rng(), scheme, stops, None)
}

/// [`generate_seeded`] when a seed is given, [`generate_unseeded`] otherwise.
#[must_use]
pub fn random_gradient(scheme: ColorScheme, stops: Option<usize>, seed: Option<u64>) -> Gradient {
    let stops = stops.unwrap_or(DEFAULT_STOPS);
    match seed {
        Some(seed) => generate_seeded(scheme, stops, seed),
        None => generate_unseeded(scheme, stops),
    }
}

fn random_positions<R: Rng>(count: usize, rng: &mut R) -> Vec<f64> {
    let mut positions: Vec<f64> = vec![0.0, 1.0];
    positions.extend((2..count).map(|_| rng.random_range(0.01..0.99)));

    // later entries move away from earlier ones; order is kept
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            if (positions[i] - positions[j]).abs() < MIN_POSITION_GAP {
                positions[j] = if positions[j] < positions[i] {
                    (positions[i] - MIN_POSITION_GAP).max(0.0)
                } else {
                    (positions[i] + MIN_POSITION_GAP).min(1.0)
                };
            }
        }
    }

    positions.truncate(count);
    positions
}

fn random_name(scheme: ColorScheme, base_hue: f64, stops: usize, seed: Option<u64>) -> String {
    let hue = hue_name(base_hue);
    let mut name = match scheme {
        ColorScheme::Monochromatic => format!("Random Monochromatic {hue}"),
        ColorScheme::Random => "Random Spectrum".to_string(),
        other => format!("Random {} ({hue} Base)", other.title()),
    };
    name.push_str(&format!(" ({stops} stops)"));
    if let Some(seed) = seed {
        name.push_str(&format!(" [Seed: {seed}]"));
    }
    name
}

/// Descriptive name for a hue in degrees; `"Mixed"` outside `[0, 360)`.
#[must_use]
pub fn hue_name(hue: f64) -> &'static str {
    const RANGES: [(f64, f64, &str); 12] = [
        (0.0, 15.0, "Red"),
        (15.0, 45.0, "Orange"),
        (45.0, 75.0, "Yellow"),
        (75.0, 105.0, "Yellow-Green"),
        (105.0, 135.0, "Green"),
        (135.0, 165.0, "Teal"),
        (165.0, 195.0, "Cyan"),
        (195.0, 225.0, "Blue"),
        (225.0, 255.0, "Indigo"),
        (255.0, 285.0, "Purple"),
        (285.0, 315.0, "Magenta"),
        (315.0, 360.0, "Red"),
    ];

    RANGES
        .iter()
        .find(|(min, max, _)| (*min..*max).contains(&hue))
        .map_or("Mixed", |&(_, _, name)| name)
}
