//! Color distribution: reassigning colors across a gradient's fixed positions.
//!
//! A [`Distribution`] never adds, removes or moves a stop. It computes a new
//! color for each index and writes it back onto the same position. With
//! endpoint preservation on, the stops at the minimum and maximum positions
//! keep their colors; they are tracked by index, so duplicate colors elsewhere
//! in the gradient do not disturb them.
//!
//! [`PositionPattern`] is the complementary tool: it moves positions and
//! keeps the color order.

mod positions;
mod sort_key;

pub use positions::PositionPattern;
pub use sort_key::{KeyContext, MAX_RGB_DISTANCE, SortKey, complementary_distance, warm_cool};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::color::Rgb;
use crate::error::DistributionError;
use crate::gradient::{ColorStop, Gradient, edge_indices};
use crate::{log_warn, trace_debug};

/// Reference color of the named `distance_from_color` distribution.
pub const DEFAULT_REFERENCE_COLOR: Rgb = Rgb::FALLBACK;

/// Registry keys, in display order.
pub const DISTRIBUTION_NAMES: [&str; 14] = [
    "brightness",
    "luminance",
    "hue",
    "saturation",
    "red_channel",
    "green_channel",
    "blue_channel",
    "distance_from_color",
    "warm_cool",
    "chroma",
    "contrast",
    "complementary",
    "random",
    "simple_brightness",
];

/// How colors are reassigned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    /// Stable sort by a per-color key.
    Sorted(SortKey),
    /// Shuffle, reproducible when seeded.
    Random { seed: Option<u64> },
}

impl Default for Distribution {
    fn default() -> Self {
        Self::Sorted(SortKey::SimpleBrightness)
    }
}

impl From<SortKey> for Distribution {
    fn from(key: SortKey) -> Self {
        Self::Sorted(key)
    }
}

impl Distribution {
    /// Look up a registry key (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, DistributionError> {
        let distribution = match name.to_lowercase().as_str() {
            "brightness" => SortKey::Brightness.into(),
            "luminance" => SortKey::Luminance.into(),
            "hue" => SortKey::Hue.into(),
            "saturation" => SortKey::Saturation.into(),
            "red_channel" => SortKey::RedChannel.into(),
            "green_channel" => SortKey::GreenChannel.into(),
            "blue_channel" => SortKey::BlueChannel.into(),
            "distance_from_color" => SortKey::DistanceFromColor(DEFAULT_REFERENCE_COLOR).into(),
            "warm_cool" => SortKey::WarmCool.into(),
            "chroma" => SortKey::Chroma.into(),
            "contrast" => SortKey::Contrast.into(),
            "complementary" => SortKey::Complementary.into(),
            "random" => Self::Random { seed: None },
            "simple_brightness" => SortKey::SimpleBrightness.into(),
            _ => return Err(DistributionError::UnknownDistribution(name.to_string())),
        };
        Ok(distribution)
    }

    /// Like [`from_name`](Self::from_name), falling back to simple brightness.
    #[must_use]
    pub fn from_name_or_fallback(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|e| {
            log_warn!("{}, falling back to simple brightness", e);
            Self::default()
        })
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Sorted(key) => key.id(),
            Self::Random { .. } => "random",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Sorted(key) => key.display_name(),
            Self::Random { .. } => "Random",
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Sorted(key) => key.description(),
            Self::Random { .. } => "Randomly shuffle color order".to_string(),
        }
    }

    /// Redistribute `stops`, returning `(position, color)` pairs in the
    /// original index order with the original positions.
    ///
    /// Unseeded random distributions draw from the thread-local generator.
    #[must_use]
    pub fn distribute_stops(
        &self,
        stops: &[ColorStop],
        reverse: bool,
        preserve_endpoints: bool,
    ) -> Vec<(f64, Rgb)> {
        match self {
            Self::Random { seed: Some(seed) } => {
                self.distribute_stops_with_rng(
                    stops,
                    reverse,
                    preserve_endpoints,
                    &mut StdRng::seed_from_u64(*seed),
                )
            }
            Self::Random { seed: None } => self.distribute_stops_with_rng(
                stops,
                reverse,
                preserve_endpoints,
                &mut rand::rng(),
            ),
            // sorting never reads the generator
            Self::Sorted(_) => self.distribute_stops_with_rng(
                stops,
                reverse,
                preserve_endpoints,
                &mut StdRng::seed_from_u64(0),
            ),
        }
    }

    /// [`distribute_stops`](Self::distribute_stops) with a caller-supplied
    /// generator. The generator is only read by [`Random`](Self::Random), and
    /// its `seed` field is ignored here.
    pub fn distribute_stops_with_rng<R: rand::Rng>(
        &self,
        stops: &[ColorStop],
        reverse: bool,
        preserve_endpoints: bool,
        rng: &mut R,
    ) -> Vec<(f64, Rgb)> {
        let _span = tracing::debug_span!(
            "distribute",
            distribution = self.id(),
            stops = stops.len(),
            reverse,
            preserve_endpoints
        )
        .entered();

        let original: Vec<(f64, Rgb)> = stops.iter().map(ColorStop::as_tuple).collect();
        if stops.len() <= 1 {
            return original;
        }

        let pinned: Vec<usize> = if preserve_endpoints {
            match edge_indices(stops) {
                Some((min, max)) if min == max => vec![min],
                Some((min, max)) => vec![min, max],
                None => Vec::new(),
            }
        } else {
            Vec::new()
        };
        let movable: Vec<usize> = (0..stops.len()).filter(|i| !pinned.contains(i)).collect();

        let colors: Vec<Rgb> = stops.iter().map(ColorStop::color).collect();
        let reordered: Vec<Rgb> = match self {
            Self::Sorted(key) => {
                // keys see the whole set; only movable colors are reordered
                let keys = key.keys(&colors);
                let mut order = movable.clone();
                if reverse {
                    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
                } else {
                    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
                }
                order.into_iter().map(|i| colors[i]).collect()
            }
            Self::Random { .. } => {
                let mut shuffled: Vec<Rgb> = movable.iter().map(|&i| colors[i]).collect();
                shuffled.shuffle(rng);
                if reverse {
                    shuffled.reverse();
                }
                shuffled
            }
        };

        trace_debug!(movable = movable.len(), "reassigning colors");

        let mut result = original;
        for (index, color) in movable.into_iter().zip(reordered) {
            result[index].1 = color;
        }
        result
    }

    /// Redistribute a gradient's colors in place.
    pub fn apply(&self, gradient: &mut Gradient, reverse: bool, preserve_endpoints: bool) {
        let redistributed = self.distribute_stops(gradient.stops(), reverse, preserve_endpoints);
        gradient.set_color_stops(redistributed);
    }
}

/// `(key, display name, description)` for every registered distribution.
#[must_use]
pub fn available_distributions() -> Vec<(&'static str, &'static str, String)> {
    DISTRIBUTION_NAMES
        .iter()
        .filter_map(|name| Distribution::from_name(name).ok())
        .map(|d| (d.id(), d.display_name(), d.description()))
        .collect()
}

/// Redistribute `gradient` by registry name. Unknown names fall back to
/// simple brightness.
pub fn distribute(gradient: &mut Gradient, name: &str, reverse: bool, preserve_endpoints: bool) {
    Distribution::from_name_or_fallback(name).apply(gradient, reverse, preserve_endpoints);
}

/// Redistribute `gradient` by registry name, reporting unknown names.
pub fn try_distribute(
    gradient: &mut Gradient,
    name: &str,
    reverse: bool,
    preserve_endpoints: bool,
) -> Result<(), DistributionError> {
    Distribution::from_name(name)?.apply(gradient, reverse, preserve_endpoints);
    Ok(())
}

/// Threshold blend between two color assignments.
///
/// Color reassignment is discrete, so there is no in-between: `strength`
/// (clamped to `[0, 1]`) below 0.5 keeps `original`, anything else takes
/// `distributed`. Mismatched lengths take `distributed` unless strength is 0.
#[must_use]
pub fn blend_distributions(
    original: &[(f64, Rgb)],
    distributed: &[(f64, Rgb)],
    strength: f64,
) -> Vec<(f64, Rgb)> {
    let strength = strength.clamp(0.0, 1.0);
    if strength <= 0.0 {
        return original.to_vec();
    }
    if strength >= 1.0 {
        return distributed.to_vec();
    }
    if original.len() != distributed.len() {
        log_warn!("Mismatched stop counts, returning distributed stops");
        return distributed.to_vec();
    }
    if strength >= 0.5 {
        distributed.to_vec()
    } else {
        original.to_vec()
    }
}
