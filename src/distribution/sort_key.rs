//! Per-color sort keys used to reorder colors across fixed positions.

use crate::color::{Rgb, normalize_hue, rgb_to_hsv};

/// Largest possible RGB distance, `sqrt(3 * 255^2)` rounded.
pub const MAX_RGB_DISTANCE: f64 = 441.67;

/// A pure function from color to a sortable scalar.
///
/// [`Contrast`](SortKey::Contrast) and [`Complementary`](SortKey::Complementary)
/// depend on the whole color set; they read it through a [`KeyContext`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SortKey {
    /// HSV value.
    Brightness,
    /// BT.709 luminance.
    Luminance,
    /// Hue, normalized to `[0, 1)`.
    Hue,
    Saturation,
    RedChannel,
    GreenChannel,
    BlueChannel,
    /// Euclidean RGB distance to a reference color, normalized by [`MAX_RGB_DISTANCE`].
    DistanceFromColor(Rgb),
    /// Cool hues (120..=300 degrees) map below 0.4, warm hues above.
    WarmCool,
    /// Saturation times value.
    Chroma,
    /// Distance of the BT.601 gray level from the set's average gray.
    Contrast,
    /// Angular distance to the dominant hue or its complement.
    Complementary,
    /// Mean of the three channels; the fallback key.
    SimpleBrightness,
}

/// Whole-set statistics some keys need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyContext {
    /// Mean BT.601 gray level over the set.
    pub average_gray: f64,
    /// Hue of the most saturated color in the set.
    pub primary_hue: f64,
}

impl Default for KeyContext {
    fn default() -> Self {
        Self {
            average_gray: 128.0,
            primary_hue: 0.0,
        }
    }
}

impl KeyContext {
    /// Gather statistics from `colors`. An empty set yields the defaults.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn from_colors(colors: &[Rgb]) -> Self {
        if colors.is_empty() {
            return Self::default();
        }

        let average_gray = colors.iter().map(Rgb::gray).sum::<f64>() / colors.len() as f64;

        // strictly greater, so the first of equally saturated colors wins
        let mut max_saturation = 0.0;
        let mut primary_hue = 0.0;
        for color in colors {
            let hsv = rgb_to_hsv(*color);
            if hsv.s > max_saturation {
                max_saturation = hsv.s;
                primary_hue = hsv.h;
            }
        }

        Self {
            average_gray,
            primary_hue,
        }
    }
}

impl SortKey {
    /// The key for `color` under `ctx`.
    #[must_use]
    pub fn key(self, color: Rgb, ctx: &KeyContext) -> f64 {
        let channel = |c: u8| f64::from(c) / 255.0;
        match self {
            Self::Brightness => rgb_to_hsv(color).v,
            Self::Luminance => color.luminance(),
            Self::Hue => rgb_to_hsv(color).h / 360.0,
            Self::Saturation => rgb_to_hsv(color).s,
            Self::RedChannel => channel(color.r),
            Self::GreenChannel => channel(color.g),
            Self::BlueChannel => channel(color.b),
            Self::DistanceFromColor(reference) => color.distance(&reference) / MAX_RGB_DISTANCE,
            Self::WarmCool => warm_cool(rgb_to_hsv(color).h),
            Self::Chroma => {
                let hsv = rgb_to_hsv(color);
                hsv.s * hsv.v
            }
            Self::Contrast => (color.gray() - ctx.average_gray).abs() / 255.0,
            Self::Complementary => complementary_distance(rgb_to_hsv(color).h, ctx.primary_hue),
            Self::SimpleBrightness => {
                let [r, g, b] = color.channels();
                (f64::from(r) + f64::from(g) + f64::from(b)) / (3.0 * 255.0)
            }
        }
    }

    /// Keys for every color, computing the shared context first.
    #[must_use]
    pub fn keys(self, colors: &[Rgb]) -> Vec<f64> {
        let ctx = KeyContext::from_colors(colors);
        colors.iter().map(|c| self.key(*c, &ctx)).collect()
    }

    /// Registry key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Luminance => "luminance",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::RedChannel => "red_channel",
            Self::GreenChannel => "green_channel",
            Self::BlueChannel => "blue_channel",
            Self::DistanceFromColor(_) => "distance_from_color",
            Self::WarmCool => "warm_cool",
            Self::Chroma => "chroma",
            Self::Contrast => "contrast",
            Self::Complementary => "complementary",
            Self::SimpleBrightness => "simple_brightness",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::Luminance => "Luminance",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::RedChannel => "Red Channel",
            Self::GreenChannel => "Green Channel",
            Self::BlueChannel => "Blue Channel",
            Self::DistanceFromColor(_) => "Distance from Color",
            Self::WarmCool => "Warm-Cool",
            Self::Chroma => "Chroma",
            Self::Contrast => "Contrast",
            Self::Complementary => "Complementary",
            Self::SimpleBrightness => "Simple Brightness",
        }
    }

    #[must_use]
    pub fn description(self) -> String {
        match self {
            Self::Brightness => "Reorder colors by HSV brightness from dark to light".to_string(),
            Self::Luminance => {
                "Reorder colors by perceived brightness using ITU-R BT.709 luminance".to_string()
            }
            Self::Hue => "Reorder colors by hue position around the color wheel".to_string(),
            Self::Saturation => "Reorder colors by saturation from grayscale to vivid".to_string(),
            Self::RedChannel => "Reorder colors by red color channel intensity".to_string(),
            Self::GreenChannel => "Reorder colors by green color channel intensity".to_string(),
            Self::BlueChannel => "Reorder colors by blue color channel intensity".to_string(),
            Self::DistanceFromColor(reference) => {
                format!("Reorder colors by Euclidean distance from {reference}")
            }
            Self::WarmCool => {
                "Reorder colors from cool (blues/greens) to warm (reds/oranges)".to_string()
            }
            Self::Chroma => "Reorder colors by chroma (saturation x brightness)".to_string(),
            Self::Contrast => "Reorder colors by contrast difference from average gray".to_string(),
            Self::Complementary => {
                "Reorder colors by complementary color relationships".to_string()
            }
            Self::SimpleBrightness => "Simple brightness reordering (fallback)".to_string(),
        }
    }
}

/// Piecewise warm/cool mapping of a hue in degrees.
///
/// Hues between 60 and 120 degrees fall below 0.4 on the yellow side; only
/// reds, oranges and yellows land in the upper band.
#[must_use]
pub fn warm_cool(hue: f64) -> f64 {
    if (120.0..=300.0).contains(&hue) {
        0.4 * (hue - 120.0) / 180.0
    } else if hue >= 300.0 {
        0.4 + 0.6 * (hue - 300.0) / 60.0
    } else {
        0.4 + 0.6 * (60.0 - hue) / 60.0
    }
}

/// Shortest angular distance from `hue` to `primary` or its complement, over 180.
#[must_use]
pub fn complementary_distance(hue: f64, primary: f64) -> f64 {
    let around = |a: f64, b: f64| {
        let d = (a - b).abs();
        d.min(360.0 - d)
    };
    let complement = normalize_hue(primary + 180.0);
    around(hue, primary).min(around(hue, complement)) / 180.0
}
