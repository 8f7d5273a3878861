use std::collections::HashSet;

use serde::Serialize;

use super::{Gradient, MAX_COLOR_STOPS, sample_positions};
use crate::color::Rgb;

/// Samples taken when estimating dominant colors.
const DOMINANT_SAMPLES: usize = 100;
/// Per-channel distance under which two samples count as the same color.
const DOMINANT_TOLERANCE: u8 = 20;

/// Summary statistics over a gradient's stop colors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorStats {
    pub stop_count: usize,
    pub unique_colors: usize,
    pub red_range: (u8, u8),
    pub green_range: (u8, u8),
    pub blue_range: (u8, u8),
    /// Mean BT.601 gray level, `0.0..=255.0`.
    pub avg_brightness: f64,
    pub seamless_enabled: bool,
    pub progressive_enabled: bool,
}

impl Gradient {
    /// Statistics over the stored stop colors; `None` when there are no stops.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn color_stats(&self) -> Option<ColorStats> {
        let colors: Vec<Rgb> = self.stops.iter().map(|s| s.color()).collect();
        if colors.is_empty() {
            return None;
        }

        let range = |channel: fn(&Rgb) -> u8| {
            let values = colors.iter().map(channel);
            (values.clone().min().unwrap_or(0), values.max().unwrap_or(0))
        };

        let unique: HashSet<Rgb> = colors.iter().copied().collect();
        let avg_brightness = colors.iter().map(Rgb::gray).sum::<f64>() / colors.len() as f64;

        Some(ColorStats {
            stop_count: colors.len(),
            unique_colors: unique.len(),
            red_range: range(|c| c.r),
            green_range: range(|c| c.g),
            blue_range: range(|c| c.b),
            avg_brightness,
            seamless_enabled: self.seamless.enabled(),
            progressive_enabled: self.seamless.progressive(),
        })
    }

    /// The `count` most frequent color groups over 100 samples, with weights
    /// normalized over all groups.
    ///
    /// A sample joins the first existing group whose representative is within
    /// 20 on every channel; otherwise it starts a new group.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn dominant_colors(&self, count: usize) -> Vec<(Rgb, f64)> {
        let mut groups: Vec<(Rgb, usize)> = Vec::new();

        for sample in self.sample_colors(DOMINANT_SAMPLES) {
            let close = |rep: &Rgb| {
                rep.channels()
                    .iter()
                    .zip(sample.channels())
                    .all(|(a, b)| a.abs_diff(b) <= DOMINANT_TOLERANCE)
            };
            match groups.iter_mut().find(|(rep, _)| close(rep)) {
                Some((_, hits)) => *hits += 1,
                None => groups.push((sample, 1)),
            }
        }

        groups.sort_by(|a, b| b.1.cmp(&a.1));
        let total: usize = groups.iter().map(|(_, hits)| hits).sum();

        groups
            .into_iter()
            .take(count)
            .map(|(color, hits)| (color, hits as f64 / total as f64))
            .collect()
    }

    /// Resample into a new gradient with `count` evenly spaced stops
    /// (`count` clamped to `[2, 64]`). Metadata and seamless settings are
    /// copied; the name gets an `(Interpolated n)` suffix.
    #[must_use]
    pub fn interpolate_to_size(&self, count: usize) -> Self {
        let count = count.clamp(2, MAX_COLOR_STOPS);

        let mut resized = self.clone();
        resized.set_name(format!("{} (Interpolated {count})", self.name()));
        resized.set_color_stops(sample_positions(count).map(|p| (p, self.color_at(p))));
        resized
    }
}
