//! The gradient data model.
//!
//! A [`Gradient`] is an insertion-ordered list of [`ColorStop`]s plus
//! metadata and seamless settings. Stops are never sorted implicitly: manual
//! and random arrangements are preserved exactly, and every read goes through
//! the linear bracket scan in [`interpolate`].
//!
//! # Usage
//!
//! ```
//! use gradient_forge::{Gradient, Rgb};
//!
//! let mut gradient = Gradient::empty();
//! gradient.add_color_stop(0.0, Rgb::new(255, 0, 0));
//! gradient.add_color_stop(1.0, Rgb::new(0, 0, 255));
//!
//! assert_eq!(gradient.color_at(0.5), Rgb::new(127, 0, 127));
//! ```

mod analysis;
pub mod interpolate;
mod metadata;
mod seamless;
mod state;
mod stop;

#[cfg(test)]
mod tests;

pub use analysis::ColorStats;
pub use interpolate::{EDGE_EPSILON, edge_indices, interpolate};
pub use metadata::{DEFAULT_CATEGORY, DEFAULT_NAME, GradientMetadata};
pub use seamless::{
    BlendPreview, DEFAULT_BLEND_REGION, DEFAULT_INTENSITY_FALLOFF, MAX_BLEND_REGION, SeamlessConfig,
    wrap_view,
};
pub use state::{BACKUP_VERSION, BackupMetadata, GradientBackup, GradientState};
pub use stop::ColorStop;

use crate::color::Rgb;
use crate::log_warn;

/// Upper bound on the number of stops a gradient holds.
pub const MAX_COLOR_STOPS: usize = 64;
/// Stop count of the default grayscale gradient.
pub const DEFAULT_STOPS: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<ColorStop>,
    metadata: GradientMetadata,
    seamless: SeamlessConfig,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new()
    }
}

impl Gradient {
    /// The default gradient: 10 evenly spaced grayscale stops.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stops: default_stops(),
            metadata: GradientMetadata::default(),
            seamless: SeamlessConfig::default(),
        }
    }

    /// A gradient with no stops, default metadata and seamless settings.
    ///
    /// Meant as a starting point for builders; an empty gradient samples as
    /// [`Rgb::FALLBACK`] and fails [`validate_state_integrity`](Self::validate_state_integrity).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stops: Vec::new(),
            ..Self::new()
        }
    }

    /// Build from `(position, color)` pairs in order. Pairs past
    /// [`MAX_COLOR_STOPS`] are dropped.
    pub fn from_stops<I>(stops: I) -> Self
    where
        I: IntoIterator<Item = (f64, Rgb)>,
    {
        let mut gradient = Self::empty();
        gradient.extend_stops(stops);
        gradient
    }

    // Stops

    /// Stops in insertion order.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Stops as `(position, color)` pairs, in insertion order.
    #[must_use]
    pub fn color_stops(&self) -> Vec<(f64, Rgb)> {
        self.stops.iter().map(ColorStop::as_tuple).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Append a stop. Returns `false` without adding when the gradient is full.
    pub fn add_color_stop(&mut self, position: f64, color: Rgb) -> bool {
        if self.stops.len() >= MAX_COLOR_STOPS {
            return false;
        }
        self.stops.push(ColorStop::new(position, color));
        true
    }

    /// Remove the stop at `index`. The last remaining stop is never removed
    /// and out-of-range indices are ignored.
    pub fn remove_color_stop_at_index(&mut self, index: usize) {
        if index < self.stops.len() && self.stops.len() > 1 {
            self.stops.remove(index);
        }
    }

    /// Insert a stop at `index` (clamped to the end). Returns `false` when full.
    pub fn insert_color_stop(&mut self, index: usize, position: f64, color: Rgb) -> bool {
        if self.stops.len() >= MAX_COLOR_STOPS {
            return false;
        }
        let index = index.min(self.stops.len());
        self.stops.insert(index, ColorStop::new(position, color));
        true
    }

    pub fn set_color_at_index(&mut self, index: usize, color: Rgb) {
        if let Some(stop) = self.stops.get_mut(index) {
            stop.set_color(color);
        }
    }

    pub fn set_position_at_index(&mut self, index: usize, position: f64) {
        if let Some(stop) = self.stops.get_mut(index) {
            stop.set_position(position);
        }
    }

    /// Stable sort by position. Never called implicitly.
    pub fn sort_color_stops(&mut self) {
        self.stops
            .sort_by(|a, b| a.position().total_cmp(&b.position()));
    }

    /// Respace positions to `i / (n - 1)` in index order, keeping colors.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn distribute_stops_evenly(&mut self) {
        let n = self.stops.len();
        if n <= 1 {
            return;
        }
        let last = (n - 1) as f64;
        for (i, stop) in self.stops.iter_mut().enumerate() {
            stop.set_position(i as f64 / last);
        }
    }

    /// Replace every stop. Stops past [`MAX_COLOR_STOPS`] are dropped.
    pub fn set_color_stops<I>(&mut self, stops: I)
    where
        I: IntoIterator<Item = (f64, Rgb)>,
    {
        self.stops.clear();
        self.extend_stops(stops);
    }

    fn extend_stops<I>(&mut self, stops: I)
    where
        I: IntoIterator<Item = (f64, Rgb)>,
    {
        let mut dropped = 0usize;
        for (position, color) in stops {
            if !self.add_color_stop(position, color) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log_warn!(
                "Dropped {} color stops beyond the {}-stop limit",
                dropped,
                MAX_COLOR_STOPS
            );
        }
    }

    /// Restore default stops, metadata and seamless settings.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether this gradient still matches [`Gradient::new`] (positions within 0.001).
    #[must_use]
    pub fn is_default(&self) -> bool {
        let expected = default_stops();
        self.stops.len() == expected.len()
            && self.stops.iter().zip(&expected).all(|(stop, want)| {
                (stop.position() - want.position()).abs() <= 0.001 && stop.color() == want.color()
            })
            && self.metadata.is_default()
    }

    // Metadata

    #[must_use]
    pub const fn metadata(&self) -> &GradientMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut GradientMetadata {
        &mut self.metadata
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.metadata.name = name.into();
    }

    // Seamless

    #[must_use]
    pub const fn seamless(&self) -> &SeamlessConfig {
        &self.seamless
    }

    pub fn seamless_mut(&mut self) -> &mut SeamlessConfig {
        &mut self.seamless
    }

    /// Permanently copy the minimum-position stop's color onto the
    /// maximum-position stop. No-op (returns `false`) when seamless is
    /// disabled or there are fewer than two stops. Idempotent.
    pub fn apply_seamless_permanently(&mut self) -> bool {
        if !self.seamless.enabled() || self.stops.len() < 2 {
            return false;
        }
        self.stops = wrap_view(&self.stops);
        true
    }

    // Sampling

    /// The color at `position` (clamped to `[0, 1]`), including the basic
    /// seamless substitution when enabled.
    #[must_use]
    pub fn color_at(&self, position: f64) -> Rgb {
        if self.seamless.enabled() && self.stops.len() >= 2 {
            interpolate(&wrap_view(&self.stops), position)
        } else {
            interpolate(&self.stops, position)
        }
    }

    /// The color at `position` ignoring all seamless settings.
    #[must_use]
    pub fn base_color_at(&self, position: f64) -> Rgb {
        interpolate(&self.stops, position)
    }

    /// Preview color: progressive edge blending when enabled, otherwise the
    /// same as [`color_at`](Self::color_at).
    #[must_use]
    pub fn color_at_for_preview(&self, position: f64) -> Rgb {
        if self.seamless.enabled() && self.seamless.progressive() {
            let base = self.base_color_at(position);
            self.seamless.adjust_color(position, base, &self.stops)
        } else {
            self.color_at(position)
        }
    }

    /// Stops as a preview renders them: the seamless view for basic seamless,
    /// raw stops otherwise.
    #[must_use]
    pub fn color_stops_for_preview(&self) -> Vec<(f64, Rgb)> {
        if self.seamless.enabled() && !self.seamless.progressive() {
            wrap_view(&self.stops)
                .iter()
                .map(ColorStop::as_tuple)
                .collect()
        } else {
            self.color_stops()
        }
    }

    /// `count` evenly spaced samples of [`color_at`](Self::color_at).
    #[must_use]
    pub fn sample_colors(&self, count: usize) -> Vec<Rgb> {
        sample_positions(count).map(|p| self.color_at(p)).collect()
    }

    /// `count` evenly spaced samples of [`color_at_for_preview`](Self::color_at_for_preview).
    #[must_use]
    pub fn sample_colors_for_preview(&self, count: usize) -> Vec<Rgb> {
        sample_positions(count)
            .map(|p| self.color_at_for_preview(p))
            .collect()
    }

    /// Check the stored state. Returns `(valid, issues)`.
    #[must_use]
    pub fn validate_state_integrity(&self) -> (bool, Vec<String>) {
        let mut issues = Vec::new();

        if self.stops.is_empty() {
            issues.push("No color stops".to_string());
        } else if self.stops.len() > MAX_COLOR_STOPS {
            issues.push(format!("Too many stops ({})", self.stops.len()));
        }

        for (i, stop) in self.stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.position()) {
                issues.push(format!("Stop {i} invalid position: {}", stop.position()));
            }
        }

        let region = self.seamless.blend_region();
        if !(0.0..=MAX_BLEND_REGION).contains(&region) {
            issues.push(format!("Invalid blend region: {region}"));
        }

        (issues.is_empty(), issues)
    }
}

/// Evenly spaced positions `i / (count - 1)`; a single sample sits at 0.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub(crate) fn sample_positions(count: usize) -> impl Iterator<Item = f64> {
    let denom = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| i as f64 / denom)
}

fn default_stops() -> Vec<ColorStop> {
    sample_positions(DEFAULT_STOPS)
        .map(|position| {
            let value = crate::color::truncate_channel(255.0 * position);
            ColorStop::new(position, Rgb::new(value, value, value))
        })
        .collect()
}
