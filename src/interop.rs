//! Sampling contracts shared with the file exporters.
//!
//! The MAP and UGR writers live outside this crate; they only ever read a
//! gradient through [`Gradient::color_at`] and [`Gradient::color_stops`], and
//! the helpers here pin down exactly how.

use crate::color::Rgb;
use crate::gradient::{Gradient, sample_positions};

/// Number of entries in a MAP palette.
pub const MAP_SAMPLES: usize = 256;
/// Highest UGR palette index (JWildfire's 400-entry convention).
pub const UGR_MAX_INDEX: u16 = 399;

/// 256 evenly spaced [`Gradient::color_at`] samples.
#[must_use]
pub fn map_samples(gradient: &Gradient) -> Vec<Rgb> {
    sample_positions(MAP_SAMPLES)
        .map(|p| gradient.color_at(p))
        .collect()
}

/// Quantize a position to a UGR index: `floor(position * 399)`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn ugr_index(position: f64) -> u16 {
    (position.clamp(0.0, 1.0) * f64::from(UGR_MAX_INDEX)).floor() as u16
}

/// Position of a UGR index: `index / 399`. Lossy against [`ugr_index`] by up
/// to `1 / 399`.
#[must_use]
pub fn ugr_position(index: u16) -> f64 {
    f64::from(index.min(UGR_MAX_INDEX)) / f64::from(UGR_MAX_INDEX)
}

/// `(index, "r|g|b")` entries sorted by stop position.
#[must_use]
pub fn ugr_entries(gradient: &Gradient) -> Vec<(u16, String)> {
    let mut stops = gradient.color_stops();
    stops.sort_by(|a, b| a.0.total_cmp(&b.0));
    stops
        .into_iter()
        .map(|(position, color)| {
            (
                ugr_index(position),
                format!("{}|{}|{}", color.r, color.g, color.b),
            )
        })
        .collect()
}
