//! Seamless edge handling: making a gradient's end continue into its start.
//!
//! Two layers are applied on top of plain interpolation:
//! - **basic**: every stop at the maximum position renders with the color of
//!   the minimum-position stop (a view; storage is untouched)
//! - **progressive**: colors near either edge are additionally pulled toward
//!   the opposite edge color. The start region pulls at 30% strength.

use serde::{Deserialize, Serialize};

use super::interpolate::{EDGE_EPSILON, edge_indices};
use super::stop::{ColorStop, clamp_unit};
use crate::color::Rgb;

pub const DEFAULT_BLEND_REGION: f64 = 0.1;
pub const MAX_BLEND_REGION: f64 = 0.5;
pub const DEFAULT_INTENSITY_FALLOFF: f64 = 0.7;

/// Relative strength of the start-region pull.
const START_REGION_STRENGTH: f64 = 0.3;

/// Seamless blending settings. Setters clamp; fields are never out of range.
#[derive(Clone, Debug, PartialEq)]
pub struct SeamlessConfig {
    enabled: bool,
    progressive: bool,
    blend_region: f64,
    intensity_falloff: f64,
    preview_overlay: bool,
}

/// Overlay descriptor consumed by preview renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendPreview {
    pub enabled: bool,
    pub progressive_enabled: bool,
    pub blend_region: f64,
    pub preview_overlay: bool,
    pub intensity_falloff: f64,
}

impl Default for SeamlessConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            progressive: false,
            blend_region: DEFAULT_BLEND_REGION,
            intensity_falloff: DEFAULT_INTENSITY_FALLOFF,
            preview_overlay: true,
        }
    }
}

impl SeamlessConfig {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn progressive(&self) -> bool {
        self.progressive
    }

    pub fn set_progressive(&mut self, progressive: bool) {
        self.progressive = progressive;
    }

    #[must_use]
    pub const fn blend_region(&self) -> f64 {
        self.blend_region
    }

    /// Set the blend region width, clamped to `[0, 0.5]`.
    pub fn set_blend_region(&mut self, region: f64) {
        self.blend_region = clamp_unit(region).min(MAX_BLEND_REGION);
    }

    #[must_use]
    pub const fn intensity_falloff(&self) -> f64 {
        self.intensity_falloff
    }

    /// Set the falloff multiplier, clamped to `[0, 1]`.
    pub fn set_intensity_falloff(&mut self, falloff: f64) {
        self.intensity_falloff = clamp_unit(falloff);
    }

    #[must_use]
    pub const fn preview_overlay(&self) -> bool {
        self.preview_overlay
    }

    pub fn set_preview_overlay(&mut self, overlay: bool) {
        self.preview_overlay = overlay;
    }

    #[must_use]
    pub const fn blend_preview_data(&self) -> BlendPreview {
        BlendPreview {
            enabled: self.enabled,
            progressive_enabled: self.progressive,
            blend_region: self.blend_region,
            preview_overlay: self.preview_overlay,
            intensity_falloff: self.intensity_falloff,
        }
    }

    /// Raw edge intensity at `position`, before the falloff multiplier.
    ///
    /// `(p - (1 - r)) / r` inside the end region, `(r - p) / r * 0.3` inside
    /// the start region, 0 elsewhere.
    #[must_use]
    pub fn blend_intensity(&self, position: f64) -> f64 {
        let region = self.blend_region;
        if region <= 0.0 {
            return 0.0;
        }
        if position > 1.0 - region {
            (position - (1.0 - region)) / region
        } else if position < region {
            (region - position) / region * START_REGION_STRENGTH
        } else {
            0.0
        }
    }

    /// Apply seamless adjustment to an already interpolated `base` color.
    ///
    /// `stops` are the raw stops the base color came from. A position on the
    /// maximum stop returns the minimum stop's color outright; otherwise the
    /// progressive edge pull is applied when enabled.
    #[must_use]
    pub fn adjust_color(&self, position: f64, base: Rgb, stops: &[ColorStop]) -> Rgb {
        if !self.enabled || stops.len() < 2 {
            return base;
        }
        let Some((first, last)) = edge_indices(stops) else {
            return base;
        };
        let (first, last) = (stops[first], stops[last]);

        let position = clamp_unit(position);
        if (position - last.position()).abs() < EDGE_EPSILON {
            return first.color();
        }

        if self.progressive {
            let intensity = self.blend_intensity(position);
            if intensity > 0.0 {
                return self.edge_pull(position, base, first.color(), last.color(), intensity);
            }
        }

        base
    }

    fn edge_pull(&self, position: f64, base: Rgb, first: Rgb, last: Rgb, intensity: f64) -> Rgb {
        let factor = intensity * self.intensity_falloff;
        if position > 1.0 - self.blend_region {
            base.blend(&first, factor)
        } else if position < self.blend_region {
            base.blend(&last, factor * START_REGION_STRENGTH)
        } else {
            base
        }
    }
}

/// Basic seamless view of `stops`: every stop within [`EDGE_EPSILON`] of the
/// maximum position takes the minimum-position stop's color.
#[must_use]
pub fn wrap_view(stops: &[ColorStop]) -> Vec<ColorStop> {
    let Some((first, last)) = edge_indices(stops).filter(|_| stops.len() >= 2) else {
        return stops.to_vec();
    };
    let first_color = stops[first].color();
    let last_position = stops[last].position();

    stops
        .iter()
        .map(|stop| {
            if (stop.position() - last_position).abs() < EDGE_EPSILON {
                ColorStop::new(stop.position(), first_color)
            } else {
                *stop
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_setters_clamp() {
        let mut config = SeamlessConfig::default();
        config.set_blend_region(0.9);
        assert!(approx(config.blend_region(), 0.5));
        config.set_blend_region(-1.0);
        assert!(approx(config.blend_region(), 0.0));
        config.set_intensity_falloff(3.0);
        assert!(approx(config.intensity_falloff(), 1.0));
    }

    #[test]
    fn test_blend_intensity_is_asymmetric() {
        let config = SeamlessConfig::default();
        assert!(approx(config.blend_intensity(0.95), 0.5));
        assert!(approx(config.blend_intensity(0.05), 0.15));
        assert!(approx(config.blend_intensity(0.5), 0.0));
    }

    #[test]
    fn test_zero_region_has_no_intensity() {
        let mut config = SeamlessConfig::default();
        config.set_blend_region(0.0);
        assert!(approx(config.blend_intensity(1.0), 0.0));
        assert!(approx(config.blend_intensity(0.0), 0.0));
    }

    #[test]
    fn test_wrap_view_uses_positions_not_indices() {
        let stops = vec![
            ColorStop::new(1.0, Rgb::new(0, 0, 255)),
            ColorStop::new(0.0, Rgb::new(255, 0, 0)),
            ColorStop::new(0.5, Rgb::new(0, 255, 0)),
        ];
        let view = wrap_view(&stops);
        assert_eq!(view[0].color(), Rgb::new(255, 0, 0));
        assert_eq!(view[1].color(), Rgb::new(255, 0, 0));
        assert_eq!(view[2].color(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_preview_data_reflects_settings() {
        let mut config = SeamlessConfig::default();
        config.set_enabled(true);
        config.set_progressive(true);
        let data = config.blend_preview_data();
        assert!(data.enabled);
        assert!(data.progressive_enabled);
        assert!(data.preview_overlay);
        assert!(approx(data.blend_region, 0.1));
    }
}
