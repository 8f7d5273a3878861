//! A single color anchor.

use crate::color::Rgb;

/// A `(position, color)` anchor. Positions are always within `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    position: f64,
    color: Rgb,
}

impl ColorStop {
    /// Create a stop, clamping `position` into `[0, 1]`.
    #[must_use]
    pub fn new(position: f64, color: Rgb) -> Self {
        Self {
            position: clamp_unit(position),
            color,
        }
    }

    /// Create a stop from wide, unchecked channel values.
    #[must_use]
    pub fn from_raw(position: f64, [r, g, b]: [i64; 3]) -> Self {
        Self::new(position, Rgb::clamped(r, g, b))
    }

    /// Whether a raw input would be stored unchanged, i.e. clamping is a no-op.
    #[must_use]
    pub fn is_in_range(position: f64, channels: [i64; 3]) -> bool {
        (0.0..=1.0).contains(&position) && channels.iter().all(|c| (0..=255).contains(c))
    }

    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = clamp_unit(position);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// As a `(position, color)` pair.
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, Rgb) {
        (self.position, self.color)
    }
}

impl From<(f64, Rgb)> for ColorStop {
    fn from((position, color): (f64, Rgb)) -> Self {
        Self::new(position, color)
    }
}

/// Clamp into `[0, 1]`; NaN maps to 0.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
