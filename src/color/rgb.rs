//! RGB color type - the canonical 8-bit color used by every gradient stop.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::hsv::{Hsv, rgb_to_hsv};

/// An 8-bit-per-channel RGB color.
///
/// Serialized as a `[r, g, b]` array so persisted gradient state stays
/// compatible with the `(r, g, b)` tuples older session files contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from wide integer channels, clamping each to `0..=255`.
    #[must_use]
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Create a color from a hex string (with or without #).
    ///
    /// # Errors
    /// Returns an error if the hex string is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }

        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| ColorParseError::InvalidHex(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Convert to hex string with # prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to RGB tuple for use with colored crate.
    #[must_use]
    pub const fn to_rgb_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Channels as an array, in r, g, b order.
    #[must_use]
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to HSV.
    #[must_use]
    pub fn to_hsv(&self) -> Hsv {
        rgb_to_hsv(*self)
    }

    /// Linear per-channel blend: `self * (1 - t) + other * t`, truncated.
    ///
    /// `t` is clamped to `0.0..=1.0`, where 0.0 returns `self` and 1.0 returns `other`.
    #[must_use]
    pub fn blend(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| truncate_channel(f64::from(a) * (1.0 - t) + f64::from(b) * t);
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// BT.601 gray level (`0.299 r + 0.587 g + 0.114 b`), in `0.0..=255.0`.
    #[must_use]
    pub fn gray(&self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// BT.709 relative luminance, normalized to `0.0..=1.0`.
    #[must_use]
    pub fn luminance(&self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }

    /// Euclidean distance to another color in RGB space.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let d = |a: u8, b: u8| f64::from(a) - f64::from(b);
        (d(self.r, other.r).powi(2) + d(self.g, other.g).powi(2) + d(self.b, other.b).powi(2))
            .sqrt()
    }

    /// The neutral gray returned when there is nothing to interpolate.
    pub const FALLBACK: Self = Self::new(128, 128, 128);

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
}

/// Clamp a wide integer to a color channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Truncate a float channel toward zero, saturating at the channel bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
pub(crate) fn truncate_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

impl Default for Rgb {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Errors that can occur when parsing a color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// Hex string has wrong length (expected 6 characters without #).
    #[error("invalid hex color length: {0} (expected 6)")]
    InvalidLength(usize),
    /// Hex string contains invalid characters.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#e135ff").unwrap(), Rgb::new(225, 53, 255));
        assert_eq!(Rgb::from_hex("80ffea").unwrap(), Rgb::new(128, 255, 234));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert_eq!(Rgb::from_hex("#fff"), Err(ColorParseError::InvalidLength(3)));
        assert!(matches!(
            Rgb::from_hex("zz0000"),
            Err(ColorParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgb::new(225, 53, 255).to_hex(), "#e135ff");
    }

    #[test]
    fn test_blend_truncates() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(red.blend(&blue, 0.5), Rgb::new(127, 0, 127));
        assert_eq!(red.blend(&blue, 0.0), red);
        assert_eq!(red.blend(&blue, 1.0), blue);
    }

    #[test]
    fn test_blend_clamps_factor() {
        let black = Rgb::BLACK;
        let white = Rgb::WHITE;
        assert_eq!(black.blend(&white, 2.0), white);
        assert_eq!(black.blend(&white, -1.0), black);
    }

    #[test]
    fn test_clamped_channels() {
        assert_eq!(Rgb::clamped(300, -20, 128), Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_serde_as_array() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Rgb = serde_json::from_str("[10,20,30]").unwrap();
        assert_eq!(back, Rgb::new(10, 20, 30));
    }
}
