//! Color primitives for the gradient engine.
//!
//! [`Rgb`] is the storage type for every color stop. HSV is only used as an
//! intermediate space for sort keys, harmonies and brightness/saturation
//! adjustments; it is never persisted.

mod hsv;
mod rgb;

pub use hsv::{
    Hsv, adjust_brightness, adjust_saturation, analogous, complementary, hsv_to_rgb,
    interpolate_colors, normalize_hue, rgb_to_hsv, rotate_hue, triadic,
};
pub(crate) use rgb::truncate_channel;
pub use rgb::{ColorParseError, Rgb};
