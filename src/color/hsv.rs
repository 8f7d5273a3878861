//! HSV conversions and the hue-based color harmonies built on them.

use super::rgb::{Rgb, truncate_channel};

/// A color in HSV space: hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    #[must_use]
    pub fn to_rgb(&self) -> Rgb {
        hsv_to_rgb(*self)
    }
}

/// Wrap `degrees` into `[0, 360)`. `rem_euclid` can round up to exactly
/// 360 for tiny negative inputs, which is folded back to 0.
#[must_use]
pub fn normalize_hue(degrees: f64) -> f64 {
    let h = degrees.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h }
}

/// Convert RGB to HSV. Achromatic colors (max == min) get hue 0.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rgb_to_hsv(color: Rgb) -> Hsv {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        normalize_hue(60.0 * ((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv { h, s, v: max }
}

/// Convert HSV to RGB, truncating each channel to an integer.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::as_conversions,
    clippy::float_cmp
)]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { s, v, .. } = hsv;
    let h = normalize_hue(hsv.h);

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let segment = h / 60.0;
        let i = segment.floor();
        let f = segment - i;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match i as i64 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    Rgb::new(
        truncate_channel(r * 255.0),
        truncate_channel(g * 255.0),
        truncate_channel(b * 255.0),
    )
}

/// Scale the HSV value by `factor`, clamped to `[0, 1]`.
#[must_use]
pub fn adjust_brightness(color: Rgb, factor: f64) -> Rgb {
    let mut hsv = rgb_to_hsv(color);
    hsv.v = (hsv.v * factor).clamp(0.0, 1.0);
    hsv_to_rgb(hsv)
}

/// Scale the HSV saturation by `factor`, clamped to `[0, 1]`.
#[must_use]
pub fn adjust_saturation(color: Rgb, factor: f64) -> Rgb {
    let mut hsv = rgb_to_hsv(color);
    hsv.s = (hsv.s * factor).clamp(0.0, 1.0);
    hsv_to_rgb(hsv)
}

/// Rotate the hue by `degrees` (negative values rotate backwards).
#[must_use]
pub fn rotate_hue(color: Rgb, degrees: f64) -> Rgb {
    let mut hsv = rgb_to_hsv(color);
    hsv.h = normalize_hue(hsv.h + degrees);
    hsv_to_rgb(hsv)
}

/// The color opposite on the hue wheel.
#[must_use]
pub fn complementary(color: Rgb) -> Rgb {
    rotate_hue(color, 180.0)
}

/// Three colors spaced 120 degrees apart, starting with `color` itself.
#[must_use]
pub fn triadic(color: Rgb) -> [Rgb; 3] {
    [color, rotate_hue(color, 120.0), rotate_hue(color, 240.0)]
}

/// Neighbours at `-angle` and `+angle` with the original in the middle.
#[must_use]
pub fn analogous(color: Rgb, angle: f64) -> [Rgb; 3] {
    [rotate_hue(color, -angle), color, rotate_hue(color, angle)]
}

/// `steps` colors blending linearly from `from` to `to`, both included.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn interpolate_colors(from: Rgb, to: Rgb, steps: usize) -> Vec<Rgb> {
    (0..steps)
        .map(|i| {
            let t = if steps > 1 {
                i as f64 / (steps - 1) as f64
            } else {
                0.0
            };
            from.blend(&to, t)
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
    fn test_primary_hues() {
        assert!(approx(rgb_to_hsv(Rgb::new(255, 0, 0)).h, 0.0));
        assert!(approx(rgb_to_hsv(Rgb::new(255, 255, 0)).h, 60.0));
        assert!(approx(rgb_to_hsv(Rgb::new(0, 255, 0)).h, 120.0));
        assert!(approx(rgb_to_hsv(Rgb::new(0, 255, 255)).h, 180.0));
        assert!(approx(rgb_to_hsv(Rgb::new(0, 0, 255)).h, 240.0));
        assert!(approx(rgb_to_hsv(Rgb::new(255, 0, 255)).h, 300.0));
    }

    #[test]
    fn test_achromatic_has_zero_hue() {
        let gray = rgb_to_hsv(Rgb::new(90, 90, 90));
        assert!(approx(gray.h, 0.0));
        assert!(approx(gray.s, 0.0));
        assert!(approx(gray.v, 90.0 / 255.0));

        let black = rgb_to_hsv(Rgb::BLACK);
        assert!(approx(black.s, 0.0));
        assert!(approx(black.v, 0.0));
    }

    #[test]
    fn test_negative_red_hue_wraps() {
        // g < b on a red-max color gives a negative raw sector
        let hsv = rgb_to_hsv(Rgb::new(255, 0, 128));
        assert!(hsv.h > 300.0 && hsv.h < 360.0);
    }

    #[test]
    fn test_hsv_round_trip_primaries() {
        for color in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::WHITE,
            Rgb::BLACK,
        ] {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(color)), color);
        }
    }

    #[test]
    fn test_hue_360_wraps_to_red() {
        assert_eq!(hsv_to_rgb(Hsv::new(360.0, 1.0, 1.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(-360.0, 1.0, 1.0)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_tiny_negative_rotation_stays_red() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(rotate_hue(red, -1e-14), red);
        assert_eq!(rotate_hue(red, 360.0), red);
        assert!(normalize_hue(-1e-14) < 360.0);
        assert!(approx(normalize_hue(-90.0), 270.0));
        assert!(approx(normalize_hue(720.0), 0.0));
    }

    #[test]
    fn test_harmonies() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(complementary(red), Rgb::new(0, 255, 255));
        assert_eq!(
            triadic(red),
            [red, Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]
        );
        let [left, mid, right] = analogous(red, 60.0);
        assert_eq!(left, Rgb::new(255, 0, 255));
        assert_eq!(mid, red);
        assert_eq!(right, Rgb::new(255, 255, 0));
    }

    #[test]
    fn test_adjustments_clamp() {
        assert_eq!(adjust_brightness(Rgb::new(100, 0, 0), 10.0), Rgb::new(255, 0, 0));
        assert_eq!(adjust_saturation(Rgb::new(255, 0, 0), 0.0), Rgb::WHITE);
    }

    #[test]
    fn test_interpolate_colors() {
        let steps = interpolate_colors(Rgb::BLACK, Rgb::WHITE, 3);
        assert_eq!(steps, vec![Rgb::BLACK, Rgb::new(127, 127, 127), Rgb::WHITE]);
        assert_eq!(interpolate_colors(Rgb::BLACK, Rgb::WHITE, 1), vec![Rgb::BLACK]);
        assert!(interpolate_colors(Rgb::BLACK, Rgb::WHITE, 0).is_empty());
    }
}
