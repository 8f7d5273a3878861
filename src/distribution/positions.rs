//! Position pattern distributions.
//!
//! These move stop positions and keep the color order, the opposite of the
//! sort-key distributions which keep positions and move colors. Every
//! pattern starts from even spacing, distorts it, then clamps to `[0, 1]`,
//! sorts, and pins the first and last positions to 0 and 1.

use std::f64::consts::{PI, TAU};

use crate::error::DistributionError;
use crate::gradient::{Gradient, sample_positions};
use crate::trace_debug;

/// Golden ratio used by the complex wave's second term.
const COMPLEX_GOLDEN: f64 = 1.618;

/// A named position pattern with its parameters.
///
/// Parameters are clamped to their supported ranges when positions are
/// generated, so any value is accepted here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PositionPattern {
    /// Ease from the current positions toward even spacing. `strength` in `[0, 1]`.
    Even { strength: f64 },
    /// `((p + offset) mod 1) ^ power`, with `power` in `[0.1, 10]`.
    PowerCurve { power: f64, phase: f64 },
    SineWave {
        frequency: f64,
        amplitude: f64,
        phase: f64,
    },
    HarmonicWave {
        frequency: f64,
        amplitude: f64,
        harmonics: u32,
        phase: f64,
    },
    /// Hypotrochoid x-coordinate used as an offset.
    Spirograph {
        outer_radius: f64,
        inner_radius: f64,
        pen_distance: f64,
        amplitude: f64,
        phase: f64,
    },
    ComplexWave {
        frequency: f64,
        amplitude: f64,
        complexity: u32,
        phase: f64,
    },
    /// Interior positions stepped by the golden angle.
    GoldenRatio { phase: f64 },
}

impl PositionPattern {
    /// Registry keys, in display order.
    pub const NAMES: [&'static str; 7] = [
        "even",
        "power_curves",
        "sine_wave",
        "harmonic_wave",
        "spirograph",
        "complex_wave",
        "golden_ratio",
    ];

    /// The pattern registered under `name` with its default parameters.
    pub fn from_name(name: &str) -> Result<Self, DistributionError> {
        let pattern = match name.to_lowercase().as_str() {
            "even" => Self::Even { strength: 1.0 },
            "power_curves" => Self::PowerCurve {
                power: 2.0,
                phase: 0.0,
            },
            "sine_wave" => Self::SineWave {
                frequency: 2.0,
                amplitude: 0.2,
                phase: 0.0,
            },
            "harmonic_wave" => Self::HarmonicWave {
                frequency: 2.0,
                amplitude: 0.15,
                harmonics: 4,
                phase: 0.0,
            },
            "spirograph" => Self::Spirograph {
                outer_radius: 5.0,
                inner_radius: 3.0,
                pen_distance: 2.0,
                amplitude: 0.2,
                phase: 0.0,
            },
            "complex_wave" => Self::ComplexWave {
                frequency: 2.0,
                amplitude: 0.2,
                complexity: 2,
                phase: 0.0,
            },
            "golden_ratio" => Self::GoldenRatio { phase: 0.0 },
            _ => return Err(DistributionError::UnknownPattern(name.to_string())),
        };
        Ok(pattern)
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Even { .. } => "even",
            Self::PowerCurve { .. } => "power_curves",
            Self::SineWave { .. } => "sine_wave",
            Self::HarmonicWave { .. } => "harmonic_wave",
            Self::Spirograph { .. } => "spirograph",
            Self::ComplexWave { .. } => "complex_wave",
            Self::GoldenRatio { .. } => "golden_ratio",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Even { .. } => "Even Distribution",
            Self::PowerCurve { .. } => "Power Curves",
            Self::SineWave { .. } => "Sine Wave",
            Self::HarmonicWave { .. } => "Harmonic Wave",
            Self::Spirograph { .. } => "Spirograph",
            Self::ComplexWave { .. } => "Complex Wave",
            Self::GoldenRatio { .. } => "Golden Ratio",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Even { .. } => "Creates perfectly even spacing with gradual strength control",
            Self::PowerCurve { .. } => "Apply exponential curves with phase offset",
            Self::SineWave { .. } => "Apply sinusoidal wave with phase control",
            Self::HarmonicWave { .. } => "Apply multiple harmonics with phase control",
            Self::Spirograph { .. } => "Apply complex cycloid patterns with phase control",
            Self::ComplexWave { .. } => "Apply multi-wave combination with phase control",
            Self::GoldenRatio { .. } => "Apply natural golden ratio spacing with phase control",
        }
    }

    /// Generate `count` positions starting from even spacing.
    #[must_use]
    pub fn positions(&self, count: usize) -> Vec<f64> {
        self.positions_from(&sample_positions(count).collect::<Vec<_>>())
    }

    /// Generate positions starting from `original`. Only [`Even`](Self::Even)
    /// reads the starting positions; the other patterns distort even spacing
    /// of the same length.
    #[must_use]
    pub fn positions_from(&self, original: &[f64]) -> Vec<f64> {
        let count = original.len();
        if count <= 1 {
            return vec![0.5];
        }
        if count == 2 && !matches!(self, Self::Even { .. } | Self::GoldenRatio { .. }) {
            return vec![0.0, 1.0];
        }

        let even: Vec<f64> = sample_positions(count).collect();
        let targets: Vec<f64> = match *self {
            Self::Even { strength } => ease_toward(original, &even, strength),
            Self::PowerCurve { power, phase } => power_curve(&even, power, phase),
            Self::SineWave {
                frequency,
                amplitude,
                phase,
            } => {
                let frequency = frequency.clamp(0.1, 8.0);
                let amplitude = amplitude.clamp(0.0, 0.4);
                even.iter()
                    .map(|p| p + amplitude * (TAU * frequency * p + phase).sin())
                    .collect()
            }
            Self::HarmonicWave {
                frequency,
                amplitude,
                harmonics,
                phase,
            } => harmonic_wave(&even, frequency, amplitude, harmonics, phase),
            Self::Spirograph {
                outer_radius,
                inner_radius,
                pen_distance,
                amplitude,
                phase,
            } => spirograph(
                &even,
                (outer_radius, inner_radius, pen_distance),
                amplitude,
                phase,
            ),
            Self::ComplexWave {
                frequency,
                amplitude,
                complexity,
                phase,
            } => complex_wave(&even, frequency, amplitude, complexity, phase),
            Self::GoldenRatio { phase } => golden_ratio(count, phase),
        };

        finish(targets)
    }

    /// Respace `gradient`'s stops. Stops are paired with the new positions
    /// in ascending position order, so colors keep their left-to-right order.
    pub fn apply(&self, gradient: &mut Gradient) {
        let _span = tracing::debug_span!("position_pattern", pattern = self.id()).entered();

        let mut stops = gradient.color_stops();
        if stops.is_empty() {
            return;
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));

        let original: Vec<f64> = stops.iter().map(|(p, _)| *p).collect();
        let positions = self.positions_from(&original);
        trace_debug!(stops = stops.len(), "applying position pattern");

        gradient.set_color_stops(
            positions
                .into_iter()
                .zip(stops)
                .map(|(position, (_, color))| (position, color)),
        );
    }
}

/// Clamp, sort and pin the endpoints.
fn finish(mut positions: Vec<f64>) -> Vec<f64> {
    for p in &mut positions {
        *p = p.clamp(0.0, 1.0);
    }
    positions.sort_by(f64::total_cmp);
    if positions.len() >= 2 {
        positions[0] = 0.0;
        if let Some(last) = positions.last_mut() {
            *last = 1.0;
        }
    }
    positions
}

/// Smoothstep-eased move from `from` toward `to`.
fn ease_toward(from: &[f64], to: &[f64], strength: f64) -> Vec<f64> {
    let strength = strength.clamp(0.0, 1.0);
    let eased = strength * strength * (3.0 - 2.0 * strength);
    from.iter()
        .zip(to)
        .map(|(a, b)| a + (b - a) * eased)
        .collect()
}

fn power_curve(even: &[f64], power: f64, phase: f64) -> Vec<f64> {
    let power = power.clamp(0.1, 10.0);
    let offset = phase / TAU * 0.5;
    let mut targets: Vec<f64> = even
        .iter()
        .map(|p| (p + offset).rem_euclid(1.0).powf(power))
        .collect();
    if let Some(first) = targets.first_mut() {
        *first = 0.0;
    }
    if let Some(last) = targets.last_mut() {
        *last = 1.0;
    }
    targets
}

fn harmonic_wave(even: &[f64], frequency: f64, amplitude: f64, harmonics: u32, phase: f64) -> Vec<f64> {
    let frequency = frequency.clamp(0.5, 6.0);
    let amplitude = amplitude.clamp(0.0, 0.3);
    let harmonics = harmonics.clamp(2, 6);

    even.iter()
        .map(|p| {
            let wave: f64 = (1..=harmonics)
                .map(|h| {
                    let h = f64::from(h);
                    (TAU * h * frequency * p + phase).sin() / h
                })
                .sum();
            p + amplitude * wave * 0.5 / f64::from(harmonics)
        })
        .collect()
}

fn spirograph(even: &[f64], (outer, inner, pen): (f64, f64, f64), amplitude: f64, phase: f64) -> Vec<f64> {
    let amplitude = amplitude.clamp(0.0, 0.3);
    // a degenerate wheel leaves positions on even spacing
    if inner.abs() < f64::EPSILON || (outer + pen).abs() < f64::EPSILON {
        return even.to_vec();
    }

    even.iter()
        .map(|p| {
            let theta = p * 2.0 * TAU + phase;
            let x = (outer - inner) * theta.cos() + pen * ((outer - inner) / inner * theta).cos();
            p + amplitude * x / (outer + pen)
        })
        .collect()
}

fn complex_wave(even: &[f64], frequency: f64, amplitude: f64, complexity: u32, phase: f64) -> Vec<f64> {
    let frequency = frequency.clamp(0.5, 6.0);
    let amplitude = amplitude.clamp(0.0, 0.3);
    let complexity = complexity.clamp(1, 4);

    even.iter()
        .map(|p| {
            let base = TAU * frequency * p;
            let mut wave = (base + phase).sin();
            if complexity >= 2 {
                wave += 0.6 * (base * COMPLEX_GOLDEN + phase).sin();
            }
            if complexity >= 3 {
                // odd harmonics with alternating sign: a triangle wave
                let triangle: f64 = [1.0, 3.0, 5.0, 7.0]
                    .iter()
                    .enumerate()
                    .map(|(k, n)| {
                        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                        sign / (n * n) * (n * base + phase).sin()
                    })
                    .sum();
                wave += 0.4 * triangle;
            }
            if complexity >= 4 {
                let square: f64 = [1.0, 3.0, 5.0]
                    .iter()
                    .map(|n| (n * base + phase).sin() / n)
                    .sum();
                wave += 0.3 * square;
            }
            p + amplitude * wave / f64::from(complexity)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn golden_ratio(count: usize, phase: f64) -> Vec<f64> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let golden_angle = 2.0 * PI / (phi * phi);

    (0..count)
        .map(|i| {
            if i == 0 {
                0.0
            } else if i == count - 1 {
                1.0
            } else {
                (i as f64 * golden_angle + phase).rem_euclid(TAU) / TAU
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn assert_well_formed(positions: &[f64]) {
        assert_eq!(positions.first().copied(), Some(0.0));
        assert_eq!(positions.last().copied(), Some(1.0));
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_every_named_pattern_is_well_formed() {
        for name in PositionPattern::NAMES {
            let pattern = PositionPattern::from_name(name).expect("registered pattern");
            assert_eq!(pattern.id(), name);
            let positions = pattern.positions(9);
            assert_eq!(positions.len(), 9, "{name}");
            assert_well_formed(&positions);
        }
    }

    #[test]
    fn test_small_counts() {
        let sine = PositionPattern::from_name("sine_wave").expect("pattern");
        assert_eq!(sine.positions(1), vec![0.5]);
        assert_eq!(sine.positions(2), vec![0.0, 1.0]);
        assert_eq!(sine.positions(0), vec![0.5]);
    }

    #[test]
    fn test_even_strength_eases() {
        let original = [0.0, 0.1, 0.2, 1.0];
        let full = PositionPattern::Even { strength: 1.0 }.positions_from(&original);
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        assert!(full.iter().zip(expected).all(|(a, b)| (a - b).abs() < 1e-12));

        let none = PositionPattern::Even { strength: 0.0 }.positions_from(&original);
        assert_eq!(none, original.to_vec());

        // smoothstep(0.5) = 0.5
        let half = PositionPattern::Even { strength: 0.5 }.positions_from(&original);
        assert!((half[1] - (0.1 + (1.0 / 3.0 - 0.1) * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_power_curve_squares_positions() {
        let positions = PositionPattern::PowerCurve {
            power: 2.0,
            phase: 0.0,
        }
        .positions(5);
        let expected = [0.0, 0.0625, 0.25, 0.5625, 1.0];
        assert!(positions.iter().zip(expected).all(|(a, b)| (a - b).abs() < 1e-12));
    }

    #[test]
    fn test_golden_ratio_interior() {
        let positions = PositionPattern::GoldenRatio { phase: 0.0 }.positions(3);
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let expected = 1.0 / (phi * phi);
        assert!((positions[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_amplitude_is_even() {
        let positions = PositionPattern::SineWave {
            frequency: 3.0,
            amplitude: 0.0,
            phase: 1.0,
        }
        .positions(5);
        assert_eq!(positions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_degenerate_spirograph() {
        let positions = PositionPattern::Spirograph {
            outer_radius: 5.0,
            inner_radius: 0.0,
            pen_distance: 2.0,
            amplitude: 0.3,
            phase: 0.0,
        }
        .positions(3);
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_unknown_pattern() {
        assert_eq!(
            PositionPattern::from_name("zigzag"),
            Err(DistributionError::UnknownPattern("zigzag".to_string()))
        );
    }

    #[test]
    fn test_apply_keeps_color_order() {
        let mut gradient = Gradient::from_stops([
            (1.0, Rgb::new(3, 0, 0)),
            (0.0, Rgb::new(1, 0, 0)),
            (0.4, Rgb::new(2, 0, 0)),
        ]);
        PositionPattern::Even { strength: 1.0 }.apply(&mut gradient);
        assert_eq!(
            gradient.color_stops(),
            vec![
                (0.0, Rgb::new(1, 0, 0)),
                (0.5, Rgb::new(2, 0, 0)),
                (1.0, Rgb::new(3, 0, 0)),
            ]
        );
    }
}
