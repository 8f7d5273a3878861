//! Compositing several weighted gradients into one.
//!
//! Four strategies are supported:
//! - [`MergeStrategy::Interleave`] pools every stop, collapsing near-duplicate positions
//! - [`MergeStrategy::Blend`] averages the inputs at every distinct stop position
//! - [`MergeStrategy::Crossfade`] samples whichever input owns each weight band
//! - [`MergeStrategy::Stack`] lays the inputs end to end in weight-sized segments
//!
//! Despite the name, crossfade switches discretely between inputs at band
//! boundaries; it never mixes two inputs at one position.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::color::{Rgb, truncate_channel};
use crate::error::MergeError;
use crate::gradient::{Gradient, sample_positions};
use crate::{log_warn, trace_debug};

/// Positions closer than this are merged into one interleave group.
pub const INTERLEAVE_EPSILON: f64 = 0.001;
/// Upper bound on crossfade samples.
pub const MAX_CROSSFADE_SAMPLES: usize = 100;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    #[default]
    Interleave,
    Blend,
    Crossfade,
    Stack,
}

impl MergeStrategy {
    /// Parse a strategy name, case-insensitively.
    pub fn try_from_name(name: &str) -> Result<Self, MergeError> {
        name.parse().map_err(|_| MergeError::UnknownStrategy(name.to_string()))
    }

    /// Parse a strategy name, falling back to interleave for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::try_from_name(name).unwrap_or_else(|_| {
            log_warn!("Unknown merge strategy '{}', using interleave", name);
            Self::Interleave
        })
    }

    /// Name used in merged gradient titles.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Interleave => "Interleave",
            Self::Blend => "Blend",
            Self::Crossfade => "Crossfade",
            Self::Stack => "Stack",
        }
    }
}

/// Merge weighted gradients by strategy name.
///
/// Never fails: unknown names use interleave, zero inputs yield the default
/// gradient, and a strategy with no usable input degrades to a clone of the
/// first input.
#[must_use]
pub fn merge_gradients(inputs: &[(Gradient, f64)], strategy: &str, use_weights: bool) -> Gradient {
    merge(inputs, MergeStrategy::from_name(strategy), use_weights)
}

/// Merge with an already parsed strategy, degrading as [`merge_gradients`] does.
#[must_use]
pub fn merge(inputs: &[(Gradient, f64)], strategy: MergeStrategy, use_weights: bool) -> Gradient {
    match try_merge(inputs, strategy, use_weights) {
        Ok(merged) => merged,
        Err(e) => {
            log_warn!("Merge failed ({}), returning first input unchanged", e);
            inputs
                .first()
                .map_or_else(Gradient::new, |(gradient, _)| gradient.clone())
        }
    }
}

/// Merge, reporting strategies that end up with no positive-weight input.
pub fn try_merge(
    inputs: &[(Gradient, f64)],
    strategy: MergeStrategy,
    use_weights: bool,
) -> Result<Gradient, MergeError> {
    let _span = tracing::debug_span!("merge", %strategy, inputs = inputs.len(), use_weights).entered();

    match inputs {
        [] => return Ok(Gradient::new()),
        [(only, _)] => return Ok(only.clone()),
        _ => {}
    }

    let stops = match strategy {
        MergeStrategy::Interleave => interleave(inputs, use_weights),
        MergeStrategy::Blend => blend(inputs, use_weights),
        MergeStrategy::Crossfade => crossfade(inputs, use_weights),
        MergeStrategy::Stack => stack(inputs, use_weights),
    };

    if stops.is_empty() {
        return Err(MergeError::NoUsableInputs { strategy });
    }

    trace_debug!(stops = stops.len(), "merged gradient stops");

    let mut merged = Gradient::from_stops(stops);
    merged.set_name(format!("Merged Gradient ({})", strategy.title()));
    Ok(merged)
}

/// Inputs that take part when weighting is on, with their effective weight.
fn usable(inputs: &[(Gradient, f64)], use_weights: bool) -> Vec<(&Gradient, f64)> {
    inputs
        .iter()
        .filter(|(_, weight)| !use_weights || *weight > 0.0)
        .map(|(gradient, weight)| (gradient, if use_weights { *weight } else { 1.0 }))
        .collect()
}

/// Weights scaled to sum to one. Equal shares when weighting is off.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn normalized_weights(usable: &[(&Gradient, f64)], use_weights: bool) -> Vec<f64> {
    if use_weights {
        let total: f64 = usable.iter().map(|(_, w)| w).sum();
        usable.iter().map(|(_, w)| w / total).collect()
    } else {
        vec![1.0 / usable.len() as f64; usable.len()]
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn interleave(inputs: &[(Gradient, f64)], use_weights: bool) -> Vec<(f64, Rgb)> {
    let mut pooled: Vec<(f64, Rgb, f64)> = usable(inputs, use_weights)
        .into_iter()
        .flat_map(|(gradient, weight)| {
            gradient
                .stops()
                .iter()
                .map(move |stop| (stop.position(), stop.color(), weight))
        })
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Groups are anchored on their first member, not chained.
    let mut groups: Vec<Vec<(f64, Rgb, f64)>> = Vec::new();
    for entry in pooled {
        match groups.last_mut() {
            Some(group) if (entry.0 - group[0].0).abs() <= INTERLEAVE_EPSILON => group.push(entry),
            _ => groups.push(vec![entry]),
        }
    }

    let mut stops = Vec::new();
    for group in groups {
        let avg = group.iter().map(|(p, _, _)| p).sum::<f64>() / group.len() as f64;
        if use_weights {
            // first contributor with the highest weight wins
            let mut best = &group[0];
            for entry in &group[1..] {
                if entry.2 > best.2 {
                    best = entry;
                }
            }
            stops.push((avg, best.1));
        } else {
            for (i, (_, color, _)) in group.iter().enumerate() {
                let nudged = avg + i as f64 * INTERLEAVE_EPSILON;
                stops.push((nudged.min(1.0), *color));
            }
        }
    }
    stops
}

fn blend(inputs: &[(Gradient, f64)], use_weights: bool) -> Vec<(f64, Rgb)> {
    let mut positions: Vec<f64> = inputs
        .iter()
        .flat_map(|(gradient, _)| gradient.stops().iter().map(|s| s.position()))
        .collect();
    positions.sort_by(f64::total_cmp);
    positions.dedup();

    let usable = usable(inputs, use_weights);
    let total: f64 = usable.iter().map(|(_, w)| w).sum();
    if usable.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    positions
        .into_iter()
        .map(|position| {
            let mut sum = [0.0_f64; 3];
            for (gradient, weight) in &usable {
                let color = gradient.color_at(position);
                for (acc, channel) in sum.iter_mut().zip(color.channels()) {
                    *acc += f64::from(channel) * weight;
                }
            }
            let [r, g, b] = sum.map(|c| truncate_channel(c / total));
            (position, Rgb::new(r, g, b))
        })
        .collect()
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn crossfade(inputs: &[(Gradient, f64)], use_weights: bool) -> Vec<(f64, Rgb)> {
    let usable = usable(inputs, use_weights);
    if usable.is_empty() {
        return Vec::new();
    }
    let weights = normalized_weights(&usable, use_weights);
    let samples = (usable.len() * 10).clamp(2, MAX_CROSSFADE_SAMPLES);

    sample_positions(samples)
        .map(|position| {
            let mut cumulative = 0.0;
            let mut active = 0;
            for (idx, weight) in weights.iter().enumerate() {
                cumulative += weight;
                if position <= cumulative {
                    active = idx;
                    break;
                }
            }
            // rounding can leave the final band short of 1.0; such samples fall back to input 0
            (position, usable[active].0.color_at(position))
        })
        .collect()
}

fn stack(inputs: &[(Gradient, f64)], use_weights: bool) -> Vec<(f64, Rgb)> {
    let usable = usable(inputs, use_weights);
    if usable.is_empty() {
        return Vec::new();
    }
    let sizes = normalized_weights(&usable, use_weights);

    let mut stops = Vec::new();
    let mut start = 0.0;
    for ((gradient, _), size) in usable.iter().zip(sizes) {
        let end = (start + size).min(1.0);
        for stop in gradient.stops() {
            stops.push((start + stop.position() * (end - start), stop.color()));
        }
        start = end;
    }
    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_strategy_names() {
        assert_eq!("Blend".parse::<MergeStrategy>(), Ok(MergeStrategy::Blend));
        assert_eq!("STACK".parse::<MergeStrategy>(), Ok(MergeStrategy::Stack));
        assert_eq!(MergeStrategy::from_name("swirl"), MergeStrategy::Interleave);
        assert_eq!(MergeStrategy::Crossfade.to_string(), "crossfade");
        assert_eq!(MergeStrategy::iter().count(), 4);
    }

    #[test]
    fn test_usable_filters_only_when_weighted() {
        let inputs = vec![(Gradient::new(), 0.0), (Gradient::new(), 2.0)];
        assert_eq!(usable(&inputs, true).len(), 1);
        let all = usable(&inputs, false);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|(_, w)| (*w - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_interleave_groups_anchor_on_first_member() {
        let a = Gradient::from_stops([(0.5, Rgb::new(1, 0, 0))]);
        let b = Gradient::from_stops([(0.5008, Rgb::new(2, 0, 0))]);
        let c = Gradient::from_stops([(0.5016, Rgb::new(3, 0, 0))]);
        let stops = interleave(&[(a, 1.0), (b, 3.0), (c, 5.0)], true);
        // 0.5016 is more than 0.001 from 0.5, so it starts a new group
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].1, Rgb::new(2, 0, 0));
        assert_eq!(stops[1].1, Rgb::new(3, 0, 0));
    }
}
