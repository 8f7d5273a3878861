//! Position to color lookup over an unsorted stop list.
//!
//! Stops are kept in insertion order, so every lookup is a linear bracket
//! scan. With at most 64 stops this is cheaper than maintaining a sorted
//! index that every mutation would have to invalidate.

use super::stop::{ColorStop, clamp_unit};
use crate::color::Rgb;

/// Positions closer than this are treated as the same edge position.
pub const EDGE_EPSILON: f64 = 1e-6;

/// Interpolate the color at `position` from `stops`.
///
/// The bracketing stops are the one with the largest position `<= position`
/// and the one with the smallest position `>= position`; on ties the earlier
/// stop in insertion order wins.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn interpolate(stops: &[ColorStop], position: f64) -> Rgb {
    let position = clamp_unit(position);

    let (first, last) = match stops {
        [] => return Rgb::FALLBACK,
        [only] => return only.color(),
        [first, .., last] => (first, last),
    };

    let mut before: Option<&ColorStop> = None;
    let mut after: Option<&ColorStop> = None;
    for stop in stops {
        let p = stop.position();
        if p <= position && before.is_none_or(|b| p > b.position()) {
            before = Some(stop);
        }
        if p >= position && after.is_none_or(|a| p < a.position()) {
            after = Some(stop);
        }
    }

    match (before, after) {
        (None, _) => first.color(),
        (_, None) => last.color(),
        (Some(before), Some(after)) if before.position() == after.position() => before.color(),
        (Some(before), Some(after)) => {
            let t = (position - before.position()) / (after.position() - before.position());
            before.color().blend(&after.color(), t)
        }
    }
}

/// Indices of the position-wise first and last stops.
///
/// The first stop is the earliest inserted stop holding the minimum position
/// and the last stop is the latest inserted stop holding the maximum, which
/// matches a stable sort by position. The two differ whenever `stops.len() >= 2`.
#[must_use]
pub fn edge_indices(stops: &[ColorStop]) -> Option<(usize, usize)> {
    let mut iter = stops.iter().enumerate();
    let (_, head) = iter.next()?;
    let (mut min_idx, mut min_pos) = (0, head.position());
    let (mut max_idx, mut max_pos) = (0, head.position());

    for (idx, stop) in iter {
        let p = stop.position();
        if p < min_pos {
            min_idx = idx;
            min_pos = p;
        }
        if p >= max_pos {
            max_idx = idx;
            max_pos = p;
        }
    }

    Some((min_idx, max_idx))
}
