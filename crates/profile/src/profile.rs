//! Assembly of the final control point sequence.
//!
//! The builder takes widths already converted to pixels and a parallel list of
//! positions already converted to path fractions, some of which may be left
//! unspecified. It produces a profile that:
//!
//! - has exactly one position per width,
//! - has non-decreasing offsets,
//! - starts at or before `0.0` and ends at or after `1.0`,
//! - tiles the pattern along the path when repeating.

use crate::parser::RepeatMode;

/// A width sample along the path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    /// Fraction of the path length. Not clamped to `[0, 1]`.
    pub offset: f32,
    /// Width on the left side of the path, in pixels.
    pub left: f32,
    /// Width on the right side of the path, in pixels.
    pub right: f32,
}

impl ControlPoint {
    #[inline]
    pub fn new(offset: f32, left: f32, right: f32) -> Self {
        ControlPoint {
            offset,
            left,
            right,
        }
    }

    #[inline]
    pub fn width(&self) -> PixelWidth {
        PixelWidth {
            left: self.left,
            right: self.right,
        }
    }
}

/// A left/right width pair in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelWidth {
    pub left: f32,
    pub right: f32,
}

impl PixelWidth {
    #[inline]
    pub fn new(left: f32, right: f32) -> Self {
        PixelWidth { left, right }
    }

    #[inline]
    pub fn symmetric(width: f32) -> Self {
        PixelWidth::new(width, width)
    }
}

/// Parameters for the profile builder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct ResolveOptions {
    /// Repeat tiling stops once the profile holds this many control points.
    ///
    /// Default value: `ResolveOptions::DEFAULT_MAX_CONTROL_POINTS`.
    pub max_control_points: usize,
}

impl ResolveOptions {
    pub const DEFAULT_MAX_CONTROL_POINTS: usize = 10_000;

    pub const DEFAULT: Self = ResolveOptions {
        max_control_points: Self::DEFAULT_MAX_CONTROL_POINTS,
    };

    #[inline]
    pub fn with_max_control_points(mut self, max: usize) -> Self {
        self.max_control_points = max;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builds the final profile.
///
/// `positions` is reconciled to the length of `widths`: missing entries are
/// treated as unspecified and extra entries are dropped. An empty `widths`
/// list yields an empty profile.
pub fn build_profile(
    widths: &[PixelWidth],
    positions: &[Option<f32>],
    repeat: RepeatMode,
    options: &ResolveOptions,
) -> Vec<ControlPoint> {
    if widths.is_empty() {
        return Vec::new();
    }

    let positions = reconcile(positions, widths.len());
    let mut offsets = fill_gaps(&positions);
    clamp_monotonic(&mut offsets);

    let mut points: Vec<ControlPoint> = offsets
        .iter()
        .zip(widths)
        .map(|(&offset, width)| ControlPoint::new(offset, width.left, width.right))
        .collect();

    extend_start(&mut points);
    if repeat == RepeatMode::Repeat {
        tile(&mut points, options.max_control_points);
    }
    extend_end(&mut points);

    points
}

fn reconcile(positions: &[Option<f32>], len: usize) -> Vec<Option<f32>> {
    let mut result: Vec<Option<f32>> = positions.iter().take(len).copied().collect();
    result.resize(len, None);
    result
}

/// Replaces every run of unspecified positions with evenly spaced values.
///
/// A leading run starts at `min(first_known, 0)`, a trailing run ends at
/// `max(last_known, 1)`. If nothing is known the positions span `[0, 1]`.
fn fill_gaps(positions: &[Option<f32>]) -> Vec<f32> {
    let n = positions.len();
    let mut result = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if let Some(position) = positions[i] {
            result.push(position);
            i += 1;
            continue;
        }

        let start = i;
        while i < n && positions[i].is_none() {
            i += 1;
        }
        let count = i - start;

        match (result.last().copied(), positions.get(i).copied().flatten()) {
            // Leading run: the synthetic lower bound is the first item.
            (None, Some(upper)) => {
                let lower = upper.min(0.0);
                for k in 0..count {
                    result.push(interpolate(lower, upper, k, count));
                }
            }
            // Interior run.
            (Some(lower), Some(upper)) => {
                for k in 1..=count {
                    result.push(interpolate(lower, upper, k, count + 1));
                }
            }
            // Trailing run: the synthetic upper bound is the last item.
            (Some(lower), None) => {
                let upper = lower.max(1.0);
                for k in 1..=count {
                    result.push(interpolate(lower, upper, k, count));
                }
            }
            // Nothing is known.
            (None, None) => {
                let steps = count.saturating_sub(1).max(1);
                for k in 0..count {
                    result.push(interpolate(0.0, 1.0, k, steps));
                }
            }
        }
    }

    result
}

/// The `k`-th of `steps` evenly spaced values from `lower` to `upper`.
#[inline]
fn interpolate(lower: f32, upper: f32, k: usize, steps: usize) -> f32 {
    lower + (upper - lower) * k as f32 / steps as f32
}

fn clamp_monotonic(offsets: &mut [f32]) {
    let mut max = std::f32::NEG_INFINITY;
    for offset in offsets {
        max = max.max(*offset);
        *offset = max;
    }
}

fn extend_start(points: &mut Vec<ControlPoint>) {
    if let Some(&first) = points.first() {
        if first.offset > 0.0 {
            points.insert(0, ControlPoint { offset: 0.0, ..first });
        }
    }
}

fn extend_end(points: &mut Vec<ControlPoint>) {
    if let Some(&last) = points.last() {
        if last.offset < 1.0 {
            points.push(ControlPoint { offset: 1.0, ..last });
        }
    }
}

/// Rounds to five decimal places, so that drift accumulated while tiling
/// doesn't produce distinct offsets for the same tile boundary.
#[inline]
fn round_offset(offset: f64) -> f32 {
    ((offset * 1e5).round() / 1e5) as f32
}

/// Appends copies of the pattern, shifted by the pattern length, until the
/// profile reaches the end of the path.
///
/// Stops early when a whole copy of the pattern collapses onto the last
/// point, since every further copy would too.
fn tile(points: &mut Vec<ControlPoint>, max_control_points: usize) {
    let pattern = points.clone();
    let (first, last) = match (pattern.first(), pattern.last()) {
        (Some(first), Some(last)) => (first.offset as f64, last.offset as f64),
        _ => return,
    };

    let pattern_length = last - first;
    if !(pattern_length > 0.0) || !pattern_length.is_finite() {
        return;
    }

    let mut cycle: u32 = 1;
    loop {
        // Computed from the cycle count so that the shift keeps growing even
        // when the pattern is tiny compared to the offsets.
        let shift = cycle as f64 * pattern_length;
        let mut pushed = false;

        for item in &pattern {
            let end = match points.last() {
                Some(point) => *point,
                None => return,
            };
            if end.offset >= 1.0 {
                return;
            }
            if points.len() >= max_control_points {
                log::warn!(
                    "Stopped tiling the stroke widths pattern after {} control points.",
                    points.len()
                );
                return;
            }

            let offset = round_offset(shift + item.offset as f64);
            let duplicate =
                offset == round_offset(end.offset as f64) && item.width() == end.width();
            if !duplicate {
                // Rounding may land just below the previous offset.
                points.push(ControlPoint {
                    offset: offset.max(end.offset),
                    ..*item
                });
                pushed = true;
            }
        }

        if !pushed {
            log::trace!("Stopped tiling a pattern that doesn't advance.");
            return;
        }
        cycle += 1;
    }
}

#[cfg(test)]
fn offsets(points: &[ControlPoint]) -> Vec<f32> {
    points.iter().map(|point| point.offset).collect()
}

#[cfg(test)]
fn lefts(points: &[ControlPoint]) -> Vec<f32> {
    points.iter().map(|point| point.left).collect()
}

#[cfg(test)]
fn symmetric(widths: &[f32]) -> Vec<PixelWidth> {
    widths.iter().map(|&w| PixelWidth::symmetric(w)).collect()
}

#[test]
fn fill_gaps_without_known_positions() {
    assert_eq!(fill_gaps(&[None]), vec![0.0]);
    assert_eq!(fill_gaps(&[None, None]), vec![0.0, 1.0]);
    assert_eq!(fill_gaps(&[None, None, None]), vec![0.0, 0.5, 1.0]);
    assert_eq!(
        fill_gaps(&[None, None, None, None, None]),
        vec![0.0, 0.25, 0.5, 0.75, 1.0]
    );
}

#[test]
fn fill_gaps_runs() {
    // Trailing.
    assert_eq!(fill_gaps(&[Some(0.5), None, None]), vec![0.5, 0.75, 1.0]);
    assert_eq!(fill_gaps(&[Some(0.5), Some(1.2), None]), vec![0.5, 1.2, 1.2]);
    // Leading.
    assert_eq!(fill_gaps(&[None, Some(0.5)]), vec![0.0, 0.5]);
    assert_eq!(fill_gaps(&[None, None, Some(-0.5)]), vec![-0.5, -0.5, -0.5]);
    // Interior.
    assert_eq!(
        fill_gaps(&[Some(0.0), None, None, Some(0.75)]),
        vec![0.0, 0.25, 0.5, 0.75]
    );
}

#[test]
fn clamp_keeps_running_maximum() {
    let mut values = vec![0.1, 0.0, 0.4, 0.3, 0.5];
    clamp_monotonic(&mut values);
    assert_eq!(values, vec![0.1, 0.1, 0.4, 0.4, 0.5]);
}

#[test]
fn reconcile_pads_and_truncates() {
    assert_eq!(reconcile(&[Some(0.5)], 3), vec![Some(0.5), None, None]);
    assert_eq!(reconcile(&[Some(0.5), Some(0.8), Some(0.9)], 2), vec![Some(0.5), Some(0.8)]);
}

#[test]
fn extends_to_the_domain_boundaries() {
    let points = build_profile(
        &symmetric(&[10.0, 20.0]),
        &[Some(0.5), Some(0.8)],
        RepeatMode::NoRepeat,
        &ResolveOptions::DEFAULT,
    );

    assert_eq!(offsets(&points), vec![0.0, 0.5, 0.8, 1.0]);
    assert_eq!(lefts(&points), vec![10.0, 10.0, 20.0, 20.0]);
}

#[test]
fn empty_widths() {
    let points = build_profile(&[], &[Some(0.5)], RepeatMode::Repeat, &ResolveOptions::DEFAULT);
    assert!(points.is_empty());
}

#[test]
fn tiling() {
    let points = build_profile(
        &symmetric(&[10.0, 20.0]),
        &[Some(0.0), Some(0.2)],
        RepeatMode::Repeat,
        &ResolveOptions::DEFAULT,
    );

    assert_eq!(
        offsets(&points),
        vec![0.0, 0.2, 0.2, 0.4, 0.4, 0.6, 0.6, 0.8, 0.8, 1.0]
    );
    assert_eq!(
        lefts(&points),
        vec![10.0, 20.0, 10.0, 20.0, 10.0, 20.0, 10.0, 20.0, 10.0, 20.0]
    );
}

#[test]
fn tiling_skips_duplicate_boundaries() {
    let points = build_profile(
        &symmetric(&[10.0, 20.0, 10.0]),
        &[Some(0.0), Some(0.2), Some(0.4)],
        RepeatMode::Repeat,
        &ResolveOptions::DEFAULT,
    );

    assert_eq!(offsets(&points), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(lefts(&points), vec![10.0, 20.0, 10.0, 20.0, 10.0, 20.0]);
}

#[test]
fn zero_length_pattern_does_not_tile() {
    let points = build_profile(
        &symmetric(&[10.0, 20.0]),
        &[Some(0.0), Some(0.0)],
        RepeatMode::Repeat,
        &ResolveOptions::DEFAULT,
    );

    assert_eq!(offsets(&points), vec![0.0, 0.0, 1.0]);
    assert_eq!(lefts(&points), vec![10.0, 20.0, 20.0]);
}

#[test]
fn tiling_is_bounded() {
    let options = ResolveOptions::DEFAULT.with_max_control_points(50);
    let points = build_profile(
        &symmetric(&[10.0, 20.0]),
        &[Some(0.0), Some(0.001)],
        RepeatMode::Repeat,
        &options,
    );

    // The profile is still closed at the end of the path.
    assert_eq!(points.len(), 51);
    assert_eq!(points.last().map(|point| point.offset), Some(1.0));

    let mut prev = std::f32::NEG_INFINITY;
    for point in &points {
        assert!(point.offset >= prev);
        prev = point.offset;
    }
}

#[test]
fn tiling_never_decreases() {
    let points = build_profile(
        &symmetric(&[10.0, 20.0]),
        &[Some(0.0), Some(0.123_454)],
        RepeatMode::Repeat,
        &ResolveOptions::DEFAULT,
    );

    assert_eq!(&offsets(&points)[..3], &[0.0, 0.123_454, 0.123_454]);
    assert_eq!(&lefts(&points)[..3], &[10.0, 20.0, 10.0]);
    assert!(points[points.len() - 1].offset >= 1.0);
    for pair in points.windows(2) {
        assert!(pair[0].offset <= pair[1].offset, "{:?}", points);
    }
}

#[test]
fn tiny_constant_pattern_terminates() {
    for &length in &[0.000_000_001, 0.000_000_1] {
        let points = build_profile(
            &symmetric(&[10.0, 10.0]),
            &[Some(0.0), Some(length)],
            RepeatMode::Repeat,
            &ResolveOptions::DEFAULT,
        );

        assert!(points.len() <= ResolveOptions::DEFAULT_MAX_CONTROL_POINTS + 1);
        assert_eq!(points.last().map(|point| point.offset), Some(1.0));
        assert!(points.iter().all(|point| point.left == 10.0));
    }
}

#[test]
fn tiny_varying_pattern_is_bounded() {
    let points = build_profile(
        &symmetric(&[10.0, 20.0]),
        &[Some(0.0), Some(0.000_000_001)],
        RepeatMode::Repeat,
        &ResolveOptions::DEFAULT,
    );

    assert_eq!(points.len(), ResolveOptions::DEFAULT_MAX_CONTROL_POINTS + 1);
    assert_eq!(points.last().map(|point| point.offset), Some(1.0));
    for pair in points.windows(2) {
        assert!(pair[0].offset <= pair[1].offset);
    }
}
