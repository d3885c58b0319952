//! Mapping positions to fractions of the path length.

use crate::context::PathMeasurement;
use crate::parser::{Token, Unit};
use crate::units::UnitContext;

/// Converts a segment reference such as `2.5seg` to a distance along the path.
///
/// The integer part selects a drawable segment and the fractional part
/// interpolates along it. References at or past the last segment map to the
/// full length, non-positive references map to zero.
pub fn segment_ref_to_length(segment_ref: f32, path: &dyn PathMeasurement) -> f32 {
    if !(segment_ref > 0.0) {
        return 0.0;
    }

    let index = segment_ref.floor();
    let fraction = segment_ref - index;
    let index = index as usize;

    if index >= path.drawable_segment_count() {
        return path.total_length();
    }

    path.length_up_to_segment(index, fraction)
}

/// Resolves a position to a fraction of the total path length.
///
/// The result is not clamped. Without a path, or with an empty one, every
/// position that isn't a percentage resolves to `0.0`.
pub fn resolve_position(
    position: &Token,
    units: &UnitContext,
    path: Option<&dyn PathMeasurement>,
) -> f32 {
    if position.unit == Unit::Percent {
        return position.value / 100.0;
    }

    let path = match path {
        Some(path) => path,
        None => return 0.0,
    };
    let path_length = path.total_length();
    if !(path_length > 0.0) {
        return 0.0;
    }

    let distance = match position.unit {
        Unit::Seg => segment_ref_to_length(position.value, path),
        _ => units.to_px(position).unwrap_or(0.0),
    };

    distance / path_length
}

#[cfg(test)]
pub(crate) struct Polyline {
    pub segments: Vec<f32>,
}

#[cfg(test)]
impl PathMeasurement for Polyline {
    fn total_length(&self) -> f32 {
        self.segments.iter().sum()
    }

    fn drawable_segment_count(&self) -> usize {
        self.segments.len()
    }

    fn length_up_to_segment(&self, index: usize, fraction: f32) -> f32 {
        let before: f32 = self.segments[..index].iter().sum();
        before + fraction * self.segments[index]
    }
}

#[cfg(test)]
const UNITS: UnitContext = UnitContext {
    em: 16.0,
    ex: 8.0,
    base_stroke_width: 7.0,
};

#[test]
fn percentages_ignore_the_path() {
    assert_eq!(resolve_position(&Token::percent(50.0), &UNITS, None), 0.5);
    assert_eq!(resolve_position(&Token::percent(-20.0), &UNITS, None), -0.2);
    assert_eq!(resolve_position(&Token::percent(120.0), &UNITS, None), 1.2);
}

#[test]
fn no_path() {
    assert_eq!(resolve_position(&Token::px(10.0), &UNITS, None), 0.0);
    assert_eq!(resolve_position(&Token::seg(1.0), &UNITS, None), 0.0);

    let empty = Polyline { segments: vec![] };
    assert_eq!(resolve_position(&Token::px(10.0), &UNITS, Some(&empty)), 0.0);
    assert_eq!(resolve_position(&Token::seg(1.0), &UNITS, Some(&empty)), 0.0);
}

#[test]
fn lengths() {
    let path = Polyline {
        segments: vec![100.0],
    };

    assert_eq!(resolve_position(&Token::px(1.0), &UNITS, Some(&path)), 0.01);
    assert_eq!(
        resolve_position(&Token::new(3.0, Unit::Em), &UNITS, Some(&path)),
        0.48
    );
    assert_eq!(resolve_position(&Token::zero(), &UNITS, Some(&path)), 0.0);
    assert_eq!(resolve_position(&Token::px(-50.0), &UNITS, Some(&path)), -0.5);
}

#[test]
fn segment_references() {
    // M0 0 h100 v50 h-50
    let path = Polyline {
        segments: vec![100.0, 50.0, 50.0],
    };

    let resolve = |value: f32| resolve_position(&Token::seg(value), &UNITS, Some(&path));

    assert_eq!(resolve(0.5), 0.25);
    assert_eq!(resolve(2.0), 0.75);
    assert_eq!(resolve(2.5), 0.875);
    assert_eq!(resolve(0.0), 0.0);
    assert_eq!(resolve(-1.5), 0.0);
    assert_eq!(resolve(3.0), 1.0);
    assert_eq!(resolve(7.25), 1.0);
}
