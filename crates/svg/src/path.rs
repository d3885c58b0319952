//! Measurement of SVG path data.

use crate::geom::{point, vector, Angle, ArcFlags, CubicBezierSegment, LineSegment, Point};
use crate::geom::{QuadraticBezierSegment, SvgArc};
use crate::profile::PathMeasurement;

use std::str::FromStr;
use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

/// Parameters for the measurement of curves.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct SvgPathOptions {
    /// Maximum allowed distance to the path when approximating curves.
    ///
    /// Default value: `SvgPathOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl SvgPathOptions {
    pub const DEFAULT_TOLERANCE: f32 = 0.01;

    pub const DEFAULT: Self = SvgPathOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for SvgPathOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Error, Debug)]
pub enum SvgPathError {
    #[error(transparent)]
    Syntax(#[from] svgtypes::Error),
    #[error("Path data must start with a move-to command.")]
    MissingMoveTo,
    #[error("Invalid tolerance {0}.")]
    Tolerance(f32),
}

/// The drawable segments of an SVG path, with their lengths.
///
/// Every path data command except move-to is a drawable segment, including
/// close-path which is measured as a line back to the start of the sub-path.
///
/// # Examples
///
/// ```
/// use stroke_widths_svg::{SvgPath, SvgPathOptions};
/// use stroke_widths_svg::profile::PathMeasurement;
///
/// let path = SvgPath::parse("M0 0h100v50h-50", &SvgPathOptions::DEFAULT).unwrap();
///
/// assert_eq!(path.drawable_segment_count(), 3);
/// assert_eq!(path.total_length(), 200.0);
/// assert_eq!(path.length_up_to_segment(2, 0.5), 175.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgPath {
    segments: Vec<f32>,
    length: f32,
}

impl SvgPath {
    pub fn parse(d: &str, options: &SvgPathOptions) -> Result<Self, SvgPathError> {
        if !(options.tolerance > 0.0) {
            return Err(SvgPathError::Tolerance(options.tolerance));
        }

        let mut measure = Measure::new(options.tolerance);
        for segment in PathParser::from(d) {
            measure.segment(&segment?)?;
        }

        let length: f32 = measure.segments.iter().sum();
        log::trace!(
            "Measured {} drawable segments, length {}",
            measure.segments.len(),
            length
        );

        Ok(SvgPath {
            segments: measure.segments,
            length,
        })
    }

    /// Lengths of the drawable segments, in order.
    pub fn segment_lengths(&self) -> &[f32] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for SvgPath {
    type Err = SvgPathError;

    fn from_str(d: &str) -> Result<Self, SvgPathError> {
        SvgPath::parse(d, &SvgPathOptions::DEFAULT)
    }
}

impl PathMeasurement for SvgPath {
    fn total_length(&self) -> f32 {
        self.length
    }

    fn drawable_segment_count(&self) -> usize {
        self.segments.len()
    }

    fn length_up_to_segment(&self, index: usize, fraction: f32) -> f32 {
        if index >= self.segments.len() {
            return self.length;
        }

        let before: f32 = self.segments[..index].iter().sum();
        before + fraction * self.segments[index]
    }
}

/// Tracks the current position while walking the path data, converting
/// relative and smooth commands into absolute geometry.
struct Measure {
    tolerance: f32,
    segments: Vec<f32>,
    current: Point<f32>,
    first: Point<f32>,
    started: bool,
    prev_cubic_ctrl: Option<Point<f32>>,
    prev_quadratic_ctrl: Option<Point<f32>>,
}

impl Measure {
    fn new(tolerance: f32) -> Self {
        Measure {
            tolerance,
            segments: Vec::new(),
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
            started: false,
            prev_cubic_ctrl: None,
            prev_quadratic_ctrl: None,
        }
    }

    fn to_point(&self, abs: bool, x: f64, y: f64) -> Point<f32> {
        let p = point(x as f32, y as f32);
        if abs {
            p
        } else {
            self.current + p.to_vector()
        }
    }

    fn smooth_ctrl(&self, prev_ctrl: Option<Point<f32>>) -> Point<f32> {
        match prev_ctrl {
            Some(ctrl) => self.current + (self.current - ctrl),
            None => self.current,
        }
    }

    fn segment(&mut self, segment: &PathSegment) -> Result<(), SvgPathError> {
        if !self.started {
            match *segment {
                PathSegment::MoveTo { .. } => {}
                _ => return Err(SvgPathError::MissingMoveTo),
            }
        }

        let mut cubic_ctrl = None;
        let mut quadratic_ctrl = None;

        match *segment {
            PathSegment::MoveTo { abs, x, y } => {
                let to = self.to_point(abs, x, y);
                self.first = to;
                self.current = to;
                self.started = true;
            }
            PathSegment::LineTo { abs, x, y } => {
                let to = self.to_point(abs, x, y);
                self.line_to(to);
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let mut x = x as f32;
                if !abs {
                    x += self.current.x;
                }
                self.line_to(point(x, self.current.y));
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let mut y = y as f32;
                if !abs {
                    y += self.current.y;
                }
                self.line_to(point(self.current.x, y));
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let ctrl1 = self.to_point(abs, x1, y1);
                let ctrl2 = self.to_point(abs, x2, y2);
                let to = self.to_point(abs, x, y);
                self.cubic_bezier_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl1 = self.smooth_ctrl(self.prev_cubic_ctrl);
                let ctrl2 = self.to_point(abs, x2, y2);
                let to = self.to_point(abs, x, y);
                self.cubic_bezier_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = self.to_point(abs, x1, y1);
                let to = self.to_point(abs, x, y);
                self.quadratic_bezier_to(ctrl, to);
                quadratic_ctrl = Some(ctrl);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = self.smooth_ctrl(self.prev_quadratic_ctrl);
                let to = self.to_point(abs, x, y);
                self.quadratic_bezier_to(ctrl, to);
                quadratic_ctrl = Some(ctrl);
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let to = self.to_point(abs, x, y);
                let svg_arc = SvgArc {
                    from: self.current,
                    to,
                    radii: vector(rx as f32, ry as f32),
                    x_rotation: Angle::degrees(x_axis_rotation as f32),
                    flags: ArcFlags { large_arc, sweep },
                };
                self.arc_to(&svg_arc);
            }
            PathSegment::ClosePath { .. } => {
                let first = self.first;
                self.line_to(first);
            }
        }

        self.prev_cubic_ctrl = cubic_ctrl;
        self.prev_quadratic_ctrl = quadratic_ctrl;

        Ok(())
    }

    fn push(&mut self, length: f32, to: Point<f32>) {
        self.segments.push(length);
        self.current = to;
    }

    fn line_to(&mut self, to: Point<f32>) {
        let length = LineSegment {
            from: self.current,
            to,
        }
        .length();
        self.push(length, to);
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point<f32>, to: Point<f32>) {
        let length = QuadraticBezierSegment {
            from: self.current,
            ctrl,
            to,
        }
        .length();
        self.push(length, to);
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point<f32>, ctrl2: Point<f32>, to: Point<f32>) {
        let length = CubicBezierSegment {
            from: self.current,
            ctrl1,
            ctrl2,
            to,
        }
        .approximate_length(self.tolerance);
        self.push(length, to);
    }

    fn arc_to(&mut self, svg_arc: &SvgArc<f32>) {
        if svg_arc.is_straight_line() {
            self.line_to(svg_arc.to);
            return;
        }

        let mut length = 0.0;
        svg_arc.to_arc().for_each_quadratic_bezier(&mut |curve| {
            length += curve.length();
        });
        self.push(length, svg_arc.to);
    }
}

#[cfg(test)]
fn measure(d: &str) -> SvgPath {
    SvgPath::parse(d, &SvgPathOptions::DEFAULT).unwrap()
}

#[cfg(test)]
fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn lines() {
    let path = measure("M0 0h100v50h-50");
    assert_eq!(path.segment_lengths(), &[100.0, 50.0, 50.0]);
    assert_eq!(path.total_length(), 200.0);

    // Same path, absolute commands.
    assert_eq!(measure("M0 0 H100 V50 H50"), path);
    assert_eq!(measure("M 0,0 L 100,0 L 100,50 L 50,50"), path);
}

#[test]
fn empty_path_data() {
    let path = measure("");
    assert!(path.is_empty());
    assert_eq!(path.total_length(), 0.0);
    assert_eq!(path.drawable_segment_count(), 0);
}

#[test]
fn move_to_is_not_a_segment() {
    let path = measure("M0 0h10M50 50m10 0h10");
    assert_eq!(path.segment_lengths(), &[10.0, 10.0]);
}

#[test]
fn close_path_is_a_segment() {
    let path = measure("M0 0h30v40z");
    assert_eq!(path.segment_lengths(), &[30.0, 40.0, 50.0]);

    // Drawing continues from the start of the closed sub-path.
    let path = measure("M0 0h30v40zh10");
    assert_eq!(path.segment_lengths(), &[30.0, 40.0, 50.0, 10.0]);
}

#[test]
fn curves() {
    // Degenerate curves along a straight line.
    let path = measure("M0 0Q50 0 100 0");
    assert!(approx_eq(path.total_length(), 100.0));

    let path = measure("M0 0C25 0 75 0 100 0");
    assert!(approx_eq(path.total_length(), 100.0));

    // Smooth curves reflect the previous control point.
    let path = measure("M0 0Q50 0 100 0T200 0");
    assert_eq!(path.drawable_segment_count(), 2);
    assert!(approx_eq(path.total_length(), 200.0));

    let path = measure("M0 0C0 50 100 50 100 0S200 -50 200 0");
    let first = path.segment_lengths()[0];
    assert!(approx_eq(path.segment_lengths()[1], first));
}

#[test]
fn arcs() {
    // Half circle of radius 50.
    let path = measure("M0 0A50 50 0 0 1 100 0");
    assert_eq!(path.drawable_segment_count(), 1);
    assert!((path.total_length() - std::f32::consts::PI * 50.0).abs() < 0.5);

    // Zero radius arcs are straight lines.
    let path = measure("M0 0a0 0 0 0 1 100 0");
    assert_eq!(path.total_length(), 100.0);
}

#[test]
fn segment_lengths() {
    let path = measure("M0 0h100v50h-50");
    assert_eq!(path.length_up_to_segment(0, 0.5), 50.0);
    assert_eq!(path.length_up_to_segment(2, 0.0), 150.0);
    assert_eq!(path.length_up_to_segment(2, 0.5), 175.0);
    assert_eq!(path.length_up_to_segment(3, 0.0), 200.0);
}

#[test]
fn invalid_path_data() {
    assert!(matches!(
        SvgPath::parse("M0 0 L10", &SvgPathOptions::DEFAULT),
        Err(SvgPathError::Syntax(_))
    ));
    assert!(SvgPath::parse("M0 0", &SvgPathOptions::tolerance(0.0)).is_err());
    assert!("L10 10".parse::<SvgPath>().is_err());
}
