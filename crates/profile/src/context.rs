//! The host services a resolution depends on.

use crate::units::UnitContext;
use thiserror::Error;

/// Measures the path a stroke is applied to.
///
/// Only drawable segments are counted: move-to commands start a sub-path but
/// are not segments of their own.
pub trait PathMeasurement {
    /// Total length of the path.
    fn total_length(&self) -> f32;

    /// Number of drawable segments.
    fn drawable_segment_count(&self) -> usize;

    /// Length of the drawable segments before `index`, plus `fraction` times
    /// the length of the segment at `index`.
    fn length_up_to_segment(&self, index: usize, fraction: f32) -> f32;
}

/// Computed style of the stroked element.
pub trait StyleResolver {
    /// The computed `stroke-width`, in pixels.
    fn base_stroke_width_px(&self) -> f32;

    fn em_size_px(&self) -> f32;

    fn ex_size_px(&self) -> f32;
}

impl<'l, T: PathMeasurement + ?Sized> PathMeasurement for &'l T {
    fn total_length(&self) -> f32 {
        (**self).total_length()
    }

    fn drawable_segment_count(&self) -> usize {
        (**self).drawable_segment_count()
    }

    fn length_up_to_segment(&self, index: usize, fraction: f32) -> f32 {
        (**self).length_up_to_segment(index, fraction)
    }
}

impl<'l, T: StyleResolver + ?Sized> StyleResolver for &'l T {
    fn base_stroke_width_px(&self) -> f32 {
        (**self).base_stroke_width_px()
    }

    fn em_size_px(&self) -> f32 {
        (**self).em_size_px()
    }

    fn ex_size_px(&self) -> f32 {
        (**self).ex_size_px()
    }
}

/// A host precondition that doesn't hold.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum ContextError {
    #[error("Invalid base stroke width {0}.")]
    StrokeWidth(f32),
    #[error("Invalid font metrics (em: {em}, ex: {ex}).")]
    FontMetrics { em: f32, ex: f32 },
    #[error("Invalid path length {0}.")]
    PathLength(f32),
}

/// Everything a resolution reads from the host.
#[derive(Copy, Clone)]
pub struct ResolveContext<'l> {
    pub style: &'l dyn StyleResolver,
    /// `None` when the element has no path description.
    pub path: Option<&'l dyn PathMeasurement>,
}

impl<'l> ResolveContext<'l> {
    pub fn new(style: &'l dyn StyleResolver) -> Self {
        ResolveContext { style, path: None }
    }

    pub fn with_path(mut self, path: &'l dyn PathMeasurement) -> Self {
        self.path = Some(path);
        self
    }

    /// Snapshots and validates the style metrics.
    pub fn unit_context(&self) -> Result<UnitContext, ContextError> {
        let base_stroke_width = self.style.base_stroke_width_px();
        if !is_valid_size(base_stroke_width) {
            return Err(ContextError::StrokeWidth(base_stroke_width));
        }

        let em = self.style.em_size_px();
        let ex = self.style.ex_size_px();
        if !is_valid_size(em) || !is_valid_size(ex) {
            return Err(ContextError::FontMetrics { em, ex });
        }

        Ok(UnitContext {
            em,
            ex,
            base_stroke_width,
        })
    }

    /// The total path length, `0.0` without a path description.
    pub fn path_length(&self) -> Result<f32, ContextError> {
        let length = self.path.map_or(0.0, |path| path.total_length());
        if !is_valid_size(length) {
            return Err(ContextError::PathLength(length));
        }

        Ok(length)
    }
}

fn is_valid_size(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
struct Metrics(f32, f32, f32);

#[cfg(test)]
impl StyleResolver for Metrics {
    fn base_stroke_width_px(&self) -> f32 {
        self.0
    }
    fn em_size_px(&self) -> f32 {
        self.1
    }
    fn ex_size_px(&self) -> f32 {
        self.2
    }
}

#[test]
fn validates_metrics() {
    let style = Metrics(7.0, 16.0, 8.0);
    let ctx = ResolveContext::new(&style);
    assert_eq!(
        ctx.unit_context(),
        Ok(UnitContext {
            em: 16.0,
            ex: 8.0,
            base_stroke_width: 7.0
        })
    );
    assert_eq!(ctx.path_length(), Ok(0.0));

    let style = Metrics(std::f32::NAN, 16.0, 8.0);
    assert!(matches!(
        ResolveContext::new(&style).unit_context(),
        Err(ContextError::StrokeWidth(_))
    ));

    let style = Metrics(1.0, -16.0, 8.0);
    assert!(matches!(
        ResolveContext::new(&style).unit_context(),
        Err(ContextError::FontMetrics { .. })
    ));
}
