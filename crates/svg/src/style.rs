//! Style metrics for SVG hosts.

use crate::profile::parser::{Token, Unit};
use crate::profile::{StyleResolver, UnitContext};

use std::str::FromStr;
use svgtypes::{Length, LengthUnit};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error(transparent)]
    Syntax(#[from] svgtypes::Error),
    #[error("Percentage stroke widths depend on the viewport.")]
    RelativeStrokeWidth,
    #[error("Invalid stroke width {0}.")]
    InvalidStrokeWidth(f32),
    #[error("Invalid font size {0}.")]
    InvalidFontSize(f32),
}

/// Computed style of a stroked element, for hosts without a style engine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleContext {
    /// Size of `1em`, in pixels.
    pub font_size: f32,
    /// Size of `1ex`, in pixels.
    pub x_height: f32,
    /// The computed `stroke-width`, in pixels.
    pub stroke_width: f32,
}

impl StyleContext {
    pub const DEFAULT_FONT_SIZE: f32 = 16.0;
    pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

    pub const DEFAULT: Self = StyleContext {
        font_size: Self::DEFAULT_FONT_SIZE,
        x_height: Self::DEFAULT_FONT_SIZE / 2.0,
        stroke_width: Self::DEFAULT_STROKE_WIDTH,
    };

    /// Sets the font size, and the x-height to half of it.
    pub fn with_font_size(mut self, font_size: f32) -> Result<Self, StyleError> {
        if !(font_size.is_finite() && font_size >= 0.0) {
            return Err(StyleError::InvalidFontSize(font_size));
        }

        self.font_size = font_size;
        self.x_height = font_size / 2.0;
        Ok(self)
    }

    pub fn with_x_height(mut self, x_height: f32) -> Result<Self, StyleError> {
        if !(x_height.is_finite() && x_height >= 0.0) {
            return Err(StyleError::InvalidFontSize(x_height));
        }

        self.x_height = x_height;
        Ok(self)
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Result<Self, StyleError> {
        if !(stroke_width.is_finite() && stroke_width >= 0.0) {
            return Err(StyleError::InvalidStrokeWidth(stroke_width));
        }

        self.stroke_width = stroke_width;
        Ok(self)
    }

    /// Sets the stroke width from an SVG `stroke-width` value such as `3`,
    /// `2mm` or `0.5em`.
    ///
    /// Font relative units use the current font metrics, so set those first.
    pub fn with_stroke_width_str(self, src: &str) -> Result<Self, StyleError> {
        let length = Length::from_str(src.trim())?;
        let unit = match length.unit {
            // User units are pixels.
            LengthUnit::None | LengthUnit::Px => Unit::Px,
            LengthUnit::Em => Unit::Em,
            LengthUnit::Ex => Unit::Ex,
            LengthUnit::In => Unit::In,
            LengthUnit::Cm => Unit::Cm,
            LengthUnit::Mm => Unit::Mm,
            LengthUnit::Pt => Unit::Pt,
            LengthUnit::Pc => Unit::Pc,
            LengthUnit::Percent => return Err(StyleError::RelativeStrokeWidth),
        };

        let units = UnitContext {
            em: self.font_size,
            ex: self.x_height,
            base_stroke_width: self.stroke_width,
        };
        let px = units
            .to_px(&Token::new(length.number as f32, unit))
            .unwrap_or(0.0);

        self.with_stroke_width(px)
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StyleResolver for StyleContext {
    fn base_stroke_width_px(&self) -> f32 {
        self.stroke_width
    }

    fn em_size_px(&self) -> f32 {
        self.font_size
    }

    fn ex_size_px(&self) -> f32 {
        self.x_height
    }
}

#[test]
fn defaults() {
    let style = StyleContext::default();
    assert_eq!(style.em_size_px(), 16.0);
    assert_eq!(style.ex_size_px(), 8.0);
    assert_eq!(style.base_stroke_width_px(), 1.0);

    let style = StyleContext::DEFAULT.with_font_size(20.0).unwrap();
    assert_eq!(style.ex_size_px(), 10.0);
}

#[test]
fn stroke_width_values() {
    let style = StyleContext::DEFAULT;
    let width = |src: &str| {
        style
            .with_stroke_width_str(src)
            .map(|style| style.stroke_width)
            .ok()
    };

    assert_eq!(width("7"), Some(7.0));
    assert_eq!(width("7px"), Some(7.0));
    assert_eq!(width(" 1in "), Some(96.0));
    assert_eq!(width("2em"), Some(32.0));
    assert_eq!(width("3ex"), Some(24.0));
    assert_eq!(width("6pc"), Some(96.0));
    assert_eq!(width("50%"), None);
    assert_eq!(width("-2px"), None);
    assert_eq!(width("wide"), None);
}
