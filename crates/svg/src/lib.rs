#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! SVG implementations of the services a stroke-widths resolution reads
//! from its host.
//!
//! - [`SvgPath`] measures path data (the `d` attribute) and provides the
//!   drawable segment lengths `seg` positions refer to.
//! - [`StyleContext`] provides the font metrics and the base stroke width.
//!
//! This crate is reexported in `stroke_widths` with the `svg` feature.
//!
//! # Examples
//!
//! ```
//! use stroke_widths_svg::{SvgPath, SvgPathOptions, StyleContext};
//! use stroke_widths_svg::profile::*;
//! use stroke_widths_svg::profile::parser::Parser;
//!
//! let path = SvgPath::parse("M0 0h100v50h-50", &SvgPathOptions::DEFAULT).unwrap();
//! let style = StyleContext::DEFAULT.with_stroke_width_str("7px").unwrap();
//!
//! let mut attributes = StrokeWidthsAttributes::new();
//! attributes.set("stroke-widths", "2px, 4px 1seg, 2px");
//!
//! let ctx = ResolveContext::new(&style).with_path(&path);
//! let result = resolve_widths(&attributes, &Parser::new(), &ctx, &ResolveOptions::DEFAULT).unwrap();
//!
//! assert_eq!(result.widths[1], ControlPoint::new(0.5, 4.0, 4.0));
//! ```

pub extern crate lyon_geom as geom;
pub extern crate stroke_widths_profile as profile;
pub extern crate svgtypes;

mod path;
mod style;

pub use crate::path::{SvgPath, SvgPathError, SvgPathOptions};
pub use crate::style::{StyleContext, StyleError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::parser::Parser;
    use crate::profile::{resolve_widths, ControlPoint, ResolveContext, ResolveOptions};
    use crate::profile::{ResolveResult, StrokeWidthsAttributes};

    fn resolve(d: &str, attributes: &[(&str, &str)]) -> ResolveResult {
        let path = SvgPath::parse(d, &SvgPathOptions::DEFAULT).unwrap();
        let style = StyleContext::DEFAULT.with_stroke_width(7.0).unwrap();
        let attributes = StrokeWidthsAttributes::from_pairs(attributes.iter().copied());
        let ctx = ResolveContext::new(&style).with_path(&path);

        resolve_widths(&attributes, &Parser::new(), &ctx, &ResolveOptions::DEFAULT).unwrap()
    }

    fn rounded_offsets(result: &ResolveResult) -> Vec<f32> {
        result
            .widths
            .iter()
            .map(|point| (point.offset * 1e4).round() / 1e4)
            .collect()
    }

    #[test]
    fn segment_positions() {
        let result = resolve(
            "M0 0h100v50h-50",
            &[
                ("stroke-widths-values", "1px, 1px, 1px"),
                ("stroke-widths-positions", "0.5seg, 2seg, 2.5seg"),
            ],
        );

        assert_eq!(rounded_offsets(&result), vec![0.0, 0.25, 0.75, 0.875, 1.0]);
        assert!(result.parse_errors.is_empty());
    }

    #[test]
    fn segment_positions_past_the_end() {
        let result = resolve(
            "M0 0h100v50h-50",
            &[
                ("stroke-widths-values", "1px, 2px, 3px"),
                ("stroke-widths-positions", "-1seg, 1seg, 12seg"),
            ],
        );

        assert_eq!(rounded_offsets(&result), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn length_positions() {
        let result = resolve(
            "M0 0h100",
            &[
                ("stroke-widths-values", "1px, 1px, 1px"),
                ("stroke-widths-positions", "1px, 0.4in, 3em"),
            ],
        );

        assert_eq!(
            rounded_offsets(&result),
            vec![0.0, 0.01, 0.384, 0.48, 1.0]
        );
    }

    #[test]
    fn move_to_commands_are_not_segments() {
        let result = resolve(
            "M0 0h100M0 50h100",
            &[
                ("stroke-widths-values", "1px, 2px"),
                ("stroke-widths-positions", "1seg, 1.5seg"),
            ],
        );

        assert_eq!(
            result.widths,
            vec![
                ControlPoint::new(0.0, 1.0, 1.0),
                ControlPoint::new(0.5, 1.0, 1.0),
                ControlPoint::new(0.75, 2.0, 2.0),
                ControlPoint::new(1.0, 2.0, 2.0),
            ]
        );
    }

    #[test]
    fn empty_path_data() {
        let result = resolve(
            "",
            &[
                ("stroke-widths-values", "1px, 2px"),
                ("stroke-widths-positions", "10px, 50%"),
            ],
        );

        assert_eq!(rounded_offsets(&result), vec![0.0, 0.5, 1.0]);
    }
}
