#![deny(bare_trait_objects)]

//! Variable width strokes from the `stroke-widths` attribute family.
//!
//! A variable width stroke is described by four attributes:
//!
//! - `stroke-widths-values`: a comma separated list of widths, each of which
//!   can be asymmetric (`<left> / <right>`),
//! - `stroke-widths-positions`: where along the path each width applies, as
//!   a percentage, a length or a path segment reference (`2.5seg`),
//! - `stroke-widths-repeat`: whether the pattern is tiled along the path,
//! - `stroke-widths`: a shorthand for the three above, for example
//!   `1px / 2px 10%, 30px 50%, 50px repeat`.
//!
//! Resolving them produces a profile: a sequence of control points with
//! non-decreasing offsets covering the `[0, 1]` range of the path, each
//! carrying the left and right widths in pixels.
//!
//! # Crates
//!
//! This meta-crate reexports the following sub-crates for convenience:
//!
//! * **stroke_widths_parser** - The attribute grammar.
//! * **stroke_widths_profile** - The cascade between attributes, unit
//!   conversion, position resolution and the profile builder.
//! * **stroke_widths_svg** - Path measurement and style metrics for SVG
//!   hosts (with the `svg` feature).
//!
//! # Feature flags
//!
//! * `svg`: reexports `stroke_widths_svg` as `stroke_widths::svg`.
//! * `serialization`: implements serde's `Serialize` and `Deserialize` for
//!   the parsed values and the resolved profile.
//!
//! # Examples
//!
//! ```
//! use stroke_widths::parser::Parser;
//! use stroke_widths::profile::*;
//!
//! struct Style;
//! impl StyleResolver for Style {
//!     fn base_stroke_width_px(&self) -> f32 { 1.0 }
//!     fn em_size_px(&self) -> f32 { 16.0 }
//!     fn ex_size_px(&self) -> f32 { 8.0 }
//! }
//!
//! let mut attributes = StrokeWidthsAttributes::new();
//! attributes.set("stroke-widths-values", "10px, 20px, 30px");
//! attributes.set("stroke-widths-positions", "50%");
//!
//! let result = resolve_widths(
//!     &attributes,
//!     &Parser::new(),
//!     &ResolveContext::new(&Style),
//!     &ResolveOptions::DEFAULT,
//! ).unwrap();
//!
//! let offsets: Vec<f32> = result.widths.iter().map(|p| p.offset).collect();
//! assert_eq!(offsets, vec![0.0, 0.5, 0.75, 1.0]);
//! ```

pub extern crate stroke_widths_parser;
pub extern crate stroke_widths_profile;
#[cfg(feature = "svg")]
pub extern crate stroke_widths_svg;

pub use stroke_widths_parser as parser;
pub use stroke_widths_profile as profile;
#[cfg(feature = "svg")]
pub use stroke_widths_svg as svg;
