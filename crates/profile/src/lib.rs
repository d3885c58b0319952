#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Resolution of the `stroke-widths` attributes into a width profile.
//!
//! A profile is a sequence of [`ControlPoint`]s, each giving the left and
//! right stroke widths in pixels at an offset expressed as a fraction of the
//! path length. Resolving goes through the following steps:
//!
//! 1. Each attribute is parsed independently. Attributes that fail to parse
//!    are reported and otherwise ignored.
//! 2. The cascade picks the effective widths, positions and repeat mode:
//!    `stroke-widths-values` overrides the `stroke-widths` shorthand, which
//!    overrides the element's `stroke-width`. Positions come from
//!    `stroke-widths-positions` when the widths come from
//!    `stroke-widths-values`, and from the shorthand otherwise.
//!    `stroke-widths-repeat` overrides the shorthand's repeat keyword, which
//!    only applies along with the shorthand's widths.
//! 3. Widths are converted to pixels and positions to path fractions using
//!    the host's [`StyleResolver`] and [`PathMeasurement`].
//! 4. The profile builder fills in missing positions, keeps the offsets
//!    non-decreasing, covers the `[0, 1]` range and tiles repeating patterns.
//!
//! This crate is reexported in `stroke_widths`.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate stroke_widths_parser as parser;

mod attributes;
mod cascade;
mod context;
mod position;
mod profile;
mod resolve;
mod units;

#[cfg(test)]
mod resolve_tests;

#[doc(inline)]
pub use crate::attributes::{Attribute, ParsedAttributes, StrokeWidthsAttributes};
#[doc(inline)]
pub use crate::cascade::{Cascade, WidthSource};
#[doc(inline)]
pub use crate::context::{ContextError, PathMeasurement, ResolveContext, StyleResolver};
pub use crate::position::{resolve_position, segment_ref_to_length};
#[doc(inline)]
pub use crate::profile::{build_profile, ControlPoint, PixelWidth, ResolveOptions};
pub use crate::resolve::{resolve_widths, ResolveResult};
pub use crate::units::{UnitContext, PX_PER_CM, PX_PER_IN, PX_PER_MM, PX_PER_PC, PX_PER_PT};
