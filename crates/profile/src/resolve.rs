use crate::attributes::{ParsedAttributes, StrokeWidthsAttributes};
use crate::cascade::Cascade;
use crate::context::{ContextError, ResolveContext};
use crate::parser::{Parser, Token, Tokenizer};
use crate::position::resolve_position;
use crate::profile::{build_profile, ControlPoint, PixelWidth, ResolveOptions};

/// The resolved width profile of a stroke.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ResolveResult {
    /// Non-decreasing offsets, starting at or before `0.0` and ending at or
    /// after `1.0`.
    pub widths: Vec<ControlPoint>,
    /// Names of the attributes that failed to parse, in evaluation order.
    pub parse_errors: Vec<String>,
}

/// Resolves the stroke-widths attributes of an element into a width profile.
///
/// Attributes that fail to parse are treated as absent and reported in
/// `parse_errors`. An error is only returned if the context provides invalid
/// metrics or path length.
///
/// # Examples
///
/// ```
/// use stroke_widths_profile::*;
/// use stroke_widths_profile::parser::Parser;
///
/// struct Style;
/// impl StyleResolver for Style {
///     fn base_stroke_width_px(&self) -> f32 { 7.0 }
///     fn em_size_px(&self) -> f32 { 16.0 }
///     fn ex_size_px(&self) -> f32 { 8.0 }
/// }
///
/// let mut attributes = StrokeWidthsAttributes::new();
/// attributes.set("stroke-widths", "abc");
///
/// let result = resolve_widths(
///     &attributes,
///     &Parser::new(),
///     &ResolveContext::new(&Style),
///     &ResolveOptions::DEFAULT,
/// ).unwrap();
///
/// assert_eq!(
///     result.widths,
///     vec![ControlPoint::new(0.0, 7.0, 7.0), ControlPoint::new(1.0, 7.0, 7.0)]
/// );
/// assert_eq!(result.parse_errors, vec!["stroke-widths".to_string()]);
/// ```
pub fn resolve_widths<T: Tokenizer>(
    attributes: &StrokeWidthsAttributes,
    parser: &Parser<T>,
    ctx: &ResolveContext,
    options: &ResolveOptions,
) -> Result<ResolveResult, ContextError> {
    let units = ctx.unit_context()?;
    ctx.path_length()?;

    let (parsed, failed) = ParsedAttributes::parse(attributes, parser);
    let cascade = Cascade::resolve(&parsed, Token::px(units.base_stroke_width));

    let widths: Vec<PixelWidth> = cascade
        .widths
        .iter()
        .map(|width| {
            PixelWidth::new(
                units.to_px(&width.left).unwrap_or(0.0),
                units.to_px(&width.right_or_left()).unwrap_or(0.0),
            )
        })
        .collect();

    let positions: Vec<Option<f32>> = cascade
        .positions
        .iter()
        .map(|position| {
            position
                .as_ref()
                .map(|position| resolve_position(position, &units, ctx.path))
        })
        .collect();

    Ok(ResolveResult {
        widths: build_profile(&widths, &positions, cascade.repeat, options),
        parse_errors: failed
            .iter()
            .map(|attribute| attribute.name().to_string())
            .collect(),
    })
}
