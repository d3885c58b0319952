use crate::tokenizer::TokenizeError;
use thiserror::Error;

/// Errors which can occur when parsing one of the stroke-widths attributes.
///
/// A failure always concerns the whole attribute, no partial result is kept.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error("Unknown unit {unit:?}.")]
    UnknownUnit { unit: String },
    #[error("The seg unit is only allowed in positions.")]
    SegmentNotAllowed,
    #[error("Expected a unit after {value}.")]
    UnitlessNumber { value: f32 },
    #[error("Expected a finite number, got {value}.")]
    NonFinite { value: f32 },
    #[error("Expected a length or percentage, got {src}.")]
    Expected { src: String },
    #[error("Empty list item.")]
    EmptyItem,
    #[error("Expected at most two widths separated by a slash.")]
    TooManyWidths,
    #[error("Expected a width and at most one position.")]
    TooManyParts,
    #[error("Expected repeat or no-repeat, got {src:?}.")]
    InvalidRepeat { src: String },
}
