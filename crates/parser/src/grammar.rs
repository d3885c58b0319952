//! Recursive descent parsing of the four stroke-widths attributes.
//!
//! # Syntax
//!
//! ```text
//! stroke-widths-values:    [ <length-percentage> [ / <length-percentage> ]? ]#
//! stroke-widths-positions: [ <length-percentage> | <seg> ]#
//! stroke-widths-repeat:    repeat | no-repeat
//! stroke-widths:           [ <length-percentage> [ / <length-percentage> ]? [ <length-percentage> | <seg> ]? ]# [ repeat | no-repeat ]?
//! ```
//!
//! Lengths use the `em`, `ex`, `cm`, `mm`, `in`, `px`, `pt` and `pc` units, and
//! `0` is the only number allowed without a unit. Empty values, lists and
//! shorthands parse to empty lists.

use crate::error::ParseError;
use crate::token::*;
use crate::tokenizer::{Component, CssTokenizer, Tokenizer};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AllowedUnits {
    DontAllowSeg,
    AllowSeg,
}

/// Parses the stroke-widths attributes using a pluggable [`Tokenizer`].
///
/// ```
/// use stroke_widths_parser::{Parser, RepeatMode, Token};
///
/// let parser = Parser::new();
/// let shorthand = parser.parse_widths_shorthand("1px / 2px 10%, 30px repeat").unwrap();
///
/// assert_eq!(shorthand.widths.len(), 2);
/// assert_eq!(shorthand.widths[0].right, Some(Token::px(2.0)));
/// assert_eq!(shorthand.widths[0].position, Some(Token::percent(10.0)));
/// assert_eq!(shorthand.widths[1].position, None);
/// assert_eq!(shorthand.repeat_mode, Some(RepeatMode::Repeat));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser<T = CssTokenizer> {
    tokenizer: T,
}

impl Parser<CssTokenizer> {
    pub fn new() -> Self {
        Parser {
            tokenizer: CssTokenizer,
        }
    }
}

impl<T: Tokenizer> Parser<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Parser { tokenizer }
    }

    /// Parses `stroke-widths-values`.
    pub fn parse_widths_values(&self, text: &str) -> Result<Vec<WidthSpec>, ParseError> {
        let components = self.tokenize(text)?;
        list_items(&components)
            .map(|item| -> Result<WidthSpec, ParseError> {
                let mut cursor = Cursor::new(item)?;
                let width = cursor.width()?;
                cursor.finish()?;
                Ok(width)
            })
            .collect()
    }

    /// Parses `stroke-widths-positions`.
    pub fn parse_widths_positions(&self, text: &str) -> Result<Vec<Token>, ParseError> {
        let components = self.tokenize(text)?;
        list_items(&components)
            .map(|item| -> Result<Token, ParseError> {
                let mut cursor = Cursor::new(item)?;
                let position = cursor.length(AllowedUnits::AllowSeg)?;
                cursor.finish()?;
                Ok(position)
            })
            .collect()
    }

    /// Parses `stroke-widths-repeat`.
    ///
    /// Only the exact keywords are accepted, the empty string is an error.
    pub fn parse_widths_repeat(&self, text: &str) -> Result<RepeatMode, ParseError> {
        repeat_keyword(text).ok_or_else(|| ParseError::InvalidRepeat {
            src: text.to_string(),
        })
    }

    /// Parses the `stroke-widths` shorthand.
    pub fn parse_widths_shorthand(&self, text: &str) -> Result<ParsedShorthand, ParseError> {
        let components = self.tokenize(text)?;
        let (list, repeat_mode) = split_repeat_keyword(&components);

        let widths = if list.iter().all(Component::is_whitespace) {
            Vec::new()
        } else {
            list.split(|c| *c == Component::Comma)
                .map(|item| -> Result<WidthPositionPair, ParseError> {
                    Cursor::new(item)?.width_and_position()
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(ParsedShorthand {
            widths,
            repeat_mode,
        })
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Component>, ParseError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.tokenizer.tokenize(text)?)
    }
}

fn repeat_keyword(text: &str) -> Option<RepeatMode> {
    [RepeatMode::Repeat, RepeatMode::NoRepeat]
        .iter()
        .copied()
        .find(|mode| mode.keyword() == text)
}

fn list_items(components: &[Component]) -> impl Iterator<Item = &[Component]> {
    // An empty component list is an empty list, not a list with one empty item.
    let count = if components.is_empty() { 0 } else { usize::MAX };
    components
        .split(|c| *c == Component::Comma)
        .take(count)
}

/// Splits a trailing `repeat`/`no-repeat` keyword off the shorthand.
///
/// The keyword must be the last component and be preceded by whitespace, or
/// be the only component.
fn split_repeat_keyword(components: &[Component]) -> (&[Component], Option<RepeatMode>) {
    let end = components
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let components = &components[..end];

    if let Some((Component::Ident(keyword), list)) = components.split_last() {
        let separated = match list.last() {
            None | Some(Component::Whitespace) => true,
            Some(_) => false,
        };
        if separated {
            if let Some(mode) = repeat_keyword(keyword) {
                return (list, Some(mode));
            }
        }
    }

    (components, None)
}

// Walks the components of a single list item.
struct Cursor<'l> {
    components: &'l [Component],
    idx: usize,
}

impl<'l> Cursor<'l> {
    fn new(item: &'l [Component]) -> Result<Self, ParseError> {
        if item.iter().all(Component::is_whitespace) {
            return Err(ParseError::EmptyItem);
        }

        Ok(Cursor {
            components: item,
            idx: 0,
        })
    }

    fn peek(&self) -> Option<&'l Component> {
        self.components.get(self.idx)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.idx;
        while self.peek().map_or(false, Component::is_whitespace) {
            self.idx += 1;
        }

        self.idx > start
    }

    fn length(&mut self, allowed: AllowedUnits) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let component = self.peek().ok_or_else(|| ParseError::Expected {
            src: "end of item".to_string(),
        })?;
        let token = length_or_percentage(component, allowed)?;
        self.idx += 1;

        Ok(token)
    }

    // <length-percentage> [ / <length-percentage> ]?
    fn width(&mut self) -> Result<WidthSpec, ParseError> {
        let left = self.length(AllowedUnits::DontAllowSeg)?;
        self.skip_whitespace();

        let right = if self.peek() == Some(&Component::Slash) {
            self.idx += 1;
            Some(self.length(AllowedUnits::DontAllowSeg)?)
        } else {
            None
        };

        Ok(WidthSpec { left, right })
    }

    fn width_and_position(&mut self) -> Result<WidthPositionPair, ParseError> {
        let width = self.width()?;

        // A position must be separated from the width by whitespace.
        let separated = self.skip_whitespace()
            || (self.idx > 0 && self.components[self.idx - 1].is_whitespace());
        let position = match self.peek() {
            None => None,
            Some(Component::Slash) => return Err(ParseError::TooManyWidths),
            Some(Component::Number { .. }) if separated => {
                Some(self.length(AllowedUnits::AllowSeg)?)
            }
            Some(Component::Number { .. }) => return Err(ParseError::TooManyParts),
            Some(other) => {
                return Err(ParseError::Expected {
                    src: other.to_string(),
                })
            }
        };

        self.finish()?;

        Ok(WidthPositionPair {
            left: width.left,
            right: width.right,
            position,
        })
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(Component::Slash) => Err(ParseError::TooManyWidths),
            Some(_) => Err(ParseError::TooManyParts),
        }
    }
}

fn length_or_percentage(component: &Component, allowed: AllowedUnits) -> Result<Token, ParseError> {
    let (value, unit_name) = match component {
        Component::Number { value, unit } => (*value, unit),
        other => {
            return Err(ParseError::Expected {
                src: other.to_string(),
            })
        }
    };

    if !value.is_finite() {
        return Err(ParseError::NonFinite { value });
    }

    let unit = Unit::from_name(unit_name).ok_or_else(|| ParseError::UnknownUnit {
        unit: unit_name.clone(),
    })?;

    match unit {
        Unit::None if value != 0.0 => Err(ParseError::UnitlessNumber { value }),
        Unit::Seg if allowed == AllowedUnits::DontAllowSeg => Err(ParseError::SegmentNotAllowed),
        _ => Ok(Token::new(value, unit)),
    }
}

#[cfg(test)]
fn pair(left: Token, right: Option<Token>, position: Option<Token>) -> WidthPositionPair {
    WidthPositionPair {
        left,
        right,
        position,
    }
}

#[test]
fn values() {
    let parser = Parser::new();

    assert_eq!(
        parser.parse_widths_values("10px").unwrap(),
        vec![WidthSpec::symmetric(Token::px(10.0))]
    );
    assert_eq!(
        parser.parse_widths_values("10px / 20px, 30px,0").unwrap(),
        vec![
            WidthSpec::asymmetric(Token::px(10.0), Token::px(20.0)),
            WidthSpec::symmetric(Token::px(30.0)),
            WidthSpec::symmetric(Token::zero()),
        ]
    );
    assert_eq!(
        parser.parse_widths_values("1px/2cm, 5em / 6ex, 9%").unwrap(),
        vec![
            WidthSpec::asymmetric(Token::px(1.0), Token::new(2.0, Unit::Cm)),
            WidthSpec::asymmetric(Token::new(5.0, Unit::Em), Token::new(6.0, Unit::Ex)),
            WidthSpec::symmetric(Token::percent(9.0)),
        ]
    );
}

#[test]
fn empty_values() {
    let parser = Parser::new();

    assert!(parser.parse_widths_values("").unwrap().is_empty());
    assert!(parser.parse_widths_values("  \t ").unwrap().is_empty());
    assert!(parser.parse_widths_positions("").unwrap().is_empty());
}

#[test]
fn bad_values() {
    let parser = Parser::new();

    assert_eq!(
        parser.parse_widths_values("1.5seg"),
        Err(ParseError::SegmentNotAllowed)
    );
    assert_eq!(
        parser.parse_widths_values("5"),
        Err(ParseError::UnitlessNumber { value: 5.0 })
    );
    assert_eq!(
        parser.parse_widths_values("5rem"),
        Err(ParseError::UnknownUnit {
            unit: "rem".to_string()
        })
    );
    assert_eq!(
        parser.parse_widths_values("1px / 2px / 3px"),
        Err(ParseError::TooManyWidths)
    );
    assert_eq!(
        parser.parse_widths_values("1px 2px"),
        Err(ParseError::TooManyParts)
    );
    assert_eq!(
        parser.parse_widths_values("1px,,2px"),
        Err(ParseError::EmptyItem)
    );
    assert_eq!(parser.parse_widths_values("1px,"), Err(ParseError::EmptyItem));
    assert!(parser.parse_widths_values("abc").is_err());
    assert!(parser.parse_widths_values("1px /").is_err());
    assert!(matches!(
        parser.parse_widths_values("url(foo)"),
        Err(ParseError::Tokenize(_))
    ));
}

#[test]
fn positions() {
    let parser = Parser::new();

    assert_eq!(
        parser.parse_widths_positions("1px, 0.2cm, 95%, 2.5seg, 0").unwrap(),
        vec![
            Token::px(1.0),
            Token::new(0.2, Unit::Cm),
            Token::percent(95.0),
            Token::seg(2.5),
            Token::zero(),
        ]
    );

    assert_eq!(
        parser.parse_widths_positions("10% 20%"),
        Err(ParseError::TooManyParts)
    );
    assert_eq!(
        parser.parse_widths_positions("10% / 20%"),
        Err(ParseError::TooManyWidths)
    );
    assert!(parser.parse_widths_positions("auto").is_err());
}

#[test]
fn repeat() {
    let parser = Parser::new();

    assert_eq!(parser.parse_widths_repeat("repeat"), Ok(RepeatMode::Repeat));
    assert_eq!(
        parser.parse_widths_repeat("no-repeat"),
        Ok(RepeatMode::NoRepeat)
    );
    assert!(parser.parse_widths_repeat("").is_err());
    assert!(parser.parse_widths_repeat("repeat-x").is_err());
}

#[test]
fn shorthand() {
    let parser = Parser::new();

    assert_eq!(
        parser
            .parse_widths_shorthand("1px / 2px 10%, 30px 50%, 50px")
            .unwrap(),
        ParsedShorthand {
            widths: vec![
                pair(Token::px(1.0), Some(Token::px(2.0)), Some(Token::percent(10.0))),
                pair(Token::px(30.0), None, Some(Token::percent(50.0))),
                pair(Token::px(50.0), None, None),
            ],
            repeat_mode: None,
        }
    );

    assert_eq!(
        parser
            .parse_widths_shorthand("50% 10px, 100% 20px repeat")
            .unwrap(),
        ParsedShorthand {
            widths: vec![
                pair(Token::percent(50.0), None, Some(Token::px(10.0))),
                pair(Token::percent(100.0), None, Some(Token::px(20.0))),
            ],
            repeat_mode: Some(RepeatMode::Repeat),
        }
    );

    let swash = parser
        .parse_widths_shorthand(
            "0px, 6.875px 1.2seg, 0.453px 2.2seg,\n 3.98px / 1.17px 3.2seg, 0",
        )
        .unwrap();
    assert_eq!(swash.widths.len(), 5);
    assert_eq!(swash.widths[1].position, Some(Token::seg(1.2)));
    assert_eq!(swash.widths[3].right, Some(Token::px(1.17)));
    assert_eq!(swash.widths[4], pair(Token::zero(), None, None));
}

#[test]
fn shorthand_repeat_keyword() {
    let parser = Parser::new();

    assert_eq!(
        parser.parse_widths_shorthand("no-repeat").unwrap(),
        ParsedShorthand {
            widths: vec![],
            repeat_mode: Some(RepeatMode::NoRepeat),
        }
    );
    assert_eq!(
        parser.parse_widths_shorthand("10px 20% no-repeat ").unwrap(),
        ParsedShorthand {
            widths: vec![pair(Token::px(10.0), None, Some(Token::percent(20.0)))],
            repeat_mode: Some(RepeatMode::NoRepeat),
        }
    );

    // The keyword has to be separated by whitespace and can't stand alone in a list.
    assert!(parser.parse_widths_shorthand("10px,repeat").is_err());
    assert!(parser.parse_widths_shorthand("10px, repeat").is_err());
    assert!(parser.parse_widths_shorthand("repeat 10px").is_err());
}

#[test]
fn empty_shorthand() {
    let parser = Parser::new();

    assert_eq!(
        parser.parse_widths_shorthand("").unwrap(),
        ParsedShorthand::default()
    );
    assert_eq!(
        parser.parse_widths_shorthand("   ").unwrap(),
        ParsedShorthand::default()
    );
}

#[test]
fn bad_shorthand() {
    let parser = Parser::new();

    assert!(parser.parse_widths_shorthand("abc").is_err());
    assert_eq!(
        parser.parse_widths_shorthand("1seg 10%"),
        Err(ParseError::SegmentNotAllowed)
    );
    assert_eq!(
        parser.parse_widths_shorthand("1px 10% 20%"),
        Err(ParseError::TooManyParts)
    );
    assert_eq!(
        parser.parse_widths_shorthand("1px 10% / 2px"),
        Err(ParseError::TooManyWidths)
    );
    assert_eq!(
        parser.parse_widths_shorthand("1px / 2px / 3px 10%"),
        Err(ParseError::TooManyWidths)
    );
    assert_eq!(
        parser.parse_widths_shorthand("1px,, 2px"),
        Err(ParseError::EmptyItem)
    );
    assert!(parser.parse_widths_shorthand("1px 10% repeat repeat").is_err());
    assert!(parser.parse_widths_shorthand("1px 10% round").is_err());
}

#[test]
fn custom_tokenizer() {
    use crate::tokenizer::TokenizeError;

    struct Refuse;
    impl Tokenizer for Refuse {
        fn tokenize(&self, text: &str) -> Result<Vec<Component>, TokenizeError> {
            Err(TokenizeError::Unexpected {
                src: text.to_string(),
                line: 0,
                column: 1,
            })
        }
    }

    let parser = Parser::with_tokenizer(Refuse);
    assert!(parser.parse_widths_values("10px").is_err());
    // Blank input never reaches the tokenizer.
    assert!(parser.parse_widths_values(" ").unwrap().is_empty());
    // Neither does the repeat keyword.
    assert_eq!(parser.parse_widths_repeat("repeat"), Ok(RepeatMode::Repeat));
}
