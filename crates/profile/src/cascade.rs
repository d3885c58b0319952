//! Precedence between the longhand attributes, the shorthand and the base
//! stroke width.

use crate::attributes::ParsedAttributes;
use crate::parser::{RepeatMode, Token, WidthSpec};

/// Where the effective widths come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidthSource {
    /// `stroke-widths-values`, positioned by `stroke-widths-positions`.
    Longhand,
    /// The pairs of the `stroke-widths` shorthand.
    Shorthand,
    /// The element's `stroke-width`.
    Base,
}

/// The effective widths, positions and repeat mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Cascade {
    pub source: WidthSource,
    pub widths: Vec<WidthSpec>,
    /// Parallel to `widths` but possibly shorter or longer. `None` entries
    /// are left for the profile builder to fill in.
    pub positions: Vec<Option<Token>>,
    pub repeat: RepeatMode,
}

impl Cascade {
    /// Applies the precedence rules to the attributes that parsed.
    ///
    /// `base_width` is used when no attribute supplies widths, or when
    /// `stroke-widths-values` is an empty list.
    pub fn resolve(attributes: &ParsedAttributes, base_width: Token) -> Cascade {
        let (source, mut widths, mut positions) = match (&attributes.values, &attributes.shorthand) {
            (Some(values), _) => {
                let positions = attributes
                    .positions
                    .iter()
                    .flatten()
                    .map(|&position| Some(position))
                    .collect();
                (WidthSource::Longhand, values.clone(), positions)
            }
            (None, Some(shorthand)) => (
                WidthSource::Shorthand,
                shorthand.widths.iter().map(|pair| pair.width()).collect(),
                shorthand.widths.iter().map(|pair| pair.position).collect(),
            ),
            (None, None) => (WidthSource::Base, Vec::new(), Vec::new()),
        };

        if widths.is_empty() {
            widths.push(WidthSpec::symmetric(base_width));
        }

        if widths.len() == 1 {
            positions.clear();
        }

        // The shorthand's keyword only goes with the shorthand's own widths.
        let shorthand_repeat = match (source, &attributes.shorthand) {
            (WidthSource::Shorthand, Some(shorthand)) => shorthand.repeat_mode,
            _ => None,
        };
        let repeat = attributes
            .repeat
            .or(shorthand_repeat)
            .unwrap_or_default();

        log::trace!(
            "Stroke widths from {:?}: {} width(s), {} position(s), {:?}",
            source,
            widths.len(),
            positions.len(),
            repeat
        );

        Cascade {
            source,
            widths,
            positions,
            repeat,
        }
    }
}

#[cfg(test)]
use crate::parser::{ParsedShorthand, WidthPositionPair};

#[cfg(test)]
fn shorthand(pairs: &[(f32, Option<f32>)], repeat_mode: Option<RepeatMode>) -> ParsedShorthand {
    ParsedShorthand {
        widths: pairs
            .iter()
            .map(|&(width, position)| WidthPositionPair {
                left: Token::px(width),
                right: None,
                position: position.map(Token::percent),
            })
            .collect(),
        repeat_mode,
    }
}

#[cfg(test)]
fn px_widths(widths: &[f32]) -> Vec<WidthSpec> {
    widths
        .iter()
        .map(|&w| WidthSpec::symmetric(Token::px(w)))
        .collect()
}

#[test]
fn nothing_parsed() {
    let cascade = Cascade::resolve(&ParsedAttributes::default(), Token::px(7.0));
    assert_eq!(cascade.source, WidthSource::Base);
    assert_eq!(cascade.widths, px_widths(&[7.0]));
    assert!(cascade.positions.is_empty());
    assert_eq!(cascade.repeat, RepeatMode::NoRepeat);
}

#[test]
fn longhand_overrides_shorthand() {
    let attributes = ParsedAttributes {
        values: Some(px_widths(&[1.0, 2.0])),
        positions: None,
        repeat: None,
        shorthand: Some(shorthand(&[(5.0, Some(10.0)), (6.0, None)], None)),
    };

    let cascade = Cascade::resolve(&attributes, Token::px(7.0));
    assert_eq!(cascade.source, WidthSource::Longhand);
    assert_eq!(cascade.widths, px_widths(&[1.0, 2.0]));
    // Positions don't leak from the shorthand.
    assert!(cascade.positions.is_empty());
}

#[test]
fn empty_values_still_override_shorthand() {
    let attributes = ParsedAttributes {
        values: Some(Vec::new()),
        shorthand: Some(shorthand(&[(5.0, None), (6.0, None)], None)),
        ..ParsedAttributes::default()
    };

    let cascade = Cascade::resolve(&attributes, Token::px(7.0));
    assert_eq!(cascade.source, WidthSource::Longhand);
    assert_eq!(cascade.widths, px_widths(&[7.0]));
}

#[test]
fn shorthand_pairs() {
    let attributes = ParsedAttributes {
        positions: Some(vec![Token::percent(90.0)]),
        shorthand: Some(shorthand(
            &[(5.0, Some(10.0)), (6.0, None), (7.0, Some(80.0))],
            Some(RepeatMode::Repeat),
        )),
        ..ParsedAttributes::default()
    };

    let cascade = Cascade::resolve(&attributes, Token::px(1.0));
    assert_eq!(cascade.source, WidthSource::Shorthand);
    assert_eq!(cascade.widths, px_widths(&[5.0, 6.0, 7.0]));
    assert_eq!(
        cascade.positions,
        vec![Some(Token::percent(10.0)), None, Some(Token::percent(80.0))]
    );
    assert_eq!(cascade.repeat, RepeatMode::Repeat);
}

#[test]
fn repeat_precedence() {
    let mut attributes = ParsedAttributes {
        shorthand: Some(shorthand(&[(5.0, None)], Some(RepeatMode::Repeat))),
        repeat: Some(RepeatMode::NoRepeat),
        ..ParsedAttributes::default()
    };
    assert_eq!(
        Cascade::resolve(&attributes, Token::px(1.0)).repeat,
        RepeatMode::NoRepeat
    );

    attributes.repeat = None;
    assert_eq!(
        Cascade::resolve(&attributes, Token::px(1.0)).repeat,
        RepeatMode::Repeat
    );

    // The shorthand's keyword is dropped along with its widths.
    attributes.values = Some(px_widths(&[1.0, 2.0]));
    assert_eq!(
        Cascade::resolve(&attributes, Token::px(1.0)).repeat,
        RepeatMode::NoRepeat
    );
}

#[test]
fn single_width_is_not_positioned() {
    let attributes = ParsedAttributes {
        values: Some(px_widths(&[10.0])),
        positions: Some(vec![Token::percent(50.0), Token::percent(100.0)]),
        ..ParsedAttributes::default()
    };

    let cascade = Cascade::resolve(&attributes, Token::px(1.0));
    assert_eq!(cascade.widths, px_widths(&[10.0]));
    assert!(cascade.positions.is_empty());
}
