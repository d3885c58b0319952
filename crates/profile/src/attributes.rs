//! The four stroke-widths attributes, raw and parsed.

use crate::parser::{ParseError, ParsedShorthand, Parser, RepeatMode, Token, Tokenizer, WidthSpec};
use std::fmt;

/// One of the stroke-widths attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Attribute {
    Positions,
    Values,
    Repeat,
    Shorthand,
}

impl Attribute {
    /// The order attributes are parsed and their errors reported in.
    ///
    /// The shorthand comes last so that its errors are listed after the ones of
    /// the longhands that override it.
    pub const EVALUATION_ORDER: [Attribute; 4] = [
        Attribute::Positions,
        Attribute::Values,
        Attribute::Repeat,
        Attribute::Shorthand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Positions => "stroke-widths-positions",
            Attribute::Values => "stroke-widths-values",
            Attribute::Repeat => "stroke-widths-repeat",
            Attribute::Shorthand => "stroke-widths",
        }
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::EVALUATION_ORDER
            .iter()
            .copied()
            .find(|attribute| attribute.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw attribute text, `None` for attributes that are not set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeWidthsAttributes {
    pub values: Option<String>,
    pub positions: Option<String>,
    pub repeat: Option<String>,
    pub shorthand: Option<String>,
}

impl StrokeWidthsAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the stroke-widths attributes out of a list of element
    /// attributes, ignoring the unrelated ones.
    pub fn from_pairs<'l, Iter>(pairs: Iter) -> Self
    where
        Iter: IntoIterator<Item = (&'l str, &'l str)>,
    {
        let mut attributes = Self::new();
        for (name, value) in pairs {
            attributes.set(name, value);
        }

        attributes
    }

    /// Sets an attribute by name.
    ///
    /// Returns false if `name` is not one of the stroke-widths attributes.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match Attribute::from_name(name) {
            Some(attribute) => {
                *self.slot_mut(attribute) = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Values => self.values.as_deref(),
            Attribute::Positions => self.positions.as_deref(),
            Attribute::Repeat => self.repeat.as_deref(),
            Attribute::Shorthand => self.shorthand.as_deref(),
        }
    }

    pub fn remove(&mut self, attribute: Attribute) -> Option<String> {
        self.slot_mut(attribute).take()
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut Option<String> {
        match attribute {
            Attribute::Values => &mut self.values,
            Attribute::Positions => &mut self.positions,
            Attribute::Repeat => &mut self.repeat,
            Attribute::Shorthand => &mut self.shorthand,
        }
    }
}

/// The attributes that parsed successfully.
///
/// Attributes that are absent or failed to parse are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedAttributes {
    pub values: Option<Vec<WidthSpec>>,
    pub positions: Option<Vec<Token>>,
    pub repeat: Option<RepeatMode>,
    pub shorthand: Option<ParsedShorthand>,
}

impl ParsedAttributes {
    /// Parses every attribute that is set, in evaluation order.
    ///
    /// Returns the successfully parsed values and the attributes that failed.
    pub fn parse<T: Tokenizer>(
        attributes: &StrokeWidthsAttributes,
        parser: &Parser<T>,
    ) -> (Self, Vec<Attribute>) {
        let mut parsed = ParsedAttributes::default();
        let mut errors = Vec::new();

        for &attribute in &Attribute::EVALUATION_ORDER {
            let text = match attributes.get(attribute) {
                Some(text) => text,
                None => continue,
            };

            let result = match attribute {
                Attribute::Positions => parser
                    .parse_widths_positions(text)
                    .map(|positions| parsed.positions = Some(positions)),
                Attribute::Values => parser
                    .parse_widths_values(text)
                    .map(|values| parsed.values = Some(values)),
                Attribute::Repeat => parser
                    .parse_widths_repeat(text)
                    .map(|mode| parsed.repeat = Some(mode)),
                Attribute::Shorthand => parser
                    .parse_widths_shorthand(text)
                    .map(|shorthand| parsed.shorthand = Some(shorthand)),
            };

            if let Err(error) = result {
                log_parse_error(attribute, text, &error);
                errors.push(attribute);
            }
        }

        (parsed, errors)
    }
}

fn log_parse_error(attribute: Attribute, text: &str, error: &ParseError) {
    log::debug!("Failed to parse {}: {:?}: {}", attribute, text, error);
}

#[test]
fn attribute_names() {
    for &attribute in &Attribute::EVALUATION_ORDER {
        assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
    }
    assert_eq!(Attribute::from_name("stroke-width"), None);
    assert_eq!(Attribute::Shorthand.to_string(), "stroke-widths");
}

#[test]
fn attributes_from_pairs() {
    let attributes = StrokeWidthsAttributes::from_pairs(vec![
        ("d", "M0 0h100"),
        ("stroke-widths-values", "10px, 20px"),
        ("stroke-widths", "abc"),
        ("stroke-width", "3"),
    ]);

    assert_eq!(attributes.get(Attribute::Values), Some("10px, 20px"));
    assert_eq!(attributes.get(Attribute::Shorthand), Some("abc"));
    assert_eq!(attributes.get(Attribute::Positions), None);
    assert_eq!(attributes.get(Attribute::Repeat), None);

    let mut attributes = attributes;
    assert!(!attributes.set("fill", "none"));
    assert_eq!(
        attributes.remove(Attribute::Shorthand),
        Some("abc".to_string())
    );
    assert_eq!(attributes.get(Attribute::Shorthand), None);
}

#[test]
fn parse_errors_in_evaluation_order() {
    let attributes = StrokeWidthsAttributes {
        values: Some("abc".to_string()),
        positions: Some("10%".to_string()),
        repeat: Some("sometimes".to_string()),
        shorthand: Some("1px 2px 3px".to_string()),
    };

    let (parsed, errors) = ParsedAttributes::parse(&attributes, &Parser::new());

    assert_eq!(
        errors,
        vec![Attribute::Values, Attribute::Repeat, Attribute::Shorthand]
    );
    assert_eq!(parsed.positions, Some(vec![Token::percent(10.0)]));
    assert_eq!(parsed.values, None);
    assert_eq!(parsed.repeat, None);
    assert_eq!(parsed.shorthand, None);
}
