//! Splitting attribute text into typed components.
//!
//! The grammar parser does not read characters itself, it consumes the
//! output of a [`Tokenizer`]. [`CssTokenizer`] is the default implementation,
//! built on top of the `cssparser` crate.

use cssparser::{BasicParseErrorKind, ParserInput, Token as CssToken};
use std::fmt;
use thiserror::Error;

/// A typed component of an attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// A number with its unit as written: `""` for a bare number, `"%"` for a
    /// percentage, or the lower-cased unit name of a dimension.
    Number { value: f32, unit: String },
    Ident(String),
    Comma,
    Slash,
    Whitespace,
    Delim(char),
}

impl Component {
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        *self == Component::Whitespace
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Component::Number { value, unit } => write!(f, "{}{}", value, unit),
            Component::Ident(name) => f.write_str(name),
            Component::Comma => f.write_str(","),
            Component::Slash => f.write_str("/"),
            Component::Whitespace => f.write_str(" "),
            Component::Delim(c) => write!(f, "{}", c),
        }
    }
}

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum TokenizeError {
    #[error("Line {line} Column {column}: Unexpected {src}.")]
    Unexpected { src: String, line: u32, column: u32 },
}

/// Splits a string into [`Component`]s.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Component>, TokenizeError>;
}

impl<'l, T: Tokenizer + ?Sized> Tokenizer for &'l T {
    fn tokenize(&self, text: &str) -> Result<Vec<Component>, TokenizeError> {
        (**self).tokenize(text)
    }
}

/// A [`Tokenizer`] following the CSS syntax tokenization rules.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CssTokenizer;

impl CssTokenizer {
    pub fn new() -> Self {
        CssTokenizer
    }
}

impl Tokenizer for CssTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Component>, TokenizeError> {
        let mut input = ParserInput::new(text);
        let mut parser = cssparser::Parser::new(&mut input);
        let mut components = Vec::new();

        loop {
            let location = parser.current_source_location();
            let unexpected = |src: String| TokenizeError::Unexpected {
                src,
                line: location.line,
                column: location.column,
            };

            let token = match parser.next_including_whitespace() {
                Ok(token) => token.clone(),
                Err(err) => match err.kind {
                    BasicParseErrorKind::EndOfInput => break,
                    kind => return Err(unexpected(format!("{:?}", kind))),
                },
            };

            components.push(match token {
                CssToken::Number { value, .. } => Component::Number {
                    value,
                    unit: String::new(),
                },
                CssToken::Percentage {
                    unit_value,
                    int_value,
                    ..
                } => Component::Number {
                    // Keep integer percentages exact, `unit_value` is divided by 100.
                    value: match int_value {
                        Some(int) => int as f32,
                        None => unit_value * 100.0,
                    },
                    unit: "%".to_string(),
                },
                CssToken::Dimension { value, unit, .. } => Component::Number {
                    value,
                    unit: unit.to_ascii_lowercase(),
                },
                CssToken::Ident(name) => Component::Ident(name.to_string()),
                CssToken::Comma => Component::Comma,
                CssToken::Delim('/') => Component::Slash,
                CssToken::Delim(c) => Component::Delim(c),
                CssToken::WhiteSpace(_) => Component::Whitespace,
                other => return Err(unexpected(format!("{:?}", other))),
            });
        }

        Ok(components)
    }
}

#[cfg(test)]
fn number(value: f32, unit: &str) -> Component {
    Component::Number {
        value,
        unit: unit.to_string(),
    }
}

#[test]
fn numbers_and_units() {
    let tokens = CssTokenizer.tokenize("1px 30EM 50% 2.3seg 0 -20%").unwrap();
    assert_eq!(
        tokens,
        vec![
            number(1.0, "px"),
            Component::Whitespace,
            number(30.0, "em"),
            Component::Whitespace,
            number(50.0, "%"),
            Component::Whitespace,
            number(2.3, "seg"),
            Component::Whitespace,
            number(0.0, ""),
            Component::Whitespace,
            number(-20.0, "%"),
        ]
    );
}

#[test]
fn separators() {
    let tokens = CssTokenizer.tokenize("1px/2cm, 3ex repeat").unwrap();
    assert_eq!(
        tokens,
        vec![
            number(1.0, "px"),
            Component::Slash,
            number(2.0, "cm"),
            Component::Comma,
            Component::Whitespace,
            number(3.0, "ex"),
            Component::Whitespace,
            Component::Ident("repeat".to_string()),
        ]
    );
}

#[test]
fn empty_input() {
    assert!(CssTokenizer.tokenize("").unwrap().is_empty());
    assert_eq!(
        CssTokenizer.tokenize("   ").unwrap(),
        vec![Component::Whitespace]
    );
}

#[test]
fn comments_are_skipped() {
    let tokens = CssTokenizer.tokenize("1px/* left */").unwrap();
    assert_eq!(tokens, vec![number(1.0, "px")]);
}

#[test]
fn unexpected_tokens() {
    match CssTokenizer.tokenize("1px \"quoted\"") {
        Err(TokenizeError::Unexpected { line, column, .. }) => {
            assert_eq!(line, 0);
            assert_eq!(column, 5);
        }
        other => panic!("{:?}", other),
    }

    assert!(CssTokenizer.tokenize("calc(1px + 2px)").is_err());
    assert!(CssTokenizer.tokenize("#fff").is_err());
}
