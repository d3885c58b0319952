#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Parsing of the `stroke-widths` attribute family.
//!
//! A variable-width stroke is described by four independently settable
//! attributes:
//!
//! - `stroke-widths-values`: the list of widths, e.g. `10px, 2px / 4px, 50%`,
//! - `stroke-widths-positions`: where along the path each width applies,
//!   e.g. `0%, 2.5seg, 40px`,
//! - `stroke-widths-repeat`: `repeat` or `no-repeat`,
//! - `stroke-widths`: a shorthand combining the three, e.g.
//!   `1px / 2px 10%, 30px 50%, 50px repeat`.
//!
//! This crate turns the attribute text into typed values. Resolving them into
//! a width profile along a path is done by `stroke_widths_profile`.
//!
//! This crate is reexported in `stroke_widths`.
//!
//! # Examples
//!
//! ```
//! use stroke_widths_parser::{Parser, Token, Unit, WidthSpec};
//!
//! let parser = Parser::new();
//!
//! let widths = parser.parse_widths_values("10px, 1px / 2cm").unwrap();
//! assert_eq!(widths[0], WidthSpec::symmetric(Token::px(10.0)));
//! assert_eq!(widths[1].right, Some(Token::new(2.0, Unit::Cm)));
//!
//! // Segment references are only allowed in positions.
//! assert!(parser.parse_widths_values("1.5seg").is_err());
//! assert!(parser.parse_widths_positions("1.5seg").is_ok());
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate cssparser;

mod error;
mod grammar;
mod token;
pub mod tokenizer;

pub use crate::error::ParseError;
pub use crate::grammar::Parser;
pub use crate::token::{ParsedShorthand, RepeatMode, Token, Unit, WidthPositionPair, WidthSpec};
pub use crate::tokenizer::{Component, CssTokenizer, TokenizeError, Tokenizer};
