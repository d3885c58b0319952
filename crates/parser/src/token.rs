//! The typed values produced by the stroke-widths grammar.

use std::fmt;

/// The unit of a [`Token`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Unit {
    /// No unit. Only the literal `0` is allowed to be unitless.
    None,
    Px,
    Pt,
    Pc,
    Cm,
    Mm,
    In,
    Em,
    Ex,
    Percent,
    /// Path segment reference, only legal where positions are accepted.
    Seg,
}

impl Unit {
    /// All units, in the order they are listed by the grammar.
    pub const ALL: [Unit; 11] = [
        Unit::Em,
        Unit::Ex,
        Unit::Cm,
        Unit::Mm,
        Unit::In,
        Unit::Px,
        Unit::Pt,
        Unit::Pc,
        Unit::Percent,
        Unit::Seg,
        Unit::None,
    ];

    /// Looks a unit up by its textual name (`"px"`, `"%"`, `"seg"`, `""`...).
    ///
    /// Matching is ASCII case-insensitive, like CSS units.
    pub fn from_name(name: &str) -> Option<Unit> {
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::In => "in",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Percent => "%",
            Unit::Seg => "seg",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A number with a unit, for example `10px`, `50%` or `1.5seg`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Token {
    pub value: f32,
    pub unit: Unit,
}

impl Token {
    #[inline]
    pub fn new(value: f32, unit: Unit) -> Self {
        Token { value, unit }
    }

    /// The unitless literal `0`.
    #[inline]
    pub fn zero() -> Self {
        Token::new(0.0, Unit::None)
    }

    #[inline]
    pub fn px(value: f32) -> Self {
        Token::new(value, Unit::Px)
    }

    #[inline]
    pub fn percent(value: f32) -> Self {
        Token::new(value, Unit::Percent)
    }

    #[inline]
    pub fn seg(value: f32) -> Self {
        Token::new(value, Unit::Seg)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// A stroke width, optionally asymmetric (`<left> / <right>`).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct WidthSpec {
    pub left: Token,
    /// `None` means the width is symmetric.
    pub right: Option<Token>,
}

impl WidthSpec {
    #[inline]
    pub fn symmetric(width: Token) -> Self {
        WidthSpec {
            left: width,
            right: None,
        }
    }

    #[inline]
    pub fn asymmetric(left: Token, right: Token) -> Self {
        WidthSpec {
            left,
            right: Some(right),
        }
    }

    /// The right width, falling back to the left one for symmetric widths.
    #[inline]
    pub fn right_or_left(&self) -> Token {
        self.right.unwrap_or(self.left)
    }
}

/// One item of the `stroke-widths` shorthand: a width and an optional position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct WidthPositionPair {
    pub left: Token,
    pub right: Option<Token>,
    /// `None` means the position is left unspecified.
    pub position: Option<Token>,
}

impl WidthPositionPair {
    #[inline]
    pub fn width(&self) -> WidthSpec {
        WidthSpec {
            left: self.left,
            right: self.right,
        }
    }
}

/// Whether the width pattern is tiled along the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum RepeatMode {
    NoRepeat,
    Repeat,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::NoRepeat
    }
}

impl RepeatMode {
    /// The attribute keyword for this mode.
    pub fn keyword(self) -> &'static str {
        match self {
            RepeatMode::NoRepeat => "no-repeat",
            RepeatMode::Repeat => "repeat",
        }
    }
}

/// The result of parsing the `stroke-widths` shorthand.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ParsedShorthand {
    pub widths: Vec<WidthPositionPair>,
    /// `None` when the shorthand carries no `repeat`/`no-repeat` keyword.
    pub repeat_mode: Option<RepeatMode>,
}

#[test]
fn unit_names() {
    assert_eq!(Unit::from_name("px"), Some(Unit::Px));
    assert_eq!(Unit::from_name("PX"), Some(Unit::Px));
    assert_eq!(Unit::from_name("%"), Some(Unit::Percent));
    assert_eq!(Unit::from_name("seg"), Some(Unit::Seg));
    assert_eq!(Unit::from_name(""), Some(Unit::None));
    assert_eq!(Unit::from_name("rem"), None);

    for unit in &Unit::ALL {
        assert_eq!(Unit::from_name(unit.name()), Some(*unit));
    }
}

#[test]
fn token_display() {
    assert_eq!(Token::px(10.0).to_string(), "10px");
    assert_eq!(Token::percent(50.0).to_string(), "50%");
    assert_eq!(Token::seg(1.5).to_string(), "1.5seg");
    assert_eq!(Token::zero().to_string(), "0");
}

#[test]
fn symmetric_width_falls_back_to_left() {
    let width = WidthSpec::symmetric(Token::px(3.0));
    assert_eq!(width.right_or_left(), Token::px(3.0));

    let width = WidthSpec::asymmetric(Token::px(3.0), Token::px(4.0));
    assert_eq!(width.right_or_left(), Token::px(4.0));
}
