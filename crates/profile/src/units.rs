//! Conversion of lengths to pixels.

use crate::parser::{Token, Unit};

/// CSS pixels per inch.
pub const PX_PER_IN: f32 = 96.0;
pub const PX_PER_CM: f32 = PX_PER_IN / 2.54;
pub const PX_PER_MM: f32 = PX_PER_IN / 25.4;
pub const PX_PER_PT: f32 = PX_PER_IN / 72.0;
pub const PX_PER_PC: f32 = PX_PER_IN / 6.0;

/// The host metrics lengths are resolved against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitContext {
    /// Size of `1em` in pixels.
    pub em: f32,
    /// Size of `1ex` in pixels.
    pub ex: f32,
    /// The stroke width percentages refer to, in pixels.
    pub base_stroke_width: f32,
}

impl UnitContext {
    /// Converts a token to pixels.
    ///
    /// Returns `None` for segment references, which only make sense as
    /// positions along a path.
    pub fn to_px(&self, token: &Token) -> Option<f32> {
        let value = token.value;
        Some(match token.unit {
            Unit::None => 0.0,
            Unit::Px => value,
            Unit::Cm => value * PX_PER_CM,
            Unit::Mm => value * PX_PER_MM,
            Unit::In => value * PX_PER_IN,
            Unit::Pt => value * PX_PER_PT,
            Unit::Pc => value * PX_PER_PC,
            Unit::Em => value * self.em,
            Unit::Ex => value * self.ex,
            Unit::Percent => value * self.base_stroke_width / 100.0,
            Unit::Seg => return None,
        })
    }
}

#[cfg(test)]
fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn absolute_units() {
    let ctx = UnitContext {
        em: 16.0,
        ex: 8.0,
        base_stroke_width: 7.0,
    };

    assert_eq!(ctx.to_px(&Token::px(3.0)), Some(3.0));
    assert!(approx_eq(ctx.to_px(&Token::new(2.0, Unit::Cm)).unwrap(), 75.590_55));
    assert!(approx_eq(ctx.to_px(&Token::new(30.0, Unit::Mm)).unwrap(), 113.385_83));
    assert!(approx_eq(ctx.to_px(&Token::new(4.0, Unit::In)).unwrap(), 384.0));
    assert!(approx_eq(ctx.to_px(&Token::new(7.0, Unit::Pt)).unwrap(), 9.333_333));
    assert!(approx_eq(ctx.to_px(&Token::new(8.0, Unit::Pc)).unwrap(), 128.0));
}

#[test]
fn relative_units() {
    let ctx = UnitContext {
        em: 16.0,
        ex: 8.0,
        base_stroke_width: 7.0,
    };

    assert_eq!(ctx.to_px(&Token::new(5.0, Unit::Em)), Some(80.0));
    assert_eq!(ctx.to_px(&Token::new(6.0, Unit::Ex)), Some(48.0));
    assert!(approx_eq(ctx.to_px(&Token::percent(9.0)).unwrap(), 0.63));
    assert_eq!(ctx.to_px(&Token::zero()), Some(0.0));
    assert_eq!(ctx.to_px(&Token::seg(1.0)), None);
}
