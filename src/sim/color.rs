//! RGBA colours for bricks and the colour scheme

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Brick alpha before any fade (0.7 of full)
const BRICK_ALPHA: u8 = 179;
/// Channel factor applied by `darker`
const DARKER: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const SCHEME_RED: Color = Color::rgba(128, 0, 0, 255);
    pub const SCHEME_BLUE: Color = Color::rgba(0, 0, 128, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Brick colour from a 3-bit RGB digit (bit 2 red, bit 1 green, bit 0 blue)
    pub fn from_digit(digit: u8) -> Self {
        let on = |bit: u8| if digit & bit != 0 { 255 } else { 0 };
        Self::rgba(on(0b100), on(0b010), on(0b001), BRICK_ALPHA)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// RGB scaled by 0.7, alpha kept
    pub fn darker(self) -> Self {
        let d = |c: u8| (c as f64 * DARKER) as u8;
        Self::rgba(d(self.r), d(self.g), d(self.b), self.a)
    }

    /// Linear blend: 0 gives `self`, 1 gives `to`
    pub fn blend(self, to: Color, t: f64) -> Result<Color> {
        if !(0.0..=1.0).contains(&t) {
            return Err(SimError::BlendOutOfRange(t));
        }
        let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t) as u8;
        Ok(Self::rgba(
            mix(self.r, to.r),
            mix(self.g, to.g),
            mix(self.b, to.b),
            mix(self.a, to.a),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_palette() {
        assert_eq!(Color::from_digit(0), Color::rgba(0, 0, 0, BRICK_ALPHA));
        assert_eq!(Color::from_digit(4), Color::rgba(255, 0, 0, BRICK_ALPHA));
        assert_eq!(Color::from_digit(3), Color::rgba(0, 255, 255, BRICK_ALPHA));
        assert_eq!(Color::from_digit(7), Color::rgba(255, 255, 255, BRICK_ALPHA));
    }

    #[test]
    fn test_darker_keeps_alpha() {
        let c = Color::rgba(255, 100, 0, 42).darker();
        assert_eq!(c, Color::rgba(178, 70, 0, 42));
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Color::rgba(200, 0, 100, 255);
        let b = Color::rgba(0, 200, 100, 0);
        assert_eq!(a.blend(b, 0.0).unwrap(), a);
        assert_eq!(a.blend(b, 1.0).unwrap(), b);
        assert_eq!(a.blend(b, 0.5).unwrap(), Color::rgba(100, 100, 100, 127));
    }

    #[test]
    fn test_blend_out_of_range() {
        let err = Color::WHITE.blend(Color::BLACK, 1.5).unwrap_err();
        assert!(matches!(err, SimError::BlendOutOfRange(t) if t == 1.5));
        assert!(Color::WHITE.blend(Color::BLACK, f64::NAN).is_err());
        assert!(Color::WHITE.blend(Color::BLACK, -0.1).is_err());
    }
}
