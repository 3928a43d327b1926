//! A single brick
//!
//! A brick has a body region for the "was it touched at all" test and four
//! edge strips that decide which way the ball bounces.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::region::{Edge, EdgeStrip, Rect};
use super::vector::Vector;
use crate::audio::SoundEffect;
use crate::consts::{EDGE_STRIP, FADE_MS};
use crate::error::Result;

/// Highest durability a level may give a brick
pub const MAX_DURABILITY: u8 = 8;

/// Colour transition in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Fade {
    from_base: Color,
    to_base: Color,
    from_accent: Color,
    to_accent: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub position: Vector,
    pub scale: Vector,
    /// Hits left; 0 means invincible
    durability: u8,
    broken: bool,
    base_color: Color,
    accent_color: Color,
    /// Remaining fade time (ms)
    fade_ms: f64,
    fade: Option<Fade>,
    body: Rect,
    edges: [EdgeStrip; 4],
}

impl Brick {
    /// `color` is a 3-bit RGB digit (0..=7)
    pub fn new(position: Vector, scale: Vector, durability: u8, color: u8) -> Self {
        let body = Rect {
            min: position,
            size: scale,
        };
        Self {
            position,
            scale,
            durability: durability.min(MAX_DURABILITY),
            broken: false,
            base_color: Color::from_digit(color & 0b111),
            accent_color: Color::WHITE,
            fade_ms: 0.0,
            fade: None,
            body,
            edges: Edge::ALL.map(|edge| EdgeStrip::new(edge, &body, EDGE_STRIP)),
        }
    }

    pub fn durability(&self) -> u8 {
        self.durability
    }

    pub fn is_invincible(&self) -> bool {
        self.durability == 0
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Still drawn: unbroken, or broken but still fading out
    pub fn is_visible(&self) -> bool {
        !(self.broken && self.fade_ms <= 0.0)
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn accent_color(&self) -> Color {
        self.accent_color
    }

    pub fn body(&self) -> &Rect {
        &self.body
    }

    pub fn edges(&self) -> &[EdgeStrip; 4] {
        &self.edges
    }

    /// Take one hit
    ///
    /// Invincible bricks do not change. Otherwise the brick either breaks
    /// and fades out, or loses one durability and fades to a darker shade.
    pub fn damage(&mut self, animation_off: bool) -> SoundEffect {
        if self.is_invincible() {
            return SoundEffect::BrickInvincibleHit;
        }

        self.fade_ms = if animation_off { 1.0 } else { FADE_MS };

        // Start from opaque for a visible flash
        let from_base = self.base_color.with_alpha(255);
        let from_accent = self.accent_color.with_alpha(255);

        let (to_base, to_accent) = if self.durability == 1 {
            self.broken = true;
            (self.base_color.with_alpha(0), self.accent_color.with_alpha(0))
        } else {
            self.durability -= 1;
            (self.base_color.darker(), self.accent_color.darker())
        };

        self.fade = Some(Fade {
            from_base,
            to_base,
            from_accent,
            to_accent,
        });
        SoundEffect::BrickHit
    }

    /// Advance the fade animation by `dt` ms
    pub fn update(&mut self, dt: f64) -> Result<()> {
        if self.fade_ms <= 0.0 {
            return Ok(());
        }
        let Some(fade) = self.fade else {
            self.fade_ms = 0.0;
            return Ok(());
        };
        self.fade_ms = (self.fade_ms - dt).max(0.0);
        let t = 1.0 - self.fade_ms / FADE_MS;
        self.base_color = fade.from_base.blend(fade.to_base, t)?;
        self.accent_color = fade.from_accent.blend(fade.to_accent, t)?;
        if self.fade_ms == 0.0 {
            self.fade = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH};
    use crate::sim::vector::vec2;

    fn brick(durability: u8) -> Brick {
        Brick::new(vec2(0.2, 0.2), vec2(BRICK_WIDTH, BRICK_HEIGHT), durability, 4)
    }

    #[test]
    fn test_invincible_never_changes() {
        let mut b = brick(0);
        for _ in 0..10 {
            assert_eq!(b.damage(false), SoundEffect::BrickInvincibleHit);
        }
        assert_eq!(b.durability(), 0);
        assert!(!b.is_broken());
        assert_eq!(b.base_color(), Color::from_digit(4));
    }

    #[test]
    fn test_damage_then_break() {
        let mut b = brick(2);
        assert_eq!(b.damage(false), SoundEffect::BrickHit);
        assert_eq!(b.durability(), 1);
        assert!(!b.is_broken());

        b.update(FADE_MS).unwrap();
        assert_eq!(b.base_color(), Color::from_digit(4).darker());

        b.damage(false);
        assert!(b.is_broken());
        assert!(b.is_visible());
        b.update(FADE_MS / 2.0).unwrap();
        assert!(b.is_visible());
        assert!(b.base_color().a < 255 && b.base_color().a > 0);
        b.update(FADE_MS).unwrap();
        assert!(!b.is_visible());
        assert_eq!(b.base_color().a, 0);
    }

    #[test]
    fn test_animation_off_fades_instantly() {
        let mut b = brick(1);
        b.damage(true);
        assert!(b.is_visible());
        b.update(1000.0 / 300.0).unwrap();
        assert!(!b.is_visible());
        assert_eq!(b.accent_color().a, 0);
    }

    #[test]
    fn test_edge_strips_carry_normals() {
        let b = brick(1);
        let normals: Vec<_> = b.edges().iter().map(|e| e.normal()).collect();
        assert_eq!(normals, vec![Vector::NEG_Y, Vector::Y, Vector::NEG_X, Vector::X]);
        let top = b.edges()[0].region;
        assert_eq!(top.min, b.position);
        assert_eq!(top.size.y, EDGE_STRIP);
    }

    #[test]
    fn test_durability_clamped_to_max() {
        assert_eq!(brick(200).durability(), MAX_DURABILITY);
    }
}
