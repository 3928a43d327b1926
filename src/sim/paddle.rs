//! The player's paddle
//!
//! Only a thin strip along the top edge collides; a ball that gets below the
//! top edge passes through.

use serde::{Deserialize, Serialize};

use super::collision::{Collision, Surface};
use super::region::{Rect, Region};
use super::vector::{Vector, vec2};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Collision strip height as a fraction of the paddle height
const TOP_STRIP: f64 = 0.0625;
/// Top edge offset above the paddle centre, as a fraction of the height
const TOP_OFFSET: f64 = 0.125;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Centre; y never changes
    pub position: Vector,
    pub scale: Vector,
    region: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(
            vec2(PADDLE_START_X, PADDLE_Y),
            vec2(PADDLE_SCALE, PADDLE_SCALE),
        )
    }
}

impl Paddle {
    pub fn new(position: Vector, scale: Vector) -> Self {
        Self {
            position,
            scale,
            region: top_strip(position, scale),
        }
    }

    /// Keep the whole paddle between the side edges
    pub fn clamp_x(&self, x: f64) -> f64 {
        let half = self.scale.x / 2.0;
        let lo = WALL_START + half;
        let hi = WALL_START + WALL_WIDTH - half;
        if x.is_nan() {
            return self.position.x;
        }
        x.clamp(lo, hi)
    }

    /// Move to `x`, which the caller has already clamped
    pub fn move_to(&mut self, x: f64) {
        self.position.x = x;
    }

    /// Rebuild the top-edge strip from the current position
    pub fn refresh_region(&mut self) {
        self.region = top_strip(self.position, self.scale);
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// Bounce upwards when the ball touches the top strip
    pub fn test_collision(&self, ball: &Region, events: &mut Vec<SoundEffect>) -> Option<Collision> {
        if !ball.overlaps(&Region::Rect(self.region)) {
            return None;
        }
        events.push(SoundEffect::PaddleHit);
        Some(Collision::new(Vector::NEG_Y, Surface::Paddle))
    }
}

fn top_strip(position: Vector, scale: Vector) -> Rect {
    Rect::new(
        position.x - 0.5 * scale.x,
        position.y - TOP_OFFSET * scale.y,
        scale.x,
        TOP_STRIP * scale.y,
    )
}
