//! The brick field
//!
//! Bricks are kept in row-major level order, which is also the order they are
//! credited in when the ball touches several at once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::brick::Brick;
use super::collision::{Collision, Surface};
use super::level::{ColorDigit, Level};
use super::region::Region;
use super::vector::{Vector, VectorExt, vec2};
use crate::audio::SoundEffect;
use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH};
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    bricks: Vec<Brick>,
    /// Unbroken bricks that can still be broken
    durability: usize,
}

impl BrickField {
    pub fn new(bricks: Vec<Brick>) -> Self {
        let mut field = Self {
            bricks,
            durability: 0,
        };
        field.update_durability();
        field
    }

    /// Build bricks from a parsed level; random colours come from `rng`
    pub fn from_level<R: Rng>(level: &Level, rng: &mut R) -> Self {
        let scale = vec2(BRICK_WIDTH, BRICK_HEIGHT);
        let bricks = level
            .cells
            .iter()
            .map(|cell| {
                let color = match cell.color {
                    ColorDigit::Fixed(c) => c,
                    ColorDigit::Random => rng.random_range(0..8),
                };
                Brick::new(cell.position(), scale, cell.durability, color)
            })
            .collect();
        Self::new(bricks)
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn remaining_durability(&self) -> usize {
        self.durability
    }

    /// Advance every brick's fade
    pub fn update(&mut self, dt: f64) -> Result<()> {
        for brick in &mut self.bricks {
            brick.update(dt)?;
        }
        Ok(())
    }

    /// Damage every touched brick and bounce off the sum of touched edges
    ///
    /// The normal accumulates across the whole scan, so a ball wedged
    /// between two bricks bounces once off their combined normal. A sum
    /// that cancels to zero is not a collision.
    pub fn test_collision(
        &mut self,
        ball: &Region,
        animation_off: bool,
        events: &mut Vec<SoundEffect>,
    ) -> Result<Option<Collision>> {
        let mut normal = Vector::ZERO;
        let mut damaged = false;

        for brick in self.bricks.iter_mut().filter(|b| !b.is_broken()) {
            if !ball.overlaps(&Region::Rect(*brick.body())) {
                continue;
            }
            events.push(brick.damage(animation_off));
            damaged |= !brick.is_invincible();

            for strip in brick.edges() {
                if ball.overlaps(&Region::Rect(strip.region)) {
                    normal += strip.normal();
                }
            }
        }

        if damaged {
            self.update_durability();
        }

        if normal.length_squared() > 0.0 {
            return Ok(Some(Collision::new(
                normal.checked_normalize()?,
                Surface::Bricks,
            )));
        }
        Ok(None)
    }

    fn update_durability(&mut self) {
        self.durability = self
            .bricks
            .iter()
            .filter(|b| !b.is_broken() && !b.is_invincible())
            .count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_SCALE;
    use crate::sim::region::Ellipse;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(p: Vector) -> Region {
        Ellipse::from_scale(p, vec2(BALL_SCALE, BALL_SCALE)).into()
    }

    fn field(level: &str) -> BrickField {
        BrickField::from_level(&Level::parse(level), &mut Pcg32::seed_from_u64(1))
    }

    #[test]
    fn test_durability_counts_breakable_bricks() {
        let f = field("110012\n80");
        assert_eq!(f.bricks().len(), 4);
        assert_eq!(f.remaining_durability(), 3);
    }

    #[test]
    fn test_hit_from_below() {
        let mut f = field("1121");
        let brick = *f.bricks()[0].body();
        // Just under the bottom edge, centred on the first brick
        let p = vec2(brick.center().x, brick.max().y + BALL_SCALE * 0.4);
        let mut events = Vec::new();

        let hit = f.test_collision(&ball_at(p), false, &mut events).unwrap().unwrap();
        assert_eq!(hit.normal, Vector::Y);
        assert_eq!(hit.surface, Surface::Bricks);
        assert_eq!(events, vec![SoundEffect::BrickHit]);
        assert!(f.bricks()[0].is_broken());
        assert_eq!(f.remaining_durability(), 1);

        // Broken bricks are skipped on the next scan
        events.clear();
        assert!(f.test_collision(&ball_at(p), false, &mut events).unwrap().is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_two_adjacent_bricks_reflect_once() {
        let mut f = field("2121");
        let first = *f.bricks()[0].body();
        // Straddling the shared side, just below both bricks
        let p = vec2(first.max().x, first.max().y + BALL_SCALE * 0.4);
        let mut events = Vec::new();

        let hit = f.test_collision(&ball_at(p), false, &mut events).unwrap().unwrap();
        // Left/right strips of the shared side cancel; both bottoms add up
        assert!((hit.normal - Vector::Y).length() < 1e-12);
        assert_eq!(events, vec![SoundEffect::BrickHit, SoundEffect::BrickHit]);
        assert!(f.bricks().iter().all(|b| b.durability() == 1));
    }

    #[test]
    fn test_invincible_brick_still_bounces() {
        let mut f = field("03");
        let body = *f.bricks()[0].body();
        let p = vec2(body.min.x - BALL_SCALE * 0.4, body.center().y);
        let mut events = Vec::new();

        let hit = f.test_collision(&ball_at(p), false, &mut events).unwrap().unwrap();
        assert_eq!(hit.normal, Vector::NEG_X);
        assert_eq!(events, vec![SoundEffect::BrickInvincibleHit]);
        assert_eq!(f.remaining_durability(), 0);
        assert!(!f.bricks()[0].is_broken());
    }

    #[test]
    fn test_miss() {
        let mut f = field("11");
        let mut events = Vec::new();
        let p = vec2(0.5, 0.9);
        assert!(f.test_collision(&ball_at(p), false, &mut events).unwrap().is_none());
        assert_eq!(f.remaining_durability(), 1);
    }

    #[test]
    fn test_random_color_is_seeded() {
        let a = field("18181818");
        let b = field("18181818");
        let colors = |f: &BrickField| f.bricks().iter().map(|b| b.base_color()).collect::<Vec<_>>();
        assert_eq!(colors(&a), colors(&b));
    }
}
