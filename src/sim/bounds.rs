//! Arena bounds: side edges, ceiling, containment and lightning walls
//!
//! The side edges and the ceiling reflect the ball. The containment rect is
//! only used to notice that the ball has left the arena through the open
//! bottom. Lightning walls are decoration drawn over the side edges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Collision, Surface};
use super::region::{Rect, Region};
use super::vector::{Vector, vec2};
use crate::audio::SoundEffect;
use crate::consts::{LIGHTNING_FRAME_MS, SPARK_POINTS, WALL_START};

/// Reflecting edge of the arena, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundsEdge {
    Right,
    Ceiling,
    Left,
}

impl BoundsEdge {
    pub const ORDER: [BoundsEdge; 3] = [BoundsEdge::Right, BoundsEdge::Ceiling, BoundsEdge::Left];

    /// Inward unit normal
    pub fn normal(&self) -> Vector {
        match self {
            BoundsEdge::Right => Vector::NEG_X,
            BoundsEdge::Ceiling => Vector::Y,
            BoundsEdge::Left => Vector::X,
        }
    }

    /// Region covered by this edge for an arena border of width `s`
    pub fn rect(&self, s: f64) -> Rect {
        match self {
            BoundsEdge::Right => Rect::new(1.0 - s, s, s, 1.0 - s),
            BoundsEdge::Ceiling => Rect::new(0.0, 0.0, 1.0, s),
            BoundsEdge::Left => Rect::new(0.0, s, s, 1.0 - s),
        }
    }
}

/// One animated lightning strip
///
/// Spark points are in local space (0..1 on both axes). The two end points
/// stay at `origin_x`; the interior points jump to new random places every
/// animation frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningWall {
    pub position: Vector,
    pub scale: Vector,
    origin_x: f64,
    points: Vec<Vector>,
    /// Time left in the current animation frame (ms)
    frame_ms: f64,
}

impl LightningWall {
    pub fn new<R: Rng>(position: Vector, scale: Vector, origin_x: f64, rng: &mut R) -> Self {
        let mut wall = Self {
            position,
            scale,
            origin_x,
            points: Vec::with_capacity(SPARK_POINTS),
            frame_ms: LIGHTNING_FRAME_MS,
        };
        wall.randomize(rng);
        wall
    }

    pub fn update<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        self.frame_ms -= dt;
        if self.frame_ms <= 0.0 {
            self.frame_ms = LIGHTNING_FRAME_MS;
            self.randomize(rng);
        }
    }

    /// Spark points in local space
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Spark points in arena space
    pub fn arena_points(&self) -> Vec<Vector> {
        self.points
            .iter()
            .map(|p| self.position + *p * self.scale)
            .collect()
    }

    fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let mut ys: Vec<f64> = (0..SPARK_POINTS - 2).map(|_| rng.random::<f64>()).collect();
        ys.sort_by(f64::total_cmp);

        self.points.clear();
        self.points.push(vec2(self.origin_x, 0.0));
        for y in ys {
            self.points.push(vec2(rng.random::<f64>(), y));
        }
        self.points.push(vec2(self.origin_x, 1.0));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaBounds {
    edges: [(BoundsEdge, Rect); 3],
    containment: Rect,
    /// Far left, mid left, mid right, far right
    lightning: [LightningWall; 4],
}

impl ArenaBounds {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let s = WALL_START;
        let strip = vec2(s / 2.0, 1.0 - 2.0 * s);
        Self {
            edges: BoundsEdge::ORDER.map(|edge| (edge, edge.rect(s))),
            containment: Rect::new(0.0, 0.0, 1.0, 1.0),
            lightning: [
                LightningWall::new(vec2(0.0, s), strip, 1.0, rng),
                LightningWall::new(vec2(s / 2.0, s), strip, 0.0, rng),
                LightningWall::new(vec2(1.0 - s, s), strip, 1.0, rng),
                LightningWall::new(vec2(1.0 - s / 2.0, s), strip, 0.0, rng),
            ],
        }
    }

    /// True once the ball no longer touches the arena at all
    pub fn is_out_of_bounds(&self, ball: &Region) -> bool {
        !ball.overlaps(&Region::Rect(self.containment))
    }

    /// First touched edge in check order wins
    pub fn test_collision(&self, ball: &Region, events: &mut Vec<SoundEffect>) -> Option<Collision> {
        let (edge, _) = self
            .edges
            .iter()
            .find(|(_, rect)| ball.overlaps(&Region::Rect(*rect)))?;
        events.push(SoundEffect::WallHit);
        Some(Collision::new(edge.normal(), Surface::Bounds(*edge)))
    }

    /// Advance the lightning animation
    pub fn update<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        for wall in &mut self.lightning {
            wall.update(dt, rng);
        }
    }

    pub fn lightning(&self) -> &[LightningWall] {
        &self.lightning
    }
}
