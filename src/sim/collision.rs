//! Collision signals and response
//!
//! A collision is an ordinary value: each stage of the per-tick scan returns
//! `Option<Collision>` and the first `Some` ends the scan. The ball then
//! bounces exactly once, however many surfaces contributed to the normal.

use serde::{Deserialize, Serialize};

use super::bounds::BoundsEdge;
use super::vector::Vector;

/// What the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Paddle,
    /// One or more bricks, normals summed across the whole field
    Bricks,
    Bounds(BoundsEdge),
}

/// A detected bounce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    /// Unit normal (or summed-then-normalized normal for bricks)
    pub normal: Vector,
    pub surface: Surface,
}

impl Collision {
    pub fn new(normal: Vector, surface: Surface) -> Self {
        Self { normal, surface }
    }
}

/// Axis-wise elastic reflection
///
/// Each axis is flipped independently when the normal opposes the motion on
/// that axis. A corner hit flips both; a normal that summed to ~zero on an
/// axis leaves that axis alone.
#[inline]
pub fn reflect_velocity(velocity: Vector, normal: Vector) -> Vector {
    let mut out = velocity;
    if normal.x * velocity.x < 0.0 {
        out.x = -velocity.x;
    }
    if normal.y * velocity.y < 0.0 {
        out.y = -velocity.y;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vector::vec2;
    use proptest::prelude::*;

    #[test]
    fn test_reflect_ceiling() {
        // Ball moving up hits the ceiling (normal points down, +y)
        let v = reflect_velocity(vec2(0.0, -0.5), Vector::Y);
        assert_eq!(v, vec2(0.0, 0.5));
    }

    #[test]
    fn test_reflect_corner() {
        let n = vec2(-1.0, 1.0).normalize();
        let v = reflect_velocity(vec2(0.3, -0.4), n);
        assert_eq!(v, vec2(-0.3, 0.4));
    }

    #[test]
    fn test_reflect_ignores_receding_axis() {
        // Already moving away from the surface
        let v = reflect_velocity(vec2(0.3, 0.4), Vector::Y);
        assert_eq!(v, vec2(0.3, 0.4));
    }

    proptest! {
        #[test]
        fn prop_reflect_flips_only_opposed_axes(
            vx in -1.0f64..1.0, vy in -1.0f64..1.0,
            nx in -1.0f64..1.0, ny in -1.0f64..1.0,
        ) {
            let v = vec2(vx, vy);
            let r = reflect_velocity(v, vec2(nx, ny));
            let expect_x = if nx * vx < 0.0 { -vx } else { vx };
            let expect_y = if ny * vy < 0.0 { -vy } else { vy };
            prop_assert_eq!(r.x, expect_x);
            prop_assert_eq!(r.y, expect_y);
            prop_assert_eq!(r.length(), v.length());
        }

        #[test]
        fn prop_zero_normal_is_noop(vx in -1.0f64..1.0, vy in -1.0f64..1.0) {
            let v = vec2(vx, vy);
            prop_assert_eq!(reflect_velocity(v, Vector::ZERO), v);
        }
    }
}
