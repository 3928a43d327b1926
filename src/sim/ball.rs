//! The ball
//!
//! Its collision region runs half a tick ahead of the drawn position, so an
//! overlap is caught before it becomes visible.

use serde::{Deserialize, Serialize};

use super::collision::reflect_velocity;
use super::region::{Ellipse, Region};
use super::vector::{Vector, vec2};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre, in arena units
    pub position: Vector,
    /// Units per millisecond
    pub velocity: Vector,
    /// Diameter on each axis
    pub scale: Vector,
    region: Ellipse,
}

impl Ball {
    pub fn new(position: Vector, velocity: Vector, scale: Vector) -> Self {
        Self {
            position,
            velocity,
            scale,
            region: Ellipse::from_scale(position, scale),
        }
    }

    /// Ball resting on a paddle, aimed at `angle` (radians from +x, upwards)
    pub fn resting_on(paddle_position: Vector, angle: f64) -> Self {
        let position = vec2(paddle_position.x, paddle_position.y - BALL_REST_OFFSET);
        let velocity = vec2(angle.cos(), -angle.sin()) * BALL_START_SPEED;
        Self::new(position, velocity, vec2(BALL_SCALE, BALL_SCALE))
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Collision region for the current tick
    pub fn region(&self) -> Region {
        Region::Ellipse(self.region)
    }

    /// Move by `velocity * dt` and place the collision region half a step ahead
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        let ahead = self.position + self.velocity * (0.5 * dt);
        self.region = Ellipse::from_scale(ahead, self.scale);
    }

    /// Bounce off a (possibly summed) surface normal
    pub fn reflect(&mut self, normal: Vector) {
        self.velocity = reflect_velocity(self.velocity, normal);
    }

    /// Scale the speed by `factor`
    ///
    /// Rejected (returns false) when it would push the speed above the
    /// maximum while speeding up or below the minimum while slowing down, or
    /// when the factor is not a positive finite number.
    pub fn rescale(&mut self, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            log::debug!("rejected speed factor {factor}");
            return false;
        }
        let speed = self.speed();
        if speed == 0.0 {
            return false;
        }
        let new_speed = factor * speed;
        if (new_speed > BALL_MAX_SPEED && factor > 1.0) || (new_speed < BALL_MIN_SPEED && factor < 1.0)
        {
            return false;
        }
        self.velocity *= new_speed / speed;
        true
    }

    /// Follow the paddle while resting on it
    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
        self.region = Ellipse::from_scale(self.position, self.scale);
    }
}
