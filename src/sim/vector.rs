//! Vector helpers
//!
//! `Vector` is glam's `DVec3`: an immutable value type whose arithmetic
//! already returns fresh values. The extension trait adds the guarded
//! operations the simulation needs.

use glam::DVec3;

use crate::error::{Result, SimError};

/// 3-component vector in normalized arena space (z is carried but unused)
pub type Vector = DVec3;

/// Shorthand for a vector in the XY plane
#[inline]
pub fn vec2(x: f64, y: f64) -> Vector {
    DVec3::new(x, y, 0.0)
}

pub trait VectorExt: Sized {
    /// Same direction, given length. Fails on a zero vector.
    fn resized(self, length: f64) -> Result<Self>;

    /// Unit vector. Fails on a zero vector.
    fn checked_normalize(self) -> Result<Self>;

    /// Absolute angle to `other` in radians, 0 when either is zero
    fn angle_or_zero(self, other: Self) -> f64;

    /// Signed angle to `other` in the XY plane, positive from X towards Y
    ///
    /// Both vectors are projected onto XY first. Antiparallel vectors give +π.
    fn signed_angle_xy(self, other: Self) -> f64;
}

impl VectorExt for DVec3 {
    fn resized(self, length: f64) -> Result<Self> {
        let current = self.length();
        if current == 0.0 || !current.is_finite() {
            return Err(SimError::ZeroLengthVector);
        }
        Ok(self * (length / current))
    }

    fn checked_normalize(self) -> Result<Self> {
        self.resized(1.0)
    }

    fn angle_or_zero(self, other: Self) -> f64 {
        let lengths = self.length() * other.length();
        if lengths == 0.0 {
            return 0.0;
        }
        (self.dot(other) / lengths).clamp(-1.0, 1.0).acos()
    }

    fn signed_angle_xy(self, other: Self) -> f64 {
        let a = self.with_z(0.0);
        let b = other.with_z(0.0);
        let mut cross_z = a.cross(b).z;
        if cross_z == 0.0 {
            cross_z = 1.0;
        }
        a.angle_or_zero(b) * cross_z.signum()
    }
}
