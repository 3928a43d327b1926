//! Overlap regions
//!
//! Regions are small immutable values rebuilt whenever their owner moves.
//! Every pair has an exact, closed overlap test: touching counts, and
//! zero-area strips are ordinary rectangles, not a special case.

use serde::{Deserialize, Serialize};

use super::vector::{Vector, vec2};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vector,
    pub size: Vector,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: vec2(x, y),
            size: vec2(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vector {
        self.min + self.size
    }

    pub fn center(&self) -> Vector {
        self.min + self.size * 0.5
    }

    /// Closest point of the rectangle to `p` (clamped per axis)
    #[inline]
    pub fn closest_point(&self, p: Vector) -> Vector {
        let max = self.max();
        vec2(p.x.clamp(self.min.x, max.x), p.y.clamp(self.min.y, max.y))
    }

    pub fn overlaps_rect(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x <= b_max.x
            && other.min.x <= a_max.x
            && self.min.y <= b_max.y
            && other.min.y <= a_max.y
    }
}

/// Axis-aligned ellipse; a circle when both radii match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Vector,
    pub radii: Vector,
}

impl Ellipse {
    pub fn new(center: Vector, radii: Vector) -> Self {
        Self { center, radii }
    }

    /// Ellipse inscribed in a box of the given size centred on `center`
    pub fn from_scale(center: Vector, scale: Vector) -> Self {
        Self::new(center, scale * 0.5)
    }

    /// Squared "ellipse distance" of `p` from the centre: <= 1 means inside
    fn normalized_distance_sq(&self, p: Vector) -> f64 {
        let dx = axis_ratio(p.x - self.center.x, self.radii.x);
        let dy = axis_ratio(p.y - self.center.y, self.radii.y);
        dx * dx + dy * dy
    }

    pub fn contains(&self, p: Vector) -> bool {
        self.normalized_distance_sq(p) <= 1.0
    }

    /// Exact ellipse/rectangle test
    ///
    /// Scaling each axis by the inverse radius turns the ellipse into a unit
    /// circle and keeps the rectangle axis-aligned, so the clamped closest
    /// point is still the closest point after scaling.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = rect.closest_point(self.center);
        self.contains(closest)
    }

    /// A zero radius collapses the ellipse onto a segment (or point)
    fn is_degenerate(&self) -> bool {
        self.radii.x == 0.0 || self.radii.y == 0.0
    }

    /// Bounding box; equal to the ellipse itself when degenerate
    pub fn bounds(&self) -> Rect {
        let min = self.center - self.radii;
        Rect {
            min,
            size: self.radii * 2.0,
        }
    }

    pub fn overlaps_ellipse(&self, other: &Ellipse) -> bool {
        match (self.is_degenerate(), other.is_degenerate()) {
            (true, true) => return self.bounds().overlaps_rect(&other.bounds()),
            (true, false) => return other.overlaps_rect(&self.bounds()),
            (false, true) => return self.overlaps_rect(&other.bounds()),
            (false, false) => {}
        }
        // Map `self` to the unit circle at the origin
        let c = vec2(
            (other.center.x - self.center.x) / self.radii.x,
            (other.center.y - self.center.y) / self.radii.y,
        );
        let a = other.radii.x / self.radii.x;
        let b = other.radii.y / self.radii.y;
        let inside = (c.x / a).powi(2) + (c.y / b).powi(2) <= 1.0;
        if inside {
            return true;
        }
        distance_to_ellipse(a, b, c.x.abs(), c.y.abs()) <= 1.0
    }
}

/// Overlap primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Region {
    Rect(Rect),
    Ellipse(Ellipse),
}

impl Region {
    pub fn overlaps(&self, other: &Region) -> bool {
        match (self, other) {
            (Region::Rect(a), Region::Rect(b)) => a.overlaps_rect(b),
            (Region::Ellipse(e), Region::Rect(r)) | (Region::Rect(r), Region::Ellipse(e)) => {
                e.overlaps_rect(r)
            }
            (Region::Ellipse(a), Region::Ellipse(b)) => a.overlaps_ellipse(b),
        }
    }
}

impl From<Rect> for Region {
    fn from(r: Rect) -> Self {
        Region::Rect(r)
    }
}

impl From<Ellipse> for Region {
    fn from(e: Ellipse) -> Self {
        Region::Ellipse(e)
    }
}

/// Side of a rectangle, carrying the outward normal used for reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Outward unit normal (y grows downwards)
    pub fn normal(&self) -> Vector {
        match self {
            Edge::Top => Vector::NEG_Y,
            Edge::Bottom => Vector::Y,
            Edge::Left => Vector::NEG_X,
            Edge::Right => Vector::X,
        }
    }

    /// Thin strip of `thickness` lying along this side of `rect`
    pub fn strip(&self, rect: &Rect, thickness: f64) -> Rect {
        let Rect { min, size } = *rect;
        match self {
            Edge::Top => Rect::new(min.x, min.y, size.x, thickness),
            Edge::Bottom => Rect::new(min.x, min.y + size.y, size.x, thickness),
            Edge::Left => Rect::new(min.x, min.y, thickness, size.y),
            Edge::Right => Rect::new(min.x + size.x, min.y, thickness, size.y),
        }
    }
}

/// A strip region tagged with the normal it reflects along
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStrip {
    pub edge: Edge,
    pub region: Rect,
}

impl EdgeStrip {
    pub fn new(edge: Edge, body: &Rect, thickness: f64) -> Self {
        Self {
            edge,
            region: edge.strip(body, thickness),
        }
    }

    #[inline]
    pub fn normal(&self) -> Vector {
        self.edge.normal()
    }
}

/// `d / r`, treating a zero radius as "only d == 0 fits"
#[inline]
fn axis_ratio(d: f64, r: f64) -> f64 {
    if r == 0.0 {
        if d == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        d / r
    }
}

/// Distance from `(y0, y1)` (first quadrant, outside) to the ellipse with
/// semi-axes `(a, b)` centred at the origin
fn distance_to_ellipse(a: f64, b: f64, y0: f64, y1: f64) -> f64 {
    if a >= b {
        distance_sorted(a, b, y0, y1)
    } else {
        distance_sorted(b, a, y1, y0)
    }
}

/// Robust point/ellipse distance for `e0 >= e1 > 0`, `y0, y1 >= 0`
fn distance_sorted(e0: f64, e1: f64, y0: f64, y1: f64) -> f64 {
    if y1 > 0.0 {
        if y0 > 0.0 {
            let z0 = y0 / e0;
            let z1 = y1 / e1;
            let g = z0 * z0 + z1 * z1 - 1.0;
            if g == 0.0 {
                return 0.0;
            }
            let r0 = (e0 / e1).powi(2);
            let s = ellipse_root(r0, z0, z1, g);
            let x0 = r0 * y0 / (s + r0);
            let x1 = y1 / (s + 1.0);
            (x0 - y0).hypot(x1 - y1)
        } else {
            (y1 - e1).abs()
        }
    } else {
        let numer0 = e0 * y0;
        let denom0 = e0 * e0 - e1 * e1;
        if numer0 < denom0 {
            let xde0 = numer0 / denom0;
            let x0 = e0 * xde0;
            let x1 = e1 * (1.0 - xde0 * xde0).max(0.0).sqrt();
            (x0 - y0).hypot(x1)
        } else {
            (y0 - e0).abs()
        }
    }
}

/// Bisection for the Lagrange parameter of the closest point
fn ellipse_root(r0: f64, z0: f64, z1: f64, g: f64) -> f64 {
    const MAX_ITERATIONS: usize = 1074;

    let n0 = r0 * z0;
    let mut s0 = z1 - 1.0;
    let mut s1 = if g < 0.0 { 0.0 } else { n0.hypot(z1) - 1.0 };
    let mut s = 0.0;
    for _ in 0..MAX_ITERATIONS {
        s = 0.5 * (s0 + s1);
        if s == s0 || s == s1 {
            break;
        }
        let ratio0 = n0 / (s + r0);
        let ratio1 = z1 / (s + 1.0);
        let g = ratio0 * ratio0 + ratio1 * ratio1 - 1.0;
        if g > 0.0 {
            s0 = s;
        } else if g < 0.0 {
            s1 = s;
        } else {
            break;
        }
    }
    s
}
