//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, level and command
//! sequence, a run reproduces exactly:
//! - Time only enters through `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (bricks in level order)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod bounds;
pub mod brick;
pub mod collision;
pub mod color;
pub mod level;
pub mod paddle;
pub mod region;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod vector;
pub mod wall;

pub use ball::Ball;
pub use bounds::{ArenaBounds, BoundsEdge, LightningWall};
pub use brick::Brick;
pub use collision::{Collision, Surface, reflect_velocity};
pub use color::Color;
pub use level::{ColorDigit, Level, LevelCell};
pub use paddle::Paddle;
pub use region::{Edge, EdgeStrip, Ellipse, Rect, Region};
pub use snapshot::{BallView, BrickView, PaddleView, Snapshot};
pub use state::{GamePhase, SimState, StatusFlags};
pub use tick::{Command, Simulation, TickReport};
pub use vector::{Vector, VectorExt, vec2};
pub use wall::BrickField;
