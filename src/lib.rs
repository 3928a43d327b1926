//! The Wall - a breakout-style collision and physics simulation
//!
//! Core modules:
//! - `sim`: Simulation (geometry, ball/paddle/bricks, bounds, tick state machine)
//! - `platform`: Fixed-cadence loop, clock pacing and queued input
//! - `audio`: Fire-and-forget notification sinks
//! - `settings`: Runtime configuration
//! - `error`: Error kinds for invariant violations and configuration

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{NotificationSink, SoundEffect};
pub use error::{Result, SimError};
pub use settings::Settings;

/// Game configuration constants
///
/// All lengths are in normalized arena units (the arena spans 0..1 on each
/// axis), times are in milliseconds unless noted otherwise.
pub mod consts {
    /// Default physics cadence (Hz)
    pub const PHYSICS_HZ: f64 = 300.0;
    /// Default render cadence (Hz)
    pub const RENDER_HZ: f64 = 60.0;
    /// Longest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Bricks per wall row
    pub const BRICKS_PER_ROW: usize = 13;
    /// Rows read from a level
    pub const MAX_ROWS: usize = 25;
    /// Offset of the wall from the arena's top-left corner (both axes)
    pub const WALL_START: f64 = 1.0 / (BRICKS_PER_ROW as f64 + 2.0);
    /// Horizontal span of the wall (and of the playable area)
    pub const WALL_WIDTH: f64 = 1.0 - 2.0 * WALL_START;
    /// Width of one brick
    pub const BRICK_WIDTH: f64 = WALL_WIDTH / BRICKS_PER_ROW as f64;
    /// Height of one brick
    pub const BRICK_HEIGHT: f64 = 1.0 / (MAX_ROWS as f64 + 5.0);
    /// Thickness of the strips that stand in for brick edges
    pub const EDGE_STRIP: f64 = 0.001;
    /// Brick fade animation length (ms)
    pub const FADE_MS: f64 = 400.0;

    /// Ball diameter (both axes)
    pub const BALL_SCALE: f64 = 1.0 / 50.0;
    /// Launch speed (units/ms)
    pub const BALL_START_SPEED: f64 = 0.0006;
    /// Fastest the ball may go (units/ms)
    pub const BALL_MAX_SPEED: f64 = 0.0012;
    /// Slowest the ball may go (units/ms)
    pub const BALL_MIN_SPEED: f64 = 0.00006;
    /// Ball resting height above the paddle centre
    pub const BALL_REST_OFFSET: f64 = 0.8 / 30.0;

    /// Paddle centre at start
    pub const PADDLE_START_X: f64 = 0.5;
    pub const PADDLE_Y: f64 = 28.0 / 30.0;
    /// Paddle extent (both axes)
    pub const PADDLE_SCALE: f64 = 1.0 / 8.0;

    /// Seconds of play between difficulty escalations
    pub const MILESTONE_SECS: f64 = 30.0;
    /// Speed factor applied at each milestone
    pub const DIFFICULTY_FACTOR: f64 = 1.1;
    /// Speed factor for one wheel notch towards "slower"
    pub const WHEEL_FACTOR: f64 = 0.95;

    /// Lightning animation frame length (ms)
    pub const LIGHTNING_FRAME_MS: f64 = 125.0;
    /// Spark points per lightning strip, including both end points
    pub const SPARK_POINTS: usize = 20;
}
