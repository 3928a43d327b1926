//! Simulation context and the per-tick update
//!
//! `Simulation` owns the status flags, the scene and the RNG. Commands are
//! applied between ticks; `tick` advances physics by one real-time step.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::bounds::ArenaBounds;
use super::collision::Collision;
use super::color::Color;
use super::level::Level;
use super::paddle::Paddle;
use super::snapshot::{BallView, BrickView, PaddleView, Snapshot};
use super::state::{GamePhase, SimState, StatusFlags};
use super::wall::BrickField;
use crate::audio::{LogSink, NotificationSink, SoundEffect};
use crate::consts::*;
use crate::error::Result;
use crate::settings::Settings;

/// External command, applied immediately
///
/// Every command is a no-op when it does not apply to the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Release the ball from the paddle
    Launch,
    /// Move the paddle centre to `x` (clamped to the playable span)
    MovePaddleTo(f64),
    /// Scale the ball speed directly
    AdjustBallSpeed(f64),
    /// Mouse wheel; positive notches slow the ball down
    SpeedWheel(i32),
    TogglePause,
    ToggleMute,
    ToggleAnimation,
    ToggleColorMode,
    Restart,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: GamePhase,
    /// The bounce credited this tick, if any
    pub collision: Option<Collision>,
    /// Notifications raised, in order (also raised while muted)
    pub events: Vec<SoundEffect>,
    pub difficulty_raised: bool,
    pub game_over: bool,
    pub victory: bool,
}

impl TickReport {
    fn idle(phase: GamePhase) -> Self {
        Self {
            phase,
            collision: None,
            events: Vec::new(),
            difficulty_raised: false,
            game_over: false,
            victory: false,
        }
    }
}

/// Moving parts, rebuilt on restart
#[derive(Debug, Clone)]
struct Scene {
    bounds: ArenaBounds,
    wall: BrickField,
    paddle: Paddle,
    ball: Ball,
}

impl Scene {
    fn new(level: &Level, rng: &mut Pcg32) -> Self {
        let bounds = ArenaBounds::new(rng);
        let wall = BrickField::from_level(level, rng);
        let paddle = Paddle::default();
        let angle = FRAC_PI_4 + rng.random::<f64>() * FRAC_PI_2;
        let ball = Ball::resting_on(paddle.position, angle);
        Self {
            bounds,
            wall,
            paddle,
            ball,
        }
    }
}

pub struct Simulation {
    state: SimState,
    level: Level,
    scene: Scene,
    rng: Pcg32,
    sink: Box<dyn NotificationSink>,
}

impl Simulation {
    pub fn new(settings: &Settings, level: Level) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut flags = StatusFlags::empty();
        flags.set(StatusFlags::MUTED, settings.muted);
        flags.set(StatusFlags::RED_MODE, settings.red_mode);
        flags.set(StatusFlags::ANIMATION_OFF, settings.animation_off);

        let scene = Scene::new(&level, &mut rng);
        log::info!(
            "Simulation ready (seed {seed}, {} bricks, {} to break)",
            scene.wall.bricks().len(),
            scene.wall.remaining_durability()
        );

        Self {
            state: SimState::new(flags),
            level,
            scene,
            rng,
            sink: Box::new(LogSink::new()),
        }
    }

    /// Route notifications to `sink` instead of the debug log
    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn ball(&self) -> &Ball {
        &self.scene.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.scene.paddle
    }

    pub fn wall(&self) -> &BrickField {
        &self.scene.wall
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.scene.bounds
    }

    /// Replace the ball, for scripted scenarios
    pub fn set_ball(&mut self, ball: Ball) {
        self.scene.ball = ball;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Launch => {
                if self.state.launch() {
                    log::info!("Ball launched");
                } else {
                    log::debug!("launch ignored in {:?}", self.phase());
                }
            }
            Command::MovePaddleTo(x) => {
                if !self.state.is_playing() {
                    return;
                }
                let paddle = &mut self.scene.paddle;
                let x = paddle.clamp_x(x);
                paddle.move_to(x);
                if !self.state.is_ball_moving() {
                    self.scene.ball.set_x(x);
                }
            }
            Command::AdjustBallSpeed(factor) => {
                if self.state.is_playing() && !self.scene.ball.rescale(factor) {
                    log::debug!("speed factor {factor} rejected");
                }
            }
            Command::SpeedWheel(notches) => {
                if !self.state.is_playing() {
                    return;
                }
                let factor = if notches > 0 {
                    WHEEL_FACTOR
                } else {
                    1.0 / WHEEL_FACTOR
                };
                for _ in 0..notches.unsigned_abs() {
                    if !self.scene.ball.rescale(factor) {
                        break;
                    }
                }
            }
            Command::TogglePause => {
                if self.state.toggle_pause() {
                    log::info!("{:?}", self.phase());
                }
            }
            Command::ToggleMute => self.state.toggle(StatusFlags::MUTED),
            Command::ToggleAnimation => self.state.toggle(StatusFlags::ANIMATION_OFF),
            Command::ToggleColorMode => self.state.toggle(StatusFlags::RED_MODE),
            Command::Restart => self.restart(),
        }
    }

    /// Fresh scene and a ball waiting on the paddle; preferences survive
    pub fn restart(&mut self) {
        self.state.restart();
        self.scene = Scene::new(&self.level, &mut self.rng);
        log::info!("Restarted (previous run {:.1}s)", self.state.previous_time);
    }

    /// Advance by `dt` milliseconds
    ///
    /// Nothing moves unless playing. Lightning animates while playing with
    /// animation on; everything else only while the ball is in flight.
    /// A negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f64) -> Result<TickReport> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::debug!("Ignoring invalid dt {dt}");
            0.0
        };
        if !self.state.is_playing() {
            return Ok(TickReport::idle(self.state.phase()));
        }

        let scene = &mut self.scene;
        if !self.state.is_animation_off() {
            scene.bounds.update(dt, &mut self.rng);
        }
        if !self.state.is_ball_moving() {
            return Ok(TickReport::idle(self.state.phase()));
        }

        let mut report = TickReport::idle(GamePhase::Playing);

        self.state.game_time += dt / 1000.0;
        scene.wall.update(dt)?;
        scene.paddle.refresh_region();
        scene.ball.advance(dt);

        if self.state.should_increase_difficulty() {
            report.difficulty_raised = scene.ball.rescale(DIFFICULTY_FACTOR);
            log::info!(
                "Difficulty milestone at {:.1}s (speed {:.6})",
                self.state.game_time,
                scene.ball.speed()
            );
        }

        let ball = scene.ball.region();
        if scene.bounds.is_out_of_bounds(&ball) {
            self.state.mark_game_over();
            report.game_over = true;
            log::info!("Game over after {:.1}s", self.state.previous_time);
        } else {
            let events = &mut report.events;
            let animation_off = self.state.is_animation_off();

            let mut hit = scene.paddle.test_collision(&ball, events);
            if hit.is_none() {
                hit = scene.wall.test_collision(&ball, animation_off, events)?;
            }
            if hit.is_none() {
                hit = scene.bounds.test_collision(&ball, events);
            }
            if let Some(collision) = hit {
                scene.ball.reflect(collision.normal);
            }
            report.collision = hit;

            if scene.wall.remaining_durability() == 0 {
                self.state.mark_victory();
                report.victory = true;
                log::info!("Victory in {:.1}s", self.state.previous_victory_time);
            }
        }

        if !self.state.is_muted() {
            for effect in &report.events {
                self.sink.notify(*effect);
            }
        }

        report.phase = self.state.phase();
        Ok(report)
    }

    /// Red or blue, depending on the colour mode
    pub fn color_scheme(&self) -> Color {
        if self.state.is_red_mode() {
            Color::SCHEME_RED
        } else {
            Color::SCHEME_BLUE
        }
    }

    pub fn background(&self) -> Color {
        self.color_scheme().darker().darker().darker()
    }

    pub fn snapshot(&self) -> Snapshot {
        let Scene {
            bounds,
            wall,
            paddle,
            ball,
        } = &self.scene;

        Snapshot {
            flags: self.state.flags,
            phase: self.phase(),
            game_time: self.state.game_time,
            previous_time: self.state.previous_time,
            previous_victory_time: self.state.previous_victory_time,
            ball: BallView {
                position: ball.position,
                velocity: ball.velocity,
                scale: ball.scale,
            },
            paddle: PaddleView {
                position: paddle.position,
                scale: paddle.scale,
            },
            bricks: wall
                .bricks()
                .iter()
                .map(|b| BrickView {
                    position: b.position,
                    scale: b.scale,
                    durability: b.durability(),
                    base_color: b.base_color(),
                    accent_color: b.accent_color(),
                    visible: b.is_visible(),
                })
                .collect(),
            remaining_durability: wall.remaining_durability(),
            lightning: bounds.lightning().iter().map(|l| l.arena_points()).collect(),
            color_scheme: self.color_scheme(),
            background: self.background(),
        }
    }
}
