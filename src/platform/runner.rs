//! Fixed-cadence loop
//!
//! Physics ticks at the physics rate with the real elapsed time as `dt`.
//! Snapshots go out at the slower render rate. The loop never sleeps a
//! negative amount and checks for a stop request between ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::clock::{Clock, SystemClock};
use super::input::InputQueue;
use crate::error::Result;
use crate::settings::Settings;
use crate::sim::{Simulation, Snapshot};

/// Cooperative stop signal, shareable across threads
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Loop counters returned when the runner stops
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    pub ticks: u64,
    pub frames: u64,
    pub commands: u64,
    /// Clock time spent in the loop (ms)
    pub elapsed_ms: f64,
}

pub struct Runner<C: Clock = SystemClock> {
    physics_period_ms: f64,
    render_period_ms: f64,
    max_frame_ms: f64,
    clock: C,
    stop: StopHandle,
}

impl Runner<SystemClock> {
    pub fn new(settings: &Settings) -> Self {
        Self::with_clock(settings, SystemClock::default())
    }
}

impl<C: Clock> Runner<C> {
    pub fn with_clock(settings: &Settings, clock: C) -> Self {
        Self {
            physics_period_ms: settings.physics_period_ms(),
            render_period_ms: settings.render_period_ms(),
            max_frame_ms: settings.max_frame_ms,
            clock,
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run until stopped or a tick fails
    ///
    /// `on_frame` receives a snapshot at the render cadence.
    pub fn run<F>(&mut self, sim: &mut Simulation, input: &InputQueue, mut on_frame: F) -> Result<RunStats>
    where
        F: FnMut(&Snapshot),
    {
        let mut stats = RunStats::default();
        let started = self.clock.now_ms();
        let mut previous = started;
        let mut last_render = started;

        log::info!(
            "Loop started ({:.0} Hz physics, {:.0} Hz render)",
            1000.0 / self.physics_period_ms,
            1000.0 / self.render_period_ms
        );

        while !self.stop.is_stopped() {
            let frame_start = self.clock.now_ms();
            let dt = (frame_start - previous).clamp(0.0, self.max_frame_ms);
            previous = frame_start;

            stats.commands += input.drain(sim) as u64;
            if let Err(e) = sim.tick(dt) {
                log::error!("Tick failed: {e}");
                return Err(e);
            }
            stats.ticks += 1;

            if frame_start - last_render >= self.render_period_ms {
                last_render += self.render_period_ms;
                // Skip frames we are too late for
                if frame_start - last_render >= self.render_period_ms {
                    last_render = frame_start;
                }
                on_frame(&sim.snapshot());
                stats.frames += 1;
            }

            let wait = frame_start + self.physics_period_ms - self.clock.now_ms();
            self.clock.sleep_ms(wait.max(0.0));
        }

        stats.elapsed_ms = self.clock.now_ms() - started;
        log::info!(
            "Loop stopped after {} ticks, {} frames ({:.0} ms)",
            stats.ticks,
            stats.frames,
            stats.elapsed_ms
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::clock::ManualClock;
    use crate::sim::{Command, GamePhase, Level};

    fn sim() -> Simulation {
        let settings = Settings {
            seed: Some(77),
            ..Default::default()
        };
        Simulation::new(&settings, Level::parse("11"))
    }

    #[test]
    fn test_cadence_with_manual_clock() {
        let settings = Settings::default();
        let mut runner = Runner::with_clock(&settings, ManualClock::new());
        let stop = runner.stop_handle();
        let queue = InputQueue::new();
        let mut s = sim();

        let mut frames = 0;
        let stats = runner
            .run(&mut s, &queue, |_| {
                frames += 1;
                if frames == 60 {
                    stop.stop();
                }
            })
            .unwrap();

        assert_eq!(stats.frames, 60);
        // Five physics ticks per rendered frame
        assert!((295..=305).contains(&stats.ticks), "ticks = {}", stats.ticks);
        assert!((stats.elapsed_ms - 1000.0).abs() < 20.0);
    }

    #[test]
    fn test_commands_drained_before_tick() {
        let settings = Settings::default();
        let mut runner = Runner::with_clock(&settings, ManualClock::new());
        let stop = runner.stop_handle();
        let queue = InputQueue::new();
        let tx = queue.sender();
        let mut s = sim();

        tx.send(Command::Launch);
        let mut first = None;
        let stats = runner
            .run(&mut s, &queue, |snap| {
                first.get_or_insert(snap.phase);
                stop.stop();
            })
            .unwrap();

        assert_eq!(stats.commands, 1);
        assert_eq!(first, Some(GamePhase::Playing));
        assert!(s.state().game_time > 0.0);
    }

    #[test]
    fn test_stopped_before_start_runs_nothing() {
        let settings = Settings::default();
        let mut runner = Runner::with_clock(&settings, ManualClock::new());
        runner.stop_handle().stop();
        let stats = runner.run(&mut sim(), &InputQueue::new(), |_| {}).unwrap();
        assert_eq!(stats.ticks, 0);
    }
}
