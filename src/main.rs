//! The Wall entry point
//!
//! Headless runner: loads settings and a level, lets the autopilot play
//! for a while and logs how it went.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use the_wall::platform::{Autopilot, Clock, InputQueue, ManualClock, Runner};
    use the_wall::sim::{GamePhase, Level, Simulation, Snapshot};
    use the_wall::{Result, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "the-wall")]
    #[command(about = "Headless breakout simulation played by an autopilot")]
    #[command(version)]
    struct Args {
        /// Settings file (JSON)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Level file (built-in level when omitted)
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Seconds of wall time to run
        #[arg(long, default_value = "30")]
        seconds: f64,

        /// RNG seed, overrides the settings file
        #[arg(long)]
        seed: Option<u64>,

        /// Use a simulated clock and run as fast as possible
        #[arg(long)]
        fast: bool,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        let args = Args::parse();
        match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    fn run(args: Args) -> Result<()> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        if args.level.is_some() {
            settings.level = args.level.clone();
        }

        let level = match &settings.level {
            Some(path) => Level::load(path)?,
            None => Level::builtin(),
        };

        log::info!("The Wall (headless) starting...");
        let mut sim = Simulation::new(&settings, level);
        let queue = InputQueue::new();
        let frame_limit = (args.seconds * 1000.0 / settings.render_period_ms()).ceil() as u64;

        let last = if args.fast {
            drive(
                Runner::with_clock(&settings, ManualClock::new()),
                &mut sim,
                &queue,
                frame_limit,
            )?
        } else {
            drive(Runner::new(&settings), &mut sim, &queue, frame_limit)?
        };

        let snapshot = last.unwrap_or_else(|| sim.snapshot());
        let broken = snapshot.bricks.len() - snapshot.visible_bricks().count();
        let played = match snapshot.phase {
            GamePhase::GameOver => snapshot.previous_time,
            _ => snapshot.game_time,
        };
        log::info!(
            "Finished: {:?} after {:.1}s, {} bricks broken, {} left",
            snapshot.phase,
            played,
            broken,
            snapshot.remaining_durability
        );

        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Ok(())
    }

    /// Run until the frame limit or the end of the game
    fn drive<C: Clock>(
        mut runner: Runner<C>,
        sim: &mut Simulation,
        queue: &InputQueue,
        frame_limit: u64,
    ) -> Result<Option<Snapshot>> {
        let stop = runner.stop_handle();
        let tx = queue.sender();
        let pilot = Autopilot;
        let mut frames = 0u64;
        let mut last = None;

        runner.run(sim, queue, |snapshot| {
            frames += 1;
            for command in pilot.commands(snapshot) {
                tx.send(command);
            }
            let finished = matches!(snapshot.phase, GamePhase::GameOver | GamePhase::Victory);
            if finished || frames >= frame_limit {
                stop.stop();
            }
            last = Some(snapshot.clone());
        })?;

        Ok(last)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless runner needs threads and a wall clock
}
