//! Platform layer
//!
//! Everything that touches the outside world lives here:
//! - Time (wall clock or simulated)
//! - Input events, queued across threads
//! - The fixed-cadence loop driving the simulation

pub mod clock;
pub mod input;
pub mod runner;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{Autopilot, CommandSender, InputQueue};
pub use runner::{RunStats, Runner, StopHandle};
