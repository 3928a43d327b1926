//! Simulation status: flags and run timers
//!
//! One `SimState` lives inside the `Simulation` that owns it; nothing here is
//! global. Flags are a bit-set, the phase is derived from them.

use serde::{Deserialize, Serialize};

use crate::consts::MILESTONE_SECS;

bitflags::bitflags! {
    /// Status bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        const GAME_OVER = 1 << 0;
        const PAUSED = 1 << 1;
        const VICTORY = 1 << 2;
        const BALL_MOVING = 1 << 3;
        const MUTED = 1 << 4;
        const RED_MODE = 1 << 5;
        const ANIMATION_OFF = 1 << 6;

        /// Any of these set means "not playing"
        const HALTED = Self::GAME_OVER.bits() | Self::PAUSED.bits() | Self::VICTORY.bits();
    }
}

/// Current phase of play, derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch
    Serve,
    /// Ball in flight
    Playing,
    Paused,
    /// Ball left the arena
    GameOver,
    /// Every breakable brick is gone
    Victory,
}

impl GamePhase {
    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::Serve | GamePhase::Playing)
    }
}

/// Flags plus run timers (seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub flags: StatusFlags,
    /// Time played in the current run, advances only while the ball moves
    pub game_time: f64,
    /// `game_time` at the last difficulty escalation
    pub last_milestone: f64,
    /// Length of the previous run
    pub previous_time: f64,
    /// Length of the last won run
    pub previous_victory_time: f64,
}

impl SimState {
    pub fn new(flags: StatusFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        !self.flags.intersects(StatusFlags::HALTED)
    }

    pub fn is_game_over(&self) -> bool {
        self.flags.contains(StatusFlags::GAME_OVER)
    }

    pub fn is_paused(&self) -> bool {
        self.flags.contains(StatusFlags::PAUSED)
    }

    pub fn is_victory(&self) -> bool {
        self.flags.contains(StatusFlags::VICTORY)
    }

    pub fn is_ball_moving(&self) -> bool {
        self.flags.contains(StatusFlags::BALL_MOVING)
    }

    pub fn is_muted(&self) -> bool {
        self.flags.contains(StatusFlags::MUTED)
    }

    pub fn is_red_mode(&self) -> bool {
        self.flags.contains(StatusFlags::RED_MODE)
    }

    pub fn is_animation_off(&self) -> bool {
        self.flags.contains(StatusFlags::ANIMATION_OFF)
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_game_over() {
            GamePhase::GameOver
        } else if self.is_victory() {
            GamePhase::Victory
        } else if self.is_paused() {
            GamePhase::Paused
        } else if self.is_ball_moving() {
            GamePhase::Playing
        } else {
            GamePhase::Serve
        }
    }

    /// Flip a preference bit (mute, colour mode, animation)
    pub fn toggle(&mut self, flag: StatusFlags) {
        self.flags.toggle(flag);
    }

    /// Playing <-> Paused. Ignored once the run has ended.
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_game_over() || self.is_victory() {
            return false;
        }
        self.flags.toggle(StatusFlags::PAUSED);
        true
    }

    /// Launch the ball. Only from a playing state with the ball at rest.
    pub fn launch(&mut self) -> bool {
        if !self.is_playing() || self.is_ball_moving() {
            return false;
        }
        self.flags.insert(StatusFlags::BALL_MOVING);
        true
    }

    /// True once per elapsed milestone period; remembers the new milestone
    pub fn should_increase_difficulty(&mut self) -> bool {
        if self.game_time - self.last_milestone > MILESTONE_SECS {
            self.last_milestone = self.game_time;
            return true;
        }
        false
    }

    pub fn mark_game_over(&mut self) {
        self.flags.insert(StatusFlags::GAME_OVER);
        self.previous_time = self.game_time;
        self.game_time = 0.0;
    }

    pub fn mark_victory(&mut self) {
        self.flags.insert(StatusFlags::VICTORY);
        self.previous_time = self.game_time;
        self.previous_victory_time = self.game_time;
    }

    /// Back to a fresh serve; preferences survive
    ///
    /// Leaving a run that did not end in game over records its time first
    /// (game over already did).
    pub fn restart(&mut self) {
        if !self.is_game_over() {
            self.previous_time = self.game_time;
        }
        self.flags.remove(StatusFlags::HALTED | StatusFlags::BALL_MOVING);
        self.game_time = 0.0;
        self.last_milestone = 0.0;
    }
}
