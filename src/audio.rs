//! Notification sinks for sound effects
//!
//! The simulation never plays audio itself. It names the event and hands it to
//! a sink; delivery is fire-and-forget and never blocks a tick.

use crossbeam_channel::{Sender, TrySendError};
use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a side edge or the ceiling
    WallHit,
    /// Ball damages or breaks a brick
    BrickHit,
    /// Ball bounces off an invincible brick
    BrickInvincibleHit,
}

impl SoundEffect {
    /// Event key understood by the audio collaborator
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle-hit",
            SoundEffect::WallHit => "wall-hit",
            SoundEffect::BrickHit => "brick-hit",
            SoundEffect::BrickInvincibleHit => "brick-invincible-hit",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "paddle-hit" => Some(SoundEffect::PaddleHit),
            "wall-hit" => Some(SoundEffect::WallHit),
            "brick-hit" => Some(SoundEffect::BrickHit),
            "brick-invincible-hit" => Some(SoundEffect::BrickInvincibleHit),
            _ => None,
        }
    }
}

/// Receiver of fire-and-forget notifications
pub trait NotificationSink: Send {
    fn notify(&mut self, effect: SoundEffect);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _effect: SoundEffect) {}
}

/// Writes each notification to the debug log
#[derive(Debug, Default)]
pub struct LogSink {
    played: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications seen so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl NotificationSink for LogSink {
    fn notify(&mut self, effect: SoundEffect) {
        self.played += 1;
        log::debug!("sound: {}", effect.name());
    }
}

/// Forwards notifications to another thread over a bounded channel
///
/// A full or disconnected channel drops the notification.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<SoundEffect>,
    dropped: u64,
}

impl ChannelSink {
    pub fn new(tx: Sender<SoundEffect>) -> Self {
        Self { tx, dropped: 0 }
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&mut self, effect: SoundEffect) {
        match self.tx.try_send(effect) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
            }
        }
    }
}
