//! Read-only view of the simulation for renderers and UI

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::state::{GamePhase, StatusFlags};
use super::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub position: Vector,
    pub velocity: Vector,
    pub scale: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub position: Vector,
    pub scale: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub position: Vector,
    pub scale: Vector,
    pub durability: u8,
    pub base_color: Color,
    pub accent_color: Color,
    pub visible: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub flags: StatusFlags,
    pub phase: GamePhase,
    /// Seconds
    pub game_time: f64,
    pub previous_time: f64,
    pub previous_victory_time: f64,
    pub ball: BallView,
    pub paddle: PaddleView,
    pub bricks: Vec<BrickView>,
    pub remaining_durability: usize,
    /// Spark points per lightning strip, arena space
    pub lightning: Vec<Vec<Vector>>,
    pub color_scheme: Color,
    pub background: Color,
}

impl Snapshot {
    pub fn visible_bricks(&self) -> impl Iterator<Item = &BrickView> {
        self.bricks.iter().filter(|b| b.visible)
    }
}
