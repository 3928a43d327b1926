//! Level text format
//!
//! Each line is a wall row read two characters at a time: a durability digit
//! followed by a colour digit, both `0..=8`. A `#` in either half of a pair
//! ends the row. Pairs with any other character are skipped. Rows past
//! `MAX_ROWS` and pairs past `BRICKS_PER_ROW` are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::vector::{Vector, vec2};
use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH, BRICKS_PER_ROW, MAX_ROWS, WALL_START};
use crate::error::Result;

/// Level shipped with the crate
pub const BUILTIN_LEVEL: &str = include_str!("../../levels/1.txt");

const COMMENT: u8 = b'#';
/// Colour digit meaning "pick one at random"
const RANDOM_COLOR: u8 = 8;

/// Brick colour as written in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorDigit {
    /// 3-bit RGB
    Fixed(u8),
    Random,
}

/// One parsed brick cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCell {
    pub row: usize,
    pub col: usize,
    /// 0 is invincible
    pub durability: u8,
    pub color: ColorDigit,
}

impl LevelCell {
    /// Top-left corner of the brick in arena space
    pub fn position(&self) -> Vector {
        vec2(
            WALL_START + self.col as f64 * BRICK_WIDTH,
            WALL_START + self.row as f64 * BRICK_HEIGHT,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Cells in row-major order
    pub cells: Vec<LevelCell>,
    /// Pairs dropped for holding an invalid digit
    pub skipped: usize,
}

impl Level {
    /// Parse rows of two-character cells
    ///
    /// A `#` in either half of a pair ends the row, so `"18##0330"` holds a
    /// single brick.
    pub fn parse(text: &str) -> Self {
        let mut level = Level::default();

        for (row, line) in text.lines().take(MAX_ROWS).enumerate() {
            let bytes = line.as_bytes();
            for (col, pair) in bytes.chunks_exact(2).take(BRICKS_PER_ROW).enumerate() {
                let (d, c) = (pair[0], pair[1]);
                if d == COMMENT || c == COMMENT {
                    break;
                }
                match (digit(d), digit(c)) {
                    (Some(durability), Some(color)) => level.cells.push(LevelCell {
                        row,
                        col,
                        durability,
                        color: if color == RANDOM_COLOR {
                            ColorDigit::Random
                        } else {
                            ColorDigit::Fixed(color)
                        },
                    }),
                    _ => {
                        log::debug!(
                            "skipping level cell {row}:{col} {:?}",
                            String::from_utf8_lossy(pair)
                        );
                        level.skipped += 1;
                    }
                }
            }
        }

        level
    }

    pub fn builtin() -> Self {
        Self::parse(BUILTIN_LEVEL)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let level = Self::parse(&text);
        log::info!(
            "Loaded level {} ({} bricks, {} skipped)",
            path.display(),
            level.cells.len(),
            level.skipped
        );
        Ok(level)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[inline]
fn digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'8' => Some(b - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_ends_the_row() {
        let level = Level::parse("18##0330");
        assert_eq!(level.cells.len(), 1);
        assert_eq!(
            level.cells[0],
            LevelCell {
                row: 0,
                col: 0,
                durability: 1,
                color: ColorDigit::Random,
            }
        );
    }

    #[test]
    fn test_hash_in_second_half_also_ends_row() {
        let level = Level::parse("11220#33");
        assert_eq!(level.cells.len(), 2);
        assert_eq!(level.cells[1].col, 1);
    }

    #[test]
    fn test_invalid_pairs_are_skipped() {
        let level = Level::parse("119x0330\n 1");
        let cols: Vec<_> = level.cells.iter().map(|c| c.col).collect();
        assert_eq!(cols, vec![0, 2, 3]);
        assert_eq!(level.cells[1].durability, 0);
        assert_eq!(level.cells[1].color, ColorDigit::Fixed(3));
        assert_eq!(level.skipped, 2);
    }

    #[test]
    fn test_odd_tail_is_dropped() {
        let level = Level::parse("11223");
        assert_eq!(level.cells.len(), 2);
        assert_eq!(level.skipped, 0);
    }

    #[test]
    fn test_limits() {
        let long_row = "11".repeat(BRICKS_PER_ROW + 5);
        let text = vec![long_row.as_str(); MAX_ROWS + 3].join("\n");
        let level = Level::parse(&text);
        assert_eq!(level.cells.len(), BRICKS_PER_ROW * MAX_ROWS);
        assert!(level.cells.iter().all(|c| c.row < MAX_ROWS && c.col < BRICKS_PER_ROW));
    }

    #[test]
    fn test_cell_position() {
        let cell = LevelCell {
            row: 2,
            col: 12,
            durability: 1,
            color: ColorDigit::Fixed(1),
        };
        let p = cell.position();
        assert!((p.x - (WALL_START + 12.0 * BRICK_WIDTH)).abs() < 1e-12);
        assert!((p.y - (WALL_START + 2.0 * BRICK_HEIGHT)).abs() < 1e-12);
        // Last column ends at the right side of the wall
        assert!((p.x + BRICK_WIDTH - (1.0 - WALL_START)).abs() < 1e-12);
    }

    #[test]
    fn test_builtin_level() {
        let level = Level::builtin();
        assert_eq!(level.len(), 70);
        assert_eq!(level.cells.iter().filter(|c| c.durability == 0).count(), 4);
        // Blank line keeps its row
        assert!(level.cells.iter().all(|c| c.row != 4));
    }
}
