//! Payline sets for the 3x3 window.
//!
//! Lines are ordered triples of `(row, col)` coordinates. The three standard
//! sets are keyed by their line count: 3 (horizontals), 5 (horizontals and
//! diagonals) and 8 (horizontals, verticals and diagonals).

use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};
use crate::grid::{COLS, ROWS};

/// Three in-range coordinates. Only built by [`PaylineSet`], so every line
/// a caller can hold indexes inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payline([(usize, usize); 3]);

impl Payline {
    pub fn coords(&self) -> [(usize, usize); 3] {
        self.0
    }
}

const TOP: Payline = Payline([(0, 0), (0, 1), (0, 2)]);
const MIDDLE: Payline = Payline([(1, 0), (1, 1), (1, 2)]);
const BOTTOM: Payline = Payline([(2, 0), (2, 1), (2, 2)]);
const LEFT: Payline = Payline([(0, 0), (1, 0), (2, 0)]);
const CENTER: Payline = Payline([(0, 1), (1, 1), (2, 1)]);
const RIGHT: Payline = Payline([(0, 2), (1, 2), (2, 2)]);
const DIAGONAL_DOWN: Payline = Payline([(0, 0), (1, 1), (2, 2)]);
const DIAGONAL_UP: Payline = Payline([(2, 0), (1, 1), (0, 2)]);

/// An immutable, validated list of paylines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaylineSet {
    lines: Vec<Payline>,
}

impl PaylineSet {
    pub const KEYS: [u8; 3] = [3, 5, 8];

    pub fn from_key(key: u8) -> ConfigResult<Self> {
        let lines = match key {
            3 => vec![TOP, MIDDLE, BOTTOM],
            5 => vec![TOP, MIDDLE, BOTTOM, DIAGONAL_DOWN, DIAGONAL_UP],
            8 => vec![
                TOP,
                MIDDLE,
                BOTTOM,
                LEFT,
                CENTER,
                RIGHT,
                DIAGONAL_DOWN,
                DIAGONAL_UP,
            ],
            other => return Err(ConfigError::UnknownPaylineSet(other)),
        };
        Ok(Self { lines })
    }

    /// All eight lines; bonus rounds always play this set.
    pub fn full() -> Self {
        Self {
            lines: vec![
                TOP,
                MIDDLE,
                BOTTOM,
                LEFT,
                CENTER,
                RIGHT,
                DIAGONAL_DOWN,
                DIAGONAL_UP,
            ],
        }
    }

    pub fn custom(lines: Vec<[(usize, usize); 3]>) -> ConfigResult<Self> {
        if lines.is_empty() {
            return Err(ConfigError::EmptyPaylineSet);
        }
        for (line, coords) in lines.iter().enumerate() {
            if let Some(&(row, col)) = coords.iter().find(|&&(r, c)| r >= ROWS || c >= COLS) {
                return Err(ConfigError::CoordOutOfRange { line, row, col });
            }
        }
        Ok(Self {
            lines: lines.into_iter().map(Payline).collect(),
        })
    }

    pub fn lines(&self) -> &[Payline] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
