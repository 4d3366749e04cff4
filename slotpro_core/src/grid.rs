use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paylines::Payline;
use crate::pool::SymbolPool;
use crate::symbols::Symbol;

pub const ROWS: usize = 3;
pub const COLS: usize = 3;

/// A 3x3 window of symbols, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Symbol; COLS]; ROWS],
}

impl Grid {
    pub fn new(cells: [[Symbol; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Draw every cell independently from `pool`, with replacement.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, pool: &SymbolPool) -> Self {
        let mut cells = [[Symbol::A; COLS]; ROWS];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = pool.draw(rng);
            }
        }
        Self { cells }
    }

    pub fn at(&self, row: usize, col: usize) -> Symbol {
        self.cells[row][col]
    }

    pub fn line_symbols(&self, line: &Payline) -> [Symbol; 3] {
        line.coords().map(|(r, c)| self.at(r, c))
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().flatten().filter(|&&s| s == symbol).count()
    }

    pub fn bonus_count(&self) -> usize {
        self.count(Symbol::Bonus)
    }

    pub fn rows(&self) -> &[[Symbol; COLS]; ROWS] {
        &self.cells
    }

    pub fn to_indices(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|s| s.to_index()).collect())
            .collect()
    }
}

/// Compact form: rows of glyphs joined by `/`, e.g. `AAA/W*B/CCD`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_str("/")?;
            }
            for s in row {
                write!(f, "{s}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != ROWS {
            return Err(ConfigError::InvalidGrid(format!(
                "expected {ROWS} rows, got {}",
                rows.len()
            )));
        }
        let mut cells = [[Symbol::A; COLS]; ROWS];
        for (r, text) in rows.iter().enumerate() {
            let glyphs: Vec<char> = text.chars().collect();
            if glyphs.len() != COLS {
                return Err(ConfigError::InvalidGrid(format!(
                    "row {r} has {} symbols",
                    glyphs.len()
                )));
            }
            for (c, g) in glyphs.into_iter().enumerate() {
                cells[r][c] = Symbol::from_glyph(g)
                    .ok_or_else(|| ConfigError::InvalidGrid(format!("unknown symbol '{g}'")))?;
            }
        }
        Ok(Self { cells })
    }
}
