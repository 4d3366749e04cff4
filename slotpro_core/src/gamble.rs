//! Double-or-nothing coin gamble.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    /// Fair coin from the shared generator.
    pub fn flip<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoinSide::Heads => "heads",
            CoinSide::Tails => "tails",
        })
    }
}

impl FromStr for CoinSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "heads" => Ok(CoinSide::Heads),
            "t" | "tails" => Ok(CoinSide::Tails),
            other => Err(format!("expected heads or tails, got '{other}'")),
        }
    }
}

/// Double `win` when the call matches the coin, otherwise lose it.
/// Nothing to gamble on a zero win.
pub fn gamble(win: u64, choice: CoinSide, coin: CoinSide) -> u64 {
    if win == 0 {
        return 0;
    }
    if choice == coin {
        win.saturating_mul(2)
    } else {
        0
    }
}
