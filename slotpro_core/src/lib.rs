pub mod bonus;
pub mod engine;
pub mod error;
pub mod gamble;
pub mod grid;
pub mod paylines;
pub mod paytable;
pub mod pool;
pub mod rng;
pub mod symbols;

pub use crate::bonus::{
    run_bonus_round, run_configured_bonus_round, BonusConfig, BonusRoundResult, BonusSpin,
};
pub use crate::engine::{
    evaluate_line, score_grid, spin_once, spin_with_key, spin_with_seeds, verify_grid, EngineParams,
    LineOutcome, LineWin, SpinResult,
};
pub use crate::error::{ConfigError, ConfigResult};
pub use crate::gamble::{gamble, CoinSide};
pub use crate::grid::{Grid, COLS, ROWS};
pub use crate::paylines::{Payline, PaylineSet};
pub use crate::paytable::{Paytable, PaytableEntry};
pub use crate::pool::SymbolPool;
pub use crate::rng::{derive_hash_hex, ProvablyFairRng};
pub use crate::symbols::{Symbol, VolatilityTier, WeightTable};
