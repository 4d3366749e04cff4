use crate::symbols::{Symbol, VolatilityTier};

/// Setup-time configuration failures. Once a pool and payline set have been
/// built, spinning cannot fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown volatility tier: {0}")]
    UnknownTier(String),
    #[error("no weight for {symbol} in tier {tier}")]
    MissingWeight { tier: VolatilityTier, symbol: Symbol },
    #[error("weight for {symbol} in tier {tier} must be at least 1")]
    ZeroWeight { tier: VolatilityTier, symbol: Symbol },
    #[error("paytable has no entry for {0}")]
    MissingPayout(Symbol),
    #[error("paytable has more than one entry for {0}")]
    DuplicatePayout(Symbol),
    #[error("symbol pool is empty")]
    EmptyPool,
    #[error("payline {line} has coordinate ({row}, {col}) outside the 3x3 grid")]
    CoordOutOfRange { line: usize, row: usize, col: usize },
    #[error("payline set has no lines")]
    EmptyPaylineSet,
    #[error("unknown payline set {0} (expected 3, 5 or 8)")]
    UnknownPaylineSet(u8),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("invalid bonus configuration: {0}")]
    InvalidBonus(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
