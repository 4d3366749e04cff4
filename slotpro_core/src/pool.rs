use rand::Rng;
use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};
use crate::symbols::{Symbol, VolatilityTier, WeightTable};

/// Flattened weighted list of symbols. Built once per tier and never mutated;
/// duplicates give the weighting when drawing uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolPool {
    symbols: Vec<Symbol>,
    tier: Option<VolatilityTier>,
}

impl SymbolPool {
    pub fn build(weights: &WeightTable, tier: VolatilityTier) -> ConfigResult<Self> {
        let mut symbols = Vec::new();
        for symbol in Symbol::ALL {
            let w = weights.weight(tier, symbol)?;
            symbols.extend(std::iter::repeat(symbol).take(w as usize));
        }
        tracing::debug!(%tier, size = symbols.len(), "built symbol pool");
        Ok(Self {
            symbols,
            tier: Some(tier),
        })
    }

    /// Pool from an explicit symbol list, e.g. a rigged pool in tests.
    pub fn from_symbols(symbols: Vec<Symbol>) -> ConfigResult<Self> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        Ok(Self {
            symbols,
            tier: None,
        })
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        self.symbols[rng.gen_range(0..self.symbols.len())]
    }

    pub fn tier(&self) -> Option<VolatilityTier> {
        self.tier
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
