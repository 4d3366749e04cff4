use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    A,
    B,
    C,
    D,
    Wild,
    Bonus,
}

impl Symbol {
    /// Every symbol in pool order.
    pub const ALL: [Symbol; 6] = [
        Symbol::A,
        Symbol::B,
        Symbol::C,
        Symbol::D,
        Symbol::Wild,
        Symbol::Bonus,
    ];

    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(i as usize).copied()
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::A => 0,
            Symbol::B => 1,
            Symbol::C => 2,
            Symbol::D => 3,
            Symbol::Wild => 4,
            Symbol::Bonus => 5,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
            Symbol::Wild => 'W',
            Symbol::Bonus => '*',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.glyph() == c.to_ascii_uppercase())
    }

    pub fn is_wild(self) -> bool {
        self == Symbol::Wild
    }

    pub fn is_bonus(self) -> bool {
        self == Symbol::Bonus
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Weighting profile; higher volatility makes A and Wild rarer.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityTier {
    Low,
    #[default]
    Med,
    High,
}

impl VolatilityTier {
    pub const ALL: [VolatilityTier; 3] =
        [VolatilityTier::Low, VolatilityTier::Med, VolatilityTier::High];

    pub fn as_str(self) -> &'static str {
        match self {
            VolatilityTier::Low => "low",
            VolatilityTier::Med => "med",
            VolatilityTier::High => "high",
        }
    }
}

impl fmt::Display for VolatilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolatilityTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(VolatilityTier::Low),
            "med" | "medium" => Ok(VolatilityTier::Med),
            "high" => Ok(VolatilityTier::High),
            other => Err(ConfigError::UnknownTier(other.to_string())),
        }
    }
}

/// Per-tier sampling weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable(pub BTreeMap<VolatilityTier, BTreeMap<Symbol, u32>>);

impl WeightTable {
    pub fn standard() -> Self {
        let presets: [(VolatilityTier, [u32; 6]); 3] = [
            (VolatilityTier::Low, [3, 6, 8, 12, 2, 2]),
            (VolatilityTier::Med, [2, 4, 6, 10, 1, 1]),
            (VolatilityTier::High, [1, 3, 5, 9, 1, 1]),
        ];
        let tiers = presets
            .into_iter()
            .map(|(tier, weights)| {
                let row = Symbol::ALL.into_iter().zip(weights).collect::<BTreeMap<_, _>>();
                (tier, row)
            })
            .collect();
        Self(tiers)
    }

    pub fn weight(&self, tier: VolatilityTier, symbol: Symbol) -> ConfigResult<u32> {
        let weights = self
            .0
            .get(&tier)
            .ok_or_else(|| ConfigError::UnknownTier(tier.to_string()))?;
        match weights.get(&symbol) {
            None => Err(ConfigError::MissingWeight { tier, symbol }),
            Some(0) => Err(ConfigError::ZeroWeight { tier, symbol }),
            Some(&w) => Ok(w),
        }
    }

    /// Every tier must weight every symbol with at least 1.
    pub fn validate(&self) -> ConfigResult<()> {
        for tier in VolatilityTier::ALL {
            for symbol in Symbol::ALL {
                self.weight(tier, symbol)?;
            }
        }
        Ok(())
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_is_default_tier() {
        assert_eq!(VolatilityTier::default(), VolatilityTier::Med);
    }

    #[test]
    fn index_and_glyph_agree() {
        for s in Symbol::ALL {
            assert_eq!(Symbol::from_index(s.to_index()), Some(s));
            assert_eq!(Symbol::from_glyph(s.glyph()), Some(s));
        }
        assert_eq!(Symbol::from_index(6), None);
        assert_eq!(Symbol::from_glyph('w'), Some(Symbol::Wild));
        assert_eq!(Symbol::from_glyph('x'), None);
    }

    #[test]
    fn tier_parsing() {
        assert_eq!("low".parse::<VolatilityTier>(), Ok(VolatilityTier::Low));
        assert_eq!(" Medium ".parse::<VolatilityTier>(), Ok(VolatilityTier::Med));
        assert_eq!("HIGH".parse::<VolatilityTier>(), Ok(VolatilityTier::High));
        assert_eq!(
            "extreme".parse::<VolatilityTier>(),
            Err(ConfigError::UnknownTier("extreme".into()))
        );
    }

    #[test]
    fn standard_table_is_valid() {
        let table = WeightTable::standard();
        table.validate().unwrap();
        assert_eq!(table.weight(VolatilityTier::Med, Symbol::D), Ok(10));
        assert_eq!(table.weight(VolatilityTier::Low, Symbol::Bonus), Ok(2));
    }

    #[test]
    fn zero_and_missing_weights_rejected() {
        let mut table = WeightTable::standard();
        table
            .0
            .get_mut(&VolatilityTier::High)
            .unwrap()
            .insert(Symbol::Wild, 0);
        assert_eq!(
            table.validate(),
            Err(ConfigError::ZeroWeight {
                tier: VolatilityTier::High,
                symbol: Symbol::Wild
            })
        );

        let mut table = WeightTable::standard();
        table.0.get_mut(&VolatilityTier::Low).unwrap().remove(&Symbol::B);
        assert_eq!(
            table.weight(VolatilityTier::Low, Symbol::B),
            Err(ConfigError::MissingWeight {
                tier: VolatilityTier::Low,
                symbol: Symbol::B
            })
        );

        let mut table = WeightTable::standard();
        table.0.remove(&VolatilityTier::Med);
        assert!(matches!(
            table.weight(VolatilityTier::Med, Symbol::A),
            Err(ConfigError::UnknownTier(_))
        ));
    }
}
