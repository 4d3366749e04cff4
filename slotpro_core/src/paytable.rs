use crate::error::{ConfigError, ConfigResult};
use crate::symbols::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    /// Multiplier of bet-per-line for three in a row.
    pub payout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paytable(pub Vec<PaytableEntry>);

impl Paytable {
    pub fn simple_default() -> Self {
        Self(vec![
            PaytableEntry {
                symbol: Symbol::A,
                payout: 10,
            },
            PaytableEntry {
                symbol: Symbol::B,
                payout: 6,
            },
            PaytableEntry {
                symbol: Symbol::C,
                payout: 4,
            },
            PaytableEntry {
                symbol: Symbol::D,
                payout: 2,
            },
            PaytableEntry {
                symbol: Symbol::Wild,
                payout: 12,
            },
            PaytableEntry {
                symbol: Symbol::Bonus,
                payout: 0,
            },
        ])
    }

    /// Payout multiplier for `symbol`; a validated table always has one.
    pub fn payout(&self, symbol: Symbol) -> u64 {
        self.0
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.payout)
            .unwrap_or(0)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for symbol in Symbol::ALL {
            match self.0.iter().filter(|e| e.symbol == symbol).count() {
                0 => return Err(ConfigError::MissingPayout(symbol)),
                1 => {}
                _ => return Err(ConfigError::DuplicatePayout(symbol)),
            }
        }
        Ok(())
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::simple_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_payouts() {
        let table = Paytable::simple_default();
        table.validate().unwrap();
        assert_eq!(table.payout(Symbol::A), 10);
        assert_eq!(table.payout(Symbol::Wild), 12);
        assert_eq!(table.payout(Symbol::Bonus), 0);
    }

    #[test]
    fn missing_and_duplicate_entries() {
        let mut table = Paytable::simple_default();
        table.0.retain(|e| e.symbol != Symbol::C);
        assert_eq!(table.validate(), Err(ConfigError::MissingPayout(Symbol::C)));

        let mut table = Paytable::simple_default();
        table.0.push(PaytableEntry {
            symbol: Symbol::D,
            payout: 3,
        });
        assert_eq!(table.validate(), Err(ConfigError::DuplicatePayout(Symbol::D)));
    }
}
