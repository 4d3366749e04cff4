use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    bonus::BonusConfig,
    error::ConfigResult,
    grid::Grid,
    paylines::{Payline, PaylineSet},
    paytable::Paytable,
    pool::SymbolPool,
    rng::ProvablyFairRng,
    symbols::{Symbol, VolatilityTier, WeightTable},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineParams {
    pub paytable: Paytable,
    pub weights: WeightTable,
    #[serde(default)]
    pub bonus: BonusConfig,
}

impl EngineParams {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.paytable.validate()?;
        self.weights.validate()?;
        self.bonus.validate()
    }

    pub fn build_pool(&self, tier: VolatilityTier) -> ConfigResult<SymbolPool> {
        SymbolPool::build(&self.weights, tier)
    }
}

/// Result of scoring one payline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineOutcome {
    /// Symbol the line is paid as: the first non-wild, non-bonus symbol, or
    /// Wild when there is none.
    pub base: Symbol,
    pub amount: u64,
    /// Symbols matched; can be true with `amount == 0` for zero-payout symbols.
    pub won: bool,
}

impl LineOutcome {
    /// `amount > 0` is the win signal callers should rely on.
    pub fn pays(&self) -> bool {
        self.amount > 0
    }
}

pub fn evaluate_line(
    grid: &Grid,
    line: &Payline,
    paytable: &Paytable,
    bet_per_line: u64,
) -> LineOutcome {
    let symbols = grid.line_symbols(line);
    let base = symbols
        .iter()
        .copied()
        .find(|s| !s.is_wild() && !s.is_bonus())
        .unwrap_or(Symbol::Wild);

    let matched = symbols
        .iter()
        .all(|&s| !s.is_bonus() && (s == base || s.is_wild()));
    if !matched {
        return LineOutcome {
            base,
            amount: 0,
            won: false,
        };
    }

    // amounts saturate at u64::MAX rather than overflow
    let mut amount = paytable.payout(base).saturating_mul(bet_per_line);
    if symbols.iter().any(|s| s.is_wild()) {
        amount = amount.saturating_mul(2);
    }
    LineOutcome {
        base,
        amount,
        won: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineWin {
    /// 0-based position of the line in its set.
    pub line_index: usize,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinResult {
    pub grid: Grid,
    pub line_wins: Vec<LineWin>,
    pub total_line_win: u64,
    pub bonus_count: usize,
}

impl SpinResult {
    pub fn triggers_bonus(&self, trigger_count: usize) -> bool {
        self.bonus_count >= trigger_count
    }
}

/// Score `grid` against every line of `lines`.
pub fn score_grid(
    grid: Grid,
    lines: &PaylineSet,
    paytable: &Paytable,
    bet_per_line: u64,
) -> SpinResult {
    let line_wins: Vec<LineWin> = lines
        .lines()
        .iter()
        .enumerate()
        .filter_map(|(line_index, line)| {
            let outcome = evaluate_line(&grid, line, paytable, bet_per_line);
            outcome.pays().then_some(LineWin {
                line_index,
                amount: outcome.amount,
            })
        })
        .collect();
    let total_line_win = line_wins
        .iter()
        .fold(0u64, |acc, w| acc.saturating_add(w.amount));
    SpinResult {
        grid,
        line_wins,
        total_line_win,
        bonus_count: grid.bonus_count(),
    }
}

pub fn spin_once<R: Rng + ?Sized>(
    rng: &mut R,
    params: &EngineParams,
    pool: &SymbolPool,
    lines: &PaylineSet,
    bet_per_line: u64,
) -> SpinResult {
    let grid = Grid::sample(rng, pool);
    let result = score_grid(grid, lines, &params.paytable, bet_per_line);
    debug!(
        grid = %result.grid,
        win = result.total_line_win,
        bonus = result.bonus_count,
        "spin"
    );
    result
}

/// Resolve the payline set by key, then spin.
pub fn spin_with_key<R: Rng + ?Sized>(
    rng: &mut R,
    params: &EngineParams,
    pool: &SymbolPool,
    lines_key: u8,
    bet_per_line: u64,
) -> ConfigResult<SpinResult> {
    let lines = PaylineSet::from_key(lines_key)?;
    Ok(spin_once(rng, params, pool, &lines, bet_per_line))
}

/// Convenience: perform a spin creating the RNG from seeds.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    params: &EngineParams,
    pool: &SymbolPool,
    lines_key: u8,
    bet_per_line: u64,
) -> ConfigResult<SpinResult> {
    let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    spin_with_key(&mut rng, params, pool, lines_key, bet_per_line)
}

/// Verify that a grid matches the first grid the seeds would draw from `pool`.
pub fn verify_grid(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    pool: &SymbolPool,
    expected: &Grid,
) -> bool {
    let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    Grid::sample(&mut rng, pool) == *expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{COLS, ROWS};

    fn line(cells: &str) -> (Grid, Payline) {
        let grid: Grid = format!("{cells}/DDD/DDD").parse().unwrap();
        (grid, PaylineSet::from_key(3).unwrap().lines()[0])
    }

    fn eval(cells: &str, bet: u64) -> LineOutcome {
        let (grid, payline) = line(cells);
        evaluate_line(&grid, &payline, &Paytable::simple_default(), bet)
    }

    #[test]
    fn three_of_a_kind() {
        let out = eval("AAA", 10);
        assert_eq!(out.base, Symbol::A);
        assert_eq!(out.amount, 100);
        assert!(out.won && out.pays());
    }

    #[test]
    fn wild_doubles_once() {
        assert_eq!(eval("AWA", 10).amount, 200);
        assert_eq!(eval("WWA", 10).amount, 200);
        assert_eq!(eval("WBW", 1).amount, 12);
        assert_eq!(eval("WBW", 1).base, Symbol::B);
    }

    #[test]
    fn all_wilds_pay_as_wild() {
        let out = eval("WWW", 5);
        assert_eq!(out.base, Symbol::Wild);
        assert_eq!(out.amount, 12 * 5 * 2);
        assert!(out.won);
    }

    #[test]
    fn all_wild_grid_pays_every_line() {
        let grid: Grid = "WWW/WWW/WWW".parse().unwrap();
        let paytable = Paytable::simple_default();
        for payline in PaylineSet::full().lines() {
            let out = evaluate_line(&grid, payline, &paytable, 7);
            assert_eq!(out.base, Symbol::Wild);
            assert!(out.won);
            assert_eq!(out.amount, paytable.payout(Symbol::Wild) * 7 * 2);
        }
    }

    #[test]
    fn bonus_in_any_cell_voids_its_lines() {
        let paytable = Paytable::simple_default();
        for row in 0..ROWS {
            for col in 0..COLS {
                let mut cells = [[Symbol::A; COLS]; ROWS];
                cells[row][col] = Symbol::Bonus;
                let grid = Grid::new(cells);
                for payline in PaylineSet::full().lines() {
                    let out = evaluate_line(&grid, payline, &paytable, 10);
                    if payline.coords().contains(&(row, col)) {
                        assert_eq!(out.amount, 0, "bonus at ({row}, {col})");
                        assert!(!out.won);
                    } else {
                        assert_eq!(out.amount, 100);
                        assert!(out.won);
                    }
                }
            }
        }
    }

    #[test]
    fn huge_payouts_saturate() {
        let mut params = EngineParams::standard();
        for e in params.paytable.0.iter_mut() {
            if e.symbol == Symbol::A {
                e.payout = u64::MAX / 4;
            }
        }
        params.validate().unwrap();
        let pool = SymbolPool::from_symbols(vec![Symbol::A]).unwrap();
        let mut rng = ProvablyFairRng::new("s", "c", 0);
        let out = spin_with_key(&mut rng, &params, &pool, 3, 10).unwrap();
        assert_eq!(out.line_wins.len(), 3);
        assert!(out.line_wins.iter().all(|w| w.amount == u64::MAX));
        assert_eq!(out.total_line_win, u64::MAX);

        let grid: Grid = "AWA/DDD/DDD".parse().unwrap();
        let line = PaylineSet::from_key(3).unwrap().lines()[0];
        let out = evaluate_line(&grid, &line, &params.paytable, 3);
        assert_eq!(out.amount, u64::MAX);
    }

    #[test]
    fn bonus_voids_line() {
        for cells in ["*AA", "A*A", "AA*", "W*W", "***", "*WW"] {
            let out = eval(cells, 10);
            assert_eq!(out.amount, 0, "{cells}");
            assert!(!out.won, "{cells}");
        }
    }

    #[test]
    fn mismatch_loses() {
        let out = eval("ABA", 10);
        assert_eq!(out.amount, 0);
        assert!(!out.won);
        assert!(!eval("AWB", 10).won);
    }

    #[test]
    fn zero_payout_technical_win() {
        let mut paytable = Paytable::simple_default();
        for e in paytable.0.iter_mut() {
            if e.symbol == Symbol::C {
                e.payout = 0;
            }
        }
        let (grid, payline) = line("CWC");
        let out = evaluate_line(&grid, &payline, &paytable, 10);
        assert!(out.won);
        assert!(!out.pays());
    }

    #[test]
    fn evaluation_is_pure() {
        let grid: Grid = "AWA/B*B/CCC".parse().unwrap();
        let paytable = Paytable::simple_default();
        for payline in PaylineSet::full().lines() {
            assert_eq!(
                evaluate_line(&grid, payline, &paytable, 3),
                evaluate_line(&grid, payline, &paytable, 3)
            );
        }
    }

    #[test]
    fn score_grid_lists_paying_lines() {
        // top AWA pays 200, middle has bonus, bottom CCC pays 40
        let grid: Grid = "AWA/B*B/CCC".parse().unwrap();
        let lines = PaylineSet::from_key(3).unwrap();
        let res = score_grid(grid, &lines, &Paytable::simple_default(), 10);
        assert_eq!(
            res.line_wins,
            vec![
                LineWin {
                    line_index: 0,
                    amount: 200
                },
                LineWin {
                    line_index: 2,
                    amount: 40
                }
            ]
        );
        assert_eq!(res.total_line_win, 240);
        assert_eq!(res.bonus_count, 1);
        assert!(!res.triggers_bonus(3));
    }

    #[test]
    fn bonus_counted_off_paylines() {
        // bonus symbols are only counted, never on a paying line
        let grid: Grid = "*AA/A*A/AA*".parse().unwrap();
        let lines = PaylineSet::from_key(3).unwrap();
        let res = score_grid(grid, &lines, &Paytable::simple_default(), 1);
        assert_eq!(res.total_line_win, 0);
        assert_eq!(res.bonus_count, 3);
        assert!(res.triggers_bonus(3));
    }

    #[test]
    fn test_spin_deterministic() {
        let params = EngineParams::standard();
        let pool = params.build_pool(VolatilityTier::Med).unwrap();
        let out1 = spin_with_seeds("server", "client", 1, &params, &pool, 5, 2).unwrap();
        let out2 = spin_with_seeds("server", "client", 1, &params, &pool, 5, 2).unwrap();
        assert_eq!(out1, out2);
        assert!(verify_grid("server", "client", 1, &pool, &out1.grid));
    }

    #[test]
    fn unknown_lines_key() {
        let params = EngineParams::standard();
        let pool = params.build_pool(VolatilityTier::Low).unwrap();
        let mut rng = ProvablyFairRng::new("s", "c", 0);
        assert!(spin_with_key(&mut rng, &params, &pool, 7, 1).is_err());
    }
}
