//! Free-spin bonus round.
//!
//! The round runs off a remaining-spins counter. Each bonus spin plays the
//! full eight-line set at a bet of one unit, so winnings are denominated in
//! the round multiplier rather than the triggering bet. Landing the trigger
//! count of bonus symbols again during the round adds one spin.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::{score_grid, EngineParams};
use crate::error::{ConfigError, ConfigResult};
use crate::grid::Grid;
use crate::paylines::PaylineSet;
use crate::pool::SymbolPool;

/// Bonus round bet per line.
pub const BONUS_BET_PER_LINE: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusConfig {
    /// Free spins awarded on trigger.
    pub initial_spins: u32,
    pub multiplier: u64,
    /// Bonus symbols anywhere on the grid needed to trigger or retrigger.
    pub trigger_count: usize,
    /// Hard limit on spins played in one round; retriggers past it are dropped.
    pub spin_cap: u32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            initial_spins: 3,
            multiplier: 2,
            trigger_count: 3,
            spin_cap: 1000,
        }
    }
}

impl BonusConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.trigger_count == 0 {
            return Err(ConfigError::InvalidBonus("trigger_count must be at least 1".into()));
        }
        if self.spin_cap < self.initial_spins {
            return Err(ConfigError::InvalidBonus(format!(
                "spin_cap {} is below initial_spins {}",
                self.spin_cap, self.initial_spins
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusSpin {
    pub grid: Grid,
    /// Line win at bet 1, before the multiplier.
    pub line_win: u64,
    pub gained: u64,
    pub retriggered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusRoundResult {
    pub spins_played: u32,
    pub retriggers: u32,
    pub total_bonus_win: u64,
    pub spins: Vec<BonusSpin>,
}

/// Play a bonus round with `initial_spins` free spins at `multiplier`.
///
/// `spins_played` always equals `initial_spins + retriggers`.
pub fn run_bonus_round<R: Rng + ?Sized>(
    rng: &mut R,
    params: &EngineParams,
    pool: &SymbolPool,
    initial_spins: u32,
    multiplier: u64,
) -> BonusRoundResult {
    let lines = PaylineSet::full();
    let cap = params.bonus.spin_cap.max(initial_spins);
    info!(initial_spins, multiplier, "bonus round started");

    let mut remaining = initial_spins;
    let mut spins_played = 0u32;
    let mut retriggers = 0u32;
    let mut total = 0u64;
    let mut spins = Vec::with_capacity(initial_spins as usize);

    while remaining > 0 {
        remaining -= 1;
        spins_played += 1;

        let grid = Grid::sample(rng, pool);
        let scored = score_grid(grid, &lines, &params.paytable, BONUS_BET_PER_LINE);

        let mut retriggered = false;
        if scored.triggers_bonus(params.bonus.trigger_count) {
            if spins_played + remaining < cap {
                remaining += 1;
                retriggers += 1;
                retriggered = true;
            } else {
                warn!(cap, "bonus spin cap reached, retrigger dropped");
            }
        }

        let gained = scored.total_line_win.saturating_mul(multiplier);
        total = total.saturating_add(gained);
        debug!(spin = spins_played, grid = %grid, gained, retriggered, "bonus spin");
        spins.push(BonusSpin {
            grid,
            line_win: scored.total_line_win,
            gained,
            retriggered,
        });
    }

    info!(spins_played, retriggers, total, "bonus round finished");
    BonusRoundResult {
        spins_played,
        retriggers,
        total_bonus_win: total,
        spins,
    }
}

/// Run the round with the configured spin count and multiplier.
pub fn run_configured_bonus_round<R: Rng + ?Sized>(
    rng: &mut R,
    params: &EngineParams,
    pool: &SymbolPool,
) -> BonusRoundResult {
    run_bonus_round(
        rng,
        params,
        pool,
        params.bonus.initial_spins,
        params.bonus.multiplier,
    )
}
