use std::path::Path;

use slotpro_core::{
    gamble, run_configured_bonus_round, spin_once, BonusRoundResult, CoinSide, ConfigResult,
    EngineParams, PaylineSet, ProvablyFairRng, SpinResult, SymbolPool, VolatilityTier,
};
use tracing::{info, warn};

use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GambleRecord {
    pub call: CoinSide,
    pub coin: CoinSide,
    pub stake: u64,
    pub result: u64,
}

/// One paid spin with everything that followed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinRecord {
    pub nonce: u64,
    pub bet: u64,
    pub spin: SpinResult,
    pub bonus: Option<BonusRoundResult>,
    pub gamble: Option<GambleRecord>,
    /// Amount credited back to the bankroll.
    pub payout: u64,
    pub balance_after: u64,
}

/// Fixed betting setup for a run of spins.
pub struct Session<'a> {
    params: &'a EngineParams,
    pool: SymbolPool,
    lines: PaylineSet,
    bet_per_line: u64,
    server_seed: String,
    client_seed: String,
}

impl<'a> Session<'a> {
    pub fn new(
        params: &'a EngineParams,
        tier: VolatilityTier,
        lines_key: u8,
        bet_per_line: u64,
        server_seed: impl Into<String>,
        client_seed: impl Into<String>,
    ) -> ConfigResult<Self> {
        let pool = params.build_pool(tier)?;
        Self::with_pool(params, pool, lines_key, bet_per_line, server_seed, client_seed)
    }

    pub fn with_pool(
        params: &'a EngineParams,
        pool: SymbolPool,
        lines_key: u8,
        bet_per_line: u64,
        server_seed: impl Into<String>,
        client_seed: impl Into<String>,
    ) -> ConfigResult<Self> {
        Ok(Self {
            params,
            pool,
            lines: PaylineSet::from_key(lines_key)?,
            bet_per_line,
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
        })
    }

    pub fn lines(&self) -> &PaylineSet {
        &self.lines
    }

    /// Total debited per spin.
    pub fn stake(&self) -> u64 {
        self.bet_per_line.saturating_mul(self.lines.len() as u64)
    }

    pub fn server_seed_hash_hex(&self) -> String {
        slotpro_core::derive_hash_hex(self.server_seed.as_bytes())
    }

    /// Spin, play any triggered bonus round, then gamble the total if asked.
    /// Bonus and coin draws continue the nonce's stream after the grid.
    fn resolve(
        &self,
        nonce: u64,
        gamble_call: Option<CoinSide>,
    ) -> (SpinResult, Option<BonusRoundResult>, Option<GambleRecord>, u64) {
        let mut rng =
            ProvablyFairRng::new(self.server_seed.as_str(), self.client_seed.as_str(), nonce);
        let spin = spin_once(&mut rng, self.params, &self.pool, &self.lines, self.bet_per_line);
        let mut win = spin.total_line_win;

        let bonus = spin
            .triggers_bonus(self.params.bonus.trigger_count)
            .then(|| run_configured_bonus_round(&mut rng, self.params, &self.pool));
        if let Some(b) = &bonus {
            win = win.saturating_add(b.total_bonus_win);
        }

        let mut gamble_record = None;
        if let Some(call) = gamble_call.filter(|_| win > 0) {
            let coin = CoinSide::flip(&mut rng);
            let result = gamble(win, call, coin);
            info!(%call, %coin, stake = win, result, "gamble");
            gamble_record = Some(GambleRecord {
                call,
                coin,
                stake: win,
                result,
            });
            win = result;
        }
        (spin, bonus, gamble_record, win)
    }

    /// Play up to `spins` spins against `profile`, stopping early when the
    /// balance cannot cover the stake.
    pub fn run(
        &self,
        profile: &mut Profile,
        spins: u32,
        start_nonce: u64,
        gamble_call: Option<CoinSide>,
    ) -> Vec<SpinRecord> {
        let stake = self.stake();
        let mut records = Vec::with_capacity(spins as usize);
        for i in 0..spins as u64 {
            if profile.balance < stake {
                warn!(balance = profile.balance, stake, "balance too low to continue");
                break;
            }
            profile.balance -= stake;
            profile.lifetime_bet = profile.lifetime_bet.saturating_add(stake);

            let nonce = start_nonce + i;
            let (spin, bonus, gamble, payout) = self.resolve(nonce, gamble_call);

            profile.balance = profile.balance.saturating_add(payout);
            profile.lifetime_won = profile.lifetime_won.saturating_add(payout);
            profile.lifetime_spins += 1;
            records.push(SpinRecord {
                nonce,
                bet: stake,
                spin,
                bonus,
                gamble,
                payout,
                balance_after: profile.balance,
            });
        }
        info!(
            played = records.len(),
            balance = profile.balance,
            net = %profile.net(),
            "session finished"
        );
        records
    }
}

pub fn write_csv(path: &Path, records: &[SpinRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "nonce",
        "grid",
        "bet",
        "line_win",
        "bonus_count",
        "bonus_spins",
        "bonus_win",
        "gamble",
        "payout",
        "balance",
    ])?;
    for r in records {
        let (bonus_spins, bonus_win) = r
            .bonus
            .as_ref()
            .map(|b| (b.spins_played, b.total_bonus_win))
            .unwrap_or((0, 0));
        let gamble = r
            .gamble
            .as_ref()
            .map(|g| format!("{}/{}", g.call, g.coin))
            .unwrap_or_default();
        wtr.write_record(&[
            r.nonce.to_string(),
            r.spin.grid.to_string(),
            r.bet.to_string(),
            r.spin.total_line_win.to_string(),
            r.spin.bonus_count.to_string(),
            bonus_spins.to_string(),
            bonus_win.to_string(),
            gamble,
            r.payout.to_string(),
            r.balance_after.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
