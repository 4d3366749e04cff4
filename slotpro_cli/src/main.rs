use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use slotpro_core::{
    spin_with_key, verify_grid, CoinSide, EngineParams, Grid, ProvablyFairRng, Symbol,
    VolatilityTier,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod profile;
mod session;

use profile::Profile;
use session::Session;

#[derive(Parser)]
#[command(name = "slotpro", about = "Drive the 3x3 slot engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Engine parameters as JSON; defaults to the standard tables
    #[arg(long, global = true, env = "SLOTPRO_PARAMS")]
    params: Option<PathBuf>,
}

#[derive(Args)]
struct SeedArgs {
    /// Secret server seed
    #[arg(long, env = "SLOTPRO_SERVER_SEED", default_value = "dev-server-seed")]
    server_seed: String,
    #[arg(long, env = "SLOTPRO_CLIENT_SEED", default_value = "dev-client-seed")]
    client_seed: String,
}

#[derive(Args)]
struct BetArgs {
    #[arg(long, default_value_t = VolatilityTier::Med)]
    tier: VolatilityTier,
    /// Payline set: 3, 5 or 8 lines
    #[arg(long, default_value_t = 5)]
    lines: u8,
    /// Bet per line
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=100))]
    bet: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show payouts and special symbol rules
    Table,
    /// Single provably-fair spin, no bankroll
    Spin {
        #[command(flatten)]
        seeds: SeedArgs,
        #[command(flatten)]
        bet: BetArgs,
        #[arg(long, default_value_t = 0)]
        nonce: u64,
        /// Print the spin result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Autospin against a saved bankroll
    Play {
        #[command(flatten)]
        seeds: SeedArgs,
        #[command(flatten)]
        bet: BetArgs,
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=100_000)
        )]
        spins: u32,
        /// Gamble every winning spin on this coin side
        #[arg(long)]
        gamble: Option<CoinSide>,
        /// Add funds before playing
        #[arg(long)]
        deposit: Option<u64>,
        #[arg(long, env = "SLOTPRO_PROFILE", default_value = "slot_profile.json")]
        profile: PathBuf,
        /// Export one row per spin
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Check a grid against the seeds that produced it
    Verify {
        #[command(flatten)]
        seeds: SeedArgs,
        #[arg(long, default_value_t = VolatilityTier::Med)]
        tier: VolatilityTier,
        #[arg(long)]
        nonce: u64,
        /// Grid as rows of glyphs, e.g. AAA/W*B/CCD
        grid: String,
    },
}

fn load_params(path: Option<&PathBuf>) -> anyhow::Result<EngineParams> {
    let params = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading params {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing params {}", path.display()))?
        }
        None => EngineParams::standard(),
    };
    params.validate().context("invalid engine parameters")?;
    Ok(params)
}

fn render_grid(grid: &Grid) -> String {
    let border = "+---+---+---+";
    let mut out = String::from(border);
    for row in grid.rows() {
        out.push('\n');
        for s in row {
            out.push_str(&format!("| {s} "));
        }
        out.push_str("|\n");
        out.push_str(border);
    }
    out
}

fn print_table(params: &EngineParams) {
    println!("PAYOUTS (3-in-a-row, x bet per line):");
    for symbol in Symbol::ALL {
        let payout = params.paytable.payout(symbol);
        match symbol {
            Symbol::Bonus => println!(
                "  {symbol}: bonus symbol ({} anywhere triggers {} free spins @ {}x)",
                params.bonus.trigger_count, params.bonus.initial_spins, params.bonus.multiplier
            ),
            Symbol::Wild => {
                println!("  {symbol}: {payout}x (wild; 2x line multiplier when present)")
            }
            _ => println!("  {symbol}: {payout}x"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();
    let params = load_params(cli.params.as_ref())?;

    match cli.command {
        Commands::Table => print_table(&params),
        Commands::Spin {
            seeds,
            bet,
            nonce,
            json,
        } => {
            let pool = params.build_pool(bet.tier)?;
            let mut rng = ProvablyFairRng::new(seeds.server_seed, seeds.client_seed, nonce);
            let outcome = spin_with_key(&mut rng, &params, &pool, bet.lines, bet.bet)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", render_grid(&outcome.grid));
                for w in &outcome.line_wins {
                    println!("Line {} win: {}", w.line_index + 1, w.amount);
                }
                println!(
                    "line win={} bonus symbols={} server_seed_hash={} nonce={}",
                    outcome.total_line_win,
                    outcome.bonus_count,
                    rng.server_seed_hash_hex(),
                    nonce
                );
            }
        }
        Commands::Play {
            seeds,
            bet,
            spins,
            gamble,
            deposit,
            profile: profile_path,
            csv,
        } => {
            let mut profile = Profile::load(&profile_path);
            if let Some(amount) = deposit {
                profile.balance = profile.balance.saturating_add(amount);
            }
            if profile.balance == 0 {
                anyhow::bail!("balance is empty; pass --deposit to add funds");
            }
            let session = Session::new(
                &params,
                bet.tier,
                bet.lines,
                bet.bet,
                seeds.server_seed,
                seeds.client_seed,
            )?;
            if session.stake() > profile.balance {
                anyhow::bail!(
                    "insufficient balance: {} per spin, {} available",
                    session.stake(),
                    profile.balance
                );
            }
            info!(
                tier = %bet.tier,
                lines = session.lines().len(),
                stake = session.stake(),
                server_seed_hash = %session.server_seed_hash_hex(),
                "session started"
            );

            let start_nonce = profile.lifetime_spins;
            let records = session.run(&mut profile, spins, start_nonce, gamble);
            for r in &records {
                println!("{}", render_grid(&r.spin.grid));
                for w in &r.spin.line_wins {
                    println!("Line {} win: {}", w.line_index + 1, w.amount);
                }
                if let Some(b) = &r.bonus {
                    println!(
                        "BONUS! {} free spins ({} retriggers) won {}",
                        b.spins_played, b.retriggers, b.total_bonus_win
                    );
                }
                if let Some(g) = &r.gamble {
                    println!("Gamble {} on {}: coin {}, now {}", g.stake, g.call, g.coin, g.result);
                }
                println!("Spin won: {}  balance: {}", r.payout, r.balance_after);
            }

            if let Some(path) = csv {
                session::write_csv(&path, &records)
                    .with_context(|| format!("exporting spins to {}", path.display()))?;
                println!("Exported {} rows to {}", records.len(), path.display());
            }
            profile.save(&profile_path)?;
            println!(
                "Balance: {}  | Spins: {}  | Net: {}",
                profile.balance,
                profile.lifetime_spins,
                profile.net()
            );
        }
        Commands::Verify {
            seeds,
            tier,
            nonce,
            grid,
        } => {
            let expected: Grid = grid.parse()?;
            let pool = params.build_pool(tier)?;
            if !verify_grid(&seeds.server_seed, &seeds.client_seed, nonce, &pool, &expected) {
                anyhow::bail!("grid {expected} was not produced by these seeds at nonce {nonce}");
            }
            println!(
                "verified: {expected} (server_seed_hash={})",
                slotpro_core::derive_hash_hex(seeds.server_seed.as_bytes())
            );
        }
    }

    Ok(())
}
