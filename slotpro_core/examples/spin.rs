use slotpro_core::{
    run_configured_bonus_round, spin_with_key, EngineParams, ProvablyFairRng, VolatilityTier,
};

fn main() {
    // Example end-to-end spin
    let server_seed = "example-server-seed";
    let client_seed = "example-client-seed";
    let nonce = 1u64;
    let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    let params = EngineParams::standard();
    let pool = params.build_pool(VolatilityTier::Med).expect("standard tables are valid");
    let outcome =
        spin_with_key(&mut rng, &params, &pool, 5, 1).expect("5 is a standard payline set");
    println!(
        "server_seed_hash={} grid={} line_win={} bonus={}",
        rng.server_seed_hash_hex(),
        outcome.grid,
        outcome.total_line_win,
        outcome.bonus_count
    );
    if outcome.triggers_bonus(params.bonus.trigger_count) {
        let bonus = run_configured_bonus_round(&mut rng, &params, &pool);
        println!("bonus spins={} win={}", bonus.spins_played, bonus.total_bonus_win);
    }
}
