use anyhow::{Context, Result, ensure};
use clap::Parser;
use delve_core::{
    CellPatch, Game, GameAction, GameConfig, GameState, Item, MoveDirection, Position, PotionKind,
    Terrain, cross_references_consistent, generate,
};
use log::{debug, info};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maximum number of action batches per run
    #[arg(short, long, default_value_t = 1000)]
    actions: usize,
    /// Number of runs, each seeded from `seed + run`
    #[arg(short, long, default_value_t = 1)]
    runs: u64,
}

const TERRAINS: [Terrain; 4] = [Terrain::Floor, Terrain::Wall, Terrain::Stairs, Terrain::Empty];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_position(rng: &mut ChaCha8Rng, state: &GameState) -> Position {
    if rng.next_u64() % 10 == 0 {
        return Position::new(choose(rng, &[i32::MIN, i32::MAX]), choose(rng, &[-1, i32::MAX]));
    }
    let (width, height) = state.map().map_or((1, 1), |map| (map.width(), map.height()));
    Position::new(
        (rng.next_u64() % (height as u64 + 2)) as i32 - 1,
        (rng.next_u64() % (width as u64 + 2)) as i32 - 1,
    )
}

fn random_patch(rng: &mut ChaCha8Rng, state: &GameState) -> CellPatch {
    let item = match rng.next_u64() % 4 {
        0 => Some(Item::Gold { amount: (rng.next_u64() % 40) as u32 + 1 }),
        1 => Some(Item::Potion(PotionKind::Healing)),
        _ => None,
    };
    CellPatch { position: random_position(rng, state), terrain: choose(rng, &TERRAINS), item }
}

/// Dispatched as one unit; invariants only hold again once the whole batch is in.
fn random_batch(rng: &mut ChaCha8Rng, state: &GameState) -> Vec<GameAction> {
    let action = match rng.next_u64() % 20 {
        0 => GameAction::HoverCell { position: random_position(rng, state) },
        1 => GameAction::HoverAwayFromCell,
        2 => GameAction::UseItem { index: (rng.next_u64() % 3) as usize },
        3 => GameAction::InitPlayerSpawn(random_position(rng, state)),
        4 => GameAction::UpdateCell(random_patch(rng, state)),
        5 => GameAction::InitVisibility,
        6 => GameAction::InitCreatures,
        7 if rng.next_u64() % 5 == 0 => match state.map() {
            Some(map) => GameAction::SetCurrentMap(map.clone()),
            None => GameAction::InitVisibility,
        },
        8 if rng.next_u64() % 10 == 0 => {
            let config = &state.config;
            let seed = format!("fuzz-level-{}", rng.next_u64() % 1000);
            let Ok(level) =
                generate(&seed, config.map_width, config.map_height, &config.generation)
            else {
                return vec![GameAction::SetSeed(seed)];
            };
            return vec![
                GameAction::SetSeed(seed),
                GameAction::SetCurrentMap(level.map),
                GameAction::InitPlayerSpawn(level.spawn),
                GameAction::InitVisibility,
                GameAction::InitCreatures,
            ];
        }
        _ => GameAction::MovePlayer(choose(rng, &MoveDirection::ALL)),
    };
    vec![action]
}

fn check_invariants(state: &GameState, step: usize) -> Result<()> {
    let map = state.map().context("Invariant failed: running game without a map")?;
    ensure!(
        cross_references_consistent(map, &state.creatures),
        "Invariant failed: creature slots out of sync at step {step}"
    );
    ensure!(
        map.is_passable(state.player.position),
        "Invariant failed: player inside rock at step {step}"
    );
    ensure!(state.player.hp <= state.player.max_hp, "Invariant failed: HP > Max HP");
    for creature in state.creatures.values() {
        ensure!(creature.hp <= creature.max_hp, "Invariant failed: creature HP > Max HP");
    }
    Ok(())
}

fn fuzz_run(seed: u64, max_actions: usize) -> Result<()> {
    let mut game = Game::new(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    game.dispatch(GameAction::NewGame { seed: format!("fuzz-{seed}") });

    for step in 0..max_actions {
        let batch = random_batch(&mut rng, game.state());
        for action in batch {
            let before = game.snapshot();
            let outcome = game.dispatch(action);
            debug!("step {step}: {outcome:?}");
            if !outcome.is_applied() {
                ensure!(
                    *game.snapshot() == *before,
                    "Invariant failed: ignored action changed the state"
                );
            }
        }

        let state = game.state();
        check_invariants(state, step)?;
        if state.status.is_terminal() {
            info!(
                "seed {seed}: {:?} at depth {} after {} turns",
                state.status, state.depth, state.turn
            );
            return Ok(());
        }
    }
    info!("seed {seed}: still playing after {max_actions} actions");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    for run in 0..args.runs {
        let seed = args.seed.wrapping_add(run);
        fuzz_run(seed, args.actions).with_context(|| format!("fuzz run with seed {seed}"))?;
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
