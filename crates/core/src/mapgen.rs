//! Procedural map generation domain split into coherent submodules.

pub mod model;
pub mod progression;

mod generator;
mod grid;
mod layout;
mod seed;
mod spawns;

use crate::config::GenerationConfig;

pub use generator::MapGenerator;
pub use model::{GeneratedLevel, GenerationError, MIN_MAP_SIDE};
pub use progression::{STARTING_DEPTH, config_for_depth, level_seed};
pub use seed::seed_value;
pub(crate) use seed::mix_seed_stream;

pub fn generate(
    seed: &str,
    width: usize,
    height: usize,
    config: &GenerationConfig,
) -> Result<GeneratedLevel, GenerationError> {
    MapGenerator::new(seed, width, height, config).generate()
}

/// Generates the level for `depth` of the run started from `run_seed`.
pub fn generate_level(
    run_seed: &str,
    depth: u32,
    width: usize,
    height: usize,
    base: &GenerationConfig,
) -> Result<GeneratedLevel, GenerationError> {
    let seed = level_seed(run_seed, depth);
    generate(&seed, width, height, &config_for_depth(base, depth))
}
