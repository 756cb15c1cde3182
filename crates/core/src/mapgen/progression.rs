//! Depth progression rules: per-depth level seeds and population scaling.

use crate::config::GenerationConfig;

pub const STARTING_DEPTH: u32 = 1;

/// The first level uses the run seed verbatim so previews and runs agree.
pub fn level_seed(run_seed: &str, depth: u32) -> String {
    if depth <= STARTING_DEPTH { run_seed.to_string() } else { format!("{run_seed}/{depth}") }
}

/// Generation settings for `depth`: one extra creature per level below the first.
pub fn config_for_depth(base: &GenerationConfig, depth: u32) -> GenerationConfig {
    let extra = depth.saturating_sub(STARTING_DEPTH) as usize;
    GenerationConfig { depth, creature_count: base.creature_count + extra, ..base.clone() }
}
