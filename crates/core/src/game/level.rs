//! Level installation: new runs, stairs descent, and the setup actions they are built from.

use log::{debug, info, warn};

use crate::action::GameAction;
use crate::creatures::{self, Occupancy, RollStream};
use crate::geometry::Position;
use crate::mapgen::{self, GeneratedLevel, seed_value};
use crate::state::{GameState, Map};
use crate::types::{GameStatus, SoundCue};
use crate::visibility::apply_visibility;

use super::events::GameEvent;
use super::{Rejection, apply};

/// The explicit action sequence that installs `level` for a run seeded with `seed`.
pub fn level_setup_actions(seed: &str, level: &GeneratedLevel) -> Vec<GameAction> {
    vec![
        GameAction::SetSeed(seed.to_string()),
        GameAction::SetCurrentMap(level.map.clone()),
        GameAction::InitPlayerSpawn(level.spawn),
        GameAction::InitVisibility,
        GameAction::InitCreatures,
    ]
}

fn install_level(
    state: &mut GameState,
    seed: &str,
    level: &GeneratedLevel,
) -> Result<(), Rejection> {
    for action in level_setup_actions(seed, level) {
        apply(state, &action)?;
    }
    Ok(())
}

pub(super) fn set_seed(state: &mut GameState, seed: &str) {
    state.seed = seed.to_string();
    state.rolls = RollStream::new(seed_value(seed));
}

pub(super) fn set_current_map(state: &mut GameState, map: &Map) -> Result<(), Rejection> {
    if !map.is_well_formed() {
        return Err(Rejection::MalformedMap);
    }
    let installed = state.current_map.insert(map.clone());
    Occupancy::new(installed, &mut state.creatures).clear();
    Ok(())
}

pub(super) fn init_player_spawn(
    state: &mut GameState,
    position: Position,
) -> Result<(), Rejection> {
    if let Some(map) = &state.current_map {
        if !map.in_bounds(position) {
            return Err(Rejection::OutOfBounds(position));
        }
        if !map.is_passable(position) {
            return Err(Rejection::Blocked(position));
        }
        if map.creature_at(position).is_some() {
            return Err(Rejection::Occupied(position));
        }
    }
    state.player.position = position;
    Ok(())
}

pub(super) fn init_visibility(state: &mut GameState) -> Result<(), Rejection> {
    let origin = state.player.position;
    let radius = state.config.sight_radius;
    let map = state.current_map.as_mut().ok_or(Rejection::NoMap)?;
    apply_visibility(map, origin, radius);
    Ok(())
}

pub(super) fn init_creatures(state: &mut GameState) -> Result<(), Rejection> {
    let map = state.current_map.as_mut().ok_or(Rejection::NoMap)?;
    let spawned = creatures::init_creatures(map, &state.config.creatures);
    let mut occupancy = Occupancy::new(map, &mut state.creatures);
    occupancy.clear();
    for creature in spawned.into_values() {
        if creature.position == state.player.position {
            continue;
        }
        let id = creature.id.clone();
        if !occupancy.place(creature) {
            debug!("spawn marker for {id} could not be filled");
        }
    }
    Ok(())
}

pub(super) fn new_game(state: &mut GameState, seed: &str) -> Result<(), Rejection> {
    let config = state.config.clone();
    let level = match mapgen::generate_level(
        seed,
        mapgen::STARTING_DEPTH,
        config.map_width,
        config.map_height,
        &config.generation,
    ) {
        Ok(level) => level,
        Err(err) => {
            warn!("new game with seed {seed:?} failed: {err}");
            state.push_log(GameEvent::NoWayDown.to_string());
            return Ok(());
        }
    };

    let mut fresh = GameState::with_config(config);
    install_level(&mut fresh, seed, &level)?;
    fresh.depth = mapgen::STARTING_DEPTH;
    let welcome = GameEvent::Welcome { name: fresh.player.name.clone() };
    fresh.push_log(welcome.to_string());
    info!("new game: seed {seed:?}, {}x{}", level.map.width(), level.map.height());
    *state = fresh;
    Ok(())
}

/// Stairs were taken. Returns whether a new level was installed.
pub(super) fn descend(state: &mut GameState) -> Result<bool, Rejection> {
    state.sound_cues.push(SoundCue::StairsUsed);
    if state.depth >= state.config.max_depth {
        state.status = GameStatus::Won;
        state.push_log(GameEvent::Escaped.to_string());
        info!("run won at depth {} after {} turns", state.depth, state.turn);
        return Ok(false);
    }

    let next_depth = state.depth + 1;
    let seed = state.seed.clone();
    let config = &state.config;
    match mapgen::generate_level(
        &seed,
        next_depth,
        config.map_width,
        config.map_height,
        &config.generation,
    ) {
        Ok(level) => {
            let rolls = state.rolls.clone();
            install_level(state, &seed, &level)?;
            // The roll stream spans the whole run, not one level.
            state.rolls = rolls;
            state.depth = next_depth;
            state.push_log(GameEvent::Descended { depth: next_depth }.to_string());
            info!("descended to depth {next_depth}");
            Ok(true)
        }
        Err(err) => {
            warn!("could not generate depth {next_depth} for seed {seed:?}: {err}");
            state.push_log(GameEvent::NoWayDown.to_string());
            Ok(false)
        }
    }
}
