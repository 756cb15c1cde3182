//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating map and creature setup across many tests.
//! It does not own production gameplay logic.

use std::collections::BTreeMap;

use crate::action::GameAction;
use crate::config::{CombatConfig, GameConfig};
use crate::creatures::Occupancy;
use crate::geometry::Position;
use crate::state::{Creature, GameState, Map};
use crate::types::{CreatureId, Species};
use crate::visibility::apply_visibility;

use super::reduce;

pub(crate) const ARENA: [&str; 7] =
    ["#######", "#.....#", "#.....#", "#.....#", "#.....#", "#....>#", "#######"];

/// Guaranteed hits without crits keep combat arithmetic exact in tests.
pub(crate) fn exact_config() -> GameConfig {
    GameConfig { combat: CombatConfig::guaranteed_hit(), ..GameConfig::default() }
}

/// A playing state on `rows` with the player at `player` and sight already computed.
pub(crate) fn state_on(rows: &[&str], player: Position) -> GameState {
    let mut state = GameState::with_config(exact_config());
    state.seed = "fixture".to_string();
    let mut map = Map::from_rows(rows, "fixture");
    apply_visibility(&mut map, player, state.config.sight_radius);
    state.current_map = Some(map);
    state.player.position = player;
    state
}

pub(crate) fn arena_state(player: Position) -> GameState {
    state_on(&ARENA, player)
}

pub(crate) fn creature(
    species: Species,
    index: usize,
    position: Position,
    hp: i32,
    attack: i32,
) -> Creature {
    Creature {
        id: CreatureId::new(species, index),
        species,
        hp,
        max_hp: hp,
        attack,
        defense: 0,
        position,
        conditions: BTreeMap::new(),
    }
}

pub(crate) fn add_creature(state: &mut GameState, creature: Creature) -> CreatureId {
    let id = creature.id.clone();
    let map = state.current_map.as_mut().expect("fixture state has a map");
    assert!(Occupancy::new(map, &mut state.creatures).place(creature), "fixture cell is free");
    id
}

pub(crate) fn started(seed: &str, config: GameConfig) -> GameState {
    reduce(&GameState::with_config(config), &GameAction::NewGame { seed: seed.to_string() })
}
