//! Player movement: stepping, bumping into creatures, and taking the stairs.

use crate::geometry::MoveDirection;
use crate::state::GameState;
use crate::types::Terrain;
use crate::visibility::apply_visibility;

use super::turn::{begin_turn, end_turn, player_attacks};
use super::{Rejection, items, level};

/// Moving into a creature attacks it and leaves the player in place; walls and the map edge
/// reject the move outright and consume no turn.
pub(super) fn move_player(
    state: &mut GameState,
    direction: MoveDirection,
) -> Result<(), Rejection> {
    if state.status.is_terminal() {
        return Err(Rejection::NotPlaying);
    }
    let map = state.current_map.as_ref().ok_or(Rejection::NoMap)?;
    let origin = state.player.position;
    let target = origin.step(direction).ok_or(Rejection::OutOfBounds(origin))?;
    if !map.in_bounds(target) {
        return Err(Rejection::OutOfBounds(target));
    }
    if !map.is_passable(target) {
        return Err(Rejection::Blocked(target));
    }
    let foe = map.creature_at(target).cloned();
    let on_stairs = map.terrain_at(target) == Terrain::Stairs;

    begin_turn(state);
    if let Some(id) = foe {
        player_attacks(state, &id);
        end_turn(state, Some(&id), false);
        return Ok(());
    }

    state.player.position = target;
    state.move_direction = direction;
    items::pick_up(state, target);
    let level_changed = if on_stairs { level::descend(state)? } else { false };
    if !level_changed {
        let radius = state.config.sight_radius;
        if let Some(map) = state.current_map.as_mut() {
            apply_visibility(map, target, radius);
        }
    }
    end_turn(state, None, level_changed);
    Ok(())
}
