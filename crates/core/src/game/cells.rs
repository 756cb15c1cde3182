//! Single-cell edits requested by the UI or by scripted setups.

use crate::action::CellPatch;
use crate::state::GameState;
use crate::types::Terrain;

use super::Rejection;

/// Rewrites terrain and item of one cell. The creature slot and visibility stay as they were,
/// and the patch may neither bury an occupant nor add, move, or remove the stairs.
pub(super) fn update_cell(state: &mut GameState, patch: &CellPatch) -> Result<(), Rejection> {
    let player_position = state.player.position;
    let map = state.current_map.as_mut().ok_or(Rejection::NoMap)?;
    let cell = map.cell_mut(patch.position).ok_or(Rejection::OutOfBounds(patch.position))?;

    let was_stairs = cell.terrain == Terrain::Stairs;
    let becomes_stairs = patch.terrain == Terrain::Stairs;
    if was_stairs != becomes_stairs {
        return Err(Rejection::InvalidPatch("a level keeps exactly one stairs cell"));
    }
    if !patch.terrain.is_passable() {
        if patch.position == player_position {
            return Err(Rejection::InvalidPatch("the player would be walled in"));
        }
        if cell.creature().is_some() {
            return Err(Rejection::InvalidPatch("a creature would be walled in"));
        }
        if patch.item.is_some() {
            return Err(Rejection::InvalidPatch("items only lie on open ground"));
        }
        cell.spawn_marker = None;
    }

    cell.terrain = patch.terrain;
    cell.item = patch.item;
    Ok(())
}
