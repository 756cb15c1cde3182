//! Creature turn policy: creatures the player can see close in and attack.

use crate::geometry::{MoveDirection, Position, manhattan};
use crate::state::{Creature, Map};
use crate::types::Visibility;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatureAction {
    Attack,
    Step(Position),
    Idle,
}

/// Creatures out of the player's sight stay put; the rest attack when orthogonally adjacent,
/// otherwise step along the wider axis toward the player, falling back to the other axis.
pub fn choose_action(creature: &Creature, player: Position, map: &Map) -> CreatureAction {
    if map.visibility_at(creature.position) != Visibility::Visible {
        return CreatureAction::Idle;
    }
    if manhattan(creature.position, player) == 1 {
        return CreatureAction::Attack;
    }
    approach_steps(creature.position, player)
        .into_iter()
        .flatten()
        .filter_map(|direction| creature.position.step(direction))
        .find(|&next| next != player && map.is_passable(next) && map.creature_at(next).is_none())
        .map_or(CreatureAction::Idle, CreatureAction::Step)
}

fn approach_steps(from: Position, to: Position) -> [Option<MoveDirection>; 2] {
    let d_row = i64::from(to.row) - i64::from(from.row);
    let d_col = i64::from(to.col) - i64::from(from.col);
    let vertical = match d_row {
        0 => None,
        d if d < 0 => Some(MoveDirection::Up),
        _ => Some(MoveDirection::Down),
    };
    let horizontal = match d_col {
        0 => None,
        d if d < 0 => Some(MoveDirection::Left),
        _ => Some(MoveDirection::Right),
    };
    if d_row.abs() >= d_col.abs() { [vertical, horizontal] } else { [horizontal, vertical] }
}
