//! Fog-aware descriptions for the cell under the cursor.

use crate::content::item_name;
use crate::geometry::Position;
use crate::state::{GameState, Observation};
use crate::types::Terrain;

fn terrain_text(terrain: Terrain) -> &'static str {
    match terrain {
        Terrain::Floor => "Stone floor.",
        Terrain::Wall => "A rough stone wall.",
        Terrain::Stairs => "Stairs leading down.",
        Terrain::Empty => "Solid rock.",
    }
}

/// What the player knows about `position`. Empty when there is nothing to describe.
pub fn describe_cell(state: &GameState, position: Position) -> String {
    let Some(map) = state.map() else {
        return String::new();
    };
    if !map.in_bounds(position) {
        return String::new();
    }
    match map.observe(position) {
        Observation::Unknown => "You have not explored this place.".to_string(),
        Observation::Remembered { terrain } => {
            format!("{} You remember it from earlier.", terrain_text(terrain))
        }
        Observation::Visible { terrain, item, creature } => {
            if position == state.player.position {
                let player = &state.player;
                return format!("You, {} ({}/{} hp).", player.name, player.hp, player.max_hp);
            }
            if let Some(creature) = creature.and_then(|id| state.creatures.get(&id)) {
                return format!("A {} ({}/{} hp).", creature.name(), creature.hp, creature.max_hp);
            }
            match item {
                Some(item) => format!("You see {} here.", item_name(item)),
                None => terrain_text(terrain).to_string(),
            }
        }
    }
}
