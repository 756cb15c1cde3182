//! Creature model: spawning, combat, turn policy, and the occupancy bookkeeping.
//! This module exists so the creature mapping and the per-cell creature slots only ever
//! change together. It does not own turn order or event logging; the reducer does.

pub mod ai;
pub mod combat;
pub mod spawn;

use std::collections::BTreeMap;

use crate::geometry::Position;
use crate::state::{Creature, Map};
use crate::types::CreatureId;

pub use ai::{CreatureAction, choose_action};
pub use combat::{
    Combatant, Encounter, EncounterOutcome, RollStream, Strike, resolve_encounter,
    resolve_strike, strike_damage,
};
pub use spawn::init_creatures;

/// Sole writer of `Cell::creature`; keeps it in lockstep with the creature mapping.
pub(crate) struct Occupancy<'a> {
    map: &'a mut Map,
    creatures: &'a mut BTreeMap<CreatureId, Creature>,
}

impl<'a> Occupancy<'a> {
    pub(crate) fn new(map: &'a mut Map, creatures: &'a mut BTreeMap<CreatureId, Creature>) -> Self {
        Self { map, creatures }
    }

    /// Drops every creature and empties every slot.
    pub(crate) fn clear(&mut self) {
        self.creatures.clear();
        self.map.strip_creature_slots();
    }

    /// Places `creature` at its own position. Refused when the cell is missing, impassable,
    /// already taken, or the id is already in use.
    pub(crate) fn place(&mut self, creature: Creature) -> bool {
        if self.creatures.contains_key(&creature.id) || !self.map.is_passable(creature.position) {
            return false;
        }
        let Some(cell) = self.map.cell_mut(creature.position) else {
            return false;
        };
        if cell.creature.is_some() {
            return false;
        }
        cell.creature = Some(creature.id.clone());
        self.creatures.insert(creature.id.clone(), creature);
        true
    }

    pub(crate) fn relocate(&mut self, id: &CreatureId, to: Position) -> bool {
        let Some(from) = self.creatures.get(id).map(|creature| creature.position) else {
            return false;
        };
        if !self.map.is_passable(to) || self.map.creature_at(to).is_some() {
            return false;
        }
        if let Some(cell) = self.map.cell_mut(from) {
            cell.creature = None;
        }
        if let Some(cell) = self.map.cell_mut(to) {
            cell.creature = Some(id.clone());
        }
        if let Some(creature) = self.creatures.get_mut(id) {
            creature.position = to;
        }
        true
    }

    pub(crate) fn remove(&mut self, id: &CreatureId) -> Option<Creature> {
        let creature = self.creatures.remove(id)?;
        if let Some(cell) = self.map.cell_mut(creature.position)
            && cell.creature.as_ref() == Some(id)
        {
            cell.creature = None;
        }
        Some(creature)
    }
}

/// True when every mapped creature sits in a matching slot and no slot names a missing creature.
pub fn cross_references_consistent(map: &Map, creatures: &BTreeMap<CreatureId, Creature>) -> bool {
    let mapped_ok = creatures.iter().all(|(id, creature)| {
        creature.id == *id && map.creature_at(creature.position) == Some(id)
    });
    let slot_count = map.cells().iter().filter(|cell| cell.creature().is_some()).count();
    mapped_ok && slot_count == creatures.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Species;

    fn room() -> Map {
        Map::from_rows(&["#####", "#...#", "#...#", "#####"], "occupancy")
    }

    fn goblin(index: usize, position: Position) -> Creature {
        Creature {
            id: CreatureId::new(Species::Goblin, index),
            species: Species::Goblin,
            hp: 6,
            max_hp: 6,
            attack: 2,
            defense: 1,
            position,
            conditions: BTreeMap::new(),
        }
    }

    #[test]
    fn place_relocate_remove_keep_slots_in_sync() {
        let mut map = room();
        let mut creatures = BTreeMap::new();
        let id = CreatureId::new(Species::Goblin, 0);
        {
            let mut occupancy = Occupancy::new(&mut map, &mut creatures);
            assert!(occupancy.place(goblin(0, Position::new(1, 1))));
            assert!(occupancy.relocate(&id, Position::new(2, 3)));
        }
        assert!(cross_references_consistent(&map, &creatures));
        assert_eq!(map.creature_at(Position::new(1, 1)), None);
        assert_eq!(map.creature_at(Position::new(2, 3)), Some(&id));

        let removed = Occupancy::new(&mut map, &mut creatures).remove(&id);
        assert_eq!(removed.map(|creature| creature.position), Some(Position::new(2, 3)));
        assert!(creatures.is_empty());
        assert!(cross_references_consistent(&map, &creatures));
        assert!(map.cells().iter().all(|cell| cell.creature().is_none()));
    }

    #[test]
    fn occupied_or_solid_cells_are_refused() {
        let mut map = room();
        let mut creatures = BTreeMap::new();
        let mut occupancy = Occupancy::new(&mut map, &mut creatures);
        assert!(occupancy.place(goblin(0, Position::new(1, 1))));
        assert!(!occupancy.place(goblin(1, Position::new(1, 1))));
        assert!(!occupancy.place(goblin(2, Position::new(0, 0))));
        assert!(!occupancy.relocate(&CreatureId::new(Species::Goblin, 0), Position::new(0, 1)));
        assert!(!occupancy.relocate(&CreatureId::new(Species::Goblin, 9), Position::new(2, 2)));
    }

    #[test]
    fn clear_empties_mapping_and_slots() {
        let mut map = room();
        let mut creatures = BTreeMap::new();
        let mut occupancy = Occupancy::new(&mut map, &mut creatures);
        occupancy.place(goblin(0, Position::new(1, 1)));
        occupancy.place(goblin(1, Position::new(2, 2)));
        occupancy.clear();
        assert!(creatures.is_empty());
        assert!(cross_references_consistent(&map, &creatures));
    }
}
