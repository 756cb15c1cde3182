//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from the reducer itself.
//! It does not own replay execution or journal encoding.

use std::collections::BTreeMap;
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::geometry::{MoveDirection, Position};
use crate::state::GameState;
use crate::types::{ActiveCondition, ConditionKind, GameStatus, Item, SoundCue};

fn write_str(hasher: &mut Xxh3, text: &str) {
    hasher.write_u32(text.len() as u32);
    hasher.write(text.as_bytes());
}

fn write_position(hasher: &mut Xxh3, position: Position) {
    hasher.write_i32(position.row);
    hasher.write_i32(position.col);
}

fn write_items(hasher: &mut Xxh3, items: &[Item]) {
    hasher.write_u32(items.len() as u32);
    for item in items {
        match *item {
            Item::Gold { amount } => {
                hasher.write_u8(0);
                hasher.write_u32(amount);
            }
            Item::Potion(kind) => hasher.write(&[1, kind as u8]),
            Item::Weapon(kind) => hasher.write(&[2, kind as u8]),
            Item::Armor(kind) => hasher.write(&[3, kind as u8]),
        }
    }
}

fn write_conditions(hasher: &mut Xxh3, conditions: &BTreeMap<ConditionKind, ActiveCondition>) {
    hasher.write_u32(conditions.len() as u32);
    for (kind, active) in conditions {
        hasher.write_u8(*kind as u8);
        hasher.write_u32(active.remaining_turns);
        hasher.write_i32(active.intensity);
    }
}

fn write_cues(hasher: &mut Xxh3, cues: &[SoundCue]) {
    hasher.write_u32(cues.len() as u32);
    for cue in cues {
        write_str(hasher, cue.tag());
        if let SoundCue::CreatureAttack(species)
        | SoundCue::CreaturePain(species)
        | SoundCue::CreatureDeath(species) = *cue
        {
            hasher.write_u8(species as u8);
        }
    }
}

impl GameState {
    /// Fingerprint of every field the reducer writes. The `GameConfig` is left out: it never
    /// changes during a session and journals carry it next to the actions.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        write_str(&mut hasher, &self.seed);
        hasher.write_u8(match self.status {
            GameStatus::Playing => 0,
            GameStatus::Won => 1,
            GameStatus::Lost => 2,
        });
        hasher.write_u8(match self.move_direction {
            MoveDirection::Up => 0,
            MoveDirection::Down => 1,
            MoveDirection::Left => 2,
            MoveDirection::Right => 3,
        });
        hasher.write_u32(self.depth);
        hasher.write_u64(self.turn);
        hasher.write_u64(self.rolls.cursor());

        let player = &self.player;
        write_str(&mut hasher, &player.name);
        write_position(&mut hasher, player.position);
        hasher.write_i32(player.hp);
        hasher.write_i32(player.max_hp);
        hasher.write_u32(player.gold);
        write_items(&mut hasher, &player.equipped);
        write_items(&mut hasher, &player.inventory);
        write_conditions(&mut hasher, &player.conditions);

        hasher.write_u32(self.creatures.len() as u32);
        for creature in self.creatures.values() {
            write_str(&mut hasher, creature.id.as_str());
            hasher.write_u8(creature.species as u8);
            write_position(&mut hasher, creature.position);
            hasher.write_i32(creature.hp);
            hasher.write_i32(creature.max_hp);
            hasher.write_i32(creature.attack);
            hasher.write_i32(creature.defense);
            write_conditions(&mut hasher, &creature.conditions);
        }

        match &self.current_map {
            Some(map) => {
                hasher.write_u8(1);
                hasher.write(&map.canonical_bytes());
            }
            None => hasher.write_u8(0),
        }

        write_cues(&mut hasher, &self.sound_cues);
        write_str(&mut hasher, &self.interaction_text);
        hasher.write_u32(self.event_log.len() as u32);
        for entry in &self.event_log {
            write_str(&mut hasher, entry);
        }
        hasher.finish()
    }
}
