//! Item and creature-marker selection and placement rules for generated maps.

use crate::content::species_weights;
use crate::geometry::{Position, manhattan};
use crate::types::{ArmorKind, Item, PotionKind, Species, Terrain, WeaponKind};

use super::grid::tile_at;
use super::seed::random_usize;

const ITEM_ROLL_GOLD_THRESHOLD: usize = 45;
const ITEM_ROLL_POTION_THRESHOLD: usize = 75;
const ITEM_ROLL_WEAPON_THRESHOLD: usize = 90;
const MIN_GOLD: usize = 5;
const MAX_GOLD: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSpawn {
    pub item: Item,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureSpawn {
    pub species: Species,
    pub pos: Position,
}

pub(super) struct SpawnContext<'a> {
    pub(super) level_seed: u64,
    pub(super) depth: u32,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) tiles: &'a [Terrain],
    pub(super) entry_tile: Position,
    pub(super) down_stairs_tile: Position,
}

impl SpawnContext<'_> {
    /// Floor tiles that may hold a spawn, in row-major order.
    fn free_floor_tiles(&self) -> Vec<Position> {
        let mut tiles = Vec::new();
        for row in 1..self.height.saturating_sub(1) {
            for col in 1..self.width.saturating_sub(1) {
                let pos = Position { row: row as i32, col: col as i32 };
                if tile_at(self.tiles, self.width, pos) == Terrain::Floor
                    && pos != self.entry_tile
                    && pos != self.down_stairs_tile
                {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }
}

pub(super) fn generate_item_spawns(context: &SpawnContext<'_>, count: usize) -> Vec<ItemSpawn> {
    let mut candidates = context.free_floor_tiles();
    let mut item_spawns = Vec::with_capacity(count);
    for item_index in 0..count {
        if candidates.is_empty() {
            break;
        }
        let stream = 7000 + item_index as u64;
        let pick = random_usize(context.level_seed, stream, 0, candidates.len() - 1);
        let pos = candidates.remove(pick);
        item_spawns.push(ItemSpawn { item: pick_item(context.level_seed, item_index), pos });
    }
    item_spawns.sort_by_key(|spawn| spawn.pos);
    item_spawns
}

/// Creature markers keep one tile of clearance around the entry and never share an item tile.
pub(super) fn generate_creature_spawns(
    context: &SpawnContext<'_>,
    count: usize,
    item_spawns: &[ItemSpawn],
) -> Vec<CreatureSpawn> {
    let mut candidates: Vec<Position> = context
        .free_floor_tiles()
        .into_iter()
        .filter(|&pos| manhattan(pos, context.entry_tile) > 1)
        .filter(|&pos| !item_spawns.iter().any(|spawn| spawn.pos == pos))
        .collect();
    let mut creature_spawns = Vec::with_capacity(count);
    for spawn_index in 0..count {
        if candidates.is_empty() {
            break;
        }
        let pick =
            random_usize(context.level_seed, 8000 + spawn_index as u64, 0, candidates.len() - 1);
        let pos = candidates.remove(pick);
        let species = pick_species(context.depth, context.level_seed, spawn_index);
        creature_spawns.push(CreatureSpawn { species, pos });
    }
    creature_spawns.sort_by_key(|spawn| spawn.pos);
    creature_spawns
}

pub(super) fn pick_item(level_seed: u64, spawn_index: usize) -> Item {
    let stream = 6000 + (spawn_index as u64) * 4;
    let roll = random_usize(level_seed, stream, 0, 99);
    let detail = random_usize(level_seed, stream + 1, 0, 99);

    if roll < ITEM_ROLL_GOLD_THRESHOLD {
        let amount = random_usize(level_seed, stream + 2, MIN_GOLD, MAX_GOLD) as u32;
        Item::Gold { amount }
    } else if roll < ITEM_ROLL_POTION_THRESHOLD {
        if detail < 66 {
            Item::Potion(PotionKind::Healing)
        } else {
            Item::Potion(PotionKind::Regeneration)
        }
    } else if roll < ITEM_ROLL_WEAPON_THRESHOLD {
        let kind = if detail < 60 { WeaponKind::Dagger } else { WeaponKind::ShortSword };
        Item::Weapon(kind)
    } else {
        Item::Armor(ArmorKind::Leather)
    }
}

fn pick_species(depth: u32, level_seed: u64, spawn_index: usize) -> Species {
    let roll = random_usize(level_seed, 5000 + spawn_index as u64, 0, 99);
    let mut threshold = 0;
    for (species, weight) in species_weights(depth) {
        threshold += weight;
        if roll < threshold {
            return species;
        }
    }
    Species::Rat
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::content::is_large_gold;

    fn open_floor(width: usize, height: usize) -> Vec<Terrain> {
        let mut tiles = vec![Terrain::Wall; width * height];
        for row in 1..(height - 1) {
            for col in 1..(width - 1) {
                tiles[row * width + col] = Terrain::Floor;
            }
        }
        tiles
    }

    #[test]
    fn pick_item_is_deterministic_for_seed_and_index() {
        assert_eq!(pick_item(123, 4), pick_item(123, 4));
    }

    #[test]
    fn gold_rolls_cover_both_loot_sizes() {
        let sizes: BTreeSet<bool> = (0..400)
            .map(|index| pick_item(77, index))
            .filter_map(|item| match item {
                Item::Gold { amount } => Some(is_large_gold(amount)),
                _ => None,
            })
            .collect();
        assert_eq!(sizes.len(), 2, "expected both small and large gold piles");
    }

    #[test]
    fn first_depth_never_rolls_ghosts() {
        for index in 0..200 {
            assert_ne!(pick_species(1, 4_242, index), Species::Ghost);
        }
    }

    #[test]
    fn spawns_avoid_entry_stairs_and_each_other() {
        let width = 20;
        let height = 15;
        let tiles = open_floor(width, height);
        let context = SpawnContext {
            level_seed: 9_876,
            depth: 3,
            width,
            height,
            tiles: &tiles,
            entry_tile: Position::new(2, 2),
            down_stairs_tile: Position::new(12, 16),
        };

        let items = generate_item_spawns(&context, 8);
        let creatures = generate_creature_spawns(&context, 8, &items);
        assert_eq!(items.len(), 8);
        assert_eq!(creatures.len(), 8);

        let mut seen = BTreeSet::new();
        for pos in items.iter().map(|s| s.pos).chain(creatures.iter().map(|s| s.pos)) {
            assert!(seen.insert(pos), "two spawns share {pos:?}");
            assert_ne!(pos, context.entry_tile);
            assert_ne!(pos, context.down_stairs_tile);
        }
        for spawn in &creatures {
            assert!(manhattan(spawn.pos, context.entry_tile) > 1);
        }
    }

    #[test]
    fn crowded_rooms_place_only_what_fits() {
        let width = 5;
        let height = 5;
        let tiles = open_floor(width, height);
        let context = SpawnContext {
            level_seed: 1,
            depth: 1,
            width,
            height,
            tiles: &tiles,
            entry_tile: Position::new(2, 2),
            down_stairs_tile: Position::new(1, 1),
        };

        let items = generate_item_spawns(&context, 20);
        assert_eq!(items.len(), 7, "3x3 room minus entry and stairs leaves seven tiles");
        let creatures = generate_creature_spawns(&context, 5, &items);
        assert!(creatures.is_empty());
    }
}
