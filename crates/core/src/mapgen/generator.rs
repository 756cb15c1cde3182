//! High-level map generation orchestration that composes layout, carving, and spawns.

use log::debug;

use crate::config::GenerationConfig;
use crate::geometry::Position;
use crate::state::{Cell, Map};
use crate::types::Terrain;

use super::grid::{
    farthest_walkable_tile_from_entry, nearest_walkable_floor_tile, tile_index,
    trim_unreachable_rock,
};
use super::layout::{build_room_layout, carve_room, carve_room_corridors};
use super::model::{GeneratedLevel, GenerationError, MIN_MAP_SIDE};
use super::seed::seed_value;
use super::spawns::{SpawnContext, generate_creature_spawns, generate_item_spawns};

pub struct MapGenerator<'a> {
    seed: &'a str,
    width: usize,
    height: usize,
    config: &'a GenerationConfig,
}

impl<'a> MapGenerator<'a> {
    pub fn new(seed: &'a str, width: usize, height: usize, config: &'a GenerationConfig) -> Self {
        Self { seed, width, height, config }
    }

    pub fn generate(&self) -> Result<GeneratedLevel, GenerationError> {
        self.validate()?;

        let level_seed = seed_value(self.seed);
        let mut tiles = vec![Terrain::Wall; self.width * self.height];
        let layout = build_room_layout(level_seed, self.width, self.height, self.config);

        for room in &layout.rooms {
            carve_room(&mut tiles, self.width, room);
        }
        carve_room_corridors(&mut tiles, self.width, self.height, level_seed, &layout.rooms);

        let entry_tile =
            nearest_walkable_floor_tile(&tiles, self.width, self.height, layout.entry_tile);
        let mut down_stairs_tile =
            nearest_walkable_floor_tile(&tiles, self.width, self.height, layout.down_stairs_tile);
        if down_stairs_tile == entry_tile {
            down_stairs_tile =
                farthest_walkable_tile_from_entry(&tiles, self.width, self.height, entry_tile);
        }
        tiles[tile_index(down_stairs_tile, self.width)] = Terrain::Stairs;
        trim_unreachable_rock(&mut tiles, self.width, self.height);

        let spawn_context = SpawnContext {
            level_seed,
            depth: self.config.depth,
            width: self.width,
            height: self.height,
            tiles: &tiles,
            entry_tile,
            down_stairs_tile,
        };
        let item_spawns = generate_item_spawns(&spawn_context, self.config.item_count);
        let creature_spawns =
            generate_creature_spawns(&spawn_context, self.config.creature_count, &item_spawns);
        if item_spawns.len() < self.config.item_count
            || creature_spawns.len() < self.config.creature_count
        {
            debug!(
                "seed {:?}: placed {}/{} items and {}/{} creatures",
                self.seed,
                item_spawns.len(),
                self.config.item_count,
                creature_spawns.len(),
                self.config.creature_count
            );
        }

        let mut cells: Vec<Cell> = tiles.into_iter().map(Cell::new).collect();
        for spawn in &item_spawns {
            cells[tile_index(spawn.pos, self.width)].item = Some(spawn.item);
        }
        for spawn in &creature_spawns {
            cells[tile_index(spawn.pos, self.width)].spawn_marker = Some(spawn.species);
        }

        Ok(GeneratedLevel {
            map: Map::from_cells(self.width, self.height, cells, self.seed),
            spawn: entry_tile,
        })
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if self.width < MIN_MAP_SIDE || self.height < MIN_MAP_SIDE {
            return Err(GenerationError::TooSmall {
                width: self.width,
                height: self.height,
                min: MIN_MAP_SIDE,
            });
        }
        let config = self.config;
        if config.min_room_size < 2 {
            return Err(GenerationError::InvalidConfig(format!(
                "min_room_size must be at least 2, got {}",
                config.min_room_size
            )));
        }
        if config.min_room_size > config.max_room_size {
            return Err(GenerationError::InvalidConfig(format!(
                "min_room_size {} exceeds max_room_size {}",
                config.min_room_size, config.max_room_size
            )));
        }
        if config.max_rooms == 0 {
            return Err(GenerationError::InvalidConfig("max_rooms must be at least 1".to_string()));
        }
        Ok(())
    }
}
