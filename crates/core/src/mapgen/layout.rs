//! Room placement and corridor carving logic for base map topology.

use crate::config::GenerationConfig;
use crate::geometry::{Position, manhattan};
use crate::types::Terrain;

use super::seed::{mix_seed_stream, random_usize};

const PLACEMENT_ATTEMPTS_PER_ROOM: usize = 15;
const FALLBACK_ROOM_SIDE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    fn right(self) -> usize {
        self.x + self.width - 1
    }

    fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub(super) fn center(self) -> Position {
        Position {
            row: (self.y + (self.height / 2)) as i32,
            col: (self.x + (self.width / 2)) as i32,
        }
    }

    pub(super) fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub(super) fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct RoomLayout {
    pub(super) rooms: Vec<RoomRect>,
    pub(super) entry_tile: Position,
    pub(super) down_stairs_tile: Position,
}

/// Callers guarantee `width`/`height` leave room for a `min_room_size` room inside the border.
pub(super) fn build_room_layout(
    level_seed: u64,
    width: usize,
    height: usize,
    config: &GenerationConfig,
) -> RoomLayout {
    let max_room_width = config.max_room_size.min(width - 2);
    let max_room_height = config.max_room_size.min(height - 2);
    let min_room_width = config.min_room_size.min(max_room_width);
    let min_room_height = config.min_room_size.min(max_room_height);
    let target_room_count =
        random_usize(level_seed, 1, config.max_rooms.div_ceil(2).max(1), config.max_rooms.max(1));

    let mut rooms = Vec::new();
    for attempt in 0..(config.max_rooms * PLACEMENT_ATTEMPTS_PER_ROOM) as u64 {
        if rooms.len() >= target_room_count {
            break;
        }
        let room_width = random_usize(level_seed, attempt * 8 + 2, min_room_width, max_room_width);
        let room_height =
            random_usize(level_seed, attempt * 8 + 3, min_room_height, max_room_height);

        let max_x = width - room_width - 1;
        let max_y = height - room_height - 1;
        let x = random_usize(level_seed, attempt * 8 + 4, 1, max_x);
        let y = random_usize(level_seed, attempt * 8 + 5, 1, max_y);
        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(1);
        if rooms.iter().any(|existing_room: &RoomRect| {
            existing_room.expanded(1).intersects(&candidate_with_margin)
        }) {
            continue;
        }
        rooms.push(candidate);
    }

    if rooms.is_empty() {
        rooms.push(fallback_room(width, height));
    }
    rooms.sort_by_key(|room| (room.center(), room.height, room.width));

    let entry_tile = rooms[0].center();
    let mut down_stairs_tile = entry_tile;
    let mut best_distance = 0_u32;
    for room in &rooms {
        let center = room.center();
        let distance = manhattan(entry_tile, center);
        if distance > best_distance || (distance == best_distance && center > down_stairs_tile) {
            down_stairs_tile = center;
            best_distance = distance;
        }
    }

    RoomLayout { rooms, entry_tile, down_stairs_tile }
}

fn fallback_room(width: usize, height: usize) -> RoomRect {
    let room_width = FALLBACK_ROOM_SIDE.min(width - 2);
    let room_height = FALLBACK_ROOM_SIDE.min(height - 2);
    RoomRect {
        x: (width - room_width) / 2,
        y: (height - room_height) / 2,
        width: room_width,
        height: room_height,
    }
}

pub(super) fn carve_room(tiles: &mut [Terrain], width: usize, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            tiles[y * width + x] = Terrain::Floor;
        }
    }
}

/// Links every room into one tree by repeatedly joining the closest unconnected room.
pub(super) fn carve_room_corridors(
    tiles: &mut [Terrain],
    width: usize,
    height: usize,
    level_seed: u64,
    rooms: &[RoomRect],
) {
    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();

    while !pending_room_indices.is_empty() {
        let mut best_choice: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected_room_indices {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending_room_indices {
                let distance = manhattan(connected_center, rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best_choice.is_none_or(|best| candidate < best) {
                    best_choice = Some(candidate);
                }
            }
        }

        let Some((_, connected_index, pending_index)) = best_choice else {
            break;
        };
        let horizontal_first =
            mix_seed_stream(level_seed, ((connected_index as u64) << 32) | (pending_index as u64))
                & 1
                == 0;
        let corridor = Corridor { width, height, horizontal_first };
        corridor.carve(tiles, rooms[connected_index].center(), rooms[pending_index].center());

        connected_room_indices.push(pending_index);
        pending_room_indices.retain(|&index| index != pending_index);
    }
}

struct Corridor {
    width: usize,
    height: usize,
    horizontal_first: bool,
}

impl Corridor {
    fn carve(&self, tiles: &mut [Terrain], start: Position, end: Position) {
        if self.horizontal_first {
            self.carve_horizontal_line(tiles, start.row, start.col, end.col);
            self.carve_vertical_line(tiles, end.col, start.row, end.row);
        } else {
            self.carve_vertical_line(tiles, start.col, start.row, end.row);
            self.carve_horizontal_line(tiles, end.row, start.col, end.col);
        }
    }

    fn carve_horizontal_line(&self, tiles: &mut [Terrain], row: i32, left: i32, right: i32) {
        for col in left.min(right)..=left.max(right) {
            self.carve_tile(tiles, Position { row, col });
        }
    }

    fn carve_vertical_line(&self, tiles: &mut [Terrain], col: i32, top: i32, bottom: i32) {
        for row in top.min(bottom)..=top.max(bottom) {
            self.carve_tile(tiles, Position { row, col });
        }
    }

    // The outer ring always stays solid.
    fn carve_tile(&self, tiles: &mut [Terrain], pos: Position) {
        if pos.row <= 0 || pos.col <= 0 {
            return;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.height - 1 || col >= self.width - 1 {
            return;
        }
        tiles[row * self.width + col] = Terrain::Floor;
    }
}
