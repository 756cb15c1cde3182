//! Grid and tile-space primitives used by layout, spawning, and rock trimming.

use crate::geometry::{Position, in_bounds, manhattan};
use crate::types::Terrain;

pub(super) fn tile_index(pos: Position, width: usize) -> usize {
    (pos.row as usize) * width + (pos.col as usize)
}

pub(super) fn tile_at(tiles: &[Terrain], width: usize, pos: Position) -> Terrain {
    tiles[tile_index(pos, width)]
}

fn interior_positions(width: usize, height: usize) -> impl Iterator<Item = Position> {
    (1..height.saturating_sub(1)).flat_map(move |row| {
        (1..width.saturating_sub(1)).map(move |col| Position { row: row as i32, col: col as i32 })
    })
}

pub(super) fn farthest_walkable_tile_from_entry(
    tiles: &[Terrain],
    width: usize,
    height: usize,
    entry_tile: Position,
) -> Position {
    let mut best = entry_tile;
    let mut best_distance = 0_u32;
    for pos in interior_positions(width, height) {
        if !tile_at(tiles, width, pos).is_passable() {
            continue;
        }
        let distance = manhattan(entry_tile, pos);
        if distance > best_distance || (distance == best_distance && pos > best) {
            best = pos;
            best_distance = distance;
        }
    }
    best
}

pub(super) fn nearest_walkable_floor_tile(
    tiles: &[Terrain],
    width: usize,
    height: usize,
    desired: Position,
) -> Position {
    if in_bounds(width, height, desired) && tile_at(tiles, width, desired) == Terrain::Floor {
        return desired;
    }

    let mut best = Position { row: 1, col: 1 };
    let mut best_distance = u32::MAX;
    for pos in interior_positions(width, height) {
        if tile_at(tiles, width, pos) != Terrain::Floor {
            continue;
        }
        let distance = manhattan(pos, desired);
        if distance < best_distance || (distance == best_distance && pos < best) {
            best = pos;
            best_distance = distance;
        }
    }
    best
}

/// Turns walls that touch no passable tile (diagonals included) into empty rock.
pub(super) fn trim_unreachable_rock(tiles: &mut [Terrain], width: usize, height: usize) {
    let snapshot = tiles.to_vec();
    for row in 0..height {
        for col in 0..width {
            let pos = Position { row: row as i32, col: col as i32 };
            if tile_at(&snapshot, width, pos) != Terrain::Wall {
                continue;
            }
            let touches_open = pos.surrounding().into_iter().any(|next| {
                in_bounds(width, height, next) && tile_at(&snapshot, width, next).is_passable()
            });
            if !touches_open {
                tiles[tile_index(pos, width)] = Terrain::Empty;
            }
        }
    }
}
