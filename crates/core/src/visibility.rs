//! Field-of-view and line-of-sight calculations for fog of war.
//! This module exists to keep sight rules deterministic and isolated from the reducer.
//! It does not own movement, encounter policy, or what the UI chooses to draw.

use crate::config::DEFAULT_SIGHT_RADIUS;
use crate::geometry::{Position, within_radius};
use crate::state::Map;
use crate::types::Visibility;

/// Recomputes fog of war for a viewer at `origin` with the default sight radius.
pub fn update_visibility(origin: Position, map: &Map) -> Map {
    update_visibility_with_radius(origin, map, DEFAULT_SIGHT_RADIUS)
}

pub fn update_visibility_with_radius(origin: Position, map: &Map, radius: i32) -> Map {
    let mut next = map.clone();
    apply_visibility(&mut next, origin, radius);
    next
}

/// In-place form used by the reducer on a map it already owns.
pub(crate) fn apply_visibility(map: &mut Map, origin: Position, radius: i32) {
    let lit = compute_lit(map, origin, radius.max(0));
    for (cell, &in_sight) in map.cells_mut().iter_mut().zip(&lit) {
        cell.visibility = if in_sight {
            Visibility::Visible
        } else if cell.visibility == Visibility::Unseen {
            Visibility::Unseen
        } else {
            Visibility::Remembered
        };
    }
}

fn compute_lit(map: &Map, origin: Position, radius: i32) -> Vec<bool> {
    let mut fov = FieldOfView { map, origin, radius, lit: vec![false; map.cells().len()] };
    if !map.in_bounds(origin) {
        return fov.lit;
    }
    fov.light(origin);
    for octant in 0..8 {
        fov.scan_octant(1, Slope::new(1, 1), Slope::new(0, 1), octant);
    }

    // Shadowcasting can light wall faces around diagonal corners; keep only cells with a clear ray.
    for pos in map.positions() {
        if pos == origin || !fov.is_lit(pos) {
            continue;
        }
        if !has_direct_line_of_sight(map, origin, pos) {
            let index = fov.index(pos);
            fov.lit[index] = false;
        }
    }
    fov.lit
}

fn transform_octant(origin: Position, x: i32, y: i32, octant: u8) -> Position {
    let (row, col) = match octant {
        0 => (origin.row - y, origin.col + x),
        1 => (origin.row - x, origin.col + y),
        2 => (origin.row - x, origin.col - y),
        3 => (origin.row - y, origin.col - x),
        4 => (origin.row + y, origin.col - x),
        5 => (origin.row + x, origin.col - y),
        6 => (origin.row + x, origin.col + y),
        7 => (origin.row + y, origin.col + x),
        _ => (origin.row, origin.col),
    };
    Position { row, col }
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

struct FieldOfView<'a> {
    map: &'a Map,
    origin: Position,
    radius: i32,
    lit: Vec<bool>,
}

impl FieldOfView<'_> {
    fn index(&self, pos: Position) -> usize {
        (pos.row as usize) * self.map.width() + (pos.col as usize)
    }

    fn is_lit(&self, pos: Position) -> bool {
        self.map.in_bounds(pos) && self.lit[self.index(pos)]
    }

    fn light(&mut self, pos: Position) {
        if self.map.in_bounds(pos) && within_radius(self.origin, pos, self.radius) {
            let index = self.index(pos);
            self.lit[index] = true;
        }
    }

    fn scan_octant(&mut self, dist: i32, start: Slope, end: Slope, octant: u8) {
        if dist > self.radius {
            return;
        }
        let mut blocked = false;
        let mut current_start = start;
        for y in (0..=dist).rev() {
            let top = Slope::new(2 * y + 1, 2 * dist - 1);
            let bottom = Slope::new(2 * y - 1, 2 * dist + 1);
            if !(current_start.greater_or_equal(&bottom) && top.greater_than(&end)) {
                continue;
            }
            let pos = transform_octant(self.origin, dist, y, octant);
            self.light(pos);
            if self.map.terrain_at(pos).is_opaque() {
                if !blocked {
                    self.scan_octant(dist + 1, current_start, top, octant);
                    blocked = true;
                }
                current_start = bottom;
            } else if blocked {
                blocked = false;
            }
        }
        if !blocked {
            self.scan_octant(dist + 1, current_start, end, octant);
        }
    }
}

/// Walks the grid ray from `origin` to `target`; any opaque cell strictly between them blocks it.
fn has_direct_line_of_sight(map: &Map, origin: Position, target: Position) -> bool {
    let dx = target.col - origin.col;
    let dy = target.row - origin.row;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_x = dx.abs();
    let total_y = dy.abs();

    let mut col = origin.col;
    let mut row = origin.row;
    let mut step_x = 0;
    let mut step_y = 0;

    while step_x < total_x || step_y < total_y {
        let lhs = (1 + 2 * step_x) * total_y;
        let rhs = (1 + 2 * step_y) * total_x;

        if lhs == rhs {
            col += sx;
            row += sy;
            step_x += 1;
            step_y += 1;
        } else if lhs < rhs {
            col += sx;
            step_x += 1;
        } else {
            row += sy;
            step_y += 1;
        }

        if col == target.col && row == target.row {
            break;
        }
        if map.terrain_at(Position { row, col }).is_opaque() {
            return false;
        }
    }
    true
}

#[cfg(test)]
pub(crate) fn draw_visibility(map: &Map, viewer: Position) -> String {
    use crate::types::Terrain;

    let mut text = String::new();
    for row in 0..map.height() {
        for col in 0..map.width() {
            let pos = Position { row: row as i32, col: col as i32 };
            let glyph = if pos == viewer {
                '@'
            } else {
                match map.terrain_at(pos) {
                    Terrain::Wall => '#',
                    Terrain::Floor => '.',
                    Terrain::Stairs => '>',
                    Terrain::Empty => ' ',
                }
            };
            let sight = match map.visibility_at(pos) {
                Visibility::Visible => 'v',
                Visibility::Remembered => 'r',
                Visibility::Unseen => 'u',
            };
            text.push(glyph);
            text.push(sight);
            text.push(' ');
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::Terrain;

    fn open_room() -> (Map, Position) {
        let rows = [
            "#############",
            "#...........#",
            "#...........#",
            "#...........#",
            "#...........#",
            "#...........#",
            "#...........#",
            "#...........#",
            "#############",
        ];
        (Map::from_rows(&rows, "room"), Position::new(4, 6))
    }

    fn corridor_with_pillar() -> (Map, Position) {
        let rows = ["###########", "#.........#", "###########"];
        let mut map = Map::from_rows(&rows, "corridor");
        map.cells_mut()[11 + 6].terrain = Terrain::Wall;
        (map, Position::new(1, 3))
    }

    #[test]
    fn origin_is_always_visible() {
        let (map, origin) = open_room();
        for radius in [0, 1, 6] {
            let seen = update_visibility_with_radius(origin, &map, radius);
            assert_eq!(seen.visibility_at(origin), Visibility::Visible);
        }
    }

    #[test]
    fn radius_bounds_sight_in_open_rooms() {
        let (map, origin) = open_room();
        let seen = update_visibility_with_radius(origin, &map, 3);
        assert_eq!(seen.visibility_at(Position::new(4, 9)), Visibility::Visible);
        assert_eq!(seen.visibility_at(Position::new(4, 10)), Visibility::Unseen);
        assert_eq!(seen.visibility_at(Position::new(1, 1)), Visibility::Unseen);
    }

    #[test]
    fn repeated_updates_from_the_same_spot_are_idempotent() {
        let (map, origin) = open_room();
        let once = update_visibility(origin, &map);
        let twice = update_visibility(origin, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn walls_occlude_cells_behind_them() {
        let (map, origin) = corridor_with_pillar();
        let seen = update_visibility_with_radius(origin, &map, 10);
        assert_eq!(seen.visibility_at(Position::new(1, 5)), Visibility::Visible);
        assert_eq!(seen.visibility_at(Position::new(1, 6)), Visibility::Visible);
        assert_eq!(
            seen.visibility_at(Position::new(1, 7)),
            Visibility::Unseen,
            "cell behind the pillar should stay dark\n{}",
            draw_visibility(&seen, origin)
        );
    }

    #[test]
    fn cells_leaving_sight_become_remembered() {
        let (map, _) = open_room();
        let first = update_visibility_with_radius(Position::new(4, 2), &map, 2);
        assert_eq!(first.visibility_at(Position::new(4, 1)), Visibility::Visible);

        let second = update_visibility_with_radius(Position::new(4, 10), &first, 2);
        assert_eq!(second.visibility_at(Position::new(4, 1)), Visibility::Remembered);
        assert_eq!(second.visibility_at(Position::new(4, 10)), Visibility::Visible);
        assert_eq!(second.visibility_at(Position::new(1, 6)), Visibility::Unseen);
    }

    #[test]
    fn input_map_is_left_untouched() {
        let (map, origin) = open_room();
        let before = map.clone();
        let _ = update_visibility(origin, &map);
        assert_eq!(map, before);
    }

    #[test]
    fn sight_does_not_leak_through_room_corners() {
        let mut map = Map::filled(20, 20, Terrain::Floor, "leak");
        let (first, last) = (4, 10);
        for row in first..=last {
            for col in first..=last {
                let on_ring = row == first || row == last || col == first || col == last;
                let terrain = if on_ring { Terrain::Wall } else { Terrain::Floor };
                map.cell_mut(Position::new(row, col)).expect("in bounds").terrain = terrain;
            }
        }

        for row in (first + 1)..last {
            for col in (first + 1)..last {
                let origin = Position::new(row, col);
                let seen = update_visibility_with_radius(origin, &map, 15);
                for pos in seen.positions() {
                    let outside =
                        pos.row < first || pos.row > last || pos.col < first || pos.col > last;
                    assert!(
                        !(outside && seen.visibility_at(pos) == Visibility::Visible),
                        "light leaked to {pos:?} from {origin:?}\n{}",
                        draw_visibility(&seen, origin)
                    );
                }
            }
        }
    }

    proptest! {
        #[test]
        fn visibility_is_idempotent_anywhere_in_the_room(
            row in 1_i32..8,
            col in 1_i32..12,
            radius in 0_i32..10,
        ) {
            let (map, _) = open_room();
            let origin = Position::new(row, col);
            let once = update_visibility_with_radius(origin, &map, radius);
            let twice = update_visibility_with_radius(origin, &once, radius);
            prop_assert_eq!(once.visibility_at(origin), Visibility::Visible);
            prop_assert_eq!(once, twice);
        }
    }
}
