use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::content::{self, DEFAULT_CHARACTER_NAME, INITIAL_MAX_HP};
use crate::creatures::RollStream;
use crate::geometry::{MoveDirection, Position, in_bounds};
use crate::types::*;

pub const INITIAL_INTERACTION_TEXT: &str = "You enter the dungeon.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub visibility: Visibility,
    pub item: Option<Item>,
    /// Species that `InitCreatures` will spawn here.
    pub spawn_marker: Option<Species>,
    // Written only through `creatures::Occupancy`.
    pub(crate) creature: Option<CreatureId>,
}

impl Cell {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            visibility: Visibility::Unseen,
            item: None,
            spawn_marker: None,
            creature: None,
        }
    }

    pub fn creature(&self) -> Option<&CreatureId> {
        self.creature.as_ref()
    }
}

/// What the surrounding UI may know about a cell under fog of war.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation {
    Unknown,
    Remembered { terrain: Terrain },
    Visible { terrain: Terrain, item: Option<Item>, creature: Option<CreatureId> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    seed: String,
}

impl Map {
    pub fn filled(width: usize, height: usize, terrain: Terrain, seed: &str) -> Self {
        let cells = vec![Cell::new(terrain); width * height];
        Self { width, height, cells, seed: seed.to_string() }
    }

    /// Builds a map from text rows: `#` wall, `.` floor, `>` stairs, anything else empty rock.
    pub fn from_rows(rows: &[&str], seed: &str) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut map = Self::filled(width, height, Terrain::Empty, seed);
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, glyph) in row.chars().enumerate() {
                let terrain = match glyph {
                    '#' => Terrain::Wall,
                    '.' => Terrain::Floor,
                    '>' => Terrain::Stairs,
                    _ => Terrain::Empty,
                };
                map.cells[row_index * width + col_index].terrain = terrain;
            }
        }
        map
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>, seed: &str) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells, seed: seed.to_string() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// A deserialized map may carry a cell buffer that disagrees with its dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.width.checked_mul(self.height) == Some(self.cells.len())
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|index| &self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(|index| &mut self.cells[index])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Out-of-bounds positions read as walls.
    pub fn terrain_at(&self, pos: Position) -> Terrain {
        self.cell(pos).map_or(Terrain::Wall, |cell| cell.terrain)
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.terrain_at(pos).is_passable()
    }

    pub fn visibility_at(&self, pos: Position) -> Visibility {
        self.cell(pos).map_or(Visibility::Unseen, |cell| cell.visibility)
    }

    pub fn creature_at(&self, pos: Position) -> Option<&CreatureId> {
        self.cell(pos).and_then(Cell::creature)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| Position { row: row as i32, col: col as i32 })
        })
    }

    pub fn stairs_position(&self) -> Option<Position> {
        self.positions().find(|&pos| self.terrain_at(pos) == Terrain::Stairs)
    }

    pub fn observe(&self, pos: Position) -> Observation {
        let Some(cell) = self.cell(pos) else {
            return Observation::Unknown;
        };
        match cell.visibility {
            Visibility::Unseen => Observation::Unknown,
            Visibility::Remembered => Observation::Remembered { terrain: cell.terrain },
            Visibility::Visible => Observation::Visible {
                terrain: cell.terrain,
                item: cell.item,
                creature: cell.creature.clone(),
            },
        }
    }

    pub(crate) fn strip_creature_slots(&mut self) {
        for cell in &mut self.cells {
            cell.creature = None;
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.cells.len() * 4);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend((self.seed.len() as u32).to_le_bytes());
        bytes.extend(self.seed.as_bytes());
        for cell in &self.cells {
            bytes.push(match cell.terrain {
                Terrain::Floor => 0,
                Terrain::Wall => 1,
                Terrain::Stairs => 2,
                Terrain::Empty => 3,
            });
            bytes.push(match cell.visibility {
                Visibility::Unseen => 0,
                Visibility::Remembered => 1,
                Visibility::Visible => 2,
            });
            match cell.item {
                None => bytes.push(0),
                Some(Item::Gold { amount }) => {
                    bytes.push(1);
                    bytes.extend(amount.to_le_bytes());
                }
                Some(Item::Potion(kind)) => bytes.extend([2, kind as u8]),
                Some(Item::Weapon(kind)) => bytes.extend([3, kind as u8]),
                Some(Item::Armor(kind)) => bytes.extend([4, kind as u8]),
            }
            bytes.push(cell.spawn_marker.map_or(0, |species| species as u8 + 1));
            match &cell.creature {
                None => bytes.push(0),
                Some(id) => {
                    bytes.push(1);
                    bytes.extend((id.as_str().len() as u32).to_le_bytes());
                    bytes.extend(id.as_str().as_bytes());
                }
            }
        }
        bytes
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = (pos.row as usize) * self.width + (pos.col as usize);
        (index < self.cells.len()).then_some(index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub species: Species,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub position: Position,
    pub conditions: BTreeMap<ConditionKind, ActiveCondition>,
}

impl Creature {
    pub fn name(&self) -> &'static str {
        self.species.key()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub gold: u32,
    pub equipped: Vec<Item>,
    pub inventory: Vec<Item>,
    pub conditions: BTreeMap<ConditionKind, ActiveCondition>,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            name: DEFAULT_CHARACTER_NAME.to_string(),
            position,
            hp: INITIAL_MAX_HP,
            max_hp: INITIAL_MAX_HP,
            gold: 0,
            equipped: Vec::new(),
            inventory: Vec::new(),
            conditions: BTreeMap::new(),
        }
    }

    pub fn attack(&self) -> i32 {
        let bonus: i32 = self.equipped.iter().map(|&item| content::attack_bonus(item)).sum();
        let chill =
            self.conditions.get(&ConditionKind::Chilled).map_or(0, |condition| condition.intensity);
        (content::PLAYER_BASE_ATTACK + bonus - chill).max(0)
    }

    pub fn defense(&self) -> i32 {
        let bonus: i32 = self.equipped.iter().map(|&item| content::defense_bonus(item)).sum();
        content::PLAYER_BASE_DEFENSE + bonus
    }

    pub fn equipped_in(&self, slot: EquipSlot) -> Option<usize> {
        self.equipped.iter().position(|item| item.equip_slot() == Some(slot))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_map: Option<Map>,
    pub seed: String,
    pub status: GameStatus,
    pub move_direction: MoveDirection,
    pub player: PlayerState,
    pub interaction_text: String,
    pub event_log: Vec<String>,
    pub creatures: BTreeMap<CreatureId, Creature>,
    pub depth: u32,
    /// Counts consumed player turns; pairs with `sound_cues` so stale cues are never replayed.
    pub turn: u64,
    pub sound_cues: Vec<SoundCue>,
    pub rolls: RollStream,
    pub config: GameConfig,
}

impl GameState {
    pub fn initial() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            current_map: None,
            seed: String::new(),
            status: GameStatus::Playing,
            move_direction: MoveDirection::Right,
            player: PlayerState::new(Position::new(0, 0)),
            interaction_text: INITIAL_INTERACTION_TEXT.to_string(),
            event_log: Vec::new(),
            creatures: BTreeMap::new(),
            depth: 1,
            turn: 0,
            sound_cues: Vec::new(),
            rolls: RollStream::new(0),
            config,
        }
    }

    pub fn map(&self) -> Option<&Map> {
        self.current_map.as_ref()
    }

    pub(crate) fn push_log(&mut self, entry: String) {
        self.event_log.push(entry);
        let capacity = self.config.event_log_capacity.max(1);
        if self.event_log.len() > capacity {
            let overflow = self.event_log.len() - capacity;
            self.event_log.drain(..overflow);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
