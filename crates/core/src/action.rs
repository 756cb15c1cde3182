//! The closed set of inputs the reducer understands.

use serde::{Deserialize, Serialize};

use crate::geometry::{MoveDirection, Position};
use crate::state::Map;
use crate::types::{Item, Terrain};

/// Replacement contents for one cell. Creature slot and visibility are never patched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPatch {
    pub position: Position,
    pub terrain: Terrain,
    pub item: Option<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    MovePlayer(MoveDirection),
    SetCurrentMap(Map),
    SetSeed(String),
    InitPlayerSpawn(Position),
    UpdateCell(CellPatch),
    InitVisibility,
    InitCreatures,
    HoverCell { position: Position },
    HoverAwayFromCell,
    /// Starts a fresh run from `seed`; accepted in any status.
    NewGame { seed: String },
    UseItem { index: usize },
}

impl GameAction {
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::MovePlayer(_) => "move-player",
            GameAction::SetCurrentMap(_) => "set-current-map",
            GameAction::SetSeed(_) => "set-seed",
            GameAction::InitPlayerSpawn(_) => "init-player-spawn",
            GameAction::UpdateCell(_) => "update-cell",
            GameAction::InitVisibility => "init-visibility",
            GameAction::InitCreatures => "init-creatures",
            GameAction::HoverCell { .. } => "hover-cell",
            GameAction::HoverAwayFromCell => "hover-away-from-cell",
            GameAction::NewGame { .. } => "new-game",
            GameAction::UseItem { .. } => "use-item",
        }
    }
}
