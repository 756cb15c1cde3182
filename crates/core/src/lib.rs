pub mod action;
pub mod config;
pub mod content;
pub mod creatures;
pub mod game;
pub mod geometry;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod state;
pub mod types;
pub mod visibility;

pub use action::{CellPatch, GameAction};
pub use config::{CombatConfig, ConfigError, CreatureConfig, GameConfig, GenerationConfig};
pub use creatures::{cross_references_consistent, init_creatures, resolve_encounter};
pub use game::{Dispatch, Game, Rejection, describe_cell, level_setup_actions, reduce};
pub use geometry::{MoveDirection, Position};
pub use journal::{ActionJournal, JournalRecord};
pub use mapgen::{GeneratedLevel, GenerationError, generate, generate_level};
pub use replay::{ReplayError, ReplayResult, replay, replay_json};
pub use state::{Cell, Creature, GameState, Map, Observation, PlayerState};
pub use types::*;
pub use visibility::{update_visibility, update_visibility_with_radius};
