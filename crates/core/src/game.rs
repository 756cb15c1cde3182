//! Action reducer and the session wrapper that hands out immutable snapshots.
//! This module exists to turn `(state, action)` into the next state without ever touching the
//! previous snapshot. It does not own map generation, sight rules, or combat arithmetic.

mod cells;
mod conditions;
mod events;
mod hash;
mod hover;
mod items;
mod level;
mod movement;
mod turn;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::action::GameAction;
use crate::config::GameConfig;
use crate::geometry::Position;
use crate::journal::ActionJournal;
use crate::state::GameState;

pub use hover::describe_cell;
pub use level::level_setup_actions;

/// Why an action left the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the run is over")]
    NotPlaying,
    #[error("no map is loaded")]
    NoMap,
    #[error("{0:?} is outside the map")]
    OutOfBounds(Position),
    #[error("{0:?} cannot be entered")]
    Blocked(Position),
    #[error("{0:?} is already occupied")]
    Occupied(Position),
    #[error("map dimensions disagree with its cell buffer")]
    MalformedMap,
    #[error("cell patch refused: {0}")]
    InvalidPatch(&'static str),
    #[error("inventory slot {0} is empty")]
    NoSuchItem(usize),
    #[error("that item cannot be used")]
    NotUsable,
}

/// Next state for `action`. Rejected actions yield a state equal to `state`.
pub fn reduce(state: &GameState, action: &GameAction) -> GameState {
    let mut next = state.clone();
    match apply(&mut next, action) {
        Ok(()) => next,
        Err(rejection) => {
            debug!("ignored {}: {rejection}", action.name());
            state.clone()
        }
    }
}

/// Mutates `state` in place. On `Err` the caller must discard `state`; it may be half-applied.
pub(crate) fn apply(state: &mut GameState, action: &GameAction) -> Result<(), Rejection> {
    match action {
        GameAction::MovePlayer(direction) => movement::move_player(state, *direction),
        GameAction::SetCurrentMap(map) => level::set_current_map(state, map),
        GameAction::SetSeed(seed) => {
            level::set_seed(state, seed);
            Ok(())
        }
        GameAction::InitPlayerSpawn(position) => level::init_player_spawn(state, *position),
        GameAction::UpdateCell(patch) => cells::update_cell(state, patch),
        GameAction::InitVisibility => level::init_visibility(state),
        GameAction::InitCreatures => level::init_creatures(state),
        GameAction::HoverCell { position } => {
            state.interaction_text = describe_cell(state, *position);
            Ok(())
        }
        GameAction::HoverAwayFromCell => {
            state.interaction_text.clear();
            Ok(())
        }
        GameAction::NewGame { seed } => level::new_game(state, seed),
        GameAction::UseItem { index } => items::use_item(state, *index),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored(Rejection),
}

impl Dispatch {
    pub fn is_applied(self) -> bool {
        matches!(self, Dispatch::Applied)
    }
}

/// A running session: the current snapshot plus the journal of everything dispatched to it.
pub struct Game {
    state: Arc<GameState>,
    journal: ActionJournal,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: Arc::new(GameState::with_config(config.clone())),
            journal: ActionJournal::new(config),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Shared handle to the current snapshot; it never changes after being handed out.
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn journal(&self) -> &ActionJournal {
        &self.journal
    }

    pub fn dispatch(&mut self, action: GameAction) -> Dispatch {
        let name = action.name();
        let mut next = GameState::clone(&self.state);
        let result = apply(&mut next, &action);
        self.journal.record(action);
        match result {
            Ok(()) => {
                self.state = Arc::new(next);
                Dispatch::Applied
            }
            Err(rejection) => {
                debug!("ignored {name}: {rejection}");
                Dispatch::Ignored(rejection)
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
