//! Deterministic re-execution of recorded sessions.

use log::debug;
use thiserror::Error;

use crate::config::ConfigError;
use crate::game::{Dispatch, Game};
use crate::journal::{ActionJournal, JOURNAL_FORMAT_VERSION};
use crate::types::GameStatus;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to decode journal: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("journal format {found} is not supported (expected {})", JOURNAL_FORMAT_VERSION)]
    UnsupportedFormat { found: u16 },
    #[error("journal config rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("journal record {found} appears where {expected} was expected")]
    SequenceGap { expected: u64, found: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_status: GameStatus,
    pub final_snapshot_hash: u64,
    pub final_turn: u64,
    pub applied: usize,
    pub ignored: usize,
}

pub fn replay(journal: &ActionJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }
    journal.config.validate()?;

    let mut game = Game::new(journal.config.clone());
    let mut applied = 0;
    let mut ignored = 0;
    for (expected, record) in journal.actions.iter().enumerate() {
        let expected = expected as u64;
        if record.seq != expected {
            return Err(ReplayError::SequenceGap { expected, found: record.seq });
        }
        match game.dispatch(record.action.clone()) {
            Dispatch::Applied => applied += 1,
            Dispatch::Ignored(_) => ignored += 1,
        }
    }
    debug!("replayed {} actions ({applied} applied, {ignored} ignored)", journal.len());

    let state = game.state();
    Ok(ReplayResult {
        final_status: state.status,
        final_snapshot_hash: state.snapshot_hash(),
        final_turn: state.turn,
        applied,
        ignored,
    })
}

pub fn replay_json(text: &str) -> Result<ReplayResult, ReplayError> {
    let journal = ActionJournal::from_json(text)?;
    replay(&journal)
}
