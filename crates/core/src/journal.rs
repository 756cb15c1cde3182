use serde::{Deserialize, Serialize};

use crate::action::GameAction;
use crate::config::GameConfig;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every action dispatched to a session, in order, plus the config it started from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionJournal {
    pub format_version: u16,
    pub config: GameConfig,
    pub actions: Vec<JournalRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub seq: u64,
    pub action: GameAction,
}

impl ActionJournal {
    pub fn new(config: GameConfig) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, config, actions: Vec::new() }
    }

    pub fn record(&mut self, action: GameAction) -> u64 {
        let seq = self.actions.len() as u64;
        self.actions.push(JournalRecord { seq, action });
        seq
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MoveDirection, Position};

    #[test]
    fn records_are_numbered_in_dispatch_order() {
        let mut journal = ActionJournal::new(GameConfig::default());
        assert_eq!(journal.record(GameAction::NewGame { seed: "abc".to_string() }), 0);
        assert_eq!(journal.record(GameAction::MovePlayer(MoveDirection::Left)), 1);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn json_keeps_actions_and_config() {
        let mut config = GameConfig::default();
        config.max_depth = 2;
        let mut journal = ActionJournal::new(config);
        journal.record(GameAction::HoverCell { position: Position::new(3, 4) });
        journal.record(GameAction::HoverAwayFromCell);

        let text = journal.to_json().expect("journal serializes");
        let decoded = ActionJournal::from_json(&text).expect("journal parses");
        assert_eq!(decoded, journal);
    }
}
