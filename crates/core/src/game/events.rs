//! Event-log entries. Each variant renders to the line shown in the log panel.

use std::fmt;

use crate::content::item_name;
use crate::types::{ConditionKind, Item, Species};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum GameEvent {
    Welcome { name: String },
    PlayerHit { target: Species, damage: i32 },
    PlayerCritical { target: Species, damage: i32 },
    PlayerMiss { target: Species },
    CreatureHit { attacker: Species, damage: i32 },
    CreatureMiss { attacker: Species },
    CreatureDied { species: Species },
    CreatureBleeds { species: Species, damage: i32 },
    PickedUpGold { amount: u32 },
    PickedUp { item: Item },
    Equipped { item: Item },
    Unequipped { item: Item },
    Healed { amount: i32 },
    ConditionStarted { kind: ConditionKind },
    ConditionDamage { kind: ConditionKind, damage: i32 },
    ConditionHealing { amount: i32 },
    ConditionEnded { kind: ConditionKind },
    Descended { depth: u32 },
    Escaped,
    NoWayDown,
    PlayerDied,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Welcome { name } => write!(f, "Welcome, {name}. Find the way down."),
            GameEvent::PlayerHit { target, damage } => {
                write!(f, "You hit the {} for {damage}.", target.key())
            }
            GameEvent::PlayerCritical { target, damage } => {
                write!(f, "You critically hit the {} for {damage}!", target.key())
            }
            GameEvent::PlayerMiss { target } => write!(f, "You miss the {}.", target.key()),
            GameEvent::CreatureHit { attacker, damage } => {
                write!(f, "The {} hits you for {damage}.", attacker.key())
            }
            GameEvent::CreatureMiss { attacker } => write!(f, "The {} misses you.", attacker.key()),
            GameEvent::CreatureDied { species } => write!(f, "The {} dies.", species.key()),
            GameEvent::CreatureBleeds { species, damage } => {
                write!(f, "The {} bleeds for {damage}.", species.key())
            }
            GameEvent::PickedUpGold { amount } => write!(f, "You pick up {amount} gold coins."),
            GameEvent::PickedUp { item } => write!(f, "You pick up {}.", item_name(*item)),
            GameEvent::Equipped { item } => write!(f, "You equip {}.", item_name(*item)),
            GameEvent::Unequipped { item } => write!(f, "You put away {}.", item_name(*item)),
            GameEvent::Healed { amount } => write!(f, "You recover {amount} hp."),
            GameEvent::ConditionStarted { kind } => write!(f, "You are {}.", kind.label()),
            GameEvent::ConditionDamage { kind, damage } => {
                write!(f, "You take {damage} damage from being {}.", kind.label())
            }
            GameEvent::ConditionHealing { amount } => write!(f, "You regenerate {amount} hp."),
            GameEvent::ConditionEnded { kind } => write!(f, "You are no longer {}.", kind.label()),
            GameEvent::Descended { depth } => write!(f, "You descend to depth {depth}."),
            GameEvent::Escaped => f.write_str("You escape the dungeon!"),
            GameEvent::NoWayDown => f.write_str("You cannot find a way down."),
            GameEvent::PlayerDied => f.write_str("You die..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_and_failure_lines_read_naturally() {
        assert_eq!(GameEvent::CreatureDied { species: Species::Rat }.to_string(), "The rat dies.");
        assert_eq!(GameEvent::NoWayDown.to_string(), "You cannot find a way down.");
        assert_eq!(
            GameEvent::ConditionDamage { kind: ConditionKind::Poisoned, damage: 1 }.to_string(),
            "You take 1 damage from being poisoned."
        );
    }
}
